//! Change scanning for bit-packed logic analyzer captures
//!
//! This library turns a raw capture buffer, where every sample instant is a
//! fixed-width unit of packed channel bits, into the stream of change events
//! a protocol decoder consumes.
//!
//! # Architecture
//!
//! - **PackedSamples**: borrowed capture bytes split into whole sample units
//! - **ChannelMap**: decoder channel order to physical bit, with unused channels
//! - **ChangeIterator**: skips repeated units and unpacks each distinct one
//! - **Host adapters**: legacy byte records, per-channel edges, channel streams
//!
//! # Example
//!
//! ```
//! use logicscan::{ChangeIterator, ChannelMap, ChannelValue};
//!
//! let map = ChannelMap::identity(2);
//! let capture = [0b00, 0b00, 0b01, 0b01, 0b11];
//! let records: Vec<_> = ChangeIterator::new(&capture, 1, &map, 100)?.collect();
//!
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[1].sample_num, 102);
//! assert_eq!(records[1].values, vec![ChannelValue::One, ChannelValue::Zero]);
//! # Ok::<(), logicscan::LogicError>(())
//! ```

use thiserror::Error;

pub mod host;
pub mod logic;

#[cfg(test)]
mod tests;

// Re-export the scan core
pub use logic::{
    ChangeIterator, ChannelMap, ChannelValue, LogicConfig, LogicRecord, PackedSamples, ScanState,
    UNUSED_CHANNEL,
};

// Re-export host adapters
pub use host::{Edge, EdgeIter, LegacyIter, LegacyRecord, UNUSED_BYTE, scan_shared};

#[derive(Error, Debug)]
pub enum LogicError {
    #[error("Sample unit size must be non-zero")]
    ZeroUnitSize,

    #[error("Channel {channel} maps to bit {bit}, outside a {unit_size}-byte sample unit")]
    ChannelOutOfRange {
        channel: usize,
        bit: u32,
        unit_size: usize,
    },

    #[error("Invalid channel map entry {value} for channel {channel}")]
    InvalidMapEntry { channel: usize, value: i32 },

    #[error("Sample numbers overflow: start {start} + {units} units")]
    SampleNumberOverflow { start: u64, units: u64 },

    #[error("Scan worker {0} panicked")]
    WorkerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, LogicError>;
