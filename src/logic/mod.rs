//! Change detection over bit-packed logic captures
//!
//! - **PackedSamples**: borrowed capture buffer split into fixed-width units
//! - **ChannelMap**: logical channel to physical bit table, with unused channels
//! - **ChangeIterator**: pull-based scan emitting one record per distinct unit
//! - **LogicConfig**: validated unit size + channel map for repeated scans

pub mod change_iter;
pub mod channel_map;
pub mod config;
pub mod packed;
pub mod value;

pub use change_iter::{ChangeIterator, ScanState};
pub use channel_map::{ChannelMap, UNUSED_CHANNEL};
pub use config::LogicConfig;
pub use packed::{PackedSamples, get_bit};
pub use value::{ChannelValue, LogicRecord};
