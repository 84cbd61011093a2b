//! Adapters between change scans and decoder hosts
//!
//! The scan core knows nothing about who consumes it. The adapters here shape
//! its records for the callers around it:
//! - **legacy**: one byte per channel, `0xff` for unused, as dynamic-typed hosts expect
//! - **edges**: per-channel run-length edges for signal-following decoders
//! - **stream**: crossbeam channels and shared-buffer scans on worker threads

pub mod edges;
pub mod legacy;
pub mod stream;

pub use edges::{Edge, EdgeIter};
pub use legacy::{LegacyIter, LegacyRecord, UNUSED_BYTE};
pub use stream::{ChannelMessage, Receiver, Sender, channel, feed, scan_shared};
