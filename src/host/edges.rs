//! Per-channel edge streams
//!
//! Decoders that follow individual signals (clock, chip select, data lines)
//! want each wire as its own run-length stream rather than a full channel
//! vector per change. [`EdgeIter`] splits change records into [`Edge`]s: the
//! first record seeds the level of every mapped channel, later records only
//! yield the channels whose level moved.

use std::collections::VecDeque;
use std::fmt;

use crate::logic::{ChangeIterator, ChannelValue};

/// A channel level that holds from `sample_num` until the next edge on the
/// same channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Logical channel index
    pub channel: usize,
    /// Level from this sample on
    pub value: bool,
    /// Absolute sample number where the level starts
    pub sample_num: u64,
}

impl Edge {
    pub fn new(channel: usize, value: bool, sample_num: u64) -> Self {
        Self {
            channel,
            value,
            sample_num,
        }
    }

    /// Start time in nanoseconds for a capture taken every `timestamp_step` ns,
    /// clamped to `u64::MAX`
    #[inline]
    pub fn start_time(&self, timestamp_step: u64) -> u64 {
        self.sample_num.saturating_mul(timestamp_step)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Edge[ch={}, v={}, n={}]",
            self.channel, self.value, self.sample_num
        )
    }
}

/// Splits a change scan into per-channel edges, in channel order within each
/// sample number
pub struct EdgeIter<'a> {
    inner: ChangeIterator<'a>,
    current: Vec<ChannelValue>,
    scratch: Vec<ChannelValue>,
    pending: VecDeque<Edge>,
    seeded: bool,
}

impl<'a> EdgeIter<'a> {
    pub fn new(inner: ChangeIterator<'a>) -> Self {
        let num_channels = inner.channel_map().num_channels();
        Self {
            inner,
            current: Vec::with_capacity(num_channels),
            scratch: Vec::with_capacity(num_channels),
            pending: VecDeque::with_capacity(num_channels),
            seeded: false,
        }
    }

    /// Current level of every logical channel, empty before the first edge
    pub fn levels(&self) -> &[ChannelValue] {
        &self.current
    }

    /// Pull change records until one produces at least one edge
    fn refill(&mut self) -> bool {
        while self.pending.is_empty() {
            let Some(sample_num) = self.inner.next_into(&mut self.scratch) else {
                return false;
            };

            for (channel, value) in self.scratch.iter().enumerate() {
                let Some(level) = value.as_bool() else {
                    continue;
                };
                if !self.seeded || self.current[channel] != *value {
                    self.pending.push_back(Edge::new(channel, level, sample_num));
                }
            }

            std::mem::swap(&mut self.current, &mut self.scratch);
            self.seeded = true;
        }
        true
    }
}

impl Iterator for EdgeIter<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.pending.is_empty() && !self.refill() {
            return None;
        }
        self.pending.pop_front()
    }
}
