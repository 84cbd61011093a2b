//! Change iterator over a packed capture
//!
//! Walks the sample units of a [`PackedSamples`] buffer, skips every unit that
//! is byte-identical to the last one emitted and unpacks the rest through a
//! [`ChannelMap`]. The result is a run-length encoded view of the capture: a
//! record is produced only when at least one physical bit changes.
//!
//! The first whole unit is always emitted, so every scan starts with the full
//! channel state at its starting sample number.

use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::channel_map::ChannelMap;
use super::packed::PackedSamples;
use super::value::{ChannelValue, LogicRecord};
use crate::{LogicError, Result};

/// Lifecycle of a [`ChangeIterator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Units remain past the cursor
    Active,
    /// Every whole unit has been consumed; terminal
    Exhausted,
}

/// Forward-only scan producing one [`LogicRecord`] per change
///
/// Borrows the capture and the channel map for its whole lifetime and never
/// mutates either. Several iterators may scan the same buffer at once; each
/// keeps its own cursor.
#[derive(Clone, Debug)]
pub struct ChangeIterator<'a> {
    samples: PackedSamples<'a>,
    channel_map: &'a ChannelMap,
    start_samplenum: u64,
    /// Units consumed so far
    cursor: usize,
    /// Bytes of the last emitted unit, `None` until the first record
    prev_unit: Option<&'a [u8]>,
    records_emitted: u64,
    end_reported: bool,
}

impl<'a> ChangeIterator<'a> {
    /// Create an iterator over `data` split into units of `unit_size` bytes.
    ///
    /// # Arguments
    ///
    /// * `data` - Packed capture bytes; a trailing partial unit is ignored
    /// * `unit_size` - Bytes per sample unit, must be non-zero
    /// * `channel_map` - Logical channel layout the records are produced in
    /// * `start_samplenum` - Absolute sample number of the first unit
    pub fn new(
        data: &'a [u8],
        unit_size: usize,
        channel_map: &'a ChannelMap,
        start_samplenum: u64,
    ) -> Result<Self> {
        let samples = PackedSamples::new(data, unit_size)?;
        channel_map.check_unit_size(unit_size)?;
        Self::from_parts(samples, channel_map, start_samplenum)
    }

    /// Build from a buffer and a map already checked against its unit size
    pub(crate) fn from_parts(
        samples: PackedSamples<'a>,
        channel_map: &'a ChannelMap,
        start_samplenum: u64,
    ) -> Result<Self> {
        let units = samples.unit_count() as u64;
        // Last emitted sample number is start + units - 1
        if units > 0 && start_samplenum.checked_add(units - 1).is_none() {
            return Err(LogicError::SampleNumberOverflow {
                start: start_samplenum,
                units,
            });
        }

        debug!(
            "Change scan: {} units of {} bytes ({} trailing), {} channels, start={}",
            units,
            samples.unit_size(),
            samples.trailing_len(),
            channel_map.num_channels(),
            start_samplenum
        );

        Ok(Self {
            samples,
            channel_map,
            start_samplenum,
            cursor: 0,
            prev_unit: None,
            records_emitted: 0,
            end_reported: false,
        })
    }

    pub fn state(&self) -> ScanState {
        if self.cursor >= self.samples.unit_count() {
            ScanState::Exhausted
        } else {
            ScanState::Active
        }
    }

    /// Number of units consumed so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of whole units in the scanned buffer
    pub fn unit_count(&self) -> usize {
        self.samples.unit_count()
    }

    pub fn start_samplenum(&self) -> u64 {
        self.start_samplenum
    }

    pub fn channel_map(&self) -> &'a ChannelMap {
        self.channel_map
    }

    /// Records produced so far
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted
    }

    /// Produce the next change into a caller-owned buffer.
    ///
    /// Returns the absolute sample number of the change, or `None` once the
    /// capture is exhausted. `values` is left untouched on `None`.
    pub fn next_into(&mut self, values: &mut Vec<ChannelValue>) -> Option<u64> {
        let (index, unit) = self.advance()?;
        self.channel_map.unpack_into(unit, values);
        let sample_num = self.start_samplenum + index as u64;
        trace!("Change at sample {}", sample_num);
        Some(sample_num)
    }

    /// Move past units equal to the previous one and consume the next
    /// distinct unit, returning its index and bytes.
    fn advance(&mut self) -> Option<(usize, &'a [u8])> {
        let Some(mut unit) = self.samples.unit(self.cursor) else {
            self.report_end();
            return None;
        };

        if let Some(prev) = self.prev_unit {
            while unit == prev {
                self.cursor += 1;
                match self.samples.unit(self.cursor) {
                    Some(next) => unit = next,
                    None => {
                        self.report_end();
                        return None;
                    }
                }
            }
        }

        self.prev_unit = Some(unit);
        let index = self.cursor;
        self.cursor += 1;
        self.records_emitted += 1;
        Some((index, unit))
    }

    fn report_end(&mut self) {
        if !self.end_reported {
            self.end_reported = true;
            debug!(
                "Change scan exhausted: {} records from {} units",
                self.records_emitted, self.cursor
            );
        }
    }
}

impl Iterator for ChangeIterator<'_> {
    type Item = LogicRecord;

    fn next(&mut self) -> Option<LogicRecord> {
        let mut values = Vec::with_capacity(self.channel_map.num_channels());
        let sample_num = self.next_into(&mut values)?;
        Some(LogicRecord::new(sample_num, values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.unit_count().saturating_sub(self.cursor);
        // Before the first record any remaining unit is guaranteed to emit
        let lower = usize::from(self.prev_unit.is_none() && remaining > 0);
        (lower, Some(remaining))
    }
}

impl FusedIterator for ChangeIterator<'_> {}
