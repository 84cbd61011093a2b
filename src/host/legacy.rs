//! Byte-encoded records for dynamic decoder hosts
//!
//! Script-side decoders receive each change as a sample number plus a byte
//! string with one byte per channel: `0x00`, `0x01`, or [`UNUSED_BYTE`] for
//! a channel with no physical wire. This module only converts at the
//! boundary; the scan itself works with [`ChannelValue`].

use std::iter::FusedIterator;

use crate::logic::{ChangeIterator, ChannelValue};

/// Byte a host decoder sees for an unused channel
pub const UNUSED_BYTE: u8 = 0xff;

impl ChannelValue {
    /// Host byte encoding of this level
    #[inline]
    pub fn to_byte(self) -> u8 {
        match self {
            ChannelValue::Zero => 0x00,
            ChannelValue::One => 0x01,
            ChannelValue::Unused => UNUSED_BYTE,
        }
    }

    /// Parse a host byte, `None` for anything other than `0x00`, `0x01` or [`UNUSED_BYTE`]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(ChannelValue::Zero),
            0x01 => Some(ChannelValue::One),
            UNUSED_BYTE => Some(ChannelValue::Unused),
            _ => None,
        }
    }
}

/// `(samplenum, channel bytes)` pair handed to a host decoder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyRecord {
    pub samplenum: u64,
    pub samples: Vec<u8>,
}

/// Adapts a [`ChangeIterator`] to host byte records
///
/// Reuses one value buffer across pulls so only the returned byte vector is
/// allocated per change.
pub struct LegacyIter<'a> {
    inner: ChangeIterator<'a>,
    values: Vec<ChannelValue>,
}

impl<'a> LegacyIter<'a> {
    pub fn new(inner: ChangeIterator<'a>) -> Self {
        let values = Vec::with_capacity(inner.channel_map().num_channels());
        Self { inner, values }
    }

    /// The wrapped scan
    pub fn inner(&self) -> &ChangeIterator<'a> {
        &self.inner
    }
}

impl Iterator for LegacyIter<'_> {
    type Item = LegacyRecord;

    fn next(&mut self) -> Option<LegacyRecord> {
        let samplenum = self.inner.next_into(&mut self.values)?;
        let samples = self.values.iter().map(|v| v.to_byte()).collect();
        Some(LegacyRecord { samplenum, samples })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl FusedIterator for LegacyIter<'_> {}
