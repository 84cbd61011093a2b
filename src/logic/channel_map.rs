//! Logical-to-physical channel mapping
//!
//! A decoder declares its channels in its own order; the capture stores them at
//! whatever physical bit positions they were wired to. `ChannelMap` translates
//! between the two and unpacks a raw sample unit into decoder order.

use super::packed::get_bit;
use super::value::ChannelValue;
use crate::{LogicError, Result};

/// Raw map value for a declared but unconnected channel
pub const UNUSED_CHANNEL: i32 = -1;

/// Table from logical channel index to physical bit index
///
/// `None` marks a channel the decoder declared that is not physically present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelMap {
    bits: Vec<Option<u32>>,
}

impl ChannelMap {
    pub fn new(bits: Vec<Option<u32>>) -> Self {
        Self { bits }
    }

    /// Logical channel `i` reads physical bit `i`
    pub fn identity(num_channels: u32) -> Self {
        (0..num_channels).map(Some).collect()
    }

    /// Build a map from raw integers, where [`UNUSED_CHANNEL`] marks an
    /// unconnected channel.
    pub fn from_raw(raw: &[i32]) -> Result<Self> {
        raw.iter()
            .enumerate()
            .map(|(channel, &value)| match value {
                UNUSED_CHANNEL => Ok(None),
                v if v >= 0 => Ok(Some(v as u32)),
                v => Err(LogicError::InvalidMapEntry { channel, value: v }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Number of logical channels, unused ones included
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.bits.len()
    }

    /// Physical bit of logical channel `channel`.
    ///
    /// Returns `None` past the end of the map and `Some(None)` for an unused
    /// channel.
    pub fn get(&self, channel: usize) -> Option<Option<u32>> {
        self.bits.get(channel).copied()
    }

    pub fn is_unused(&self, channel: usize) -> bool {
        matches!(self.get(channel), Some(None))
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.bits.iter().copied()
    }

    /// Highest physical bit referenced by any channel
    pub fn max_bit(&self) -> Option<u32> {
        self.bits.iter().flatten().copied().max()
    }

    /// Check that every mapped bit lies inside a unit of `unit_size` bytes
    pub fn check_unit_size(&self, unit_size: usize) -> Result<()> {
        let unit_bits = (unit_size as u64).saturating_mul(8);
        for (channel, bit) in self.bits.iter().enumerate() {
            if let Some(bit) = *bit
                && u64::from(bit) >= unit_bits
            {
                return Err(LogicError::ChannelOutOfRange {
                    channel,
                    bit,
                    unit_size,
                });
            }
        }
        Ok(())
    }

    /// Unpack one sample unit into `values`, one entry per logical channel.
    ///
    /// `values` is cleared first so its allocation can be reused across units.
    #[inline]
    pub fn unpack_into(&self, unit: &[u8], values: &mut Vec<ChannelValue>) {
        values.clear();
        values.extend(self.bits.iter().map(|bit| match *bit {
            None => ChannelValue::Unused,
            Some(bit) => ChannelValue::from_bit(get_bit(unit, bit)),
        }));
    }

    pub fn unpack(&self, unit: &[u8]) -> Vec<ChannelValue> {
        let mut values = Vec::with_capacity(self.bits.len());
        self.unpack_into(unit, &mut values);
        values
    }
}

impl FromIterator<Option<u32>> for ChannelMap {
    fn from_iter<I: IntoIterator<Item = Option<u32>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChannelValue::{One, Unused, Zero};

    #[test]
    fn test_identity() {
        let map = ChannelMap::identity(3);
        assert_eq!(map.num_channels(), 3);
        assert_eq!(map.get(2), Some(Some(2)));
        assert_eq!(map.get(3), None);
        assert_eq!(map.max_bit(), Some(2));
    }

    #[test]
    fn test_identity_empty() {
        let map = ChannelMap::identity(0);
        assert_eq!(map.num_channels(), 0);
        assert_eq!(map.max_bit(), None);
    }

    #[test]
    fn test_from_raw_sentinel() {
        let map = ChannelMap::from_raw(&[3, UNUSED_CHANNEL, 0]).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![Some(3), None, Some(0)]);
        assert!(map.is_unused(1));
        assert!(!map.is_unused(0));
        assert!(!map.is_unused(5));
    }

    #[test]
    fn test_from_raw_rejects_other_negatives() {
        let err = ChannelMap::from_raw(&[0, -2]).unwrap_err();
        assert!(matches!(
            err,
            LogicError::InvalidMapEntry {
                channel: 1,
                value: -2
            }
        ));
    }

    #[test]
    fn test_check_unit_size() {
        let map = ChannelMap::new(vec![Some(0), None, Some(15)]);
        assert!(map.check_unit_size(2).is_ok());
        assert!(matches!(
            map.check_unit_size(1),
            Err(LogicError::ChannelOutOfRange {
                channel: 2,
                bit: 15,
                unit_size: 1
            })
        ));

        // All-unused maps fit any unit
        let map = ChannelMap::new(vec![None, None]);
        assert!(map.check_unit_size(1).is_ok());
        assert_eq!(map.max_bit(), None);
    }

    #[test]
    fn test_unpack_remaps_bits() {
        // ch0 <- bit 9, ch1 unused, ch2 <- bit 0, ch3 <- bit 1
        let map = ChannelMap::new(vec![Some(9), None, Some(0), Some(1)]);
        let unit = [0b0000_0001, 0b0000_0010];
        assert_eq!(map.unpack(&unit), vec![One, Unused, One, Zero]);
    }

    #[test]
    fn test_unpack_into_reuses_buffer() {
        let map = ChannelMap::identity(2);
        let mut values = vec![Unused; 8];
        map.unpack_into(&[0b10], &mut values);
        assert_eq!(values, vec![Zero, One]);
    }

    #[test]
    fn test_empty_map() {
        let map = ChannelMap::default();
        assert_eq!(map.num_channels(), 0);
        assert!(map.unpack(&[0xff]).is_empty());
    }
}
