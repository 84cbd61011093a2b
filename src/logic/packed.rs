//! Borrowed view over a bit-packed capture buffer

use std::fmt;
use std::num::NonZeroUsize;

use crate::{LogicError, Result};

/// A read-only run of fixed-width sample units
///
/// Each unit holds the state of every physical channel at one sample instant.
/// Units are packed back to back; bytes past the last whole unit are never
/// handed out.
///
/// ## Bit Packing Format
///
/// LSB-first within each byte: physical bit N of a unit is at
/// `unit[N/8] >> (N%8) & 1`.
#[derive(Clone, Copy, Debug)]
pub struct PackedSamples<'a> {
    data: &'a [u8],
    unit_size: NonZeroUsize,
}

impl<'a> PackedSamples<'a> {
    /// Wrap `data` as consecutive units of `unit_size` bytes
    pub fn new(data: &'a [u8], unit_size: usize) -> Result<Self> {
        let unit_size = NonZeroUsize::new(unit_size).ok_or(LogicError::ZeroUnitSize)?;
        Ok(Self { data, unit_size })
    }

    /// Bytes per sample unit
    #[inline]
    pub fn unit_size(&self) -> usize {
        self.unit_size.get()
    }

    /// Number of whole units in the buffer
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.data.len() / self.unit_size.get()
    }

    /// Number of bytes after the last whole unit
    pub fn trailing_len(&self) -> usize {
        self.data.len() % self.unit_size.get()
    }

    /// The raw buffer, trailing bytes included
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of unit `index`, or `None` once `index` is past the last whole unit
    #[inline]
    pub fn unit(&self, index: usize) -> Option<&'a [u8]> {
        let size = self.unit_size.get();
        let start = index.checked_mul(size)?;
        let end = start.checked_add(size)?;
        self.data.get(start..end)
    }

    /// Iterate over every whole unit in order
    pub fn units(&self) -> std::slice::ChunksExact<'a, u8> {
        self.data.chunks_exact(self.unit_size.get())
    }
}

impl fmt::Display for PackedSamples<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PackedSamples[units={}, unit_size={}, trailing={}]",
            self.unit_count(),
            self.unit_size,
            self.trailing_len()
        )
    }
}

/// Read physical bit `bit` of a sample unit.
///
/// Bits beyond the end of `unit` read as low.
#[inline]
pub fn get_bit(unit: &[u8], bit: u32) -> bool {
    let byte_offset = (bit / 8) as usize;
    let bit_offset = bit % 8;
    unit.get(byte_offset)
        .is_some_and(|byte| (byte >> bit_offset) & 1 == 1)
}
