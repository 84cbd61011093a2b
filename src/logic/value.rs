//! Decoder-facing channel values and change records

use std::fmt;

/// Level of one logical channel at one sample instant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelValue {
    /// Channel is low
    Zero,
    /// Channel is high
    One,
    /// Channel was declared by the decoder but is not wired to any physical bit
    Unused,
}

impl ChannelValue {
    /// Convert a sampled bit into a channel level
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::One } else { Self::Zero }
    }

    /// The level as a bool, or `None` for an unused channel
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::Unused => None,
        }
    }

    #[inline]
    pub fn is_unused(self) -> bool {
        self == Self::Unused
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Unused => '-',
        };
        write!(f, "{}", c)
    }
}

/// A change event: the channel levels of a sample unit that differs from the
/// previously emitted one
///
/// The levels hold until the next record; the run length is the difference
/// between consecutive `sample_num`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicRecord {
    /// Absolute sample number in the capture timeline
    pub sample_num: u64,
    /// One entry per logical channel, in decoder order
    pub values: Vec<ChannelValue>,
}

impl LogicRecord {
    pub fn new(sample_num: u64, values: Vec<ChannelValue>) -> Self {
        Self { sample_num, values }
    }

    /// Number of logical channels carried by this record
    pub fn num_channels(&self) -> usize {
        self.values.len()
    }

    /// Level of logical channel `channel`
    pub fn value(&self, channel: usize) -> Option<ChannelValue> {
        self.values.get(channel).copied()
    }
}

impl fmt::Display for LogicRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LogicRecord[n={}, values=", self.sample_num)?;
        for value in &self.values {
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
