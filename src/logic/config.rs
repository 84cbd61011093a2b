//! Validated scan configuration

use super::change_iter::ChangeIterator;
use super::channel_map::ChannelMap;
use super::packed::PackedSamples;
use crate::{LogicError, Result};

/// Everything a decoder needs to scan captures of one layout
///
/// Validation happens once in [`LogicConfig::new`], so any number of scans
/// can be started from it without failing on configuration.
#[derive(Clone, Debug)]
pub struct LogicConfig {
    name: String,
    unit_size: usize,
    channel_map: ChannelMap,
    start_samplenum: u64,
}

impl LogicConfig {
    /// Create a configuration for units of `unit_size` bytes.
    ///
    /// Fails if `unit_size` is zero or a mapped bit does not fit in a unit.
    pub fn new(unit_size: usize, channel_map: ChannelMap) -> Result<Self> {
        if unit_size == 0 {
            return Err(LogicError::ZeroUnitSize);
        }
        channel_map.check_unit_size(unit_size)?;

        Ok(Self {
            name: "logic".to_string(),
            unit_size,
            channel_map,
            start_samplenum: 0,
        })
    }

    /// With custom name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Absolute sample number of the first unit of each scanned buffer
    pub fn with_start_samplenum(mut self, start_samplenum: u64) -> Self {
        self.start_samplenum = start_samplenum;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_size(&self) -> usize {
        self.unit_size
    }

    pub fn channel_map(&self) -> &ChannelMap {
        &self.channel_map
    }

    pub fn num_channels(&self) -> usize {
        self.channel_map.num_channels()
    }

    pub fn start_samplenum(&self) -> u64 {
        self.start_samplenum
    }

    /// Start a change scan over `data`.
    ///
    /// Only fails when the sample numbers of `data` would overflow `u64`.
    pub fn scan<'a>(&'a self, data: &'a [u8]) -> Result<ChangeIterator<'a>> {
        let samples = PackedSamples::new(data, self.unit_size)?;
        ChangeIterator::from_parts(samples, &self.channel_map, self.start_samplenum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::ChannelValue::{One, Zero};

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            LogicConfig::new(0, ChannelMap::identity(1)),
            Err(LogicError::ZeroUnitSize)
        ));
        assert!(matches!(
            LogicConfig::new(1, ChannelMap::identity(9)),
            Err(LogicError::ChannelOutOfRange { channel: 8, .. })
        ));
        assert!(LogicConfig::new(2, ChannelMap::identity(16)).is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = LogicConfig::new(1, ChannelMap::identity(2))
            .unwrap()
            .with_name("uart")
            .with_start_samplenum(1000);
        assert_eq!(config.name(), "uart");
        assert_eq!(config.unit_size(), 1);
        assert_eq!(config.num_channels(), 2);
        assert_eq!(config.start_samplenum(), 1000);
    }

    #[test]
    fn test_scan_uses_config() {
        let config = LogicConfig::new(1, ChannelMap::new(vec![Some(1)]))
            .unwrap()
            .with_start_samplenum(50);
        let data = [0b00, 0b10, 0b10];
        let records: Vec<_> = config.scan(&data).unwrap().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sample_num, 50);
        assert_eq!(records[0].values, vec![Zero]);
        assert_eq!(records[1].sample_num, 51);
        assert_eq!(records[1].values, vec![One]);
    }

    #[test]
    fn test_scan_twice_restarts() {
        let config = LogicConfig::new(1, ChannelMap::identity(1)).unwrap();
        let data = [0, 1];
        assert_eq!(config.scan(&data).unwrap().count(), 2);
        assert_eq!(config.scan(&data).unwrap().count(), 2);
    }
}
