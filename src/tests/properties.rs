use crate::logic::get_bit;
use crate::{ChangeIterator, ChannelMap, ChannelValue, LogicRecord};
use proptest::prelude::*;

prop_compose! {
    /// A capture with long runs: few distinct byte values so repeats are common
    fn arb_capture()(
        unit_size in 1usize..=4,
    )(
        unit_size in Just(unit_size),
        data in prop::collection::vec(0u8..4, 0..(unit_size * 64 + 3)),
    ) -> (usize, Vec<u8>) {
        (unit_size, data)
    }
}

prop_compose! {
    /// A capture together with a channel map that fits its unit size
    fn arb_scan()(
        capture in arb_capture(),
    )(
        map in prop::collection::vec(
            prop::option::weighted(0.8, 0u32..(capture.0 as u32 * 8)),
            0..12,
        ),
        start in 0u64..(u64::MAX / 2),
        unit_size in Just(capture.0),
        data in Just(capture.1.clone()),
    ) -> (usize, Vec<u8>, ChannelMap, u64) {
        (unit_size, data, ChannelMap::new(map), start)
    }
}

fn scan(unit_size: usize, data: &[u8], map: &ChannelMap, start: u64) -> Vec<LogicRecord> {
    ChangeIterator::new(data, unit_size, map, start)
        .unwrap()
        .collect()
}

fn unit(data: &[u8], unit_size: usize, index: usize) -> &[u8] {
    &data[index * unit_size..(index + 1) * unit_size]
}

proptest! {
    /// Property: the first record exists and comes from unit 0 whenever there is a whole unit
    #[test]
    fn prop_first_record_is_unit_zero((unit_size, data, map, start) in arb_scan()) {
        let units = data.len() / unit_size;
        let records = scan(unit_size, &data, &map, start);
        if units == 0 {
            prop_assert!(records.is_empty());
        } else {
            prop_assert_eq!(records[0].sample_num, start);
            prop_assert_eq!(&records[0].values, &map.unpack(unit(&data, unit_size, 0)));
        }
    }

    /// Property: record count lies in [1, N] for N whole units, 0 when N is 0
    #[test]
    fn prop_record_count_bounds((unit_size, data, map, start) in arb_scan()) {
        let units = data.len() / unit_size;
        let count = scan(unit_size, &data, &map, start).len();
        if units == 0 {
            prop_assert_eq!(count, 0);
        } else {
            prop_assert!((1..=units).contains(&count));
        }
    }

    /// Property: consecutive records come from units with different bytes
    #[test]
    fn prop_consecutive_units_differ((unit_size, data, map, start) in arb_scan()) {
        let records = scan(unit_size, &data, &map, start);
        for pair in records.windows(2) {
            let a = (pair[0].sample_num - start) as usize;
            let b = (pair[1].sample_num - start) as usize;
            prop_assert_ne!(unit(&data, unit_size, a), unit(&data, unit_size, b));
        }
    }

    /// Property: sample numbers strictly increase and every skipped unit
    /// equals the last emitted one
    #[test]
    fn prop_skipped_units_repeat_last_change((unit_size, data, map, start) in arb_scan()) {
        let units = data.len() / unit_size;
        let records = scan(unit_size, &data, &map, start);
        for pair in records.windows(2) {
            prop_assert!(pair[0].sample_num < pair[1].sample_num);
        }

        let emitted: Vec<usize> = records
            .iter()
            .map(|r| (r.sample_num - start) as usize)
            .collect();
        let mut last = None;
        for index in 0..units {
            if emitted.contains(&index) {
                last = Some(index);
            } else {
                let last = last.expect("unit 0 is always emitted");
                prop_assert_eq!(unit(&data, unit_size, index), unit(&data, unit_size, last));
            }
        }
    }

    /// Property: unused values appear exactly where the map has no bit, and
    /// every other value is the mapped bit of the unit
    #[test]
    fn prop_values_follow_map((unit_size, data, map, start) in arb_scan()) {
        for record in scan(unit_size, &data, &map, start) {
            prop_assert_eq!(record.values.len(), map.num_channels());
            let raw = unit(&data, unit_size, (record.sample_num - start) as usize);
            for (channel, value) in record.values.iter().enumerate() {
                match map.get(channel).flatten() {
                    None => prop_assert_eq!(*value, ChannelValue::Unused),
                    Some(bit) => {
                        let expected = (raw[(bit / 8) as usize] >> (bit % 8)) & 1 == 1;
                        prop_assert_eq!(*value, ChannelValue::from_bit(expected));
                        prop_assert_eq!(get_bit(raw, bit), expected);
                    }
                }
            }
        }
    }

    /// Property: trailing bytes past the last whole unit never change the output
    #[test]
    fn prop_trailing_bytes_ignored(
        (unit_size, data, map, start) in arb_scan(),
        tail in prop::collection::vec(any::<u8>(), 0..4),
    ) {
        let whole = data.len() / unit_size * unit_size;
        let mut padded = data[..whole].to_vec();
        padded.extend(tail.iter().take(unit_size - 1));
        prop_assert_eq!(
            scan(unit_size, &data[..whole], &map, start),
            scan(unit_size, &padded, &map, start)
        );
    }
}
