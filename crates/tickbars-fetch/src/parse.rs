//! Binary tick parsing from bi5 format.

use byteorder::{BigEndian, ByteOrder};
use tickbars_types::RawTick;

/// Parses raw ticks from decompressed bi5 data.
///
/// Each record is 20 bytes, big-endian:
/// - `u32`: milliseconds offset from hour start (bytes 0-3)
/// - `u32`: ask price raw (bytes 4-7)
/// - `u32`: bid price raw (bytes 8-11)
/// - `f32`: ask volume (bytes 12-15)
/// - `f32`: bid volume (bytes 16-19)
///
/// A trailing partial record is ignored.
pub fn parse_ticks(data: &[u8]) -> impl Iterator<Item = RawTick> + '_ {
    data.chunks_exact(RawTick::SIZE).map(parse_single_tick)
}

/// Parses a single tick from a 20-byte chunk.
#[inline]
fn parse_single_tick(data: &[u8]) -> RawTick {
    RawTick::new(
        BigEndian::read_u32(&data[0..4]),
        BigEndian::read_u32(&data[4..8]),
        BigEndian::read_u32(&data[8..12]),
        BigEndian::read_f32(&data[12..16]),
        BigEndian::read_f32(&data[16..20]),
    )
}

#[cfg(test)]
pub(crate) fn encode_tick(ms: u32, ask: u32, bid: u32, ask_vol: f32, bid_vol: f32) -> Vec<u8> {
    let mut bytes = vec![0u8; RawTick::SIZE];
    BigEndian::write_u32(&mut bytes[0..4], ms);
    BigEndian::write_u32(&mut bytes[4..8], ask);
    BigEndian::write_u32(&mut bytes[8..12], bid);
    BigEndian::write_f32(&mut bytes[12..16], ask_vol);
    BigEndian::write_f32(&mut bytes[16..20], bid_vol);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_tick() {
        let bytes = encode_tick(1000, 112_345, 112_340, 1.25, 2.5);
        let tick = parse_single_tick(&bytes);

        assert_eq!(tick.ms_offset, 1000);
        assert_eq!(tick.ask_raw, 112_345);
        assert_eq!(tick.bid_raw, 112_340);
        assert_eq!(tick.ask_volume, 1.25);
        assert_eq!(tick.bid_volume, 2.5);
    }

    #[test]
    fn test_trailing_partial_record_ignored() {
        let mut data = encode_tick(0, 100, 99, 1.0, 1.0);
        data.extend(encode_tick(1000, 101, 100, 1.0, 1.0));
        data.extend([0u8; 7]);

        let ticks: Vec<_> = parse_ticks(&data).collect();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[1].ms_offset, 1000);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(parse_ticks(&[]).count(), 0);
    }
}
