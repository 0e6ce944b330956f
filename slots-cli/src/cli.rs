//! Implements the command line behavior.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info, trace};
use rvjni_cframe::{walk, Address, CFrame, MemoryImage};
use rvjni_slots::{ArgKind, ArgValue, ManagedRef, Slot, SlotLayout, TargetLayout};

use crate::error::ArgParseError;

/// Splits an optional `0x` prefix off a number.
fn strip_hex(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Parses a 32-bit word. Hex covers the full unsigned range; decimal
/// accepts both signed and unsigned spellings.
fn parse_u32(text: &str) -> Option<u32> {
    match strip_hex(text) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text
            .parse::<u32>()
            .ok()
            .or_else(|| text.parse::<i32>().ok().map(|v| v as u32)),
    }
}

fn parse_u64(text: &str) -> Option<u64> {
    match strip_hex(text) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text
            .parse::<u64>()
            .ok()
            .or_else(|| text.parse::<i64>().ok().map(|v| v as u64)),
    }
}

/// Parses a kind name such as `i64`.
pub fn parse_kind(text: &str) -> Result<ArgKind, ArgParseError> {
    ArgKind::from_name(text).ok_or_else(|| ArgParseError::UnknownKind(text.to_string()))
}

/// Parses an argument descriptor such as `i32:42`, `i64:0x1122334455667788`
/// or `f64:-inf`. Float kinds given in hex are taken as raw bit patterns.
pub fn parse_arg(text: &str) -> Result<ArgValue, ArgParseError> {
    let (kind, value) = text
        .split_once(':')
        .ok_or_else(|| ArgParseError::MissingKind(text.to_string()))?;
    let kind = parse_kind(kind)?;
    let invalid = || ArgParseError::InvalidValue {
        kind,
        text: value.to_string(),
    };

    let parsed = match kind {
        ArgKind::Int => parse_u32(value).map(|v| ArgValue::Int(v as i32)),
        ArgKind::Long => parse_u64(value).map(|v| ArgValue::Long(v as i64)),
        ArgKind::Obj => parse_u32(value).map(|v| ArgValue::Obj(ManagedRef::from_raw(v))),
        ArgKind::Float => match strip_hex(value) {
            Some(_) => parse_u32(value).map(|b| ArgValue::Float(f32::from_bits(b))),
            None => value.parse::<f32>().ok().map(ArgValue::Float),
        },
        ArgKind::Double => match strip_hex(value) {
            Some(_) => parse_u64(value).map(|b| ArgValue::Double(f64::from_bits(b))),
            None => value.parse::<f64>().ok().map(ArgValue::Double),
        },
    };
    parsed.ok_or_else(invalid)
}

/// Parses a slot word given in hex or decimal.
pub fn parse_slot(text: &str) -> Result<Slot, ArgParseError> {
    parse_u32(text)
        .map(Slot::from_bits)
        .ok_or_else(|| ArgParseError::InvalidSlot(text.to_string()))
}

/// Parses a target address given in hex or decimal.
pub fn parse_address(text: &str) -> Result<Address, ArgParseError> {
    let addr = match strip_hex(text) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse::<u32>().ok(),
    };
    addr.ok_or_else(|| ArgParseError::InvalidAddress(text.to_string()))
}

/// Packs the values into a freshly allocated slot array.
///
/// Returns the slots and the offset at which each value was written.
pub fn pack_values(values: &[ArgValue]) -> (Vec<Slot>, Vec<usize>) {
    let total: usize = values.iter().map(ArgValue::slot_width).sum();
    let mut slots = vec![Slot::default(); total];
    let mut offsets = Vec::with_capacity(values.len());
    let mut pos = 0;
    for value in values {
        let at = pos;
        TargetLayout::push_value(value, &mut slots, &mut pos);
        trace!("pushed {value} at slot {at}");
        offsets.push(at);
    }
    debug!("packed {} argument(s) into {} slot(s)", values.len(), pos);
    (slots, offsets)
}

/// Reads values of the given kinds back out of consecutive slots.
pub fn unpack_values(
    kinds: &[ArgKind],
    slots: &[Slot],
) -> Result<Vec<(usize, ArgValue)>, ArgParseError> {
    let needed: usize = kinds.iter().map(|k| k.slot_width()).sum();
    if needed > slots.len() {
        return Err(ArgParseError::NotEnoughSlots {
            needed,
            available: slots.len(),
        });
    }

    let mut pos = 0;
    let values = kinds
        .iter()
        .map(|&kind| {
            let at = pos;
            (at, TargetLayout::next_value(kind, slots, &mut pos))
        })
        .collect();
    Ok(values)
}

fn write_slots(out: &mut impl Write, slots: &[Slot]) -> std::io::Result<()> {
    for (i, slot) in slots.iter().enumerate() {
        writeln!(out, "slot[{i}]: {slot}")?;
    }
    Ok(())
}

fn write_args<'a>(
    out: &mut impl Write,
    args: impl IntoIterator<Item = (usize, &'a ArgValue)>,
) -> std::io::Result<()> {
    for (i, (at, value)) in args.into_iter().enumerate() {
        writeln!(out, "arg[{i}] @{at}: {value}")?;
    }
    Ok(())
}

/// Packs argument descriptors into slots and prints the layout.
pub fn pack(args: &[String]) -> Result<(), String> {
    let values = args
        .iter()
        .map(|a| parse_arg(a))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Unable to parse argument: {e}"))?;

    let (slots, offsets) = pack_values(&values);

    let mut out = std::io::stdout().lock();
    write_slots(&mut out, &slots)
        .and_then(|_| write_args(&mut out, offsets.iter().copied().zip(&values)))
        .map_err(|e| format!("Unable to write output: {e}"))
}

/// Decodes slot words according to the kinds and prints each value.
pub fn unpack(kinds: &[String], slots: &[String]) -> Result<(), String> {
    let kinds = kinds
        .iter()
        .map(|k| parse_kind(k.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Unable to parse kinds: {e}"))?;
    let slots = slots
        .iter()
        .map(|s| parse_slot(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Unable to parse slots: {e}"))?;

    let values = unpack_values(&kinds, &slots).map_err(|e| format!("Unable to unpack: {e}"))?;
    if values.iter().map(|(_, v)| v.slot_width()).sum::<usize>() < slots.len() {
        info!("ignoring trailing slots past the last argument");
    }

    let mut out = std::io::stdout().lock();
    write_args(&mut out, values.iter().map(|(at, v)| (*at, v)))
        .map_err(|e| format!("Unable to write output: {e}"))
}

/// Walks native frames in a raw little-endian memory image.
pub fn walk_frames(
    image: &Path,
    base: Address,
    fp: Address,
    pc: Address,
    sp: Address,
) -> Result<(), String> {
    let bytes =
        fs::read(image).map_err(|e| format!("Unable to read image {}: {e}", image.display()))?;
    let memory = MemoryImage::new(base, bytes);
    info!(
        "loaded image {} mapped at 0x{base:08X}..0x{:08X}",
        image.display(),
        memory.end()
    );

    let mut out = std::io::stdout().lock();
    for (i, frame) in walk(&memory, CFrame::new(fp, pc), sp).enumerate() {
        writeln!(out, "#{i} pc=0x{:08X} fp=0x{:08X}", frame.pc(), frame.fp())
            .map_err(|e| format!("Unable to write output: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arg_when_hex_long_then_full_bit_pattern() {
        assert_eq!(
            parse_arg("i64:0xFFFFFFFFFFFFFFFF"),
            Ok(ArgValue::Long(-1))
        );
    }

    #[test]
    fn parse_arg_when_negative_int_then_value() {
        assert_eq!(parse_arg("i32:-5"), Ok(ArgValue::Int(-5)));
    }

    #[test]
    fn parse_arg_when_float_keywords_then_special_values() {
        assert_eq!(parse_arg("f64:-inf"), Ok(ArgValue::Double(f64::NEG_INFINITY)));
        assert_eq!(parse_arg("f32:inf"), Ok(ArgValue::Float(f32::INFINITY)));
        assert!(matches!(parse_arg("f64:nan"), Ok(ArgValue::Double(v)) if v.is_nan()));
    }

    #[test]
    fn parse_arg_when_hex_float_then_raw_bits() {
        assert_eq!(
            parse_arg("f32:0x7FC01234"),
            Ok(ArgValue::Float(f32::from_bits(0x7FC0_1234)))
        );
    }

    #[test]
    fn parse_arg_when_no_colon_then_missing_kind() {
        assert_eq!(
            parse_arg("42"),
            Err(ArgParseError::MissingKind("42".to_string()))
        );
    }

    #[test]
    fn parse_arg_when_unknown_kind_then_error() {
        assert_eq!(
            parse_arg("u8:1"),
            Err(ArgParseError::UnknownKind("u8".to_string()))
        );
    }

    #[test]
    fn parse_arg_when_int_too_wide_then_invalid_value() {
        assert_eq!(
            parse_arg("i32:0x100000000"),
            Err(ArgParseError::InvalidValue {
                kind: ArgKind::Int,
                text: "0x100000000".to_string()
            })
        );
    }

    #[test]
    fn parse_address_when_negative_then_error() {
        assert!(parse_address("-4").is_err());
        assert_eq!(parse_address("0x8000"), Ok(0x8000));
    }

    #[test]
    fn pack_values_when_scenario_then_reversed_long_halves() {
        let values = [
            ArgValue::Int(42),
            ArgValue::Long(0x1122_3344_5566_7788),
            ArgValue::Obj(ManagedRef::from_raw(0xABCD)),
        ];
        let (slots, offsets) = pack_values(&values);

        let bits: Vec<u32> = slots.iter().map(|s| s.to_bits()).collect();
        assert_eq!(bits, vec![42, 0x1122_3344, 0x5566_7788, 0xABCD]);
        assert_eq!(offsets, vec![0, 1, 3]);
    }

    #[test]
    fn unpack_values_when_packed_then_same_values() {
        let values = [ArgValue::Double(-0.0), ArgValue::Float(1.5), ArgValue::Long(7)];
        let (slots, offsets) = pack_values(&values);
        let kinds: Vec<ArgKind> = values.iter().map(ArgValue::kind).collect();

        let unpacked = unpack_values(&kinds, &slots).unwrap();

        let expected: Vec<(usize, ArgValue)> = offsets.into_iter().zip(values).collect();
        assert_eq!(unpacked, expected);
    }

    #[test]
    fn unpack_values_when_too_few_slots_then_error() {
        let slots = [Slot::default(); 2];

        assert_eq!(
            unpack_values(&[ArgKind::Int, ArgKind::Double], &slots),
            Err(ArgParseError::NotEnoughSlots {
                needed: 3,
                available: 2
            })
        );
    }
}
