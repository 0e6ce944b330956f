//! Slot layout for 32-bit RISC-V.
//!
//! Ints, references and floats are stored in native format in one slot.
//! Longs and doubles take two slots and are written with their 32-bit
//! halves _in reverse_ of their natural address order: the high half is in
//! `to[0]` and the low half in `to[1]`. The call stub walks the argument
//! list in the opposite direction from the one it was built in, so the
//! pre-swapped halves come out in native order on the other side.

use crate::layout::{debug_check_room, SlotLayout};
use crate::value::{ArgKind, ManagedRef, Slot};

/// The RV32 argument slot layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rv32;

/// Splits a 64-bit pattern into its two 32-bit halves in memory order.
/// RV32 is little-endian, so the half at the lower address is the low word.
#[inline(always)]
const fn native_halves(bits: u64) -> [u32; 2] {
    [bits as u32, (bits >> 32) as u32]
}

#[inline(always)]
const fn join_native_halves(halves: [u32; 2]) -> u64 {
    (halves[0] as u64) | ((halves[1] as u64) << 32)
}

impl Rv32 {
    /// Writes the two halves of `bits` reversed: second half first.
    #[inline(always)]
    fn put_int2r(bits: u64, to: &mut [Slot]) {
        debug_check_room(to.len(), 0, ArgKind::Long);
        let halves = native_halves(bits);
        to[0] = Slot::from_bits(halves[1]);
        to[1] = Slot::from_bits(halves[0]);
    }

    /// Exact inverse of `put_int2r`, read from the same base: the high half
    /// is in `from[0]` and the low half in `from[1]`.
    #[inline(always)]
    fn get_int2r(from: &[Slot]) -> u64 {
        debug_check_room(from.len(), 0, ArgKind::Long);
        let high = from[0].to_bits();
        let low = from[1].to_bits();
        join_native_halves([low, high])
    }
}

impl SlotLayout for Rv32 {
    type Slot = Slot;

    #[inline]
    fn put_int(from: i32, to: &mut [Slot]) {
        to[0] = Slot::from_bits(from as u32);
    }

    #[inline]
    fn put_long(from: i64, to: &mut [Slot]) {
        Self::put_int2r(from as u64, to);
    }

    #[inline]
    fn put_obj(from: ManagedRef, to: &mut [Slot]) {
        to[0] = Slot::from_bits(from.to_raw());
    }

    #[inline]
    fn put_float(from: f32, to: &mut [Slot]) {
        to[0] = Slot::from_bits(from.to_bits());
    }

    #[inline]
    fn put_double(from: f64, to: &mut [Slot]) {
        Self::put_int2r(from.to_bits(), to);
    }

    #[inline]
    fn get_int(from: &[Slot]) -> i32 {
        from[0].to_bits() as i32
    }

    #[inline]
    fn get_long(from: &[Slot]) -> i64 {
        Self::get_int2r(from) as i64
    }

    #[inline]
    fn get_obj(from: &[Slot]) -> ManagedRef {
        ManagedRef::from_raw(from[0].to_bits())
    }

    #[inline]
    fn get_float(from: &[Slot]) -> f32 {
        f32::from_bits(from[0].to_bits())
    }

    #[inline]
    fn get_double(from: &[Slot]) -> f64 {
        f64::from_bits(Self::get_int2r(from))
    }
}
