//! The encode/decode contract between the call-argument builder and the
//! native call stub.
//!
//! Every put writes a primitive value (in native format) into a slot array
//! that will be handed to a call stub. The forms taking a `pos` cursor are
//! `push` operations: they write at `to[*pos..]` and advance the cursor by
//! the number of slots the value consumed.
//!
//! Nothing here checks capacity. The caller reserves enough slots before it
//! writes; indexing past the end of the array panics.

use crate::value::{ArgKind, ArgValue, ManagedRef};

/// Per-architecture slot encoding.
///
/// Implementations are zero-sized policies; all operations are associated
/// functions. The layout for the current target is picked at build time
/// through [`crate::TargetLayout`].
pub trait SlotLayout {
    /// One native-pointer-sized cell of the argument array.
    type Slot: Copy + Default;

    fn put_int(from: i32, to: &mut [Self::Slot]);
    fn put_long(from: i64, to: &mut [Self::Slot]);
    fn put_obj(from: ManagedRef, to: &mut [Self::Slot]);
    fn put_float(from: f32, to: &mut [Self::Slot]);
    fn put_double(from: f64, to: &mut [Self::Slot]);

    fn get_int(from: &[Self::Slot]) -> i32;
    fn get_long(from: &[Self::Slot]) -> i64;
    fn get_obj(from: &[Self::Slot]) -> ManagedRef;
    fn get_float(from: &[Self::Slot]) -> f32;
    fn get_double(from: &[Self::Slot]) -> f64;

    #[inline]
    fn push_int(from: i32, to: &mut [Self::Slot], pos: &mut usize) {
        debug_check_room(to.len(), *pos, ArgKind::Int);
        Self::put_int(from, &mut to[*pos..]);
        *pos += ArgKind::Int.slot_width();
    }

    #[inline]
    fn push_int_from(from: &i32, to: &mut [Self::Slot], pos: &mut usize) {
        Self::push_int(*from, to, pos);
    }

    #[inline]
    fn push_long(from: i64, to: &mut [Self::Slot], pos: &mut usize) {
        debug_check_room(to.len(), *pos, ArgKind::Long);
        Self::put_long(from, &mut to[*pos..]);
        *pos += ArgKind::Long.slot_width();
    }

    #[inline]
    fn push_long_from(from: &i64, to: &mut [Self::Slot], pos: &mut usize) {
        Self::push_long(*from, to, pos);
    }

    #[inline]
    fn push_obj(from: ManagedRef, to: &mut [Self::Slot], pos: &mut usize) {
        debug_check_room(to.len(), *pos, ArgKind::Obj);
        Self::put_obj(from, &mut to[*pos..]);
        *pos += ArgKind::Obj.slot_width();
    }

    #[inline]
    fn push_obj_from(from: &ManagedRef, to: &mut [Self::Slot], pos: &mut usize) {
        Self::push_obj(*from, to, pos);
    }

    #[inline]
    fn push_float(from: f32, to: &mut [Self::Slot], pos: &mut usize) {
        debug_check_room(to.len(), *pos, ArgKind::Float);
        Self::put_float(from, &mut to[*pos..]);
        *pos += ArgKind::Float.slot_width();
    }

    #[inline]
    fn push_float_from(from: &f32, to: &mut [Self::Slot], pos: &mut usize) {
        Self::push_float(*from, to, pos);
    }

    #[inline]
    fn push_double(from: f64, to: &mut [Self::Slot], pos: &mut usize) {
        debug_check_room(to.len(), *pos, ArgKind::Double);
        Self::put_double(from, &mut to[*pos..]);
        *pos += ArgKind::Double.slot_width();
    }

    #[inline]
    fn push_double_from(from: &f64, to: &mut [Self::Slot], pos: &mut usize) {
        Self::push_double(*from, to, pos);
    }

    /// Reads an int at `from[*pos..]` and advances the cursor.
    #[inline]
    fn next_int(from: &[Self::Slot], pos: &mut usize) -> i32 {
        debug_check_room(from.len(), *pos, ArgKind::Int);
        let v = Self::get_int(&from[*pos..]);
        *pos += ArgKind::Int.slot_width();
        v
    }

    #[inline]
    fn next_long(from: &[Self::Slot], pos: &mut usize) -> i64 {
        debug_check_room(from.len(), *pos, ArgKind::Long);
        let v = Self::get_long(&from[*pos..]);
        *pos += ArgKind::Long.slot_width();
        v
    }

    #[inline]
    fn next_obj(from: &[Self::Slot], pos: &mut usize) -> ManagedRef {
        debug_check_room(from.len(), *pos, ArgKind::Obj);
        let v = Self::get_obj(&from[*pos..]);
        *pos += ArgKind::Obj.slot_width();
        v
    }

    #[inline]
    fn next_float(from: &[Self::Slot], pos: &mut usize) -> f32 {
        debug_check_room(from.len(), *pos, ArgKind::Float);
        let v = Self::get_float(&from[*pos..]);
        *pos += ArgKind::Float.slot_width();
        v
    }

    #[inline]
    fn next_double(from: &[Self::Slot], pos: &mut usize) -> f64 {
        debug_check_room(from.len(), *pos, ArgKind::Double);
        let v = Self::get_double(&from[*pos..]);
        *pos += ArgKind::Double.slot_width();
        v
    }

    /// Pushes a tagged value, dispatching on its kind.
    fn push_value(from: &ArgValue, to: &mut [Self::Slot], pos: &mut usize) {
        match from {
            ArgValue::Int(v) => Self::push_int_from(v, to, pos),
            ArgValue::Long(v) => Self::push_long_from(v, to, pos),
            ArgValue::Obj(v) => Self::push_obj_from(v, to, pos),
            ArgValue::Float(v) => Self::push_float_from(v, to, pos),
            ArgValue::Double(v) => Self::push_double_from(v, to, pos),
        }
    }

    /// Reads a value of the given kind at `from[*pos..]` and advances the cursor.
    fn next_value(kind: ArgKind, from: &[Self::Slot], pos: &mut usize) -> ArgValue {
        match kind {
            ArgKind::Int => ArgValue::Int(Self::next_int(from, pos)),
            ArgKind::Long => ArgValue::Long(Self::next_long(from, pos)),
            ArgKind::Obj => ArgValue::Obj(Self::next_obj(from, pos)),
            ArgKind::Float => ArgValue::Float(Self::next_float(from, pos)),
            ArgKind::Double => ArgValue::Double(Self::next_double(from, pos)),
        }
    }
}

/// Reports a capacity violation with the offending offset before the slice
/// index panics. Compiled out of release builds.
#[inline(always)]
pub(crate) fn debug_check_room(len: usize, at: usize, kind: ArgKind) {
    debug_assert!(
        at + kind.slot_width() <= len,
        "{kind} at slot {at} needs {} slot(s) but the array holds {len}",
        kind.slot_width()
    );
}
