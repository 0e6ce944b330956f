//! Argument slot encoding for calls from a managed runtime into native or
//! interpreted code on 32-bit RISC-V.
//!
//! Callers own the slot array and the cursor; this crate only reads and
//! writes cells at the offsets it is given.

pub mod layout;
pub mod rv32;
pub mod value;


pub use layout::SlotLayout;
pub use rv32::Rv32;
pub use value::{ArgKind, ArgValue, ManagedRef, Slot};

/// The slot layout of the target this runtime is built for.
pub type TargetLayout = Rv32;
