//! Native C frame walking for stopped RV32 threads.
//!
//! A frame is identified by its frame pointer and program counter. The
//! caller's frame pointer and the return address are saved just below the
//! frame pointer:
//!
//! ```text
//!   fp - 4  return address   (RETURN_ADDR_OFFSET)
//!   fp - 8  caller fp        (LINK_OFFSET)
//! ```

use log::debug;

mod memory;

pub use memory::{MemoryImage, TargetMemory};

/// A target address.
pub type Address = u32;

/// Size in bytes of a target pointer.
pub const ADDRESS_SIZE: u32 = 4;

/// Word offset from fp of the saved caller frame pointer.
pub const LINK_OFFSET: i32 = -2;

/// Word offset from fp of the saved return address.
pub const RETURN_ADDR_OFFSET: i32 = -1;

/// One native frame on a thread's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CFrame {
    fp: Address,
    pc: Address,
}

impl CFrame {
    pub fn new(fp: Address, pc: Address) -> Self {
        CFrame { fp, pc }
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn fp(&self) -> Address {
        self.fp
    }

    /// Locals are addressed relative to the frame pointer.
    pub fn local_variable_base(&self) -> Address {
        self.fp
    }

    /// Returns the caller's frame, or `None` when the chain ends here.
    ///
    /// `sp` is the thread's current stack pointer; a frame pointer below it
    /// cannot belong to a live frame.
    pub fn sender(&self, mem: &impl TargetMemory, sp: Address) -> Option<CFrame> {
        let fp = self.fp;
        if fp == 0 || fp < sp {
            debug!("frame chain ends: fp 0x{fp:08X} is null or below sp 0x{sp:08X}");
            return None;
        }

        if fp % (2 * ADDRESS_SIZE) != 0 {
            debug!("frame chain ends: fp 0x{fp:08X} is misaligned");
            return None;
        }

        let next_fp = read_saved(mem, fp, LINK_OFFSET)?;
        if next_fp == 0 || next_fp <= fp {
            debug!("frame chain ends: saved fp 0x{next_fp:08X} does not move up from 0x{fp:08X}");
            return None;
        }

        let next_pc = read_saved(mem, fp, RETURN_ADDR_OFFSET)?;
        if next_pc == 0 {
            debug!("frame chain ends: null return address above fp 0x{fp:08X}");
            return None;
        }

        Some(CFrame::new(next_fp, next_pc))
    }
}

/// Reads the word `offset` words away from `fp`.
fn read_saved(mem: &impl TargetMemory, fp: Address, offset: i32) -> Option<Address> {
    let addr = fp.checked_add_signed(offset * ADDRESS_SIZE as i32)?;
    let value = mem.read_address(addr);
    if value.is_none() {
        debug!("frame chain ends: 0x{addr:08X} is not readable");
    }
    value
}

/// Iterates from `start` through each sender until the chain ends.
///
/// The walk always terminates: every step moves `fp` strictly upward.
pub fn walk<M: TargetMemory>(mem: &M, start: CFrame, sp: Address) -> Frames<'_, M> {
    Frames {
        mem,
        sp,
        next: Some(start),
    }
}

/// Iterator returned by [`walk`].
pub struct Frames<'a, M> {
    mem: &'a M,
    sp: Address,
    next: Option<CFrame>,
}

impl<M: TargetMemory> Iterator for Frames<'_, M> {
    type Item = CFrame;

    fn next(&mut self) -> Option<CFrame> {
        let current = self.next.take()?;
        self.next = current.sender(self.mem, self.sp);
        Some(current)
    }
}
