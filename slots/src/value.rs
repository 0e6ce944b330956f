use std::fmt;

/// A 32-bit argument slot, the native pointer width of an RV32 target.
///
/// A slot is an uninterpreted cell; the layout decides how a primitive
/// value is spread over one or two slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Slot(u32);

impl Slot {
    /// Creates a slot holding exactly the given bits.
    pub const fn from_bits(bits: u32) -> Self {
        Slot(bits)
    }

    /// Returns the raw bits of this slot.
    pub const fn to_bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// An opaque handle into the managed heap.
///
/// The handle is carried as a pointer-sized bit pattern. Holding one does
/// not keep the object alive and nothing here dereferences it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ManagedRef(u32);

impl ManagedRef {
    /// The null reference.
    pub const NULL: ManagedRef = ManagedRef(0);

    pub const fn from_raw(raw: u32) -> Self {
        ManagedRef(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ManagedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref@0x{:08X}", self.0)
    }
}

/// The primitive kinds that can be passed through argument slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Int,
    Long,
    Obj,
    Float,
    Double,
}

impl ArgKind {
    /// Number of slots a value of this kind occupies.
    pub const fn slot_width(self) -> usize {
        match self {
            ArgKind::Int | ArgKind::Obj | ArgKind::Float => 1,
            ArgKind::Long | ArgKind::Double => 2,
        }
    }

    /// Short name used in argument descriptors (`i32`, `i64`, `ref`, `f32`, `f64`).
    pub const fn name(self) -> &'static str {
        match self {
            ArgKind::Int => "i32",
            ArgKind::Long => "i64",
            ArgKind::Obj => "ref",
            ArgKind::Float => "f32",
            ArgKind::Double => "f64",
        }
    }

    /// Looks up a kind by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i32" => Some(ArgKind::Int),
            "i64" => Some(ArgKind::Long),
            "ref" => Some(ArgKind::Obj),
            "f32" => Some(ArgKind::Float),
            "f64" => Some(ArgKind::Double),
            _ => None,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive argument value tagged with its kind.
#[derive(Clone, Copy, Debug)]
pub enum ArgValue {
    Int(i32),
    Long(i64),
    Obj(ManagedRef),
    Float(f32),
    Double(f64),
}

impl ArgValue {
    pub const fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Long(_) => ArgKind::Long,
            ArgValue::Obj(_) => ArgKind::Obj,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Double(_) => ArgKind::Double,
        }
    }

    pub const fn slot_width(&self) -> usize {
        self.kind().slot_width()
    }
}

/// Values compare by bit pattern so that NaN payloads and signed zeros
/// are distinguished, matching what lands in the slots.
impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArgValue::Int(a), ArgValue::Int(b)) => a == b,
            (ArgValue::Long(a), ArgValue::Long(b)) => a == b,
            (ArgValue::Obj(a), ArgValue::Obj(b)) => a == b,
            (ArgValue::Float(a), ArgValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ArgValue::Double(a), ArgValue::Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for ArgValue {}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "i32 {v}"),
            ArgValue::Long(v) => write!(f, "i64 {v} (0x{:016X})", *v as u64),
            ArgValue::Obj(r) => write!(f, "ref {r}"),
            ArgValue::Float(v) => write!(f, "f32 {v} (0x{:08X})", v.to_bits()),
            ArgValue::Double(v) => write!(f, "f64 {v} (0x{:016X})", v.to_bits()),
        }
    }
}
