use std::{borrow::Cow, fmt, ops::Index};

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {
        match $cp.get($index) {
            Some($crate::constant_pool::CpInfo::$i(n)) => Ok(n),
            c => Err($crate::ClassFileError::UnexpectedConstantPoolEntry {
                index: $index,
                expected: stringify!($i),
                found: c.cloned(),
            }),
        }
    };
}

/// Indexed from 1. Holds `constant_pool_count - 1` slots; the slot after a
/// `Long` or `Double` entry holds [`CpInfo::Unusable`].
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    /// Returns the entry at `index`, or `None` for index 0, an index past the
    /// end, or the reserved slot after a wide entry.
    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        let slot = (index as usize).checked_sub(1)?;
        match self.cp_infos.get(slot)? {
            CpInfo::Unusable => None,
            cp_info => Some(cp_info),
        }
    }

    pub fn utf8(&self, index: u16) -> crate::Result<&Utf8Info> {
        matches_cp_info!(self, index, Utf8)
    }

    pub fn class(&self, index: u16) -> crate::Result<&ClassInfo> {
        matches_cp_info!(self, index, Class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &CpInfo)> {
        self.cp_infos
            .iter()
            .enumerate()
            .filter(|(_, cp_info)| **cp_info != CpInfo::Unusable)
            .map(|(slot, cp_info)| (slot as u16 + 1, cp_info))
    }
}
impl Index<u16> for ConstantPool {
    type Output = CpInfo;

    /// Panics on index 0 or past the end, like slice indexing.
    fn index(&self, index: u16) -> &Self::Output {
        &self.cp_infos[index as usize - 1]
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConstantTag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
    MethodHandle = 15,
    MethodType = 16,
    InvokeDynamic = 18,
}
impl ConstantTag {
    pub fn is_wide(self) -> bool {
        matches!(self, ConstantTag::Long | ConstantTag::Double)
    }

    pub fn name(self) -> &'static str {
        match self {
            ConstantTag::Utf8 => "CONSTANT_Utf8",
            ConstantTag::Integer => "CONSTANT_Integer",
            ConstantTag::Float => "CONSTANT_Float",
            ConstantTag::Long => "CONSTANT_Long",
            ConstantTag::Double => "CONSTANT_Double",
            ConstantTag::Class => "CONSTANT_Class",
            ConstantTag::String => "CONSTANT_String",
            ConstantTag::FieldRef => "CONSTANT_Fieldref",
            ConstantTag::MethodRef => "CONSTANT_Methodref",
            ConstantTag::InterfaceMethodRef => "CONSTANT_InterfaceMethodref",
            ConstantTag::NameAndType => "CONSTANT_NameAndType",
            ConstantTag::MethodHandle => "CONSTANT_MethodHandle",
            ConstantTag::MethodType => "CONSTANT_MethodType",
            ConstantTag::InvokeDynamic => "CONSTANT_InvokeDynamic",
        }
    }
}
impl TryFrom<u8> for ConstantTag {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(ConstantTag::Utf8),
            3 => Ok(ConstantTag::Integer),
            4 => Ok(ConstantTag::Float),
            5 => Ok(ConstantTag::Long),
            6 => Ok(ConstantTag::Double),
            7 => Ok(ConstantTag::Class),
            8 => Ok(ConstantTag::String),
            9 => Ok(ConstantTag::FieldRef),
            10 => Ok(ConstantTag::MethodRef),
            11 => Ok(ConstantTag::InterfaceMethodRef),
            12 => Ok(ConstantTag::NameAndType),
            15 => Ok(ConstantTag::MethodHandle),
            16 => Ok(ConstantTag::MethodType),
            18 => Ok(ConstantTag::InvokeDynamic),
            _ => Err(value),
        }
    }
}
impl fmt::Display for ConstantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    Utf8(Utf8Info),
    Integer(IntegerInfo),
    Float(FloatInfo),
    Long(LongInfo),
    Double(DoubleInfo),
    Class(ClassInfo),
    String { string_index: u16 },
    FieldRef(RefInfo),
    MethodRef(RefInfo),
    InterfaceMethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    InvokeDynamic(InvokeDynamicInfo),
    /// Second slot of a `Long` or `Double` entry.
    Unusable,
}
impl CpInfo {
    pub fn tag(&self) -> Option<ConstantTag> {
        let tag = match self {
            CpInfo::Utf8(_) => ConstantTag::Utf8,
            CpInfo::Integer(_) => ConstantTag::Integer,
            CpInfo::Float(_) => ConstantTag::Float,
            CpInfo::Long(_) => ConstantTag::Long,
            CpInfo::Double(_) => ConstantTag::Double,
            CpInfo::Class(_) => ConstantTag::Class,
            CpInfo::String { .. } => ConstantTag::String,
            CpInfo::FieldRef(_) => ConstantTag::FieldRef,
            CpInfo::MethodRef(_) => ConstantTag::MethodRef,
            CpInfo::InterfaceMethodRef(_) => ConstantTag::InterfaceMethodRef,
            CpInfo::NameAndType(_) => ConstantTag::NameAndType,
            CpInfo::MethodHandle(_) => ConstantTag::MethodHandle,
            CpInfo::MethodType(_) => ConstantTag::MethodType,
            CpInfo::InvokeDynamic(_) => ConstantTag::InvokeDynamic,
            CpInfo::Unusable => return None,
        };
        Some(tag)
    }
}

/// Raw `CONSTANT_Utf8` bytes. The content is modified UTF-8 and is kept
/// exactly as read.
#[derive(PartialEq, Clone)]
pub struct Utf8Info {
    pub bytes: Vec<u8>,
}
impl Utf8Info {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}
impl fmt::Debug for Utf8Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8Info")
            .field("length", &self.len())
            .field("bytes", &self.to_string_lossy())
            .finish()
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct IntegerInfo {
    pub bytes: u32,
}
impl IntegerInfo {
    pub fn value(&self) -> i32 {
        self.bytes as i32
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FloatInfo {
    pub bytes: u32,
}
impl FloatInfo {
    pub fn value(&self) -> f32 {
        f32::from_bits(self.bytes)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct LongInfo {
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl LongInfo {
    pub fn value(&self) -> i64 {
        ((self.high_bytes as u64) << 32 | self.low_bytes as u64) as i64
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DoubleInfo {
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl DoubleInfo {
    pub fn value(&self) -> f64 {
        f64::from_bits((self.high_bytes as u64) << 32 | self.low_bytes as u64)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvokeDynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}
