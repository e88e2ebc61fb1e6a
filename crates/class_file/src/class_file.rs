use std::io::Read;

use crate::{
    access_flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags},
    attributes::Attributes,
    parser::Parser,
    ConstantPool, Result,
};

pub const MAGIC: u32 = 0xCAFE_BABE;

#[derive(Debug, PartialEq, Clone)]
pub struct ClassFile {
    pub magic: u32,
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: ClassAccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn from_reader(mut r: impl Read) -> Result<ClassFile> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    pub fn version(&self) -> (u16, u16) {
        (self.major_version, self.minor_version)
    }
}

/// A field or method. Both share one layout; `F` selects how the access
/// flag bits are read.
#[derive(Debug, PartialEq, Clone)]
pub struct Member<F> {
    pub access_flags: F,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

pub type FieldInfo = Member<FieldAccessFlags>;
pub type MethodInfo = Member<MethodAccessFlags>;
