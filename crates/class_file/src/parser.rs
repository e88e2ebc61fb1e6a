use bitflags::Flags;

use crate::{
    access_flags::ClassAccessFlags,
    attributes::{Attribute, Attributes},
    class_file::{Member, MAGIC},
    constant_pool::{
        ClassInfo, ConstantTag, CpInfo, DoubleInfo, FloatInfo, IntegerInfo, InvokeDynamicInfo,
        LongInfo, MethodHandleInfo, MethodTypeInfo, NameAndTypeInfo, RefInfo, Utf8Info,
    },
    cursor::ByteCursor,
    ClassFile, ClassFileError, ConstantPool, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reject input whose first four bytes are not `0xCAFEBABE`.
    pub verify_magic: bool,
}
impl Default for ParserOptions {
    fn default() -> Self {
        Self { verify_magic: true }
    }
}

pub struct Parser<'a> {
    r: ByteCursor<'a>,
    options: ParserOptions,
}
impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, ParserOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: ParserOptions) -> Self {
        Self {
            r: ByteCursor::new(buf),
            options,
        }
    }

    pub fn position(&self) -> usize {
        self.r.position()
    }

    pub fn parse(mut self) -> Result<ClassFile> {
        let magic = self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = ClassAccessFlags::from_bits_retain(self.r.read_u16_be()?);
        let this_class = self.r.read_u16_be()?;
        let super_class = self.r.read_u16_be()?;
        let interfaces_count = self.r.read_u16_be()?;
        let interfaces = self.r.read_u16_vec(interfaces_count as usize)?;

        let fields = self.parse_members()?;
        let methods = self.parse_members()?;
        let attributes = self.parse_attributes()?;

        Ok(ClassFile {
            magic,
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<u32> {
        match self.r.read_u32_be()? {
            MAGIC => Ok(MAGIC),
            magic_identifier if self.options.verify_magic => {
                Err(ClassFileError::BadMagic(magic_identifier))
            }
            magic_identifier => Ok(magic_identifier),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.r.read_u16_be()?;
        let major = self.r.read_u16_be()?;
        Ok((major, minor))
    }

    pub fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.r.read_u16_be()? as usize;

        // A count of 0 is treated like 1: no entries.
        let mut res = Vec::with_capacity(constant_pool_count.saturating_sub(1));
        let mut index = 1;
        while index < constant_pool_count {
            let (cp_info, slot_size) = self.parse_cp_info(index as u16)?;
            res.push(cp_info);
            if slot_size == 2 && index + 1 < constant_pool_count {
                res.push(CpInfo::Unusable);
            }

            index += slot_size;
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self, index: u16) -> Result<(CpInfo, usize)> {
        let tag = self.r.read_u8()?;
        let tag =
            ConstantTag::try_from(tag).map_err(|tag| ClassFileError::UnknownTag { tag, index })?;

        let cp_info = match tag {
            ConstantTag::Utf8 => self.parse_utf8()?,
            ConstantTag::Integer => CpInfo::Integer(IntegerInfo {
                bytes: self.r.read_u32_be()?,
            }),
            ConstantTag::Float => CpInfo::Float(FloatInfo {
                bytes: self.r.read_u32_be()?,
            }),
            ConstantTag::Long => {
                let (high_bytes, low_bytes) = self.parse_wide_bytes()?;
                CpInfo::Long(LongInfo {
                    high_bytes,
                    low_bytes,
                })
            }
            ConstantTag::Double => {
                let (high_bytes, low_bytes) = self.parse_wide_bytes()?;
                CpInfo::Double(DoubleInfo {
                    high_bytes,
                    low_bytes,
                })
            }
            ConstantTag::Class => CpInfo::Class(ClassInfo {
                name_index: self.r.read_u16_be()?,
            }),
            ConstantTag::String => CpInfo::String {
                string_index: self.r.read_u16_be()?,
            },
            ConstantTag::FieldRef => CpInfo::FieldRef(self.parse_ref_info()?),
            ConstantTag::MethodRef => CpInfo::MethodRef(self.parse_ref_info()?),
            ConstantTag::InterfaceMethodRef => CpInfo::InterfaceMethodRef(self.parse_ref_info()?),
            ConstantTag::NameAndType => self.parse_name_and_type_info()?,
            ConstantTag::MethodHandle => self.parse_method_handle()?,
            ConstantTag::MethodType => CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: self.r.read_u16_be()?,
            }),
            ConstantTag::InvokeDynamic => self.parse_invoke_dynamic_info()?,
        };

        let slot_size = if tag.is_wide() { 2 } else { 1 };
        Ok((cp_info, slot_size))
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.r.read_u16_be()?;
        let bytes = self.r.read_bytes(length as usize)?;

        Ok(CpInfo::Utf8(Utf8Info { bytes }))
    }

    fn parse_wide_bytes(&mut self) -> Result<(u32, u32)> {
        let high_bytes = self.r.read_u32_be()?;
        let low_bytes = self.r.read_u32_be()?;
        Ok((high_bytes, low_bytes))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.r.read_u16_be()?;
        let descriptor_index = self.r.read_u16_be()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.r.read_u8()?;
        let reference_index = self.r.read_u16_be()?;

        Ok(CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_invoke_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index = self.r.read_u16_be()?;
        let name_and_type_index = self.r.read_u16_be()?;

        Ok(CpInfo::InvokeDynamic(InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.r.read_u16_be()?;
        let name_and_type_index = self.r.read_u16_be()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    pub fn parse_members<F: Flags<Bits = u16>>(&mut self) -> Result<Vec<Member<F>>> {
        let members_count = self.r.read_u16_be()?;
        (0..members_count)
            .map(|_| self.parse_member_info())
            .collect::<Result<Vec<_>>>()
    }

    fn parse_member_info<F: Flags<Bits = u16>>(&mut self) -> Result<Member<F>> {
        let access_flags = F::from_bits_retain(self.r.read_u16_be()?);
        let name_index = self.r.read_u16_be()?;
        let descriptor_index = self.r.read_u16_be()?;
        let attributes = self.parse_attributes()?;

        Ok(Member {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    pub fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.r.read_u16_be()?;
        let attribute_length = self.r.read_u32_be()?;
        let info = self.r.read_bytes(attribute_length as usize)?;

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    pub fn parse_attributes(&mut self) -> Result<Attributes> {
        let attributes_count = self.r.read_u16_be()?;
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }
}
