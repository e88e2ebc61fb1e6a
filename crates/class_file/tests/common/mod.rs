//! Reference encoder used to build fixtures for the decoder tests.

#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use cafe_class_file::{
    constant_pool::{
        ClassInfo, CpInfo, DoubleInfo, FloatInfo, IntegerInfo, InvokeDynamicInfo, LongInfo,
        MethodHandleInfo, MethodTypeInfo, NameAndTypeInfo, RefInfo, Utf8Info,
    },
    Attribute, Attributes, ClassAccessFlags, ClassFile, ConstantPool, FieldAccessFlags, FieldInfo,
    Member, MethodAccessFlags, MethodInfo, MAGIC,
};

type Endian = BigEndian;

pub fn encode(class_file: &ClassFile) -> Vec<u8> {
    let mut w = Vec::new();
    w.write_u32::<Endian>(class_file.magic).unwrap();
    w.write_u16::<Endian>(class_file.minor_version).unwrap();
    w.write_u16::<Endian>(class_file.major_version).unwrap();

    w.write_u16::<Endian>(class_file.constant_pool.len() as u16 + 1)
        .unwrap();
    for cp_info in &class_file.constant_pool {
        encode_cp_info(&mut w, cp_info);
    }

    w.write_u16::<Endian>(class_file.access_flags.bits()).unwrap();
    w.write_u16::<Endian>(class_file.this_class).unwrap();
    w.write_u16::<Endian>(class_file.super_class).unwrap();
    w.write_u16::<Endian>(class_file.interfaces.len() as u16)
        .unwrap();
    for interface in &class_file.interfaces {
        w.write_u16::<Endian>(*interface).unwrap();
    }

    w.write_u16::<Endian>(class_file.fields.len() as u16).unwrap();
    for field in &class_file.fields {
        encode_member(&mut w, field.access_flags.bits(), field);
    }
    w.write_u16::<Endian>(class_file.methods.len() as u16).unwrap();
    for method in &class_file.methods {
        encode_member(&mut w, method.access_flags.bits(), method);
    }

    encode_attributes(&mut w, &class_file.attributes);
    w
}

fn encode_cp_info(w: &mut Vec<u8>, cp_info: &CpInfo) {
    let Some(tag) = cp_info.tag() else {
        return;
    };
    w.write_u8(tag as u8).unwrap();

    match cp_info {
        CpInfo::Utf8(utf8) => {
            w.write_u16::<Endian>(utf8.len() as u16).unwrap();
            w.extend_from_slice(utf8.bytes());
        }
        CpInfo::Integer(IntegerInfo { bytes }) => w.write_u32::<Endian>(*bytes).unwrap(),
        CpInfo::Float(float) => w.write_u32::<Endian>(float.bytes).unwrap(),
        CpInfo::Long(LongInfo {
            high_bytes,
            low_bytes,
        })
        | CpInfo::Double(DoubleInfo {
            high_bytes,
            low_bytes,
        }) => {
            w.write_u32::<Endian>(*high_bytes).unwrap();
            w.write_u32::<Endian>(*low_bytes).unwrap();
        }
        CpInfo::Class(ClassInfo { name_index }) => w.write_u16::<Endian>(*name_index).unwrap(),
        CpInfo::String { string_index } => w.write_u16::<Endian>(*string_index).unwrap(),
        CpInfo::FieldRef(r) | CpInfo::MethodRef(r) | CpInfo::InterfaceMethodRef(r) => {
            w.write_u16::<Endian>(r.class_index).unwrap();
            w.write_u16::<Endian>(r.name_and_type_index).unwrap();
        }
        CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }) => {
            w.write_u16::<Endian>(*name_index).unwrap();
            w.write_u16::<Endian>(*descriptor_index).unwrap();
        }
        CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }) => {
            w.write_u8(*reference_kind).unwrap();
            w.write_u16::<Endian>(*reference_index).unwrap();
        }
        CpInfo::MethodType(method_type) => {
            w.write_u16::<Endian>(method_type.descriptor_index).unwrap()
        }
        CpInfo::InvokeDynamic(indy) => {
            w.write_u16::<Endian>(indy.bootstrap_method_attr_index)
                .unwrap();
            w.write_u16::<Endian>(indy.name_and_type_index).unwrap();
        }
        CpInfo::Unusable => unreachable!(),
    }
}

fn encode_member<F>(w: &mut Vec<u8>, access_flags: u16, member: &Member<F>) {
    w.write_u16::<Endian>(access_flags).unwrap();
    w.write_u16::<Endian>(member.name_index).unwrap();
    w.write_u16::<Endian>(member.descriptor_index).unwrap();
    encode_attributes(w, &member.attributes);
}

fn encode_attributes(w: &mut Vec<u8>, attributes: &Attributes) {
    w.write_u16::<Endian>(attributes.len() as u16).unwrap();
    for attribute in attributes {
        w.write_u16::<Endian>(attribute.attribute_name_index)
            .unwrap();
        w.write_u32::<Endian>(attribute.len() as u32).unwrap();
        w.extend_from_slice(&attribute.info);
    }
}

pub fn utf8(s: &str) -> CpInfo {
    CpInfo::Utf8(Utf8Info {
        bytes: s.as_bytes().to_vec(),
    })
}

pub fn attribute(attribute_name_index: u16, info: &[u8]) -> Attribute {
    Attribute {
        attribute_name_index,
        info: info.to_vec(),
    }
}

pub fn empty_class_file() -> ClassFile {
    ClassFile {
        magic: MAGIC,
        minor_version: 0,
        major_version: 52,
        constant_pool: ConstantPool::default(),
        access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        this_class: 0,
        super_class: 0,
        interfaces: vec![],
        fields: vec![],
        methods: vec![],
        attributes: Attributes::default(),
    }
}

/// Roughly what javac emits for
///
/// ```java
/// public class my.MyClass implements java.io.Serializable {
///     private final int myField = 42;
///     private static final long BIG = -2L;
///     public float add(int) { ... }
/// }
/// ```
pub fn my_class() -> ClassFile {
    ClassFile {
        magic: MAGIC,
        minor_version: 0,
        major_version: 61,
        constant_pool: ConstantPool::new(vec![
            /* 1 */
            CpInfo::MethodRef(RefInfo {
                class_index: 2,
                name_and_type_index: 3,
            }),
            /* 2 */ CpInfo::Class(ClassInfo { name_index: 4 }),
            /* 3 */
            CpInfo::NameAndType(NameAndTypeInfo {
                name_index: 5,
                descriptor_index: 6,
            }),
            /* 4 */ utf8("java/lang/Object"),
            /* 5 */ utf8("<init>"),
            /* 6 */ utf8("()V"),
            /* 7 */ CpInfo::Class(ClassInfo { name_index: 8 }),
            /* 8 */ utf8("my/MyClass"),
            /* 9 */ utf8("myField"),
            /* 10 */ utf8("I"),
            /* 11 */
            CpInfo::Long(LongInfo {
                high_bytes: 0xffff_ffff,
                low_bytes: 0xffff_fffe,
            }),
            /* 12 */ CpInfo::Unusable,
            /* 13 */ utf8("BIG"),
            /* 14 */ utf8("J"),
            /* 15 */ utf8("ConstantValue"),
            /* 16 */ utf8("add"),
            /* 17 */ utf8("(I)F"),
            /* 18 */ utf8("Code"),
            /* 19 */ CpInfo::Class(ClassInfo { name_index: 20 }),
            /* 20 */ utf8("java/io/Serializable"),
            /* 21 */ utf8("SourceFile"),
            /* 22 */ utf8("MyClass.java"),
            /* 23 */ CpInfo::Integer(IntegerInfo { bytes: 42 }),
            /* 24 */
            CpInfo::Double(DoubleInfo {
                high_bytes: 0x4009_21fb,
                low_bytes: 0x5444_2d18,
            }),
            /* 25 */ CpInfo::Unusable,
            /* 26 */
            CpInfo::MethodHandle(MethodHandleInfo {
                reference_kind: 6,
                reference_index: 1,
            }),
            /* 27 */ CpInfo::String { string_index: 22 },
            /* 28 */
            CpInfo::FieldRef(RefInfo {
                class_index: 7,
                name_and_type_index: 29,
            }),
            /* 29 */
            CpInfo::NameAndType(NameAndTypeInfo {
                name_index: 9,
                descriptor_index: 10,
            }),
            /* 30 */
            CpInfo::InterfaceMethodRef(RefInfo {
                class_index: 19,
                name_and_type_index: 3,
            }),
            /* 31 */
            CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: 17,
            }),
            /* 32 */
            CpInfo::InvokeDynamic(InvokeDynamicInfo {
                bootstrap_method_attr_index: 0,
                name_and_type_index: 29,
            }),
            /* 33 */ CpInfo::Float(FloatInfo { bytes: 0x3fc0_0000 }),
        ]),
        access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        this_class: 7,
        super_class: 2,
        interfaces: vec![19],
        fields: vec![
            FieldInfo {
                access_flags: FieldAccessFlags::PRIVATE | FieldAccessFlags::FINAL,
                name_index: 9,
                descriptor_index: 10,
                attributes: Attributes(vec![attribute(15, &[0x00, 0x17])]),
            },
            FieldInfo {
                access_flags: FieldAccessFlags::PRIVATE
                    | FieldAccessFlags::STATIC
                    | FieldAccessFlags::FINAL,
                name_index: 13,
                descriptor_index: 14,
                attributes: Attributes(vec![attribute(15, &[0x00, 0x0b])]),
            },
        ],
        methods: vec![
            MethodInfo {
                access_flags: MethodAccessFlags::PUBLIC,
                name_index: 5,
                descriptor_index: 6,
                attributes: Attributes(vec![attribute(
                    18,
                    &[
                        0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x2a, 0xb7, 0x00, 0x01,
                        0xb1, 0x00, 0x00, 0x00, 0x00,
                    ],
                )]),
            },
            MethodInfo {
                access_flags: MethodAccessFlags::PUBLIC,
                name_index: 16,
                descriptor_index: 17,
                attributes: Attributes(vec![attribute(
                    18,
                    &[
                        0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x1b, 0x86, 0xae, 0x00,
                        0x00, 0x00, 0x00,
                    ],
                )]),
            },
        ],
        attributes: Attributes(vec![attribute(21, &[0x00, 0x16])]),
    }
}
