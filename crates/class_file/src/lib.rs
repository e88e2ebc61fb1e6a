// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
pub mod attributes;
mod class_file;
#[macro_use]
pub mod constant_pool;
mod cursor;
mod error;
mod parser;

pub use self::class_file::{ClassFile, FieldInfo, Member, MethodInfo, MAGIC};
pub use access_flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
pub use attributes::{Attribute, Attributes};
pub use constant_pool::{ConstantPool, ConstantTag, CpInfo};
pub use cursor::ByteCursor;
pub use error::ClassFileError;
pub use parser::{Parser, ParserOptions};

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;
