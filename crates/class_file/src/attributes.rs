use std::fmt;

use crate::{constant_pool::CpInfo, ConstantPool};

/// A named, length-prefixed attribute. The payload is never interpreted.
#[derive(PartialEq, Clone)]
pub struct Attribute {
    pub attribute_name_index: u16,
    pub info: Vec<u8>,
}
impl Attribute {
    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}
impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("attribute_name_index", &self.attribute_name_index)
            .field("info", &format!("({} bytes)", self.info.len()))
            .finish()
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn find_by_name(&self, name: &str, constant_pool: &ConstantPool) -> Option<&Attribute> {
        for a in &self.0 {
            let Some(CpInfo::Utf8(s)) = constant_pool.get(a.attribute_name_index) else {
                continue;
            };

            if s.bytes() == name.as_bytes() {
                return Some(a);
            }
        }

        None
    }
}
impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
