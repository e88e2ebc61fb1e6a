use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{ClassFileError, Result};

type Endian = BigEndian;

/// Sequential big-endian reader over an in-memory class file.
///
/// Every read checks the remaining length first, so a read that fails with
/// [`ClassFileError::TruncatedInput`] leaves the position untouched.
pub struct ByteCursor<'a> {
    r: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            r: Cursor::new(buf),
        }
    }

    pub fn position(&self) -> usize {
        self.r.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.r.get_ref().len().saturating_sub(self.position())
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.r.read_u8()?)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.r.read_u16::<Endian>()?)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.r.read_u32::<Endian>()?)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.ensure(n)?;
        let mut bytes = vec![0u8; n];
        self.r.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    pub fn read_u16_vec(&mut self, count: usize) -> Result<Vec<u16>> {
        self.ensure(count * 2)?;
        let mut values = vec![0u16; count];
        self.r.read_u16_into::<Endian>(&mut values)?;
        Ok(values)
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(ClassFileError::TruncatedInput {
                offset: self.position(),
                needed,
                remaining,
            });
        }
        Ok(())
    }
}
