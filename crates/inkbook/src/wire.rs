//! Big-endian primitives shared by the index, page and tag-set records.
//!
//! Integers are fixed-width big-endian. Strings are a `u16` byte length
//! followed by that many bytes of UTF-8. Counts are written as `i32` and a
//! negative count on read is treated as corrupt data.

use crate::error::{BookError, Result};
use std::io::{Read, Write};
use uuid::Uuid;

pub trait ReadExt: Read {
    fn read_i32_be(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    fn read_i64_be(&mut self) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    fn read_string(&mut self) -> Result<String> {
        let mut len = [0u8; 2];
        self.read_exact(&mut len)?;
        let mut bytes = vec![0u8; u16::from_be_bytes(len) as usize];
        self.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| BookError::Malformed(format!("invalid UTF-8: {e}")))
    }

    fn read_uuid(&mut self) -> Result<Uuid> {
        let raw = self.read_string()?;
        Uuid::parse_str(&raw).map_err(|e| BookError::Malformed(format!("bad id '{raw}': {e}")))
    }

    /// Reads an `i32` element count, rejecting negative values.
    fn read_count(&mut self, what: &str) -> Result<usize> {
        let n = self.read_i32_be()?;
        usize::try_from(n).map_err(|_| BookError::Malformed(format!("negative {what} count {n}")))
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

pub trait WriteExt: Write {
    fn write_i32_be(&mut self, value: i32) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn write_i64_be(&mut self, value: i64) -> Result<()> {
        self.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            BookError::Malformed(format!("string of {} bytes is too long", value.len()))
        })?;
        self.write_all(&len.to_be_bytes())?;
        self.write_all(value.as_bytes())?;
        Ok(())
    }

    fn write_uuid(&mut self, id: &Uuid) -> Result<()> {
        self.write_string(&id.to_string())
    }

    fn write_count(&mut self, n: usize) -> Result<()> {
        let n = i32::try_from(n).map_err(|_| BookError::Malformed(format!("count {n} overflows")))?;
        self.write_i32_be(n)
    }
}

impl<W: Write + ?Sized> WriteExt for W {}
