//! XDR primitives (RFC 4506): big-endian, 4-byte aligned.

use crate::domain::CodecError;

/// Cursor over an XDR buffer.
pub struct XdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fail unless the whole buffer was consumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Unsigned 32-bit.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    /// Signed 32-bit.
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    /// Unsigned 64-bit.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    /// Signed 64-bit.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Bool (0 or 1 as a 32-bit word).
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    /// Fixed-length opaque of `N` bytes (N is a multiple of 4 in every
    /// use here, so no padding).
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let out = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(out)
    }

    /// Variable-length opaque with an optional maximum.
    pub fn read_var_opaque(&mut self, max: Option<u32>) -> Result<Vec<u8>, CodecError> {
        let len = self.read_u32()?;
        if let Some(max) = max {
            if len > max {
                return Err(CodecError::LengthExceeded { len, max });
            }
        }
        let len = len as usize;
        let data = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(data)
    }

    /// Variable-length string; invalid UTF-8 is replaced, not rejected.
    pub fn read_string(&mut self, max: Option<u32>) -> Result<String, CodecError> {
        let bytes = self.read_var_opaque(max)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Element count of a variable array. Every element takes at least
    /// `min_elem_size` bytes, so counts the input cannot hold are rejected
    /// before anything is allocated.
    pub fn read_count(&mut self, min_elem_size: usize) -> Result<usize, CodecError> {
        let count = self.read_u32()? as usize;
        let needed = count.saturating_mul(min_elem_size);
        if needed > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    fn skip_padding(&mut self, len: usize) -> Result<(), CodecError> {
        let pad = (4 - len % 4) % 4;
        if self.take(pad)?.iter().any(|b| *b != 0) {
            return Err(CodecError::NonZeroPadding);
        }
        Ok(())
    }
}

/// Growable XDR output buffer.
#[derive(Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    /// Empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Unsigned 32-bit.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Signed 32-bit.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Unsigned 64-bit.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Signed 64-bit.
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Bool.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Fixed-length opaque.
    pub fn write_fixed(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        self.pad(data.len());
    }

    /// Variable-length opaque with an optional maximum.
    pub fn write_var_opaque(&mut self, data: &[u8], max: Option<u32>) -> Result<(), CodecError> {
        let len = self.write_len(data.len(), max)?;
        self.buf.extend_from_slice(data);
        self.pad(len as usize);
        Ok(())
    }

    /// Element count of a variable array.
    pub fn write_count(&mut self, count: usize, max: Option<u32>) -> Result<(), CodecError> {
        self.write_len(count, max).map(|_| ())
    }

    fn write_len(&mut self, len: usize, max: Option<u32>) -> Result<u32, CodecError> {
        let len = u32::try_from(len).map_err(|_| CodecError::LengthExceeded {
            len: u32::MAX,
            max: max.unwrap_or(u32::MAX),
        })?;
        if let Some(max) = max {
            if len > max {
                return Err(CodecError::LengthExceeded { len, max });
            }
        }
        self.write_u32(len);
        Ok(len)
    }

    fn pad(&mut self, len: usize) {
        let pad = (4 - len % 4) % 4;
        self.buf.extend(std::iter::repeat(0u8).take(pad));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_big_endian() {
        let mut w = XdrWriter::new();
        w.write_u32(1);
        w.write_i64(-2);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);

        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_u32().unwrap(), 1);
        assert_eq!(r.read_i64().unwrap(), -2);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_var_opaque_is_padded() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(b"abcde", None).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 4 + 8);
        assert_eq!(&bytes[9..], &[0, 0, 0]);

        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_var_opaque(None).unwrap(), b"abcde");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_nonzero_padding_rejected() {
        let bytes = [0, 0, 0, 1, b'a', 1, 0, 0];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_var_opaque(None), Err(CodecError::NonZeroPadding));
    }

    #[test]
    fn test_length_above_max_rejected() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(&[b'x'; 40], None).unwrap();
        let bytes = w.into_bytes();
        let mut r = XdrReader::new(&bytes);
        assert_eq!(
            r.read_string(Some(32)),
            Err(CodecError::LengthExceeded { len: 40, max: 32 })
        );
    }

    #[test]
    fn test_truncated_input() {
        let mut r = XdrReader::new(&[0, 0, 0]);
        assert!(matches!(
            r.read_u32(),
            Err(CodecError::UnexpectedEof { needed: 4, remaining: 3 })
        ));
    }

    #[test]
    fn test_huge_count_rejected_without_allocation() {
        let bytes = u32::MAX.to_be_bytes();
        let mut r = XdrReader::new(&bytes);
        assert!(matches!(
            r.read_count(4),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_invalid_bool() {
        let mut r = XdrReader::new(&[0, 0, 0, 2]);
        assert_eq!(r.read_bool(), Err(CodecError::InvalidBool(2)));
    }

    #[test]
    fn test_trailing_bytes() {
        let bytes = [0, 0, 0, 1, 0, 0, 0, 0];
        let mut r = XdrReader::new(&bytes);
        r.read_u32().unwrap();
        assert_eq!(r.finish(), Err(CodecError::TrailingBytes(4)));
    }
}
