//! Binary buffer reader with cursor tracking.

use std::str;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// bytes, little-endian integers, floats, and strings. Reads past the end
/// of the window panic; callers that decode untrusted input check
/// [`Reader::size`] first.
///
/// # Example
///
/// ```
/// use protowire_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), 0x01);
/// assert_eq!(reader.u32_le(), 0x0504_0302);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        Self { uint8, x, end }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.end = uint8.len();
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> u8 {
        self.uint8[self.x]
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        bin
    }

    /// Creates a new Reader over the same memory, starting at the cursor.
    pub fn slice(&self, start: usize, end: Option<usize>) -> Reader<'a> {
        let x = self.x;
        let actual_start = x + start;
        let actual_end = end.map(|e| x + e).unwrap_or(self.end);
        Reader::from_slice(self.uint8, actual_start, actual_end)
    }

    /// Creates a new Reader from the current position and advances the cursor.
    pub fn cut(&mut self, size: usize) -> Reader<'a> {
        let slice = self.slice(0, Some(size));
        self.skip(size);
        slice
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> u8 {
        let val = self.uint8[self.x];
        self.x += 1;
        val
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> u32 {
        let val = u32::from_le_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        val
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> u64 {
        let val = u64::from_le_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
            self.uint8[self.x + 4],
            self.uint8[self.x + 5],
            self.uint8[self.x + 6],
            self.uint8[self.x + 7],
        ]);
        self.x += 8;
        val
    }

    /// Reads a 32-bit floating point number (little-endian).
    #[inline]
    pub fn f32_le(&mut self) -> f32 {
        f32::from_bits(self.u32_le())
    }

    /// Reads a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self) -> f64 {
        f64::from_bits(self.u64_le())
    }

    /// Reads a UTF-8 string of the given size. Invalid UTF-8 reads as the
    /// empty string; callers that want lossy replacement-character
    /// decoding take the raw bytes via [`Reader::buf`] instead.
    pub fn utf8(&mut self, size: usize) -> &'a str {
        let start = self.x;
        self.x += size;
        str::from_utf8(&self.uint8[start..self.x]).unwrap_or("")
    }
}
