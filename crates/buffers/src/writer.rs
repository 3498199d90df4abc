//! Binary buffer writer with an auto-growing backing buffer.

/// A binary buffer writer that appends data to an auto-growing buffer.
///
/// The writer keeps a cursor into a preallocated buffer and grows the
/// buffer on demand. [`Writer::flush`] returns the bytes written so far and
/// resets the window, so one writer can serve many encode calls.
///
/// # Example
///
/// ```
/// use protowire_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.buf(&[0x02, 0x03]);
/// assert_eq!(writer.flush(), vec![0x01, 0x02, 0x03]);
/// ```
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
    /// Current cursor position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new writer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: vec![0; capacity],
            x: 0,
        }
    }

    /// Grows the buffer so that at least `size` more bytes fit.
    pub fn ensure_capacity(&mut self, size: usize) {
        let needed = self.x + size;
        if needed > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(needed);
            self.uint8.resize(grown, 0);
        }
    }

    /// Number of bytes written since the last flush.
    pub fn size(&self) -> usize {
        self.x
    }

    /// Resets the write window without returning the written bytes.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Returns the bytes written so far and resets the window.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[..self.x].to_vec();
        self.x = 0;
        out
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, value: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = value;
        self.x += 1;
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self, value: u32) {
        self.ensure_capacity(4);
        self.uint8[self.x..self.x + 4].copy_from_slice(&value.to_le_bytes());
        self.x += 4;
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self, value: u64) {
        self.ensure_capacity(8);
        self.uint8[self.x..self.x + 8].copy_from_slice(&value.to_le_bytes());
        self.x += 8;
    }

    /// Writes a 32-bit floating point number (little-endian).
    #[inline]
    pub fn f32_le(&mut self, value: f32) {
        self.u32_le(value.to_bits());
    }

    /// Writes a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self, value: f64) {
        self.u64_le(value.to_bits());
    }

    /// Writes a byte followed by an unsigned 32-bit integer
    /// (little-endian) in one capacity check.
    #[inline]
    pub fn u8u32(&mut self, byte: u8, value: u32) {
        self.ensure_capacity(5);
        self.uint8[self.x] = byte;
        self.uint8[self.x + 1..self.x + 5].copy_from_slice(&value.to_le_bytes());
        self.x += 5;
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.ensure_capacity(data.len());
        self.uint8[self.x..self.x + data.len()].copy_from_slice(data);
        self.x += data.len();
    }

    /// Writes a string as UTF-8 bytes (no length prefix).
    pub fn utf8(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }
}
