//! Test fixtures shared by the module tests

use heapless::Vec;

use crate::font::{encode_font, encoded_len};
use crate::traits::PageDevice;

/// Encode a font into a fixed-size blob
///
/// `N` must equal `encoded_len(width, height)`.
pub fn font<const N: usize>(width: u8, height: u8, column_fn: impl FnMut(u8, u8) -> u32) -> [u8; N] {
    let mut blob = [0u8; N];
    let len = encode_font(width, height, &mut blob, column_fn).unwrap();
    assert_eq!(len, N);
    blob
}

/// 5x8 font where every glyph is a solid block, except space which is blank
pub fn solid_font_5x8() -> [u8; encoded_len(5, 8)] {
    font(5, 8, |code, _| if code == b' ' { 0 } else { 0xFF })
}

/// A device call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Cursor(usize, usize),
    Write(usize),
}

/// Transport failure injected by [`MockDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Records cursor/write calls and the bytes written
#[derive(Default)]
pub struct MockDevice {
    pub calls: Vec<Call, 64>,
    pub data: Vec<u8, 2048>,
    /// Fail the nth write (0-based)
    pub fail_write: Option<usize>,
    writes: usize,
}

impl MockDevice {
    pub fn failing_at(write: usize) -> Self {
        Self {
            fail_write: Some(write),
            ..Self::default()
        }
    }
}

impl PageDevice for MockDevice {
    type Error = MockError;

    fn set_cursor(&mut self, column: usize, page: usize) -> Result<(), MockError> {
        self.calls.push(Call::Cursor(column, page)).unwrap();
        Ok(())
    }

    fn write_buffer(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_write == Some(index) {
            return Err(MockError);
        }
        self.calls.push(Call::Write(bytes.len())).unwrap();
        self.data.extend_from_slice(bytes).unwrap();
        Ok(())
    }
}
