//! Packed bitmap font tables
//!
//! Font resource format:
//! ```text
//! ┌───────┬────────┬──────────────────────────────────────────────┐
//! │ WIDTH │ HEIGHT │ 256 glyphs x WIDTH columns x ceil(HEIGHT/8)B │
//! │ 1B    │ 1B     │ code-major, column-minor, little-endian      │
//! └───────┴────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Bit `n` of a column pattern is the pixel on row `n` of the glyph, so a
//! column of a glyph up to 8 rows tall is exactly one page byte.

/// Tallest supported glyph (a column must fit in a `u32`)
pub const MAX_GLYPH_HEIGHT: u8 = 32;

/// Number of character codes in a table
pub const GLYPH_COUNT: usize = 256;

/// Width and height bytes
pub const HEADER_LEN: usize = 2;

/// Errors raised while loading or querying a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Resource truncated or dimensions unsupported
    MalformedFont,
    /// Character code outside the 256-entry table
    InvalidCharacter,
    /// Column index not below the glyph width
    InvalidColumn,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

/// Bytes used by one glyph column
pub const fn bytes_per_column(height: u8) -> usize {
    (height as usize).div_ceil(8)
}

/// Total resource size for a font of the given dimensions
pub const fn encoded_len(width: u8, height: u8) -> usize {
    HEADER_LEN + GLYPH_COUNT * width as usize * bytes_per_column(height)
}

fn check_dimensions(width: u8, height: u8) -> Result<(), FontError> {
    if width == 0 || height == 0 || height > MAX_GLYPH_HEIGHT {
        return Err(FontError::MalformedFont);
    }
    Ok(())
}

/// Map a character to its raw table code
fn char_code(ch: char) -> Result<u8, FontError> {
    u8::try_from(u32::from(ch)).map_err(|_| FontError::InvalidCharacter)
}

/// Immutable view over a font resource
///
/// Borrows the resource bytes, typically an `include_bytes!` blob or a
/// buffer the caller read from storage once at startup.
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable<'a> {
    width: u8,
    height: u8,
    /// Column data, header stripped
    data: &'a [u8],
}

impl<'a> GlyphTable<'a> {
    /// Parse a font resource
    ///
    /// Trailing bytes after the 256th glyph are ignored.
    pub fn load(source: &'a [u8]) -> Result<Self, FontError> {
        let (width, height) = match source {
            [width, height, ..] => (*width, *height),
            _ => return Err(FontError::MalformedFont),
        };
        if let Err(e) = check_dimensions(width, height) {
            debug!("font rejected: {}x{}", width, height);
            return Err(e);
        }
        let data = source
            .get(HEADER_LEN..encoded_len(width, height))
            .ok_or(FontError::MalformedFont)?;

        debug!("font loaded: {}x{}", width, height);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Glyph width in pixels
    pub const fn glyph_width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub const fn glyph_height(&self) -> u8 {
        self.height
    }

    /// Bytes stored per glyph column
    pub const fn bytes_per_column(&self) -> usize {
        bytes_per_column(self.height)
    }

    fn column_at(&self, code: u8, column: usize) -> u32 {
        let bpc = self.bytes_per_column();
        let start = (code as usize * self.width as usize + column) * bpc;
        self.data[start..start + bpc]
            .iter()
            .rev()
            .fold(0, |acc, &byte| (acc << 8) | u32::from(byte))
    }

    /// Raw column pattern of a character code
    pub fn column_bits(&self, code: u32, column: usize) -> Result<u32, FontError> {
        let code = u8::try_from(code).map_err(|_| FontError::InvalidCharacter)?;
        if column >= self.width as usize {
            return Err(FontError::InvalidColumn);
        }
        Ok(self.column_at(code, column))
    }

    /// Look up the glyph of a character (Latin-1 range)
    pub fn glyph(&self, ch: char) -> Result<Glyph<'a>, FontError> {
        Ok(Glyph {
            table: *self,
            code: char_code(ch)?,
        })
    }
}

/// A single character of a [`GlyphTable`]
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    table: GlyphTable<'a>,
    code: u8,
}

impl<'a> Glyph<'a> {
    /// Raw table code
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Column patterns, left to right
    pub fn columns(&self) -> impl Iterator<Item = u32> + 'a {
        let (table, code) = (self.table, self.code);
        (0..table.width as usize).map(move |column| table.column_at(code, column))
    }
}

/// Write a font resource
///
/// `column_fn(code, column)` supplies each column pattern; bits above the
/// glyph height are dropped. Returns the number of bytes written.
pub fn encode_font<F>(width: u8, height: u8, out: &mut [u8], mut column_fn: F) -> Result<usize, FontError>
where
    F: FnMut(u8, u8) -> u32,
{
    check_dimensions(width, height)?;
    let len = encoded_len(width, height);
    if out.len() < len {
        return Err(FontError::BufferTooSmall);
    }

    out[0] = width;
    out[1] = height;
    let bpc = bytes_per_column(height);
    let mask = u32::MAX >> (32 - u32::from(height));
    let mut pos = HEADER_LEN;
    for code in 0..=u8::MAX {
        for column in 0..width {
            let bits = column_fn(code, column) & mask;
            for (i, byte) in out[pos..pos + bpc].iter_mut().enumerate() {
                *byte = (bits >> (8 * i)) as u8;
            }
            pos += bpc;
        }
    }
    Ok(len)
}

/// Transpose a row-major glyph into column patterns
///
/// Bit `c` of `rows[r]` is the pixel at column `c`, row `r` (leftmost pixel
/// in the least significant bit). Fills `out[..width]`.
pub fn rows_to_columns(rows: &[u32], width: u8, out: &mut [u32]) -> Result<(), FontError> {
    if width == 0 || width > 32 || rows.len() > MAX_GLYPH_HEIGHT as usize {
        return Err(FontError::MalformedFont);
    }
    let out = out
        .get_mut(..width as usize)
        .ok_or(FontError::BufferTooSmall)?;

    for (column, bits) in out.iter_mut().enumerate() {
        *bits = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| **row & (1 << column) != 0)
            .fold(0, |acc, (r, _)| acc | (1 << r));
    }
    Ok(())
}
