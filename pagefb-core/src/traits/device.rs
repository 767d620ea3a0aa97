//! Page-addressed display RAM

/// A controller whose RAM is written a page row at a time
///
/// After `set_cursor(column, page)` each byte written lands in the next
/// column of that page. Writes never wrap into the following page.
pub trait PageDevice {
    /// Transport or addressing error
    type Error;

    /// Move the RAM write position
    fn set_cursor(&mut self, column: usize, page: usize) -> Result<(), Self::Error>;

    /// Write column bytes starting at the cursor
    fn write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<D: PageDevice + ?Sized> PageDevice for &mut D {
    type Error = D::Error;

    fn set_cursor(&mut self, column: usize, page: usize) -> Result<(), Self::Error> {
        (**self).set_cursor(column, page)
    }

    fn write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_buffer(data)
    }
}

/// Helpers built on [`PageDevice`]
pub trait PageDeviceExt: PageDevice {
    /// Write a run of column bytes at `(column, page)`
    fn write_page_row(&mut self, page: usize, column: usize, data: &[u8]) -> Result<(), Self::Error> {
        self.set_cursor(column, page)?;
        self.write_buffer(data)
    }
}

impl<D: PageDevice + ?Sized> PageDeviceExt for D {}
