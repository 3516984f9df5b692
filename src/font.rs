//! Glyph source capability.
//!
//! The driver renders classic 5x7 glyphs inside a 6x8 cell but does not ship
//! a glyph table of its own; the table is supplied at build time through this
//! trait (see [`Builder::font`](crate::Builder::font)).

/// Width of a glyph bitmap in columns.
pub const GLYPH_WIDTH: u16 = 5;
/// Full character cell width, including the blank spacer column.
pub const CELL_WIDTH: u16 = 6;
/// Full character cell height.
pub const CELL_HEIGHT: u16 = 8;

/// A 5x7 glyph bitmap lookup.
pub trait Font {
    /// Returns the five column bitmaps for `code`.
    ///
    /// Columns run left to right; within a column the least significant bit
    /// is the top pixel. The sixth (spacer) column is synthesized by the
    /// renderer and is not part of the table.
    fn glyph_columns(&self, code: u8) -> [u8; 5];
}

impl<T: Font + ?Sized> Font for &T {
    fn glyph_columns(&self, code: u8) -> [u8; 5] {
        T::glyph_columns(self, code)
    }
}
