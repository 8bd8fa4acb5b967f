//! Page emission capability.
//!
//! The renderer drives an abstract page emitter: start a page, set fonts
//! and colors, draw fixed-width cells and word-wrapped blocks, advance the
//! cursor. The built-in [`pdf::PdfEmitter`] writes real PDF bytes; hosts
//! embedding the renderer can substitute their own implementation.

pub mod metrics;
pub mod pdf;

use crate::error::Result;

/// Font selection for emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    /// Regular body text
    #[default]
    Regular,
    /// Bold emphasis (header and highlight bands)
    Bold,
}

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left with cell padding
    #[default]
    Left,
    /// Centered within the cell
    Center,
}

/// Glyph-placement capability consumed by the label renderer.
///
/// All lengths are millimeters measured from the top-left page corner;
/// font sizes are points. The emitter owns the page cursor: `cell` advances
/// it horizontally, `multi_cell` and `line_break` advance it vertically and
/// return to the left margin.
pub trait PageEmitter {
    /// Start a new page of the given physical size.
    fn start_page(&mut self, width_mm: f32, height_mm: f32);

    /// Set the page margins; the cursor moves to the top-left content corner.
    fn set_margins(&mut self, left_mm: f32, top_mm: f32, right_mm: f32);

    /// Select the font for subsequent text.
    fn set_font(&mut self, style: FontStyle, size_pt: f32);

    /// Set the background color used by filled cells.
    fn set_fill_color(&mut self, r: u8, g: u8, b: u8);

    /// Set the text color.
    fn set_text_color(&mut self, r: u8, g: u8, b: u8);

    /// Draw a single-line cell of fixed width and height.
    ///
    /// A width of `0.0` extends the cell to the right margin. The cursor
    /// advances past the cell's right edge.
    fn cell(&mut self, width_mm: f32, height_mm: f32, text: &str, border: bool, fill: bool, align: Align);

    /// Draw a word-wrapped block. A width of `0.0` wraps at the right
    /// margin. The cursor returns to the left margin below the block.
    fn multi_cell(&mut self, width_mm: f32, line_height_mm: f32, text: &str);

    /// Move the cursor to the left margin, `height_mm` lower.
    fn line_break(&mut self, height_mm: f32);

    /// Finish the document and return its bytes.
    fn finish(&mut self) -> Result<Vec<u8>>;
}
