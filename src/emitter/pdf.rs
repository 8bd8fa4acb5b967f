//! Built-in PDF page emitter.
//!
//! Assembles a complete label document with proper structure: header, body,
//! xref table, and trailer. Pages carry uncompressed content streams using
//! the Base-14 Helvetica faces with WinAnsi encoding; nothing here parses
//! or embeds fonts.

use std::fmt::Write as _;
use std::io::Write as _;

use super::metrics::{FontMetrics, SimpleFontMetrics, PT_PER_MM};
use super::{Align, FontStyle, PageEmitter};
use crate::error::Result;

/// Cell side padding in millimeters.
const CELL_PADDING_MM: f32 = 1.0;

/// One page under construction.
struct Page {
    width_pt: f32,
    height_pt: f32,
    width_mm: f32,
    content: String,
}

/// PDF emitter with an FPDF-style top-left millimeter cursor.
pub struct PdfEmitter {
    pages: Vec<Page>,
    cursor_x: f32,
    cursor_y: f32,
    margin_left: f32,
    margin_top: f32,
    margin_right: f32,
    font: FontStyle,
    font_size: f32,
    fill_color: (u8, u8, u8),
    text_color: (u8, u8, u8),
    metrics: SimpleFontMetrics,
}

impl Default for PdfEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfEmitter {
    /// Create an emitter with no pages.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            cursor_x: 0.0,
            cursor_y: 0.0,
            margin_left: 0.0,
            margin_top: 0.0,
            margin_right: 0.0,
            font: FontStyle::Regular,
            font_size: 9.0,
            fill_color: (0, 0, 0),
            text_color: (0, 0, 0),
            metrics: SimpleFontMetrics::default(),
        }
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn font_resource(&self) -> &'static str {
        match self.font {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }

    /// Right edge of the content area on the current page, in millimeters.
    fn content_right(&self) -> f32 {
        match self.pages.last() {
            Some(page) => page.width_mm - self.margin_right,
            None => 0.0,
        }
    }

    /// Width of `text` in millimeters at the current font size.
    fn text_width_mm(&self, text: &str) -> f32 {
        self.metrics.text_width(text, self.font_size) / PT_PER_MM
    }

    /// Emit a filled and/or stroked rectangle at top-left mm coordinates.
    fn emit_rect(&mut self, x: f32, y: f32, w: f32, h: f32, border: bool, fill: bool) {
        let (fr, fg, fb) = rgb(self.fill_color);
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let x_pt = x * PT_PER_MM;
        let y_pt = page.height_pt - (y + h) * PT_PER_MM;
        let w_pt = w * PT_PER_MM;
        let h_pt = h * PT_PER_MM;
        if fill {
            let _ = writeln!(
                page.content,
                "q {:.3} {:.3} {:.3} rg {:.2} {:.2} {:.2} {:.2} re f Q",
                fr, fg, fb, x_pt, y_pt, w_pt, h_pt
            );
        }
        if border {
            let _ = writeln!(
                page.content,
                "0 G {:.2} {:.2} {:.2} {:.2} re S",
                x_pt, y_pt, w_pt, h_pt
            );
        }
    }

    /// Emit one line of text with its baseline at top-left mm coordinates.
    fn emit_text(&mut self, x: f32, baseline_y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let font = self.font_resource();
        let size = self.font_size;
        let (tr, tg, tb) = rgb(self.text_color);
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let x_pt = x * PT_PER_MM;
        let y_pt = page.height_pt - baseline_y * PT_PER_MM;
        let _ = write!(
            page.content,
            "BT /{} {:.2} Tf {:.3} {:.3} {:.3} rg {:.2} {:.2} Td (",
            font, size, tr, tg, tb, x_pt, y_pt
        );
        escape_into(&mut page.content, text);
        let _ = writeln!(page.content, ") Tj ET");
    }

    /// Baseline offset that vertically centers text in a row of `h` mm.
    fn baseline_in_row(&self, h: f32) -> f32 {
        h / 2.0 + 0.35 * self.font_size / PT_PER_MM
    }
}

impl PageEmitter for PdfEmitter {
    fn start_page(&mut self, width_mm: f32, height_mm: f32) {
        self.pages.push(Page {
            width_pt: width_mm * PT_PER_MM,
            height_pt: height_mm * PT_PER_MM,
            width_mm,
            content: String::new(),
        });
        self.cursor_x = self.margin_left;
        self.cursor_y = self.margin_top;
    }

    fn set_margins(&mut self, left_mm: f32, top_mm: f32, right_mm: f32) {
        self.margin_left = left_mm;
        self.margin_top = top_mm;
        self.margin_right = right_mm;
        self.cursor_x = left_mm;
        self.cursor_y = top_mm;
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font = style;
        self.font_size = size_pt;
    }

    fn set_fill_color(&mut self, r: u8, g: u8, b: u8) {
        self.fill_color = (r, g, b);
    }

    fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
        self.text_color = (r, g, b);
    }

    fn cell(&mut self, width_mm: f32, height_mm: f32, text: &str, border: bool, fill: bool, align: Align) {
        if self.pages.is_empty() {
            return;
        }
        let x = self.cursor_x;
        let y = self.cursor_y;
        let w = if width_mm > 0.0 {
            width_mm
        } else {
            (self.content_right() - x).max(0.0)
        };

        self.emit_rect(x, y, w, height_mm, border, fill);

        let text_x = match align {
            Align::Left => x + CELL_PADDING_MM,
            Align::Center => {
                let tw = self.text_width_mm(text);
                x + ((w - tw) / 2.0).max(CELL_PADDING_MM)
            },
        };
        let baseline = y + self.baseline_in_row(height_mm);
        self.emit_text(text_x, baseline, text);

        self.cursor_x = x + w;
    }

    fn multi_cell(&mut self, width_mm: f32, line_height_mm: f32, text: &str) {
        if self.pages.is_empty() {
            return;
        }
        let x = self.cursor_x;
        let w = if width_mm > 0.0 {
            width_mm
        } else {
            (self.content_right() - x).max(0.0)
        };
        let wrap_width_pt = (w - 2.0 * CELL_PADDING_MM).max(0.0) * PT_PER_MM;
        let lines = super::metrics::wrap_text(text, wrap_width_pt, self.font_size, &self.metrics);
        for line in lines {
            let baseline = self.cursor_y + self.baseline_in_row(line_height_mm);
            self.emit_text(x + CELL_PADDING_MM, baseline, &line);
            self.cursor_y += line_height_mm;
        }
        self.cursor_x = self.margin_left;
    }

    fn line_break(&mut self, height_mm: f32) {
        self.cursor_x = self.margin_left;
        self.cursor_y += height_mm;
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let pages = std::mem::take(&mut self.pages);
        build_document(&pages)
    }
}

/// Map an 8-bit color channel triple to unit-range floats.
fn rgb((r, g, b): (u8, u8, u8)) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Escape a PDF literal string into `out`.
fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}

/// Assemble the final document: header, objects, xref table, trailer.
fn build_document(pages: &[Page]) -> Result<Vec<u8>> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<(u32, usize)> = Vec::new();

    writeln!(output, "%PDF-1.7")?;
    output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    // Fixed object layout: 1 catalog, 2 page tree, 3/4 fonts, then one
    // page object + one content stream per page, info object last.
    let catalog_id = 1u32;
    let pages_id = 2u32;
    let font_regular_id = 3u32;
    let font_bold_id = 4u32;
    let first_page_id = 5u32;
    let info_id = first_page_id + 2 * pages.len() as u32;
    let object_count = info_id + 1;

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_id + 2 * i as u32))
        .collect();

    offsets.push((catalog_id, output.len()));
    writeln!(
        output,
        "{} 0 obj\n<< /Type /Catalog /Pages {} 0 R >>\nendobj",
        catalog_id, pages_id
    )?;

    offsets.push((pages_id, output.len()));
    writeln!(
        output,
        "{} 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj",
        pages_id,
        kids.join(" "),
        pages.len()
    )?;

    for (id, base) in [(font_regular_id, "Helvetica"), (font_bold_id, "Helvetica-Bold")] {
        offsets.push((id, output.len()));
        writeln!(
            output,
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj",
            id, base
        )?;
    }

    for (i, page) in pages.iter().enumerate() {
        let page_id = first_page_id + 2 * i as u32;
        let content_id = page_id + 1;

        offsets.push((page_id, output.len()));
        writeln!(
            output,
            "{} 0 obj\n<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> >>\nendobj",
            page_id, pages_id, page.width_pt, page.height_pt, content_id, font_regular_id, font_bold_id
        )?;

        offsets.push((content_id, output.len()));
        writeln!(
            output,
            "{} 0 obj\n<< /Length {} >>\nstream",
            content_id,
            page.content.len()
        )?;
        output.extend_from_slice(page.content.as_bytes());
        writeln!(output, "endstream\nendobj")?;
    }

    offsets.push((info_id, output.len()));
    writeln!(
        output,
        "{} 0 obj\n<< /Producer (etiqueta {}) >>\nendobj",
        info_id,
        env!("CARGO_PKG_VERSION")
    )?;

    let xref_start = output.len();
    writeln!(output, "xref")?;
    writeln!(output, "0 {}", object_count)?;
    writeln!(output, "0000000000 65535 f ")?;
    offsets.sort_by_key(|(id, _)| *id);
    for (_, offset) in &offsets {
        writeln!(output, "{:010} 00000 n ", offset)?;
    }

    writeln!(
        output,
        "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>",
        object_count, catalog_id, info_id
    )?;
    writeln!(output, "startxref")?;
    writeln!(output, "{}", xref_start)?;
    write!(output, "%%EOF")?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_structure() {
        let mut emitter = PdfEmitter::new();
        let bytes = emitter.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Count 0"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_single_page_with_text() {
        let mut emitter = PdfEmitter::new();
        emitter.set_margins(3.0, 3.0, 3.0);
        emitter.start_page(100.0, 50.0);
        emitter.set_font(FontStyle::Regular, 9.0);
        emitter.cell(0.0, 5.0, "Hello, World!", false, false, Align::Left);
        let bytes = emitter.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Count 1"));
        // 100mm x 50mm page in points.
        assert!(content.contains("[0 0 283.46 141.73]"));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("(Hello, World!) Tj"));
    }

    #[test]
    fn test_filled_cell_paints_rect() {
        let mut emitter = PdfEmitter::new();
        emitter.start_page(100.0, 50.0);
        emitter.set_fill_color(0, 0, 0);
        emitter.set_text_color(255, 255, 255);
        emitter.cell(0.0, 6.0, "HEADER", false, true, Align::Center);
        let bytes = emitter.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("re f"));
        assert!(content.contains("(HEADER) Tj"));
    }

    #[test]
    fn test_two_pages_two_kids() {
        let mut emitter = PdfEmitter::new();
        emitter.start_page(100.0, 50.0);
        emitter.start_page(100.0, 50.0);
        let bytes = emitter.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 2"));
        assert!(content.contains("/Kids [5 0 R 7 0 R]"));
    }

    #[test]
    fn test_escaped_parentheses() {
        let mut emitter = PdfEmitter::new();
        emitter.start_page(100.0, 50.0);
        emitter.cell(0.0, 5.0, "a (b) c", false, false, Align::Left);
        let bytes = emitter.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains(r"(a \(b\) c) Tj"));
    }

    #[test]
    fn test_multi_cell_advances_cursor() {
        let mut emitter = PdfEmitter::new();
        emitter.set_margins(3.0, 3.0, 3.0);
        emitter.start_page(60.0, 40.0);
        emitter.set_font(FontStyle::Regular, 8.0);
        let before = emitter.cursor_y;
        emitter.multi_cell(0.0, 4.0, "one two three four five six seven eight nine ten");
        assert!(emitter.cursor_y > before + 4.0, "expected more than one line");
        assert_eq!(emitter.cursor_x, 3.0);
    }

    #[test]
    fn test_ops_without_page_are_ignored() {
        let mut emitter = PdfEmitter::new();
        emitter.cell(10.0, 5.0, "nowhere", false, false, Align::Left);
        emitter.multi_cell(10.0, 5.0, "nowhere");
        let bytes = emitter.finish().unwrap();
        assert!(!String::from_utf8_lossy(&bytes).contains("nowhere"));
    }
}
