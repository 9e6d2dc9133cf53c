//! PDF statement writer
//!
//! Draws a `PdfStatement` onto A4 pages with the standard Helvetica fonts.
//! Positions are measured in millimetres from the top-left corner and
//! converted to PDF's bottom-left origin when drawn.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::error::{DairyError, DairyResult};

use super::document::PdfStatement;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const TABLE_TOP: f32 = 50.0;
const CONTINUED_TOP: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
const PAGE_BOTTOM: f32 = 280.0;

/// Left edge of each table column
const COLUMN_X: [f32; 6] = [14.0, 40.0, 92.0, 122.0, 150.0, 178.0];
/// Longest customer name that fits its column
const CUSTOMER_WIDTH: usize = 26;

/// Render the statement and write it to `path`
pub fn write_pdf(statement: &PdfStatement, path: &Path) -> DairyResult<()> {
    let bytes = render_pdf(statement)?;

    let file = File::create(path).map_err(|e| {
        DairyError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| DairyError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(())
}

/// Render the statement to PDF bytes
pub fn render_pdf(statement: &PdfStatement) -> DairyResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        pdf_text(&statement.title),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Statement",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DairyError::Export(format!("Failed to load font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DairyError::Export(format!("Failed to load font: {}", e)))?;

    let mut canvas = Canvas {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        regular,
        bold,
    };

    canvas.text(&statement.title, 18.0, MARGIN_LEFT, 22.0, false);
    for (i, line) in statement.header.iter().enumerate() {
        canvas.text(line, 11.0, MARGIN_LEFT, 30.0 + 6.0 * i as f32, false);
    }

    let mut y = TABLE_TOP;
    canvas.table_header(&statement.columns, y);
    for row in &statement.rows {
        y += ROW_HEIGHT;
        if y > PAGE_BOTTOM {
            canvas.new_page();
            y = CONTINUED_TOP;
            canvas.table_header(&statement.columns, y);
            y += ROW_HEIGHT;
        }
        canvas.table_row(row, y);
    }

    // Summary block sits 15mm under the table and needs 34mm
    let mut final_y = y;
    if final_y + 34.0 > PAGE_HEIGHT - 10.0 {
        canvas.new_page();
        final_y = 10.0;
    }
    canvas.text(&statement.summary_heading, 12.0, MARGIN_LEFT, final_y + 15.0, true);
    for (i, line) in statement.summary.iter().enumerate() {
        canvas.text(line, 10.0, MARGIN_LEFT, final_y + 22.0 + 6.0 * i as f32, false);
    }

    drop(canvas);
    doc.save_to_bytes()
        .map_err(|e| DairyError::Export(format!("Failed to render PDF: {}", e)))
}

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas<'_> {
    fn text(&self, text: &str, size: f32, x: f32, y_from_top: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            pdf_text(text),
            size,
            Mm(x),
            Mm(PAGE_HEIGHT - y_from_top),
            font,
        );
    }

    fn table_header(&self, columns: &[String], y: f32) {
        for (x, heading) in COLUMN_X.iter().zip(columns) {
            self.text(heading, 10.0, *x, y, true);
        }
    }

    fn table_row(&self, row: &[String], y: f32) {
        for (i, (x, cell)) in COLUMN_X.iter().zip(row).enumerate() {
            let cell = if i == 1 {
                truncate(cell, CUSTOMER_WIDTH)
            } else {
                cell.clone()
            };
            self.text(&cell, 9.0, *x, y, false);
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Statement");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }
}

/// Map text onto what the standard PDF fonts can show.
///
/// The rupee sign becomes "Rs." and other characters outside ASCII become
/// '?'.
pub fn pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
