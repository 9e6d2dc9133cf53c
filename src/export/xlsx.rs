//! Excel statement writer

use std::path::Path;

use crate::error::{DairyError, DairyResult};

use super::document::{SheetCell, SpreadsheetStatement};

/// Write the statement as a single-sheet xlsx workbook
pub fn write_xlsx(statement: &SpreadsheetStatement, path: &Path) -> DairyResult<()> {
    let mut book = umya_spreadsheet::new_file();

    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| DairyError::Export("New workbook has no default sheet".into()))?;
    sheet.set_name(statement.sheet_name.clone());

    for (r, row) in statement.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let coordinate = ((c + 1) as u32, (r + 1) as u32);
            match cell {
                SheetCell::Text(text) => {
                    sheet.get_cell_mut(coordinate).set_value(text.clone());
                }
                SheetCell::Number(value) => {
                    sheet.get_cell_mut(coordinate).set_value_number(*value);
                }
            }
        }
    }

    for (i, width) in statement.column_widths.iter().enumerate() {
        sheet
            .get_column_dimension_mut(&column_letter(i as u32 + 1))
            .set_width(*width);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| DairyError::Export(format!("Failed to write {}: {}", path.display(), e)))
}

/// 1 -> "A", 26 -> "Z", 27 -> "AA"
fn column_letter(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = ((index - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}
