use crate::domain::model::Table;
use crate::utils::error::{Result, ScrapeError};
use rust_xlsxwriter::{ColNum, DocProperties, Format, RowNum, Workbook, Worksheet};

pub const SHEET_NAME: &str = "Sheet1";

/// Excel rejects cells longer than this many characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// 將表格寫成單一工作表的 .xlsx 活頁簿；缺少的值留白
pub fn write_workbook(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_author("archive-etl"));

    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(column)?, name, &header)?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        write_row(worksheet, row_number(index + 1)?, row)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_row(worksheet: &mut Worksheet, row: RowNum, cells: &[Option<String>]) -> Result<()> {
    for (column, cell) in cells.iter().enumerate() {
        let Some(value) = cell else {
            continue;
        };
        worksheet.write_string(row, column_number(column)?, &cell_text(value, row, column))?;
    }
    Ok(())
}

fn row_number(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| ScrapeError::ExportError {
        message: format!("Too many rows for a worksheet: {}", index),
    })
}

fn column_number(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| ScrapeError::ExportError {
        message: format!("Too many columns for a worksheet: {}", index),
    })
}

/// 移除 XML 不允許的控制字元，超過儲存格上限的文字截斷
fn cell_text(value: &str, row: RowNum, column: usize) -> String {
    let cleaned: String = value.chars().filter(|c| is_xml_char(*c)).collect();
    if cleaned.chars().count() > MAX_CELL_CHARS {
        tracing::warn!(
            "✂️ Cell at row {}, column {} truncated to {} characters",
            row + 1,
            column + 1,
            MAX_CELL_CHARS
        );
        cleaned.chars().take(MAX_CELL_CHARS).collect()
    } else {
        cleaned
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}
