//! Spreadsheet artifact writer.
//!
//! The workbook is serialized to memory first, written to a hidden sibling file,
//! then renamed over the destination, so a failed run never leaves a partial
//! report at the destination path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use rust_xlsxwriter::{Color, DocProperties, ExcelDateTime, Format, Workbook, XlsxError};
use tracing::info;

use crate::domain::ReportTable;
use crate::error::PipelineError;
use crate::report::layout::{CellValue, Emphasis, NUMBER_FORMAT, SheetLayout, layout};

/// Render `table` to an `.xlsx` file at `dest`, replacing any existing file.
pub fn render(table: &ReportTable, dest: &Path) -> Result<PathBuf, PipelineError> {
    let sheet = layout(table);
    let bytes = build_workbook(&sheet)
        .and_then(|mut wb| wb.save_to_buffer())
        .map_err(|e| PipelineError::artifact_write(dest, e))?;

    write_atomically(dest, &bytes)?;
    info!(path = %dest.display(), rows = sheet.rows.len(), "report written");
    Ok(dest.to_path_buf())
}

fn build_workbook(sheet: &SheetLayout) -> Result<Workbook, XlsxError> {
    let header = Format::new().set_bold();
    let plain = Format::new().set_num_format(NUMBER_FORMAT);
    let strong = Format::new().set_num_format(NUMBER_FORMAT).set_bold();
    let muted = Format::new()
        .set_num_format(NUMBER_FORMAT)
        .set_italic()
        .set_font_color(Color::Gray);

    let created = match sheet.created {
        Some(d) => ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?,
        None => ExcelDateTime::from_ymd(1970, 1, 1)?,
    };

    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let ws = workbook.add_worksheet();
    ws.set_name(sheet.sheet_name)?;

    for (col, (name, width)) in sheet.headers.iter().zip(&sheet.widths).enumerate() {
        let col = col as u16;
        ws.write_string_with_format(0, col, *name, &header)?;
        ws.set_column_width(col, *width)?;
    }
    ws.set_freeze_panes(sheet.frozen_rows, 0)?;

    for (r, cells) in sheet.rows.iter().enumerate() {
        let row = r as u32 + 1;
        for (c, cell) in cells.iter().enumerate() {
            let col = c as u16;
            let format = match cell.emphasis {
                Emphasis::Plain => &plain,
                Emphasis::Strong => &strong,
                Emphasis::Muted => &muted,
            };
            match &cell.value {
                CellValue::Text(s) => {
                    ws.write_string(row, col, s)?;
                }
                CellValue::Number(n) => {
                    ws.write_number_with_format(row, col, *n, format)?;
                }
                CellValue::Blank => {}
            }
        }
    }

    Ok(workbook)
}

fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::artifact_write(dest, e))?;
    }

    let file_name = dest
        .file_name()
        .ok_or_else(|| PipelineError::artifact_write(dest, "destination has no file name"))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".partial");
    let tmp = dest.with_file_name(tmp_name);

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, dest));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(PipelineError::artifact_write(dest, e));
    }
    Ok(())
}
