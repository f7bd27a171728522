//! Pure sheet layout.
//!
//! Turning a `ReportTable` into a `SheetLayout` involves no I/O, so identical
//! tables always produce identical layouts. The writer in `xlsx` only
//! transcribes a layout.

use chrono::NaiveDate;

use crate::domain::{Column, ColumnKey, EmphasisRule, MergedRow, Provenance, ReportTable, WidthRule};

pub const SHEET_NAME: &str = "Report";

/// Display format applied to every numeric cell.
pub const NUMBER_FORMAT: &str = "#,##0.00";

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Strong,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellPlan {
    pub value: CellValue,
    pub emphasis: Emphasis,
}

/// Everything the writer needs: headers, widths, and the body cells row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: &'static str,
    pub headers: Vec<&'static str>,
    pub widths: Vec<f64>,
    /// Number of leading rows kept visible under scroll.
    pub frozen_rows: u32,
    /// Workbook creation date: the newest report date, so identical tables
    /// produce identical files.
    pub created: Option<NaiveDate>,
    pub rows: Vec<Vec<CellPlan>>,
}

pub fn layout(table: &ReportTable) -> SheetLayout {
    let rows: Vec<Vec<CellPlan>> = table
        .rows
        .iter()
        .map(|row| table.columns.iter().map(|col| plan_cell(col, row)).collect())
        .collect();

    let widths = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| column_width(col, rows.iter().map(|r| &r[i].value)))
        .collect();

    SheetLayout {
        sheet_name: SHEET_NAME,
        headers: table.columns.iter().map(|c| c.name).collect(),
        widths,
        frozen_rows: 1,
        created: table.rows.first().map(|r| r.date),
        rows,
    }
}

fn plan_cell(col: &Column, row: &MergedRow) -> CellPlan {
    let value = match col.key {
        ColumnKey::Date => CellValue::Text(row.date.format("%Y-%m-%d").to_string()),
        ColumnKey::Price => CellValue::Number(row.price),
        ColumnKey::Liquidity => row
            .liquidity
            .map_or(CellValue::Blank, |c| CellValue::Number(c.value)),
        ColumnKey::ExpectedPrice => row.expected_price.map_or(CellValue::Blank, CellValue::Number),
    };

    let emphasis = match (col.emphasis, col.key, row.liquidity) {
        (EmphasisRule::ByProvenance, ColumnKey::Liquidity, Some(cell)) => match cell.provenance {
            Provenance::Observed => Emphasis::Strong,
            Provenance::Interpolated => Emphasis::Muted,
        },
        _ => Emphasis::Plain,
    };

    CellPlan { value, emphasis }
}

fn column_width<'a>(col: &Column, values: impl Iterator<Item = &'a CellValue>) -> f64 {
    match col.width {
        WidthRule::Fixed(w) => w,
        WidthRule::Fit { padding, empty_floor } => {
            let mut longest: Option<usize> = None;
            for v in values {
                let len = match v {
                    CellValue::Text(s) => s.chars().count(),
                    CellValue::Number(n) => format_amount(*n).chars().count(),
                    CellValue::Blank => continue,
                };
                longest = Some(longest.map_or(len, |l| l.max(len)));
            }
            let header = col.name.chars().count();
            let width = header.max(longest.unwrap_or(0)) as f64 + padding;
            if longest.is_none() {
                width.max(empty_floor)
            } else {
                width
            }
        }
    }
}

/// Render a number the way `NUMBER_FORMAT` displays it: `12,345.68`.
pub fn format_amount(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}
