use crate::core::{CellValue, SheetTable, WorkbookSource};
use crate::utils::error::{Result, SumLoadError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};

/// 以 calamine 讀取 xlsx / xls / ods 活頁簿
#[derive(Debug, Clone)]
pub struct CalamineWorkbook {
    path: PathBuf,
}

impl CalamineWorkbook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 日期以 Excel 序號表示
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(&self.path)?;
        Ok(workbook.sheet_names())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetTable> {
        let mut workbook = open_workbook_auto(&self.path)?;

        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(SumLoadError::SheetNotFound {
                sheet: sheet.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet)?;
        let mut rows = range.rows();

        let headers = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| to_cell(cell).render())
                .collect(),
            None => Vec::new(),
        };
        let data: Vec<Vec<CellValue>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

        tracing::debug!(
            "Loaded sheet '{}' from {} ({} data rows)",
            sheet,
            self.path.display(),
            data.len()
        );

        Ok(SheetTable::new(sheet, headers, data))
    }
}
