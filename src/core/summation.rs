use crate::domain::model::{ColumnLayout, FilterCriteria, SheetTable, SumOutcome};
use crate::utils::error::Result;

/// 完成標記的值
pub const DONE_TAG: &str = "X";

/// 最後一個標記為完成的資料列；沒有完成欄位或沒有標記時回傳 `None`
pub fn resume_row(table: &SheetTable, layout: &ColumnLayout) -> Option<usize> {
    let done = table.column_index(&layout.done)?;

    (0..table.rows.len()).rev().find(|&row| {
        table
            .cell(row, done)
            .render()
            .eq_ignore_ascii_case(DONE_TAG)
    })
}

/// 加總符合條件資料列的有效面積，只計算最後一個完成標記（含）之後的資料列
pub fn sum_effective_area(
    table: &SheetTable,
    layout: &ColumnLayout,
    criteria: &FilterCriteria,
) -> Result<SumOutcome> {
    let proc = table.require_column(&layout.proc)?;
    let thick = table.require_column(&layout.thick)?;
    let width = table.require_column(&layout.width)?;
    let length = table.require_column(&layout.length)?;
    let area = table.require_column(&layout.effective_area)?;

    let start_row = resume_row(table, layout).unwrap_or(0);
    if start_row > 0 {
        tracing::debug!("Resuming after done tag at data row {}", start_row);
    }

    let mut total = 0.0;
    let mut matched_rows = 0;

    for row in start_row..table.rows.len() {
        let matches = table.cell(row, proc).render() == criteria.proc
            && table.cell(row, thick).as_number() == Some(criteria.thick)
            && table.cell(row, width).as_number() == Some(criteria.width)
            && table.cell(row, length).as_number() == Some(criteria.length);

        if !matches {
            continue;
        }

        matched_rows += 1;
        // 空白或非數字的面積不計入
        if let Some(value) = table.cell(row, area).as_number().filter(|v| v.is_finite()) {
            total += value;
        }
    }

    tracing::debug!("{} rows matched, total {}", matched_rows, total);

    if total == 0.0 {
        return Ok(SumOutcome::NothingFound);
    }

    Ok(SumOutcome::Found {
        total,
        matched_rows,
        start_row,
    })
}
