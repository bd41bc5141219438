use crate::domain::model::{format_number, ChoiceList, SheetTable};
use crate::utils::error::{Result, SumLoadError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceOptions {
    /// 從選項中剔除的值
    pub exclude: Vec<String>,
}

impl Default for ChoiceOptions {
    fn default() -> Self {
        Self {
            exclude: vec!["nun".to_string(), "4".to_string()],
        }
    }
}

/// 取得欄位的下拉選項：去重、剔除排除值；數值欄位依數值排序
///
/// `numeric` 欄位若出現 `,` 小數分隔符號則回報 `CommaDecimal`。
pub fn unique_values(
    table: &SheetTable,
    column: &str,
    numeric: bool,
    options: &ChoiceOptions,
) -> Result<ChoiceList> {
    let idx = table.require_column(column)?;

    let mut seen = HashSet::new();
    let mut values: Vec<String> = table
        .column_cells(idx)
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.render())
        .filter(|text| seen.insert(text.clone()))
        .collect();

    values.retain(|v| !options.exclude.iter().any(|e| e == v));

    if numeric && values.iter().any(|v| v.contains(',')) {
        return Err(SumLoadError::CommaDecimal {
            column: column.to_string(),
        });
    }

    // 文字欄位保留原始文字（例如 `01`），否則與求和時的比對不一致
    let parsed: Option<Vec<f64>> = if numeric {
        values.iter().map(|v| v.parse::<f64>().ok()).collect()
    } else {
        None
    };

    let mut imprecise = false;
    if let Some(mut numbers) = parsed {
        numbers.sort_by(|a, b| a.total_cmp(b));
        let before = numbers.len();
        numbers.dedup_by(|a, b| a.total_cmp(b).is_eq());
        imprecise = numbers.len() != before;

        if imprecise {
            tracing::warn!(
                "⚠️ Column '{}' has values that differ only in formatting (e.g. 2.6 and 2.60), sums may be inexact",
                column
            );
        }

        values = numbers.into_iter().map(format_number).collect();
    }

    tracing::debug!("Column '{}' has {} choices", column, values.len());

    Ok(ChoiceList {
        column: column.to_string(),
        values,
        imprecise,
        default: None,
    })
}
