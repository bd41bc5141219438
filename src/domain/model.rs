use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 工作表中的單一儲存格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 數值儲存格直接回傳；文字儲存格嘗試解析為數字
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// 下拉選單與比對所用的文字表示
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        }
    }
}

/// 最短可往返的數字表示，`2.0` 顯示為 `2`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// 從活頁簿讀入的工作表：第一列為欄名，其餘為資料列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn require_column(&self, column: &str) -> crate::utils::error::Result<usize> {
        self.column_index(column)
            .ok_or_else(|| crate::utils::error::SumLoadError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// 較短的資料列視缺少的欄位為空白
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, col))
    }
}

/// 各欄位在工作表中的欄名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub proc: String,
    pub thick: String,
    pub width: String,
    pub length: String,
    pub effective_area: String,
    pub done: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            proc: "Proc.".to_string(),
            thick: "Thick.".to_string(),
            width: "Width".to_string(),
            length: "Length".to_string(),
            effective_area: "Eff.sqm".to_string(),
            done: "Done".to_string(),
        }
    }
}

/// 可供篩選的四個欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Proc,
    Thick,
    Width,
    Length,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Proc,
        FilterColumn::Thick,
        FilterColumn::Width,
        FilterColumn::Length,
    ];

    pub fn header<'a>(&self, layout: &'a ColumnLayout) -> &'a str {
        match self {
            FilterColumn::Proc => &layout.proc,
            FilterColumn::Thick => &layout.thick,
            FilterColumn::Width => &layout.width,
            FilterColumn::Length => &layout.length,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, FilterColumn::Proc)
    }

    pub fn saved_value<'a>(&self, settings: &'a Settings) -> Option<&'a str> {
        match self {
            FilterColumn::Proc => settings.proc.as_deref(),
            FilterColumn::Thick => settings.thick.as_deref(),
            FilterColumn::Width => settings.width.as_deref(),
            FilterColumn::Length => settings.length.as_deref(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterColumn::Proc => "proc",
            FilterColumn::Thick => "thick",
            FilterColumn::Width => "width",
            FilterColumn::Length => "length",
        }
    }
}

/// 求和的篩選條件
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub proc: String,
    pub thick: f64,
    pub width: f64,
    pub length: f64,
}

impl FilterCriteria {
    /// 解析使用者選擇的值。數值欄位無法解析時回傳 `Ok(None)`（視為查無資料）；
    /// 含 `,` 的小數則回報 `CommaDecimal`
    pub fn parse(
        proc: &str,
        thick: &str,
        width: &str,
        length: &str,
    ) -> crate::utils::error::Result<Option<Self>> {
        let fields = [("thick", thick), ("width", width), ("length", length)];
        let mut numbers = [0.0_f64; 3];

        for (slot, (field, raw)) in numbers.iter_mut().zip(fields) {
            let raw = raw.trim();
            if raw.contains(',') {
                return Err(crate::utils::error::SumLoadError::CommaDecimal {
                    column: field.to_string(),
                });
            }
            match raw.parse::<f64>() {
                Ok(n) => *slot = n,
                Err(_) => return Ok(None),
            }
        }

        Ok(Some(Self {
            proc: proc.trim().to_string(),
            thick: numbers[0],
            width: numbers[1],
            length: numbers[2],
        }))
    }
}

/// 單一欄位的下拉選項
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceList {
    pub column: String,
    pub values: Vec<String>,
    /// 不同的文字解析為相同數值（例如 `2.6` 與 `2.60`）
    pub imprecise: bool,
    pub default: Option<String>,
}

impl ChoiceList {
    /// 上次使用的值若仍在選項中，將其設為預設選擇
    pub fn select_default(&mut self, saved: Option<&str>) {
        self.default = saved
            .filter(|s| self.values.iter().any(|v| v == s))
            .map(str::to_string);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SumOutcome {
    Found {
        total: f64,
        matched_rows: usize,
        /// 起算的資料列（0 起算），來自最後一個完成標記
        start_row: usize,
    },
    NothingFound,
}

/// 上次使用的選擇，以 JSON 保存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub file_path: Option<String>,
    pub sheet_name: Option<String>,
    pub proc: Option<String>,
    pub thick: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
}

impl Settings {
    /// 寬鬆解析：每個鍵各自讀取，型別不符的鍵視為未設定
    pub fn from_json_value(value: &Value) -> Self {
        let field = |key: &str| match value.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            file_path: field("file_path"),
            sheet_name: field("sheet_name"),
            proc: field("proc"),
            thick: field("thick"),
            length: field("length"),
            width: field("width"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_numbers_and_text() {
        assert_eq!(CellValue::Number(2.0).render(), "2");
        assert_eq!(CellValue::Number(2.5).render(), "2.5");
        assert_eq!(CellValue::Text(" CUT ".to_string()).render(), "CUT");
        assert_eq!(CellValue::Bool(true).render(), "True");
        assert!(CellValue::Text("   ".to_string()).is_empty());
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let table = SheetTable::new(
            "Load",
            vec!["A".to_string(), "B".to_string()],
            vec![vec![CellValue::Number(1.0)]],
        );
        assert_eq!(table.cell(0, 1), &CellValue::Empty);
        assert_eq!(table.cell(5, 0), &CellValue::Empty);
        assert!(table.require_column("C").is_err());
    }

    #[test]
    fn test_criteria_parse() {
        let criteria = FilterCriteria::parse("CUT", "2.5", " 1000 ", "3000").unwrap().unwrap();
        assert_eq!(criteria.thick, 2.5);
        assert_eq!(criteria.width, 1000.0);

        assert!(FilterCriteria::parse("CUT", "Select", "1000", "3000").unwrap().is_none());
        assert!(FilterCriteria::parse("CUT", "2,5", "1000", "3000").is_err());
    }

    #[test]
    fn test_settings_lenient_parse() {
        let value = json!({
            "file_path": "/tmp/load.xlsx",
            "sheet_name": null,
            "proc": "CUT",
            "thick": 2.5,
            "width": ["unexpected"],
            "extra": true
        });
        let settings = Settings::from_json_value(&value);
        assert_eq!(settings.file_path.as_deref(), Some("/tmp/load.xlsx"));
        assert_eq!(settings.sheet_name, None);
        assert_eq!(settings.thick.as_deref(), Some("2.5"));
        assert_eq!(settings.width, None);
    }

    #[test]
    fn test_select_default_only_when_present() {
        let mut list = ChoiceList {
            column: "Width".to_string(),
            values: vec!["1000".to_string(), "1250".to_string()],
            imprecise: false,
            default: None,
        };
        list.select_default(Some("1250"));
        assert_eq!(list.default.as_deref(), Some("1250"));
        list.select_default(Some("1500"));
        assert_eq!(list.default, None);
    }
}
