use crate::adapters::{CalamineWorkbook, JsonSettingsStore};
use crate::config::toml_config::TomlConfig;
use crate::core::engine::SumEngine;
use crate::core::pipeline::{ChoicesPipeline, SumPipeline, SumRequest};
use crate::core::{ChoiceList, FilterColumn, Settings, SettingsStore, SumOutcome, WorkbookSource};
use crate::utils::error::{Result, SumLoadError};
use crate::utils::validation::{validate_path, validate_required_field, validate_workbook_path};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// 一次求和的選擇；未提供的欄位沿用上次保存的值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SumSelection {
    pub file: Option<String>,
    pub sheet: Option<String>,
    pub proc: Option<String>,
    pub thick: Option<String>,
    pub width: Option<String>,
    pub length: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetListing {
    pub file: String,
    pub sheets: Vec<String>,
    pub default: Option<String>,
}

pub struct App {
    store: JsonSettingsStore,
    config: TomlConfig,
    error_log: PathBuf,
}

impl App {
    pub fn new(store: JsonSettingsStore, config: TomlConfig, error_log: impl Into<PathBuf>) -> Self {
        Self {
            store,
            config,
            error_log: error_log.into(),
        }
    }

    pub fn error_log(&self) -> &Path {
        &self.error_log
    }

    /// 讀取保存的選擇；已不存在的活頁簿路徑會被忽略
    pub async fn saved_settings(&self) -> Settings {
        let mut settings = self.store.load().await;
        if let Some(path) = &settings.file_path {
            if !Path::new(path).exists() {
                tracing::debug!("Saved workbook {} no longer exists", path);
                settings.file_path = None;
            }
        }
        settings
    }

    fn resolve_workbook(file: Option<&str>, saved: &Settings) -> Result<String> {
        let file = file
            .map(str::to_string)
            .or_else(|| saved.file_path.clone())
            .ok_or(SumLoadError::NoWorkbookSelected)?;
        validate_workbook_path("file", &file)?;
        Ok(file)
    }

    async fn sheet_names(file: &str) -> Result<Vec<String>> {
        let workbook = CalamineWorkbook::new(file);
        tokio::task::spawn_blocking(move || workbook.sheet_names())
            .await
            .map_err(|e| SumLoadError::ProcessingError {
                message: format!("Workbook reader task failed: {}", e),
            })?
    }

    /// 明確指定的工作表優先；否則沿用保存的工作表（需仍存在）；活頁簿只有一張表時直接使用
    async fn resolve_sheet(file: &str, sheet: Option<&str>, saved: &Settings) -> Result<String> {
        if let Some(sheet) = sheet {
            return Ok(sheet.to_string());
        }

        let names = Self::sheet_names(file).await?;
        if let Some(saved_sheet) = saved.sheet_name.as_deref() {
            if names.iter().any(|n| n == saved_sheet) {
                return Ok(saved_sheet.to_string());
            }
        }

        match names.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(SumLoadError::MissingConfigError {
                field: "sheet".to_string(),
            }),
        }
    }

    pub async fn sheets(&self, file: Option<&str>) -> Result<SheetListing> {
        let saved = self.saved_settings().await;
        let file = Self::resolve_workbook(file, &saved)?;
        let sheets = Self::sheet_names(&file).await?;

        let default = saved
            .sheet_name
            .filter(|name| sheets.iter().any(|s| s == name));

        Ok(SheetListing {
            file,
            sheets,
            default,
        })
    }

    pub async fn choices(&self, file: Option<&str>, sheet: Option<&str>) -> Result<Vec<ChoiceList>> {
        let saved = self.saved_settings().await;
        let file = Self::resolve_workbook(file, &saved)?;
        let sheet = Self::resolve_sheet(&file, sheet, &saved).await?;
        tracing::info!("🔎 Collecting choices from '{}' in {}", sheet, file);

        let pipeline = ChoicesPipeline::new(
            CalamineWorkbook::new(&file),
            sheet,
            self.config.columns.clone(),
            self.config.choices.clone(),
            saved,
        );
        SumEngine::new(pipeline).run().await
    }

    pub async fn sum(&self, selection: SumSelection) -> Result<SumOutcome> {
        let saved = self.saved_settings().await;
        let file = Self::resolve_workbook(selection.file.as_deref(), &saved)?;
        let sheet = Self::resolve_sheet(&file, selection.sheet.as_deref(), &saved).await?;

        let pick = |given: Option<String>, column: FilterColumn| -> Result<String> {
            let value = given.or_else(|| column.saved_value(&saved).map(str::to_string));
            let value = validate_required_field(column.label(), &value)?;
            Ok(value.clone())
        };

        let request = SumRequest {
            file_path: file,
            sheet_name: sheet,
            proc: pick(selection.proc, FilterColumn::Proc)?,
            thick: pick(selection.thick, FilterColumn::Thick)?,
            width: pick(selection.width, FilterColumn::Width)?,
            length: pick(selection.length, FilterColumn::Length)?,
        };
        tracing::info!(
            "➕ Summing '{}' in {}: proc={} thick={} width={} length={}",
            request.sheet_name,
            request.file_path,
            request.proc,
            request.thick,
            request.width,
            request.length
        );

        let pipeline = SumPipeline::new(
            CalamineWorkbook::new(&request.file_path),
            self.store.clone(),
            self.config.columns.clone(),
            request,
        );
        SumEngine::new(pipeline).run().await
    }

    /// 將錯誤日誌複製到指定目錄，回傳新檔案路徑
    pub fn export_log(&self, dir: &str) -> Result<PathBuf> {
        validate_path("dir", dir)?;

        let file_name = self
            .error_log
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| crate::config::ERROR_LOG_FILE_NAME.into());
        let target = Path::new(dir).join(file_name);

        fs::copy(&self.error_log, &target)?;
        tracing::info!("📁 Error log copied to {}", target.display());
        Ok(target)
    }
}

pub fn render_sheets(listing: &SheetListing) -> String {
    let mut out = format!("Sheets in {}:\n", listing.file);
    for sheet in &listing.sheets {
        let marker = if listing.default.as_deref() == Some(sheet.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, "{} {}", marker, sheet);
    }
    out
}

pub fn render_choices(lists: &[ChoiceList]) -> String {
    let mut out = String::new();
    for list in lists {
        let _ = writeln!(out, "{}:", list.column);
        if list.values.is_empty() {
            let _ = writeln!(out, "  (no values)");
        }
        for value in &list.values {
            let marker = if list.default.as_ref() == Some(value) { "*" } else { " " };
            let _ = writeln!(out, "{} {}", marker, value);
        }
        if list.imprecise {
            let _ = writeln!(
                out,
                "  INEXACT: '{}' has values that differ only in formatting (e.g. 2.6 and 2.60)",
                list.column
            );
        }
    }
    out
}

pub fn render_outcome(outcome: &SumOutcome) -> String {
    match outcome {
        SumOutcome::Found { total, .. } => format!("Sum for your filters: {}", total),
        SumOutcome::NothingFound => "Nothing found for these filters".to_string(),
    }
}
