pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const SETTINGS_FILE_NAME: &str = "SumLoadDefaultSettings.json";
pub const ERROR_LOG_FILE_NAME: &str = "SumLoadErrors.log";

/// 預設資料目錄：執行檔所在目錄，取不到時使用目前目錄
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sumload")]
#[command(about = "Sum the effective area of Excel load rows matching process, thickness, width and length")]
pub struct CliConfig {
    /// Path to the JSON file holding the last used selection
    #[arg(long, global = true)]
    pub settings: Option<String>,

    /// Path to the error log file
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// Optional TOML configuration (column names, excluded values, file locations)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the sheets of a workbook
    Sheets(WorkbookArgs),
    /// Show the selectable values of the filter columns
    Choices(SheetArgs),
    /// Sum the effective area of the matching rows
    Sum(SumArgs),
    /// Copy the error log into a directory
    ExportLog {
        /// Target directory
        dir: String,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct WorkbookArgs {
    /// Excel workbook (.xlsx / .xls); defaults to the last used one
    #[arg(short, long)]
    pub file: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct SheetArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Sheet name; defaults to the last used one
    #[arg(short, long)]
    pub sheet: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct SumArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    #[arg(long)]
    pub proc: Option<String>,

    #[arg(long)]
    pub thick: Option<String>,

    #[arg(long)]
    pub width: Option<String>,

    #[arg(long)]
    pub length: Option<String>,
}
