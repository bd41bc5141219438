// Adapters layer: concrete implementations for external systems (workbooks, settings file).

pub mod storage;
pub mod workbook;

pub use storage::JsonSettingsStore;
pub use workbook::CalamineWorkbook;
