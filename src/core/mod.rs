pub mod choices;
pub mod engine;
pub mod pipeline;
pub mod summation;

pub use crate::domain::model::{
    CellValue, ChoiceList, ColumnLayout, FilterColumn, FilterCriteria, Settings, SheetTable,
    SumOutcome,
};
pub use crate::domain::ports::{Pipeline, SettingsStore, WorkbookSource};
pub use crate::utils::error::Result;
