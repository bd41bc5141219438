use crate::core::choices::{unique_values, ChoiceOptions};
use crate::core::summation::sum_effective_area;
use crate::core::{
    ChoiceList, ColumnLayout, FilterColumn, FilterCriteria, Pipeline, Settings, SettingsStore,
    SheetTable, SumOutcome, WorkbookSource,
};
use crate::utils::error::{Result, SumLoadError};
use std::sync::Arc;

/// 在 blocking pool 讀取工作表
async fn read_sheet_blocking<W: WorkbookSource + 'static>(
    source: &Arc<W>,
    sheet: &str,
) -> Result<SheetTable> {
    let source = Arc::clone(source);
    let sheet = sheet.to_string();

    tokio::task::spawn_blocking(move || source.read_sheet(&sheet))
        .await
        .map_err(|e| SumLoadError::ProcessingError {
            message: format!("Workbook reader task failed: {}", e),
        })?
}

/// 使用者對一次求和所做的選擇
#[derive(Debug, Clone, PartialEq)]
pub struct SumRequest {
    pub file_path: String,
    pub sheet_name: String,
    pub proc: String,
    pub thick: String,
    pub width: String,
    pub length: String,
}

impl SumRequest {
    pub fn to_settings(&self) -> Settings {
        Settings {
            file_path: Some(self.file_path.clone()),
            sheet_name: Some(self.sheet_name.clone()),
            proc: Some(self.proc.clone()),
            thick: Some(self.thick.clone()),
            length: Some(self.length.clone()),
            width: Some(self.width.clone()),
        }
    }
}

pub struct SumPipeline<W: WorkbookSource, S: SettingsStore> {
    source: Arc<W>,
    store: S,
    layout: ColumnLayout,
    request: SumRequest,
}

impl<W: WorkbookSource, S: SettingsStore> SumPipeline<W, S> {
    pub fn new(source: W, store: S, layout: ColumnLayout, request: SumRequest) -> Self {
        Self {
            source: Arc::new(source),
            store,
            layout,
            request,
        }
    }
}

#[async_trait::async_trait]
impl<W: WorkbookSource + 'static, S: SettingsStore> Pipeline for SumPipeline<W, S> {
    type Output = SumOutcome;

    async fn extract(&self) -> Result<SheetTable> {
        // 不論計算成功與否，選擇都先保存
        self.store.save(&self.request.to_settings()).await?;
        tracing::debug!("Saved selection for sheet '{}'", self.request.sheet_name);

        read_sheet_blocking(&self.source, &self.request.sheet_name).await
    }

    async fn transform(&self, table: SheetTable) -> Result<SumOutcome> {
        let request = &self.request;
        let criteria =
            match FilterCriteria::parse(&request.proc, &request.thick, &request.width, &request.length)? {
                Some(criteria) => criteria,
                None => {
                    tracing::debug!("Non-numeric filter value, nothing to sum");
                    return Ok(SumOutcome::NothingFound);
                }
            };

        sum_effective_area(&table, &self.layout, &criteria)
    }

    async fn load(&self, outcome: SumOutcome) -> Result<SumOutcome> {
        match &outcome {
            SumOutcome::Found {
                total,
                matched_rows,
                start_row,
            } => tracing::info!(
                "✅ Sum {} over {} rows (from data row {})",
                total,
                matched_rows,
                start_row
            ),
            SumOutcome::NothingFound => tracing::info!("🔍 Nothing found for these filters"),
        }
        Ok(outcome)
    }
}

pub struct ChoicesPipeline<W: WorkbookSource> {
    source: Arc<W>,
    sheet: String,
    layout: ColumnLayout,
    options: ChoiceOptions,
    saved: Settings,
}

impl<W: WorkbookSource> ChoicesPipeline<W> {
    pub fn new(
        source: W,
        sheet: String,
        layout: ColumnLayout,
        options: ChoiceOptions,
        saved: Settings,
    ) -> Self {
        Self {
            source: Arc::new(source),
            sheet,
            layout,
            options,
            saved,
        }
    }
}

#[async_trait::async_trait]
impl<W: WorkbookSource + 'static> Pipeline for ChoicesPipeline<W> {
    type Output = Vec<ChoiceList>;

    async fn extract(&self) -> Result<SheetTable> {
        read_sheet_blocking(&self.source, &self.sheet).await
    }

    async fn transform(&self, table: SheetTable) -> Result<Vec<ChoiceList>> {
        FilterColumn::ALL
            .iter()
            .map(|column| {
                unique_values(
                    &table,
                    column.header(&self.layout),
                    column.is_numeric(),
                    &self.options,
                )
            })
            .collect()
    }

    async fn load(&self, mut lists: Vec<ChoiceList>) -> Result<Vec<ChoiceList>> {
        for (list, column) in lists.iter_mut().zip(FilterColumn::ALL) {
            list.select_default(column.saved_value(&self.saved));
        }
        Ok(lists)
    }
}
