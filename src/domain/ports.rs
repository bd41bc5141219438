use crate::domain::model::{Settings, SheetTable};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 活頁簿來源；讀取為阻塞操作，由呼叫端決定是否移至 blocking pool
pub trait WorkbookSource: Send + Sync {
    fn sheet_names(&self) -> Result<Vec<String>>;
    fn read_sheet(&self, sheet: &str) -> Result<SheetTable>;
}

pub trait SettingsStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Settings> + Send;
    fn save(&self, settings: &Settings) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Output: Send;

    async fn extract(&self) -> Result<SheetTable>;
    async fn transform(&self, table: SheetTable) -> Result<Self::Output>;
    async fn load(&self, output: Self::Output) -> Result<Self::Output>;
}
