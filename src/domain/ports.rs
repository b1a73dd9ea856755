use crate::core::partition::GroupSizing;
use crate::domain::model::{Row, SheetFormat};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 外部試算表編解碼：bytes ↔ 二維儲存格
pub trait SheetCodec: Send + Sync {
    /// 解碼第一個工作表，第一列為標題列
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Row>>;
    fn encode(&self, sheet_name: &str, rows: &[Row]) -> Result<Vec<u8>>;
    fn format(&self) -> SheetFormat;

    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn export_prefix(&self) -> &str;
    fn sheet_name(&self) -> &str;
    fn output_format(&self) -> SheetFormat;
    fn sizing(&self) -> Result<GroupSizing>;
    fn seed(&self) -> Option<u64>;
}
