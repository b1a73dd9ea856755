pub mod engine;
pub mod export;
pub mod ingest;
pub mod partition;
pub mod report;
pub mod session;
pub mod summary;

pub use crate::domain::model::{Cell, Group, Member, PartitionResult, Row};
pub use crate::domain::ports::{ConfigProvider, SheetCodec, Storage};
pub use crate::utils::error::Result;
