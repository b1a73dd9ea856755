pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AnyCodec, CsvCodec, LocalStorage, XlsxCodec};
pub use config::toml_config::TomlConfig;
pub use core::{
    engine::{GroupingEngine, RunReport},
    partition::{partition, GroupMode, GroupSizing},
    session::Session,
};
pub use domain::model::{Attribute, Cell, Member, PartitionResult, SheetFormat};
pub use utils::error::{GroupingError, Result};
