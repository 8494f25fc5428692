// Adapters - External system implementations

pub mod exec_process;
pub mod fs_local;
pub mod toml_config;

// Re-export adapters
pub use exec_process::TokioProcessAdapter;
pub use fs_local::LocalFsAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter, ToolsConfig};
