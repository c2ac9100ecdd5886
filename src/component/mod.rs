//! 功能元件模組
//!
//! 每個子模組對應一個指令，包含主要邏輯和互動流程

pub mod configure;
pub mod extract;
pub mod setup;

pub use configure::ConfigureWorkspace;
pub use extract::ExtractCommand;
pub use setup::SetupCommand;
