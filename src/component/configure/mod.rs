//! 目錄設定元件

mod main;

pub use main::ConfigureWorkspace;
