pub mod load;
pub mod types;
pub mod workspace;

pub use types::{
    DEFAULT_STRIDE, ExtractorSettings, FtypBrandTable, Language, Session, TransferMode,
    WorkspaceConfig,
};
