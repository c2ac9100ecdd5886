use crate::config::types::FtypBrandTable;
use anyhow::{Context, Result};
use std::sync::LazyLock;

/// 編譯時嵌入的 ftyp 品牌表（不需要外部檔案）
const FTYP_BRAND_TABLE_JSON: &str = include_str!("../data/ftyp_brand_table.json");

static FTYP_BRAND_TABLE: LazyLock<FtypBrandTable> = LazyLock::new(|| {
    FtypBrandTable::load_embedded().expect("嵌入的 ftyp 品牌表格式錯誤")
});

impl FtypBrandTable {
    /// 從編譯時嵌入的 JSON 載入品牌表
    pub fn load_embedded() -> Result<Self> {
        serde_json::from_str(FTYP_BRAND_TABLE_JSON).context("無法解析嵌入的 ftyp 品牌表")
    }

    /// 全程共用的品牌表，第一次使用時解析
    pub fn embedded() -> &'static Self {
        &FTYP_BRAND_TABLE
    }
}
