use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupListError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("Excel読み込みエラー: {0}")]
    Workbook(String),

    #[error("ワークシートが見つかりません: {sheet} ({file})")]
    SheetNotFound { file: String, sheet: String },

    #[error("表頭 '{header}' が見つかりません: {file}")]
    HeaderNotFound { file: String, header: String },

    #[error("リネーム先が既に存在します: {0}")]
    RenameConflict(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GroupListError>;
