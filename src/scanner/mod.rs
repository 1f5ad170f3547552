use crate::error::{GroupListError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

const SPREADSHEET_EXTENSION: &str = ".xlsx";
/// Excelの一時ファイル（ロックファイル）
const TEMP_FILE_PREFIX: &str = "~$";

#[derive(Debug, Clone)]
pub struct SpreadsheetInfo {
    pub path: PathBuf,
    pub file_name: String,
}

impl SpreadsheetInfo {
    /// 拡張子を除いたファイル名（仕分け先フォルダ名になる）
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_name.clone())
    }
}

/// 直下の通常ファイル名を列挙（再帰しない）
///
/// UTF-8 でないファイル名は元のパスに戻せないため警告して除外する。
fn list_file_names(folder: &Path) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(GroupListError::FolderNotFound(folder.display().to_string()));
    }

    let mut names: Vec<String> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| match e.file_name().to_str() {
            Some(name) => Some(name.to_string()),
            None => {
                warn!("UTF-8 でないファイル名を除外: {}", e.path().display());
                None
            }
        })
        .collect();

    // ファイル名でソート
    names.sort();
    Ok(names)
}

pub fn is_spreadsheet_name(file_name: &str) -> bool {
    !file_name.starts_with(TEMP_FILE_PREFIX) && file_name.ends_with(SPREADSHEET_EXTENSION)
}

/// 名簿フォルダ内の .xlsx を列挙
pub fn list_spreadsheets(folder: &Path) -> Result<Vec<SpreadsheetInfo>> {
    Ok(list_file_names(folder)?
        .into_iter()
        .filter(|name| is_spreadsheet_name(name))
        .map(|file_name| SpreadsheetInfo {
            path: folder.join(&file_name),
            file_name,
        })
        .collect())
}

/// PDFフォルダのファイル名一覧（候補プールの初期値）
///
/// PDF以外も含む。拡張子の判定は照合時に行う。
pub fn list_source_files(folder: &Path) -> Result<Vec<String>> {
    list_file_names(folder)
}
