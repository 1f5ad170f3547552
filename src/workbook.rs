//! 名簿（.xlsx）の読み込み
//!
//! 使用範囲の1行目を表頭として扱う。

use crate::error::{GroupListError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use grouplist_common::{parse_room_number, require_column};
use std::path::Path;
use tracing::{debug, info, warn};

/// ワークシートを読み込む
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| GroupListError::Workbook(format!("{}: {}", path.display(), e)))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(GroupListError::SheetNotFound {
            file: path.display().to_string(),
            sheet: sheet_name.to_string(),
        });
    }

    workbook
        .worksheet_range(sheet_name)
        .map_err(|e| GroupListError::Workbook(format!("{}: {}", path.display(), e)))
}

/// セル値を文字列に変換
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // 番号が数値セルで入っている場合に "12345.0" にしない
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// 表頭行
pub fn header_row(range: &Range<Data>) -> Vec<String> {
    range
        .rows()
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default()
}

/// 表頭に `header` を含む列の空でない値を上から順に取り出す
///
/// 値は前後の空白を除く。
pub fn codes_from_range(range: &Range<Data>, header: &str) -> grouplist_common::Result<Vec<String>> {
    let column = require_column(header_row(range), header)?;

    let codes = range
        .rows()
        .skip(1)
        .filter_map(|row| row.get(column))
        .filter(|cell| !is_blank(cell))
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    Ok(codes)
}

/// コード抽出（失敗を呼び出し側で扱う版）
pub fn try_extract_codes(path: &Path, sheet_name: &str, header: &str) -> Result<Vec<String>> {
    let range = read_sheet(path, sheet_name)?;
    codes_from_range(&range, header).map_err(|_| GroupListError::HeaderNotFound {
        file: path.display().to_string(),
        header: header.to_string(),
    })
}

/// コード抽出の結果
#[derive(Debug)]
pub struct CodeExtraction {
    pub codes: Vec<String>,
    /// 読み込み失敗・表頭なしの内容（このとき `codes` は空）
    pub problem: Option<GroupListError>,
}

impl CodeExtraction {
    /// 実行ログに残す1行（問題がなければ None）
    pub fn log_line(&self, file_name: &str) -> Option<String> {
        self.problem.as_ref().map(|e| match e {
            GroupListError::HeaderNotFound { header, .. } => {
                format!("Header '{}' not found in {}", header, file_name)
            }
            _ => format!("Error reading {}: {}", file_name, e),
        })
    }
}

/// コード抽出
///
/// 読み込み失敗・表頭なしは空のリストとし、内容を `problem` と診断ログに残す。
pub fn extract_codes(path: &Path, sheet_name: &str, header: &str) -> CodeExtraction {
    match try_extract_codes(path, sheet_name, header) {
        Ok(codes) => {
            info!("{} 件のコードを抽出: {}", codes.len(), path.display());
            CodeExtraction { codes, problem: None }
        }
        Err(e) => {
            warn!("{}", e);
            CodeExtraction {
                codes: Vec::new(),
                problem: Some(e),
            }
        }
    }
}

fn room_from_cell(cell: &Data) -> Option<grouplist_common::Result<i64>> {
    match cell {
        _ if is_blank(cell) => None,
        Data::Int(i) => Some(Ok(*i)),
        Data::Float(f) => Some(Ok(f.trunc() as i64)),
        Data::String(s) => Some(parse_room_number(s)),
        other => Some(parse_room_number(&cell_to_string(other))),
    }
}

/// 行ごとの部屋番号（空欄は `None`）
///
/// 部屋番号列は表頭の完全一致（前後の空白は無視）で探す。
/// すべて空の行は人数に数えないため除外する。数値として読めない値は空欄扱い。
pub fn rooms_from_range(range: &Range<Data>, room_column: &str) -> Option<Vec<Option<i64>>> {
    let column = header_row(range)
        .iter()
        .position(|h| h.trim() == room_column.trim())?;

    let rooms = range
        .rows()
        .skip(1)
        .filter(|row| !row.iter().all(is_blank))
        .map(|row| match row.get(column).and_then(room_from_cell) {
            Some(Ok(room)) => Some(room),
            Some(Err(e)) => {
                warn!("{}（空欄として扱います）", e);
                None
            }
            None => None,
        })
        .collect();

    Some(rooms)
}

/// 部屋番号列を読み込む
pub fn room_numbers(path: &Path, sheet_name: &str, room_column: &str) -> Result<Vec<Option<i64>>> {
    let range = read_sheet(path, sheet_name)?;
    let rooms = rooms_from_range(&range, room_column).ok_or_else(|| {
        GroupListError::HeaderNotFound {
            file: path.display().to_string(),
            header: room_column.to_string(),
        }
    })?;
    debug!("{} 行の部屋番号を読み込み: {}", rooms.len(), path.display());
    Ok(rooms)
}
