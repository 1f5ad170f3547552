//! テスト用の名簿・PDFを生成するヘルパー

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

pub enum Cell<'a> {
    Text(&'a str),
    Num(f64),
    Blank,
}

pub use Cell::{Blank, Num, Text};

/// 1行目を表頭として名簿を書き出す
pub fn write_roster(path: &Path, sheet_name: &str, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).expect("シート名の設定に失敗");

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r, c, *text).expect("文字列の書き込みに失敗");
                }
                Cell::Num(n) => {
                    worksheet.write_number(r, c, *n).expect("数値の書き込みに失敗");
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).expect("名簿の保存に失敗");
}

/// ダミーPDFを作成
pub fn touch_pdfs(folder: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(folder.join(name), b"%PDF-1.4 dummy").expect("PDFの作成に失敗");
    }
}

/// フォルダ直下のファイル名（ソート済み）
pub fn file_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(folder)
        .expect("フォルダの読み込みに失敗")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
