//! 実行全体の制御
//!
//! ## 処理フロー
//! 1. 全名簿の部屋割り集計（ログに記録）
//! 2. 全名簿のコード照合とPDFコピー（候補プールは実行全体で共有）
//! 3. 照合されなかったPDFを未照合フォルダへコピー

use crate::config::Config;
use crate::error::Result;
use crate::matcher::{self, SpreadsheetOutcome};
use crate::run_log::RunLog;
use crate::scanner::{self, SpreadsheetInfo};
use crate::{transfer, workbook};
use chrono::NaiveDateTime;
use grouplist_common::{CandidatePool, OccupancyAnalyzer, RoomSummary};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 名簿1件分の部屋割り集計
#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    pub file_name: String,
    pub summary: Option<RoomSummary>,
    pub error: Option<String>,
}

/// 実行結果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub log_path: PathBuf,
    pub occupancy: Vec<OccupancyReport>,
    pub spreadsheets: Vec<SpreadsheetOutcome>,
    pub unrecognized_folder: PathBuf,
    /// 未照合フォルダへコピーできた件数
    pub unrecognized: usize,
}

impl RunReport {
    pub fn total_copied(&self) -> usize {
        self.spreadsheets.iter().map(|s| s.copied()).sum()
    }
}

pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    /// `config` は検証済みであること
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 部屋割り集計のみ（ログファイル・ファイル操作なし）
    pub fn occupancy_only(&self) -> Result<Vec<OccupancyReport>> {
        let sheets = scanner::list_spreadsheets(&self.config.config_folder)?;
        let mut analyzer = OccupancyAnalyzer::new();
        Ok(sheets
            .iter()
            .map(|sheet| self.analyze(&mut analyzer, sheet))
            .collect())
    }

    fn analyze(&self, analyzer: &mut OccupancyAnalyzer, sheet: &SpreadsheetInfo) -> OccupancyReport {
        analyzer.reset();
        match workbook::room_numbers(&sheet.path, &self.config.sheet_name, &self.config.room_column) {
            Ok(rooms) => {
                analyzer.push_rows(rooms);
                OccupancyReport {
                    file_name: sheet.file_name.clone(),
                    summary: Some(analyzer.summary()),
                    error: None,
                }
            }
            Err(e) => {
                warn!("部屋割り集計をスキップ {}: {}", sheet.file_name, e);
                OccupancyReport {
                    file_name: sheet.file_name.clone(),
                    summary: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// 全体を実行する
    pub fn run(&self, now: NaiveDateTime) -> Result<RunReport> {
        let config = &self.config;
        let mut log = RunLog::create(&config.config_folder, now)?;
        info!("ログファイル: {}", log.path().display());

        let sheets = scanner::list_spreadsheets(&config.config_folder)?;
        info!("{} 件の名簿を検出", sheets.len());

        let occupancy = self.occupancy_pass(&sheets, &mut log)?;

        let mut pool = CandidatePool::new(scanner::list_source_files(&config.source_folder)?);
        info!("候補ファイル: {} 件", pool.len());

        let mut spreadsheets = Vec::with_capacity(sheets.len());
        for sheet in &sheets {
            let outcome = matcher::match_spreadsheet(sheet, config, &mut pool, &mut log)?;
            info!(
                "{}: {} 件コピー・{} 件失敗（コード {} 件）",
                outcome.file_name,
                outcome.copied(),
                outcome.reconciliation.failure_count(),
                outcome.codes
            );
            spreadsheets.push(outcome);
        }

        let unrecognized_folder = config.unrecognized_folder();
        let unrecognized = flush_unrecognized(&pool, &config.source_folder, &unrecognized_folder, &mut log)?;

        log.line(&format!("Total unrecognized PDF files: {}", unrecognized))?;
        log.line("Processing completed.")?;

        Ok(RunReport {
            log_path: log.path().to_path_buf(),
            occupancy,
            spreadsheets,
            unrecognized_folder,
            unrecognized,
        })
    }

    fn occupancy_pass(&self, sheets: &[SpreadsheetInfo], log: &mut RunLog) -> Result<Vec<OccupancyReport>> {
        let mut analyzer = OccupancyAnalyzer::new();
        let mut reports = Vec::with_capacity(sheets.len());

        for sheet in sheets {
            let report = self.analyze(&mut analyzer, sheet);
            match (&report.summary, &report.error) {
                (Some(summary), _) => {
                    log.line(&format!("Room Occupancy Summary for {}:", report.file_name))?;
                    log.block(&summary.to_string())?;
                }
                (None, Some(e)) => {
                    log.line(&format!("Error reading {}: {}", report.file_name, e))?;
                    log.blank()?;
                }
                (None, None) => {}
            }
            reports.push(report);
        }

        Ok(reports)
    }
}

/// プールに残ったPDFを未照合フォルダへコピーし、成功件数を返す
fn flush_unrecognized(
    pool: &CandidatePool,
    source_folder: &Path,
    unrecognized_folder: &Path,
    log: &mut RunLog,
) -> Result<usize> {
    if let Err(e) = fs::create_dir_all(unrecognized_folder) {
        error!("未照合フォルダを作成できません {}: {}", unrecognized_folder.display(), e);
        log.line(&format!(
            "Error creating unrecognized folder {}: {}",
            unrecognized_folder.display(),
            e
        ))?;
    }

    let mut count = 0;
    for file in pool.remaining_pdfs() {
        match transfer::copy_preserving(&source_folder.join(file), unrecognized_folder) {
            Ok(_) => {
                log.line(&format!(
                    "Unrecognized PDF {} copied to {}",
                    file,
                    unrecognized_folder.display()
                ))?;
                count += 1;
            }
            Err(e) => {
                warn!("未照合PDFのコピー失敗 {}: {}", file, e);
                log.line(&format!("Error processing unrecognized file {}: {}", file, e))?;
            }
        }
    }

    Ok(count)
}
