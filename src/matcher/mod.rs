//! 名簿1件分の照合・コピー・フォルダ名変更

use crate::config::{Config, RenameConflictPolicy};
use crate::error::{GroupListError, Result};
use crate::run_log::RunLog;
use crate::scanner::SpreadsheetInfo;
use crate::{transfer, workbook};
use grouplist_common::{reconcile, CandidatePool, MatchEvent, Reconciliation};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// 名簿ごとの仕分け先フォルダ（`<config_folder>/<名簿名>`）
#[derive(Debug, Clone)]
pub struct DestinationFolder {
    path: PathBuf,
}

impl DestinationFolder {
    /// フォルダがなければ作成する
    pub fn prepare(config_folder: &Path, sheet: &SpreadsheetInfo) -> std::io::Result<Self> {
        let path = config_folder.join(sheet.stem());
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 件数付きの名前: `<path>_<count>`
    pub fn renamed_path(&self, count: usize) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(format!("_{}", count));
        PathBuf::from(name)
    }

    /// コピー件数が1以上なら件数付きの名前に変更し、最終的なパスを返す
    pub fn finalize(
        &self,
        count: usize,
        policy: RenameConflictPolicy,
        log: &mut RunLog,
    ) -> Result<PathBuf> {
        if count == 0 {
            return Ok(self.path.clone());
        }

        let target = self.renamed_path(count);
        if target.exists() {
            log.line(&format!(
                "Rename conflict: {} already exists, {} was not renamed",
                target.display(),
                self.path.display()
            ))?;
            return match policy {
                RenameConflictPolicy::Skip => {
                    warn!("リネーム先が既に存在します: {}", target.display());
                    Ok(self.path.clone())
                }
                RenameConflictPolicy::Fail => {
                    Err(GroupListError::RenameConflict(target.display().to_string()))
                }
            };
        }

        match fs::rename(&self.path, &target) {
            Ok(()) => {
                log.line(&format!(
                    "Renamed {} to {}",
                    self.path.display(),
                    target.display()
                ))?;
                Ok(target)
            }
            Err(e) => {
                error!("リネーム失敗 {}: {}", self.path.display(), e);
                log.line(&format!("Error renaming {}: {}", self.path.display(), e))?;
                Ok(self.path.clone())
            }
        }
    }
}

/// 名簿1件分の結果
#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetOutcome {
    pub file_name: String,
    /// 抽出したコード数
    pub codes: usize,
    pub reconciliation: Reconciliation,
    /// 最終的な仕分け先フォルダ（作成できなかった場合は None）
    pub destination: Option<PathBuf>,
    /// コード抽出・フォルダ作成の失敗内容
    pub error: Option<String>,
}

impl SpreadsheetOutcome {
    pub fn copied(&self) -> usize {
        self.reconciliation.copied_count()
    }
}

/// 名簿1件を照合する
///
/// 読み込み失敗・表頭なし・コピー失敗はログに残して続行する。
/// `Err` になるのはログ書き込み失敗とリネーム衝突（`fail` 指定時）のみ。
pub fn match_spreadsheet(
    sheet: &SpreadsheetInfo,
    config: &Config,
    pool: &mut CandidatePool,
    log: &mut RunLog,
) -> Result<SpreadsheetOutcome> {
    let mut outcome = SpreadsheetOutcome {
        file_name: sheet.file_name.clone(),
        codes: 0,
        reconciliation: Reconciliation::default(),
        destination: None,
        error: None,
    };

    let destination = match DestinationFolder::prepare(&config.config_folder, sheet) {
        Ok(d) => d,
        Err(e) => {
            error!("フォルダ作成失敗 {}: {}", sheet.file_name, e);
            log.line(&format!(
                "Error creating destination folder for {}: {}",
                sheet.file_name, e
            ))?;
            outcome.error = Some(e.to_string());
            return Ok(outcome);
        }
    };

    let extraction = workbook::extract_codes(&sheet.path, &config.sheet_name, &config.header);
    if let Some(line) = extraction.log_line(&sheet.file_name) {
        log.line(&line)?;
    }
    outcome.error = extraction.problem.as_ref().map(|e| e.to_string());
    let codes = extraction.codes;
    outcome.codes = codes.len();

    let source_folder = &config.source_folder;
    let reconciliation = reconcile(&codes, pool, |code, file| {
        debug!("照合: {} -> {}", code, file);
        transfer::copy_preserving(&source_folder.join(file), destination.path())
            .map(|_| ())
            .map_err(|e| e.to_string())
    });

    for event in &reconciliation.events {
        match event {
            MatchEvent::Copied { code, file } => log.line(&format!(
                "Copied {} to {} for code {}",
                file,
                destination.path().display(),
                code
            ))?,
            MatchEvent::CopyFailed { file, reason, .. } => {
                warn!("コピー失敗 {}: {}", file, reason);
                log.line(&format!("Error processing file {}: {}", file, reason))?
            }
        }
    }

    let count = reconciliation.copied_count();
    outcome.destination = Some(destination.finalize(count, config.on_rename_conflict, log)?);
    outcome.reconciliation = reconciliation;

    Ok(outcome)
}
