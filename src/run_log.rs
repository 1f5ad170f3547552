//! 実行ログ（1回の実行につき1ファイル）

use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_SUFFIX: &str = "GroupList.log";

/// ログファイル名: `<YYYYMMDD-HHMMSS>-GroupList.log`
pub fn log_file_name(now: NaiveDateTime) -> String {
    format!("{}-{}", now.format("%Y%m%d-%H%M%S"), LOG_SUFFIX)
}

pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// `dir` にログファイルを作成し、開始行を書き込む
    pub fn create(dir: &Path, now: NaiveDateTime) -> std::io::Result<Self> {
        let path = dir.join(log_file_name(now));
        let file = File::create(&path)?;
        let mut log = Self {
            path,
            writer: BufWriter::new(file),
        };

        log.line(&format!("Log started on {}", now.format("%Y-%m-%d %H:%M:%S")))?;
        log.blank()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    pub fn blank(&mut self) -> std::io::Result<()> {
        self.line("")
    }

    /// 複数行のブロック（末尾に空行）
    pub fn block(&mut self, text: &str) -> std::io::Result<()> {
        self.line(text.trim_end_matches('\n'))?;
        self.blank()
    }
}
