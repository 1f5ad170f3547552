//! 候補ファイルプール
//!
//! 実行全体で共有され、照合済みのファイルは取り除かれる。順序はディレクトリ一覧の挿入順。

use serde::Serialize;

const PDF_EXTENSION: &str = ".pdf";

/// PDFファイル名か（大文字小文字を区別）
pub fn is_pdf(file_name: &str) -> bool {
    file_name.ends_with(PDF_EXTENSION)
}

/// 未照合ファイル名の集合
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    files: Vec<String>,
}

impl CandidatePool {
    /// 重複は最初の出現のみ残す
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::default();
        for file in files {
            let file = file.into();
            if !pool.contains(&file) {
                pool.files.push(file);
            }
        }
        pool
    }

    /// 現時点の複製。走査中にプール本体を変更するため、走査は常にこちらで行う
    pub fn snapshot(&self) -> Vec<String> {
        self.files.clone()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| f == file_name)
    }

    /// 取り除けた場合 true
    pub fn remove(&mut self, file_name: &str) -> bool {
        match self.files.iter().position(|f| f == file_name) {
            Some(index) => {
                self.files.remove(index);
                true
            }
            None => false,
        }
    }

    /// 残っているPDFファイル
    pub fn remaining_pdfs(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str).filter(|f| is_pdf(f))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 照合中に発生したイベント（発生順）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    Copied { code: String, file: String },
    CopyFailed { code: String, file: String, reason: String },
}

/// 1シート分の照合結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reconciliation {
    pub events: Vec<MatchEvent>,
}

impl Reconciliation {
    pub fn copied_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MatchEvent::Copied { .. }))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.events.len() - self.copied_count()
    }
}

/// コードごとにプールを部分一致で照合する
///
/// `copy(code, file)` が成功したファイルはプールから取り除かれ、そのコードの走査を終える。
/// 失敗した場合は同じコードで次の候補を試す。一致しないコードは何も記録しない。
pub fn reconcile<C, S, F>(codes: C, pool: &mut CandidatePool, mut copy: F) -> Reconciliation
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str, &str) -> std::result::Result<(), String>,
{
    let mut result = Reconciliation::default();

    for code in codes {
        let code = code.as_ref();

        for file in pool.snapshot() {
            if !is_pdf(&file) || !file.contains(code) {
                continue;
            }

            match copy(code, &file) {
                Ok(()) => {
                    pool.remove(&file);
                    result.events.push(MatchEvent::Copied {
                        code: code.to_string(),
                        file,
                    });
                    break;
                }
                Err(reason) => {
                    result.events.push(MatchEvent::CopyFailed {
                        code: code.to_string(),
                        file,
                        reason,
                    });
                }
            }
        }
    }

    result
}
