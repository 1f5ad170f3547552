use crate::error::{GroupListError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// リネーム先フォルダが既に存在する場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameConflictPolicy {
    /// ログに記録してリネームしない（上書きはしない）
    #[default]
    Skip,
    /// 実行を中断する
    Fail,
}

impl std::str::FromStr for RenameConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(RenameConflictPolicy::Skip),
            "fail" => Ok(RenameConflictPolicy::Fail),
            _ => Err(format!("Unknown policy: {}. Use skip or fail", s)),
        }
    }
}

impl std::fmt::Display for RenameConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameConflictPolicy::Skip => write!(f, "skip"),
            RenameConflictPolicy::Fail => write!(f, "fail"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PDFの置き場所
    pub source_folder: PathBuf,
    /// 名簿（.xlsx）の置き場所。仕分け先フォルダとログもここに作る
    pub config_folder: PathBuf,
    /// 未照合PDFのコピー先（省略時: config_folder/unrecognized）
    pub unrecognized_folder: Option<PathBuf>,
    pub sheet_name: String,
    /// 照合コード列の表頭（部分一致）
    pub header: String,
    /// 部屋番号列の表頭
    pub room_column: String,
    pub on_rename_conflict: RenameConflictPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_folder: PathBuf::from("."),
            config_folder: PathBuf::from("."),
            unrecognized_folder: None,
            sheet_name: "Sheet1".into(),
            header: "护照".into(),
            room_column: "房间".into(),
            on_rename_conflict: RenameConflictPolicy::Skip,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// パス省略時は既定の場所を見て、なければデフォルト値を返す。
    /// 明示されたパスが存在しない場合はエラー。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else if explicit {
            Err(GroupListError::Config(format!(
                "設定ファイルが見つかりません: {}",
                config_path.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GroupListError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("grouplist").join("config.json"))
    }

    pub fn unrecognized_folder(&self) -> PathBuf {
        self.unrecognized_folder
            .clone()
            .unwrap_or_else(|| self.config_folder.join("unrecognized"))
    }

    /// 起動時の検証
    pub fn validate(&self) -> Result<()> {
        for folder in [&self.source_folder, &self.config_folder] {
            if !folder.is_dir() {
                return Err(GroupListError::FolderNotFound(folder.display().to_string()));
            }
        }

        let required = [
            ("sheet_name", &self.sheet_name),
            ("header", &self.header),
            ("room_column", &self.room_column),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(GroupListError::Config(format!("{} が空です", name)));
            }
        }

        if let Some(folder) = &self.unrecognized_folder {
            if folder.is_file() {
                return Err(GroupListError::Config(format!(
                    "unrecognized_folder がファイルです: {}",
                    folder.display()
                )));
            }
        }

        // PDFフォルダ自身への退避は同一ファイルへのコピーになる
        let unrecognized = self.unrecognized_folder();
        if unrecognized.is_dir()
            && std::fs::canonicalize(&unrecognized)? == std::fs::canonicalize(&self.source_folder)?
        {
            return Err(GroupListError::Config(format!(
                "unrecognized_folder が source_folder と同じです: {}",
                unrecognized.display()
            )));
        }

        Ok(())
    }
}
