use crate::config::{Config, RenameConflictPolicy};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grouplist")]
#[command(about = "団体名簿（Excel）に基づくPDF仕分け・部屋割り集計ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時: ~/.config/grouplist/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 部屋割り集計・PDF照合・未照合PDFの退避を一括実行
    Run {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// 部屋割り集計のみ表示
    Stats {
        #[command(flatten)]
        overrides: ConfigOverrides,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/保存
    Config {
        #[command(flatten)]
        overrides: ConfigOverrides,

        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 上書き後の設定を設定ファイルに保存
        #[arg(long)]
        save: bool,
    },
}

/// 設定ファイルの値を上書きするオプション
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// PDFフォルダ
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// 名簿（.xlsx）フォルダ
    #[arg(short = 'c', long)]
    pub config_folder: Option<PathBuf>,

    /// 未照合PDFのコピー先
    #[arg(short, long)]
    pub unrecognized: Option<PathBuf>,

    /// ワークシート名
    #[arg(long)]
    pub sheet: Option<String>,

    /// 照合コード列の表頭（部分一致）
    #[arg(long)]
    pub header: Option<String>,

    /// 部屋番号列の表頭
    #[arg(long)]
    pub room_column: Option<String>,

    /// リネーム先が既に存在する場合 (skip/fail)
    #[arg(long)]
    pub on_rename_conflict: Option<RenameConflictPolicy>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(source) = &self.source {
            config.source_folder = source.clone();
        }
        if let Some(folder) = &self.config_folder {
            config.config_folder = folder.clone();
        }
        if let Some(folder) = &self.unrecognized {
            config.unrecognized_folder = Some(folder.clone());
        }
        if let Some(sheet) = &self.sheet {
            config.sheet_name = sheet.clone();
        }
        if let Some(header) = &self.header {
            config.header = header.clone();
        }
        if let Some(room_column) = &self.room_column {
            config.room_column = room_column.clone();
        }
        if let Some(policy) = self.on_rename_conflict {
            config.on_rename_conflict = policy;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::parse_from([
            "grouplist",
            "-v",
            "run",
            "--source",
            "/pdf",
            "-c",
            "/lists",
            "--header",
            "Passport",
            "--on-rename-conflict",
            "fail",
        ]);
        assert!(cli.verbose);

        let Commands::Run { overrides } = cli.command else {
            panic!("run コマンドではない");
        };
        let config = overrides.apply(Config::default());
        assert_eq!(config.source_folder, PathBuf::from("/pdf"));
        assert_eq!(config.config_folder, PathBuf::from("/lists"));
        assert_eq!(config.header, "Passport");
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.on_rename_conflict, RenameConflictPolicy::Fail);
    }

    #[test]
    fn test_parse_stats_json() {
        let cli = Cli::parse_from(["grouplist", "stats", "--json", "--room-column", "Room"]);
        let Commands::Stats { overrides, json } = cli.command else {
            panic!("stats コマンドではない");
        };
        assert!(json);
        assert_eq!(overrides.apply(Config::default()).room_column, "Room");
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = Config {
            sheet_name: "名单".into(),
            ..Default::default()
        };
        let applied = ConfigOverrides::default().apply(config);
        assert_eq!(applied.sheet_name, "名单");
        assert!(applied.unrecognized_folder.is_none());
    }
}
