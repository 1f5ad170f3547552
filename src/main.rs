use anyhow::Context;
use clap::Parser;
use grouplist_sorter::{cli, config, orchestrator};
use cli::{Cli, Commands};
use config::Config;
use orchestrator::Orchestrator;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = Config::load(cli.config.as_deref()).context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Run { overrides } => {
            println!("📂 grouplist - PDF仕分け\n");

            let config = overrides.apply(loaded);
            config.validate()?;
            println!("  PDFフォルダ: {}", config.source_folder.display());
            println!("  名簿フォルダ: {}\n", config.config_folder.display());

            println!("[1/3] 部屋割り集計 → [2/3] PDF照合 → [3/3] 未照合PDFの退避");
            let report = Orchestrator::new(config).run(chrono::Local::now().naive_local())?;

            for outcome in &report.spreadsheets {
                let dest = outcome
                    .destination
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "✔ {}: コード{}件 / コピー{}件 → {}",
                    outcome.file_name,
                    outcome.codes,
                    outcome.copied(),
                    dest
                );
            }
            println!(
                "✔ 未照合PDF: {}件 → {}",
                report.unrecognized,
                report.unrecognized_folder.display()
            );
            println!("✔ ログ: {}", report.log_path.display());

            println!("\n✅ 処理完了");
        }

        Commands::Stats { overrides, json } => {
            let config = overrides.apply(loaded);
            config.validate()?;

            let reports = Orchestrator::new(config).occupancy_only()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    match (&report.summary, &report.error) {
                        (Some(summary), _) => {
                            println!("Room Occupancy Summary for {}:", report.file_name);
                            println!("{}\n", summary);
                        }
                        (None, Some(e)) => println!("⚠ {}: {}\n", report.file_name, e),
                        (None, None) => {}
                    }
                }
            }
        }

        Commands::Config { overrides, show, save } => {
            let config = overrides.apply(loaded);

            if save {
                let path = config.save(cli.config.as_deref())?;
                println!("✔ 設定を保存しました: {}", path.display());
            }

            if show || !save {
                println!("設定:");
                println!("  PDFフォルダ: {}", config.source_folder.display());
                println!("  名簿フォルダ: {}", config.config_folder.display());
                println!("  未照合フォルダ: {}", config.unrecognized_folder().display());
                println!("  ワークシート: {}", config.sheet_name);
                println!("  照合列の表頭: {}", config.header);
                println!("  部屋番号列: {}", config.room_column);
                println!("  リネーム衝突時: {}", config.on_rename_conflict);
            }
        }
    }

    Ok(())
}
