use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumload::app::{render_choices, render_outcome, render_sheets};
use sumload::config::toml_config::TomlConfig;
use sumload::config::{default_data_dir, Command, ERROR_LOG_FILE_NAME, SETTINGS_FILE_NAME};
use sumload::utils::{logger, validation::Validate};
use sumload::{App, CliConfig, JsonSettingsStore, SumLoadError, SumSelection};

async fn run_command(app: &App, command: Command) -> Result<String, SumLoadError> {
    match command {
        Command::Sheets(args) => {
            let listing = app.sheets(args.file.as_deref()).await?;
            Ok(render_sheets(&listing))
        }
        Command::Choices(args) => {
            let lists = app
                .choices(args.workbook.file.as_deref(), args.sheet.as_deref())
                .await?;
            Ok(render_choices(&lists))
        }
        Command::Sum(args) => {
            let selection = SumSelection {
                file: args.sheet.workbook.file,
                sheet: args.sheet.sheet,
                proc: args.proc,
                thick: args.thick,
                width: args.width,
                length: args.length,
            };
            let outcome = app.sum(selection).await?;
            Ok(render_outcome(&outcome))
        }
        Command::ExportLog { dir } => {
            let target = app.export_log(&dir)?;
            Ok(format!("Success: {}", target.display()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置（可選）
    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    // 命令列 > 配置檔 > 執行檔目錄
    let data_dir = default_data_dir();
    let settings_path = cli
        .settings
        .clone()
        .or_else(|| config.files.settings.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(SETTINGS_FILE_NAME));
    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.files.error_log.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(ERROR_LOG_FILE_NAME));

    logger::init_cli_logger(cli.verbose, Some(&log_path));

    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Settings file: {}", settings_path.display());

    let app = App::new(JsonSettingsStore::new(settings_path), config, log_path);

    match run_command(&app, cli.command).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            // 只寫入錯誤日誌；終端訊息由下方 eprintln 輸出
            tracing::error!(
                target: logger::ERROR_LOG_TARGET,
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
