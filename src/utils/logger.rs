use crate::utils::error::Result;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 只寫入錯誤日誌檔、不顯示在終端的事件 target
pub const ERROR_LOG_TARGET: &str = "sumload::error_log";

fn shown_on_terminal(target: &str) -> bool {
    target != ERROR_LOG_TARGET
}

/// 錯誤日誌的時間戳：本地日期 + 時間
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

/// 以附加模式開啟錯誤日誌，必要時建立上層目錄
pub fn open_error_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// 初始化 CLI 日誌；若提供 `error_log`，ERROR 等級的事件會額外附加寫入該檔案。
/// 日誌檔無法開啟時只輸出到 stderr 並發出警告
pub fn init_cli_logger(verbose: bool, error_log: Option<&Path>) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("sumload=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sumload=info"))
    };

    let mut open_failure = None;
    let file_layer = match error_log.map(|path| (path, open_error_log(path))) {
        Some((_, Ok(file))) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_timer(LocalTimestamp)
                .with_target(false)
                .with_filter(LevelFilter::ERROR),
        ),
        Some((path, Err(e))) => {
            open_failure = Some((path, e));
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_filter(filter_fn(|meta| shown_on_terminal(meta.target()))),
        )
        .with(file_layer)
        .init();

    if let Some((path, e)) = open_failure {
        tracing::warn!(
            "⚠️ Cannot open error log {} ({}), logging to stderr only",
            path.display(),
            e
        );
    }
}
