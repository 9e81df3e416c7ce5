//! 统一日志记录模块
//!
//! 提供统一的日志记录接口和配置管理。

use log::{debug, error, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 日志级别
    pub level: log::LevelFilter,
    /// 是否显示时间戳
    pub show_timestamp: bool,
    /// 是否显示模块路径
    pub show_module: bool,
    /// 日志格式
    pub format: LogFormat,
}

/// 日志格式
#[derive(Debug, Clone)]
pub enum LogFormat {
    /// 简洁格式
    Compact,
    /// 详细格式
    Full,
    /// JSON格式
    Json,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            show_timestamp: true,
            show_module: false,
            format: LogFormat::Compact,
        }
    }
}

/// 初始化日志系统
///
/// # Arguments
///
/// * `config` - 日志配置，如果为None则使用默认配置
///
/// # Examples
///
/// ```
/// use proxylink_rs::logger::{init_logger, LoggerConfig};
///
/// // 使用默认配置
/// init_logger(None);
///
/// // 使用自定义配置
/// let config = LoggerConfig {
///     level: log::LevelFilter::Debug,
///     show_module: true,
///     ..Default::default()
/// };
/// init_logger(Some(config));
/// ```
pub fn init_logger(config: Option<LoggerConfig>) {
    INIT.call_once(|| {
        let config = config.unwrap_or_default();

        let mut builder = env_logger::Builder::from_default_env();
        builder.filter_level(config.level);

        match config.format {
            LogFormat::Compact => {
                builder.format(move |buf, record| {
                    use std::io::Write;

                    if config.show_timestamp {
                        writeln!(
                            buf,
                            "[{}] {:5} {}",
                            chrono::Local::now().format("%H:%M:%S"),
                            record.level(),
                            record.args()
                        )
                    } else {
                        writeln!(buf, "{:5} {}", record.level(), record.args())
                    }
                });
            }
            LogFormat::Full => {
                builder.format(move |buf, record| {
                    use std::io::Write;

                    let mut parts = Vec::new();

                    if config.show_timestamp {
                        parts.push(format!(
                            "[{}]",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                        ));
                    }

                    parts.push(format!("[{}]", record.level()));

                    if config.show_module {
                        if let Some(module) = record.module_path() {
                            parts.push(format!("[{}]", module));
                        }
                    }

                    parts.push(record.args().to_string());

                    writeln!(buf, "{}", parts.join(" "))
                });
            }
            LogFormat::Json => {
                builder.format(move |buf, record| {
                    use std::io::Write;

                    let log_entry = serde_json::json!({
                        "timestamp": chrono::Local::now().to_rfc3339(),
                        "level": record.level().to_string(),
                        "message": record.args().to_string(),
                        "module": record.module_path(),
                    });

                    writeln!(buf, "{}", log_entry)
                });
            }
        }

        builder.init();
    });
}

/// 日志宏包装器
pub struct Logger;

impl Logger {
    /// 记录调试信息
    pub fn debug(message: &str) {
        debug!("{}", message);
    }

    /// 记录一般信息
    pub fn info(message: &str) {
        info!("{}", message);
    }

    /// 记录警告信息
    pub fn warn(message: &str) {
        warn!("{}", message);
    }

    /// 记录错误信息
    pub fn error(message: &str) {
        error!("{}", message);
    }
}
