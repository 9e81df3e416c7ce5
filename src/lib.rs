//! # ProxyLink RS SDK
//!
//! 一个用于解析多协议代理分享链接并管理代理记录的 Rust SDK。
//! 提供链接解析、协议分类、设置校验和记录持久化编排功能。
//!
//! 数据单向流动：原始输入 → 解析器 → 规范记录 → 分类器 → 校验器
//! → 记录管理器（经抽象存储边界持久化）。高级协议
//! （vmess/vless/trojan/ss 链接）以不透明 URL 形式存储，由外部的
//! 高级代理引擎自行解释。

pub mod classifier;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod logger;
pub mod manager;
pub mod parser;
pub mod store;
pub mod types;
pub mod validator;

// 重新导出主要的公共接口
pub use classifier::{classify, requires_advanced_engine};
pub use engine::{ensure_engine_available, EngineCapability};
pub use error::{ErrorCategory, ParseError, ProxyLinkError, Result, ValidationError};
pub use grammar::{lookup_scheme, scheme_of, SchemeGrammar, StorageForm, GRAMMAR};
pub use manager::ProxyRecordManager;
pub use parser::{encode_sip002, extract_remark, parse};
pub use store::{MemoryStore, ProxyStore};
pub use types::{ProxySettings, ProxyType, SettingsInput, StoredProxy};
pub use validator::{validate_name, validate_settings};

/// SDK 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化日志系统
///
/// # Arguments
///
/// * `config` - 日志配置，如果为None则使用默认配置
///
/// # Examples
///
/// ```
/// use proxylink_rs::logger::LoggerConfig;
///
/// // 使用默认配置
/// proxylink_rs::init_logger(None);
///
/// // 使用自定义配置
/// let config = LoggerConfig {
///     level: log::LevelFilter::Debug,
///     ..Default::default()
/// };
/// proxylink_rs::init_logger(Some(config));
/// ```
pub fn init_logger(config: Option<logger::LoggerConfig>) {
    logger::init_logger(config);
}

/// 使用默认配置初始化日志系统
///
/// # Examples
///
/// ```
/// proxylink_rs::init_default_logger();
/// ```
pub fn init_default_logger() {
    logger::init_logger(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }

    #[test]
    fn test_reexported_pipeline() {
        let settings = parse("ss://aes-256-gcm:pw@1.2.3.4:8388").unwrap();
        assert!(validate_settings(&settings).is_ok());
        assert!(!settings.requires_advanced_engine());
    }
}
