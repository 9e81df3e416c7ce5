//! 错误处理模块
//!
//! 定义了 SDK 中使用的所有错误类型和结果类型。
//! 所有错误都是可恢复的：解析失败、校验失败、能力缺失和记录缺失
//! 均以 `Result` 返回给调用方，核心代码不会 panic。

use thiserror::Error;

use crate::logger::Logger;
use crate::types::ProxyType;
use serde::{Deserialize, Serialize};

/// 分享链接解析错误
///
/// 解析器对任意输入（空串、缺失分隔符、非法 Base64、越界端口等）
/// 都映射到这里的某个具名变体，绝不 panic。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 输入为空（去除首尾空白后）
    #[error("empty proxy URL")]
    Empty,

    /// 输入缺少 `://` 分隔符，不是一个分享链接
    #[error("missing '://' scheme separator")]
    MissingScheme,

    /// 协议方案不在语法表中
    #[error("unsupported proxy scheme: {0}")]
    UnsupportedScheme(String),

    /// Shadowsocks 凭据段 Base64 解码失败或解码结果缺少 `:` 分隔
    #[error("invalid shadowsocks credential encoding")]
    InvalidEncoding,

    /// Shadowsocks 链接结构非法（缺少 `@` 分隔的主机段等）
    #[error("malformed shadowsocks URI")]
    MalformedShadowsocksUri,
}

/// 设置校验错误
///
/// 结构上可解析、但缺少必填字段时返回，适合逐字段反馈给表单层。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 显示名称为空
    #[error("proxy name cannot be empty")]
    EmptyName,

    /// 主机字段为空（对不透明 URL 类型即 URL 本身为空）
    #[error("proxy host cannot be empty")]
    EmptyHost,

    /// 主机字段格式非法
    #[error("invalid proxy host: {0}")]
    InvalidHost(String),

    /// 端口越界（分解存储的协议要求 1-65535）
    #[error("invalid proxy port: {0}")]
    InvalidPort(u16),

    /// Shadowsocks 缺少加密方法
    #[error("shadowsocks cipher method cannot be empty")]
    MissingCipher,

    /// Shadowsocks 缺少预共享密钥
    #[error("shadowsocks password cannot be empty")]
    MissingPassword,

    /// 代理类型不在协议语法表中
    #[error("unsupported proxy type: {}", .0.as_str())]
    UnsupportedType(ProxyType),
}

/// SDK 的主要错误类型
#[derive(Error, Debug)]
pub enum ProxyLinkError {
    /// 分享链接解析错误
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 设置校验错误
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 协议需要高级代理引擎，但引擎不可用
    #[error("advanced proxy engine required for scheme '{0}' but not installed")]
    EngineRequired(String),

    /// 记录未找到（更新引用了不存在或已删除的 id）
    #[error("proxy record not found: {0}")]
    NotFound(String),

    /// 持久化协作方错误
    #[error("store error: {0}")]
    Store(String),

    /// 其他错误
    #[error("other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// SDK 的结果类型
pub type Result<T> = std::result::Result<T, ProxyLinkError>;

/// 错误分类
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 用户输入错误（可重新输入）
    UserInput,
    /// 校验错误（字段级反馈）
    Validation,
    /// 外部能力缺失
    Capability,
    /// 持久化错误
    Storage,
    /// 内部错误
    Internal,
}

impl ProxyLinkError {
    /// 创建引擎缺失错误
    pub fn engine_required<S: Into<String>>(scheme: S) -> Self {
        let error = ProxyLinkError::EngineRequired(scheme.into());
        error.log_error();
        error
    }

    /// 创建记录未找到错误
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        let error = ProxyLinkError::NotFound(id.into());
        error.log_error();
        error
    }

    /// 创建持久化错误
    pub fn store<S: Into<String>>(msg: S) -> Self {
        let error = ProxyLinkError::Store(msg.into());
        error.log_error();
        error
    }

    /// 获取错误分类
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyLinkError::Parse(_) => ErrorCategory::UserInput,
            ProxyLinkError::Validation(_) => ErrorCategory::Validation,
            ProxyLinkError::EngineRequired(_) => ErrorCategory::Capability,
            ProxyLinkError::NotFound(_) | ProxyLinkError::Store(_) => ErrorCategory::Storage,
            ProxyLinkError::Other(_) => ErrorCategory::Internal,
        }
    }

    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ProxyLinkError::Parse(_) => "PARSE_ERROR",
            ProxyLinkError::Validation(_) => "VALIDATION_ERROR",
            ProxyLinkError::EngineRequired(_) => "ENGINE_REQUIRED",
            ProxyLinkError::NotFound(_) => "NOT_FOUND",
            ProxyLinkError::Store(_) => "STORE_ERROR",
            ProxyLinkError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 解析、校验、能力与记录缺失都可由调用方修正后重试；
    /// 仅协作方内部错误视为不可恢复。
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ProxyLinkError::Other(_))
    }

    /// 获取建议的解决方案
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ProxyLinkError::Parse(_) => Some("请检查分享链接格式后重新输入"),
            ProxyLinkError::Validation(_) => Some("请补全缺失的必填字段"),
            ProxyLinkError::EngineRequired(_) => Some("请安装高级代理引擎或改用 HTTP/SOCKS 协议"),
            ProxyLinkError::NotFound(_) => Some("记录可能已被删除，请刷新代理列表"),
            _ => None,
        }
    }

    /// 记录错误日志
    fn log_error(&self) {
        Logger::error(&format!("[{}] {}", self.code(), self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let not_found = ProxyLinkError::not_found("proxy-1");
        assert!(matches!(not_found, ProxyLinkError::NotFound(_)));

        let engine = ProxyLinkError::engine_required("vmess");
        assert!(matches!(engine, ProxyLinkError::EngineRequired(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ProxyLinkError::from(ParseError::UnsupportedScheme("ftp".to_string()));
        let error_string = format!("{}", err);
        assert!(error_string.contains("unsupported proxy scheme"));
        assert!(error_string.contains("ftp"));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            ProxyLinkError::from(ParseError::Empty).category(),
            ErrorCategory::UserInput
        );
        assert_eq!(
            ProxyLinkError::from(ValidationError::EmptyHost).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ProxyLinkError::engine_required("trojan").category(),
            ErrorCategory::Capability
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(ProxyLinkError::from(ParseError::InvalidEncoding).is_recoverable());
        assert!(ProxyLinkError::not_found("x").is_recoverable());
        assert!(!ProxyLinkError::Other(anyhow::anyhow!("boom")).is_recoverable());
    }
}
