//! 设置校验模块
//!
//! 在记录被接受持久化之前强制每个协议族的必填字段不变量。
//! 校验是纯函数、可重入，不访问网络与文件系统。

use regex::Regex;

use crate::error::ValidationError;
use crate::grammar::StorageForm;
use crate::types::{ProxySettings, ProxyType};

/// 校验显示名称
///
/// 名称不属于 [`ProxySettings`]，但在记录管理层与设置一并校验。
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// 校验规范化设置记录
///
/// - 分解存储的协议：`host` 非空且形如裸主机名/IP，`port` 在
///   1-65535 之间；`shadowsocks` 另须携带加密方法与预共享密钥。
/// - 不透明 URL 协议：`host`（即 URL 本身）非空；`port` 由构造保证
///   为 0，不做校验。
/// - 不在语法表中的 `proxy_type` 直接拒绝。
pub fn validate_settings(settings: &ProxySettings) -> Result<(), ValidationError> {
    let storage = settings
        .proxy_type
        .storage_form()
        .ok_or(ValidationError::UnsupportedType(settings.proxy_type))?;

    if settings.host.trim().is_empty() {
        return Err(ValidationError::EmptyHost);
    }

    match storage {
        StorageForm::OpaqueUrl => Ok(()),
        StorageForm::Decomposed => {
            validate_host(&settings.host)?;

            if settings.port == 0 {
                return Err(ValidationError::InvalidPort(settings.port));
            }

            if settings.proxy_type == ProxyType::Shadowsocks {
                if settings.username.as_deref().unwrap_or("").is_empty() {
                    return Err(ValidationError::MissingCipher);
                }
                if settings.password.as_deref().unwrap_or("").is_empty() {
                    return Err(ValidationError::MissingPassword);
                }
            }

            Ok(())
        }
    }
}

/// 校验分解记录的主机形状
///
/// 裸主机名/IP 不应包含空白、`@` 或 `/`，出现这些字符通常意味着
/// 整条 URL 被误填进了主机字段。
fn validate_host(host: &str) -> Result<(), ValidationError> {
    let host_re = Regex::new(r"^[^\s@/]+$").expect("host pattern is valid");
    if !host_re.is_match(host) {
        return Err(ValidationError::InvalidHost(host.to_string()));
    }
    Ok(())
}
