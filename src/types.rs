//! 类型定义模块
//!
//! 定义了 SDK 中使用的核心数据结构：规范化的代理设置记录、
//! 持久化记录以及记录管理器接受的输入形式。

use serde::{Deserialize, Serialize};

/// 代理协议族枚举
///
/// 这是贯穿整个 SDK 的规范协议标签。`Ss` 与 `Shadowsocks` 是两个
/// 不同的标签：`Shadowsocks` 表示已分解为主机/端口/加密方法/密钥的
/// 记录，`Ss` 表示以原始 `ss://` URL 整体存储的不透明记录。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    /// HTTP 代理
    Http,
    /// HTTPS 代理
    Https,
    /// SOCKS4 代理
    Socks4,
    /// SOCKS5 代理
    Socks5,
    /// Shadowsocks 代理（字段已分解）
    Shadowsocks,
    /// VMess 代理（不透明 URL）
    Vmess,
    /// VLESS 代理（不透明 URL）
    Vless,
    /// Trojan 代理（不透明 URL）
    Trojan,
    /// Shadowsocks 代理（不透明 URL）
    Ss,
    /// 未知协议（分类器对无法识别的输入返回此值，不会被持久化）
    Unknown,
}

impl ProxyType {
    /// 返回协议族的稳定字符串标签
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Http => "http",
            ProxyType::Https => "https",
            ProxyType::Socks4 => "socks4",
            ProxyType::Socks5 => "socks5",
            ProxyType::Shadowsocks => "shadowsocks",
            ProxyType::Vmess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Ss => "ss",
            ProxyType::Unknown => "unknown",
        }
    }
}

/// 规范化的代理设置记录
///
/// # 不透明 URL 约定
///
/// 对高级引擎协议（`vmess`/`vless`/`trojan`/`ss`），`host` 保存的是
/// 完整的原始分享链接，此时 `port` 固定为 0（哨兵值，表示端口包含
/// 在 URL 内部），`username`/`password` 均为空；URL 本身是这些子字段
/// 的唯一权威来源，由引擎自行重新解析。
///
/// 其余协议按字段分解存储：`host` 为裸主机名或 IP，`port` 在
/// 1-65535 之间。对 `shadowsocks`，`username` 保存加密方法名而非
/// 身份标识，`password` 保存预共享密钥。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxySettings {
    /// 协议族标签
    #[serde(rename = "type")]
    pub proxy_type: ProxyType,
    /// 主机地址，或不透明协议的完整原始 URL
    pub host: String,
    /// 端口，0 表示端口内嵌于 `host` 的 URL 中
    pub port: u16,
    /// 用户名；对 shadowsocks 为加密方法名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 密码；对 shadowsocks 为预共享密钥
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProxySettings {
    /// 创建按字段分解的设置记录
    pub fn decomposed<S: Into<String>>(proxy_type: ProxyType, host: S, port: u16) -> Self {
        Self {
            proxy_type,
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// 创建携带凭据的分解记录
    pub fn with_credentials<S: Into<String>>(
        proxy_type: ProxyType,
        host: S,
        port: u16,
        username: S,
        password: S,
    ) -> Self {
        Self {
            proxy_type,
            host: host.into(),
            port,
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// 创建不透明 URL 记录
    ///
    /// 端口强制为 0，凭据强制清空，整条 URL 原样保存在 `host` 中。
    pub fn opaque<S: Into<String>>(proxy_type: ProxyType, url: S) -> Self {
        Self {
            proxy_type,
            host: url.into(),
            port: 0,
            username: None,
            password: None,
        }
    }

    /// 判断记录是否以不透明 URL 形式存储
    pub fn is_opaque_url(&self) -> bool {
        matches!(
            self.proxy_type.storage_form(),
            Some(crate::grammar::StorageForm::OpaqueUrl)
        )
    }
}

/// 已持久化的代理记录
///
/// `id` 由持久化协作方分配，创建后不可变；核心不会自行发明或复用 id。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredProxy {
    /// 不透明唯一标识
    pub id: String,
    /// 显示名称（非空，可修改）
    pub name: String,
    /// 规范化设置记录
    pub proxy_settings: ProxySettings,
}

/// 记录管理器的设置输入形式
///
/// 单条 URL 字符串会先经过解析器；手工填写的字段集跳过解析器、
/// 直接进入校验。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsInput {
    /// 分享链接原文
    Url(String),
    /// 手工填写的字段集
    Fields(ProxySettings),
}

impl From<&str> for SettingsInput {
    fn from(url: &str) -> Self {
        SettingsInput::Url(url.to_string())
    }
}

impl From<String> for SettingsInput {
    fn from(url: String) -> Self {
        SettingsInput::Url(url)
    }
}

impl From<ProxySettings> for SettingsInput {
    fn from(settings: ProxySettings) -> Self {
        SettingsInput::Fields(settings)
    }
}
