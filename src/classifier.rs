//! 协议分类模块
//!
//! 仅凭方案前缀判断协议族与引擎需求，无须完整解析成功——能力检查
//! 和备注提取可能在用户尚未输完、暂不可解析的输入上被调用，
//! 无法分类的输入一律返回"未知、视为不需要引擎"，绝不向上传播
//! 解析错误、绝不阻塞输入。

use crate::grammar::{lookup_scheme, scheme_of};
use crate::types::{ProxySettings, ProxyType};

/// 对任意字符串做协议族分类
///
/// 方案标记在查表前做小写归一化（与解析器的大小写敏感匹配不同，
/// 分类是容错面向 UI 的表面）。无 `://` 分隔符或方案未知时返回
/// [`ProxyType::Unknown`]。
///
/// # Examples
///
/// ```
/// use proxylink_rs::classifier::classify;
/// use proxylink_rs::types::ProxyType;
///
/// assert_eq!(classify("vmess://abc"), ProxyType::Vmess);
/// assert_eq!(classify("still typ"), ProxyType::Unknown);
/// ```
pub fn classify(raw: &str) -> ProxyType {
    let trimmed = raw.trim();
    match scheme_of(trimmed) {
        Some(scheme) => lookup_scheme(&scheme.to_lowercase())
            .map(|g| g.proxy_type)
            .unwrap_or(ProxyType::Unknown),
        None => ProxyType::Unknown,
    }
}

/// 判断一条 URL 是否需要高级代理引擎
///
/// 对 `ss://`、`vmess://`、`vless://`、`trojan://` 开头的字符串返回
/// `true`；`http`/`https`/`socks4`/`socks5` 及一切无法分类的输入
/// 返回 `false`。
pub fn requires_advanced_engine(raw: &str) -> bool {
    let trimmed = raw.trim();
    scheme_of(trimmed)
        .and_then(|scheme| lookup_scheme(&scheme.to_lowercase()))
        .map(|g| g.requires_engine)
        .unwrap_or(false)
}

impl ProxySettings {
    /// 记录级的引擎需求判断
    ///
    /// 手工分解录入的 `shadowsocks` 记录不需要引擎（由通用代理层
    /// 处理）；以不透明 URL 存储的 `ss`/`vmess`/`vless`/`trojan`
    /// 记录需要。
    pub fn requires_advanced_engine(&self) -> bool {
        self.proxy_type.requires_advanced_engine()
    }
}
