//! 协议语法表模块
//!
//! 静态描述所有可识别的分享链接方案及其字段布局：方案标记、
//! 对应的协议族、是否需要高级代理引擎、以及记录的存储形式。
//! 表本身不可变，任意线程可并发读取。

use crate::types::ProxyType;

/// 记录的存储形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageForm {
    /// 按主机/端口/凭据分解存储
    Decomposed,
    /// 整条 URL 原样存储在 `host` 字段中
    OpaqueUrl,
}

/// 单个方案的语法描述
#[derive(Debug, Clone, Copy)]
pub struct SchemeGrammar {
    /// URL 方案标记（`://` 之前的部分）
    pub scheme: &'static str,
    /// 该方案解析产出的协议族
    pub proxy_type: ProxyType,
    /// 以 URL 形式出现时是否需要高级代理引擎
    pub requires_engine: bool,
    /// 解析产出的存储形式
    pub storage: StorageForm,
}

/// 协议语法表
///
/// `ss` 可通过自身的子语法分解（SIP002 或遗留 Base64 形式），
/// `vmess`/`vless`/`trojan` 永远以不透明 URL 形式存储。
pub const GRAMMAR: &[SchemeGrammar] = &[
    SchemeGrammar {
        scheme: "http",
        proxy_type: ProxyType::Http,
        requires_engine: false,
        storage: StorageForm::Decomposed,
    },
    SchemeGrammar {
        scheme: "https",
        proxy_type: ProxyType::Https,
        requires_engine: false,
        storage: StorageForm::Decomposed,
    },
    SchemeGrammar {
        scheme: "socks4",
        proxy_type: ProxyType::Socks4,
        requires_engine: false,
        storage: StorageForm::Decomposed,
    },
    SchemeGrammar {
        scheme: "socks5",
        proxy_type: ProxyType::Socks5,
        requires_engine: false,
        storage: StorageForm::Decomposed,
    },
    SchemeGrammar {
        scheme: "ss",
        proxy_type: ProxyType::Shadowsocks,
        requires_engine: true,
        storage: StorageForm::Decomposed,
    },
    SchemeGrammar {
        scheme: "vmess",
        proxy_type: ProxyType::Vmess,
        requires_engine: true,
        storage: StorageForm::OpaqueUrl,
    },
    SchemeGrammar {
        scheme: "vless",
        proxy_type: ProxyType::Vless,
        requires_engine: true,
        storage: StorageForm::OpaqueUrl,
    },
    SchemeGrammar {
        scheme: "trojan",
        proxy_type: ProxyType::Trojan,
        requires_engine: true,
        storage: StorageForm::OpaqueUrl,
    },
];

/// 按方案标记查表（大小写敏感，供解析器使用）
pub fn lookup_scheme(scheme: &str) -> Option<&'static SchemeGrammar> {
    GRAMMAR.iter().find(|g| g.scheme == scheme)
}

/// 提取 URL 的方案标记：第一个 `://` 之前的文本
pub fn scheme_of(raw: &str) -> Option<&str> {
    raw.find("://").map(|pos| &raw[..pos])
}

impl ProxyType {
    /// 返回该协议族的存储形式；`Unknown` 不在语法表中，返回 `None`
    pub fn storage_form(self) -> Option<StorageForm> {
        match self {
            ProxyType::Http
            | ProxyType::Https
            | ProxyType::Socks4
            | ProxyType::Socks5
            | ProxyType::Shadowsocks => Some(StorageForm::Decomposed),
            ProxyType::Vmess | ProxyType::Vless | ProxyType::Trojan | ProxyType::Ss => {
                Some(StorageForm::OpaqueUrl)
            }
            ProxyType::Unknown => None,
        }
    }

    /// 记录级的引擎需求判断
    ///
    /// 注意与 URL 级判断的不对称：`ss://` 链接需要引擎，但手工分解
    /// 录入的 `shadowsocks` 记录由通用代理层处理，不需要引擎。
    pub fn requires_advanced_engine(self) -> bool {
        matches!(
            self,
            ProxyType::Vmess | ProxyType::Vless | ProxyType::Trojan | ProxyType::Ss
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_scheme() {
        assert_eq!(lookup_scheme("ss").unwrap().proxy_type, ProxyType::Shadowsocks);
        assert!(lookup_scheme("ss").unwrap().requires_engine);
        assert!(!lookup_scheme("http").unwrap().requires_engine);
        assert!(lookup_scheme("ftp").is_none());
        // 大小写敏感
        assert!(lookup_scheme("SS").is_none());
    }

    #[test]
    fn test_scheme_of() {
        assert_eq!(scheme_of("vmess://abc"), Some("vmess"));
        assert_eq!(scheme_of("a://b://c"), Some("a"));
        assert_eq!(scheme_of("no-separator"), None);
    }

    #[test]
    fn test_storage_form() {
        assert_eq!(
            ProxyType::Shadowsocks.storage_form(),
            Some(StorageForm::Decomposed)
        );
        assert_eq!(ProxyType::Ss.storage_form(), Some(StorageForm::OpaqueUrl));
        assert_eq!(ProxyType::Unknown.storage_form(), None);
    }

    #[test]
    fn test_record_level_engine_asymmetry() {
        assert!(ProxyType::Ss.requires_advanced_engine());
        assert!(ProxyType::Vmess.requires_advanced_engine());
        assert!(!ProxyType::Shadowsocks.requires_advanced_engine());
        assert!(!ProxyType::Socks5.requires_advanced_engine());
    }
}
