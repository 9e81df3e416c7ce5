//! 分享链接解析模块
//!
//! 将任意输入字符串解析为规范化的 [`ProxySettings`] 记录。
//! 解析是纯函数：无副作用、无共享状态，可被任意线程并发调用。
//!
//! Shadowsocks 链接按固定顺序尝试两种解码策略（SIP002 → 遗留
//! Base64 形式），前者结构性失败时才尝试后者，绝不合并两者的结果；
//! 高级引擎协议（vmess/vless/trojan）不再继续分解，整条链接原样
//! 保存，由引擎自行重新解析，避免部分分解后再编码造成的有损往返。

use base64::{engine::general_purpose, Engine as _};
use url::Url;

use crate::error::ParseError;
use crate::grammar::{lookup_scheme, scheme_of};
use crate::types::{ProxySettings, ProxyType};

/// 解析分享链接为规范化设置记录
///
/// 输入先去除首尾空白；空串返回 [`ParseError::Empty`]，方案标记
/// 大小写敏感地匹配语法表，未知方案返回
/// [`ParseError::UnsupportedScheme`]。
///
/// # Examples
///
/// ```
/// use proxylink_rs::parser::parse;
/// use proxylink_rs::types::ProxyType;
///
/// let settings = parse("ss://aes-128-gcm:secret@example.com:8388").unwrap();
/// assert_eq!(settings.proxy_type, ProxyType::Shadowsocks);
/// assert_eq!(settings.port, 8388);
/// ```
pub fn parse(raw: &str) -> Result<ProxySettings, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let scheme = scheme_of(trimmed).ok_or(ParseError::MissingScheme)?;
    let grammar =
        lookup_scheme(scheme).ok_or_else(|| ParseError::UnsupportedScheme(scheme.to_string()))?;

    log::debug!("Parsing proxy URL with scheme '{}'", grammar.scheme);

    // 仅 ss:// 拥有可分解的子语法；其余方案（包括手工录入路径之外
    // 粘贴进来的 http/socks URL）一律原样保存为不透明记录。
    if grammar.proxy_type == ProxyType::Shadowsocks {
        parse_shadowsocks(trimmed)
    } else {
        Ok(ProxySettings::opaque(grammar.proxy_type, trimmed))
    }
}

/// 解析 `ss://` 链接
///
/// 尾部的 `#fragment` 备注段在结构分解前剥离（备注由
/// [`extract_remark`] 单独提取），随后按固定顺序尝试：
///
/// 1. **SIP002**：`ss://<cipher>:<password>@<host>:<port>`，凭据段
///    按第一个 `:` 拆分并做百分号解码；
/// 2. **遗留形式**：`ss://<base64(cipher:password)>@<host>:<port>`，
///    凭据段 Base64 解码后按第一个 `:` 拆分。
///
/// 不带 `@` 主机段的纯 Base64 形式不受支持。
fn parse_shadowsocks(trimmed: &str) -> Result<ProxySettings, ParseError> {
    let body = &trimmed["ss://".len()..];
    let body = body.split('#').next().unwrap_or(body);

    let (credentials, host_port) = body
        .split_once('@')
        .ok_or(ParseError::MalformedShadowsocksUri)?;

    if let Some(settings) = try_sip002(credentials, host_port) {
        return Ok(settings);
    }

    // 遗留形式：SIP002 结构性失败后的唯一回退，此处失败即终止
    let decoded = url_safe_base64_decode(credentials).ok_or(ParseError::InvalidEncoding)?;
    let (cipher, password) = decoded.split_once(':').ok_or(ParseError::InvalidEncoding)?;
    if cipher.is_empty() || password.is_empty() {
        return Err(ParseError::InvalidEncoding);
    }

    let (host, port) = split_host_port(host_port).ok_or(ParseError::MalformedShadowsocksUri)?;

    Ok(ProxySettings::with_credentials(
        ProxyType::Shadowsocks,
        host,
        port,
        cipher,
        password,
    ))
}

/// 尝试按 SIP002 形式解码；任何结构性缺陷返回 `None` 交给遗留形式
fn try_sip002(credentials: &str, host_port: &str) -> Option<ProxySettings> {
    let (cipher_raw, password_raw) = credentials.split_once(':')?;
    let (host, port) = split_host_port(host_port)?;

    let cipher = urlencoding::decode(cipher_raw).ok()?;
    let password = urlencoding::decode(password_raw).ok()?;
    if cipher.is_empty() || password.is_empty() || host.is_empty() {
        return None;
    }

    Some(ProxySettings::with_credentials(
        ProxyType::Shadowsocks,
        host,
        port,
        cipher.as_ref(),
        password.as_ref(),
    ))
}

/// 按最后一个 `:` 拆分主机与端口；天然兼容 `[::1]:8388` 形式
fn split_host_port(host_port: &str) -> Option<(&str, u16)> {
    let (host, port_str) = host_port.rsplit_once(':')?;
    if host.is_empty() {
        return None;
    }
    let port = port_str.parse::<u16>().ok()?;
    Some((host, port))
}

/// 解码兼容 URL-safe 字母表的 Base64 字符串
///
/// 分享链接中的凭据段常见无填充或 URL-safe 变体，先归一化到标准
/// 字母表并去除填充再解码；解码失败或结果不是 UTF-8 返回 `None`。
fn url_safe_base64_decode(input: &str) -> Option<String> {
    let normalized = input.replace('-', "+").replace('_', "/");
    let bytes = general_purpose::STANDARD_NO_PAD
        .decode(normalized.trim_end_matches('='))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// 将分解的 Shadowsocks 记录重编码为 SIP002 链接
///
/// 仅对携带加密方法与密钥的 `shadowsocks` 记录有意义，其余类型
/// 返回 `None`。加密方法与密钥做百分号编码，保证与 [`parse`] 往返
/// 一致。
pub fn encode_sip002(settings: &ProxySettings) -> Option<String> {
    if settings.proxy_type != ProxyType::Shadowsocks {
        return None;
    }
    let cipher = settings.username.as_deref()?;
    let password = settings.password.as_deref()?;

    Some(format!(
        "ss://{}:{}@{}:{}",
        urlencoding::encode(cipher),
        urlencoding::encode(password),
        settings.host,
        settings.port
    ))
}

/// 尽力提取链接中内嵌的人类可读备注
///
/// vmess 链接的备注在 Base64 JSON 载荷的 `ps` 字段中；其余协议取
/// 百分号解码后的 `#fragment`。任何歧义（解码失败、字段缺失、
/// 备注为空）都返回 `None`，绝不报错——调用方可能在用户输入到一半
/// 时就调用本函数。
pub fn extract_remark(url: &str) -> Option<String> {
    let trimmed = url.trim();

    if let Some(payload) = trimmed.strip_prefix("vmess://") {
        let decoded = url_safe_base64_decode(payload)?;
        let value: serde_json::Value = serde_json::from_str(&decoded).ok()?;
        let ps = value.get("ps")?.as_str()?;
        return if ps.is_empty() {
            None
        } else {
            Some(ps.to_string())
        };
    }

    let parsed = Url::parse(trimmed).ok()?;
    let fragment = parsed.fragment()?;
    let remark = urlencoding::decode(fragment).ok()?;
    if remark.is_empty() {
        None
    } else {
        Some(remark.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   \t"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        assert_eq!(
            parse("ftp://x"),
            Err(ParseError::UnsupportedScheme("ftp".to_string()))
        );
        // 方案匹配大小写敏感
        assert_eq!(
            parse("SS://aes:pw@h:80"),
            Err(ParseError::UnsupportedScheme("SS".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_scheme() {
        assert_eq!(parse("1.2.3.4:8080"), Err(ParseError::MissingScheme));
    }

    #[test]
    fn test_parse_sip002() {
        let settings = parse("ss://aes-256-gcm:pass123@example.com:8388").unwrap();
        assert_eq!(settings.proxy_type, ProxyType::Shadowsocks);
        assert_eq!(settings.host, "example.com");
        assert_eq!(settings.port, 8388);
        assert_eq!(settings.username.as_deref(), Some("aes-256-gcm"));
        assert_eq!(settings.password.as_deref(), Some("pass123"));
    }

    #[test]
    fn test_parse_sip002_percent_decoding() {
        let settings = parse("ss://aes-128-gcm:p%40ss%3Aword@1.2.3.4:443").unwrap();
        assert_eq!(settings.password.as_deref(), Some("p@ss:word"));
    }

    #[test]
    fn test_parse_legacy_base64() {
        // base64("aes-256-gcm:pass123")
        let settings = parse("ss://YWVzLTI1Ni1nY206cGFzczEyMw==@1.2.3.4:8388").unwrap();
        assert_eq!(settings.proxy_type, ProxyType::Shadowsocks);
        assert_eq!(settings.host, "1.2.3.4");
        assert_eq!(settings.port, 8388);
        assert_eq!(settings.username.as_deref(), Some("aes-256-gcm"));
        assert_eq!(settings.password.as_deref(), Some("pass123"));
    }

    #[test]
    fn test_parse_legacy_unpadded_urlsafe() {
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode("chacha20-ietf-poly1305:s3cret");
        let settings = parse(&format!("ss://{}@host.example:9000", encoded)).unwrap();
        assert_eq!(settings.username.as_deref(), Some("chacha20-ietf-poly1305"));
        assert_eq!(settings.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_parse_ss_fragment_stripped() {
        let settings = parse("ss://aes-256-gcm:pw@5.6.7.8:8388#My%20Node").unwrap();
        assert_eq!(settings.host, "5.6.7.8");
        assert_eq!(settings.port, 8388);
    }

    #[test]
    fn test_parse_ss_missing_at() {
        assert_eq!(
            parse("ss://YWVzLTI1Ni1nY206cGFzczEyMw=="),
            Err(ParseError::MalformedShadowsocksUri)
        );
    }

    #[test]
    fn test_parse_ss_invalid_encoding() {
        // 凭据既不是 SIP002（无冒号）也不是合法 Base64
        assert_eq!(
            parse("ss://!!!notbase64@host:80"),
            Err(ParseError::InvalidEncoding)
        );
        // Base64 可解码但缺少冒号分隔
        let encoded = general_purpose::STANDARD.encode("nocolonhere");
        assert_eq!(
            parse(&format!("ss://{}@host:80", encoded)),
            Err(ParseError::InvalidEncoding)
        );
    }

    #[test]
    fn test_parse_ss_ipv6_host() {
        let settings = parse("ss://aes-256-gcm:pw@[::1]:8388").unwrap();
        assert_eq!(settings.host, "[::1]");
        assert_eq!(settings.port, 8388);
    }

    #[test]
    fn test_parse_opaque_engine_schemes() {
        let url = "vless://uuid@host:443?type=ws#MyServer";
        let settings = parse(url).unwrap();
        assert_eq!(settings.proxy_type, ProxyType::Vless);
        assert_eq!(settings.host, url);
        assert_eq!(settings.port, 0);
        assert!(settings.username.is_none());
        assert!(settings.password.is_none());

        assert_eq!(parse("vmess://abc123").unwrap().proxy_type, ProxyType::Vmess);
        assert_eq!(
            parse("trojan://pw@h:443").unwrap().proxy_type,
            ProxyType::Trojan
        );
    }

    #[test]
    fn test_parse_opaque_trims_whitespace() {
        let settings = parse("  vmess://abc123\n").unwrap();
        assert_eq!(settings.host, "vmess://abc123");
    }

    #[test]
    fn test_parse_http_url_stays_opaque() {
        // 分解协议以 URL 形式粘贴时不再继续分解，由校验层拒绝
        let settings = parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(settings.proxy_type, ProxyType::Http);
        assert_eq!(settings.host, "http://127.0.0.1:8080");
        assert_eq!(settings.port, 0);
    }

    #[test]
    fn test_sip002_roundtrip() {
        let original = "ss://aes-256-gcm:p%40ssword@example.com:8388";
        let settings = parse(original).unwrap();
        let encoded = encode_sip002(&settings).unwrap();
        let reparsed = parse(&encoded).unwrap();
        assert_eq!(reparsed, settings);
    }

    #[test]
    fn test_encode_sip002_rejects_other_types() {
        let vmess = ProxySettings::opaque(ProxyType::Vmess, "vmess://abc");
        assert!(encode_sip002(&vmess).is_none());

        let no_creds = ProxySettings::decomposed(ProxyType::Shadowsocks, "h", 1);
        assert!(encode_sip002(&no_creds).is_none());
    }

    #[test]
    fn test_extract_remark_fragment() {
        assert_eq!(
            extract_remark("vless://uuid@host:443?type=ws#MyServer"),
            Some("MyServer".to_string())
        );
        assert_eq!(
            extract_remark("trojan://pw@h:443#Hong%20Kong"),
            Some("Hong Kong".to_string())
        );
        assert_eq!(extract_remark("trojan://pw@h:443"), None);
        assert_eq!(extract_remark("not a url at all"), None);
    }

    #[test]
    fn test_extract_remark_vmess_ps() {
        let payload = general_purpose::STANDARD
            .encode(r#"{"add":"1.2.3.4","port":"443","id":"uuid","ps":"Tokyo 01"}"#);
        let url = format!("vmess://{}", payload);
        assert_eq!(extract_remark(&url), Some("Tokyo 01".to_string()));

        // 载荷不是 JSON 时保持沉默
        let bad = format!("vmess://{}", general_purpose::STANDARD.encode("not json"));
        assert_eq!(extract_remark(&bad), None);
    }
}
