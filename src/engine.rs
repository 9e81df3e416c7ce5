//! 高级代理引擎能力边界模块
//!
//! 引擎的安装、版本管理与进程生命周期都在本 SDK 之外；核心只消费
//! 一个布尔能力查询。能力状态显式作为同步查询传入调用方的决策点，
//! 不做模块级缓存——引擎可能在会话中途被安装或卸载，每次检查都
//! 必须观察到最新状态。

use crate::classifier::requires_advanced_engine;
use crate::error::{ProxyLinkError, Result};
use crate::grammar::scheme_of;

/// 高级代理引擎能力查询
pub trait EngineCapability {
    /// 引擎当前是否可用
    fn is_advanced_engine_installed(&self) -> bool;
}

/// 任何返回布尔的闭包都可以充当能力查询，便于测试与桩替身
impl<F> EngineCapability for F
where
    F: Fn() -> bool,
{
    fn is_advanced_engine_installed(&self) -> bool {
        self()
    }
}

/// 检查一条链接所需的引擎能力
///
/// 链接需要引擎而能力查询报告不可用时返回
/// [`ProxyLinkError::EngineRequired`]。该检查属于调用方的保存前
/// 流程，而非记录管理器内部——引擎可能在检查与保存之间被安装，
/// 管理器不应替调用方固化这一决策。
pub fn ensure_engine_available<C>(capability: &C, raw_url: &str) -> Result<()>
where
    C: EngineCapability + ?Sized,
{
    if requires_advanced_engine(raw_url) && !capability.is_advanced_engine_installed() {
        let scheme = scheme_of(raw_url.trim()).unwrap_or("unknown").to_lowercase();
        return Err(ProxyLinkError::engine_required(scheme));
    }
    Ok(())
}
