//! 代理记录管理模块
//!
//! 编排 解析 → 分类 → 校验 → 持久化 的单向流水线，向外暴露
//! 创建/更新两个操作。管理器只通过抽象的 [`ProxyStore`] 边界
//! 访问持久层，不依赖其内部实现。

use crate::error::Result;
use crate::parser::parse;
use crate::store::ProxyStore;
use crate::types::{ProxySettings, SettingsInput, StoredProxy};
use crate::validator::{validate_name, validate_settings};

/// 代理记录管理器
///
/// # Examples
///
/// ```
/// use proxylink_rs::manager::ProxyRecordManager;
/// use proxylink_rs::store::MemoryStore;
///
/// # fn main() -> proxylink_rs::Result<()> {
/// let manager = ProxyRecordManager::new(MemoryStore::new());
/// let record = manager.create("Tokyo", "ss://aes-256-gcm:pw@1.2.3.4:8388".into())?;
/// assert!(!record.id.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProxyRecordManager<S: ProxyStore> {
    /// 持久化协作方
    store: S,
}

impl<S: ProxyStore> ProxyRecordManager<S> {
    /// 创建新的记录管理器
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 获取持久化协作方的引用
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 创建新的代理记录
    ///
    /// 名称校验在任何持久化调用之前完成；URL 输入先过解析器，
    /// 手工字段集直接进入校验。成功时由协作方分配 id 并返回存储
    /// 后的记录。
    ///
    /// 引擎能力检查（[`crate::engine::ensure_engine_available`]）
    /// 属于调用方的保存前流程，管理器内部不做。
    pub fn create(&self, name: &str, input: SettingsInput) -> Result<StoredProxy> {
        validate_name(name)?;
        let settings = self.resolve_settings(input)?;
        validate_settings(&settings)?;

        let record = self.store.create(name, &settings)?;
        log::info!(
            "Created proxy record '{}' ({}) as {}",
            record.name,
            record.proxy_settings.proxy_type.as_str(),
            record.id
        );
        Ok(record)
    }

    /// 按 id 原子替换代理记录
    ///
    /// 与创建走同一条校验流水线；id 不存在时返回
    /// [`crate::error::ProxyLinkError::NotFound`]，名称与设置不存在
    /// 部分更新。
    pub fn update(&self, id: &str, name: &str, input: SettingsInput) -> Result<StoredProxy> {
        validate_name(name)?;
        let settings = self.resolve_settings(input)?;
        validate_settings(&settings)?;

        let record = self.store.update(id, name, &settings)?;
        log::info!("Updated proxy record '{}' ({})", record.name, record.id);
        Ok(record)
    }

    /// 将输入归一化为规范设置记录
    fn resolve_settings(&self, input: SettingsInput) -> Result<ProxySettings> {
        match input {
            SettingsInput::Url(raw) => Ok(parse(&raw)?),
            SettingsInput::Fields(settings) => Ok(settings),
        }
    }
}
