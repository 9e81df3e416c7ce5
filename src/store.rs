//! 持久化协作方边界模块
//!
//! 核心不关心记录如何落盘，只通过 [`ProxyStore`] 这个抽象边界
//! 读写规范记录。协作方拥有记录列表的所有权并负责分配/回收 id，
//! 同时负责对同一 id 的并发写入做串行化；核心对每个逻辑请求
//! 至多调用一次协作方操作，不再附加额外锁。
//!
//! [`MemoryStore`] 是自带的参考实现，供测试与非持久化场景使用。

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{thread_rng, Rng};

use crate::error::{ProxyLinkError, Result};
use crate::types::{ProxySettings, StoredProxy};

/// 持久化协作方接口
///
/// `create`/`update` 返回时即视为原子且持久。核心绝不自行发明或
/// 复用 id；对已删除 id 的任何引用都按"未找到"处理。
pub trait ProxyStore {
    /// 分配新 id 并存储记录
    fn create(&self, name: &str, settings: &ProxySettings) -> Result<StoredProxy>;

    /// 按 id 原子替换记录（名称与设置一并替换，不存在部分更新）
    ///
    /// id 不存在时返回 [`ProxyLinkError::NotFound`]。
    fn update(&self, id: &str, name: &str, settings: &ProxySettings) -> Result<StoredProxy>;

    /// 按 id 查询记录
    fn get(&self, id: &str) -> Result<Option<StoredProxy>>;

    /// 列出全部记录
    fn list(&self) -> Result<Vec<StoredProxy>>;

    /// 按 id 删除记录，返回记录是否存在
    fn delete(&self, id: &str) -> Result<bool>;
}

/// 生成存储 id：`<unix 时间戳>-<8 位随机字母数字>`
fn generate_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = thread_rng();
    let suffix: String = (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    format!("{}-{}", timestamp, suffix)
}

/// 内存参考实现
///
/// 以互斥锁保护的映射保存记录，天然满足逐 id 写串行化的要求。
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, StoredProxy>>,
}

impl MemoryStore {
    /// 创建空的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredProxy>>> {
        self.records
            .lock()
            .map_err(|_| ProxyLinkError::store("memory store lock poisoned"))
    }
}

impl ProxyStore for MemoryStore {
    fn create(&self, name: &str, settings: &ProxySettings) -> Result<StoredProxy> {
        let mut records = self.lock()?;

        let mut id = generate_id();
        // 时间戳粒度内的罕见碰撞，换一个即可
        while records.contains_key(&id) {
            id = generate_id();
        }

        let record = StoredProxy {
            id: id.clone(),
            name: name.to_string(),
            proxy_settings: settings.clone(),
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, id: &str, name: &str, settings: &ProxySettings) -> Result<StoredProxy> {
        let mut records = self.lock()?;

        let record = records
            .get_mut(id)
            .ok_or_else(|| ProxyLinkError::not_found(id))?;
        record.name = name.to_string();
        record.proxy_settings = settings.clone();
        Ok(record.clone())
    }

    fn get(&self, id: &str) -> Result<Option<StoredProxy>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<StoredProxy>> {
        let mut all: Vec<StoredProxy> = self.lock()?.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.lock()?.remove(id).is_some())
    }
}
