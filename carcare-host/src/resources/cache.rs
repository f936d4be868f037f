//! # Asset Cache 模块
//!
//! 按逻辑路径缓存已解析的资源句柄。

use std::collections::HashMap;

/// 资源句柄缓存
///
/// 句柄只包含元数据（路径、尺寸、标记），clone 成本很低，
/// 因此不做驱逐。
#[derive(Debug)]
pub struct AssetCache<T> {
    entries: HashMap<String, T>,
    /// 统计：命中次数
    hits: u64,
    /// 统计：未命中次数
    misses: u64,
}

impl<T: Clone> AssetCache<T> {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// 获取缓存条目，未命中时用 `load` 生成并缓存
    pub fn get_or_insert_with(&mut self, key: &str, load: impl FnOnce() -> T) -> T {
        if let Some(entry) = self.entries.get(key) {
            self.hits += 1;
            return entry.clone();
        }

        self.misses += 1;
        let entry = load();
        self.entries.insert(key.to_string(), entry.clone());
        entry
    }

    /// 是否已缓存
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 缓存统计
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 缓存统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}
