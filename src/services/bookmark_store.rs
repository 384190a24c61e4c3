//! 书签服务 - 业务能力层
//!
//! 维护已收藏的题目 id，每次修改后立即写回存储

use crate::error::StorageError;
use crate::infrastructure::KeyValueStore;
use tracing::{debug, warn};

/// 书签在存储中的键
pub const BOOKMARKS_KEY: &str = "bookmarkedQuestions";

/// 书签服务
///
/// 职责：
/// - id 升序且不重复，切换两次后存储内容与切换前完全一致
/// - toggle 后同步持久化
/// - 不关心界面如何刷新
pub struct BookmarkStore<S> {
    store: S,
    ids: Vec<i64>,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// 从存储加载书签，缺失或损坏时为空
    ///
    /// 存储里的值与规整后的编码（升序、去重、无空白）不一致时立即写回
    pub fn load(store: S) -> Self {
        let (ids, rewrite) = match store.get(BOOKMARKS_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<i64>>(&raw) {
                Ok(raw_ids) => {
                    let ids = normalize(raw_ids);
                    let rewrite = serde_json::to_string(&ids).map_or(false, |encoded| encoded != raw);
                    (ids, rewrite)
                }
                Err(e) => {
                    warn!("⚠️ 书签数据损坏，已忽略: {}", e);
                    (Vec::new(), false)
                }
            },
            None => (Vec::new(), false),
        };
        debug!("已加载 {} 个书签", ids.len());

        let mut bookmarks = Self { store, ids };
        if rewrite {
            debug!("书签顺序已规整，写回存储");
            if let Err(e) = bookmarks.persist() {
                warn!("⚠️ 书签写回失败: {}", e);
            }
        }
        bookmarks
    }

    pub fn is_bookmarked(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// 升序排列的 id
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 切换收藏状态并写回存储，返回切换后的状态
    ///
    /// 写入失败时内存中的状态已经切换，错误交给调用方提示
    pub fn toggle(&mut self, id: i64) -> Result<bool, StorageError> {
        let bookmarked = match self.ids.binary_search(&id) {
            Ok(index) => {
                self.ids.remove(index);
                false
            }
            Err(index) => {
                self.ids.insert(index, id);
                true
            }
        };
        debug!("书签 #{} -> {}", id, bookmarked);
        self.persist()?;
        Ok(bookmarked)
    }

    /// 底层存储，供主题等其他键共用
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.ids).map_err(|source| StorageError::Corrupt {
            key: BOOKMARKS_KEY.to_string(),
            source,
        })?;
        self.store.set(BOOKMARKS_KEY, encoded)
    }
}

fn normalize(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    #[test]
    fn starts_empty_without_storage() {
        let store = BookmarkStore::load(MemoryStore::new());
        assert!(store.is_empty());
        assert!(!store.is_bookmarked(1));
    }

    #[test]
    fn loads_persisted_ids_sorted_without_duplicates() {
        let store = BookmarkStore::load(MemoryStore::new().with_entry(BOOKMARKS_KEY, "[5,2,5,9]"));
        assert_eq!(store.ids(), &[2, 5, 9]);
        assert_eq!(store.storage().get(BOOKMARKS_KEY).as_deref(), Some("[2,5,9]"));
    }

    #[test]
    fn unordered_value_is_rewritten_and_double_toggle_keeps_it() {
        let mut store = BookmarkStore::load(MemoryStore::new().with_entry(BOOKMARKS_KEY, "[2,1]"));
        let before = store.storage().get(BOOKMARKS_KEY);
        assert_eq!(before.as_deref(), Some("[1,2]"));

        store.toggle(1).unwrap();
        store.toggle(1).unwrap();
        assert_eq!(store.storage().get(BOOKMARKS_KEY), before);
    }

    #[test]
    fn spaced_value_is_rewritten_compactly() {
        let mut store = BookmarkStore::load(MemoryStore::new().with_entry(BOOKMARKS_KEY, "[ 1, 2 ]"));
        assert_eq!(store.storage().get(BOOKMARKS_KEY).as_deref(), Some("[1,2]"));

        store.toggle(7).unwrap();
        store.toggle(7).unwrap();
        assert_eq!(store.storage().get(BOOKMARKS_KEY).as_deref(), Some("[1,2]"));
    }

    #[test]
    fn corrupt_value_is_ignored() {
        let store = BookmarkStore::load(MemoryStore::new().with_entry(BOOKMARKS_KEY, "[1,"));
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut store = BookmarkStore::load(MemoryStore::new());
        assert!(store.toggle(4).unwrap());
        assert!(store.is_bookmarked(4));
        assert_eq!(store.storage().get(BOOKMARKS_KEY).as_deref(), Some("[4]"));

        assert!(!store.toggle(4).unwrap());
        assert!(!store.is_bookmarked(4));
        assert_eq!(store.storage().get(BOOKMARKS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn double_toggle_restores_membership_and_persisted_value() {
        let mut store = BookmarkStore::load(MemoryStore::new());
        store.toggle(8).unwrap();
        store.toggle(3).unwrap();
        let before = store.storage().get(BOOKMARKS_KEY);
        assert_eq!(before.as_deref(), Some("[3,8]"));

        for id in [3, 11] {
            store.toggle(id).unwrap();
            store.toggle(id).unwrap();
            assert_eq!(store.ids(), &[3, 8]);
            assert_eq!(store.storage().get(BOOKMARKS_KEY), before);
        }
    }
}
