//! src/history.rs
//!
//! 生成历史：配置目录下的单个 JSON 文件，最新在前，上限 50 条。
//! 所有操作都是整文件重写。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::api::params::CameraParams;
use crate::config::get_config_dir;
use crate::selection::Selection;

/// 历史记录条数上限，超出后最旧的条目被静默丢弃。
pub const HISTORY_CAP: usize = 50;

/// 一次成功生成的快照：输入 + 结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Local>,
    pub selection: Selection,
    pub params: CameraParams,
}

impl HistoryEntry {
    pub fn new(selection: Selection, params: CameraParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Local::now(),
            selection,
            params,
        }
    }
}

/// 历史记录存储管理器
pub struct HistoryStore {
    file_path: PathBuf,
}

impl HistoryStore {
    pub async fn new() -> Result<Self> {
        let config_dir = get_config_dir().await?;
        Ok(Self {
            file_path: config_dir.join("history.json"),
        })
    }

    /// 指定存储文件路径，测试用。
    pub fn at(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// 加载全部历史，最新在前。文件缺失或损坏按空历史处理。
    pub async fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .await
            .context("无法读取历史记录文件")?;
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("历史记录文件损坏，按空历史处理: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// 头部插入一条记录，然后截断到上限。
    pub async fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load().await?;
        entries.insert(0, entry);
        entries.truncate(HISTORY_CAP);
        self.save(&entries).await
    }

    /// 按 id（允许前缀匹配）删除一条记录，返回是否删除了东西。
    pub async fn remove(&self, id: &str) -> Result<bool> {
        if id.trim().is_empty() {
            return Ok(false);
        }
        let mut entries = self.load().await?;
        let before = entries.len();
        entries.retain(|e| !e.id.to_string().starts_with(id));
        let removed = entries.len() < before;
        if removed {
            self.save(&entries).await?;
        }
        Ok(removed)
    }

    /// 清空全部历史。
    pub async fn clear(&self) -> Result<()> {
        self.save(&[]).await
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.file_path, content)
            .await
            .context("无法写入历史记录文件")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::at(dir.path().join("history.json"))
    }

    fn entry() -> HistoryEntry {
        HistoryEntry::new(Selection::default(), CameraParams::default())
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("history.json"), "not json {").unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_prepends_newest_first() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let first = entry();
        let second = entry();
        store.append(first.clone()).await.unwrap();
        store.append(second.clone()).await.unwrap();

        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, second.id);
        assert_eq!(entries[1].id, first.id);
    }

    #[tokio::test]
    async fn cap_drops_the_oldest_entry() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let oldest = entry();
        store.append(oldest.clone()).await.unwrap();
        for _ in 0..HISTORY_CAP {
            store.append(entry()).await.unwrap();
        }

        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), HISTORY_CAP);
        assert!(entries.iter().all(|e| e.id != oldest.id));
    }

    #[tokio::test]
    async fn remove_by_id_prefix() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let target = entry();
        store.append(entry()).await.unwrap();
        store.append(target.clone()).await.unwrap();

        let prefix = target.id.to_string()[..8].to_string();
        assert!(store.remove(&prefix).await.unwrap());
        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|e| e.id != target.id));

        // 不存在的 id 什么都不删
        assert!(!store.remove("ffffffff").await.unwrap());
    }

    #[tokio::test]
    async fn clear_empties_the_file() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.append(entry()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn entry_round_trips_through_serde() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let mut original = entry();
        original.selection.flash = true;
        original.params.iso = 3200;
        original.params.contrast = -4;
        store.append(original.clone()).await.unwrap();

        let loaded = &store.load().await.unwrap()[0];
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.selection.flash, true);
        assert_eq!(loaded.selection.scene, original.selection.scene);
        assert_eq!(loaded.params, original.params);
    }
}
