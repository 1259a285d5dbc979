//! src/commands/history.rs

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::HistoryAction;
use crate::history::HistoryStore;
use crate::render;

pub async fn handle_history(action: Option<HistoryAction>) -> Result<()> {
    let store = HistoryStore::new().await?;

    match action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => {
            let entries = store.load().await?;
            if entries.is_empty() {
                println!("{}", "暂无历史记录。".yellow());
                return Ok(());
            }

            println!("共 {} 条历史记录（最新在前）:\n", entries.len());
            for entry in &entries {
                let short_id = &entry.id.to_string()[..8];
                let flash_mark = if entry.selection.flash { " ⚡" } else { "" };
                println!(
                    "  {}  {}  {} | {} | ISO {} | {}{}",
                    short_id.dimmed(),
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.selection.lens.description().cyan(),
                    entry.selection.scene_text(),
                    entry.params.iso,
                    entry.params.aperture,
                    flash_mark
                );
            }
            println!("\n使用 `r50coach history show <id>` 查看完整参数。");
        }
        HistoryAction::Show { id } => {
            let entries = store.load().await?;
            let entry = entries
                .iter()
                .find(|e| e.id.to_string().starts_with(&id));
            match entry {
                Some(entry) => {
                    println!(
                        "🕐 {}  ({})",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.id.to_string().dimmed()
                    );
                    render::render_selection(&entry.selection);
                    render::render_params(&entry.params);
                }
                None => bail!("没有找到 id 为 {} 的历史记录", id),
            }
        }
        HistoryAction::Delete { id } => {
            if store.remove(&id).await? {
                println!("🗑️ 已删除历史记录 {}", id);
            } else {
                bail!("没有找到 id 为 {} 的历史记录", id);
            }
        }
        HistoryAction::Clear { yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("确定要清空所有历史记录吗？此操作不可恢复。")
                    .default(false)
                    .interact()?;
            if confirmed {
                store.clear().await?;
                println!("✅ 历史记录已清空。");
            } else {
                println!("好的，操作已取消。");
            }
        }
    }

    Ok(())
}
