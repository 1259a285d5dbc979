//! src/commands/init.rs

use anyhow::{Context, Result};

use crate::config;

pub async fn handle_init() -> Result<()> {
    let config_path = config::create_default_config()
        .await
        .context("初始化配置文件失败")?;
    println!("✅ 已创建默认配置文件: {}", config_path.display());
    println!("请在 [coze] 中填写 endpoint 与 token，或设置 COZE_API_URL / COZE_API_TOKEN 环境变量。");
    Ok(())
}
