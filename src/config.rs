//! src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Returns the configuration directory path (~/.config/r50coach).
pub async fn get_config_dir() -> Result<PathBuf> {
    let config_dir = if cfg!(windows) {
        // Windows: %APPDATA%\r50coach
        dirs::data_dir()
            .map(|p| p.join("r50coach"))
            .context("Could not get data directory")?
    } else {
        // Linux/macOS: ~/.config/r50coach
        dirs::config_dir()
            .map(|p| p.join("r50coach"))
            .context("Could not get config directory")?
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .context("Could not create config directory")?;
    }
    Ok(config_dir)
}

/// 服务端 5xx / 网络故障时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerErrorPolicy {
    /// 把错误原样报告给用户
    #[default]
    Fail,
    /// 降级为本地规则生成的参数
    Mock,
}

/// 单个推荐服务端点的配置。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointConfig {
    /// 服务地址，如 https://xxx.coze.site/run
    pub endpoint: String,
    /// Bearer Token
    pub token: String,
    /// 客户端超时（秒）。工作流响应较慢，不要设得太短。
    pub timeout_secs: u64,
}

/// Represents the main configuration for the application.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// 推荐服务提供方："coze"（默认）或 "dify"（旧版）
    pub provider: String,
    /// 服务端故障时降级还是报错
    #[serde(default)]
    pub on_server_error: ServerErrorPolicy,
    pub coze: EndpointConfig,
    pub dify: EndpointConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "coze".to_string(),
            on_server_error: ServerErrorPolicy::Fail,
            coze: EndpointConfig {
                endpoint: String::new(),
                token: String::new(),
                timeout_secs: 60,
            },
            dify: EndpointConfig {
                endpoint: String::new(),
                token: String::new(),
                timeout_secs: 30,
            },
        }
    }
}

/// Creates a default configuration file if one does not exist.
pub async fn create_default_config() -> Result<PathBuf> {
    let config_dir = get_config_dir().await?;
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        let config_content = toml::to_string(&Config::default())?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(config_content.as_bytes()).await?;
    }

    Ok(config_path)
}

/// 加载配置：先读 TOML 文件，再用环境变量覆盖 endpoint/token。
/// 原版从构建期环境变量取这两个值，这里保留同样的覆盖通道。
pub async fn load_config() -> Result<Config> {
    let config_dir = get_config_dir().await?;
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        create_default_config().await?;
    }

    let config_content = fs::read_to_string(config_path)
        .await
        .context("Could not read config file")?;
    let mut config: Config =
        toml::from_str(&config_content).context("Could not parse config file")?;

    if let Ok(url) = env::var("COZE_API_URL") {
        config.coze.endpoint = url;
    }
    if let Ok(token) = env::var("COZE_API_TOKEN") {
        config.coze.token = token;
    }
    if let Ok(url) = env::var("DIFY_API_URL") {
        config.dify.endpoint = url;
    }
    if let Ok(key) = env::var("DIFY_API_KEY") {
        config.dify.token = key;
    }

    Ok(config)
}
