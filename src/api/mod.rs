//! src/api/mod.rs

use async_trait::async_trait;

pub mod coze;
pub mod dify;
pub mod error;
pub mod params;

pub use coze::CozeClient;
pub use dify::DifyClient;
pub use error::ApiError;
pub use params::CameraParams;

use crate::config::Config;
use crate::selection::Selection;

/// 远程推荐客户端的统一接口。
/// 单次调用、不重试，超时由各客户端的 reqwest 配置兜底。
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// 客户端名称
    fn name(&self) -> &str;
    /// 根据一次 Selection 获取归一化的相机参数推荐。
    async fn fetch(&self, selection: &Selection) -> Result<CameraParams, ApiError>;
}

/// 已配置的推荐服务提供方。
pub enum Provider {
    Coze(CozeClient),
    Dify(DifyClient),
}

impl Provider {
    /// 按配置选择提供方。endpoint/token 缺失在这里提前失败，不发起任何网络请求。
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        match config.provider.as_str() {
            "coze" => Ok(Provider::Coze(CozeClient::new(
                &config.coze.endpoint,
                &config.coze.token,
                config.coze.timeout_secs,
            )?)),
            "dify" => Ok(Provider::Dify(DifyClient::new(
                &config.dify.endpoint,
                &config.dify.token,
                config.dify.timeout_secs,
            )?)),
            other => Err(ApiError::Configuration(format!(
                "未知的 provider: {other}，支持 coze / dify"
            ))),
        }
    }

    pub fn as_client(&self) -> &dyn RecommendationClient {
        match self {
            Provider::Coze(c) => c,
            Provider::Dify(c) => c,
        }
    }
}

#[async_trait]
impl RecommendationClient for Provider {
    fn name(&self) -> &str {
        self.as_client().name()
    }

    async fn fetch(&self, selection: &Selection) -> Result<CameraParams, ApiError> {
        match self {
            Provider::Coze(c) => c.fetch(selection).await,
            Provider::Dify(c) => c.fetch(selection).await,
        }
    }
}
