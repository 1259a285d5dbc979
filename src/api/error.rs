//! src/api/error.rs

use thiserror::Error;

/// 远程推荐调用的错误分类。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 缺少 endpoint 或 token，在发起任何网络请求之前返回。
    #[error("API 配置缺失: {0}。请运行 `r50coach init` 生成配置文件并填写 endpoint 与 token，或设置 COZE_API_URL / COZE_API_TOKEN 环境变量")]
    Configuration(String),

    /// 服务端返回非 200 状态码。
    #[error("API 请求失败: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// 200 响应但 body 不是任何已知的返回格式。
    #[error("API 返回数据无效: {0}")]
    InvalidResponse(String),

    /// 传输层失败：超时、DNS、连接中断。
    #[error("网络请求异常: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// 是否属于可以降级为本地 mock 数据的服务端故障。
    /// 5xx 与传输层错误可降级，4xx 始终向用户报告。
    pub fn is_server_failure(&self) -> bool {
        match self {
            ApiError::Remote { status, .. } => *status >= 500,
            ApiError::Network(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_carries_the_status_code() {
        let err = ApiError::Remote {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn only_5xx_qualifies_as_server_failure() {
        let bad_gateway = ApiError::Remote {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        let unauthorized = ApiError::Remote {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(bad_gateway.is_server_failure());
        assert!(!unauthorized.is_server_failure());
        assert!(!ApiError::Configuration("x".into()).is_server_failure());
    }
}
