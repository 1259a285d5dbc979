//! src/api/dify.rs
//!
//! 旧版 Dify 对话接口客户端。回复是一段自然语言 + 内嵌 JSON，
//! 字段是 camelCase，必需字段缺一即视为无效响应。

use std::time::Duration;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::params::{CameraParams, FlashSettings, DEFAULT_SHOOTING_MODE, DEFAULT_STYLE_NAME};
use super::RecommendationClient;
use crate::prompt::build_input_text;
use crate::selection::Selection;

lazy_static! {
    static ref EMBEDDED_JSON: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

#[derive(Serialize)]
struct DifyRequest<'a> {
    inputs: serde_json::Value,
    query: &'a str,
    response_mode: &'a str,
    conversation_id: &'a str,
    user: &'a str,
}

#[derive(Deserialize)]
struct DifyResponse {
    answer: Option<String>,
}

/// 模型被要求返回的 JSON 结构，camelCase 字段。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DifyParams {
    iso: i64,
    aperture: String,
    shutter_speed: String,
    white_balance: String,
    sharpness: i8,
    contrast: i8,
    saturation: i8,
    tone: i8,
    flash_mode: Option<String>,
    flash_power: Option<String>,
    flash_angle: Option<i64>,
    suggestion: String,
}

/// 从回复文本中提取并校验参数 JSON。
fn parse_answer(answer: &str) -> Result<CameraParams, ApiError> {
    let json_text = EMBEDDED_JSON
        .find(answer)
        .ok_or_else(|| ApiError::InvalidResponse("回复中没有找到参数 JSON".to_string()))?;
    let parsed: DifyParams = serde_json::from_str(json_text.as_str())
        .map_err(|e| ApiError::InvalidResponse(format!("参数 JSON 格式不正确: {e}")))?;

    let flash = parsed.flash_mode.map(|mode| FlashSettings {
        mode,
        hss_sync: false,
        power: parsed.flash_power.unwrap_or_default(),
        zoom: String::new(),
        angle: parsed
            .flash_angle
            .map(|a| format!("{a}°"))
            .unwrap_or_default(),
        diffuser_advice: String::new(),
    });

    Ok(CameraParams {
        shooting_mode: DEFAULT_SHOOTING_MODE.to_string(),
        iso: parsed.iso,
        aperture: parsed.aperture,
        shutter_speed: parsed.shutter_speed,
        exposure_compensation: "0".to_string(),
        white_balance: parsed.white_balance,
        white_balance_shift: String::new(),
        style_name: DEFAULT_STYLE_NAME.to_string(),
        sharpness: parsed.sharpness,
        contrast: parsed.contrast,
        saturation: parsed.saturation,
        tone: parsed.tone,
        scene_analysis: None,
        lens_advice: None,
        flash,
        suggestion: parsed.suggestion,
    })
}

/// 发给对话模型的完整指令，拍摄条件部分由 prompt 模块拼装。
fn build_query(selection: &Selection) -> String {
    format!(
        "你是一位专业的摄影参数顾问，专门为 Canon R50 相机和 Godox TT685II 闪光灯用户提供参数建议。\n\n\
         拍摄条件：{}\n\n\
         请严格按照 JSON 格式返回参数，字段：iso（数字）、aperture、shutterSpeed、whiteBalance、\
         sharpness（0-7）、contrast（-4 到 +4）、saturation（-4 到 +4）、tone（-4 到 +4）、\
         flashMode/flashPower/flashAngle（仅闪光灯开启时）、suggestion（不超过 30 字）。\
         不要添加任何解释文字。",
        build_input_text(selection)
    )
}

// --- 客户端实现 ---

pub struct DifyClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl DifyClient {
    pub fn new(endpoint: &str, token: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::Configuration("未设置 Dify API 地址".to_string()));
        }
        if token.trim().is_empty() {
            return Err(ApiError::Configuration("未设置 Dify API Key".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl RecommendationClient for DifyClient {
    fn name(&self) -> &str {
        "Dify"
    }

    async fn fetch(&self, selection: &Selection) -> Result<CameraParams, ApiError> {
        let query = build_query(selection);
        debug!("Dify 查询长度: {}", query.len());

        let res = self
            .client
            .post(format!("{}/chat-messages", self.endpoint))
            .bearer_auth(&self.token)
            .json(&DifyRequest {
                inputs: serde_json::json!({}),
                query: &query,
                response_mode: "blocking",
                conversation_id: "",
                user: "r50-user",
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let response: DifyResponse = res
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("响应不是合法 JSON: {e}")))?;
        let answer = response
            .answer
            .ok_or_else(|| ApiError::InvalidResponse("响应中缺少 answer 字段".to_string()))?;

        parse_answer(&answer)
    }
}
