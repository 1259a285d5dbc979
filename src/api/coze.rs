//! src/api/coze.rs
//!
//! 扣子工作流客户端。三代后端共存过三种返回格式：
//! 富格式（optimized_params）、扁平格式（顶层 iso/aperture）、
//! 文本格式（output_text 内嵌 JSON）。这里用一个 untagged 枚举嗅探格式，
//! 每种格式一个适配器，统一整形为 `CameraParams`。

use std::time::Duration;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::params::{
    CameraParams, FlashSettings, LensAdvice, SceneAnalysis, DEFAULT_APERTURE, DEFAULT_ISO,
    DEFAULT_SHOOTING_MODE, DEFAULT_SHUTTER_SPEED, DEFAULT_SUGGESTION, DEFAULT_WHITE_BALANCE,
    DEFAULT_STYLE_NAME,
};
use super::RecommendationClient;
use crate::prompt::build_input_text;
use crate::selection::Selection;

lazy_static! {
    static ref EMBEDDED_JSON: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

// --- 请求/响应数据结构 ---

#[derive(Serialize)]
struct CozeRequest<'a> {
    input_text: &'a str,
}

/// 三种已知返回格式的并集，按声明顺序嗅探。
#[derive(Deserialize)]
#[serde(untagged)]
enum CozeReply {
    Rich { optimized_params: OptimizedParams },
    Flat(FlatParams),
    Text(TextReply),
}

#[derive(Deserialize)]
struct TextReply {
    #[serde(alias = "data", alias = "output")]
    output_text: String,
}

#[derive(Deserialize)]
struct OptimizedParams {
    scene_analysis: Option<RawSceneAnalysis>,
    lens_recommendation: Option<RawLensRecommendation>,
    camera_settings_r50: Option<RawCameraSettings>,
    picture_style_settings: Option<RawPictureStyle>,
    flash_godox_tt685ii: Option<RawFlash>,
    expert_advice: Option<String>,
}

#[derive(Deserialize)]
struct RawSceneAnalysis {
    summary: Option<String>,
    difficulty_level: Option<String>,
}

#[derive(Deserialize)]
struct RawLensRecommendation {
    focal_length: Option<String>,
    reason: Option<String>,
}

#[derive(Deserialize)]
struct RawCameraSettings {
    shooting_mode: Option<String>,
    aperture: Option<String>,
    shutter_speed: Option<String>,
    iso: Option<i64>,
    exposure_compensation: Option<String>,
    white_balance: Option<RawWhiteBalance>,
}

#[derive(Deserialize)]
struct RawWhiteBalance {
    mode_or_kelvin: Option<String>,
    shift: Option<String>,
}

#[derive(Deserialize)]
struct RawPictureStyle {
    style_name: Option<String>,
    sharpness: Option<i8>,
    contrast: Option<i8>,
    saturation: Option<i8>,
    color_tone: Option<i8>,
}

#[derive(Deserialize)]
struct RawFlash {
    enable: Option<bool>,
    mode: Option<String>,
    hss_sync: Option<bool>,
    power_or_comp: Option<String>,
    zoom: Option<String>,
    head_angle: Option<String>,
    diffuser_advice: Option<String>,
}

/// 扁平格式，也是文本格式内嵌 JSON 的目标结构。
/// iso 和 aperture 作为嗅探判据必须存在，其余字段全部可缺省。
#[derive(Deserialize)]
struct FlatParams {
    iso: i64,
    aperture: String,
    shooting_mode: Option<String>,
    shutter_speed: Option<String>,
    exposure_compensation: Option<String>,
    white_balance: Option<FlatWhiteBalance>,
    style_name: Option<String>,
    sharpness: Option<i8>,
    contrast: Option<i8>,
    saturation: Option<i8>,
    tone: Option<i8>,
    scene_analysis: Option<RawSceneAnalysis>,
    lens_recommendation: Option<RawLensRecommendation>,
    flash_godox_tt685ii: Option<FlatFlash>,
    suggestion: Option<String>,
}

#[derive(Deserialize)]
struct FlatWhiteBalance {
    mode: Option<String>,
    shift: Option<String>,
}

#[derive(Deserialize)]
struct FlatFlash {
    mode: Option<String>,
    hss_sync: Option<bool>,
    power: Option<String>,
    zoom: Option<String>,
    angle: Option<String>,
    diffuser_advice: Option<String>,
}

// --- 格式适配 ---

fn adapt_scene_analysis(raw: RawSceneAnalysis) -> SceneAnalysis {
    SceneAnalysis {
        summary: raw.summary.unwrap_or_default(),
        difficulty_level: raw.difficulty_level.unwrap_or_default(),
    }
}

fn adapt_lens_recommendation(raw: RawLensRecommendation) -> LensAdvice {
    LensAdvice {
        focal_length: raw.focal_length.unwrap_or_default(),
        reason: raw.reason.unwrap_or_default(),
    }
}

/// 富格式：optimized_params.camera_settings_r50 为必需，其余字段逐项降级。
fn from_rich(optimized: OptimizedParams) -> Result<CameraParams, ApiError> {
    let settings = optimized.camera_settings_r50.ok_or_else(|| {
        ApiError::InvalidResponse("缺少 camera_settings_r50 字段".to_string())
    })?;
    let style = optimized.picture_style_settings;
    let flash = optimized.flash_godox_tt685ii.filter(|f| f.enable.unwrap_or(false));

    Ok(CameraParams {
        shooting_mode: settings
            .shooting_mode
            .unwrap_or_else(|| DEFAULT_SHOOTING_MODE.to_string()),
        iso: settings.iso.unwrap_or(DEFAULT_ISO),
        aperture: settings
            .aperture
            .unwrap_or_else(|| DEFAULT_APERTURE.to_string()),
        shutter_speed: settings
            .shutter_speed
            .unwrap_or_else(|| DEFAULT_SHUTTER_SPEED.to_string()),
        exposure_compensation: settings.exposure_compensation.unwrap_or_else(|| "0".to_string()),
        white_balance: settings
            .white_balance
            .as_ref()
            .and_then(|wb| wb.mode_or_kelvin.clone())
            .unwrap_or_else(|| DEFAULT_WHITE_BALANCE.to_string()),
        white_balance_shift: settings
            .white_balance
            .and_then(|wb| wb.shift)
            .unwrap_or_default(),
        style_name: style
            .as_ref()
            .and_then(|s| s.style_name.clone())
            .unwrap_or_else(|| DEFAULT_STYLE_NAME.to_string()),
        sharpness: style.as_ref().and_then(|s| s.sharpness).unwrap_or(0),
        contrast: style.as_ref().and_then(|s| s.contrast).unwrap_or(0),
        saturation: style.as_ref().and_then(|s| s.saturation).unwrap_or(0),
        tone: style.as_ref().and_then(|s| s.color_tone).unwrap_or(0),
        scene_analysis: optimized.scene_analysis.map(adapt_scene_analysis),
        lens_advice: optimized.lens_recommendation.map(adapt_lens_recommendation),
        flash: flash.map(|f| FlashSettings {
            mode: f.mode.unwrap_or_else(|| "TTL".to_string()),
            hss_sync: f.hss_sync.unwrap_or(false),
            power: f.power_or_comp.unwrap_or_default(),
            zoom: f.zoom.unwrap_or_default(),
            angle: f.head_angle.unwrap_or_default(),
            diffuser_advice: f.diffuser_advice.unwrap_or_default(),
        }),
        suggestion: optimized
            .expert_advice
            .unwrap_or_else(|| DEFAULT_SUGGESTION.to_string()),
    })
}

fn from_flat(flat: FlatParams) -> CameraParams {
    CameraParams {
        shooting_mode: flat
            .shooting_mode
            .unwrap_or_else(|| DEFAULT_SHOOTING_MODE.to_string()),
        iso: flat.iso,
        aperture: flat.aperture,
        shutter_speed: flat
            .shutter_speed
            .unwrap_or_else(|| DEFAULT_SHUTTER_SPEED.to_string()),
        exposure_compensation: flat.exposure_compensation.unwrap_or_else(|| "0".to_string()),
        white_balance: flat
            .white_balance
            .as_ref()
            .and_then(|wb| wb.mode.clone())
            .unwrap_or_else(|| DEFAULT_WHITE_BALANCE.to_string()),
        white_balance_shift: flat
            .white_balance
            .and_then(|wb| wb.shift)
            .unwrap_or_default(),
        style_name: flat
            .style_name
            .unwrap_or_else(|| DEFAULT_STYLE_NAME.to_string()),
        sharpness: flat.sharpness.unwrap_or(0),
        contrast: flat.contrast.unwrap_or(0),
        saturation: flat.saturation.unwrap_or(0),
        tone: flat.tone.unwrap_or(0),
        scene_analysis: flat.scene_analysis.map(adapt_scene_analysis),
        lens_advice: flat.lens_recommendation.map(adapt_lens_recommendation),
        flash: flat.flash_godox_tt685ii.map(|f| FlashSettings {
            mode: f.mode.unwrap_or_else(|| "TTL".to_string()),
            hss_sync: f.hss_sync.unwrap_or(false),
            power: f.power.unwrap_or_default(),
            zoom: f.zoom.unwrap_or_default(),
            angle: f.angle.unwrap_or_default(),
            diffuser_advice: f.diffuser_advice.unwrap_or_default(),
        }),
        suggestion: flat
            .suggestion
            .unwrap_or_else(|| DEFAULT_SUGGESTION.to_string()),
    }
}

/// 最老的文本格式：output_text 中内嵌一段 JSON。
/// 提取失败时按原实现降级为全默认参数，不报错。
fn from_text(output_text: &str) -> CameraParams {
    let parsed = EMBEDDED_JSON
        .find(output_text)
        .and_then(|m| serde_json::from_str::<FlatParams>(m.as_str()).ok());
    match parsed {
        Some(flat) => from_flat(flat),
        None => {
            warn!("无法从 output_text 中提取参数 JSON，使用默认值");
            CameraParams::default()
        }
    }
}

/// 把 200 响应的 body 整形为 CameraParams。
fn decode_body(body: &str) -> Result<CameraParams, ApiError> {
    let reply: CozeReply = serde_json::from_str(body).map_err(|_| {
        ApiError::InvalidResponse("缺少 optimized_params 字段，且不是已知的扁平或文本格式".to_string())
    })?;

    match reply {
        CozeReply::Rich { optimized_params } => from_rich(optimized_params),
        CozeReply::Flat(flat) => Ok(from_flat(flat)),
        CozeReply::Text(text) => Ok(from_text(&text.output_text)),
    }
}

// --- 客户端实现 ---

pub struct CozeClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl CozeClient {
    pub fn new(endpoint: &str, token: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::Configuration("未设置扣子 API 地址".to_string()));
        }
        if token.trim().is_empty() {
            return Err(ApiError::Configuration("未设置扣子 API Token".to_string()));
        }

        // 工作流响应较慢（约 20-30 秒），超时必须放宽
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            token: token.trim().to_string(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl RecommendationClient for CozeClient {
    fn name(&self) -> &str {
        "Coze"
    }

    async fn fetch(&self, selection: &Selection) -> Result<CameraParams, ApiError> {
        let input_text = build_input_text(selection);
        debug!("扣子输入文本: {}", input_text);

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&CozeRequest {
                input_text: &input_text,
            })
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!("扣子响应状态: {}，body 长度: {}", status, body.len());

        if !status.is_success() {
            // 错误 body 里通常带 message 或 error 字段
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .or_else(|| v.get("error"))
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("未知错误").to_string());
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&body)
    }
}
