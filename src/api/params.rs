//! src/api/params.rs
//!
//! 归一化后的相机参数结果。三种后端返回格式都会被整形为这个结构。

use serde::{Deserialize, Serialize};

// 缺省值，与工作流缺字段时的降级行为保持一致
pub const DEFAULT_SHOOTING_MODE: &str = "M";
pub const DEFAULT_ISO: i64 = 400;
pub const DEFAULT_APERTURE: &str = "f/2.8";
pub const DEFAULT_SHUTTER_SPEED: &str = "1/125";
pub const DEFAULT_WHITE_BALANCE: &str = "5200K";
pub const DEFAULT_STYLE_NAME: &str = "User Def 1";
pub const DEFAULT_SUGGESTION: &str = "请根据实际情况调整参数";

/// 场景分析（可选子对象）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    pub summary: String,
    pub difficulty_level: String,
}

/// 镜头推荐（可选子对象）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensAdvice {
    pub focal_length: String,
    pub reason: String,
}

/// 闪光灯（Godox TT685II）设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSettings {
    pub mode: String,
    pub hss_sync: bool,
    pub power: String,
    pub zoom: String,
    pub angle: String,
    pub diffuser_advice: String,
}

/// 一次推荐的完整结果。
/// 数值风格字段（锐度 0..7，反差/饱和度/色调 -4..+4）按服务端返回原样保留，不做钳制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    pub shooting_mode: String,
    pub iso: i64,
    pub aperture: String,
    pub shutter_speed: String,
    pub exposure_compensation: String,
    pub white_balance: String,
    pub white_balance_shift: String,
    pub style_name: String,
    pub sharpness: i8,
    pub contrast: i8,
    pub saturation: i8,
    pub tone: i8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_analysis: Option<SceneAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_advice: Option<LensAdvice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash: Option<FlashSettings>,
    pub suggestion: String,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            shooting_mode: DEFAULT_SHOOTING_MODE.to_string(),
            iso: DEFAULT_ISO,
            aperture: DEFAULT_APERTURE.to_string(),
            shutter_speed: DEFAULT_SHUTTER_SPEED.to_string(),
            exposure_compensation: "0".to_string(),
            white_balance: DEFAULT_WHITE_BALANCE.to_string(),
            white_balance_shift: String::new(),
            style_name: DEFAULT_STYLE_NAME.to_string(),
            sharpness: 0,
            contrast: 0,
            saturation: 0,
            tone: 0,
            scene_analysis: None,
            lens_advice: None,
            flash: None,
            suggestion: DEFAULT_SUGGESTION.to_string(),
        }
    }
}
