//! src/selection.rs
//!
//! 用户选择的拍摄条件：镜头、闪光灯、场景、光线、天气、风格。

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 可选镜头（Canon RF 卡口）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Lens {
    #[serde(rename = "55mm")]
    #[value(name = "55mm")]
    Prime55,
    #[serde(rename = "18-150mm")]
    #[value(name = "18-150mm")]
    Zoom18To150,
    #[serde(rename = "100-400mm")]
    #[value(name = "100-400mm")]
    Tele100To400,
}

impl Lens {
    pub const ALL: [Lens; 3] = [Lens::Prime55, Lens::Zoom18To150, Lens::Tele100To400];

    /// 完整镜头描述，保持原始格式
    pub fn description(&self) -> &'static str {
        match self {
            Lens::Prime55 => "RF 55mm f/1.8",
            Lens::Zoom18To150 => "RF 18-150mm f/3.5-6.3",
            Lens::Tele100To400 => "RF 100-400mm f/5.6-8",
        }
    }
}

/// 拍摄场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    PortraitNight,
    OutdoorSport,
    IndoorStill,
    OutdoorLandscape,
    Custom,
}

impl Scene {
    pub const ALL: [Scene; 5] = [
        Scene::PortraitNight,
        Scene::OutdoorSport,
        Scene::IndoorStill,
        Scene::OutdoorLandscape,
        Scene::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scene::PortraitNight => "室内夜景人像",
            Scene::OutdoorSport => "户外运动",
            Scene::IndoorStill => "室内静物",
            Scene::OutdoorLandscape => "户外风景",
            Scene::Custom => "自定义场景",
        }
    }
}

/// 光线环境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Dawn,
    Noon,
    Golden,
    Night,
}

impl Lighting {
    pub const ALL: [Lighting; 4] = [
        Lighting::Dawn,
        Lighting::Noon,
        Lighting::Golden,
        Lighting::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Lighting::Dawn => "清晨光线",
            Lighting::Noon => "正午强光",
            Lighting::Golden => "黄金时刻",
            Lighting::Night => "低光环境",
        }
    }
}

/// 天气情况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Overcast,
    Rainy,
    Foggy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Overcast,
        Weather::Rainy,
        Weather::Foggy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Sunny => "晴天",
            Weather::Cloudy => "多云",
            Weather::Overcast => "阴天",
            Weather::Rainy => "雨天",
            Weather::Foggy => "雾天",
        }
    }
}

/// 风格偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Japanese,
    Film,
    Blackwhite,
    Hk,
    Minimal,
    Cyberpunk,
    Morandi,
    Painting,
    Cinematic,
    Ins,
}

impl Style {
    pub const ALL: [Style; 10] = [
        Style::Japanese,
        Style::Film,
        Style::Blackwhite,
        Style::Hk,
        Style::Minimal,
        Style::Cyberpunk,
        Style::Morandi,
        Style::Painting,
        Style::Cinematic,
        Style::Ins,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Japanese => "日系小清新",
            Style::Film => "胶片复古",
            Style::Blackwhite => "高对比黑白",
            Style::Hk => "港风",
            Style::Minimal => "极简主义",
            Style::Cyberpunk => "赛博朋克",
            Style::Morandi => "莫兰迪色调",
            Style::Painting => "油画质感",
            Style::Cinematic => "电影感",
            Style::Ins => "INS风",
        }
    }
}

/// 一次生成动作的完整输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub lens: Lens,
    pub flash: bool,
    pub scene: Scene,
    #[serde(default)]
    pub custom_scene: String,
    pub lighting: Lighting,
    pub weather: Weather,
    pub style: Style,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            lens: Lens::Prime55,
            flash: false,
            scene: Scene::PortraitNight,
            custom_scene: String::new(),
            lighting: Lighting::Golden,
            weather: Weather::Sunny,
            style: Style::Japanese,
        }
    }
}

impl Selection {
    /// 提交前校验：自定义场景必须填写描述文字。
    pub fn validate(&self) -> Result<()> {
        if self.scene == Scene::Custom && self.custom_scene.trim().is_empty() {
            bail!("选择了自定义场景，但没有填写场景描述，请使用 --custom-scene 提供");
        }
        Ok(())
    }

    /// 场景的展示名：自定义场景优先使用用户输入的文字。
    pub fn scene_text(&self) -> &str {
        if self.scene == Scene::Custom && !self.custom_scene.trim().is_empty() {
            self.custom_scene.trim()
        } else {
            self.scene.label()
        }
    }
}
