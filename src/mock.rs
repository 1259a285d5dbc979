//! src/mock.rs
//!
//! 本地规则生成的参数，用于 --offline 模式和服务端故障降级。
//! 规则照搬线上工作流上线前的本地推导逻辑。

use crate::api::params::{CameraParams, FlashSettings};
use crate::selection::{Lens, Lighting, Scene, Selection, Style, Weather};

/// 根据拍摄条件本地推导一组参数，确定性、无副作用。
pub fn generate(selection: &Selection) -> CameraParams {
    // 基础曝光参数由光线环境决定
    let (mut iso, shutter_speed) = match selection.lighting {
        Lighting::Dawn => (400, "1/60"),
        Lighting::Noon => (100, "1/250"),
        Lighting::Golden => (200, "1/125"),
        Lighting::Night => {
            if selection.flash {
                (400, "1/60")
            } else {
                (1600, "1/30")
            }
        }
    };

    // 光圈取镜头的最大可用值
    let aperture = match selection.lens {
        Lens::Prime55 => "f/1.8",
        Lens::Zoom18To150 => "f/4.5",
        Lens::Tele100To400 => "f/5.6",
    };

    // 风格决定照片风格四项
    let (sharpness, mut contrast, saturation, tone) = match selection.style {
        Style::Japanese => (2, -1, -1, 1),
        Style::Film => (3, 1, -2, 0),
        Style::Blackwhite => (5, 2, -4, 0),
        Style::Hk => (4, 2, 1, -1),
        Style::Minimal => (3, -2, -3, 0),
        Style::Cyberpunk => (5, 3, 2, 0),
        Style::Morandi => (2, -1, -2, 1),
        Style::Painting => (1, 1, 1, 1),
        Style::Cinematic => (3, 2, 0, -1),
        Style::Ins => (4, 1, 1, 1),
    };

    // 天气修正 ISO
    match selection.weather {
        Weather::Sunny => iso = (iso - 100).max(100),
        Weather::Cloudy => iso = (iso as f64 * 1.2).round() as i64,
        Weather::Overcast => iso = (iso as f64 * 1.5).round() as i64,
        Weather::Rainy => iso *= 2,
        Weather::Foggy => {
            iso = (iso as f64 * 1.8).round() as i64;
            contrast = (contrast - 1).max(-4);
        }
    }

    // 白平衡
    let white_balance = match (selection.lighting, selection.weather) {
        (_, Weather::Cloudy) | (_, Weather::Overcast) => "6000K",
        (Lighting::Golden, _) => "5200K",
        (Lighting::Night, _) => "3200K",
        _ => "AWB",
    };

    // 操作建议
    let mut suggestion = match selection.scene {
        Scene::OutdoorSport => "建议使用 Tv 档，开启伺服对焦".to_string(),
        Scene::IndoorStill => "建议使用 Av 档，使用三脚架稳定".to_string(),
        Scene::OutdoorLandscape => "建议使用 Av 档，使用小光圈增加景深".to_string(),
        _ => "请使用 M 档，开启眼部对焦".to_string(),
    };
    match selection.weather {
        Weather::Rainy => suggestion.push_str("，注意相机防水保护"),
        Weather::Foggy => suggestion.push_str("，建议增加曝光补偿"),
        _ => {}
    }

    let flash = selection.flash.then(|| FlashSettings {
        mode: "TTL".to_string(),
        hss_sync: false,
        power: "1/16".to_string(),
        zoom: "50mm".to_string(),
        angle: "45°".to_string(),
        diffuser_advice: "建议使用柔光罩".to_string(),
    });

    CameraParams {
        iso,
        aperture: aperture.to_string(),
        shutter_speed: shutter_speed.to_string(),
        white_balance: white_balance.to_string(),
        style_name: selection.style.label().to_string(),
        sharpness,
        contrast,
        saturation,
        tone,
        flash,
        suggestion,
        ..CameraParams::default()
    }
}
