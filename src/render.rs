//! src/render.rs
//!
//! 终端输出：把一次推荐结果渲染成带颜色的参数卡片。

use colored::Colorize;

use crate::api::params::CameraParams;
use crate::selection::Selection;

/// 带符号显示风格数值（+2 / -1 / 0）
fn signed(value: i8) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// 打印当前的拍摄条件摘要。
pub fn render_selection(selection: &Selection) {
    println!("📋 拍摄条件:");
    println!("  - 镜头: {}", selection.lens.description().cyan());
    println!("  - 场景: {}", selection.scene_text().cyan());
    println!("  - 光线: {}", selection.lighting.label().cyan());
    println!("  - 天气: {}", selection.weather.label().cyan());
    println!("  - 风格: {}", selection.style.label().cyan());
    println!(
        "  - 闪光灯: {}",
        if selection.flash {
            "开启".yellow()
        } else {
            "关闭".normal()
        }
    );
}

/// 打印完整的参数卡片。
pub fn render_params(params: &CameraParams) {
    println!("\n{}\n", "=".repeat(60));

    if let Some(analysis) = &params.scene_analysis {
        println!("🔍 场景分析: {}", analysis.summary);
        if !analysis.difficulty_level.is_empty() {
            println!("   难度: {}", analysis.difficulty_level.yellow());
        }
        println!();
    }

    if let Some(lens) = &params.lens_advice {
        println!("🔭 镜头推荐: {} ({})", lens.focal_length.cyan(), lens.reason);
        println!();
    }

    println!("📷 相机设置:");
    println!("  拍摄模式   {}", params.shooting_mode.green().bold());
    println!("  ISO        {}", params.iso.to_string().green().bold());
    println!("  光圈       {}", params.aperture.green().bold());
    println!("  快门速度   {}", params.shutter_speed.green().bold());
    println!("  曝光补偿   {}", params.exposure_compensation.green());
    if params.white_balance_shift.is_empty() {
        println!("  白平衡     {}", params.white_balance.green());
    } else {
        println!(
            "  白平衡     {} (偏移 {})",
            params.white_balance.green(),
            params.white_balance_shift
        );
    }

    println!("\n🎨 照片风格 ({}):", params.style_name);
    println!("  锐度       {}", signed(params.sharpness));
    println!("  反差       {}", signed(params.contrast));
    println!("  饱和度     {}", signed(params.saturation));
    println!("  色调       {}", signed(params.tone));

    if let Some(flash) = &params.flash {
        println!("\n⚡ 闪光灯 (Godox TT685II):");
        println!("  模式       {}", flash.mode.yellow());
        println!("  功率       {}", flash.power.yellow());
        if !flash.zoom.is_empty() {
            println!("  变焦       {}", flash.zoom);
        }
        if !flash.angle.is_empty() {
            println!("  灯头角度   {}", flash.angle);
        }
        if flash.hss_sync {
            println!("  高速同步   开启");
        }
        if !flash.diffuser_advice.is_empty() {
            println!("  柔光建议   {}", flash.diffuser_advice);
        }
    }

    println!("\n💡 {}", params.suggestion.cyan());
    println!("\n{}", "=".repeat(60));
}
