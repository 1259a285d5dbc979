//! src/prompt.rs
//!
//! 把一次 Selection 拼装成发给工作流的描述文本。
//! 格式：镜头：RF 35mm f/1.8，拍摄场景：室内夜景人像，光线环境：低光环境，风格偏好：情绪/抑郁

use crate::selection::Selection;

/// 构建工作流的输入文本，纯函数，无副作用。
pub fn build_input_text(selection: &Selection) -> String {
    let mut parts = vec![
        format!("镜头：{}", selection.lens.description()),
        format!("拍摄场景：{}", selection.scene_text()),
        format!("光线环境：{}", selection.lighting.label()),
        format!("天气：{}", selection.weather.label()),
        format!("风格偏好：{}", selection.style.label()),
    ];

    // 闪光灯只在开启时写入描述
    if selection.flash {
        parts.push("闪光灯：开启".to_string());
    }

    parts.join("，")
}
