//! src/commands/generate.rs

use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::ProgressBar;
use log::warn;

use crate::api::{Provider, RecommendationClient};
use crate::cli::GenerateArgs;
use crate::config::{self, ServerErrorPolicy};
use crate::history::{HistoryEntry, HistoryStore};
use crate::mock;
use crate::render;
use crate::selection::{Lens, Lighting, Scene, Selection, Style, Weather};

pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    let selection = if args.wants_interactive() {
        prompt_selection()?
    } else {
        selection_from_args(&args)
    };
    // 自定义场景必须有描述，校验在任何网络请求之前
    selection.validate()?;

    render::render_selection(&selection);

    let params = if args.offline {
        println!("{}", "离线模式：使用本地规则生成参数".yellow());
        mock::generate(&selection)
    } else {
        let config = config::load_config().await?;
        let provider = Provider::from_config(&config)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!(
            "正在调用 {} 工作流，通常需要 20-30 秒...",
            provider.name()
        ));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = provider.fetch(&selection).await;
        spinner.finish_and_clear();

        match result {
            Ok(params) => params,
            Err(err)
                if config.on_server_error == ServerErrorPolicy::Mock
                    && err.is_server_failure() =>
            {
                warn!("远程服务故障，降级为本地参数: {}", err);
                println!(
                    "{}",
                    "⚠️ 远程服务暂不可用，以下为本地规则生成的参数".yellow()
                );
                mock::generate(&selection)
            }
            Err(err) => return Err(err.into()),
        }
    };

    render::render_params(&params);

    if !args.no_save {
        let store = HistoryStore::new().await?;
        let entry = HistoryEntry::new(selection, params);
        let id = entry.id;
        store.append(entry).await.context("保存历史记录失败")?;
        println!("📜 已保存到历史记录: {}", id.to_string().dimmed());
    }

    Ok(())
}

/// 命令行参数齐的时候直接拼 Selection，缺的字段用默认值。
fn selection_from_args(args: &GenerateArgs) -> Selection {
    let defaults = Selection::default();
    Selection {
        lens: args.lens.unwrap_or(defaults.lens),
        flash: args.flash,
        scene: args.scene.unwrap_or(defaults.scene),
        custom_scene: args.custom_scene.clone().unwrap_or_default(),
        lighting: args.lighting.unwrap_or(defaults.lighting),
        weather: args.weather.unwrap_or(defaults.weather),
        style: args.style.unwrap_or(defaults.style),
    }
}

/// 交互式收集拍摄条件。
fn prompt_selection() -> Result<Selection> {
    let theme = ColorfulTheme::default();

    let lens_items: Vec<&str> = Lens::ALL.iter().map(|l| l.description()).collect();
    let lens = Lens::ALL[Select::with_theme(&theme)
        .with_prompt("选择镜头")
        .items(&lens_items)
        .default(0)
        .interact()?];

    let flash = Confirm::with_theme(&theme)
        .with_prompt("是否使用闪光灯 (Godox TT685II)？")
        .default(false)
        .interact()?;

    let scene_items: Vec<&str> = Scene::ALL.iter().map(|s| s.label()).collect();
    let scene = Scene::ALL[Select::with_theme(&theme)
        .with_prompt("选择拍摄场景")
        .items(&scene_items)
        .default(0)
        .interact()?];

    let custom_scene = if scene == Scene::Custom {
        Input::with_theme(&theme)
            .with_prompt("请描述你的拍摄场景")
            .allow_empty(false)
            .interact_text()?
    } else {
        String::new()
    };

    let lighting_items: Vec<&str> = Lighting::ALL.iter().map(|l| l.label()).collect();
    let lighting = Lighting::ALL[Select::with_theme(&theme)
        .with_prompt("选择光线环境")
        .items(&lighting_items)
        .default(2)
        .interact()?];

    let weather_items: Vec<&str> = Weather::ALL.iter().map(|w| w.label()).collect();
    let weather = Weather::ALL[Select::with_theme(&theme)
        .with_prompt("选择天气情况")
        .items(&weather_items)
        .default(0)
        .interact()?];

    let style_items: Vec<&str> = Style::ALL.iter().map(|s| s.label()).collect();
    let style = Style::ALL[Select::with_theme(&theme)
        .with_prompt("选择风格偏好")
        .items(&style_items)
        .default(0)
        .interact()?];

    Ok(Selection {
        lens,
        flash,
        scene,
        custom_scene,
        lighting,
        weather,
        style,
    })
}
