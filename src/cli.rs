//! src/cli.rs
use clap::{Args, Parser, Subcommand};

use crate::selection::{Lens, Lighting, Scene, Style, Weather};

/// R50 光影私教：为 Canon R50 生成拍摄参数建议的 CLI 工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 初始化配置文件
    #[command(alias = "i")]
    Init,

    /// 生成拍摄参数建议。不带条件参数时进入交互式选择
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// 查看与管理生成历史
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// 镜头
    #[arg(long, value_enum)]
    pub lens: Option<Lens>,

    /// 开启闪光灯 (Godox TT685II)
    #[arg(long)]
    pub flash: bool,

    /// 拍摄场景
    #[arg(long, value_enum)]
    pub scene: Option<Scene>,

    /// 自定义场景描述，scene 为 custom 时必填
    #[arg(long)]
    pub custom_scene: Option<String>,

    /// 光线环境
    #[arg(long, value_enum)]
    pub lighting: Option<Lighting>,

    /// 天气情况
    #[arg(long, value_enum)]
    pub weather: Option<Weather>,

    /// 风格偏好
    #[arg(long, value_enum)]
    pub style: Option<Style>,

    /// 不调用远程服务，使用本地规则生成
    #[arg(long)]
    pub offline: bool,

    /// 不写入历史记录
    #[arg(long)]
    pub no_save: bool,
}

impl GenerateArgs {
    /// 是否完全没有给出拍摄条件，此时走交互式选择。
    pub fn wants_interactive(&self) -> bool {
        self.lens.is_none()
            && self.scene.is_none()
            && self.lighting.is_none()
            && self.weather.is_none()
            && self.style.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// 列出全部历史记录（默认）
    List,
    /// 查看一条历史记录的完整参数
    Show {
        /// 记录 id，允许前缀
        id: String,
    },
    /// 删除一条历史记录
    Delete {
        /// 记录 id，允许前缀
        id: String,
    },
    /// 清空全部历史记录
    Clear {
        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },
}
