//! 配置管理模块
//!
//! 提供引导程序配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 1600
//! height = 900
//! title = "D3D11 Application"
//! resizable = true
//!
//! [graphics]
//! msaa_samples = 4
//! msaa_quality = "standard"   # "standard"、"center" 或整数质量等级
//! vsync = true
//! buffer_count = 2
//! debug_layer = false
//!
//! [shaders]
//! vertex = "shaders/vertex.cso"
//! pixel = "shaders/pixel.cso"
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{BootstrapError, ConfigError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 引导程序配置
///
/// 包含了运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 着色器字节码路径
    #[serde(default)]
    pub shaders: ShaderConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// MSAA 采样数
    #[serde(default = "default_msaa")]
    pub msaa_samples: u32,

    /// MSAA 质量等级
    #[serde(default)]
    pub msaa_quality: MultisampleQuality,

    /// 垂直同步（呈现间隔 1），关闭时呈现间隔为 0
    #[serde(default = "default_vsync")]
    pub vsync: bool,

    /// 交换链缓冲区数量
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// 是否启用 D3D11 调试层
    #[serde(default = "default_debug_layer")]
    pub debug_layer: bool,
}

/// MSAA 质量等级
///
/// 配置文件中写作 `"standard"` / `"center"`（D3D11 的标准采样模式），
/// 或一个整数（设备报告的具体质量等级，必须小于设备支持的等级数）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultisampleQuality {
    Pattern(SamplePattern),
    Level(u32),
}

/// 标准采样模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplePattern {
    Standard,
    Center,
}

impl Default for MultisampleQuality {
    fn default() -> Self {
        MultisampleQuality::Pattern(SamplePattern::Standard)
    }
}

/// 着色器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// 顶点着色器字节码
    #[serde(default = "default_vertex_shader")]
    pub vertex: PathBuf,

    /// 像素着色器字节码
    #[serde(default = "default_pixel_shader")]
    pub pixel: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 1600 }
fn default_height() -> u32 { 900 }
fn default_title() -> String { "D3D11 Application".to_string() }
fn default_resizable() -> bool { true }
fn default_msaa() -> u32 { 4 }
fn default_vsync() -> bool { true }
fn default_buffer_count() -> u32 { 2 }
fn default_debug_layer() -> bool { cfg!(debug_assertions) }
fn default_vertex_shader() -> PathBuf { PathBuf::from("shaders/vertex.cso") }
fn default_pixel_shader() -> PathBuf { PathBuf::from("shaders/pixel.cso") }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "d3d11_bootstrap.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            msaa_samples: default_msaa(),
            msaa_quality: MultisampleQuality::default(),
            vsync: default_vsync(),
            buffer_count: default_buffer_count(),
            debug_layer: default_debug_layer(),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: default_vertex_shader(),
            pixel: default_pixel_shader(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 错误
    ///
    /// - 文件不存在：`ConfigError::FileNotFound`
    /// - 文件存在但无法读取：`BootstrapError::Io`
    /// - TOML 解析失败：`ConfigError::ParseError`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| -> BootstrapError {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound(path.to_string_lossy().to_string()).into()
            } else {
                e.into()
            }
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，只有文件不存在时才使用默认配置
    ///
    /// 文件存在但无法读取或解析时返回错误，不会退回默认值。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_file(path) {
            Err(BootstrapError::Config(ConfigError::FileNotFound(_))) => Ok(Self::default()),
            other => other,
        }
    }

    /// 从命令行参数中取出配置文件路径（`--config <path>`）
    pub fn path_from_args<I>(args: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        args.iter()
            .position(|a| a == "--config")
            .and_then(|idx| args.get(idx + 1))
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    /// - `--msaa <value>`: 设置 MSAA 采样数
    /// - `--no-vsync`: 关闭垂直同步
    /// - `--debug-layer`: 启用 D3D11 调试层
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(width) = parse_flag_value(&args, "--width") {
            self.window.width = width;
        }

        if let Some(height) = parse_flag_value(&args, "--height") {
            self.window.height = height;
        }

        if let Some(samples) = parse_flag_value(&args, "--msaa") {
            self.graphics.msaa_samples = samples;
        }

        if args.iter().any(|a| a == "--no-vsync") {
            self.graphics.vsync = false;
        }

        if args.iter().any(|a| a == "--debug-layer") {
            self.graphics.debug_layer = true;
        }
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if !matches!(self.graphics.msaa_samples, 1 | 2 | 4 | 8 | 16) {
            return Err(ConfigError::InvalidValue {
                field: "graphics.msaa_samples".to_string(),
                reason: "MSAA samples must be 1, 2, 4, 8, or 16".to_string(),
            }.into());
        }

        // flip 模型要求 2..=16 个缓冲区
        if !(2..=16).contains(&self.graphics.buffer_count) {
            return Err(ConfigError::InvalidValue {
                field: "graphics.buffer_count".to_string(),
                reason: "Flip-model swap chains need between 2 and 16 buffers".to_string(),
            }.into());
        }

        Ok(())
    }
}

impl GraphicsConfig {
    /// 呈现间隔（垂直同步时为 1）
    pub fn sync_interval(&self) -> u32 {
        if self.vsync { 1 } else { 0 }
    }
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}
