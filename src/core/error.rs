//! 错误处理模块
//!
//! 定义了引擎中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 每种错误类型都实现 `Display` 和 `std::error::Error`
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! # 错误分类
//!
//! 所有图形错误在产生处都是不可恢复的，统一向上传播到 `main`，
//! 由 `main` 记录日志并以非零状态码退出。

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// 顶层错误类型
#[derive(Debug)]
pub enum BootstrapError {
    /// 配置错误
    Config(ConfigError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// 着色器字节码加载错误
    Shader(ShaderLoadError),

    /// 窗口系统错误
    Window(String),

    /// IO 错误
    Io(std::io::Error),

    /// 初始化错误
    Initialization(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 没有可用的特性等级 / 驱动组合
    ///
    /// `code` 为底层 API 返回的原始结果码（HRESULT）。
    DeviceCreation { code: i32, message: String },

    /// GPU 对象分配失败（字节码无效、格式或采样数不受支持、设备丢失）
    ResourceCreation(String),

    /// 调整交换链大小时仍有缓冲区引用未释放
    SurfaceResize(String),

    /// 获取后台缓冲区或呈现失败
    Presentation(String),
}

/// 着色器字节码加载相关的错误
#[derive(Debug)]
pub enum ShaderLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 文件存在但无法读取，或内容为空
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(e) => write!(f, "Configuration error: {}", e),
            BootstrapError::Graphics(e) => write!(f, "Graphics error: {}", e),
            BootstrapError::Shader(e) => write!(f, "Shader loading error: {}", e),
            BootstrapError::Window(msg) => write!(f, "Window error: {}", msg),
            BootstrapError::Io(e) => write!(f, "IO error: {}", e),
            BootstrapError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation { code, message } => {
                write!(f, "Device creation failed ({:#010x}): {}", *code as u32, message)
            }
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            GraphicsError::SurfaceResize(msg) => write!(f, "Surface resize failed: {}", msg),
            GraphicsError::Presentation(msg) => write!(f, "Presentation failed: {}", msg),
        }
    }
}

impl fmt::Display for ShaderLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderLoadError::FileNotFound(path) => {
                write!(f, "Shader file not found: {}", path.display())
            }
            ShaderLoadError::Unreadable { path, reason } => {
                write!(f, "Failed to read shader {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Config(e) => Some(e),
            BootstrapError::Graphics(e) => Some(e),
            BootstrapError::Shader(e) => Some(e),
            BootstrapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for ShaderLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<GraphicsError> for BootstrapError {
    fn from(err: GraphicsError) -> Self {
        BootstrapError::Graphics(err)
    }
}

impl From<ShaderLoadError> for BootstrapError {
    fn from(err: ShaderLoadError) -> Self {
        BootstrapError::Shader(err)
    }
}

impl BootstrapError {
    /// 是否为着色器文件缺失
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, BootstrapError::Shader(ShaderLoadError::FileNotFound(_)))
    }
}
