//! 核心功能模块
//!
//! 本模块提供了与图形 API 无关的基础功能：日志系统、配置管理、错误处理、
//! 窗口事件以及窗口系统抽象。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件和命令行加载设置
//! - `error`：错误处理，定义统一的错误类型
//! - `event`：窗口事件类型
//! - `window`：窗口系统 trait

pub mod log;
pub mod config;
pub mod error;
pub mod event;
pub mod window;

// 重新导出常用类型，方便使用
pub use error::{Result, BootstrapError, ConfigError, GraphicsError, ShaderLoadError};
pub use config::Config;
pub use event::{
    Event, EventType, WindowEvent,
    WindowResizeEvent, WindowCloseEvent, WindowErrorEvent,
};
pub use window::WindowSystem;
