//! 事件系统模块
//!
//! 窗口系统向渲染循环投递的事件。渲染循环只关心三类事件：
//! 尺寸变化、关闭请求和窗口系统报告的错误。
//!
//! # 设计原则
//!
//! - **类型安全**：事件类型使用枚举而非整数常量
//! - **与窗口库解耦**：`winit` 事件在 `gfx::window` 中转换为这里的类型，
//!   渲染循环和测试只依赖本模块

use std::fmt;

/// 事件类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 窗口调整大小事件
    ///
    /// 当用户拖动窗口边缘或最大化/还原/最小化窗口时触发
    WindowResize,

    /// 窗口关闭事件
    WindowClose,

    /// 窗口系统错误事件
    ///
    /// 只记录日志，不中断渲染循环
    WindowError,
}

impl EventType {
    /// 获取事件类型的名称
    pub fn name(&self) -> &'static str {
        match self {
            EventType::WindowResize => "WindowResize",
            EventType::WindowClose => "WindowClose",
            EventType::WindowError => "WindowError",
        }
    }
}

/// 事件 trait
///
/// 所有事件都必须实现此 trait。
pub trait Event: fmt::Debug {
    /// 获取事件类型
    fn event_type(&self) -> EventType;

    /// 获取事件详细信息（用于调试和日志）
    ///
    /// 默认实现使用 `Debug` trait。
    fn detail(&self) -> String {
        format!("{:?}", self)
    }
}

/// 窗口调整大小事件
///
/// 尺寸为物理像素。最小化的窗口会报告 0x0。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizeEvent {
    pub width: u32,
    pub height: u32,
}

impl WindowResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 是否为最小化（任一维度为 0）
    pub fn is_minimized(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Event for WindowResizeEvent {
    fn event_type(&self) -> EventType {
        EventType::WindowResize
    }

    fn detail(&self) -> String {
        format!("WindowResize: {}x{}", self.width, self.height)
    }
}

/// 窗口关闭事件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCloseEvent;

impl WindowCloseEvent {
    pub fn new() -> Self {
        Self
    }
}

impl Event for WindowCloseEvent {
    fn event_type(&self) -> EventType {
        EventType::WindowClose
    }

    fn detail(&self) -> String {
        "WindowClose".to_string()
    }
}

/// 窗口系统错误事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowErrorEvent {
    /// 平台错误码
    pub code: i32,

    /// 错误描述
    pub description: String,
}

impl WindowErrorEvent {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl Event for WindowErrorEvent {
    fn event_type(&self) -> EventType {
        EventType::WindowError
    }

    fn detail(&self) -> String {
        format!("WindowError({}): {}", self.code, self.description)
    }
}

/// 窗口系统投递给渲染循环的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Resized(WindowResizeEvent),
    CloseRequested(WindowCloseEvent),
    Error(WindowErrorEvent),
}

impl WindowEvent {
    pub fn resized(width: u32, height: u32) -> Self {
        WindowEvent::Resized(WindowResizeEvent::new(width, height))
    }

    pub fn close_requested() -> Self {
        WindowEvent::CloseRequested(WindowCloseEvent::new())
    }

    pub fn error(code: i32, description: impl Into<String>) -> Self {
        WindowEvent::Error(WindowErrorEvent::new(code, description))
    }

    /// 以 `Event` trait 对象访问内部事件
    pub fn as_event(&self) -> &dyn Event {
        match self {
            WindowEvent::Resized(e) => e,
            WindowEvent::CloseRequested(e) => e,
            WindowEvent::Error(e) => e,
        }
    }
}
