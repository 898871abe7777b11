//! 窗口系统抽象
//!
//! 渲染循环通过 [`WindowSystem`] 获取原生窗口句柄并轮询事件，
//! 不直接依赖 `winit`，便于在测试中使用脚本化的窗口。

use super::error::Result;
use super::event::WindowEvent;

/// 窗口系统 trait
pub trait WindowSystem {
    /// 图形后端创建交换链所需的原生窗口句柄
    type Handle;

    /// 获取原生窗口句柄
    fn handle(&self) -> Result<Self::Handle>;

    /// 当前客户区尺寸（物理像素）
    fn inner_size(&self) -> (u32, u32);

    /// 非阻塞地取出自上次调用以来的所有待处理事件
    fn poll_events(&mut self) -> Vec<WindowEvent>;
}
