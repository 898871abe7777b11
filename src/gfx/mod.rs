//! 图形后端模块
//!
//! - `backend`：后端 trait（设备、上下文、交换链）
//! - `creation`：设备创建的回退策略
//! - `d3d11`：Direct3D 11 实现（仅 Windows）
//! - `window`：winit 窗口
//!
//! 测试构建中还包含一个记录调用的模拟后端 `mock`。

pub mod backend;
pub mod creation;
pub mod window;
#[cfg(target_os = "windows")]
pub mod d3d11;
#[cfg(test)]
pub mod mock;

pub use backend::{DeviceBundle, DeviceContext, GraphicsBackend, GraphicsDevice, PresentationSurface};
pub use window::WinitWindow;
#[cfg(target_os = "windows")]
pub use d3d11::D3D11Backend;
