//! d3d11_bootstrap - 最小化的 Direct3D 11 渲染循环
//!
//! 打开一个窗口，创建设备与交换链，每帧在多重采样目标上绘制一个三角形，
//! 解析到后台缓冲区后呈现，并在窗口尺寸变化时重建尺寸相关的资源。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理、窗口事件）
//! - `gfx`: 图形后端抽象层与 Direct3D 11 实现
//! - `renderer`: 管线配置、多重采样目标与帧循环
//!
//! # 使用示例
//!
//! ```no_run
//! use d3d11_bootstrap::core::Config;
//!
//! # fn main() -> d3d11_bootstrap::core::Result<()> {
//! let mut config = Config::from_file_or_default("config.toml")?;
//! config.apply_args(["app", "--msaa", "8"]);
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod gfx;
pub mod renderer;
