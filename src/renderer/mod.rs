//! 渲染器模块
//!
//! 与具体图形 API 无关的渲染逻辑，全部通过 `gfx::backend` 中的 trait 访问 GPU。
//!
//! # 模块组织
//!
//! - `state`：管线状态描述
//! - `shaders`：预编译着色器字节码的加载
//! - `pipeline`：管线配置（着色器、输入布局、固定功能状态）
//! - `target`：多重采样渲染目标
//! - `graphics`：设备、交换链与多重采样目标的组合
//! - `frame`：帧循环状态机与尺寸调整流程

pub mod state;
pub mod shaders;
pub mod pipeline;
pub mod target;
pub mod graphics;
pub mod frame;

pub use frame::{FrameLoop, FrameState};
pub use graphics::GraphicsContext;
pub use pipeline::{PipelineConfiguration, PipelineDescriptor};
pub use shaders::{ShaderBytecode, ShaderSet};
pub use target::MultisampleTarget;
