//! Direct3D 11 图形后端
//!
//! 通过 `windows` crate 调用 D3D11 与 DXGI。所有 COM 对象在 drop 时自动 `Release`，
//! 因此 GPU 资源的生命周期直接由 Rust 所有权决定。
//!
//! # 模块结构
//!
//! - `convert`：状态描述到原生结构的转换
//! - `device`：资源创建（`ID3D11Device`）
//! - `context`：设备创建与命令录制（`ID3D11DeviceContext`）
//! - `surface`：交换链（`IDXGISwapChain`）

mod context;
mod convert;
mod device;
mod surface;

pub use context::D3D11Context;
pub use device::D3D11Device;
pub use surface::D3D11Surface;

use raw_window_handle::RawWindowHandle;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D11::*;

use crate::core::error::{BootstrapError, GraphicsError, Result};
use crate::gfx::backend::{DeviceBundle, GraphicsBackend};
use crate::renderer::state::{DeviceOptions, SurfaceDescriptor};

/// Direct3D 11 后端
pub struct D3D11Backend;

impl GraphicsBackend for D3D11Backend {
    type Device = D3D11Device;
    type Context = D3D11Context;
    type Surface = D3D11Surface;
    type WindowHandle = RawWindowHandle;

    type VertexShader = ID3D11VertexShader;
    type PixelShader = ID3D11PixelShader;
    type InputLayout = ID3D11InputLayout;
    type RasterizerState = ID3D11RasterizerState;
    type DepthStencilState = ID3D11DepthStencilState;
    type BlendState = ID3D11BlendState;
    type Texture = ID3D11Texture2D;
    type RenderTargetView = ID3D11RenderTargetView;

    fn name() -> &'static str {
        "Direct3D 11"
    }

    fn create_device_and_surface(
        window: &RawWindowHandle,
        surface: &SurfaceDescriptor,
        options: &DeviceOptions,
    ) -> Result<DeviceBundle<Self>> {
        let hwnd = match window {
            RawWindowHandle::Win32(handle) => HWND(handle.hwnd.get() as *mut std::ffi::c_void),
            other => {
                return Err(BootstrapError::Window(format!(
                    "Expected a Win32 window handle, got {:?}",
                    other
                )))
            }
        };
        context::create_device_and_surface(hwnd, surface, options)
    }
}

fn resource_error(what: &str, e: windows::core::Error) -> BootstrapError {
    GraphicsError::ResourceCreation(format!(
        "Failed to create {}: {} ({:#010x})",
        what,
        e.message(),
        e.code().0
    ))
    .into()
}
