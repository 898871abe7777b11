//! D3D11 设备创建与立即上下文
//!
//! 回退顺序见 [`crate::gfx::creation`]，这里只负责单次创建尝试。

use windows::Win32::Foundation::{E_FAIL, E_INVALIDARG, HMODULE, HWND, RECT};
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::core::error::{GraphicsError, Result};
use crate::gfx::backend::{DeviceBundle, DeviceContext};
use crate::gfx::creation::{create_with_fallback, CreationAttempt, CreationFailure};
use crate::renderer::state::{
    DeviceOptions, PrimitiveTopology, ScissorRect, SurfaceDescriptor, TextureFormat,
    Viewport,
};

use super::surface::D3D11Surface;
use super::{convert, D3D11Backend, D3D11Device};

/// `ID3D11DeviceContext`（立即上下文）的封装
pub struct D3D11Context {
    context: ID3D11DeviceContext,
}

struct CreatedDevice {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    swap_chain: IDXGISwapChain,
    feature_level: D3D_FEATURE_LEVEL,
}

fn swap_chain_desc(hwnd: HWND, surface: &SurfaceDescriptor) -> DXGI_SWAP_CHAIN_DESC {
    DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: surface.width,
            Height: surface.height,
            RefreshRate: DXGI_RATIONAL {
                Numerator: 60,
                Denominator: 1,
            },
            Format: convert::format(surface.format),
            ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
            Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
        },
        // 翻转模型交换链不能直接多重采样
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: surface.buffer_count,
        OutputWindow: hwnd,
        Windowed: true.into(),
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        Flags: 0,
    }
}

fn try_create(
    request: &CreationAttempt,
    desc: &DXGI_SWAP_CHAIN_DESC,
) -> std::result::Result<CreatedDevice, CreationFailure> {
    let mut flags = D3D11_CREATE_DEVICE_SINGLETHREADED;
    if request.debug_layer {
        flags |= D3D11_CREATE_DEVICE_DEBUG;
    }
    let levels: Vec<D3D_FEATURE_LEVEL> = request
        .feature_levels
        .iter()
        .map(|l| convert::feature_level(*l))
        .collect();

    let mut swap_chain = None;
    let mut device = None;
    let mut feature_level = D3D_FEATURE_LEVEL::default();
    let mut context = None;

    unsafe {
        D3D11CreateDeviceAndSwapChain(
            None::<&IDXGIAdapter>,
            D3D_DRIVER_TYPE_HARDWARE,
            HMODULE::default(),
            flags,
            Some(&levels),
            D3D11_SDK_VERSION,
            Some(desc as *const _),
            Some(&mut swap_chain as *mut _),
            Some(&mut device as *mut _),
            Some(&mut feature_level as *mut _),
            Some(&mut context as *mut _),
        )
        .map_err(|e| CreationFailure::new(e.code().0, e.message().to_string()))?;
    }

    match (device, context, swap_chain) {
        (Some(device), Some(context), Some(swap_chain)) => Ok(CreatedDevice {
            device,
            context,
            swap_chain,
            feature_level,
        }),
        _ => Err(CreationFailure::new(E_FAIL.0, "device creation returned no objects")),
    }
}

pub(super) fn create_device_and_surface(
    hwnd: HWND,
    surface: &SurfaceDescriptor,
    options: &DeviceOptions,
) -> Result<DeviceBundle<D3D11Backend>> {
    let desc = swap_chain_desc(hwnd, surface);
    let created = create_with_fallback(options, |request| try_create(request, &desc))?;

    let feature_level = convert::from_feature_level(created.feature_level).ok_or_else(|| {
        GraphicsError::DeviceCreation {
            code: E_INVALIDARG.0,
            message: format!("Unsupported feature level {:#x}", created.feature_level.0),
        }
    })?;

    Ok(DeviceBundle {
        device: D3D11Device::new(created.device),
        context: D3D11Context {
            context: created.context,
        },
        surface: D3D11Surface::new(created.swap_chain, *surface),
        feature_level,
    })
}

impl DeviceContext<D3D11Backend> for D3D11Context {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        unsafe { self.context.IASetPrimitiveTopology(convert::topology(topology)) }
    }

    fn set_input_layout(&mut self, layout: Option<&ID3D11InputLayout>) {
        unsafe { self.context.IASetInputLayout(layout) }
    }

    fn set_vertex_shader(&mut self, shader: &ID3D11VertexShader) {
        unsafe { self.context.VSSetShader(shader, None) }
    }

    fn set_rasterizer_state(&mut self, state: &ID3D11RasterizerState) {
        unsafe { self.context.RSSetState(state) }
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        unsafe { self.context.RSSetViewports(Some(&[convert::viewport(viewport)])) }
    }

    fn set_scissor_rect(&mut self, rect: &ScissorRect) {
        let native: RECT = convert::rect(rect);
        unsafe { self.context.RSSetScissorRects(Some(&[native])) }
    }

    fn set_pixel_shader(&mut self, shader: &ID3D11PixelShader) {
        unsafe { self.context.PSSetShader(shader, None) }
    }

    fn set_depth_stencil_state(&mut self, state: &ID3D11DepthStencilState, stencil_ref: u32) {
        unsafe { self.context.OMSetDepthStencilState(state, stencil_ref) }
    }

    fn set_blend_state(&mut self, state: &ID3D11BlendState, blend_factor: [f32; 4], sample_mask: u32) {
        unsafe {
            self.context
                .OMSetBlendState(state, Some(&blend_factor), sample_mask)
        }
    }

    fn clear_render_target(&mut self, view: &ID3D11RenderTargetView, color: [f32; 4]) {
        unsafe { self.context.ClearRenderTargetView(view, &color) }
    }

    fn set_render_target(&mut self, view: &ID3D11RenderTargetView) {
        unsafe {
            self.context
                .OMSetRenderTargets(Some(&[Some(view.clone())]), None::<&ID3D11DepthStencilView>)
        }
    }

    fn unbind_render_targets(&mut self) {
        unsafe { self.context.OMSetRenderTargets(None, None::<&ID3D11DepthStencilView>) }
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
        unsafe { self.context.Draw(vertex_count, start_vertex) }
    }

    fn resolve_subresource(&mut self, dst: &ID3D11Texture2D, src: &ID3D11Texture2D, format: TextureFormat) {
        unsafe {
            self.context
                .ResolveSubresource(dst, 0, src, 0, convert::format(format))
        }
    }

    fn copy_resource(&mut self, dst: &ID3D11Texture2D, src: &ID3D11Texture2D) {
        unsafe { self.context.CopyResource(dst, src) }
    }
}
