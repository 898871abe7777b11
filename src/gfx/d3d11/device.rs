//! D3D11 资源创建

use tracing::trace;
use windows::Win32::Graphics::Direct3D11::*;

use crate::core::error::{GraphicsError, Result};
use crate::gfx::backend::GraphicsDevice;
use crate::renderer::state::{
    BlendDescriptor, DepthStencilDescriptor, InputElementDescriptor, RasterizerDescriptor,
    TextureDescriptor, TextureFormat,
};

use super::{convert, resource_error, D3D11Backend};

/// `ID3D11Device` 的封装
pub struct D3D11Device {
    device: ID3D11Device,
}

impl D3D11Device {
    pub(super) fn new(device: ID3D11Device) -> Self {
        Self { device }
    }
}

/// 创建函数通过输出参数返回对象，成功但输出为空同样视为失败
fn take<T>(object: Option<T>, what: &str) -> Result<T> {
    object.ok_or_else(|| GraphicsError::ResourceCreation(format!("{} was not returned", what)).into())
}

impl GraphicsDevice<D3D11Backend> for D3D11Device {
    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<ID3D11VertexShader> {
        let mut shader = None;
        unsafe {
            self.device
                .CreateVertexShader(bytecode, None::<&ID3D11ClassLinkage>, Some(&mut shader as *mut _))
        }
        .map_err(|e| resource_error("vertex shader", e))?;
        trace!("Vertex shader created ({} bytes)", bytecode.len());
        take(shader, "Vertex shader")
    }

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<ID3D11PixelShader> {
        let mut shader = None;
        unsafe {
            self.device
                .CreatePixelShader(bytecode, None::<&ID3D11ClassLinkage>, Some(&mut shader as *mut _))
        }
        .map_err(|e| resource_error("pixel shader", e))?;
        trace!("Pixel shader created ({} bytes)", bytecode.len());
        take(shader, "Pixel shader")
    }

    fn create_input_layout(
        &self,
        elements: &[InputElementDescriptor],
        vs_bytecode: &[u8],
    ) -> Result<ID3D11InputLayout> {
        let elements = convert::input_elements(elements)?;
        let mut layout = None;
        unsafe {
            self.device
                .CreateInputLayout(&elements.descs, vs_bytecode, Some(&mut layout as *mut _))
        }
        .map_err(|e| resource_error("input layout", e))?;
        take(layout, "Input layout")
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDescriptor) -> Result<ID3D11RasterizerState> {
        let native = convert::rasterizer_desc(desc);
        let mut state = None;
        unsafe { self.device.CreateRasterizerState(&native, Some(&mut state as *mut _)) }
            .map_err(|e| resource_error("rasterizer state", e))?;
        take(state, "Rasterizer state")
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDescriptor) -> Result<ID3D11DepthStencilState> {
        let native = convert::depth_stencil_desc(desc);
        let mut state = None;
        unsafe { self.device.CreateDepthStencilState(&native, Some(&mut state as *mut _)) }
            .map_err(|e| resource_error("depth stencil state", e))?;
        take(state, "Depth stencil state")
    }

    fn create_blend_state(&self, desc: &BlendDescriptor) -> Result<ID3D11BlendState> {
        let native = convert::blend_desc(desc);
        let mut state = None;
        unsafe { self.device.CreateBlendState(&native, Some(&mut state as *mut _)) }
            .map_err(|e| resource_error("blend state", e))?;
        take(state, "Blend state")
    }

    fn multisample_quality_levels(&self, format: TextureFormat, sample_count: u32) -> Result<u32> {
        unsafe {
            self.device
                .CheckMultisampleQualityLevels(convert::format(format), sample_count)
        }
        .map_err(|e| resource_error("multisample quality query", e))
    }

    fn create_texture_2d(&self, desc: &TextureDescriptor) -> Result<ID3D11Texture2D> {
        let native = convert::texture_desc(desc);
        let mut texture = None;
        unsafe {
            self.device
                .CreateTexture2D(&native, None, Some(&mut texture as *mut _))
        }
        .map_err(|e| resource_error("texture", e))?;
        take(texture, "Texture")
    }

    fn create_render_target_view(
        &self,
        texture: &ID3D11Texture2D,
        desc: &TextureDescriptor,
    ) -> Result<ID3D11RenderTargetView> {
        let native = convert::render_target_view_desc(desc);
        let mut view = None;
        unsafe {
            self.device.CreateRenderTargetView(
                texture,
                Some(&native as *const _),
                Some(&mut view as *mut _),
            )
        }
        .map_err(|e| resource_error("render target view", e))?;
        take(view, "Render target view")
    }
}
