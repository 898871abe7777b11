//! DXGI 交换链

use tracing::trace;
use windows::Win32::Graphics::Direct3D11::ID3D11Texture2D;
use windows::Win32::Graphics::Dxgi::*;

use crate::core::error::{GraphicsError, Result};
use crate::gfx::backend::PresentationSurface;
use crate::renderer::state::{SurfaceDescriptor, TextureFormat};

use super::{convert, D3D11Backend};

pub struct D3D11Surface {
    swap_chain: IDXGISwapChain,
    descriptor: SurfaceDescriptor,
}

impl D3D11Surface {
    pub(super) fn new(swap_chain: IDXGISwapChain, descriptor: SurfaceDescriptor) -> Self {
        Self {
            swap_chain,
            descriptor,
        }
    }
}

impl PresentationSurface<D3D11Backend> for D3D11Surface {
    fn descriptor(&self) -> SurfaceDescriptor {
        self.descriptor
    }

    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<()> {
        unsafe {
            self.swap_chain.ResizeBuffers(
                buffer_count,
                width,
                height,
                convert::format(format),
                DXGI_SWAP_CHAIN_FLAG(0),
            )
        }
        .map_err(|e| {
            GraphicsError::SurfaceResize(format!(
                "ResizeBuffers({}x{}) failed: {} ({:#010x})",
                width,
                height,
                e.message(),
                e.code().0
            ))
        })?;

        self.descriptor = SurfaceDescriptor {
            buffer_count,
            format,
            width,
            height,
        };
        trace!("Swap chain resized to {}x{}", width, height);
        Ok(())
    }

    fn back_buffer(&self) -> Result<ID3D11Texture2D> {
        unsafe { self.swap_chain.GetBuffer::<ID3D11Texture2D>(0) }.map_err(|e| {
            GraphicsError::Presentation(format!("Failed to get back buffer: {}", e.message())).into()
        })
    }

    fn present(&mut self, sync_interval: u32) -> Result<()> {
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT(0)) }
            .ok()
            .map_err(|e| {
                GraphicsError::Presentation(format!(
                    "Present failed: {} ({:#010x})",
                    e.message(),
                    e.code().0
                ))
                .into()
            })
    }
}
