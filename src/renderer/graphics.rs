//! 设备与交换链管理
//!
//! [`GraphicsContext`] 拥有 GPU 设备、立即上下文、交换链和多重采样目标，
//! 负责它们的创建、调整大小以及每帧的解析与呈现。
//!
//! # 初始化流程
//!
//! 1. 按特性等级优先顺序创建设备、上下文和交换链
//! 2. 按窗口尺寸创建多重采样目标
//!
//! # 调整大小流程
//!
//! 1. 解除渲染目标绑定
//! 2. 原地调整交换链缓冲区
//! 3. 以新尺寸重建多重采样目标

use tracing::{debug, info, trace};

use crate::core::config::GraphicsConfig;
use crate::core::error::Result;
use crate::gfx::backend::{DeviceBundle, DeviceContext, GraphicsBackend, PresentationSurface};
use crate::renderer::state::{DeviceOptions, FeatureLevel, SurfaceDescriptor, TextureFormat};
use crate::renderer::target::{quality_level, MultisampleTarget};

/// 交换链格式
pub const SURFACE_FORMAT: TextureFormat = TextureFormat::B8G8R8A8Unorm;

/// 多重采样目标格式
///
/// 必须与 [`SURFACE_FORMAT`] 属于同一无类型格式族，解析时按交换链格式解释。
pub const MULTISAMPLE_FORMAT: TextureFormat = TextureFormat::B8G8R8A8UnormSrgb;

/// 清屏颜色
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// 设备与交换链管理器
///
/// 字段顺序即释放顺序：多重采样目标、交换链、上下文、设备。
pub struct GraphicsContext<B: GraphicsBackend> {
    target: MultisampleTarget<B>,
    surface: B::Surface,
    context: B::Context,
    device: B::Device,
    feature_level: FeatureLevel,
    sync_interval: u32,
}

impl<B: GraphicsBackend> GraphicsContext<B> {
    /// 创建设备、交换链和多重采样目标
    ///
    /// # 错误
    ///
    /// - 没有可用的特性等级：`GraphicsError::DeviceCreation`
    /// - 多重采样参数不受支持或资源分配失败：`GraphicsError::ResourceCreation`
    pub fn new(
        window: &B::WindowHandle,
        width: u32,
        height: u32,
        config: &GraphicsConfig,
    ) -> Result<Self> {
        let surface_desc = SurfaceDescriptor {
            buffer_count: config.buffer_count,
            format: SURFACE_FORMAT,
            width,
            height,
        };
        let options = DeviceOptions {
            debug_layer: config.debug_layer,
        };

        let DeviceBundle { device, context, surface, feature_level } =
            B::create_device_and_surface(window, &surface_desc, &options)?;

        info!(
            backend = B::name(),
            feature_level = feature_level.name(),
            width,
            height,
            buffers = config.buffer_count,
            "Device and swap chain created"
        );

        let target = MultisampleTarget::create(
            &device,
            width,
            height,
            MULTISAMPLE_FORMAT,
            config.msaa_samples,
            quality_level(config.msaa_quality),
        )?;

        Ok(Self {
            target,
            surface,
            context,
            device,
            feature_level,
            sync_interval: config.sync_interval(),
        })
    }

    /// 调整交换链和多重采样目标的尺寸
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.resize_surface(width, height)?;
        self.recreate_multisample_target(width, height)?;

        info!(width, height, "Render targets resized");
        Ok(())
    }

    /// 原地调整交换链缓冲区
    ///
    /// 调整前先解除渲染目标绑定，仍有后台缓冲区引用时返回
    /// `GraphicsError::SurfaceResize`。
    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<()> {
        self.context.unbind_render_targets();

        let desc = self.surface.descriptor();
        self.surface.resize_buffers(desc.buffer_count, width, height, desc.format)
    }

    /// 以新尺寸重建多重采样目标，沿用原有格式和采样参数
    pub fn recreate_multisample_target(&mut self, width: u32, height: u32) -> Result<()> {
        self.target.recreate(&self.device, width, height)
    }

    /// 清除多重采样目标并将其绑定为渲染目标
    pub fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.context.clear_render_target(self.target.view(), clear_color);
        self.context.set_render_target(self.target.view());
    }

    /// 把多重采样目标解析到后台缓冲区并呈现
    ///
    /// 后台缓冲区引用在呈现前释放。单采样目标使用整体复制代替解析。
    ///
    /// # 错误
    ///
    /// 获取后台缓冲区或呈现失败时返回 `GraphicsError::Presentation`。
    pub fn resolve_and_present(&mut self) -> Result<()> {
        let back_buffer = self.surface.back_buffer()?;
        let format = self.surface.descriptor().format;

        if self.target.descriptor().is_multisampled() {
            self.context.resolve_subresource(&back_buffer, self.target.texture(), format);
        } else {
            self.context.copy_resource(&back_buffer, self.target.texture());
        }
        drop(back_buffer);

        trace!(sync_interval = self.sync_interval, "Presenting");
        self.surface.present(self.sync_interval)
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    pub fn context(&self) -> &B::Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut B::Context {
        &mut self.context
    }

    pub fn surface(&self) -> &B::Surface {
        &self.surface
    }

    pub fn target(&self) -> &MultisampleTarget<B> {
        &self.target
    }

    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }
}

impl<B: GraphicsBackend> Drop for GraphicsContext<B> {
    fn drop(&mut self) {
        debug!(backend = B::name(), "Releasing graphics context");
    }
}
