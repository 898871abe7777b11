//! 管线配置
//!
//! [`PipelineConfiguration`] 持有一次绘制所需的全部 GPU 状态对象：
//! 着色器、输入布局、光栅化状态、深度模板状态和混合状态，
//! 以及随窗口尺寸变化的视口和裁剪矩形。
//!
//! # 生命周期
//!
//! - 启动时由 [`PipelineConfiguration::create`] 一次性创建
//! - 窗口调整大小后只有视口和裁剪矩形被 [`PipelineConfiguration::resize`] 修改
//! - drop 时释放所有状态对象
//!
//! 创建是全有或全无的：每个子资源都是局部变量，
//! 任意一步失败时 `?` 提前返回会 drop 已经创建的子资源。

use tracing::{debug, info};

use crate::core::error::{GraphicsError, Result};
use crate::gfx::backend::{DeviceContext, GraphicsBackend, GraphicsDevice};
use crate::renderer::shaders::ShaderSet;
use crate::renderer::state::{
    BlendDescriptor, DepthStencilDescriptor, DepthWriteMask, InputElementDescriptor,
    PrimitiveTopology, RasterizerDescriptor, ScissorRect, Viewport,
};

/// 固定管线绘制的顶点数（顶点着色器用 `SV_VertexID` 生成三角形）
pub const TRIANGLE_VERTEX_COUNT: u32 = 3;

/// 管线配置的创建参数
#[derive(Debug, Clone)]
pub struct PipelineDescriptor<'a> {
    pub topology: PrimitiveTopology,
    /// 为空时不创建输入布局
    pub input_elements: &'a [InputElementDescriptor],
    pub vertex_bytecode: &'a [u8],
    pub pixel_bytecode: &'a [u8],
    pub rasterizer: RasterizerDescriptor,
    pub viewport: Viewport,
    pub scissor: ScissorRect,
    pub depth_stencil: DepthStencilDescriptor,
    pub stencil_ref: u32,
    pub blend: BlendDescriptor,
    pub blend_factor: [f32; 4],
    pub sample_mask: u32,
}

impl<'a> PipelineDescriptor<'a> {
    /// 引导程序的固定管线：三角形列表、无顶点缓冲、无深度缓冲、不透明混合
    pub fn fixed(shaders: &'a ShaderSet, width: u32, height: u32) -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            input_elements: &[],
            vertex_bytecode: shaders.vertex.as_bytes(),
            pixel_bytecode: shaders.pixel.as_bytes(),
            rasterizer: RasterizerDescriptor::default(),
            viewport: Viewport::full(width, height),
            scissor: ScissorRect::full(width, height),
            depth_stencil: DepthStencilDescriptor {
                depth_write_mask: DepthWriteMask::Zero,
                ..DepthStencilDescriptor::default()
            },
            stencil_ref: 0,
            blend: BlendDescriptor::default(),
            blend_factor: [0.0; 4],
            sample_mask: 0xffff_ffff,
        }
    }

    /// 在创建任何 GPU 对象之前检查视口和裁剪矩形
    fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        let depth_ok = (0.0..=1.0).contains(&vp.min_depth)
            && (0.0..=1.0).contains(&vp.max_depth)
            && vp.min_depth <= vp.max_depth;
        if !depth_ok {
            return Err(GraphicsError::ResourceCreation(format!(
                "Invalid viewport depth range [{}, {}]",
                vp.min_depth, vp.max_depth
            )).into());
        }

        if vp.width < 0.0 || vp.height < 0.0 {
            return Err(GraphicsError::ResourceCreation(format!(
                "Negative viewport size {}x{}",
                vp.width, vp.height
            )).into());
        }

        let sc = &self.scissor;
        if sc.left > sc.right || sc.top > sc.bottom {
            return Err(GraphicsError::ResourceCreation(format!(
                "Inverted scissor rectangle ({}, {}, {}, {})",
                sc.left, sc.top, sc.right, sc.bottom
            )).into());
        }

        Ok(())
    }
}

/// 管线配置
pub struct PipelineConfiguration<B: GraphicsBackend> {
    topology: PrimitiveTopology,
    input_layout: Option<B::InputLayout>,
    vertex_shader: B::VertexShader,
    rasterizer_state: B::RasterizerState,
    pixel_shader: B::PixelShader,
    depth_stencil_state: B::DepthStencilState,
    stencil_ref: u32,
    blend_state: B::BlendState,
    blend_factor: [f32; 4],
    sample_mask: u32,
    viewport: Viewport,
    scissor: ScissorRect,
}

impl<B: GraphicsBackend> PipelineConfiguration<B> {
    /// 创建管线配置
    ///
    /// # 错误
    ///
    /// 任一 GPU 对象创建失败时返回 `GraphicsError::ResourceCreation`，
    /// 此前已创建的对象全部释放。
    pub fn create(device: &B::Device, desc: &PipelineDescriptor<'_>) -> Result<Self> {
        desc.validate()?;

        let vertex_shader = device.create_vertex_shader(desc.vertex_bytecode)?;

        let input_layout = if desc.input_elements.is_empty() {
            None
        } else {
            Some(device.create_input_layout(desc.input_elements, desc.vertex_bytecode)?)
        };

        let pixel_shader = device.create_pixel_shader(desc.pixel_bytecode)?;
        let rasterizer_state = device.create_rasterizer_state(&desc.rasterizer)?;
        let depth_stencil_state = device.create_depth_stencil_state(&desc.depth_stencil)?;
        let blend_state = device.create_blend_state(&desc.blend)?;

        info!(
            topology = ?desc.topology,
            input_elements = desc.input_elements.len(),
            width = desc.viewport.width,
            height = desc.viewport.height,
            "Pipeline configuration created"
        );

        Ok(Self {
            topology: desc.topology,
            input_layout,
            vertex_shader,
            rasterizer_state,
            pixel_shader,
            depth_stencil_state,
            stencil_ref: desc.stencil_ref,
            blend_state,
            blend_factor: desc.blend_factor,
            sample_mask: desc.sample_mask,
            viewport: desc.viewport,
            scissor: desc.scissor,
        })
    }

    /// 把全部状态绑定到上下文
    ///
    /// 顺序：拓扑、输入布局、顶点着色器、光栅化状态 + 视口 + 裁剪矩形、
    /// 像素着色器、深度模板状态、混合状态。
    pub fn bind(&self, context: &mut B::Context) {
        context.set_primitive_topology(self.topology);
        if let Some(layout) = &self.input_layout {
            context.set_input_layout(Some(layout));
        }
        context.set_vertex_shader(&self.vertex_shader);

        context.set_rasterizer_state(&self.rasterizer_state);
        context.set_viewport(&self.viewport);
        context.set_scissor_rect(&self.scissor);

        context.set_pixel_shader(&self.pixel_shader);
        context.set_depth_stencil_state(&self.depth_stencil_state, self.stencil_ref);
        context.set_blend_state(&self.blend_state, self.blend_factor, self.sample_mask);
    }

    /// 更新视口和裁剪矩形的尺寸
    ///
    /// 必须在渲染目标调整大小之后调用。
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.width = width as f32;
        self.viewport.height = height as f32;
        self.scissor.right = i32::try_from(width).unwrap_or(i32::MAX);
        self.scissor.bottom = i32::try_from(height).unwrap_or(i32::MAX);

        debug!(width, height, "Pipeline viewport resized");
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scissor(&self) -> &ScissorRect {
        &self.scissor
    }

    pub fn has_input_layout(&self) -> bool {
        self.input_layout.is_some()
    }
}

impl<B: GraphicsBackend> Drop for PipelineConfiguration<B> {
    fn drop(&mut self) {
        debug!("Releasing pipeline configuration");
    }
}
