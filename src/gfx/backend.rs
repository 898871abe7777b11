//! 图形后端的统一抽象接口
//!
//! 本模块定义了图形后端必须实现的接口。渲染器（`renderer` 模块）只通过这些
//! trait 访问 GPU，因此同一套管线配置、多重采样目标和帧循环既可以运行在
//! Direct3D 11 上，也可以运行在测试用的模拟后端上。
//!
//! # 设计理念
//!
//! - **关联类型**：每种 GPU 对象都是后端的关联类型，由后端决定其表示
//! - **所有权即生命周期**：GPU 对象在 Rust 值被 drop 时释放，不提供显式 release
//! - **设备与上下文分离**：资源创建走 [`GraphicsDevice`]，命令录制走 [`DeviceContext`]

use crate::core::error::Result;
use crate::renderer::state::{
    BlendDescriptor, DepthStencilDescriptor, DeviceOptions, FeatureLevel,
    InputElementDescriptor, PrimitiveTopology, RasterizerDescriptor, ScissorRect,
    SurfaceDescriptor, TextureDescriptor, TextureFormat, Viewport,
};

/// 图形后端的统一接口
pub trait GraphicsBackend: Sized + 'static {
    /// 资源创建接口
    type Device: GraphicsDevice<Self>;
    /// 命令录制接口（立即上下文）
    type Context: DeviceContext<Self>;
    /// 交换链
    type Surface: PresentationSurface<Self>;
    /// 创建交换链所需的窗口句柄
    type WindowHandle;

    type VertexShader;
    type PixelShader;
    type InputLayout;
    type RasterizerState;
    type DepthStencilState;
    type BlendState;
    type Texture;
    type RenderTargetView;

    /// 后端名称，用于日志输出
    fn name() -> &'static str;

    /// 创建设备、立即上下文和交换链
    ///
    /// 特性等级按 [`FeatureLevel::PREFERRED`] 的顺序请求。
    /// 没有任何可用组合时返回 `GraphicsError::DeviceCreation`，其中携带原始结果码。
    fn create_device_and_surface(
        window: &Self::WindowHandle,
        surface: &SurfaceDescriptor,
        options: &DeviceOptions,
    ) -> Result<DeviceBundle<Self>>;
}

/// 设备创建的结果
pub struct DeviceBundle<B: GraphicsBackend> {
    pub device: B::Device,
    pub context: B::Context,
    pub surface: B::Surface,
    /// 实际获得的特性等级
    pub feature_level: FeatureLevel,
}

/// GPU 资源创建
pub trait GraphicsDevice<B: GraphicsBackend> {
    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<B::VertexShader>;

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<B::PixelShader>;

    /// 创建输入布局，`vs_bytecode` 用于校验顶点着色器的输入签名
    fn create_input_layout(
        &self,
        elements: &[InputElementDescriptor],
        vs_bytecode: &[u8],
    ) -> Result<B::InputLayout>;

    fn create_rasterizer_state(&self, desc: &RasterizerDescriptor) -> Result<B::RasterizerState>;

    fn create_depth_stencil_state(&self, desc: &DepthStencilDescriptor) -> Result<B::DepthStencilState>;

    fn create_blend_state(&self, desc: &BlendDescriptor) -> Result<B::BlendState>;

    /// 查询格式在给定采样数下支持的质量等级数，0 表示不支持
    fn multisample_quality_levels(&self, format: TextureFormat, sample_count: u32) -> Result<u32>;

    /// 创建可作为渲染目标的二维纹理
    fn create_texture_2d(&self, desc: &TextureDescriptor) -> Result<B::Texture>;

    /// 为纹理创建渲染目标视图，多重采样纹理使用多重采样视图
    fn create_render_target_view(
        &self,
        texture: &B::Texture,
        desc: &TextureDescriptor,
    ) -> Result<B::RenderTargetView>;
}

/// 命令录制
///
/// 所有方法都是对立即上下文的状态设置或命令提交，不会失败。
pub trait DeviceContext<B: GraphicsBackend> {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);

    fn set_input_layout(&mut self, layout: Option<&B::InputLayout>);

    fn set_vertex_shader(&mut self, shader: &B::VertexShader);

    fn set_rasterizer_state(&mut self, state: &B::RasterizerState);

    fn set_viewport(&mut self, viewport: &Viewport);

    fn set_scissor_rect(&mut self, rect: &ScissorRect);

    fn set_pixel_shader(&mut self, shader: &B::PixelShader);

    fn set_depth_stencil_state(&mut self, state: &B::DepthStencilState, stencil_ref: u32);

    fn set_blend_state(&mut self, state: &B::BlendState, blend_factor: [f32; 4], sample_mask: u32);

    fn clear_render_target(&mut self, view: &B::RenderTargetView, color: [f32; 4]);

    /// 绑定单个渲染目标，不绑定深度模板视图
    fn set_render_target(&mut self, view: &B::RenderTargetView);

    /// 解除所有渲染目标绑定
    fn unbind_render_targets(&mut self);

    fn draw(&mut self, vertex_count: u32, start_vertex: u32);

    /// 把多重采样纹理解析到单采样纹理
    fn resolve_subresource(&mut self, dst: &B::Texture, src: &B::Texture, format: TextureFormat);

    /// 同尺寸、同格式纹理之间的整体复制
    fn copy_resource(&mut self, dst: &B::Texture, src: &B::Texture);
}

/// 交换链
pub trait PresentationSurface<B: GraphicsBackend> {
    /// 当前的交换链描述
    fn descriptor(&self) -> SurfaceDescriptor;

    /// 调整后台缓冲区大小
    ///
    /// 仍有后台缓冲区引用未释放时返回 `GraphicsError::SurfaceResize`。
    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<()>;

    /// 获取后台缓冲区 0，调用方在呈现前必须释放它
    fn back_buffer(&self) -> Result<B::Texture>;

    /// 呈现，`sync_interval` 为 1 时等待垂直同步
    fn present(&mut self, sync_interval: u32) -> Result<()>;
}
