//! 管线状态描述
//!
//! 与具体图形 API 无关的状态描述类型。后端负责把这些描述转换为
//! 各自的原生结构（见 `gfx::d3d11::convert`）。
//!
//! 默认值与引导程序的固定管线一致：实心填充、背面剔除、顺时针为正面、
//! 关闭深度裁剪、开启裁剪矩形、不透明混合。

/// 标准多重采样模式的质量等级
pub const STANDARD_MULTISAMPLE_PATTERN: u32 = 0xffff_ffff;

/// 中心多重采样模式的质量等级
pub const CENTER_MULTISAMPLE_PATTERN: u32 = 0xffff_fffe;

/// 图元拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
}

/// 纹理 / 顶点属性格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    B8G8R8A8Typeless,
    B8G8R8A8Unorm,
    B8G8R8A8UnormSrgb,
    R8G8B8A8Typeless,
    R8G8B8A8Unorm,
    R8G8B8A8UnormSrgb,
    R32G32Float,
    R32G32B32Float,
    R32G32B32A32Float,
}

impl TextureFormat {
    /// 同一内存布局的无类型格式
    ///
    /// 纹理以无类型格式创建，视图再选择 UNORM 或 sRGB 解释，
    /// 这样 sRGB 渲染目标可以解析或复制到 UNORM 交换链缓冲区。
    /// 没有无类型变体的格式原样返回。
    pub fn typeless(&self) -> TextureFormat {
        match self {
            TextureFormat::B8G8R8A8Typeless
            | TextureFormat::B8G8R8A8Unorm
            | TextureFormat::B8G8R8A8UnormSrgb => TextureFormat::B8G8R8A8Typeless,
            TextureFormat::R8G8B8A8Typeless
            | TextureFormat::R8G8B8A8Unorm
            | TextureFormat::R8G8B8A8UnormSrgb => TextureFormat::R8G8B8A8Typeless,
            other => *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    Wireframe,
    #[default]
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonFunc {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthWriteMask {
    Zero,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    IncrementSaturate,
    DecrementSaturate,
    Invert,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DestAlpha,
    InvDestAlpha,
    DestColor,
    InvDestColor,
    BlendFactor,
    InvBlendFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendOp {
    #[default]
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputClassification {
    #[default]
    PerVertex,
    PerInstance,
}

/// 设备特性等级
///
/// 按优先顺序排列：先尝试 11.1，再回退到 11.0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureLevel {
    Level11_0,
    Level11_1,
}

impl FeatureLevel {
    /// 请求的特性等级，按优先级从高到低
    pub const PREFERRED: [FeatureLevel; 2] = [FeatureLevel::Level11_1, FeatureLevel::Level11_0];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureLevel::Level11_0 => "11_0",
            FeatureLevel::Level11_1 => "11_1",
        }
    }
}

/// 输入布局中的单个元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElementDescriptor {
    pub semantic_name: String,
    pub semantic_index: u32,
    pub format: TextureFormat,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
    pub classification: InputClassification,
    pub instance_data_step_rate: u32,
}

impl InputElementDescriptor {
    /// 逐顶点元素
    pub fn per_vertex(semantic_name: impl Into<String>, format: TextureFormat, offset: u32) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            semantic_index: 0,
            format,
            input_slot: 0,
            aligned_byte_offset: offset,
            classification: InputClassification::PerVertex,
            instance_data_step_rate: 0,
        }
    }
}

/// 光栅化状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDescriptor {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
}

impl Default for RasterizerDescriptor {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Solid,
            cull_mode: CullMode::Back,
            front_counter_clockwise: false,
            depth_bias: 0,
            depth_bias_clamp: 0.0,
            slope_scaled_depth_bias: 0.0,
            depth_clip_enable: false,
            scissor_enable: true,
            multisample_enable: false,
            antialiased_line_enable: false,
        }
    }
}

/// 模板操作（正面或背面）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilFaceDescriptor {
    pub fail_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub func: ComparisonFunc,
}

impl Default for StencilFaceDescriptor {
    fn default() -> Self {
        Self {
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            func: ComparisonFunc::Always,
        }
    }
}

/// 深度模板状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilDescriptor {
    pub depth_enable: bool,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: StencilFaceDescriptor,
    pub back_face: StencilFaceDescriptor,
}

impl Default for DepthStencilDescriptor {
    fn default() -> Self {
        // 没有深度缓冲区，深度与模板测试均关闭
        Self {
            depth_enable: false,
            depth_write_mask: DepthWriteMask::All,
            depth_func: ComparisonFunc::Less,
            stencil_enable: false,
            stencil_read_mask: 0xff,
            stencil_write_mask: 0xff,
            front_face: StencilFaceDescriptor::default(),
            back_face: StencilFaceDescriptor::default(),
        }
    }
}

/// 单个渲染目标的混合状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetBlendDescriptor {
    pub blend_enable: bool,
    pub src_blend: Blend,
    pub dest_blend: Blend,
    pub blend_op: BlendOp,
    pub src_blend_alpha: Blend,
    pub dest_blend_alpha: Blend,
    pub blend_op_alpha: BlendOp,
    pub write_mask: u8,
}

impl Default for RenderTargetBlendDescriptor {
    fn default() -> Self {
        Self {
            blend_enable: false,
            src_blend: Blend::One,
            dest_blend: Blend::Zero,
            blend_op: BlendOp::Add,
            src_blend_alpha: Blend::One,
            dest_blend_alpha: Blend::Zero,
            blend_op_alpha: BlendOp::Add,
            write_mask: 0x0f,
        }
    }
}

/// 混合状态（只描述渲染目标 0）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlendDescriptor {
    pub alpha_to_coverage_enable: bool,
    pub render_target: RenderTargetBlendDescriptor,
}

/// 视口
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// 覆盖整个目标的视口
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// 裁剪矩形（像素，右下角不包含）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScissorRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: i32::try_from(width).unwrap_or(i32::MAX),
            bottom: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }
}

/// 二维纹理描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub sample_count: u32,
    pub sample_quality: u32,
}

impl TextureDescriptor {
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}

/// 交换链描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    pub buffer_count: u32,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
}

/// 设备创建选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceOptions {
    /// 启用调试层
    pub debug_layer: bool,
}
