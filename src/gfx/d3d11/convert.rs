//! 状态描述到 D3D11 原生结构的转换

use std::ffi::CString;

use windows::core::PCSTR;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;

use crate::core::error::{GraphicsError, Result};
use crate::renderer::state::{
    Blend, BlendDescriptor, BlendOp, ComparisonFunc, CullMode, DepthStencilDescriptor,
    DepthWriteMask, FeatureLevel, FillMode, InputClassification, InputElementDescriptor,
    PrimitiveTopology, RasterizerDescriptor, ScissorRect, StencilFaceDescriptor, StencilOp,
    TextureDescriptor, TextureFormat, Viewport,
};

pub fn format(format: TextureFormat) -> DXGI_FORMAT {
    match format {
        TextureFormat::B8G8R8A8Typeless => DXGI_FORMAT_B8G8R8A8_TYPELESS,
        TextureFormat::B8G8R8A8Unorm => DXGI_FORMAT_B8G8R8A8_UNORM,
        TextureFormat::B8G8R8A8UnormSrgb => DXGI_FORMAT_B8G8R8A8_UNORM_SRGB,
        TextureFormat::R8G8B8A8Typeless => DXGI_FORMAT_R8G8B8A8_TYPELESS,
        TextureFormat::R8G8B8A8Unorm => DXGI_FORMAT_R8G8B8A8_UNORM,
        TextureFormat::R8G8B8A8UnormSrgb => DXGI_FORMAT_R8G8B8A8_UNORM_SRGB,
        TextureFormat::R32G32Float => DXGI_FORMAT_R32G32_FLOAT,
        TextureFormat::R32G32B32Float => DXGI_FORMAT_R32G32B32_FLOAT,
        TextureFormat::R32G32B32A32Float => DXGI_FORMAT_R32G32B32A32_FLOAT,
    }
}

pub fn topology(topology: PrimitiveTopology) -> D3D_PRIMITIVE_TOPOLOGY {
    match topology {
        PrimitiveTopology::PointList => D3D_PRIMITIVE_TOPOLOGY_POINTLIST,
        PrimitiveTopology::LineList => D3D_PRIMITIVE_TOPOLOGY_LINELIST,
        PrimitiveTopology::LineStrip => D3D_PRIMITIVE_TOPOLOGY_LINESTRIP,
        PrimitiveTopology::TriangleList => D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST,
        PrimitiveTopology::TriangleStrip => D3D_PRIMITIVE_TOPOLOGY_TRIANGLESTRIP,
    }
}

pub fn feature_level(level: FeatureLevel) -> D3D_FEATURE_LEVEL {
    match level {
        FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
        FeatureLevel::Level11_1 => D3D_FEATURE_LEVEL_11_1,
    }
}

pub fn from_feature_level(level: D3D_FEATURE_LEVEL) -> Option<FeatureLevel> {
    match level {
        D3D_FEATURE_LEVEL_11_0 => Some(FeatureLevel::Level11_0),
        D3D_FEATURE_LEVEL_11_1 => Some(FeatureLevel::Level11_1),
        _ => None,
    }
}

fn comparison(func: ComparisonFunc) -> D3D11_COMPARISON_FUNC {
    match func {
        ComparisonFunc::Never => D3D11_COMPARISON_NEVER,
        ComparisonFunc::Less => D3D11_COMPARISON_LESS,
        ComparisonFunc::Equal => D3D11_COMPARISON_EQUAL,
        ComparisonFunc::LessEqual => D3D11_COMPARISON_LESS_EQUAL,
        ComparisonFunc::Greater => D3D11_COMPARISON_GREATER,
        ComparisonFunc::NotEqual => D3D11_COMPARISON_NOT_EQUAL,
        ComparisonFunc::GreaterEqual => D3D11_COMPARISON_GREATER_EQUAL,
        ComparisonFunc::Always => D3D11_COMPARISON_ALWAYS,
    }
}

fn stencil_op(op: StencilOp) -> D3D11_STENCIL_OP {
    match op {
        StencilOp::Keep => D3D11_STENCIL_OP_KEEP,
        StencilOp::Zero => D3D11_STENCIL_OP_ZERO,
        StencilOp::Replace => D3D11_STENCIL_OP_REPLACE,
        StencilOp::IncrementSaturate => D3D11_STENCIL_OP_INCR_SAT,
        StencilOp::DecrementSaturate => D3D11_STENCIL_OP_DECR_SAT,
        StencilOp::Invert => D3D11_STENCIL_OP_INVERT,
        StencilOp::Increment => D3D11_STENCIL_OP_INCR,
        StencilOp::Decrement => D3D11_STENCIL_OP_DECR,
    }
}

fn blend(blend: Blend) -> D3D11_BLEND {
    match blend {
        Blend::Zero => D3D11_BLEND_ZERO,
        Blend::One => D3D11_BLEND_ONE,
        Blend::SrcColor => D3D11_BLEND_SRC_COLOR,
        Blend::InvSrcColor => D3D11_BLEND_INV_SRC_COLOR,
        Blend::SrcAlpha => D3D11_BLEND_SRC_ALPHA,
        Blend::InvSrcAlpha => D3D11_BLEND_INV_SRC_ALPHA,
        Blend::DestAlpha => D3D11_BLEND_DEST_ALPHA,
        Blend::InvDestAlpha => D3D11_BLEND_INV_DEST_ALPHA,
        Blend::DestColor => D3D11_BLEND_DEST_COLOR,
        Blend::InvDestColor => D3D11_BLEND_INV_DEST_COLOR,
        Blend::BlendFactor => D3D11_BLEND_BLEND_FACTOR,
        Blend::InvBlendFactor => D3D11_BLEND_INV_BLEND_FACTOR,
    }
}

fn blend_op(op: BlendOp) -> D3D11_BLEND_OP {
    match op {
        BlendOp::Add => D3D11_BLEND_OP_ADD,
        BlendOp::Subtract => D3D11_BLEND_OP_SUBTRACT,
        BlendOp::RevSubtract => D3D11_BLEND_OP_REV_SUBTRACT,
        BlendOp::Min => D3D11_BLEND_OP_MIN,
        BlendOp::Max => D3D11_BLEND_OP_MAX,
    }
}

pub fn rasterizer_desc(desc: &RasterizerDescriptor) -> D3D11_RASTERIZER_DESC {
    D3D11_RASTERIZER_DESC {
        FillMode: match desc.fill_mode {
            FillMode::Wireframe => D3D11_FILL_WIREFRAME,
            FillMode::Solid => D3D11_FILL_SOLID,
        },
        CullMode: match desc.cull_mode {
            CullMode::None => D3D11_CULL_NONE,
            CullMode::Front => D3D11_CULL_FRONT,
            CullMode::Back => D3D11_CULL_BACK,
        },
        FrontCounterClockwise: desc.front_counter_clockwise.into(),
        DepthBias: desc.depth_bias,
        DepthBiasClamp: desc.depth_bias_clamp,
        SlopeScaledDepthBias: desc.slope_scaled_depth_bias,
        DepthClipEnable: desc.depth_clip_enable.into(),
        ScissorEnable: desc.scissor_enable.into(),
        MultisampleEnable: desc.multisample_enable.into(),
        AntialiasedLineEnable: desc.antialiased_line_enable.into(),
    }
}

fn stencil_face(face: &StencilFaceDescriptor) -> D3D11_DEPTH_STENCILOP_DESC {
    D3D11_DEPTH_STENCILOP_DESC {
        StencilFailOp: stencil_op(face.fail_op),
        StencilDepthFailOp: stencil_op(face.depth_fail_op),
        StencilPassOp: stencil_op(face.pass_op),
        StencilFunc: comparison(face.func),
    }
}

pub fn depth_stencil_desc(desc: &DepthStencilDescriptor) -> D3D11_DEPTH_STENCIL_DESC {
    D3D11_DEPTH_STENCIL_DESC {
        DepthEnable: desc.depth_enable.into(),
        DepthWriteMask: match desc.depth_write_mask {
            DepthWriteMask::Zero => D3D11_DEPTH_WRITE_MASK_ZERO,
            DepthWriteMask::All => D3D11_DEPTH_WRITE_MASK_ALL,
        },
        DepthFunc: comparison(desc.depth_func),
        StencilEnable: desc.stencil_enable.into(),
        StencilReadMask: desc.stencil_read_mask,
        StencilWriteMask: desc.stencil_write_mask,
        FrontFace: stencil_face(&desc.front_face),
        BackFace: stencil_face(&desc.back_face),
    }
}

pub fn blend_desc(desc: &BlendDescriptor) -> D3D11_BLEND_DESC {
    let rt = &desc.render_target;
    let mut native = D3D11_BLEND_DESC {
        AlphaToCoverageEnable: desc.alpha_to_coverage_enable.into(),
        IndependentBlendEnable: false.into(),
        ..Default::default()
    };

    // 只使用渲染目标 0
    native.RenderTarget[0] = D3D11_RENDER_TARGET_BLEND_DESC {
        BlendEnable: rt.blend_enable.into(),
        SrcBlend: blend(rt.src_blend),
        DestBlend: blend(rt.dest_blend),
        BlendOp: blend_op(rt.blend_op),
        SrcBlendAlpha: blend(rt.src_blend_alpha),
        DestBlendAlpha: blend(rt.dest_blend_alpha),
        BlendOpAlpha: blend_op(rt.blend_op_alpha),
        RenderTargetWriteMask: rt.write_mask,
    };
    native
}

pub fn viewport(vp: &Viewport) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: vp.x,
        TopLeftY: vp.y,
        Width: vp.width,
        Height: vp.height,
        MinDepth: vp.min_depth,
        MaxDepth: vp.max_depth,
    }
}

pub fn rect(rect: &ScissorRect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

/// 纹理本身使用无类型格式，渲染目标视图使用 `desc.format`
pub fn texture_desc(desc: &TextureDescriptor) -> D3D11_TEXTURE2D_DESC {
    D3D11_TEXTURE2D_DESC {
        Width: desc.width,
        Height: desc.height,
        MipLevels: 1,
        ArraySize: 1,
        Format: format(desc.format.typeless()),
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: desc.sample_count,
            Quality: desc.sample_quality,
        },
        Usage: D3D11_USAGE_DEFAULT,
        BindFlags: D3D11_BIND_RENDER_TARGET.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
    }
}

pub fn render_target_view_desc(desc: &TextureDescriptor) -> D3D11_RENDER_TARGET_VIEW_DESC {
    if desc.is_multisampled() {
        D3D11_RENDER_TARGET_VIEW_DESC {
            Format: format(desc.format),
            ViewDimension: D3D11_RTV_DIMENSION_TEXTURE2DMS,
            Anonymous: D3D11_RENDER_TARGET_VIEW_DESC_0 {
                Texture2DMS: D3D11_TEX2DMS_RTV::default(),
            },
        }
    } else {
        D3D11_RENDER_TARGET_VIEW_DESC {
            Format: format(desc.format),
            ViewDimension: D3D11_RTV_DIMENSION_TEXTURE2D,
            Anonymous: D3D11_RENDER_TARGET_VIEW_DESC_0 {
                Texture2D: D3D11_TEX2D_RTV { MipSlice: 0 },
            },
        }
    }
}

/// 输入元素描述
///
/// `D3D11_INPUT_ELEMENT_DESC` 中的语义名是裸指针，
/// 调用方必须让 `names` 活到 `CreateInputLayout` 返回之后。
pub struct InputElements {
    _names: Vec<CString>,
    pub descs: Vec<D3D11_INPUT_ELEMENT_DESC>,
}

pub fn input_elements(elements: &[InputElementDescriptor]) -> Result<InputElements> {
    let names = elements
        .iter()
        .map(|e| {
            CString::new(e.semantic_name.as_str()).map_err(|_| {
                GraphicsError::ResourceCreation(format!(
                    "Invalid semantic name {:?}",
                    e.semantic_name
                ))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let descs = elements
        .iter()
        .zip(&names)
        .map(|(e, name)| D3D11_INPUT_ELEMENT_DESC {
            SemanticName: PCSTR(name.as_ptr() as *const u8),
            SemanticIndex: e.semantic_index,
            Format: format(e.format),
            InputSlot: e.input_slot,
            AlignedByteOffset: e.aligned_byte_offset,
            InputSlotClass: match e.classification {
                InputClassification::PerVertex => D3D11_INPUT_PER_VERTEX_DATA,
                InputClassification::PerInstance => D3D11_INPUT_PER_INSTANCE_DATA,
            },
            InstanceDataStepRate: e.instance_data_step_rate,
        })
        .collect();

    Ok(InputElements {
        _names: names,
        descs,
    })
}
