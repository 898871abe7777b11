//! 多重采样渲染目标
//!
//! 场景先绘制到一张离屏的多重采样纹理上，再在呈现前解析到交换链的后台缓冲区。
//! 目标的尺寸始终与交换链一致，格式和采样参数在进程生命周期内固定。

use tracing::{debug, info};

use crate::core::config::{MultisampleQuality, SamplePattern};
use crate::core::error::{GraphicsError, Result};
use crate::gfx::backend::{GraphicsBackend, GraphicsDevice};
use crate::renderer::state::{
    TextureDescriptor, TextureFormat, CENTER_MULTISAMPLE_PATTERN, STANDARD_MULTISAMPLE_PATTERN,
};

/// 把配置中的质量等级转换为原生质量值
pub fn quality_level(quality: MultisampleQuality) -> u32 {
    match quality {
        MultisampleQuality::Pattern(SamplePattern::Standard) => STANDARD_MULTISAMPLE_PATTERN,
        MultisampleQuality::Pattern(SamplePattern::Center) => CENTER_MULTISAMPLE_PATTERN,
        MultisampleQuality::Level(level) => level,
    }
}

/// 多重采样渲染目标
///
/// 字段顺序即释放顺序：先释放视图，再释放纹理。
pub struct MultisampleTarget<B: GraphicsBackend> {
    view: B::RenderTargetView,
    texture: B::Texture,
    descriptor: TextureDescriptor,
}

impl<B: GraphicsBackend> MultisampleTarget<B> {
    /// 创建多重采样目标
    ///
    /// # 参数
    ///
    /// * `sample_quality` - 原生质量值，可以是标准 / 中心采样模式或具体等级
    ///
    /// # 错误
    ///
    /// 设备不支持该格式与采样数的组合，或纹理 / 视图创建失败时返回
    /// `GraphicsError::ResourceCreation`。
    pub fn create(
        device: &B::Device,
        width: u32,
        height: u32,
        format: TextureFormat,
        sample_count: u32,
        sample_quality: u32,
    ) -> Result<Self> {
        let sample_quality = check_support::<B>(device, format, sample_count, sample_quality)?;

        let descriptor = TextureDescriptor {
            width,
            height,
            format,
            sample_count,
            sample_quality,
        };
        let target = Self::from_descriptor(device, descriptor)?;

        info!(
            width,
            height,
            format = ?format,
            samples = sample_count,
            quality = format_args!("{:#x}", sample_quality),
            "Multisample target created"
        );

        Ok(target)
    }

    /// 以新尺寸重建目标
    ///
    /// 沿用现有的格式和采样参数。新资源创建成功后才替换旧资源，
    /// 旧的纹理和视图在替换时释放；创建失败时旧目标保持有效。
    pub fn recreate(&mut self, device: &B::Device, width: u32, height: u32) -> Result<()> {
        let descriptor = TextureDescriptor {
            width,
            height,
            ..self.descriptor
        };

        let replacement = Self::from_descriptor(device, descriptor)?;
        let previous = std::mem::replace(self, replacement);
        drop(previous);

        debug!(width, height, "Multisample target recreated");
        Ok(())
    }

    fn from_descriptor(device: &B::Device, descriptor: TextureDescriptor) -> Result<Self> {
        let texture = device.create_texture_2d(&descriptor)?;
        let view = device.create_render_target_view(&texture, &descriptor)?;

        Ok(Self {
            view,
            texture,
            descriptor,
        })
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    pub fn texture(&self) -> &B::Texture {
        &self.texture
    }

    pub fn view(&self) -> &B::RenderTargetView {
        &self.view
    }

    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }
}

/// 检查采样参数是否受支持，返回实际使用的质量值
fn check_support<B: GraphicsBackend>(
    device: &B::Device,
    format: TextureFormat,
    sample_count: u32,
    sample_quality: u32,
) -> Result<u32> {
    let levels = device.multisample_quality_levels(format, sample_count)?;
    if levels == 0 {
        return Err(GraphicsError::ResourceCreation(format!(
            "{:?} does not support {}x multisampling",
            format, sample_count
        )).into());
    }

    // 单采样纹理的质量只能为 0
    if sample_count == 1 {
        return Ok(0);
    }

    let is_pattern = sample_quality == STANDARD_MULTISAMPLE_PATTERN
        || sample_quality == CENTER_MULTISAMPLE_PATTERN;
    if !is_pattern && sample_quality >= levels {
        return Err(GraphicsError::ResourceCreation(format!(
            "Quality level {} out of range for {}x {:?} ({} levels)",
            sample_quality, sample_count, format, levels
        )).into());
    }

    Ok(sample_quality)
}
