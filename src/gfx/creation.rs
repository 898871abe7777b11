//! 设备创建的回退策略
//!
//! 与具体后端无关：后端只提供一次创建尝试，本模块根据返回的结果码决定
//! 是否放宽请求后重试。
//!
//! 1. 请求 11.1 与 11.0 两个特性等级，并按配置启用调试层
//! 2. 旧运行时不认识 11.1 时返回 `E_INVALIDARG`，去掉 11.1 重试
//! 3. 系统未安装调试层时返回 `DXGI_ERROR_SDK_COMPONENT_MISSING`，关闭调试层重试
//! 4. 其他失败直接返回 `GraphicsError::DeviceCreation`，携带原始结果码
//!
//! 每次重试都严格缩小请求，因此最多尝试三次。

use tracing::{debug, warn};

use crate::core::error::{GraphicsError, Result};
use crate::renderer::state::{DeviceOptions, FeatureLevel};

/// E_INVALIDARG
pub const INVALID_ARG_CODE: i32 = 0x8007_0057_u32 as i32;

/// DXGI_ERROR_SDK_COMPONENT_MISSING
pub const SDK_COMPONENT_MISSING_CODE: i32 = 0x887A_002D_u32 as i32;

/// 单次创建尝试的请求参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationAttempt {
    pub debug_layer: bool,
    /// 按优先级从高到低
    pub feature_levels: Vec<FeatureLevel>,
}

impl CreationAttempt {
    fn initial(options: &DeviceOptions) -> Self {
        Self {
            debug_layer: options.debug_layer,
            feature_levels: FeatureLevel::PREFERRED.to_vec(),
        }
    }
}

/// 单次创建尝试失败时的原始结果码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationFailure {
    pub code: i32,
    pub message: String,
}

impl CreationFailure {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// 反复调用 `attempt`，直到成功或遇到无法回退的失败
pub fn create_with_fallback<T, F>(options: &DeviceOptions, mut attempt: F) -> Result<T>
where
    F: FnMut(&CreationAttempt) -> std::result::Result<T, CreationFailure>,
{
    let mut request = CreationAttempt::initial(options);

    loop {
        match attempt(&request) {
            Ok(created) => return Ok(created),
            Err(failure)
                if failure.code == INVALID_ARG_CODE
                    && request.feature_levels.contains(&FeatureLevel::Level11_1) =>
            {
                debug!("Runtime does not recognize feature level 11_1, retrying with 11_0");
                request.feature_levels.retain(|l| *l != FeatureLevel::Level11_1);
            }
            Err(failure) if failure.code == SDK_COMPONENT_MISSING_CODE && request.debug_layer => {
                warn!("Debug layer is not installed, continuing without it");
                request.debug_layer = false;
            }
            Err(failure) => {
                return Err(GraphicsError::DeviceCreation {
                    code: failure.code,
                    message: failure.message,
                }
                .into())
            }
        }
    }
}
