//! 着色器字节码加载
//!
//! 着色器在构建时由 `fxc` 离线编译为 `.cso` 文件（见 `build.rs` 和 `shaders/`），
//! 运行时只读取编译好的字节码。
//!
//! # 渲染管线
//!
//! ```text
//! SV_VertexID -> 顶点着色器 -> 图元装配 -> 光栅化 -> 像素着色器 -> MSAA 目标
//! ```
//!
//! 字节码的加载发生在设备创建之前，缺失的着色器文件不会产生任何 GPU 对象。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::ShaderConfig;
use crate::core::error::{Result, ShaderLoadError};

/// 编译好的着色器字节码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBytecode {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ShaderBytecode {
    /// 直接从内存构造
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// 来源文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 读取字节码文件
///
/// # 错误
///
/// - 文件不存在：`ShaderLoadError::FileNotFound`
/// - 文件为空或读取失败：`ShaderLoadError::Unreadable`
pub fn read_bytecode<P: AsRef<Path>>(path: P) -> Result<ShaderBytecode> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ShaderLoadError::FileNotFound(path.to_path_buf()),
        _ => ShaderLoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    if bytes.is_empty() {
        return Err(ShaderLoadError::Unreadable {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        }.into());
    }

    debug!(path = %path.display(), size = bytes.len(), "Shader bytecode loaded");

    Ok(ShaderBytecode {
        path: path.to_path_buf(),
        bytes,
    })
}

/// 顶点着色器和像素着色器字节码
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub vertex: ShaderBytecode,
    pub pixel: ShaderBytecode,
}

impl ShaderSet {
    /// 按配置加载两个着色器
    pub fn load(config: &ShaderConfig) -> Result<Self> {
        Ok(Self {
            vertex: read_bytecode(&config.vertex)?,
            pixel: read_bytecode(&config.pixel)?,
        })
    }
}
