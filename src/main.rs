//! d3d11_bootstrap - 最小化的 Direct3D 11 渲染循环
//!
//! # 使用方法
//!
//! ```bash
//! # 使用默认配置文件 config.toml
//! cargo run
//!
//! # 指定配置文件并覆盖部分设置
//! cargo run -- --config my.toml --width 1280 --height 720 --msaa 8 --no-vsync
//! ```
//!
//! # 初始化流程
//!
//! 1. 加载配置文件（不存在时使用默认配置，无法解析时退出）
//! 2. 应用命令行参数并验证
//! 3. 初始化日志系统
//! 4. 创建窗口，初始化帧循环
//! 5. 运行直到窗口关闭，然后按固定顺序释放资源

use std::path::Path;

use anyhow::Context;
use tracing::{error, info, warn};

use d3d11_bootstrap::core::{log, Config};

fn main() {
    // 1. 加载配置（在初始化日志之前）
    let config_path = Config::path_from_args(std::env::args());
    let config_found = Path::new(&config_path).exists();
    let mut config = match Config::from_file_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    // 2. 应用命令行参数并验证
    config.apply_args(std::env::args());
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 3. 初始化日志系统
    log::init_from_config(&config.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "d3d11_bootstrap starting");
    if !config_found {
        warn!(path = %config_path, "Config file not found, using defaults");
    }
    info!(
        width = config.window.width,
        height = config.window.height,
        msaa = config.graphics.msaa_samples,
        vsync = config.graphics.vsync,
        "Graphics configuration"
    );

    if let Err(e) = run(&config) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete");
}

#[cfg(target_os = "windows")]
fn run(config: &Config) -> anyhow::Result<()> {
    use d3d11_bootstrap::gfx::{D3D11Backend, WinitWindow};
    use d3d11_bootstrap::renderer::FrameLoop;

    let window = WinitWindow::new(&config.window).context("Failed to create window")?;
    let mut frame_loop = FrameLoop::<D3D11Backend, _>::initialize(window, config)
        .context("Failed to initialize renderer")?;

    info!("Entering main loop...");
    let result = frame_loop.run().context("Render loop failed");
    frame_loop.shutdown();
    result
}

#[cfg(not(target_os = "windows"))]
fn run(_config: &Config) -> anyhow::Result<()> {
    use d3d11_bootstrap::core::BootstrapError;

    Err(BootstrapError::Initialization(
        "Direct3D 11 is only available on Windows".to_string(),
    ))
    .context("Failed to initialize renderer")
}
