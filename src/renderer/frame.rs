//! 帧循环
//!
//! [`FrameLoop`] 是一个单线程状态机：
//!
//! ```text
//! Initializing -> Running <-> ResizePending
//!                    |
//!                    v
//!              ShuttingDown
//! ```
//!
//! 每次迭代先轮询窗口事件，再渲染一帧。尺寸变化在轮询阶段同步处理完毕，
//! 因此不会有帧在调整大小的过程中被绘制；绘制期间产生的事件由窗口系统排队，
//! 在下一次轮询时处理。

use tracing::{debug, info, trace, warn};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::event::{WindowEvent, WindowResizeEvent};
use crate::core::window::WindowSystem;
use crate::gfx::backend::{DeviceContext, GraphicsBackend};
use crate::renderer::graphics::{GraphicsContext, CLEAR_COLOR};
use crate::renderer::pipeline::{PipelineConfiguration, PipelineDescriptor, TRIANGLE_VERTEX_COUNT};
use crate::renderer::shaders::ShaderSet;

/// 帧循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Initializing,
    Running,
    ResizePending { width: u32, height: u32 },
    ShuttingDown,
}

/// 帧循环
///
/// 字段顺序即释放顺序：管线配置、图形上下文（多重采样目标、交换链、上下文、设备）、窗口。
pub struct FrameLoop<B, W>
where
    B: GraphicsBackend,
    W: WindowSystem<Handle = B::WindowHandle>,
{
    pipeline: PipelineConfiguration<B>,
    graphics: GraphicsContext<B>,
    window: W,
    state: FrameState,
    width: u32,
    height: u32,
    suspended: bool,
    frames_rendered: u64,
}

impl<B, W> FrameLoop<B, W>
where
    B: GraphicsBackend,
    W: WindowSystem<Handle = B::WindowHandle>,
{
    /// 初始化：加载着色器字节码，创建设备、交换链、多重采样目标和管线配置
    ///
    /// 着色器在任何 GPU 对象创建之前加载，缺失的着色器文件不会创建设备。
    pub fn initialize(window: W, config: &Config) -> Result<Self> {
        debug!(state = ?FrameState::Initializing, "Frame loop starting");

        let shaders = ShaderSet::load(&config.shaders)?;
        Self::with_shaders(window, config, &shaders)
    }

    /// 使用已加载的着色器初始化
    pub fn with_shaders(window: W, config: &Config, shaders: &ShaderSet) -> Result<Self> {
        let handle = window.handle()?;
        let (width, height) = window.inner_size();
        let (width, height) = (width.max(1), height.max(1));

        let graphics = GraphicsContext::<B>::new(&handle, width, height, &config.graphics)?;
        let pipeline = PipelineConfiguration::<B>::create(
            graphics.device(),
            &PipelineDescriptor::fixed(shaders, width, height),
        )?;

        info!(width, height, backend = B::name(), "Frame loop running");

        Ok(Self {
            pipeline,
            graphics,
            window,
            state: FrameState::Running,
            width,
            height,
            suspended: false,
            frames_rendered: 0,
        })
    }

    /// 运行直到窗口关闭或出现错误
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// 执行一次迭代：轮询事件，然后渲染一帧
    ///
    /// # 返回值
    ///
    /// 收到关闭请求后返回 `Ok(false)`
    pub fn step(&mut self) -> Result<bool> {
        self.poll()?;

        if self.state == FrameState::ShuttingDown {
            return Ok(false);
        }

        if !self.suspended {
            self.render_frame()?;
        }
        Ok(true)
    }

    /// 处理所有待处理的窗口事件
    ///
    /// 同一次轮询中的多个尺寸变化只应用最后一个。
    fn poll(&mut self) -> Result<()> {
        let mut pending_size = None;

        for event in self.window.poll_events() {
            trace!(event = %event.as_event().detail(), "Window event");

            match event {
                WindowEvent::Resized(resize) => {
                    pending_size = Some(resize);
                }
                WindowEvent::CloseRequested(_) => {
                    info!("Close requested");
                    self.state = FrameState::ShuttingDown;
                }
                WindowEvent::Error(error) => {
                    warn!(code = error.code, description = %error.description, "Window system error");
                }
            }
        }

        if self.state == FrameState::ShuttingDown {
            return Ok(());
        }

        match pending_size {
            Some(resize) => self.handle_resize(resize),
            None => Ok(()),
        }
    }

    fn handle_resize(&mut self, resize: WindowResizeEvent) -> Result<()> {
        // 最小化：保持现有资源，暂停渲染
        if resize.is_minimized() {
            if !self.suspended {
                info!("Window minimized, rendering suspended");
            }
            self.suspended = true;
            return Ok(());
        }

        let WindowResizeEvent { width, height } = resize;
        if self.suspended {
            info!(width, height, "Rendering resumed");
            self.suspended = false;
        }

        if (width, height) == (self.width, self.height) {
            return Ok(());
        }

        self.state = FrameState::ResizePending { width, height };
        debug!(state = ?self.state, "Resizing");

        self.graphics.resize(width, height)?;
        self.pipeline.resize(width, height);
        self.width = width;
        self.height = height;

        self.state = FrameState::Running;
        Ok(())
    }

    /// 清屏、绑定、绘制、解析、呈现
    fn render_frame(&mut self) -> Result<()> {
        self.graphics.begin_frame(CLEAR_COLOR);
        self.pipeline.bind(self.graphics.context_mut());
        self.graphics.context_mut().draw(TRIANGLE_VERTEX_COUNT, 0);
        self.graphics.resolve_and_present()?;

        self.frames_rendered += 1;
        trace!(frame = self.frames_rendered, "Frame presented");
        Ok(())
    }

    /// 按顺序释放：管线配置、多重采样目标、交换链、上下文、设备、窗口
    pub fn shutdown(self) {
        let FrameLoop { pipeline, graphics, window, frames_rendered, .. } = self;
        info!(frames = frames_rendered, "Shutting down");

        drop(pipeline);
        drop(graphics);
        drop(window);

        debug!("Shutdown complete");
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn graphics(&self) -> &GraphicsContext<B> {
        &self.graphics
    }
}
