//! 基于 winit 的窗口
//!
//! 帧循环需要自己掌控迭代节奏，因此这里不使用 `EventLoop::run`，
//! 而是每次迭代调用 `pump_events` 非阻塞地取出待处理事件。

use std::time::Duration;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent as WinitWindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};

use crate::core::config::WindowConfig;
use crate::core::error::{BootstrapError, Result};
use crate::core::event::WindowEvent;
use crate::core::window::WindowSystem;

/// winit 窗口及其事件循环
///
/// 窗口必须先于事件循环释放，字段顺序保证了这一点。
pub struct WinitWindow {
    window: Window,
    event_loop: EventLoop<()>,
    closed: bool,
}

impl WinitWindow {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| BootstrapError::Window(format!("Failed to create event loop: {}", e)))?;

        let window = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .build(&event_loop)
            .map_err(|e| BootstrapError::Window(format!("Failed to create window: {}", e)))?;

        let size = window.inner_size();
        info!(
            title = %config.title,
            width = size.width,
            height = size.height,
            "Window created"
        );

        Ok(Self {
            window,
            event_loop,
            closed: false,
        })
    }
}

impl WindowSystem for WinitWindow {
    type Handle = RawWindowHandle;

    fn handle(&self) -> Result<RawWindowHandle> {
        self.window
            .window_handle()
            .map(|h| h.as_raw())
            .map_err(|e| BootstrapError::Window(format!("Window handle unavailable: {}", e)))
    }

    fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        if self.closed {
            events.push(WindowEvent::close_requested());
            return events;
        }

        let window_id = self.window.id();
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                if let Event::WindowEvent { window_id: id, event } = event {
                    if id != window_id {
                        return;
                    }
                    match event {
                        WinitWindowEvent::Resized(size) => {
                            events.push(WindowEvent::resized(size.width, size.height));
                        }
                        WinitWindowEvent::CloseRequested => {
                            events.push(WindowEvent::close_requested());
                        }
                        _ => (),
                    }
                }
            });

        // 事件循环已退出，之后不能再次泵取
        if let PumpStatus::Exit(code) = status {
            debug!(code, "Event loop exited");
            if code != 0 {
                events.push(WindowEvent::error(code, "Event loop exited abnormally"));
            }
            events.push(WindowEvent::close_requested());
            self.closed = true;
        }
        events
    }
}
