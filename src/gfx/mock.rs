//! 单元测试用的模拟图形后端（不需要 GPU）
//!
//! 每个 GPU 对象都是登记在共享账本中的 [`MockHandle`]，句柄被丢弃时记录一次释放，
//! 测试据此检查泄漏、重复释放和释放顺序。立即上下文记录收到的每条命令，
//! 每次绘制都会快照当前绑定的视口、裁剪矩形和渲染目标。
//!
//! 通过 [`MockEnvironment::fail_on`] 按 [`ResourceKind`] 注入创建失败。
//! 设备创建与真实后端共用 [`create_with_fallback`]，模拟驱动按环境设置返回结果码。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::core::error::{GraphicsError, Result};
use crate::core::event::WindowEvent;
use crate::core::window::WindowSystem;
use crate::gfx::backend::{
    DeviceBundle, DeviceContext, GraphicsBackend, GraphicsDevice, PresentationSurface,
};
use crate::gfx::creation::{
    create_with_fallback, CreationAttempt, CreationFailure, INVALID_ARG_CODE,
    SDK_COMPONENT_MISSING_CODE,
};
use crate::renderer::state::{
    BlendDescriptor, DepthStencilDescriptor, DeviceOptions, FeatureLevel,
    InputElementDescriptor, PrimitiveTopology, RasterizerDescriptor, ScissorRect,
    SurfaceDescriptor, TextureDescriptor, TextureFormat, Viewport,
};

/// DXGI_ERROR_UNSUPPORTED
const UNSUPPORTED_CODE: i32 = 0x887A_0004_u32 as i32;

// ============================================================================
// 账本
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Device,
    Context,
    SwapChain,
    BackBuffer,
    VertexShader,
    PixelShader,
    InputLayout,
    RasterizerState,
    DepthStencilState,
    BlendState,
    Texture,
    RenderTargetView,
    Window,
}

/// 模拟立即上下文或交换链收到的命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPrimitiveTopology(PrimitiveTopology),
    SetInputLayout(Option<u64>),
    SetVertexShader(u64),
    SetRasterizerState(u64),
    SetViewport(Viewport),
    SetScissorRect(ScissorRect),
    SetPixelShader(u64),
    SetDepthStencilState { state: u64, stencil_ref: u32 },
    SetBlendState { state: u64, blend_factor: [f32; 4], sample_mask: u32 },
    ClearRenderTarget { view: u64, color: [f32; 4] },
    SetRenderTarget(u64),
    UnbindRenderTargets,
    Draw { vertex_count: u32, start_vertex: u32 },
    ResolveSubresource { dst: u64, src: u64, format: TextureFormat },
    CopyResource { dst: u64, src: u64 },
    ResizeBuffers { width: u32, height: u32 },
    Present { sync_interval: u32 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetPrimitiveTopology(_) => "SetPrimitiveTopology",
            Command::SetInputLayout(_) => "SetInputLayout",
            Command::SetVertexShader(_) => "SetVertexShader",
            Command::SetRasterizerState(_) => "SetRasterizerState",
            Command::SetViewport(_) => "SetViewport",
            Command::SetScissorRect(_) => "SetScissorRect",
            Command::SetPixelShader(_) => "SetPixelShader",
            Command::SetDepthStencilState { .. } => "SetDepthStencilState",
            Command::SetBlendState { .. } => "SetBlendState",
            Command::ClearRenderTarget { .. } => "ClearRenderTarget",
            Command::SetRenderTarget(_) => "SetRenderTarget",
            Command::UnbindRenderTargets => "UnbindRenderTargets",
            Command::Draw { .. } => "Draw",
            Command::ResolveSubresource { .. } => "ResolveSubresource",
            Command::CopyResource { .. } => "CopyResource",
            Command::ResizeBuffers { .. } => "ResizeBuffers",
            Command::Present { .. } => "Present",
        }
    }
}

/// 每次绘制时捕获的状态
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub vertex_count: u32,
    pub viewport: Option<Viewport>,
    pub scissor: Option<ScissorRect>,
    pub render_target: Option<u64>,
}

struct Ledger {
    next_id: u64,
    live: Vec<(u64, ResourceKind)>,
    releases: Vec<(u64, ResourceKind)>,
    created: usize,
    devices_created: usize,
    failing: Vec<ResourceKind>,
    fail_present: bool,
    commands: Vec<Command>,
    draws: Vec<DrawRecord>,
    attempts: Vec<CreationAttempt>,

    feature_levels: Vec<FeatureLevel>,
    msaa_levels: u32,
    debug_layer_available: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            next_id: 0,
            live: Vec::new(),
            releases: Vec::new(),
            created: 0,
            devices_created: 0,
            failing: Vec::new(),
            fail_present: false,
            commands: Vec::new(),
            draws: Vec::new(),
            attempts: Vec::new(),
            feature_levels: FeatureLevel::PREFERRED.to_vec(),
            msaa_levels: 4,
            debug_layer_available: true,
        }
    }
}

// ============================================================================
// 模拟句柄
// ============================================================================

/// 恰好由一个 Rust 值持有的 GPU 对象
pub struct MockHandle {
    id: u64,
    kind: ResourceKind,
    describes: Option<u64>,
    ledger: Rc<RefCell<Ledger>>,
}

impl MockHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// 视图所描述的资源 id
    pub fn describes(&self) -> Option<u64> {
        self.describes
    }
}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.id)
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.live.retain(|(id, _)| *id != self.id);
        ledger.releases.push((self.id, self.kind));
    }
}

// ============================================================================
// 模拟环境（窗口句柄与测试控制）
// ============================================================================

type DrawHook = Box<dyn FnMut()>;

/// 共享的测试环境，同时充当后端的窗口句柄
#[derive(Clone, Default)]
pub struct MockEnvironment {
    ledger: Rc<RefCell<Ledger>>,
    draw_hook: Rc<RefCell<Option<DrawHook>>>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟驱动支持的特性等级，为空时设备创建失败
    pub fn with_feature_levels(self, levels: &[FeatureLevel]) -> Self {
        self.ledger.borrow_mut().feature_levels = levels.to_vec();
        self
    }

    /// 多重采样格式报告的质量等级数，0 表示不支持
    pub fn with_msaa_levels(self, levels: u32) -> Self {
        self.ledger.borrow_mut().msaa_levels = levels;
        self
    }

    /// 系统是否安装了调试层
    pub fn with_debug_layer(self, available: bool) -> Self {
        self.ledger.borrow_mut().debug_layer_available = available;
        self
    }

    /// 之后所有 `kind` 类型的创建都失败；`SwapChain` 同时让调整缓冲区失败
    pub fn fail_on(&self, kind: ResourceKind) {
        self.ledger.borrow_mut().failing.push(kind);
    }

    pub fn fail_present(&self) {
        self.ledger.borrow_mut().fail_present = true;
    }

    /// 在每次绘制调用内部运行 `hook`
    pub fn on_draw(&self, hook: impl FnMut() + 'static) {
        *self.draw_hook.borrow_mut() = Some(Box::new(hook));
    }

    /// 指定尺寸的设备、上下文与双缓冲交换链
    pub fn create_bundle(&self, width: u32, height: u32) -> DeviceBundle<MockBackend> {
        let surface = SurfaceDescriptor {
            buffer_count: 2,
            format: TextureFormat::B8G8R8A8Unorm,
            width,
            height,
        };
        MockBackend::create_device_and_surface(self, &surface, &DeviceOptions::default())
            .expect("mock device creation")
    }

    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.ledger.borrow_mut().commands)
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.ledger.borrow().draws.clone()
    }

    /// 设备创建收到的每次请求
    pub fn creation_attempts(&self) -> Vec<CreationAttempt> {
        self.ledger.borrow().attempts.clone()
    }

    pub fn live_count(&self, kind: ResourceKind) -> usize {
        self.ledger.borrow().live.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn live_total(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    pub fn created_count(&self) -> usize {
        self.ledger.borrow().created
    }

    pub fn devices_created(&self) -> usize {
        self.ledger.borrow().devices_created
    }

    pub fn release_count(&self, id: u64) -> usize {
        self.ledger.borrow().releases.iter().filter(|(i, _)| *i == id).count()
    }

    pub fn no_double_release(&self) -> bool {
        let ledger = self.ledger.borrow();
        let mut ids: Vec<u64> = ledger.releases.iter().map(|(id, _)| *id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == total
    }

    pub fn release_order(&self) -> Vec<ResourceKind> {
        self.ledger.borrow().releases.iter().map(|(_, kind)| *kind).collect()
    }

    pub fn clear_releases(&self) {
        self.ledger.borrow_mut().releases.clear();
    }

    fn allocate(&self, kind: ResourceKind, describes: Option<u64>) -> Option<MockHandle> {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.failing.contains(&kind) {
            return None;
        }

        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.live.push((id, kind));
        ledger.created += 1;

        Some(MockHandle {
            id,
            kind,
            describes,
            ledger: Rc::clone(&self.ledger),
        })
    }

    fn create(&self, kind: ResourceKind) -> Result<MockHandle> {
        self.allocate(kind, None).ok_or_else(|| {
            GraphicsError::ResourceCreation(format!("injected {:?} failure", kind)).into()
        })
    }

    fn record(&self, command: Command) {
        self.ledger.borrow_mut().commands.push(command);
    }

    /// 模拟驱动的单次设备创建：
    /// 不支持 11.1 的运行时拒绝整个等级列表，缺少调试层时报告组件缺失
    fn attempt_device(
        &self,
        request: &CreationAttempt,
    ) -> std::result::Result<FeatureLevel, CreationFailure> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.attempts.push(request.clone());

        let knows = |level: &FeatureLevel| ledger.feature_levels.contains(level);
        if request.feature_levels.contains(&FeatureLevel::Level11_1)
            && !knows(&FeatureLevel::Level11_1)
        {
            return Err(CreationFailure::new(INVALID_ARG_CODE, "unknown feature level"));
        }
        if request.debug_layer && !ledger.debug_layer_available {
            return Err(CreationFailure::new(
                SDK_COMPONENT_MISSING_CODE,
                "debug layer not installed",
            ));
        }
        request
            .feature_levels
            .iter()
            .copied()
            .find(|level| knows(level))
            .ok_or_else(|| CreationFailure::new(UNSUPPORTED_CODE, "no supported feature level"))
    }

    fn run_draw_hook(&self) {
        let hook = self.draw_hook.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook();
            *self.draw_hook.borrow_mut() = Some(hook);
        }
    }
}

// ============================================================================
// 模拟后端
// ============================================================================

pub struct MockBackend;

impl GraphicsBackend for MockBackend {
    type Device = MockDevice;
    type Context = MockContext;
    type Surface = MockSurface;
    type WindowHandle = MockEnvironment;

    type VertexShader = MockHandle;
    type PixelShader = MockHandle;
    type InputLayout = MockHandle;
    type RasterizerState = MockHandle;
    type DepthStencilState = MockHandle;
    type BlendState = MockHandle;
    type Texture = MockHandle;
    type RenderTargetView = MockHandle;

    fn name() -> &'static str {
        "Mock"
    }

    fn create_device_and_surface(
        env: &MockEnvironment,
        surface: &SurfaceDescriptor,
        options: &DeviceOptions,
    ) -> Result<DeviceBundle<Self>> {
        let feature_level = create_with_fallback(options, |request| env.attempt_device(request))?;

        let device = MockDevice {
            handle: env.create(ResourceKind::Device)?,
            env: env.clone(),
        };
        let context = MockContext {
            handle: env.create(ResourceKind::Context)?,
            env: env.clone(),
            bound: BoundState::default(),
        };
        let surface = MockSurface {
            handle: env.create(ResourceKind::SwapChain)?,
            env: env.clone(),
            descriptor: *surface,
        };
        env.ledger.borrow_mut().devices_created += 1;

        Ok(DeviceBundle {
            device,
            context,
            surface,
            feature_level,
        })
    }
}

// ============================================================================
// 模拟设备
// ============================================================================

pub struct MockDevice {
    handle: MockHandle,
    env: MockEnvironment,
}

impl MockDevice {
    pub fn id(&self) -> u64 {
        self.handle.id()
    }
}

fn require_bytecode(bytecode: &[u8], what: &str) -> Result<()> {
    if bytecode.is_empty() {
        return Err(GraphicsError::ResourceCreation(format!("empty {} bytecode", what)).into());
    }
    Ok(())
}

impl GraphicsDevice<MockBackend> for MockDevice {
    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<MockHandle> {
        require_bytecode(bytecode, "vertex shader")?;
        self.env.create(ResourceKind::VertexShader)
    }

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<MockHandle> {
        require_bytecode(bytecode, "pixel shader")?;
        self.env.create(ResourceKind::PixelShader)
    }

    fn create_input_layout(
        &self,
        elements: &[InputElementDescriptor],
        vs_bytecode: &[u8],
    ) -> Result<MockHandle> {
        require_bytecode(vs_bytecode, "vertex shader")?;
        if elements.is_empty() {
            return Err(GraphicsError::ResourceCreation("empty input layout".to_string()).into());
        }
        self.env.create(ResourceKind::InputLayout)
    }

    fn create_rasterizer_state(&self, _desc: &RasterizerDescriptor) -> Result<MockHandle> {
        self.env.create(ResourceKind::RasterizerState)
    }

    fn create_depth_stencil_state(&self, _desc: &DepthStencilDescriptor) -> Result<MockHandle> {
        self.env.create(ResourceKind::DepthStencilState)
    }

    fn create_blend_state(&self, _desc: &BlendDescriptor) -> Result<MockHandle> {
        self.env.create(ResourceKind::BlendState)
    }

    fn multisample_quality_levels(&self, _format: TextureFormat, sample_count: u32) -> Result<u32> {
        if sample_count == 1 {
            return Ok(1);
        }
        Ok(self.env.ledger.borrow().msaa_levels)
    }

    fn create_texture_2d(&self, desc: &TextureDescriptor) -> Result<MockHandle> {
        if desc.width == 0 || desc.height == 0 {
            return Err(GraphicsError::ResourceCreation("zero-sized texture".to_string()).into());
        }
        self.env.create(ResourceKind::Texture)
    }

    fn create_render_target_view(
        &self,
        texture: &MockHandle,
        _desc: &TextureDescriptor,
    ) -> Result<MockHandle> {
        self.env
            .allocate(ResourceKind::RenderTargetView, Some(texture.id()))
            .ok_or_else(|| {
                GraphicsError::ResourceCreation("injected RenderTargetView failure".to_string()).into()
            })
    }
}

// ============================================================================
// 模拟上下文
// ============================================================================

/// 模拟上下文当前绑定的管线状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundState {
    pub topology: Option<PrimitiveTopology>,
    pub input_layout: Option<u64>,
    pub vertex_shader: Option<u64>,
    pub rasterizer_state: Option<u64>,
    pub viewport: Option<Viewport>,
    pub scissor: Option<ScissorRect>,
    pub pixel_shader: Option<u64>,
    pub depth_stencil: Option<(u64, u32)>,
    pub blend: Option<(u64, [f32; 4], u32)>,
    pub render_target: Option<u64>,
}

pub struct MockContext {
    handle: MockHandle,
    env: MockEnvironment,
    bound: BoundState,
}

impl MockContext {
    pub fn id(&self) -> u64 {
        self.handle.id()
    }

    pub fn bound_state(&self) -> BoundState {
        self.bound.clone()
    }
}

impl DeviceContext<MockBackend> for MockContext {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        self.bound.topology = Some(topology);
        self.env.record(Command::SetPrimitiveTopology(topology));
    }

    fn set_input_layout(&mut self, layout: Option<&MockHandle>) {
        let id = layout.map(MockHandle::id);
        self.bound.input_layout = id;
        self.env.record(Command::SetInputLayout(id));
    }

    fn set_vertex_shader(&mut self, shader: &MockHandle) {
        self.bound.vertex_shader = Some(shader.id());
        self.env.record(Command::SetVertexShader(shader.id()));
    }

    fn set_rasterizer_state(&mut self, state: &MockHandle) {
        self.bound.rasterizer_state = Some(state.id());
        self.env.record(Command::SetRasterizerState(state.id()));
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.bound.viewport = Some(*viewport);
        self.env.record(Command::SetViewport(*viewport));
    }

    fn set_scissor_rect(&mut self, rect: &ScissorRect) {
        self.bound.scissor = Some(*rect);
        self.env.record(Command::SetScissorRect(*rect));
    }

    fn set_pixel_shader(&mut self, shader: &MockHandle) {
        self.bound.pixel_shader = Some(shader.id());
        self.env.record(Command::SetPixelShader(shader.id()));
    }

    fn set_depth_stencil_state(&mut self, state: &MockHandle, stencil_ref: u32) {
        self.bound.depth_stencil = Some((state.id(), stencil_ref));
        self.env.record(Command::SetDepthStencilState { state: state.id(), stencil_ref });
    }

    fn set_blend_state(&mut self, state: &MockHandle, blend_factor: [f32; 4], sample_mask: u32) {
        self.bound.blend = Some((state.id(), blend_factor, sample_mask));
        self.env.record(Command::SetBlendState {
            state: state.id(),
            blend_factor,
            sample_mask,
        });
    }

    fn clear_render_target(&mut self, view: &MockHandle, color: [f32; 4]) {
        self.env.record(Command::ClearRenderTarget { view: view.id(), color });
    }

    fn set_render_target(&mut self, view: &MockHandle) {
        self.bound.render_target = Some(view.id());
        self.env.record(Command::SetRenderTarget(view.id()));
    }

    fn unbind_render_targets(&mut self) {
        self.bound.render_target = None;
        self.env.record(Command::UnbindRenderTargets);
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) {
        self.env.record(Command::Draw { vertex_count, start_vertex });
        self.env.ledger.borrow_mut().draws.push(DrawRecord {
            vertex_count,
            viewport: self.bound.viewport,
            scissor: self.bound.scissor,
            render_target: self.bound.render_target,
        });
        self.env.run_draw_hook();
    }

    fn resolve_subresource(&mut self, dst: &MockHandle, src: &MockHandle, format: TextureFormat) {
        self.env.record(Command::ResolveSubresource {
            dst: dst.id(),
            src: src.id(),
            format,
        });
    }

    fn copy_resource(&mut self, dst: &MockHandle, src: &MockHandle) {
        self.env.record(Command::CopyResource { dst: dst.id(), src: src.id() });
    }
}

// ============================================================================
// 模拟交换链
// ============================================================================

pub struct MockSurface {
    handle: MockHandle,
    env: MockEnvironment,
    descriptor: SurfaceDescriptor,
}

impl MockSurface {
    pub fn id(&self) -> u64 {
        self.handle.id()
    }
}

impl PresentationSurface<MockBackend> for MockSurface {
    fn descriptor(&self) -> SurfaceDescriptor {
        self.descriptor
    }

    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<()> {
        if self.env.ledger.borrow().failing.contains(&ResourceKind::SwapChain) {
            return Err(GraphicsError::SurfaceResize("injected ResizeBuffers failure".to_string()).into());
        }

        let held = self.env.live_count(ResourceKind::BackBuffer);
        if held > 0 {
            return Err(GraphicsError::SurfaceResize(format!(
                "{} back buffer reference(s) still held",
                held
            )).into());
        }

        self.descriptor = SurfaceDescriptor {
            buffer_count,
            format,
            width,
            height,
        };
        self.env.record(Command::ResizeBuffers { width, height });
        Ok(())
    }

    fn back_buffer(&self) -> Result<MockHandle> {
        self.env.allocate(ResourceKind::BackBuffer, None).ok_or_else(|| {
            GraphicsError::Presentation("back buffer unavailable".to_string()).into()
        })
    }

    fn present(&mut self, sync_interval: u32) -> Result<()> {
        if self.env.ledger.borrow().fail_present {
            return Err(GraphicsError::Presentation("device removed".to_string()).into());
        }
        self.env.record(Command::Present { sync_interval });
        Ok(())
    }
}

// ============================================================================
// 模拟窗口
// ============================================================================

/// [`MockWindow`] 与驱动它的测试共享的事件队列
#[derive(Clone, Default)]
pub struct EventQueue(Rc<RefCell<VecDeque<WindowEvent>>>);

impl EventQueue {
    pub fn push(&self, event: WindowEvent) {
        self.0.borrow_mut().push_back(event);
    }

    fn drain(&self) -> Vec<WindowEvent> {
        self.0.borrow_mut().drain(..).collect()
    }
}

pub struct MockWindow {
    env: MockEnvironment,
    queue: EventQueue,
    size: (u32, u32),
    _handle: MockHandle,
}

impl MockWindow {
    pub fn new(env: &MockEnvironment, width: u32, height: u32) -> Self {
        Self {
            env: env.clone(),
            queue: EventQueue::default(),
            size: (width, height),
            _handle: env.create(ResourceKind::Window).expect("mock window"),
        }
    }

    pub fn queue(&self) -> EventQueue {
        self.queue.clone()
    }
}

impl WindowSystem for MockWindow {
    type Handle = MockEnvironment;

    fn handle(&self) -> Result<MockEnvironment> {
        Ok(self.env.clone())
    }

    fn inner_size(&self) -> (u32, u32) {
        self.size
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let events = self.queue.drain();
        for event in &events {
            if let WindowEvent::Resized(resize) = event {
                self.size = (resize.width, resize.height);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_release_once() {
        let env = MockEnvironment::new();
        let bundle = env.create_bundle(640, 480);
        let ids = [bundle.device.id(), bundle.context.id(), bundle.surface.id()];
        assert_eq!(env.live_total(), 3);

        drop(bundle);
        assert_eq!(env.live_total(), 0);
        for id in ids {
            assert_eq!(env.release_count(id), 1);
        }
        assert!(env.no_double_release());
    }

    #[test]
    fn test_missing_debug_layer_is_not_fatal() {
        let env = MockEnvironment::new().with_debug_layer(false);
        let surface = SurfaceDescriptor {
            buffer_count: 2,
            format: TextureFormat::B8G8R8A8Unorm,
            width: 640,
            height: 480,
        };
        let options = DeviceOptions { debug_layer: true };

        assert!(MockBackend::create_device_and_surface(&env, &surface, &options).is_ok());
        let attempts = env.creation_attempts();
        assert_eq!(attempts.len(), 2);
        assert!(attempts[0].debug_layer);
        assert!(!attempts[1].debug_layer);
    }

    #[test]
    fn test_old_runtime_retries_without_11_1() {
        let env = MockEnvironment::new()
            .with_feature_levels(&[FeatureLevel::Level11_0])
            .with_debug_layer(false);
        let surface = SurfaceDescriptor {
            buffer_count: 2,
            format: TextureFormat::B8G8R8A8Unorm,
            width: 640,
            height: 480,
        };
        let options = DeviceOptions { debug_layer: true };

        let bundle = MockBackend::create_device_and_surface(&env, &surface, &options)
            .expect("fallback device");
        assert_eq!(bundle.feature_level, FeatureLevel::Level11_0);

        let attempts = env.creation_attempts();
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[1].feature_levels, vec![FeatureLevel::Level11_0]);
        assert_eq!(
            attempts[2],
            CreationAttempt {
                debug_layer: false,
                feature_levels: vec![FeatureLevel::Level11_0],
            }
        );
    }

    #[test]
    fn test_injected_failure_leaves_nothing_behind() {
        let env = MockEnvironment::new();
        env.fail_on(ResourceKind::SwapChain);

        assert!(MockBackend::create_device_and_surface(
            &env,
            &SurfaceDescriptor {
                buffer_count: 2,
                format: TextureFormat::B8G8R8A8Unorm,
                width: 640,
                height: 480,
            },
            &DeviceOptions::default(),
        )
        .is_err());
        assert_eq!(env.live_total(), 0);
        assert_eq!(env.devices_created(), 0);
    }

    #[test]
    fn test_window_queue_is_shared() {
        let env = MockEnvironment::new();
        let mut window = MockWindow::new(&env, 1600, 900);
        let queue = window.queue();

        queue.push(WindowEvent::resized(800, 600));
        assert_eq!(window.poll_events(), vec![WindowEvent::resized(800, 600)]);
        assert_eq!(window.inner_size(), (800, 600));
        assert!(window.poll_events().is_empty());
    }
}
