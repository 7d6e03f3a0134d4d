/// Mock graphics device for unit tests (no GPU required)
///
/// Every call made through the mock device, framebuffer and render buffer is
/// appended to one shared call log so tests can assert on exact ordering.

use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec4};
use rustc_hash::FxHashMap;

use crate::device::{
    GraphicsDevice, DepthState, Framebuffer, ShaderProgram, RenderBuffer2DT,
    Attachment, ClearFlags, CompareFunc, FramebufferStatus, PrimitiveKind,
    TextureId, TextureParameter, TextureStorageDesc, TextureTarget, Vertex2DT,
};
use crate::error::{Error, Result};

// ============================================================================
// Shared state
// ============================================================================

/// One recorded graphics-API call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    GenTexture(TextureId),
    BindTexture(TextureTarget, TextureId),
    TexParameter(TextureTarget, TextureParameter),
    TexStorage2D(TextureTarget, TextureStorageDesc),
    DeleteTextures(Vec<TextureId>),
    DrawBuffers(Vec<Attachment>),
    ActiveTexture(u32),
    ClearColor(Vec4),
    Clear(ClearFlags),
    ClearDepth(f32),
    DepthFunc(CompareFunc),
    FramebufferBind,
    FramebufferUnbind,
    AttachTexture(TextureId, TextureTarget, Attachment),
    Detach(Attachment),
    FramebufferStatus,
    ShaderEnable,
    ShaderDisable,
    SetUniformMatrix4(String, Mat4),
    Append(Vertex2DT),
    Submit(PrimitiveKind, usize),
}

/// State shared by all mock objects of one test
#[derive(Debug)]
pub struct MockState {
    /// Every call in issue order
    pub calls: Vec<DeviceCall>,
    /// Textures that exist, with their storage once allocated
    pub live_textures: FxHashMap<TextureId, Option<TextureStorageDesc>>,
    /// What the framebuffer currently has attached
    pub attachments: FxHashMap<Attachment, TextureId>,
    /// Status reported by the framebuffer
    pub complete: bool,
    /// Make `gen_texture()` fail
    pub fail_gen_texture: bool,
    next_texture: u32,
    bound_texture: TextureId,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            live_textures: FxHashMap::default(),
            attachments: FxHashMap::default(),
            complete: true,
            fail_gen_texture: false,
            next_texture: 1,
            bound_texture: TextureId::NONE,
        }
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&DeviceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn record(&mut self, call: DeviceCall) {
        self.calls.push(call);
    }
}

pub type SharedMockState = Arc<Mutex<MockState>>;

/// Create a fresh shared state
pub fn mock_state() -> SharedMockState {
    Arc::new(Mutex::new(MockState::new()))
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug)]
pub struct MockGraphicsDevice {
    pub state: SharedMockState,
}

impl MockGraphicsDevice {
    pub fn new(state: SharedMockState) -> Self {
        Self { state }
    }
}

impl DepthState for MockGraphicsDevice {
    fn depth_func(&self, func: CompareFunc) {
        self.state.lock().unwrap().record(DeviceCall::DepthFunc(func));
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn gen_texture(&self) -> Result<TextureId> {
        let mut state = self.state.lock().unwrap();
        if state.fail_gen_texture {
            return Err(Error::OutOfMemory);
        }
        let id = TextureId(state.next_texture);
        state.next_texture += 1;
        state.live_textures.insert(id, None);
        state.record(DeviceCall::GenTexture(id));
        Ok(id)
    }

    fn bind_texture(&self, target: TextureTarget, texture: TextureId) {
        let mut state = self.state.lock().unwrap();
        state.bound_texture = texture;
        state.record(DeviceCall::BindTexture(target, texture));
    }

    fn tex_parameter(&self, target: TextureTarget, param: TextureParameter) {
        self.state.lock().unwrap().record(DeviceCall::TexParameter(target, param));
    }

    fn tex_storage_2d(&self, target: TextureTarget, desc: &TextureStorageDesc) {
        let mut state = self.state.lock().unwrap();
        let bound = state.bound_texture;
        if let Some(storage) = state.live_textures.get_mut(&bound) {
            *storage = Some(*desc);
        }
        state.record(DeviceCall::TexStorage2D(target, *desc));
    }

    fn delete_textures(&self, textures: &[TextureId]) {
        let mut state = self.state.lock().unwrap();
        for id in textures {
            state.live_textures.remove(id);
        }
        state.record(DeviceCall::DeleteTextures(textures.to_vec()));
    }

    fn draw_buffers(&self, attachments: &[Attachment]) {
        self.state.lock().unwrap().record(DeviceCall::DrawBuffers(attachments.to_vec()));
    }

    fn active_texture(&self, unit: u32) {
        self.state.lock().unwrap().record(DeviceCall::ActiveTexture(unit));
    }

    fn clear_color(&self, color: Vec4) {
        self.state.lock().unwrap().record(DeviceCall::ClearColor(color));
    }

    fn clear(&self, flags: ClearFlags) {
        self.state.lock().unwrap().record(DeviceCall::Clear(flags));
    }

    fn clear_depth(&self, depth: f32) {
        self.state.lock().unwrap().record(DeviceCall::ClearDepth(depth));
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

#[derive(Debug)]
pub struct MockFramebuffer {
    pub state: SharedMockState,
    pub valid: bool,
}

impl MockFramebuffer {
    pub fn new(state: SharedMockState) -> Self {
        Self { state, valid: true }
    }

    /// A framebuffer whose creation failed upstream
    pub fn invalid(state: SharedMockState) -> Self {
        Self { state, valid: false }
    }
}

impl Framebuffer for MockFramebuffer {
    fn bind(&mut self) {
        self.state.lock().unwrap().record(DeviceCall::FramebufferBind);
    }

    fn unbind(&mut self) {
        self.state.lock().unwrap().record(DeviceCall::FramebufferUnbind);
    }

    fn attach_texture(&mut self, texture: TextureId, target: TextureTarget, attachment: Attachment) {
        let mut state = self.state.lock().unwrap();
        state.attachments.insert(attachment, texture);
        state.record(DeviceCall::AttachTexture(texture, target, attachment));
    }

    fn detach(&mut self, attachment: Attachment) {
        let mut state = self.state.lock().unwrap();
        state.attachments.remove(&attachment);
        state.record(DeviceCall::Detach(attachment));
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn status(&self) -> FramebufferStatus {
        let mut state = self.state.lock().unwrap();
        state.record(DeviceCall::FramebufferStatus);
        if !self.valid {
            FramebufferStatus::Invalid
        } else if state.complete {
            FramebufferStatus::Complete
        } else {
            FramebufferStatus::IncompleteAttachment
        }
    }
}

// ============================================================================
// Mock ShaderProgram / RenderBuffer2DT
// ============================================================================

#[derive(Debug)]
pub struct MockShaderProgram {
    pub state: SharedMockState,
    pub enabled: bool,
}

impl ShaderProgram for MockShaderProgram {
    fn enable(&mut self) {
        self.enabled = true;
        self.state.lock().unwrap().record(DeviceCall::ShaderEnable);
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.state.lock().unwrap().record(DeviceCall::ShaderDisable);
    }

    fn set_uniform_matrix4(&mut self, name: &str, value: &Mat4) {
        self.state
            .lock()
            .unwrap()
            .record(DeviceCall::SetUniformMatrix4(name.to_string(), *value));
    }
}

#[derive(Debug)]
pub struct MockRenderBuffer2DT {
    pub shader: MockShaderProgram,
    pub vertices: Vec<Vertex2DT>,
    pub submitted: Vec<(PrimitiveKind, Vec<Vertex2DT>)>,
}

impl MockRenderBuffer2DT {
    pub fn new(state: SharedMockState) -> Self {
        Self {
            shader: MockShaderProgram { state, enabled: false },
            vertices: Vec::new(),
            submitted: Vec::new(),
        }
    }
}

impl RenderBuffer2DT for MockRenderBuffer2DT {
    fn shader(&mut self) -> &mut dyn ShaderProgram {
        &mut self.shader
    }

    fn safe_append(&mut self, vertex: Vertex2DT) {
        self.vertices.push(vertex);
        self.shader.state.lock().unwrap().record(DeviceCall::Append(vertex));
    }

    fn submit(&mut self, primitive: PrimitiveKind) {
        let vertices = std::mem::take(&mut self.vertices);
        self.shader
            .state
            .lock()
            .unwrap()
            .record(DeviceCall::Submit(primitive, vertices.len()));
        self.submitted.push((primitive, vertices));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
