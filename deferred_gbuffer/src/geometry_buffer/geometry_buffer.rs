/// GeometryBuffer - off-screen framebuffer for deferred shading
///
/// Owns one framebuffer object and the screen-sized textures attached to it
/// (normal, diffuse, specular, emission, depth). The owner calls `update()`
/// once per frame; attachments are (re)allocated whenever the viewport size
/// differs from the size they were created at.
///
/// # Lifecycle
///
/// ```text
/// Dead --init--> Empty --update--> Attached(size) --update(resize)--> Attached(size')
///   ^                                   |
///   +------------------kill-------------+
/// ```

use std::rc::Rc;
use glam::{IVec2, Mat4, Vec2, Vec4};

use crate::device::{
    Attachment, ClearFlags, CompareFunc, DepthTextureMode, Framebuffer, GraphicsDevice,
    PrimitiveKind, RenderBuffer2DT, TextureFilter, TextureId, TextureParameter,
    TextureStorageDesc, TextureTarget, TextureWrap, Vertex2DT,
};
use crate::error::{Error, Result};
use crate::viewport::ViewportProvider;
use crate::{gbuffer_debug, gbuffer_error, gbuffer_warn};
use super::attachment::{AttachmentSlot, AttachmentTable, ATTACHMENT_COUNT};

const SOURCE: &str = "deferred::GeometryBuffer";

/// All attachments are plain 2D textures
const TEXTURE_TARGET: TextureTarget = TextureTarget::Texture2D;

/// Geometry buffer configuration
#[derive(Debug, Clone)]
pub struct GeometryBufferConfig {
    /// Name used in diagnostics (completeness warnings, errors)
    pub name: String,
    /// Set DEPTH_TEXTURE_MODE = LUMINANCE on the depth texture
    ///
    /// Only fixed-function sampling paths honor it; core profiles ignore the call.
    pub legacy_depth_texture_mode: bool,
}

impl Default for GeometryBufferConfig {
    fn default() -> Self {
        Self {
            name: "GeometryBuffer".to_string(),
            legacy_depth_texture_mode: true,
        }
    }
}

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Killed; holds no GPU textures
    Dead,
    /// Alive without attachments
    Empty,
    /// Alive with attachments of the given size
    Attached(IVec2),
}

/// Deferred-shading geometry buffer
pub struct GeometryBuffer {
    config: GeometryBufferConfig,
    device: Rc<dyn GraphicsDevice>,
    framebuffer: Box<dyn Framebuffer>,
    viewport: Rc<dyn ViewportProvider>,
    table: AttachmentTable,
    /// Size the current attachments were created at
    prev_size: IVec2,
    /// Size wanted by the viewport at the last update
    curr_size: IVec2,
    /// Result of the last completeness check on the current attachments
    complete: bool,
    dead: bool,
    bound: bool,
}

impl GeometryBuffer {
    /// Create a geometry buffer around an existing framebuffer object
    ///
    /// Runs the construction-time `init()`; no textures are allocated until
    /// the first `update()`.
    ///
    /// # Arguments
    ///
    /// * `config` - Name and legacy options
    /// * `device` - Graphics device used for texture and state calls
    /// * `framebuffer` - Framebuffer handle, exclusively owned from now on
    /// * `viewport` - Provider of the wanted attachment size
    pub fn new(
        config: GeometryBufferConfig,
        device: Rc<dyn GraphicsDevice>,
        framebuffer: Box<dyn Framebuffer>,
        viewport: Rc<dyn ViewportProvider>,
    ) -> Self {
        let mut buffer = Self {
            config,
            device,
            framebuffer,
            viewport,
            table: AttachmentTable::new(),
            prev_size: IVec2::ZERO,
            curr_size: IVec2::ZERO,
            complete: false,
            dead: false,
            bound: false,
        };
        buffer.reset();
        buffer
    }

    // ===== LIFECYCLE =====

    /// Reset the buffer to the empty state
    ///
    /// # Arguments
    ///
    /// * `is_construction` - true on first initialization, false on reload
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` if a reload is requested on a buffer that
    /// was not killed first, or a construction-time init on a killed buffer or
    /// on one that already holds attachments.
    pub fn init(&mut self, is_construction: bool) -> Result<()> {
        if is_construction && self.dead {
            return Err(self.invalid_state("construction-time init on a killed buffer"));
        }
        // resetting would drop the table while the textures stay alive
        if is_construction && self.has_attachments() {
            return Err(self.invalid_state("construction-time init on an attached buffer"));
        }
        if !is_construction && !self.dead {
            return Err(self.invalid_state("reload requires a prior kill"));
        }

        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.table.clear();

        // Scripting can toggle deferred rendering and may be the first caller
        // of update(): prev must start at (0, 0) so that prev != curr and the
        // first update allocates.
        self.prev_size = self.wanted_size(false);
        self.curr_size = self.wanted_size(true);

        self.complete = false;
        self.dead = false;
        self.bound = false;
    }

    /// Release all attachment textures
    ///
    /// The framebuffer object itself is kept so the buffer can be reloaded
    /// with `init(false)`.
    ///
    /// # Arguments
    ///
    /// * `is_destruction` - true when called from the owner's teardown
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` when killing an already dead buffer
    /// outside of destruction.
    pub fn kill(&mut self, is_destruction: bool) -> Result<()> {
        if self.dead {
            // a second kill is only legal as the final cleanup
            if is_destruction {
                return Ok(());
            }
            return Err(self.invalid_state("killed twice"));
        }

        if self.framebuffer.is_valid() {
            self.detach_textures(false);
        }

        self.dead = true;
        self.bound = false;
        gbuffer_debug!(SOURCE, "'{}' killed", self.config.name);
        Ok(())
    }

    /// Bring the attachments in line with the current viewport size
    ///
    /// # Arguments
    ///
    /// * `is_init` - true during the owner's initialization, when there is
    ///   nothing to detach yet
    ///
    /// # Returns
    ///
    /// true iff the framebuffer is complete with attachments of the current
    /// viewport size. false when the framebuffer handle is invalid, the buffer
    /// is dead, or the completeness check fails.
    pub fn update(&mut self, is_init: bool) -> bool {
        self.curr_size = self.wanted_size(true);

        // the framebuffer must be valid from construction on; nothing to recover here
        if !self.framebuffer.is_valid() {
            return false;
        }
        if self.dead {
            gbuffer_warn!(SOURCE, "'{}' updated while dead", self.config.name);
            return false;
        }

        if self.has_attachments() {
            if self.prev_size == self.curr_size {
                if !self.complete {
                    self.complete = self.recheck_status();
                }
                return self.complete;
            }

            self.detach_textures(is_init);
        }

        self.create(self.curr_size)
    }

    /// Allocate and attach all textures at `size`
    ///
    /// Texture storage is allocated before the framebuffer is bound; some
    /// drivers report an incomplete framebuffer otherwise.
    ///
    /// # Returns
    ///
    /// The completeness verdict. On an incomplete framebuffer the textures are
    /// kept; `update()` re-checks them instead of reallocating.
    pub fn create(&mut self, size: IVec2) -> bool {
        if size.x <= 0 || size.y <= 0 {
            gbuffer_warn!(SOURCE, "'{}' cannot allocate {}x{} attachments",
                self.config.name, size.x, size.y);
            return false;
        }

        // left over when an init-time update skipped detaching
        if self.has_attachments() {
            self.device.delete_textures(self.table.texture_ids());
            self.table.clear();
        }
        self.complete = false;

        for slot in AttachmentSlot::ALL {
            let texture = match self.device.gen_texture() {
                Ok(texture) => texture,
                Err(err) => {
                    gbuffer_error!(SOURCE, "'{}' failed to create {:?} texture: {}",
                        self.config.name, slot, err);
                    self.release_partial();
                    return false;
                }
            };

            self.device.bind_texture(TEXTURE_TARGET, texture);
            self.device.tex_parameter(TEXTURE_TARGET, TextureParameter::WrapS(TextureWrap::ClampToBorder));
            self.device.tex_parameter(TEXTURE_TARGET, TextureParameter::WrapT(TextureWrap::ClampToBorder));
            self.device.tex_parameter(TEXTURE_TARGET, TextureParameter::MinFilter(TextureFilter::Linear));
            self.device.tex_parameter(TEXTURE_TARGET, TextureParameter::MagFilter(TextureFilter::Linear));

            if slot.is_depth() && self.config.legacy_depth_texture_mode {
                self.device.tex_parameter(
                    TEXTURE_TARGET,
                    TextureParameter::DepthTextureMode(DepthTextureMode::Luminance),
                );
            }

            self.device.tex_storage_2d(TEXTURE_TARGET, &TextureStorageDesc {
                width: size.x,
                height: size.y,
                internal_format: slot.internal_format(),
                format: slot.pixel_format(),
                pixel_type: slot.pixel_type(),
            });

            self.table.set(slot, texture, slot.attachment());
        }

        self.framebuffer.bind();
        for slot in AttachmentSlot::ALL.iter().rev() {
            self.framebuffer.attach_texture(self.table.texture_id(*slot), TEXTURE_TARGET, slot.attachment());
        }
        self.device.bind_texture(TEXTURE_TARGET, TextureId::NONE);

        // depth is implicit and does not count as a draw buffer
        self.device.draw_buffers(&self.table.color_attachments());

        debug_assert!(self.framebuffer.is_valid());
        let complete = self.framebuffer.check_status(&self.config.name);
        self.framebuffer.unbind();

        self.prev_size = size;
        self.complete = complete;

        if complete {
            gbuffer_debug!(SOURCE, "'{}' allocated {} attachments at {}x{}",
                self.config.name, ATTACHMENT_COUNT, size.x, size.y);
        }
        complete
    }

    /// Detach and delete all attachment textures
    ///
    /// Does nothing when `is_init` is true: nothing has been attached yet.
    /// The framebuffer object is preserved.
    pub fn detach_textures(&mut self, is_init: bool) {
        if is_init {
            return;
        }

        self.framebuffer.bind();

        // only detach points that were actually attached; some drivers crash otherwise
        for slot in AttachmentSlot::COLOR {
            self.framebuffer.detach(slot.attachment());
        }
        self.framebuffer.detach(Attachment::Depth);
        self.framebuffer.unbind();

        self.device.delete_textures(self.table.texture_ids());

        self.table.clear();
        self.complete = false;
    }

    fn release_partial(&mut self) {
        let created: Vec<TextureId> = self
            .table
            .texture_ids()
            .iter()
            .copied()
            .filter(TextureId::is_some)
            .collect();

        self.device.bind_texture(TEXTURE_TARGET, TextureId::NONE);
        if !created.is_empty() {
            self.device.delete_textures(&created);
        }
        self.table.clear();
    }

    fn recheck_status(&mut self) -> bool {
        self.framebuffer.bind();
        let complete = self.framebuffer.check_status(&self.config.name);
        self.framebuffer.unbind();
        complete
    }

    fn invalid_state(&self, what: &str) -> Error {
        gbuffer_error!(SOURCE, "'{}': {}", self.config.name, what);
        Error::InvalidState(format!("{}: {}", self.config.name, what))
    }

    // ===== DRAWING SURFACE =====

    /// Clear all attachments to transparent black and far depth
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` if the buffer is not bound.
    pub fn clear(&self) -> Result<()> {
        if !self.bound {
            return Err(self.invalid_state("clear() while not bound"));
        }

        self.device.clear_color(Vec4::ZERO);
        self.device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
        Ok(())
    }

    /// Set the depth-clear value and compare function for the geometry pass
    ///
    /// The depth range itself is left untouched; the clear value is the
    /// larger of the two planes.
    pub fn set_depth_range(&self, near_depth: f32, far_depth: f32) {
        self.device.clear_depth(near_depth.max(far_depth));
        self.device.depth_func(CompareFunc::LessOrEqual);
    }

    /// Blit one attachment to the screen for inspection
    ///
    /// Position and texture coordinate share the same rectangle and both
    /// matrices are identity, so `(-1,-1)..(1,1)` covers the viewport.
    ///
    /// # Arguments
    ///
    /// * `buffer` - 2D textured render buffer used to draw the quad
    /// * `texture` - Texture to show (usually one of `texture_ids()`)
    /// * `min_uv` - Lower-left corner
    /// * `max_uv` - Upper-right corner
    pub fn draw_debug(&self, buffer: &mut dyn RenderBuffer2DT, texture: TextureId, min_uv: Vec2, max_uv: Vec2) {
        self.device.active_texture(0);
        self.device.bind_texture(TEXTURE_TARGET, texture);

        {
            let shader = buffer.shader();
            shader.enable();
            shader.set_uniform_matrix4("u_movi_mat", &Mat4::IDENTITY);
            shader.set_uniform_matrix4("u_proj_mat", &Mat4::IDENTITY);
        }

        buffer.safe_append(Vertex2DT::new(min_uv.x, min_uv.y, min_uv.x, min_uv.y));
        buffer.safe_append(Vertex2DT::new(max_uv.x, min_uv.y, max_uv.x, min_uv.y));
        buffer.safe_append(Vertex2DT::new(max_uv.x, max_uv.y, max_uv.x, max_uv.y));
        buffer.safe_append(Vertex2DT::new(min_uv.x, max_uv.y, min_uv.x, max_uv.y));

        buffer.submit(PrimitiveKind::Quads);
        buffer.shader().disable();

        self.device.bind_texture(TEXTURE_TARGET, TextureId::NONE);
    }

    /// Bind the framebuffer as draw target and mark the buffer bound
    pub fn bind(&mut self) {
        self.framebuffer.bind();
        self.bound = true;
    }

    /// Restore the default framebuffer and mark the buffer unbound
    pub fn unbind(&mut self) {
        self.framebuffer.unbind();
        self.bound = false;
    }

    // ===== ACCESSORS =====

    pub fn has_attachments(&self) -> bool {
        self.table.has_attachments()
    }

    /// Viewport size if `allowed`, (0, 0) otherwise
    pub fn wanted_size(&self, allowed: bool) -> IVec2 {
        if allowed {
            return self.viewport.view_size();
        }
        IVec2::ZERO
    }

    pub fn texture_id(&self, slot: AttachmentSlot) -> TextureId {
        self.table.texture_id(slot)
    }

    pub fn texture_ids(&self) -> &[TextureId; ATTACHMENT_COUNT] {
        self.table.texture_ids()
    }

    pub fn attachment_table(&self) -> &AttachmentTable {
        &self.table
    }

    pub fn texture_target(&self) -> TextureTarget {
        TEXTURE_TARGET
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Record whether the caller has bound this buffer for drawing
    pub fn set_bound(&mut self, bound: bool) {
        self.bound = bound;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Result of the last completeness check on the current attachments
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &GeometryBufferConfig {
        &self.config
    }

    pub fn prev_size(&self) -> IVec2 {
        self.prev_size
    }

    pub fn curr_size(&self) -> IVec2 {
        self.curr_size
    }

    pub fn state(&self) -> LifecycleState {
        if self.dead {
            LifecycleState::Dead
        } else if self.has_attachments() {
            LifecycleState::Attached(self.prev_size)
        } else {
            LifecycleState::Empty
        }
    }

    pub fn framebuffer(&self) -> &dyn Framebuffer {
        self.framebuffer.as_ref()
    }

    pub fn framebuffer_mut(&mut self) -> &mut dyn Framebuffer {
        self.framebuffer.as_mut()
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        // a dead buffer already released its textures
        let _ = self.kill(true);
    }
}

#[cfg(test)]
#[path = "geometry_buffer_tests.rs"]
mod tests;
