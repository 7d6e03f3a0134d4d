/// GraphicsDevice trait - the texture and state subset of the graphics API
/// that the geometry buffer drives directly

use bitflags::bitflags;
use glam::Vec4;

use crate::error::Result;
use crate::device::{
    Attachment, TextureId, TextureTarget, TextureParameter, TextureStorageDesc,
};

bitflags! {
    /// Buffers affected by `GraphicsDevice::clear()`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Depth-state abstraction
///
/// Kept separate from `GraphicsDevice` so that state trackers which cache
/// the current compare function can sit in front of the raw API.
pub trait DepthState {
    /// Set the depth compare function
    fn depth_func(&self, func: CompareFunc);
}

/// Graphics device trait
///
/// Implemented by backend devices (e.g., GlGraphicsDevice). All calls must be
/// issued from the thread that owns the graphics context, which is why the
/// trait does not require `Send + Sync`.
pub trait GraphicsDevice: DepthState {
    /// Generate a new texture name
    ///
    /// # Returns
    ///
    /// A non-zero texture identifier
    fn gen_texture(&self) -> Result<TextureId>;

    /// Bind a texture to a target (`TextureId::NONE` unbinds)
    fn bind_texture(&self, target: TextureTarget, texture: TextureId);

    /// Set a parameter on the texture currently bound to `target`
    fn tex_parameter(&self, target: TextureTarget, param: TextureParameter);

    /// Allocate storage for the texture currently bound to `target`
    ///
    /// No pixel data is uploaded.
    fn tex_storage_2d(&self, target: TextureTarget, desc: &TextureStorageDesc);

    /// Delete a batch of textures
    fn delete_textures(&self, textures: &[TextureId]);

    /// Declare the color attachments the fragment stage writes to
    fn draw_buffers(&self, attachments: &[Attachment]);

    /// Select the active texture unit
    fn active_texture(&self, unit: u32);

    /// Set the color used by color clears
    fn clear_color(&self, color: Vec4);

    /// Clear the buffers selected by `flags` on the bound framebuffer
    fn clear(&self, flags: ClearFlags);

    /// Set the value used by depth clears
    fn clear_depth(&self, depth: f32);
}
