/// OpenGL implementation of GraphicsDevice
///
/// Thin wrapper around a shared `glow::Context`. Every method maps the
/// backend-agnostic enums to GL constants and issues the matching GL call on
/// the current thread's context.

use std::num::NonZeroU32;
use std::rc::Rc;

use deferred_gbuffer::deferred::device::{
    Attachment, ClearFlags, CompareFunc, DepthState, DepthTextureMode, FramebufferStatus,
    GraphicsDevice, InternalFormat, PixelFormat, PixelType, PrimitiveKind, TextureFilter,
    TextureId, TextureParameter, TextureStorageDesc, TextureTarget, TextureWrap,
};
use deferred_gbuffer::deferred::Result;
use glam::Vec4;
use deferred_gbuffer::gbuffer_err;
use glow::HasContext;

const SOURCE: &str = "deferred::gl::GraphicsDevice";

// Compatibility-profile enums glow does not export
pub(crate) const DEPTH_TEXTURE_MODE: u32 = 0x884B;
pub(crate) const LUMINANCE: u32 = 0x1909;

/// OpenGL graphics device
pub struct GlGraphicsDevice {
    gl: Rc<glow::Context>,
}

impl GlGraphicsDevice {
    /// Wrap a GL context (must be current on the calling thread)
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}

impl DepthState for GlGraphicsDevice {
    fn depth_func(&self, func: CompareFunc) {
        unsafe { self.gl.depth_func(compare_func_to_gl(func)) }
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    fn gen_texture(&self) -> Result<TextureId> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| gbuffer_err!(SOURCE, "glGenTextures failed: {}", e))?;
        Ok(texture_from_gl(texture))
    }

    fn bind_texture(&self, target: TextureTarget, texture: TextureId) {
        unsafe { self.gl.bind_texture(texture_target_to_gl(target), texture_to_gl(texture)) }
    }

    fn tex_parameter(&self, target: TextureTarget, param: TextureParameter) {
        let (name, value) = texture_parameter_to_gl(param);
        unsafe { self.gl.tex_parameter_i32(texture_target_to_gl(target), name, value as i32) }
    }

    fn tex_storage_2d(&self, target: TextureTarget, desc: &TextureStorageDesc) {
        unsafe {
            self.gl.tex_image_2d(
                texture_target_to_gl(target),
                0,
                internal_format_to_gl(desc.internal_format) as i32,
                desc.width,
                desc.height,
                0,
                pixel_format_to_gl(desc.format),
                pixel_type_to_gl(desc.pixel_type),
                None,
            );
        }
    }

    fn delete_textures(&self, textures: &[TextureId]) {
        for texture in textures.iter().filter_map(|t| texture_to_gl(*t)) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }

    fn draw_buffers(&self, attachments: &[Attachment]) {
        let buffers: Vec<u32> = attachments.iter().map(|a| attachment_to_gl(*a)).collect();
        unsafe { self.gl.draw_buffers(&buffers) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn clear_color(&self, color: Vec4) {
        unsafe { self.gl.clear_color(color.x, color.y, color.z, color.w) }
    }

    fn clear(&self, flags: ClearFlags) {
        unsafe { self.gl.clear(clear_flags_to_gl(flags)) }
    }

    fn clear_depth(&self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) }
    }
}

// ===== HANDLE CONVERSION =====

pub(crate) fn texture_to_gl(texture: TextureId) -> Option<glow::Texture> {
    NonZeroU32::new(texture.0).map(glow::NativeTexture)
}

pub(crate) fn texture_from_gl(texture: glow::Texture) -> TextureId {
    TextureId(texture.0.get())
}

// ===== ENUM CONVERSION =====

pub(crate) fn texture_target_to_gl(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
    }
}

pub(crate) fn attachment_to_gl(attachment: Attachment) -> u32 {
    match attachment {
        Attachment::Color(index) => glow::COLOR_ATTACHMENT0 + index,
        Attachment::Depth => glow::DEPTH_ATTACHMENT,
    }
}

pub(crate) fn internal_format_to_gl(format: InternalFormat) -> u32 {
    match format {
        InternalFormat::Rgba8 => glow::RGBA8,
        InternalFormat::DepthComponent32F => glow::DEPTH_COMPONENT32F,
    }
}

pub(crate) fn pixel_format_to_gl(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Rgba => glow::RGBA,
        PixelFormat::DepthComponent => glow::DEPTH_COMPONENT,
    }
}

pub(crate) fn pixel_type_to_gl(pixel_type: PixelType) -> u32 {
    match pixel_type {
        PixelType::UnsignedByte => glow::UNSIGNED_BYTE,
        PixelType::Float => glow::FLOAT,
    }
}

pub(crate) fn wrap_to_gl(wrap: TextureWrap) -> u32 {
    match wrap {
        TextureWrap::ClampToBorder => glow::CLAMP_TO_BORDER,
    }
}

pub(crate) fn filter_to_gl(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Linear => glow::LINEAR,
    }
}

pub(crate) fn depth_texture_mode_to_gl(mode: DepthTextureMode) -> u32 {
    match mode {
        DepthTextureMode::Luminance => LUMINANCE,
    }
}

/// (parameter name, value) pair for glTexParameteri
pub(crate) fn texture_parameter_to_gl(param: TextureParameter) -> (u32, u32) {
    match param {
        TextureParameter::WrapS(wrap) => (glow::TEXTURE_WRAP_S, wrap_to_gl(wrap)),
        TextureParameter::WrapT(wrap) => (glow::TEXTURE_WRAP_T, wrap_to_gl(wrap)),
        TextureParameter::MinFilter(filter) => (glow::TEXTURE_MIN_FILTER, filter_to_gl(filter)),
        TextureParameter::MagFilter(filter) => (glow::TEXTURE_MAG_FILTER, filter_to_gl(filter)),
        TextureParameter::DepthTextureMode(mode) => (DEPTH_TEXTURE_MODE, depth_texture_mode_to_gl(mode)),
    }
}

pub(crate) fn compare_func_to_gl(func: CompareFunc) -> u32 {
    match func {
        CompareFunc::Never => glow::NEVER,
        CompareFunc::Less => glow::LESS,
        CompareFunc::Equal => glow::EQUAL,
        CompareFunc::LessOrEqual => glow::LEQUAL,
        CompareFunc::Greater => glow::GREATER,
        CompareFunc::NotEqual => glow::NOTEQUAL,
        CompareFunc::GreaterOrEqual => glow::GEQUAL,
        CompareFunc::Always => glow::ALWAYS,
    }
}

pub(crate) fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    mask
}

/// GL draw mode, or None for quads (drawn as one fan per quad)
pub(crate) fn primitive_to_gl(primitive: PrimitiveKind) -> Option<u32> {
    match primitive {
        PrimitiveKind::Triangles => Some(glow::TRIANGLES),
        PrimitiveKind::TriangleStrip => Some(glow::TRIANGLE_STRIP),
        PrimitiveKind::TriangleFan => Some(glow::TRIANGLE_FAN),
        PrimitiveKind::Quads => None,
    }
}

pub(crate) fn framebuffer_status_from_gl(status: u32) -> FramebufferStatus {
    match status {
        glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
        glow::FRAMEBUFFER_UNDEFINED => FramebufferStatus::Undefined,
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
        glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
        glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
        glow::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FramebufferStatus::IncompleteMultisample,
        glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => FramebufferStatus::IncompleteLayerTargets,
        other => FramebufferStatus::Unknown(other),
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
