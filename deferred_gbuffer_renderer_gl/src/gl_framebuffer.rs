/// OpenGL implementation of Framebuffer

use std::rc::Rc;

use deferred_gbuffer::deferred::device::{Attachment, Framebuffer, FramebufferStatus, TextureId, TextureTarget};
use deferred_gbuffer::deferred::Result;
use deferred_gbuffer::{gbuffer_debug, gbuffer_err};
use glow::HasContext;

use crate::gl_device::{attachment_to_gl, framebuffer_status_from_gl, texture_target_to_gl, texture_to_gl};

const SOURCE: &str = "deferred::gl::Framebuffer";

/// OpenGL framebuffer object
///
/// The FBO is deleted when the handle is dropped. Attached textures belong to
/// whoever created them and are left alone.
pub struct GlFramebuffer {
    gl: Rc<glow::Context>,
    fbo: Option<glow::Framebuffer>,
}

impl GlFramebuffer {
    /// Create a new framebuffer object with no attachments
    ///
    /// # Errors
    ///
    /// Returns `Error::BackendError` if glGenFramebuffers fails.
    pub fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let fbo = unsafe { gl.create_framebuffer() }
            .map_err(|e| gbuffer_err!(SOURCE, "glGenFramebuffers failed: {}", e))?;
        gbuffer_debug!(SOURCE, "created framebuffer {:?}", fbo);
        Ok(Self { gl, fbo: Some(fbo) })
    }

    pub fn raw(&self) -> Option<glow::Framebuffer> {
        self.fbo
    }
}

impl Framebuffer for GlFramebuffer {
    fn bind(&mut self) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, self.fbo) }
    }

    fn unbind(&mut self) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, None) }
    }

    fn attach_texture(&mut self, texture: TextureId, target: TextureTarget, attachment: Attachment) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                attachment_to_gl(attachment),
                texture_target_to_gl(target),
                texture_to_gl(texture),
                0,
            );
        }
    }

    fn detach(&mut self, attachment: Attachment) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                attachment_to_gl(attachment),
                glow::TEXTURE_2D,
                None,
                0,
            );
        }
    }

    fn is_valid(&self) -> bool {
        self.fbo.is_some()
    }

    fn status(&self) -> FramebufferStatus {
        if self.fbo.is_none() {
            return FramebufferStatus::Invalid;
        }
        let status = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        framebuffer_status_from_gl(status)
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        if let Some(fbo) = self.fbo.take() {
            unsafe { self.gl.delete_framebuffer(fbo) }
        }
    }
}
