/// Framebuffer trait - opaque handle over a GPU framebuffer object
///
/// A framebuffer groups color and depth attachments into one drawable surface.
/// It is created once by the backend and keeps its identity across attachment
/// changes (e.g., window resize).

use std::fmt;

use crate::device::{TextureId, TextureTarget};

/// Attachment point within a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attachment {
    /// COLOR0 + index
    Color(u32),
    /// DEPTH
    Depth,
}

/// Completeness status of a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// Framebuffer is complete and drawable
    Complete,
    /// The handle was never created (or creation failed)
    Invalid,
    /// Default framebuffer does not exist
    Undefined,
    /// An attachment is not attachment-complete
    IncompleteAttachment,
    /// No image is attached
    MissingAttachment,
    /// A draw buffer names an attachment without an image
    IncompleteDrawBuffer,
    /// The read buffer names an attachment without an image
    IncompleteReadBuffer,
    /// Attachment format combination not supported by the implementation
    Unsupported,
    /// Attachments disagree on sample count
    IncompleteMultisample,
    /// Attachments disagree on layering
    IncompleteLayerTargets,
    /// Any status value the backend does not know
    Unknown(u32),
}

impl FramebufferStatus {
    /// Returns true when the framebuffer is drawable
    pub fn is_complete(&self) -> bool {
        matches!(self, FramebufferStatus::Complete)
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Complete => write!(f, "complete"),
            FramebufferStatus::Invalid => write!(f, "invalid framebuffer handle"),
            FramebufferStatus::Undefined => write!(f, "undefined"),
            FramebufferStatus::IncompleteAttachment => write!(f, "incomplete attachment"),
            FramebufferStatus::MissingAttachment => write!(f, "missing attachment"),
            FramebufferStatus::IncompleteDrawBuffer => write!(f, "incomplete draw buffer"),
            FramebufferStatus::IncompleteReadBuffer => write!(f, "incomplete read buffer"),
            FramebufferStatus::Unsupported => write!(f, "unsupported"),
            FramebufferStatus::IncompleteMultisample => write!(f, "incomplete multisample"),
            FramebufferStatus::IncompleteLayerTargets => write!(f, "incomplete layer targets"),
            FramebufferStatus::Unknown(code) => write!(f, "unknown status 0x{:04X}", code),
        }
    }
}

/// Framebuffer handle trait
///
/// Implemented by backend framebuffers (e.g., GlFramebuffer). The framebuffer
/// object is released when the handle is dropped; attached textures are not.
pub trait Framebuffer {
    /// Make this framebuffer the current draw target
    fn bind(&mut self);

    /// Restore the default framebuffer as draw target
    fn unbind(&mut self);

    /// Attach a texture to an attachment point (framebuffer must be bound)
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture to attach
    /// * `target` - Texture target the texture was created for
    /// * `attachment` - Attachment point (COLOR0 + n, DEPTH)
    fn attach_texture(&mut self, texture: TextureId, target: TextureTarget, attachment: Attachment);

    /// Detach whatever is attached at `attachment` (framebuffer must be bound)
    fn detach(&mut self, attachment: Attachment);

    /// Whether a framebuffer object exists
    fn is_valid(&self) -> bool;

    /// Query the completeness status (framebuffer must be bound)
    fn status(&self) -> FramebufferStatus;

    /// Check completeness, logging the reason under `name` when incomplete
    fn check_status(&mut self, name: &str) -> bool {
        let status = self.status();
        if !status.is_complete() {
            crate::gbuffer_warn!("deferred::Framebuffer", "FBO '{}' is not complete: {}", name, status);
            return false;
        }
        true
    }
}
