//! Geometry buffer module
//!
//! Provides the deferred-shading G-buffer: a framebuffer with four color
//! attachments and one depth attachment, kept sized to the viewport.

mod attachment;
mod geometry_buffer;

pub use attachment::{AttachmentSlot, AttachmentTable, ATTACHMENT_COUNT};
pub use geometry_buffer::{GeometryBuffer, GeometryBufferConfig, LifecycleState};
