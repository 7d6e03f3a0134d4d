/*!
# Deferred G-Buffer

Geometry buffer for deferred shading.

A geometry buffer is an off-screen framebuffer whose attachments store the
per-pixel surface attributes (normal, diffuse, specular, emission, depth) of the
geometry pass, to be consumed later by the lighting pass.

## Architecture

- **GeometryBuffer**: Attachment lifecycle (allocate, resize, kill, reload) and
  the drawing surface (bind, clear, depth range, debug blit)
- **GraphicsDevice**: Texture and fixed-state calls the buffer issues
- **Framebuffer**: Opaque framebuffer object handle
- **RenderBuffer2DT**: Immediate-mode textured quads used by the debug blit
- **ViewportProvider**: Source of the wanted attachment size

Backend crates (e.g., `deferred_gbuffer_renderer_gl`) implement the device
traits against a real graphics API.
*/

// Internal modules
mod error;
pub mod log;
pub mod device;
pub mod viewport;
pub mod geometry_buffer;

// Main deferred namespace module
pub mod deferred {
    // Error types
    pub use crate::error::{Error, Result};

    // Geometry buffer
    pub use crate::geometry_buffer::{
        AttachmentSlot, AttachmentTable, GeometryBuffer, GeometryBufferConfig, LifecycleState,
        ATTACHMENT_COUNT,
    };

    // Viewport
    pub use crate::viewport::{SharedViewport, ViewportProvider};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Device sub-module with all graphics-API types
    pub mod device {
        pub use crate::device::*;
    }
}

// Re-export math library at crate root
pub use glam;
