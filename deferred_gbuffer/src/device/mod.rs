/// Device module - the graphics-API surface consumed by the geometry buffer

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod framebuffer;
pub mod render_buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use framebuffer::*;
pub use render_buffer::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
