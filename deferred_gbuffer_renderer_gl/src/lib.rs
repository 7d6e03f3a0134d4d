/*!
# Deferred G-Buffer - OpenGL Backend

OpenGL implementation of the deferred_gbuffer device traits.

This crate implements `GraphicsDevice`, `Framebuffer`, `ShaderProgram` and
`RenderBuffer2DT` on top of a shared `glow::Context`. A GL context is bound
to one thread, so every object here holds an `Rc` to it and is `!Send`.
*/

mod gl_device;
mod gl_framebuffer;
mod gl_render_buffer;

use std::rc::Rc;

use deferred_gbuffer::deferred::{GeometryBuffer, GeometryBufferConfig, Result, ViewportProvider};

pub use gl_device::GlGraphicsDevice;
pub use gl_framebuffer::GlFramebuffer;
pub use gl_render_buffer::{
    GlRenderBuffer2DT, GlShaderProgram, DEBUG_2DT_FRAGMENT_SHADER, DEBUG_2DT_VERTEX_SHADER,
};

/// Create a geometry buffer backed by a new GL framebuffer object
///
/// # Example
///
/// ```no_run
/// use std::rc::Rc;
/// use deferred_gbuffer::deferred::{GeometryBufferConfig, SharedViewport};
///
/// # fn run(gl: Rc<glow::Context>) -> deferred_gbuffer::deferred::Result<()> {
/// let viewport = Rc::new(SharedViewport::new(1280, 720));
/// let mut gbuffer = deferred_gbuffer_renderer_gl::create_geometry_buffer(
///     gl,
///     GeometryBufferConfig::default(),
///     viewport,
/// )?;
/// gbuffer.update(true);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns `Error::BackendError` if the framebuffer object cannot be created.
pub fn create_geometry_buffer(
    gl: Rc<glow::Context>,
    config: GeometryBufferConfig,
    viewport: Rc<dyn ViewportProvider>,
) -> Result<GeometryBuffer> {
    let framebuffer = GlFramebuffer::new(gl.clone())?;
    let device = Rc::new(GlGraphicsDevice::new(gl));
    Ok(GeometryBuffer::new(config, device, Box::new(framebuffer), viewport))
}

/// Create the 2DT render buffer used by `GeometryBuffer::draw_debug()`
///
/// # Errors
///
/// Returns `Error::InitializationFailed` if the debug program does not build.
pub fn create_debug_render_buffer(gl: Rc<glow::Context>) -> Result<GlRenderBuffer2DT> {
    let shader = GlShaderProgram::debug_2dt(gl.clone())?;
    GlRenderBuffer2DT::new(gl, shader)
}
