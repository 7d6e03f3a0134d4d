/// OpenGL implementations of ShaderProgram and RenderBuffer2DT
///
/// `GlRenderBuffer2DT` streams its vertices into one VBO per submit. Quads are
/// not available in core profiles and are drawn as one triangle fan each.

use std::rc::Rc;

use deferred_gbuffer::deferred::device::{PrimitiveKind, RenderBuffer2DT, ShaderProgram, Vertex2DT};
use deferred_gbuffer::deferred::{Error, Result};
use glam::Mat4;
use deferred_gbuffer::{gbuffer_err, gbuffer_warn};
use glow::HasContext;
use rustc_hash::FxHashMap;

use crate::gl_device::primitive_to_gl;

const SOURCE: &str = "deferred::gl::RenderBuffer";

/// Attribute locations shared by the 2DT shaders
const POSITION_LOCATION: u32 = 0;
const TEXCOORD_LOCATION: u32 = 1;

/// Default 2DT vertex shader (positions and texcoords pass through the two matrices)
pub const DEBUG_2DT_VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec2 a_pos;
layout(location = 1) in vec2 a_tex;
uniform mat4 u_movi_mat;
uniform mat4 u_proj_mat;
out vec2 v_tex;
void main() {
    v_tex = a_tex;
    gl_Position = u_proj_mat * u_movi_mat * vec4(a_pos, 0.0, 1.0);
}
"#;

/// Default 2DT fragment shader (samples texture unit 0)
pub const DEBUG_2DT_FRAGMENT_SHADER: &str = r#"#version 330 core
uniform sampler2D u_tex0;
in vec2 v_tex;
out vec4 f_color;
void main() {
    f_color = texture(u_tex0, v_tex);
}
"#;

// ============================================================================
// GlShaderProgram
// ============================================================================

/// Linked GL program with a uniform location cache
pub struct GlShaderProgram {
    gl: Rc<glow::Context>,
    program: glow::Program,
    uniforms: FxHashMap<String, Option<glow::UniformLocation>>,
}

impl GlShaderProgram {
    /// Compile and link a program from vertex and fragment sources
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` with the driver log when a stage
    /// fails to compile or the program fails to link.
    pub fn new(gl: Rc<glow::Context>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        unsafe {
            let program = gl
                .create_program()
                .map_err(|e| gbuffer_err!(SOURCE, "glCreateProgram failed: {}", e))?;

            let stages = [(glow::VERTEX_SHADER, vertex_src), (glow::FRAGMENT_SHADER, fragment_src)];
            let mut shaders = Vec::with_capacity(stages.len());
            for (stage, src) in stages {
                let shader = match gl.create_shader(stage) {
                    Ok(shader) => shader,
                    Err(e) => {
                        for shader in shaders {
                            gl.delete_shader(shader);
                        }
                        gl.delete_program(program);
                        return Err(gbuffer_err!(SOURCE, "glCreateShader failed: {}", e));
                    }
                };
                gl.shader_source(shader, src);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    for shader in shaders {
                        gl.delete_shader(shader);
                    }
                    gl.delete_program(program);
                    gbuffer_warn!(SOURCE, "shader compilation failed: {}", log);
                    return Err(Error::InitializationFailed(format!("shader compilation failed: {}", log)));
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }

            gl.bind_attrib_location(program, POSITION_LOCATION, "a_pos");
            gl.bind_attrib_location(program, TEXCOORD_LOCATION, "a_tex");
            gl.link_program(program);

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                gbuffer_warn!(SOURCE, "program link failed: {}", log);
                return Err(Error::InitializationFailed(format!("program link failed: {}", log)));
            }

            Ok(Self {
                gl,
                program,
                uniforms: FxHashMap::default(),
            })
        }
    }

    /// Program for the debug blit (two identity-friendly matrices, one sampler)
    pub fn debug_2dt(gl: Rc<glow::Context>) -> Result<Self> {
        Self::new(gl, DEBUG_2DT_VERTEX_SHADER, DEBUG_2DT_FRAGMENT_SHADER)
    }

    fn uniform_location(&mut self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(location) = self.uniforms.get(name) {
            return location.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            gbuffer_warn!(SOURCE, "uniform '{}' not found", name);
        }
        self.uniforms.insert(name.to_string(), location.clone());
        location
    }
}

impl ShaderProgram for GlShaderProgram {
    fn enable(&mut self) {
        unsafe { self.gl.use_program(Some(self.program)) }
    }

    fn disable(&mut self) {
        unsafe { self.gl.use_program(None) }
    }

    fn set_uniform_matrix4(&mut self, name: &str, value: &Mat4) {
        let location = self.uniform_location(name);
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location.as_ref(), false, &value.to_cols_array());
        }
    }
}

impl Drop for GlShaderProgram {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) }
    }
}

// ============================================================================
// GlRenderBuffer2DT
// ============================================================================

/// Immediate-mode render buffer for `Vertex2DT`
pub struct GlRenderBuffer2DT {
    gl: Rc<glow::Context>,
    shader: GlShaderProgram,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertices: Vec<Vertex2DT>,
}

impl GlRenderBuffer2DT {
    /// Create the vertex array and stream buffer for `shader`
    ///
    /// # Errors
    ///
    /// Returns `Error::BackendError` if the vertex array or buffer cannot be created.
    pub fn new(gl: Rc<glow::Context>, shader: GlShaderProgram) -> Result<Self> {
        let stride = std::mem::size_of::<Vertex2DT>() as i32;

        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| gbuffer_err!(SOURCE, "glGenVertexArrays failed: {}", e))?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(gbuffer_err!(SOURCE, "glGenBuffers failed: {}", e));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.enable_vertex_attrib_array(POSITION_LOCATION);
            gl.vertex_attrib_pointer_f32(POSITION_LOCATION, 2, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(TEXCOORD_LOCATION);
            gl.vertex_attrib_pointer_f32(TEXCOORD_LOCATION, 2, glow::FLOAT, false, stride, 8);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl,
                shader,
                vao,
                vbo,
                vertices: Vec::new(),
            })
        }
    }

    /// Number of vertices appended since the last submit
    pub fn pending(&self) -> usize {
        self.vertices.len()
    }
}

impl RenderBuffer2DT for GlRenderBuffer2DT {
    fn shader(&mut self) -> &mut dyn ShaderProgram {
        &mut self.shader
    }

    fn safe_append(&mut self, vertex: Vertex2DT) {
        self.vertices.push(vertex);
    }

    fn submit(&mut self, primitive: PrimitiveKind) {
        if self.vertices.is_empty() {
            return;
        }

        let count = self.vertices.len() as i32;

        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&self.vertices),
                glow::STREAM_DRAW,
            );

            match primitive_to_gl(primitive) {
                Some(mode) => self.gl.draw_arrays(mode, 0, count),
                None => {
                    let per_quad = PrimitiveKind::Quads.vertices_per_primitive() as i32;
                    for first in (0..count - count % per_quad).step_by(per_quad as usize) {
                        self.gl.draw_arrays(glow::TRIANGLE_FAN, first, per_quad);
                    }
                }
            }

            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_vertex_array(None);
        }

        self.vertices.clear();
    }
}

impl Drop for GlRenderBuffer2DT {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
