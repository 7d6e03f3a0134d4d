/// Immediate-mode 2D textured render buffer used by debug overlays

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Vertex with a 2D position and a 2D texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex2DT {
    pub x: f32,
    pub y: f32,
    pub s: f32,
    pub t: f32,
}

impl Vertex2DT {
    pub fn new(x: f32, y: f32, s: f32, t: f32) -> Self {
        Self { x, y, s, t }
    }
}

/// Primitive assembly mode for `RenderBuffer2DT::submit()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Triangles,
    TriangleStrip,
    TriangleFan,
    /// Independent quads, four vertices each
    Quads,
}

impl PrimitiveKind {
    /// Number of vertices one primitive consumes (0 for strips and fans)
    pub fn vertices_per_primitive(&self) -> usize {
        match self {
            PrimitiveKind::Triangles => 3,
            PrimitiveKind::Quads => 4,
            PrimitiveKind::TriangleStrip | PrimitiveKind::TriangleFan => 0,
        }
    }
}

/// Shader program trait
pub trait ShaderProgram {
    /// Make this program current
    fn enable(&mut self);

    /// Restore the previous (null) program
    fn disable(&mut self);

    /// Upload a 4x4 matrix uniform by name (program must be enabled)
    fn set_uniform_matrix4(&mut self, name: &str, value: &Mat4);
}

/// 2D textured render buffer trait
///
/// Collects vertices on the CPU and draws them in one call on `submit()`.
pub trait RenderBuffer2DT {
    /// The program used to draw this buffer's vertices
    fn shader(&mut self) -> &mut dyn ShaderProgram;

    /// Append a vertex, growing the buffer if needed
    fn safe_append(&mut self, vertex: Vertex2DT);

    /// Draw all appended vertices and reset the buffer
    fn submit(&mut self, primitive: PrimitiveKind);
}
