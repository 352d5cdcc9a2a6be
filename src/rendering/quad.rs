use std::sync::Arc;

use glow::HasContext as _;

use crate::error::Error;

/// A static vertex buffer plus the vertex array describing its layout.
///
/// Vertices are packed as three floats each: x and y feed the `position`
/// attribute, and the third float doubles as the per-vertex `alpha`
/// attribute. Both GL objects are deleted when this struct is dropped.
pub struct QuadBuffer {
    vertex_buffer: glow::Buffer,
    vertex_array: glow::VertexArray,
    vertex_count: i32,
    gl: Arc<glow::Context>,
}

const FLOATS_PER_VERTEX: usize = 3;
const STRIDE: i32 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;

impl QuadBuffer {
    /// Uploads `vertices` as one STATIC_DRAW buffer and records the two
    /// attribute pointers in a fresh vertex array.
    pub fn new(
        gl: Arc<glow::Context>,
        vertices: &[f32],
        position_location: u32,
        alpha_location: u32,
    ) -> Result<Self, Error> {
        unsafe {
            let raw: &[u8] = bytemuck::cast_slice(vertices);
            let vertex_buffer = gl.create_buffer().map_err(Error::Resource)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, raw, glow::STATIC_DRAW);
            let vertex_array = match gl.create_vertex_array() {
                Ok(val) => val,
                Err(val) => {
                    // Delete the vertex buffer before erroring
                    gl.delete_buffer(vertex_buffer);
                    return Err(Error::Resource(val));
                }
            };
            gl.bind_vertex_array(Some(vertex_array));
            gl.enable_vertex_attrib_array(position_location);
            gl.vertex_attrib_pointer_f32(position_location, 2, glow::FLOAT, false, STRIDE, 0);
            gl.enable_vertex_attrib_array(alpha_location);
            gl.vertex_attrib_pointer_f32(alpha_location, 1, glow::FLOAT, false, STRIDE, 8);

            return Ok(Self {
                vertex_buffer,
                vertex_array,
                vertex_count: (vertices.len() / FLOATS_PER_VERTEX) as i32,
                gl,
            });
        }
    }

    /// Binds the vertex array and draws its contents as a triangle list.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vertex_array));
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }
}

impl Drop for QuadBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
            self.gl.delete_buffer(self.vertex_buffer);
        }
    }
}
