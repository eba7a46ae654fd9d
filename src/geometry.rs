/*!
Indexed triangle meshes living on the GPU.

A `Geometry` bundles the three objects one mesh needs: a vertex buffer with tightly packed
`vec3` positions, an index buffer of `u32` triangle corners, and the vertex array object tying
both to attribute slot 0. They are created together, drawn together and released together.
*/
use std::error::Error;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::backend::BufferType;
use crate::context::Context;
use crate::gl;

/// Number of floats per vertex.
pub const COMPONENTS: usize = 3;

/// Attribute slot the positions are bound to.
pub const POSITION_ATTRIBUTE: gl::types::GLuint = 0;

/// Error that can happen when uploading a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The number of floats is not a multiple of 3.
    MalformedVertices {
        /// Number of floats that were provided.
        len: usize,
    },
    /// The number of indices is not a multiple of 3.
    MalformedIndices {
        /// Number of indices that were provided.
        len: usize,
    },
    /// An index refers to a vertex that doesn't exist.
    IndexOutOfRange {
        /// The faulty index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GeometryError::MalformedVertices { len } =>
                write!(fmt, "{} floats don't make whole 3D points", len),
            GeometryError::MalformedIndices { len } =>
                write!(fmt, "{} indices don't make whole triangles", len),
            GeometryError::IndexOutOfRange { index, vertex_count } =>
                write!(fmt, "index {} is out of range for {} vertices", index, vertex_count),
        }
    }
}

impl Error for GeometryError {}

/// A vertex buffer, an index buffer and the vertex array object binding them.
pub struct Geometry {
    context: Rc<Context>,
    vertex_array: gl::types::GLuint,
    vertex_buffer: gl::types::GLuint,
    index_buffer: gl::types::GLuint,
    vertex_count: usize,
    index_count: usize,
}

impl Geometry {
    /// Uploads a mesh made of `positions.len() / 3` points and `indices.len() / 3` triangles.
    pub fn new(context: &Rc<Context>, positions: &[f32], indices: &[u32])
               -> Result<Geometry, GeometryError>
    {
        if positions.len() % COMPONENTS != 0 {
            return Err(GeometryError::MalformedVertices { len: positions.len() });
        }
        if indices.len() % 3 != 0 {
            return Err(GeometryError::MalformedIndices { len: indices.len() });
        }

        let vertex_count = positions.len() / COMPONENTS;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange { index, vertex_count });
        }

        let ctxt = context.commands();

        let vertex_array = ctxt.gen_vertex_array();
        let vertex_buffer = ctxt.gen_buffer();
        let index_buffer = ctxt.gen_buffer();

        // the element buffer binding is recorded in the vertex array, so bind it first
        ctxt.bind_vertex_array(vertex_array);

        ctxt.bind_buffer(BufferType::ArrayBuffer, vertex_buffer);
        ctxt.bind_buffer(BufferType::ElementArrayBuffer, index_buffer);
        ctxt.buffer_data(BufferType::ArrayBuffer, bytemuck::cast_slice(positions));
        ctxt.buffer_data(BufferType::ElementArrayBuffer, bytemuck::cast_slice(indices));

        ctxt.vertex_attrib_pointer(POSITION_ATTRIBUTE, COMPONENTS as gl::types::GLint,
                                   (COMPONENTS * mem::size_of::<f32>()) as gl::types::GLsizei, 0);
        ctxt.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

        // the attribute pointer captured the vertex buffer, it can be unbound
        ctxt.bind_buffer(BufferType::ArrayBuffer, 0);
        ctxt.bind_vertex_array(0);

        log::debug!("uploaded {} vertices and {} triangles into vertex array {}",
                    vertex_count, indices.len() / 3, vertex_array);

        Ok(Geometry {
            context: context.clone(),
            vertex_array,
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count: indices.len(),
        })
    }

    /// Number of vertices in the vertex buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of entries in the index buffer.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Name of the vertex array object.
    #[inline]
    pub fn vertex_array_id(&self) -> gl::types::GLuint {
        self.vertex_array
    }

    /// Binds the vertex array and draws every triangle. The program must already be in use.
    pub fn draw(&self) {
        let ctxt = self.context.commands();
        ctxt.bind_vertex_array(self.vertex_array);
        ctxt.draw_elements(gl::TRIANGLES, self.index_count as gl::types::GLsizei,
                           gl::UNSIGNED_INT, 0);
        ctxt.bind_vertex_array(0);
    }

    /// Reads the positions back from the vertex buffer.
    pub fn read_vertices(&self) -> Vec<f32> {
        let mut out = vec![0.0f32; self.vertex_count * COMPONENTS];
        let ctxt = self.context.commands();
        ctxt.bind_buffer(BufferType::ArrayBuffer, self.vertex_buffer);
        ctxt.get_buffer_sub_data(BufferType::ArrayBuffer, bytemuck::cast_slice_mut(&mut out));
        ctxt.bind_buffer(BufferType::ArrayBuffer, 0);
        out
    }

    /// Reads the indices back from the index buffer.
    pub fn read_indices(&self) -> Vec<u32> {
        let mut out = vec![0u32; self.index_count];
        let ctxt = self.context.commands();
        ctxt.bind_vertex_array(self.vertex_array);
        ctxt.get_buffer_sub_data(BufferType::ElementArrayBuffer, bytemuck::cast_slice_mut(&mut out));
        ctxt.bind_vertex_array(0);
        out
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        let ctxt = self.context.commands();
        ctxt.delete_vertex_array(self.vertex_array);
        ctxt.delete_buffer(self.vertex_buffer);
        ctxt.delete_buffer(self.index_buffer);
    }
}
