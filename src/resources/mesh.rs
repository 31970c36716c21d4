/// Handle to a vertex buffer uploaded by the mesh provider.
///
/// The core never looks inside the buffer. It only binds the handle and
/// issues an indexed draw of `index_count` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    /// Backend identifier of the vertex buffer (VAO, buffer id, ...)
    pub vertex_buffer: u32,
    /// Number of indices to draw
    pub index_count: u32,
}

impl MeshHandle {
    #[must_use]
    pub const fn new(vertex_buffer: u32, index_count: u32) -> Self {
        Self {
            vertex_buffer,
            index_count,
        }
    }
}
