use super::error::BootstrapError;
use super::glutils::*;
use super::math::{Vertex, VertexLayout};
use gl::*;

/// Static indexed triangle mesh living in a VAO with its VBO and EBO.
pub struct Mesh {
    vao: u32,
    vbo: u32,
    ebo: u32,
    index_count: i32,
}

impl Mesh {
    pub fn upload(vertices: &[Vertex], indices: &[u32]) -> Result<Mesh, BootstrapError> {
        Self::upload_with_layout(vertices, indices, &Vertex::layout())
    }

    pub fn upload_with_layout(
        vertices: &[Vertex],
        indices: &[u32],
        layout: &VertexLayout,
    ) -> Result<Mesh, BootstrapError> {
        debug_assert!(layout.is_consistent());
        debug_assert_eq!(layout.stride, std::mem::size_of::<Vertex>());

        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);
        }

        // the VAO records the EBO binding and the attribute pointers below
        unsafe { gl::BindVertexArray(vao) };

        unsafe { gl::BindBuffer(ARRAY_BUFFER, vbo) };
        gl_buffer_data_static(ARRAY_BUFFER, vertices);

        unsafe { gl::BindBuffer(ELEMENT_ARRAY_BUFFER, ebo) };
        gl_buffer_data_static(ELEMENT_ARRAY_BUFFER, indices);

        gl_vertex_layout_enab(layout);

        unsafe { gl::BindBuffer(ARRAY_BUFFER, 0) };

        // owned from here on, so a failed check still releases the names
        let mesh = Mesh {
            vao,
            vbo,
            ebo,
            index_count: indices.len() as i32,
        };
        check_gl_err("mesh upload")?;

        log::debug!(
            "mesh uploaded: vao={vao} vbo={vbo} ebo={ebo}, {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(mesh)
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.vao) };
    }

    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Draws the bound mesh as a triangle list.
    pub fn draw(&self) {
        unsafe {
            gl::DrawElements(TRIANGLES, self.index_count, UNSIGNED_INT, std::ptr::null())
        };
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}
