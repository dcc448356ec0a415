use super::error::BootstrapError;
use super::math::{VertexAttribute, VertexLayout};
use gl::{types::*, *};
use std::ffi::CStr;

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Turns drained error codes into a [`BootstrapError::Gl`] for `step`.
pub fn gl_errors_to_result(step: &str, codes: &[GLenum]) -> Result<(), BootstrapError> {
    if codes.is_empty() {
        return Ok(());
    }
    let errors = codes
        .iter()
        .map(|&c| format!("{} (0x{c:04X})", gl_error_name(c)))
        .collect::<Vec<_>>()
        .join(", ");
    Err(BootstrapError::Gl {
        step: step.to_string(),
        errors,
    })
}

/// Drains the GL error queue, failing `step` if anything was pending.
pub fn check_gl_err(step: &str) -> Result<(), BootstrapError> {
    let mut codes = Vec::new();
    loop {
        let err = unsafe { gl::GetError() };
        // a lost context keeps reporting the same error
        if err == NO_ERROR || codes.len() >= 8 {
            break;
        }
        codes.push(err);
    }
    gl_errors_to_result(step, &codes)
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::debug!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl_string(SHADING_LANGUAGE_VERSION)
    );
}

/// Whether the current context was created with the debug flag.
pub fn context_has_debug_flag() -> bool {
    let mut flags: GLint = 0;
    unsafe { gl::GetIntegerv(CONTEXT_FLAGS, &mut flags) };
    flags & CONTEXT_FLAG_DEBUG_BIT as GLint != 0
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) };
}

pub fn set_polygon_mode(wireframe: bool) {
    let mode = if wireframe { LINE } else { FILL };
    unsafe { gl::PolygonMode(FRONT_AND_BACK, mode) };
}

/// Uploads `buffer` into whatever is bound at `target` with STATIC_DRAW.
pub fn gl_buffer_data_static<T: Sized>(target: GLenum, buffer: &[T]) {
    let size = std::mem::size_of_val(buffer) as GLsizeiptr;
    unsafe { gl::BufferData(target, size, buffer.as_ptr().cast(), STATIC_DRAW) };
}

/// Points a float attribute into the bound ARRAY_BUFFER and enables it.
/// `stride` and `attr.offset` are in bytes.
pub fn gl_vertex_attrib_ptr_enab(attr: &VertexAttribute, stride: usize) {
    unsafe {
        gl::VertexAttribPointer(
            attr.index,
            attr.components as i32,
            FLOAT,
            FALSE,
            stride as i32,
            attr.offset as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(attr.index) };
}

pub fn gl_vertex_layout_enab(layout: &VertexLayout) {
    for attr in &layout.attributes {
        gl_vertex_attrib_ptr_enab(attr, layout.stride);
    }
}
