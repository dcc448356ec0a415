use super::error::BootstrapError;
use super::glutils::*;
use gl::types::*;
use gl::*;

/// Driver info logs are read into a buffer of this size, so at most 511
/// characters plus the terminating NUL come back.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Linked vertex + fragment program. Deleted on drop.
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    /// Compiles both stages, links, validates and releases the stage objects.
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders, BootstrapError> {
        let vertex_shader = Self::create_and_compile(VERTEX_SHADER, vertex_code)
            .map_err(BootstrapError::VertexCompilation)?;
        log::debug!("vertex shader compiled");

        let fragment_shader = match Self::create_and_compile(FRAGMENT_SHADER, fragment_code) {
            Ok(id) => id,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(BootstrapError::FragmentCompilation(e));
            }
        };
        log::debug!("fragment shader compiled");

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader) };
        unsafe { gl::AttachShader(shader_program, fragment_shader) };
        unsafe { gl::LinkProgram(shader_program) };

        let linked = Self::program_status(shader_program, LINK_STATUS)
            .map_err(BootstrapError::ProgramLinking)
            .and_then(|_| {
                unsafe { gl::ValidateProgram(shader_program) };
                Self::program_status(shader_program, VALIDATE_STATUS)
                    .map_err(BootstrapError::ProgramValidation)
            });

        // not needed anymore
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        if let Err(e) = linked {
            unsafe { gl::DeleteProgram(shader_program) };
            return Err(e);
        }
        log::debug!("program {shader_program} linked and validated");

        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn create_and_compile(kind: GLenum, shader_code: &str) -> Result<u32, String> {
        let shader_id = unsafe { gl::CreateShader(kind) };
        if shader_id == 0 {
            return Err(format!("gl::CreateShader({kind:#x}) failed"));
        }
        if let Err(e) = Self::compile(shader_id, shader_code) {
            unsafe { gl::DeleteShader(shader_id) };
            return Err(e);
        }
        Ok(shader_id)
    }

    fn compile(shader_id: u32, shader_code: &str) -> Result<(), String> {
        let len = shader_code.len() as GLint;
        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &len,
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut v = vec![0u8; INFO_LOG_CAPACITY];
            let mut log_len: GLsizei = 0;
            unsafe {
                gl::GetShaderInfoLog(
                    shader_id,
                    INFO_LOG_CAPACITY as GLsizei,
                    &mut log_len,
                    v.as_mut_ptr().cast(),
                );
            }
            return Err(info_log_to_string(v, log_len));
        }
        Ok(())
    }

    fn program_status(program_id: u32, status: GLenum) -> Result<(), String> {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program_id, status, &mut success);
        }
        if success != 0 {
            return Ok(());
        }

        let mut v = vec![0u8; INFO_LOG_CAPACITY];
        let mut log_len: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program_id,
                INFO_LOG_CAPACITY as GLsizei,
                &mut log_len,
                v.as_mut_ptr().cast(),
            );
        }
        Err(info_log_to_string(v, log_len))
    }

    pub fn program_id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self) -> Result<(), BootstrapError> {
        unsafe { gl::UseProgram(self.program_id) };
        check_gl_err("glUseProgram")
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}

/// Trims a driver-filled log buffer to the reported length.
fn info_log_to_string(mut buf: Vec<u8>, log_len: GLsizei) -> String {
    let len = usize::try_from(log_len).unwrap_or(0).min(INFO_LOG_CAPACITY - 1);
    buf.truncate(len);
    if let Some(nul) = buf.iter().position(|&b| b == 0) {
        buf.truncate(nul);
    }
    String::from_utf8_lossy(&buf).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_is_cut_at_reported_length() {
        let mut buf = b"0:1(10): error: syntax error\ngarbage".to_vec();
        buf.resize(INFO_LOG_CAPACITY, 0);
        assert_eq!(info_log_to_string(buf, 29), "0:1(10): error: syntax error");
    }

    #[test]
    fn info_log_never_exceeds_511_characters() {
        let buf = vec![b'x'; INFO_LOG_CAPACITY];
        assert_eq!(info_log_to_string(buf, 4096).len(), 511);
    }

    #[test]
    fn info_log_handles_negative_length_and_embedded_nul() {
        assert_eq!(info_log_to_string(b"abc".to_vec(), -1), "");
        assert_eq!(info_log_to_string(b"ab\0cd".to_vec(), 5), "ab");
    }
}
