use thiserror::Error;

/// Step of the startup sequence that produced a [`BootstrapError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BootstrapStage {
    SdlInit,
    WindowCreation,
    ContextCreation,
    GlLoad,
    VertexCompilation,
    FragmentCompilation,
    ProgramLinking,
    ProgramValidation,
    Gl,
}

/// Fatal startup failure. Shader variants carry the driver's info log.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Error initializing SDL: {0}")]
    SdlInit(String),
    #[error("Error initializing window: {0}")]
    WindowCreation(String),
    #[error("Error creating OpenGL context: {0}")]
    ContextCreation(String),
    #[error("Failed to load OpenGL function pointers")]
    GlLoad,
    #[error("ERROR::SHADER::VERTEX::COMPILATION_FAILED\n{0}")]
    VertexCompilation(String),
    #[error("ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\n{0}")]
    FragmentCompilation(String),
    #[error("ERROR::PROGRAM::LINKING_FAILED\n{0}")]
    ProgramLinking(String),
    #[error("ERROR::PROGRAM::VALIDATION_FAILED\n{0}")]
    ProgramValidation(String),
    #[error("OpenGL error during {step}: {errors}")]
    Gl { step: String, errors: String },
}

impl BootstrapError {
    pub fn stage(&self) -> BootstrapStage {
        match self {
            BootstrapError::SdlInit(_) => BootstrapStage::SdlInit,
            BootstrapError::WindowCreation(_) => BootstrapStage::WindowCreation,
            BootstrapError::ContextCreation(_) => BootstrapStage::ContextCreation,
            BootstrapError::GlLoad => BootstrapStage::GlLoad,
            BootstrapError::VertexCompilation(_) => BootstrapStage::VertexCompilation,
            BootstrapError::FragmentCompilation(_) => BootstrapStage::FragmentCompilation,
            BootstrapError::ProgramLinking(_) => BootstrapStage::ProgramLinking,
            BootstrapError::ProgramValidation(_) => BootstrapStage::ProgramValidation,
            BootstrapError::Gl { .. } => BootstrapStage::Gl,
        }
    }
}
