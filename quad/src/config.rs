use crate::scene;
use backend::system::WindowConfig;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading shader {path:?}: {source}")]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where GL debug reports go when the context has the debug flag.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DebugOutput {
    /// Plain report lines on standard output.
    #[default]
    Stdout,
    /// Through the logger, leveled by message severity.
    Log,
}

#[derive(Parser, Debug)]
#[command(version, about = "Draws two colored triangles with OpenGL", long_about = None)]
pub struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,
    #[arg(long, default_value = "OpenGL")]
    pub title: String,
    /// Window icon image. Defaults to the bundled triangle icon.
    #[arg(long, conflicts_with = "no_icon")]
    pub icon: Option<PathBuf>,
    /// Do not set a window icon.
    #[arg(long)]
    pub no_icon: bool,
    /// GLSL file replacing the built-in vertex shader.
    #[arg(long)]
    pub vertex_shader: Option<PathBuf>,
    /// GLSL file replacing the built-in fragment shader.
    #[arg(long)]
    pub fragment_shader: Option<PathBuf>,
    /// Request a 4.3 debug context. Defaults to on in debug builds.
    #[arg(long)]
    pub debug_context: Option<bool>,
    /// Rasterize polygons as lines.
    #[arg(long)]
    pub wireframe: bool,
    #[arg(long, value_enum, default_value_t = DebugOutput::Stdout)]
    pub debug_output: DebugOutput,
}

/// Vertex and fragment GLSL sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn builtin() -> Self {
        ShaderSources {
            vertex: scene::VERTEX_SHADER.to_string(),
            fragment: scene::FRAGMENT_SHADER.to_string(),
        }
    }

    pub fn from_files(vertex_file: &Path, fragment_file: &Path) -> Result<Self, ConfigError> {
        Ok(ShaderSources {
            vertex: read_shader(vertex_file)?,
            fragment: read_shader(fragment_file)?,
        })
    }

    /// Built-in sources with each stage optionally replaced by a file.
    pub fn with_overrides(
        vertex_file: Option<&Path>,
        fragment_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut sources = Self::builtin();
        if let Some(path) = vertex_file {
            sources.vertex = read_shader(path)?;
        }
        if let Some(path) = fragment_file {
            sources.fragment = read_shader(path)?;
        }
        Ok(sources)
    }
}

fn read_shader(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::ShaderRead {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub shaders: ShaderSources,
    pub wireframe: bool,
    pub debug_output: DebugOutput,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: WindowConfig {
                icon: Some(PathBuf::from(scene::DEFAULT_ICON)),
                ..WindowConfig::default()
            },
            shaders: ShaderSources::builtin(),
            wireframe: false,
            debug_output: DebugOutput::default(),
        }
    }
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let shaders = ShaderSources::with_overrides(
            self.vertex_shader.as_deref(),
            self.fragment_shader.as_deref(),
        )?;

        let icon = if self.no_icon {
            None
        } else {
            Some(self.icon.unwrap_or_else(|| PathBuf::from(scene::DEFAULT_ICON)))
        };

        Ok(Config {
            window: WindowConfig {
                w: self.width,
                h: self.height,
                title: self.title,
                debug_context: self.debug_context.unwrap_or(cfg!(debug_assertions)),
                icon,
            },
            shaders,
            wireframe: self.wireframe,
            debug_output: self.debug_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let argv = std::iter::once("quad").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap().into_config().unwrap()
    }

    #[test]
    fn defaults_match_the_fixed_window() {
        let config = parse(&[]);
        assert_eq!((config.window.w, config.window.h), (800, 600));
        assert_eq!(config.window.title, "OpenGL");
        assert_eq!(config.window.icon.as_deref(), Some(Path::new(scene::DEFAULT_ICON)));
        assert_eq!(config.window.debug_context, cfg!(debug_assertions));
        assert_eq!(config.shaders, ShaderSources::builtin());
        assert!(!config.wireframe);
        assert_eq!(config.debug_output, DebugOutput::Stdout);

        let default = Config::default();
        assert_eq!(default.window.icon, config.window.icon);
        assert_eq!(default.shaders, config.shaders);
    }

    #[test]
    fn debug_context_selects_context_version() {
        let config = parse(&["--debug-context", "true"]);
        assert_eq!(config.window.context_version(), (4, 3));
        let config = parse(&["--debug-context", "false"]);
        assert_eq!(config.window.context_version(), (3, 3));
    }

    #[test]
    fn flags_are_carried_over() {
        let config = parse(&[
            "--width",
            "320",
            "--height",
            "240",
            "--no-icon",
            "--wireframe",
            "--debug-output",
            "log",
        ]);
        assert_eq!((config.window.w, config.window.h), (320, 240));
        assert!(config.window.icon.is_none());
        assert!(config.wireframe);
        assert_eq!(config.debug_output, DebugOutput::Log);
    }

    #[test]
    fn icon_and_no_icon_conflict() {
        assert!(Args::try_parse_from(["quad", "--icon", "a.png", "--no-icon"]).is_err());
    }

    #[test]
    fn shader_files_replace_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let frag = dir.path().join("flat.frag");
        let code = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }\n";
        fs::write(&frag, code).unwrap();

        let sources = ShaderSources::with_overrides(None, Some(&frag)).unwrap();
        assert_eq!(sources.vertex, scene::VERTEX_SHADER);
        assert_eq!(sources.fragment, code);

        let both = ShaderSources::from_files(&frag, &frag).unwrap();
        assert_eq!(both.vertex, both.fragment);
    }

    #[test]
    fn missing_shader_file_is_reported() {
        let err = ShaderSources::with_overrides(Some(Path::new("/nonexistent/quad.vert")), None)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quad.vert"));
        assert!(matches!(err, ConfigError::ShaderRead { .. }));
    }
}
