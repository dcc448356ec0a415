use crate::config::{Config, DebugOutput};
use crate::scene;
use backend::debug::{self, DebugSink, LogSink, ReportWriter};
use backend::error::BootstrapError;
use backend::glutils;
use backend::mesh::Mesh;
use backend::shaders::Shaders;
use backend::system::System;

pub struct App {
    // field order is drop order: buffers, program, then window and SDL
    mesh: Mesh,
    shaders: Shaders,
    system: System,
}

impl App {
    /// Runs the startup sequence up to the first frame.
    pub fn bootstrap(config: &Config) -> Result<App, BootstrapError> {
        let mut system = System::new(&config.window)?;

        if glutils::context_has_debug_flag() {
            let sink: Box<dyn DebugSink> = match config.debug_output {
                DebugOutput::Stdout => Box::new(ReportWriter::stdout()),
                DebugOutput::Log => Box::new(LogSink),
            };
            debug::install(sink);
        } else if config.window.debug_context {
            log::warn!("debug context requested but the driver did not grant one");
        }

        glutils::set_viewport(system.w, system.h);
        let (r, g, b) = scene::CLEAR_COLOR;
        system.set_clear_color(r, g, b);
        glutils::set_polygon_mode(config.wireframe);

        let shaders = Shaders::from_str(&config.shaders.vertex, &config.shaders.fragment)?;
        let mesh = Mesh::upload(&scene::VERTICES, &scene::INDICES)?;

        shaders.use_program()?;
        mesh.bind();
        log::info!("bootstrap complete");

        Ok(App {
            mesh,
            shaders,
            system,
        })
    }

    /// Runs one loop iteration. Returns `false` without drawing once the
    /// window should close.
    pub fn frame(&mut self) -> bool {
        if !self.system.process_io_events() {
            return false;
        }
        self.system.clear_screen();
        self.mesh.draw();
        self.system.draw_to_screen();
        true
    }

    pub fn request_close(&mut self) {
        self.system.set_should_close(true);
    }

    pub fn program_id(&self) -> u32 {
        self.shaders.program_id()
    }

    pub fn run(mut self) {
        let mut frames: u64 = 0;
        while self.frame() {
            frames += 1;
        }
        log::info!("window closed after {frames} frames");
    }
}

pub fn run(config: &Config) -> Result<(), BootstrapError> {
    App::bootstrap(config)?.run();
    Ok(())
}
