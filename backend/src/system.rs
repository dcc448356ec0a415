use super::error::BootstrapError;
use super::glutils;
use gl;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use sdl2::video::GLProfile;
use std::path::{Path, PathBuf};

/// Window and context request.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub w: u32,
    pub h: u32,
    pub title: String,
    /// Ask for a 4.3 debug context instead of a plain 3.3 one.
    pub debug_context: bool,
    pub icon: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            w: 800,
            h: 600,
            title: "OpenGL".to_string(),
            debug_context: cfg!(debug_assertions),
            icon: None,
        }
    }
}

impl WindowConfig {
    pub fn context_version(&self) -> (u8, u8) {
        if self.debug_context {
            (4, 3)
        } else {
            (3, 3)
        }
    }
}

pub struct System {
    pub w: u32,
    pub h: u32,
    // field order is drop order: context before window before SDL
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
    should_close: bool,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, BootstrapError> {
        let sdl_context = sdl2::init().map_err(BootstrapError::SdlInit)?;
        let video_subsystem = sdl_context.video().map_err(BootstrapError::SdlInit)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        let (major, minor) = config.context_version();
        gl_attr.set_context_version(major, minor);
        if config.debug_context {
            gl_attr.set_context_flags().debug().set();
        }

        let mut window = match video_subsystem
            .window(&config.title, config.w, config.h)
            .opengl()
            .resizable()
            .build()
        {
            Ok(w) => w,
            Err(e) => return Err(BootstrapError::WindowCreation(e.to_string())),
        };

        let gl_ctx = window
            .gl_create_context()
            .map_err(BootstrapError::ContextCreation)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BootstrapError::ContextCreation)?;
        log::info!(
            "window {}x{} created, requested OpenGL {major}.{minor} core{}",
            config.w,
            config.h,
            if config.debug_context { " (debug)" } else { "" }
        );

        if let Some(icon) = &config.icon {
            set_window_icon(&mut window, icon);
        }

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        if !gl::Clear::is_loaded() || !gl::DrawElements::is_loaded() {
            return Err(BootstrapError::GlLoad);
        }
        glutils::log_opengl_info();

        let event_pump = sdl_context.event_pump().map_err(BootstrapError::SdlInit)?;

        Ok(System {
            w: config.w,
            h: config.h,
            gl_ctx,
            window,
            event_pump,
            video_subsystem,
            sdl_context,
            should_close: false,
        })
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    /// Drains pending events. Returns `false` once the window should close.
    pub fn process_io_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.should_close = true,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..) | WindowEvent::Resized(..),
                    ..
                } => {
                    let (w, h) = self.window.drawable_size();
                    log::debug!("framebuffer resized to {w}x{h}");
                    glutils::set_viewport(w, h);
                }
                _ => {}
            }
        }
        !self.should_close
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }

    pub fn clear_screen(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
        }
    }
}

/// Loads an image as RGBA and installs it as the window icon. Failures are
/// only logged.
fn set_window_icon(window: &mut sdl2::video::Window, path: &Path) {
    unsafe {
        stb_image::stb_image::stbi_set_flip_vertically_on_load(0);
    }
    let mut img = match stb_image::image::load_with_depth(path, 4, false) {
        stb_image::image::LoadResult::ImageU8(img) => img,
        stb_image::image::LoadResult::ImageF32(_) => {
            log::warn!("icon {path:?}: 32-bit images not supported here");
            return;
        }
        stb_image::image::LoadResult::Error(e) => {
            log::warn!("icon {path:?} not loaded: {e}");
            return;
        }
    };

    let (w, h) = (img.width as u32, img.height as u32);
    let surface = Surface::from_data(&mut img.data, w, h, w * 4, PixelFormatEnum::RGBA32);
    match surface {
        Ok(surface) => {
            window.set_icon(surface);
            log::debug!("window icon set from {path:?} ({w}x{h})");
        }
        Err(e) => log::warn!("icon {path:?}: {e}"),
    };
}
