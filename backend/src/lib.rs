pub mod debug;
pub mod error;
pub mod glutils;
pub mod math;
pub mod mesh;
pub mod shaders;
pub mod system;
