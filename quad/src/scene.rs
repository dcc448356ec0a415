//! The fixed scene: two triangles sharing an edge, one color per corner.

use backend::math::Vertex;

pub const VERTEX_SHADER: &str = include_str!("../shaders/triangle.vert");
pub const FRAGMENT_SHADER: &str = include_str!("../shaders/triangle.frag");

pub const DEFAULT_ICON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/triangle-64.png");

pub const CLEAR_COLOR: (f32, f32, f32) = (0.0, 0.0, 0.0);

#[rustfmt::skip]
pub const VERTICES: [Vertex; 4] = [
    //           X      Y     R    G    B
    Vertex::new( 0.0,  0.8,  1.0, 0.0, 0.0), // top center
    Vertex::new( 0.5,  0.0,  0.0, 1.0, 0.0), // center right
    Vertex::new(-0.5,  0.0,  0.0, 0.0, 1.0), // center left
    Vertex::new( 0.0, -0.8,  1.0, 1.0, 0.0), // bottom center
];

pub const INDICES: [u32; 6] = [
    0, 1, 2, // first triangle
    2, 1, 3, // second triangle
];
