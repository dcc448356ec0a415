use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

/// Interleaved vertex as uploaded to the vertex buffer: `x y r g b`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub color: Vec3,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, r: f32, g: f32, b: f32) -> Self {
        Vertex {
            position: Vec2::new(x, y),
            color: Vec3::new(r, g, b),
        }
    }

    /// Floats per vertex.
    pub const COMPONENTS: usize = mem::size_of::<Vertex>() / mem::size_of::<f32>();

    /// Layout binding attribute 0 to `position` and attribute 1 to `color`.
    pub fn layout() -> VertexLayout {
        VertexLayout {
            stride: mem::size_of::<Vertex>(),
            attributes: vec![
                VertexAttribute {
                    index: 0,
                    components: 2,
                    offset: mem::offset_of!(Vertex, position),
                },
                VertexAttribute {
                    index: 1,
                    components: 3,
                    offset: mem::offset_of!(Vertex, color),
                },
            ],
        }
    }
}

/// One float attribute inside an interleaved vertex. Offsets are in bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: u32,
    pub offset: usize,
}

impl VertexAttribute {
    pub fn size_in_bytes(&self) -> usize {
        self.components as usize * mem::size_of::<f32>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Checks that attributes do not overlap and fit within the stride.
    pub fn is_consistent(&self) -> bool {
        let mut spans: Vec<(usize, usize)> = self
            .attributes
            .iter()
            .map(|a| (a.offset, a.offset + a.size_in_bytes()))
            .collect();
        spans.sort_unstable();
        let no_overlap = spans.windows(2).all(|w| w[0].1 <= w[1].0);
        let fits = spans.last().map_or(true, |&(_, end)| end <= self.stride);
        no_overlap && fits
    }
}
