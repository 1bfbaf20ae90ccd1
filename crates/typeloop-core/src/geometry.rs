// Extruded text meshes built from TrueType/OpenType glyph outlines.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use lyon_path::iterator::PathIterator;
use lyon_path::{math, Path, PathEvent};
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};
use thiserror::Error;
use ttf_parser::{Face, OutlineBuilder};

use crate::constants::{TEXT_DEPTH, TEXT_SIZE, TEXT_TOLERANCE};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VertexPN {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid font data: {0}")]
    InvalidFont(String),
    #[error("tessellation failed: {0}")]
    Tessellation(String),
}

/// Indexed triangle mesh centered on its bounding box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextShape {
    pub vertices: Vec<VertexPN>,
    pub indices: Vec<u32>,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl TextShape {
    /// Build from raw triangles, translating them so the bounding box is
    /// centered on the origin.
    pub fn centered(mut vertices: Vec<VertexPN>, indices: Vec<u32>) -> Self {
        if vertices.is_empty() {
            return Self {
                vertices,
                indices,
                ..Default::default()
            };
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        let center = (min + max) * 0.5;
        for v in &mut vertices {
            v.position = (Vec3::from_array(v.position) - center).to_array();
        }
        Self {
            vertices,
            indices,
            bounds_min: min - center,
            bounds_max: max - center,
        }
    }

    /// Positive x extent of the centered shape (half the rendered width).
    /// Layout offsets every direction by this much so copies clear the center.
    #[inline]
    pub fn bounding_width(&self) -> f32 {
        self.bounds_max.x
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

pub trait GeometryProvider {
    fn text_shape(&self, message: &str) -> Result<TextShape, GeometryError>;
}

/// Extruded text from an in-memory font file.
pub struct FontGeometry {
    data: Vec<u8>,
    size: f32,
    depth: f32,
    tolerance: f32,
}

impl FontGeometry {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, GeometryError> {
        Face::parse(&data, 0).map_err(|e| GeometryError::InvalidFont(e.to_string()))?;
        Ok(Self {
            data,
            size: TEXT_SIZE,
            depth: TEXT_DEPTH,
            tolerance: TEXT_TOLERANCE,
        })
    }

    pub fn with_size(mut self, size: f32, depth: f32) -> Self {
        self.size = size.max(1e-6);
        self.depth = depth.max(0.0);
        self
    }

    fn outline(&self, face: &Face<'_>, message: &str) -> Path {
        let scale = self.size / face.units_per_em() as f32;
        let mut builder = Path::builder();
        let mut pen_x = 0.0f32;
        for ch in message.chars().filter(|c| !c.is_control()) {
            let Some(gid) = face.glyph_index(ch) else {
                log::debug!("[geometry] no glyph for {:?}", ch);
                continue;
            };
            let mut sink = GlyphSink {
                builder: &mut builder,
                scale,
                pen_x,
            };
            _ = face.outline_glyph(gid, &mut sink);
            pen_x += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
        }
        builder.build()
    }
}

impl GeometryProvider for FontGeometry {
    fn text_shape(&self, message: &str) -> Result<TextShape, GeometryError> {
        let face =
            Face::parse(&self.data, 0).map_err(|e| GeometryError::InvalidFont(e.to_string()))?;
        let path = self.outline(&face, message);
        let half = self.depth * 0.5;

        let mut caps: VertexBuffers<VertexPN, u32> = VertexBuffers::new();
        FillTessellator::new()
            .tessellate_path(
                &path,
                &FillOptions::tolerance(self.tolerance).with_fill_rule(FillRule::NonZero),
                &mut BuffersBuilder::new(&mut caps, CapVertex { z: half }),
            )
            .map_err(|e| GeometryError::Tessellation(format!("{:?}", e)))?;

        let mut vertices = caps.vertices.clone();
        let mut indices = caps.indices.clone();

        // back cap, opposite winding
        let back = vertices.len() as u32;
        vertices.extend(caps.vertices.iter().map(|v| VertexPN {
            position: [v.position[0], v.position[1], -half],
            normal: [0.0, 0.0, -1.0],
        }));
        for tri in caps.indices.chunks_exact(3) {
            indices.extend_from_slice(&[back + tri[0], back + tri[2], back + tri[1]]);
        }

        for event in path.iter().flattened(self.tolerance) {
            match event {
                PathEvent::Line { from, to } => side_wall(&mut vertices, &mut indices, from, to, half),
                PathEvent::End {
                    last,
                    first,
                    close: true,
                } => side_wall(&mut vertices, &mut indices, last, first, half),
                _ => {}
            }
        }

        Ok(TextShape::centered(vertices, indices))
    }
}

struct GlyphSink<'a> {
    builder: &'a mut lyon_path::path::Builder,
    scale: f32,
    pen_x: f32,
}

impl GlyphSink<'_> {
    #[inline]
    fn pt(&self, x: f32, y: f32) -> math::Point {
        math::point(self.pen_x + x * self.scale, y * self.scale)
    }
}

impl OutlineBuilder for GlyphSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.builder.begin(p);
    }
    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.builder.line_to(p);
    }
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.pt(x1, y1), self.pt(x, y));
        self.builder.quadratic_bezier_to(c, p);
    }
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.pt(x1, y1), self.pt(x2, y2), self.pt(x, y));
        self.builder.cubic_bezier_to(c1, c2, p);
    }
    fn close(&mut self) {
        self.builder.end(true);
    }
}

#[derive(Clone, Copy)]
struct CapVertex {
    z: f32,
}

impl FillVertexConstructor<VertexPN> for CapVertex {
    fn new_vertex(&mut self, v: FillVertex) -> VertexPN {
        let p = v.position();
        VertexPN {
            position: [p.x, p.y, self.z],
            normal: [0.0, 0.0, 1.0],
        }
    }
}

fn side_wall(
    vertices: &mut Vec<VertexPN>,
    indices: &mut Vec<u32>,
    from: math::Point,
    to: math::Point,
    half: f32,
) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return;
    }
    let normal = [dy / len, -dx / len, 0.0];
    let base = vertices.len() as u32;
    for (p, z) in [(from, half), (to, half), (to, -half), (from, -half)] {
        vertices.push(VertexPN {
            position: [p.x, p.y, z],
            normal,
        });
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_moves_bounds_to_origin() {
        let v = |x: f32, y: f32| VertexPN {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
        };
        let shape = TextShape::centered(vec![v(1.0, 1.0), v(5.0, 1.0), v(5.0, 3.0)], vec![0, 1, 2]);
        assert_eq!(shape.bounds_min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(shape.bounds_max, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(shape.bounding_width(), 2.0);
        assert_eq!(shape.vertices[0].position, [-2.0, -1.0, 0.0]);
    }
}
