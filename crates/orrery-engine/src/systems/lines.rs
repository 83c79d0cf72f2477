//! Static line strips (orbit paths and similar guides).
//!
//! Vertices of every strip live in one flat buffer; a strip table records
//! where each strip starts so the renderer can issue one draw per strip.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::TAU;
use crate::components::mesh::Color;

/// Per-vertex line data. 7 floats = 28 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 7;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(pos: Vec3, color: Color, opacity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            a: opacity,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// A contiguous run of vertices in the line buffer. Wire format: `[start, count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct LineStrip {
    pub start: u32,
    pub count: u32,
}

/// Closed circle of `segments` segments in the XZ plane, centred on the origin.
/// The first point is repeated at the end, so `segments + 1` points come back.
pub fn circle_xz(radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * TAU;
            Vec3::new(t.cos() * radius, 0.0, t.sin() * radius)
        })
        .collect()
}

/// Flat buffer of line strips.
pub struct LineBuffer {
    vertices: Vec<LineVertex>,
    strips: Vec<LineStrip>,
    max_vertices: usize,
}

impl LineBuffer {
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            strips: Vec::new(),
            max_vertices,
        }
    }

    /// Append a strip through `points`. Strips that would overflow the
    /// buffer are dropped whole. Returns the strip on success.
    pub fn push_strip(&mut self, points: &[Vec3], color: Color, opacity: f32) -> Option<LineStrip> {
        if points.len() < 2 {
            return None;
        }
        if self.vertices.len() + points.len() > self.max_vertices {
            log::warn!(
                "line buffer full ({} of {}), dropping strip of {}",
                self.vertices.len(),
                self.max_vertices,
                points.len()
            );
            return None;
        }
        let strip = LineStrip {
            start: self.vertices.len() as u32,
            count: points.len() as u32,
        };
        self.vertices
            .extend(points.iter().map(|&p| LineVertex::new(p, color, opacity)));
        self.strips.push(strip);
        Some(strip)
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn strip(&self, index: usize) -> Option<&[LineVertex]> {
        let s = self.strips.get(index)?;
        self.vertices
            .get(s.start as usize..(s.start + s.count) as usize)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.strips.clear();
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    pub fn strips_ptr(&self) -> *const u32 {
        self.strips.as_ptr() as *const u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_is_closed_and_on_radius() {
        let pts = circle_xz(74.0, 256);
        assert_eq!(pts.len(), 257);
        assert!((pts[0] - pts[256]).length() < 1e-3);
        for p in &pts {
            assert!((p.length() - 74.0).abs() < 1e-3);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn strips_are_recorded_in_order() {
        let mut buf = LineBuffer::with_capacity(1024);
        let a = buf.push_strip(&circle_xz(10.0, 16), Color::WHITE, 1.0);
        let b = buf.push_strip(&circle_xz(20.0, 32), Color::WHITE, 0.5);
        assert_eq!(a, Some(LineStrip { start: 0, count: 17 }));
        assert_eq!(b, Some(LineStrip { start: 17, count: 33 }));
        assert_eq!(buf.vertex_count(), 50);
        let second = buf.strip(1).unwrap();
        assert!((second[0].pos().length() - 20.0).abs() < 1e-4);
        assert_eq!(second[0].a, 0.5);
    }

    #[test]
    fn overflowing_strip_is_dropped() {
        let mut buf = LineBuffer::with_capacity(20);
        assert!(buf.push_strip(&circle_xz(1.0, 16), Color::WHITE, 1.0).is_some());
        assert!(buf.push_strip(&circle_xz(1.0, 16), Color::WHITE, 1.0).is_none());
        assert_eq!(buf.strip_count(), 1);
    }

    #[test]
    fn single_point_is_not_a_strip() {
        let mut buf = LineBuffer::with_capacity(8);
        assert!(buf.push_strip(&[Vec3::ZERO], Color::WHITE, 1.0).is_none());
    }
}
