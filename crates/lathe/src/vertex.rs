//! # Vertex — Typed Access to Interleaved Records
//!
//! Generators write into a flat `&mut [f32]` that may contain other data
//! besides the attributes they produce. [`VertexViewMut`] pairs that slice with
//! a [`VertexLayout`] and exposes per-vertex setters, so the generators index
//! vertices by number instead of doing offset arithmetic by hand. Every access
//! goes through slice indexing, so an undersized buffer panics instead of
//! scribbling past its end. [`VertexView`] is the read-only twin.
//!
//! ## MeshVertex
//!
//! For callers that don't interleave anything of their own, [`MeshVertex`] is
//! the fully packed record:
//!
//! ```text
//! MeshVertex (32 bytes)
//! ┌──────────────┬──────────────┬──────────────┐
//! │ position     │ normal       │ uv           │
//! │ [f32; 3]     │ [f32; 3]     │ [f32; 2]     │
//! │ offset 0     │ offset 3     │ offset 6     │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! It is `Pod`, so a `&mut [MeshVertex]` can be cast to `&mut [f32]` with
//! `bytemuck` and filled in place. Offsets above are in floats, which is what
//! [`VertexLayout`] counts in.

use bytemuck::{Pod, Zeroable};

use crate::layout::VertexLayout;
use crate::math::{Vec2, Vec3};

/// Per-vertex data with every attribute present.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const LAYOUT: VertexLayout = VertexLayout::packed(true, true);
}

// ── Read-only view ──────────────────────────────────────────────────────

/// Read access to an interleaved vertex buffer.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    data: &'a [f32],
    layout: VertexLayout,
}

impl<'a> VertexView<'a> {
    pub fn new(data: &'a [f32], layout: VertexLayout) -> Self {
        Self { data, layout }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of whole records in the buffer.
    pub fn len(&self) -> usize {
        self.data.len() / self.layout.stride
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, index: usize) -> &'a [f32] {
        let data: &'a [f32] = self.data;
        let start = index * self.layout.stride;
        &data[start..start + self.layout.stride]
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let o = self.layout.position;
        Vec3::from_slice(&self.record(index)[o..o + 3])
    }

    /// `None` when the layout has no normal.
    pub fn normal(&self, index: usize) -> Option<Vec3> {
        let o = self.layout.normal?;
        Some(Vec3::from_slice(&self.record(index)[o..o + 3]))
    }

    /// `None` when the layout has no texture coordinate.
    pub fn texcoord(&self, index: usize) -> Option<Vec2> {
        let o = self.layout.texcoord?;
        Some(Vec2::from_slice(&self.record(index)[o..o + 2]))
    }
}

// ── Mutable view ────────────────────────────────────────────────────────

/// Write access to an interleaved vertex buffer.
///
/// Setters for attributes the layout omits are no-ops, which keeps the
/// generators free of `if has_normals` branches.
#[derive(Debug)]
pub struct VertexViewMut<'a> {
    data: &'a mut [f32],
    layout: VertexLayout,
}

impl<'a> VertexViewMut<'a> {
    pub fn new(data: &'a mut [f32], layout: VertexLayout) -> Self {
        Self { data, layout }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of whole records in the buffer.
    pub fn len(&self) -> usize {
        self.data.len() / self.layout.stride
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> VertexView<'_> {
        VertexView::new(&self.data[..], self.layout)
    }

    fn record_mut(&mut self, index: usize) -> &mut [f32] {
        let start = index * self.layout.stride;
        &mut self.data[start..start + self.layout.stride]
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        let o = self.layout.position;
        position.write_to_slice(&mut self.record_mut(index)[o..o + 3]);
    }

    pub fn set_normal(&mut self, index: usize, normal: Vec3) {
        if let Some(o) = self.layout.normal {
            normal.write_to_slice(&mut self.record_mut(index)[o..o + 3]);
        }
    }

    pub fn set_texcoord(&mut self, index: usize, uv: Vec2) {
        if let Some(o) = self.layout.texcoord {
            uv.write_to_slice(&mut self.record_mut(index)[o..o + 2]);
        }
    }

    /// Write every attribute of one vertex.
    pub fn write(&mut self, index: usize, position: Vec3, normal: Vec3, uv: Vec2) {
        self.set_position(index, position);
        self.set_normal(index, normal);
        self.set_texcoord(index, uv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::LAYOUT.byte_stride(), 32);
    }

    #[test]
    fn write_then_read_back_through_layout() {
        let layout = VertexLayout::new(1, Some(4), Some(8), 10).unwrap();
        let mut data = vec![-7.0; 20];
        {
            let mut view = VertexViewMut::new(&mut data, layout);
            view.write(1, Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec2::new(0.25, 0.75));
        }
        let view = VertexView::new(&data, layout);
        assert_eq!(view.len(), 2);
        assert_eq!(view.position(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(view.normal(1), Some(Vec3::Y));
        assert_eq!(view.texcoord(1), Some(Vec2::new(0.25, 0.75)));
        // Floats outside the layout's fields keep the caller's data.
        assert_eq!(data[10], -7.0);
        assert_eq!(data[17], -7.0);
    }

    #[test]
    fn omitted_attributes_are_not_written() {
        let layout = VertexLayout::packed(false, false);
        let mut data = vec![0.0; 3];
        let mut view = VertexViewMut::new(&mut data, layout);
        view.write(0, Vec3::ONE, Vec3::Y, Vec2::ONE);
        assert_eq!(view.as_view().normal(0), None);
        assert_eq!(view.as_view().texcoord(0), None);
        assert_eq!(data, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    #[should_panic]
    fn writing_past_the_end_panics() {
        let mut data = vec![0.0; 8];
        let mut view = VertexViewMut::new(&mut data, MeshVertex::LAYOUT);
        view.set_position(1, Vec3::ZERO);
    }

    #[test]
    fn mesh_vertices_cast_to_floats() {
        let mut verts = vec![MeshVertex::zeroed(); 2];
        {
            let floats: &mut [f32] = bytemuck::cast_slice_mut(verts.as_mut_slice());
            let mut view = VertexViewMut::new(floats, MeshVertex::LAYOUT);
            view.write(1, Vec3::X, Vec3::Z, Vec2::new(0.5, 1.0));
        }
        assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(verts[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(verts[1].uv, [0.5, 1.0]);
    }
}
