//! # Buffers — Owned Vertex and Index Storage
//!
//! [`MeshGeometry::fill`] writes into storage the caller owns. Most callers
//! don't interleave anything of their own, though, and just want two `Vec`s
//! sized correctly. [`MeshBuffers`] is that pair, plus the layout that
//! describes the vertex records.
//!
//! ## Uploading
//!
//! Uploading is the caller's business. [`vertex_bytes`](MeshBuffers::vertex_bytes)
//! and [`index_bytes`](MeshBuffers::index_bytes) give zero-copy `&[u8]` views
//! through `bytemuck`, which is what GPU buffer-creation APIs take:
//!
//! ```ignore
//! let vertex_buffer = device.create_buffer_init(&BufferInitDescriptor {
//!     label: Some("torus vertices"),
//!     contents: buffers.vertex_bytes(),
//!     usage: BufferUsages::VERTEX,
//! });
//! torus.acknowledge_upload();
//! ```
//!
//! ## Re-meshing
//!
//! After a remesh the old contents are stale. [`refill`](MeshBuffers::refill)
//! resizes both vectors for the new resolution and fills them again, reusing
//! their allocations where possible.

use crate::geometry::{IndexRange, MeshGeometry};
use crate::layout::VertexLayout;
use crate::vertex::{VertexView, VertexViewMut};

/// A filled vertex buffer and index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    layout: VertexLayout,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    /// Empty buffers for `layout`. Call [`refill`](Self::refill) to fill them.
    pub fn empty(layout: VertexLayout) -> Self {
        Self {
            layout,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Resize for `geometry`'s current resolution and fill.
    pub fn refill<G: MeshGeometry + ?Sized>(&mut self, geometry: &G) {
        let vertex_count = geometry.vertex_count_for(&self.layout);
        self.vertices.clear();
        self.vertices.resize(self.layout.floats_for(vertex_count), 0.0);
        self.indices.clear();
        self.indices.resize(geometry.element_count(), 0);

        let mut view = VertexViewMut::new(&mut self.vertices, self.layout);
        geometry.fill(&mut view, &mut self.indices);
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn view(&self) -> VertexView<'_> {
        VertexView::new(&self.vertices, self.layout)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }

    pub fn element_count(&self) -> usize {
        self.indices.len()
    }

    /// Triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// The indices one sub-mesh covers.
    pub fn sub_indices(&self, range: IndexRange) -> &[u32] {
        range.slice(&self.indices)
    }

    /// Raw vertex bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Give up the vectors, e.g. to move them into a GPU staging area.
    pub fn into_parts(self) -> (VertexLayout, Vec<f32>, Vec<u32>) {
        (self.layout, self.vertices, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cylinder::Cylinder;
    use crate::torus::Torus;

    #[test]
    fn build_sizes_buffers_from_count_queries() {
        let torus = Torus::new(5, 4, 0.3);
        let layout = VertexLayout::packed(true, false);
        let buffers = torus.build(layout);
        assert_eq!(buffers.vertex_count(), torus.vertex_count(false));
        assert_eq!(buffers.vertices().len(), 6 * torus.vertex_count(false));
        assert_eq!(buffers.element_count(), torus.element_count());
        assert_eq!(buffers.triangles().count(), torus.element_count() / 3);
    }

    #[test]
    fn byte_views_cover_whole_buffers() {
        let buffers = Cylinder::new(6, 2, 2).build(VertexLayout::default());
        assert_eq!(buffers.vertex_bytes().len(), buffers.vertices().len() * 4);
        assert_eq!(buffers.index_bytes().len(), buffers.element_count() * 4);
    }

    #[test]
    fn refill_follows_remesh() {
        let mut cylinder = Cylinder::new(4, 1, 1);
        let mut buffers = cylinder.build(VertexLayout::packed(false, true));
        let before = buffers.vertex_count();

        cylinder.remesh(12, 3, 2);
        buffers.refill(&cylinder);

        assert!(buffers.vertex_count() > before);
        assert_eq!(buffers.vertex_count(), cylinder.vertex_count(true));
        assert_eq!(buffers.element_count(), cylinder.element_count());
    }

    #[test]
    fn sub_indices_match_range() {
        let cylinder = Cylinder::new(5, 2, 3);
        let buffers = cylinder.build(VertexLayout::default());
        let side = cylinder.side_range();
        assert_eq!(buffers.sub_indices(side), &buffers.indices()[side.as_range()]);
        assert_eq!(buffers.sub_indices(side).len(), cylinder.side_element_count());
    }

    #[test]
    fn into_parts_hands_back_filled_vectors() {
        let torus = Torus::new(4, 3, 0.5);
        let buffers = torus.build(VertexLayout::packed(false, false));
        let expected_indices = buffers.indices().to_vec();
        let (layout, vertices, indices) = buffers.into_parts();
        assert_eq!(layout, VertexLayout::packed(false, false));
        assert_eq!(vertices.len(), 3 * torus.vertex_count(false));
        assert_eq!(indices, expected_indices);
    }
}
