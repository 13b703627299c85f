//! # Geometry — The Shared Contract of Every Generator
//!
//! Every shape answers the same three questions:
//!
//! 1. How many vertices will you write? ([`MeshGeometry::vertex_count`])
//! 2. How many indices? ([`MeshGeometry::element_count`])
//! 3. Write them into these buffers. ([`MeshGeometry::fill`])
//!
//! The caller sizes storage from the first two, then calls `fill` once. The
//! fill trusts those sizes: it checks up front that the buffers are large
//! enough and panics before writing anything if they aren't.
//!
//! ## Why Texcoords Change the Vertex Count
//!
//! A texture coordinate must run from 0 to 1 around a closed loop. Where the
//! loop closes, the same position needs `u = 0` for the triangle on one side
//! and `u = 1` for the triangle on the other. A vertex holds one `u`, so the
//! generators duplicate the whole seam loop when texcoords are requested.
//! Without texcoords the seam is shared and indices wrap with `% n`.
//!
//! ## Index Ranges
//!
//! Each shape lays its index buffer out in fixed blocks (disks then side for
//! the cylinder, one block per ring for the torus). [`IndexRange`] names one
//! block by offset and count, so a renderer can draw part of a mesh straight
//! out of the full index buffer.

use std::ops::Range;

use bytemuck::Zeroable;

use crate::buffers::MeshBuffers;
use crate::layout::VertexLayout;
use crate::vertex::{MeshVertex, VertexViewMut};

/// Count queries plus a fill routine for one parametric shape.
pub trait MeshGeometry {
    /// Vertices written by [`fill`](Self::fill) for the given texcoord mode.
    fn vertex_count(&self, texcoords: bool) -> usize;

    /// Indices written by [`fill`](Self::fill). Independent of the layout.
    fn element_count(&self) -> usize;

    /// Write vertices and triangle-list indices.
    ///
    /// The texcoord mode comes from `vertices.layout()`.
    ///
    /// # Panics
    ///
    /// If `vertices` holds fewer than `vertex_count` records or `indices` is
    /// shorter than `element_count`. Nothing is written in that case.
    fn fill(&self, vertices: &mut VertexViewMut<'_>, indices: &mut [u32]);

    /// Vertex count for whatever texcoord mode `layout` implies.
    fn vertex_count_for(&self, layout: &VertexLayout) -> usize {
        self.vertex_count(layout.has_texcoords())
    }

    /// Allocate buffers sized for `layout` and fill them.
    fn build(&self, layout: VertexLayout) -> MeshBuffers {
        let mut buffers = MeshBuffers::empty(layout);
        buffers.refill(self);
        buffers
    }

    /// Fill packed [`MeshVertex`] records with every attribute present.
    fn build_vertices(&self) -> (Vec<MeshVertex>, Vec<u32>) {
        let mut vertices = vec![MeshVertex::zeroed(); self.vertex_count(true)];
        let mut indices = vec![0; self.element_count()];
        let floats: &mut [f32] = bytemuck::cast_slice_mut(vertices.as_mut_slice());
        self.fill(&mut VertexViewMut::new(floats, MeshVertex::LAYOUT), &mut indices);
        (vertices, indices)
    }
}

/// A contiguous block of the index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// First index, in elements.
    pub offset: usize,
    /// Number of indices.
    pub count: usize,
}

impl IndexRange {
    pub const fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    pub fn end(&self) -> usize {
        self.offset + self.count
    }

    pub fn as_range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Offset in bytes, for APIs that bind index buffers by byte position.
    pub fn byte_offset(&self) -> usize {
        self.offset * std::mem::size_of::<u32>()
    }

    pub fn triangle_count(&self) -> usize {
        self.count / 3
    }

    pub fn overlaps(&self, other: &IndexRange) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    /// The indices this range covers.
    pub fn slice<'a>(&self, indices: &'a [u32]) -> &'a [u32] {
        &indices[self.as_range()]
    }
}

/// Panics if the caller's buffers can't hold the mesh.
pub(crate) fn check_capacity(
    shape: &str,
    vertices: &VertexViewMut<'_>,
    indices: &[u32],
    vertex_count: usize,
    element_count: usize,
) {
    assert!(
        vertices.len() >= vertex_count,
        "{shape}: vertex buffer holds {} records, {vertex_count} needed",
        vertices.len()
    );
    assert!(
        indices.len() >= element_count,
        "{shape}: index buffer holds {} indices, {element_count} needed",
        indices.len()
    );
}

/// Appends triangles to an index slice.
pub(crate) struct IndexWriter<'a> {
    out: &'a mut [u32],
    len: usize,
}

impl<'a> IndexWriter<'a> {
    pub fn new(out: &'a mut [u32]) -> Self {
        Self { out, len: 0 }
    }

    pub fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.out[self.len..self.len + 3].copy_from_slice(&[a, b, c]);
        self.len += 3;
    }

    /// Indices written so far.
    pub fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_math() {
        let r = IndexRange::new(6, 12);
        assert_eq!(r.end(), 18);
        assert_eq!(r.as_range(), 6..18);
        assert_eq!(r.byte_offset(), 24);
        assert_eq!(r.triangle_count(), 4);
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = IndexRange::new(0, 6);
        let b = IndexRange::new(6, 6);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&IndexRange::new(5, 1)));
    }

    #[test]
    fn writer_appends_triples() {
        let mut buf = [0u32; 6];
        let mut w = IndexWriter::new(&mut buf);
        w.triangle(1, 2, 3);
        w.triangle(4, 5, 6);
        assert_eq!(w.len(), 6);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
    }
}
