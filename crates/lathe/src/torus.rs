//! # Torus — A Tube Swept Around the Y Axis
//!
//! The major radius is fixed at 1; only the tube (minor) radius varies. The
//! torus lies in the XZ plane, centred on the origin.
//!
//! ## Numbering
//!
//! Vertices are ring-major: ring `i` (a cross-section of the tube), side `j`
//! (a point around that cross-section) is vertex `i * S + j`, where the side
//! stride `S` is `sides`, or `sides + 1` with texture coordinates. With
//! texture coordinates there is also an extra ring `i = rings`, so both seams
//! (around the major circle and around the tube) are duplicated:
//!
//! ```text
//!            j = 0    1    2   ..  sides
//!   i = 0    ●────●────●──   ──●   ← seam column (tex only)
//!   i = 1    ●────●────●──   ──●
//!    ..
//!   i = rings ●───●────●──   ──●   ← seam row (tex only)
//! ```
//!
//! ## Angles
//!
//! Rings start on the negative Z axis and advance counter-clockwise seen
//! from above, like the cylinder's slices. Side 0 is the innermost point of
//! the tube and sides proceed downward first.
//!
//! ## Index Layout
//!
//! Indices are written ring by ring, `6 * sides` per ring, so
//! [`ring_range`](Torus::ring_range) can draw any single segment of the tube.

use log::{debug, trace};

use crate::geometry::{IndexRange, IndexWriter, MeshGeometry, check_capacity};
use crate::math::{Vec2, Vec3, fraction, loop_direction};
use crate::resolution::{BufferState, TorusResolution};
use crate::vertex::VertexViewMut;

/// A torus generator with major radius 1.
///
/// Not `Clone`, for the same reason as [`Cylinder`](crate::cylinder::Cylinder).
#[derive(Debug)]
pub struct Torus {
    resolution: TorusResolution,
    state: BufferState,
}

impl Torus {
    /// Radius of the circle the tube is swept along.
    pub const MAJOR_RADIUS: f32 = 1.0;

    /// Create a torus, clamping `rings` and `sides` into range.
    pub fn new(rings: u32, sides: u32, minor_radius: f32) -> Self {
        Self::from_resolution(TorusResolution::new(rings, sides, minor_radius))
    }

    pub fn from_resolution(resolution: TorusResolution) -> Self {
        let clamped = resolution.clamped();
        if clamped != resolution {
            debug!("torus resolution {resolution:?} clamped to {clamped:?}");
        }
        Self {
            resolution: clamped,
            state: BufferState::Stale,
        }
    }

    /// Change resolution and tube radius. Returns `false` (and leaves the
    /// buffer state alone) when the requested values equal the current ones.
    /// Anything else is clamped, committed and marks the buffers stale.
    pub fn remesh(&mut self, rings: u32, sides: u32, minor_radius: f32) -> bool {
        let requested = TorusResolution::new(rings, sides, minor_radius);
        if requested == self.resolution {
            return false;
        }
        let next = requested.clamped();
        if next != requested {
            debug!("torus resolution {requested:?} clamped to {next:?}");
        }
        debug!("torus remesh {:?} -> {next:?}", self.resolution);
        self.resolution = next;
        self.state = BufferState::Stale;
        true
    }

    /// [`remesh`](Self::remesh) keeping the current tube radius.
    pub fn remesh_keep_radius(&mut self, rings: u32, sides: u32) -> bool {
        self.remesh(rings, sides, self.resolution.minor_radius)
    }

    pub fn resolution(&self) -> TorusResolution {
        self.resolution
    }

    pub fn rings(&self) -> u32 {
        self.resolution.rings
    }

    pub fn sides(&self) -> u32 {
        self.resolution.sides
    }

    pub fn minor_radius(&self) -> f32 {
        self.resolution.minor_radius
    }

    pub fn major_radius(&self) -> f32 {
        Self::MAJOR_RADIUS
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn needs_refresh(&self) -> bool {
        self.state.is_stale()
    }

    pub fn acknowledge_upload(&mut self) {
        self.state = BufferState::Fresh;
    }

    // ── Sub-meshes ───────────────────────────────────────────────────────

    /// Indices in one ring segment.
    pub fn ring_element_count(&self) -> usize {
        6 * self.resolution.sides as usize
    }

    /// The index block for ring `ring`.
    ///
    /// # Panics
    ///
    /// If `ring >= rings()`.
    pub fn ring_range(&self, ring: u32) -> IndexRange {
        assert!(
            ring < self.resolution.rings,
            "torus ring {ring} out of range (rings = {})",
            self.resolution.rings
        );
        let n = self.ring_element_count();
        IndexRange::new(ring as usize * n, n)
    }

    /// One named block per ring, in buffer order.
    pub fn submeshes(&self) -> Vec<(String, IndexRange)> {
        (0..self.resolution.rings)
            .map(|i| (format!("ring {i}"), self.ring_range(i)))
            .collect()
    }

    /// Length of a [`side_strip`](Self::side_strip).
    pub fn side_strip_len(&self) -> usize {
        2 * (self.resolution.rings as usize + 1)
    }

    /// Triangle-strip indices running all the way round the major circle
    /// along the band between side `side` and the next one.
    ///
    /// The strip refers to the vertex numbering of a fill made with the same
    /// `texcoords` mode.
    ///
    /// # Panics
    ///
    /// If `side >= sides()`.
    pub fn side_strip(&self, side: u32, texcoords: bool) -> Vec<u32> {
        let TorusResolution { rings, sides, .. } = self.resolution;
        assert!(side < sides, "torus side {side} out of range (sides = {sides})");

        let stride = side_stride(sides, texcoords);
        let next_side = if texcoords { side + 1 } else { (side + 1) % sides };
        let mut strip = Vec::with_capacity(self.side_strip_len());
        for i in 0..=rings {
            let ring = if texcoords { i } else { i % rings };
            strip.push(ring * stride + next_side);
            strip.push(ring * stride + side);
        }
        strip
    }
}

fn side_stride(sides: u32, texcoords: bool) -> u32 {
    if texcoords { sides + 1 } else { sides }
}

impl Default for Torus {
    fn default() -> Self {
        Self::from_resolution(TorusResolution::default())
    }
}

impl MeshGeometry for Torus {
    fn vertex_count(&self, texcoords: bool) -> usize {
        let TorusResolution { rings, sides, .. } = self.resolution;
        if texcoords {
            ((rings + 1) * (sides + 1)) as usize
        } else {
            (rings * sides) as usize
        }
    }

    fn element_count(&self) -> usize {
        self.resolution.rings as usize * self.ring_element_count()
    }

    fn fill(&self, vertices: &mut VertexViewMut<'_>, indices: &mut [u32]) {
        let texcoords = vertices.layout().has_texcoords();
        let vertex_count = self.vertex_count(texcoords);
        let element_count = self.element_count();
        check_capacity("torus", vertices, indices, vertex_count, element_count);
        trace!(
            "torus fill {:?}: {vertex_count} vertices, {element_count} indices, layout {:?}",
            self.resolution,
            vertices.layout()
        );

        let TorusResolution { rings, sides, minor_radius } = self.resolution;
        let stride = side_stride(sides, texcoords);
        let (ring_count, side_count) = if texcoords { (rings + 1, sides + 1) } else { (rings, sides) };

        for i in 0..ring_count {
            let (s, c) = loop_direction(i, rings);
            for j in 0..side_count {
                let (sin_phi, cos_phi) = loop_direction(j, sides);
                let reach = Self::MAJOR_RADIUS + minor_radius * cos_phi;
                vertices.write(
                    (i * stride + j) as usize,
                    Vec3::new(s * reach, minor_radius * sin_phi, c * reach),
                    Vec3::new(s * cos_phi, sin_phi, c * cos_phi),
                    Vec2::new(fraction(i, rings), fraction(j, sides)),
                );
            }
        }

        let mut out = IndexWriter::new(indices);
        for i in 0..rings {
            let next_ring = if texcoords { i + 1 } else { (i + 1) % rings };
            for j in 0..sides {
                let next_side = if texcoords { j + 1 } else { (j + 1) % sides };
                out.triangle(next_ring * stride + j, i * stride + next_side, i * stride + j);
                out.triangle(
                    next_ring * stride + j,
                    next_ring * stride + next_side,
                    i * stride + next_side,
                );
            }
        }
        debug_assert_eq!(out.len(), element_count);
        trace!("torus fill done: {} indices written", out.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::VertexLayout;
    use crate::validate::check_mesh;

    const EPS: f32 = 1e-5;

    #[test]
    fn clamps_counts_but_not_radius() {
        let t = Torus::new(0, 1000, 2.5);
        assert_eq!(t.rings(), 3);
        assert_eq!(t.sides(), 255);
        assert_eq!(t.minor_radius(), 2.5);
        assert_eq!(t.major_radius(), 1.0);
    }

    #[test]
    fn defaults() {
        let t = Torus::default();
        assert_eq!(t.resolution(), TorusResolution::new(8, 8, 0.5));
        assert!(t.needs_refresh());
    }

    #[test]
    fn remesh_tracks_state() {
        let mut t = Torus::new(8, 8, 0.5);
        t.acknowledge_upload();
        assert!(!t.remesh(8, 8, 0.5));
        assert!(t.state().is_fresh());

        let mut t = Torus::new(3, 8, 0.5);
        t.acknowledge_upload();
        assert!(t.remesh(2, 8, 0.5), "rings=2 differs from the current 3");
        assert!(t.needs_refresh());
        assert_eq!(t.rings(), 3);
    }

    #[test]
    fn remesh_detects_radius_and_count_changes() {
        let mut t = Torus::new(8, 8, 0.5);
        t.acknowledge_upload();
        assert!(t.remesh(8, 8, 0.25));
        assert!(t.needs_refresh());

        t.acknowledge_upload();
        assert!(t.remesh_keep_radius(9, 8));
        assert_eq!(t.minor_radius(), 0.25);
        assert!(t.needs_refresh());

        t.acknowledge_upload();
        assert!(!t.remesh_keep_radius(9, 8));
        assert!(t.state().is_fresh());
    }

    #[test]
    fn counts() {
        let t = Torus::new(5, 4, 0.3);
        assert_eq!(t.vertex_count(false), 20);
        assert_eq!(t.vertex_count(true), 30);
        assert_eq!(t.element_count(), 120);
        assert_eq!(t.ring_element_count(), 24);
    }

    #[test]
    fn seam_excess_is_one_row_plus_one_column() {
        for (rings, sides) in [(3, 3), (8, 8), (12, 5), (255, 255)] {
            let t = Torus::new(rings, sides, 0.5);
            let excess = t.vertex_count(true) - t.vertex_count(false);
            assert_eq!(excess, (rings + sides + 1) as usize);
        }
    }

    #[test]
    fn texcoord_corners() {
        let t = Torus::new(3, 3, 0.5);
        let buffers = t.build(VertexLayout::default());
        let view = buffers.view();
        assert_eq!(view.texcoord(0), Some(Vec2::new(0.0, 0.0)));
        let last = (3 * 4 + 3) as usize;
        assert_eq!(last, t.vertex_count(true) - 1);
        assert_eq!(view.texcoord(last), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn first_vertex_is_inner_point_on_negative_z() {
        let t = Torus::new(8, 8, 0.25);
        let buffers = t.build(VertexLayout::default());
        let view = buffers.view();
        let p = view.position(0);
        assert!((p - Vec3::new(0.0, 0.0, -0.75)).length() < EPS, "got {p}");
        // Inner point's normal faces the axis.
        let n = view.normal(0).unwrap();
        assert!((n - Vec3::Z).length() < EPS, "got {n}");
    }

    #[test]
    fn second_side_goes_downward() {
        let t = Torus::new(8, 4, 0.5);
        let buffers = t.build(VertexLayout::packed(true, false));
        let view = buffers.view();
        // A quarter turn round the tube from the inner point is the bottom.
        let p = view.position(1);
        assert!((p - Vec3::new(0.0, -0.5, -1.0)).length() < EPS, "got {p}");
        let n = view.normal(1).unwrap();
        assert!((n - Vec3::NEG_Y).length() < EPS, "got {n}");
    }

    #[test]
    fn seam_duplicates_share_position() {
        let t = Torus::new(6, 5, 0.4);
        let buffers = t.build(VertexLayout::default());
        let view = buffers.view();
        let stride = 6;
        for i in 0..=6 {
            let row = i * stride;
            assert_eq!(view.position(row), view.position(row + 5), "ring {i}");
            assert_eq!(view.texcoord(row + 5).unwrap().y, 1.0);
        }
        for j in 0..=5 {
            assert_eq!(view.position(j), view.position(6 * stride + j), "side {j}");
            assert_eq!(view.texcoord(6 * stride + j).unwrap().x, 1.0);
        }
    }

    #[test]
    fn meshes_are_clean_in_every_layout() {
        for (rings, sides, radius) in [(3, 3, 0.5), (8, 8, 0.5), (12, 8, 0.25), (5, 17, 0.9)] {
            let t = Torus::new(rings, sides, radius);
            for layout in [
                VertexLayout::packed(false, false),
                VertexLayout::packed(true, false),
                VertexLayout::packed(false, true),
                VertexLayout::packed(true, true),
            ] {
                let report = check_mesh(&t.build(layout));
                assert!(report.is_clean(), "{rings}x{sides} {layout:?}: {report:?}");
            }
        }
    }

    #[test]
    fn ring_ranges_tile_the_index_buffer() {
        let t = Torus::new(7, 5, 0.5);
        let mut expected_offset = 0;
        for i in 0..t.rings() {
            let r = t.ring_range(i);
            assert_eq!(r.offset, expected_offset);
            assert_eq!(r.count, t.ring_element_count());
            if i > 0 {
                assert!(!r.overlaps(&t.ring_range(i - 1)));
            }
            expected_offset = r.end();
        }
        assert_eq!(expected_offset, t.element_count());
    }

    #[test]
    fn ring_range_only_touches_its_two_cross_sections() {
        let t = Torus::new(6, 4, 0.5);
        let buffers = t.build(VertexLayout::packed(true, false));
        for &i in buffers.sub_indices(t.ring_range(2)) {
            let ring = i / 4;
            assert!(ring == 2 || ring == 3, "index {i} belongs to ring {ring}");
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn ring_range_past_end_panics() {
        Torus::new(4, 4, 0.5).ring_range(4);
    }

    #[test]
    fn side_strip_with_texcoords() {
        let t = Torus::new(3, 4, 0.5);
        let strip = t.side_strip(1, true);
        assert_eq!(strip.len(), t.side_strip_len());
        assert_eq!(strip, vec![2, 1, 7, 6, 12, 11, 17, 16]);
        let n = t.vertex_count(true) as u32;
        assert!(strip.iter().all(|&i| i < n));
    }

    #[test]
    fn side_strip_without_texcoords_wraps_both_seams() {
        let t = Torus::new(3, 4, 0.5);
        let strip = t.side_strip(3, false);
        // Last side pairs with side 0; the strip closes back on ring 0.
        assert_eq!(strip, vec![0, 3, 4, 7, 8, 11, 0, 3]);
        let n = t.vertex_count(false) as u32;
        assert!(strip.iter().all(|&i| i < n));
    }

    #[test]
    fn side_strips_face_outward() {
        let t = Torus::new(5, 6, 0.4);
        for layout in [VertexLayout::packed(true, false), VertexLayout::packed(true, true)] {
            let texcoords = layout.has_texcoords();
            let buffers = t.build(layout);
            let view = buffers.view();
            for side in 0..t.sides() {
                let strip = t.side_strip(side, texcoords);
                for k in 0..strip.len() - 2 {
                    // Odd strip triangles swap their first two vertices.
                    let (a, b, c) = if k % 2 == 0 {
                        (strip[k], strip[k + 1], strip[k + 2])
                    } else {
                        (strip[k + 1], strip[k], strip[k + 2])
                    };
                    let [a, b, c] = [a, b, c].map(|i| i as usize);
                    let face = (view.position(b) - view.position(a))
                        .cross(view.position(c) - view.position(a));
                    let normals = [a, b, c]
                        .into_iter()
                        .map(|i| view.normal(i).unwrap())
                        .fold(Vec3::ZERO, |sum, n| sum + n);
                    assert!(
                        face.dot(normals) > 0.0,
                        "side {side} triangle {k} faces inward (texcoords {texcoords})"
                    );
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn side_strip_past_end_panics() {
        Torus::new(4, 4, 0.5).side_strip(4, false);
    }

    #[test]
    fn undersized_vertex_buffer_panics_without_writing() {
        let t = Torus::new(3, 3, 0.5);
        let layout = VertexLayout::packed(false, true);
        let mut data = vec![9.0; layout.floats_for(t.vertex_count(false))];
        let mut indices = vec![0; t.element_count()];
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            t.fill(&mut VertexViewMut::new(&mut data, layout), &mut indices);
        }));
        assert!(result.is_err());
        assert!(data.iter().all(|&f| f == 9.0));
        assert!(indices.iter().all(|&i| i == 0));
    }
}
