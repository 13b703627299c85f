//! # Cylinder — Two Disks and a Ruled Side
//!
//! The cylinder has radius 1 and height 2, centred on the origin, with the Y
//! axis as its centre line. It is made of three regions, each generated into
//! its own contiguous block of both buffers:
//!
//! ```text
//! vertices:  [ bottom disk | top disk | side (+ seam column) ]
//! indices:   [ bottom disk | top disk | side ]
//! ```
//!
//! ## Disk Numbering
//!
//! Vertex 0 of a disk is its centre. The rest are numbered slice-major,
//! ring-minor: slice `i`, ring `j` (`1..=rings`, innermost first) is vertex
//! `i * rings + j`. The bottom and top disks use identical numbering, the top
//! one offset by [`disk_vertex_count`](Cylinder::disk_vertex_count). Each
//! slice contributes one fan triangle to the centre and then two triangles
//! per step outward, so a single ring is a plain fan.
//!
//! Disks never duplicate a seam: their texture coordinates are a planar
//! projection `((x+1)/2, (1-z)/2)`, which is continuous all the way round.
//! The bottom disk mirrors `s` so the texture reads correctly from below.
//!
//! ## Side Numbering
//!
//! Side vertices start after both disks and run slice-major, stack-minor:
//! slice `i`, stack `j` is `i * (stacks + 1) + j`. With texture coordinates
//! there is one extra slice column at `i = slices`, sitting on top of column
//! 0 but with `s = 1`.
//!
//! ## Angles
//!
//! Slice 0 lies on the negative Z axis and slices advance counter-clockwise
//! seen from above, so texture `s` increases going round the outside from
//! left to right.

use log::{debug, trace};

use crate::geometry::{IndexRange, IndexWriter, MeshGeometry, check_capacity};
use crate::math::{Vec2, Vec3, fraction, loop_direction};
use crate::resolution::{BufferState, CylinderResolution};
use crate::vertex::VertexViewMut;

/// A capped cylinder generator.
///
/// Not `Clone`: one instance stands for one set of buffers the caller has
/// uploaded somewhere, and tracks whether they are still current.
#[derive(Debug)]
pub struct Cylinder {
    resolution: CylinderResolution,
    state: BufferState,
}

impl Cylinder {
    /// Create a cylinder, clamping each count into range.
    pub fn new(slices: u32, stacks: u32, rings: u32) -> Self {
        Self::from_resolution(CylinderResolution::new(slices, stacks, rings))
    }

    pub fn from_resolution(resolution: CylinderResolution) -> Self {
        let clamped = resolution.clamped();
        if clamped != resolution {
            debug!("cylinder resolution {resolution:?} clamped to {clamped:?}");
        }
        Self {
            resolution: clamped,
            state: BufferState::Stale,
        }
    }

    /// Change resolution. Returns `false` (and leaves the buffer state alone)
    /// when the requested values equal the current ones. Anything else is
    /// clamped, committed and marks the buffers stale.
    pub fn remesh(&mut self, slices: u32, stacks: u32, rings: u32) -> bool {
        let requested = CylinderResolution::new(slices, stacks, rings);
        if requested == self.resolution {
            return false;
        }
        let next = requested.clamped();
        if next != requested {
            debug!("cylinder resolution {requested:?} clamped to {next:?}");
        }
        debug!("cylinder remesh {:?} -> {next:?}", self.resolution);
        self.resolution = next;
        self.state = BufferState::Stale;
        true
    }

    pub fn resolution(&self) -> CylinderResolution {
        self.resolution
    }

    pub fn slices(&self) -> u32 {
        self.resolution.slices
    }

    pub fn stacks(&self) -> u32 {
        self.resolution.stacks
    }

    pub fn rings(&self) -> u32 {
        self.resolution.rings
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Whether previously filled buffers are out of date.
    pub fn needs_refresh(&self) -> bool {
        self.state.is_stale()
    }

    /// Record that buffers were re-filled and uploaded.
    pub fn acknowledge_upload(&mut self) {
        self.state = BufferState::Fresh;
    }

    // ── Counts ───────────────────────────────────────────────────────────

    /// Vertices in one disk, centre included.
    pub fn disk_vertex_count(&self) -> usize {
        let CylinderResolution { slices, rings, .. } = self.resolution;
        1 + (rings * slices) as usize
    }

    pub fn side_vertex_count(&self, texcoords: bool) -> usize {
        let CylinderResolution { slices, stacks, .. } = self.resolution;
        let columns = if texcoords { slices + 1 } else { slices };
        ((stacks + 1) * columns) as usize
    }

    /// Indices in one disk: a fan triangle plus `rings - 1` quads per slice.
    pub fn disk_element_count(&self) -> usize {
        let CylinderResolution { slices, rings, .. } = self.resolution;
        (3 * (2 * rings - 1) * slices) as usize
    }

    pub fn side_element_count(&self) -> usize {
        let CylinderResolution { slices, stacks, .. } = self.resolution;
        (6 * stacks * slices) as usize
    }

    // ── Sub-meshes ───────────────────────────────────────────────────────

    /// The bottom disk (y = -1), first block of the index buffer.
    pub fn base_range(&self) -> IndexRange {
        IndexRange::new(0, self.disk_element_count())
    }

    /// The top disk (y = +1), second block.
    pub fn top_range(&self) -> IndexRange {
        let n = self.disk_element_count();
        IndexRange::new(n, n)
    }

    /// The side, everything after the two disks.
    pub fn side_range(&self) -> IndexRange {
        IndexRange::new(2 * self.disk_element_count(), self.side_element_count())
    }

    pub fn full_range(&self) -> IndexRange {
        IndexRange::new(0, self.element_count())
    }

    /// The three disk and side blocks, named, in buffer order.
    pub fn submeshes(&self) -> Vec<(String, IndexRange)> {
        vec![
            ("base".to_string(), self.base_range()),
            ("top".to_string(), self.top_range()),
            ("side".to_string(), self.side_range()),
        ]
    }

    // ── Fill helpers ─────────────────────────────────────────────────────

    /// Write bottom vertex `index` and its top twin at planar `(x, z)`.
    fn write_disk_pair(&self, out: &mut VertexViewMut<'_>, index: usize, x: f32, z: f32) {
        let top = index + self.disk_vertex_count();
        let s = 0.5 * (x + 1.0);
        let t = 0.5 * (1.0 - z);
        out.write(index, Vec3::new(x, -1.0, z), Vec3::NEG_Y, Vec2::new(1.0 - s, t));
        out.write(top, Vec3::new(x, 1.0, z), Vec3::Y, Vec2::new(s, t));
    }

    fn write_disk_indices(&self, out: &mut IndexWriter<'_>) {
        let CylinderResolution { slices, rings, .. } = self.resolution;

        // Bottom, wound to face -Y.
        for i in 0..slices {
            let cur = i * rings + 1;
            let next = ((i + 1) % slices) * rings + 1;
            out.triangle(0, next, cur);
            for j in 0..rings - 1 {
                out.triangle(cur + j, next + j, next + j + 1);
                out.triangle(cur + j, next + j + 1, cur + j + 1);
            }
        }

        // Top, wound to face +Y.
        let base = self.disk_vertex_count() as u32;
        for i in 0..slices {
            let cur = base + i * rings + 1;
            let next = base + ((i + 1) % slices) * rings + 1;
            out.triangle(base, cur, next);
            for j in 0..rings - 1 {
                out.triangle(next + j, cur + j, cur + j + 1);
                out.triangle(next + j, cur + j + 1, next + j + 1);
            }
        }
    }

    fn write_side_indices(&self, out: &mut IndexWriter<'_>, texcoords: bool) {
        let CylinderResolution { slices, stacks, .. } = self.resolution;
        let base = 2 * self.disk_vertex_count() as u32;
        for i in 0..slices {
            let next_slice = if texcoords { i + 1 } else { (i + 1) % slices };
            let cur = base + i * (stacks + 1);
            let next = base + next_slice * (stacks + 1);
            for j in 0..stacks {
                out.triangle(next + j, cur + j + 1, cur + j);
                out.triangle(next + j, next + j + 1, cur + j + 1);
            }
        }
    }
}

impl Default for Cylinder {
    fn default() -> Self {
        Self::from_resolution(CylinderResolution::default())
    }
}

impl MeshGeometry for Cylinder {
    fn vertex_count(&self, texcoords: bool) -> usize {
        2 * self.disk_vertex_count() + self.side_vertex_count(texcoords)
    }

    fn element_count(&self) -> usize {
        2 * self.disk_element_count() + self.side_element_count()
    }

    fn fill(&self, vertices: &mut VertexViewMut<'_>, indices: &mut [u32]) {
        let texcoords = vertices.layout().has_texcoords();
        let vertex_count = self.vertex_count(texcoords);
        let element_count = self.element_count();
        check_capacity("cylinder", vertices, indices, vertex_count, element_count);
        trace!(
            "cylinder fill {:?}: {vertex_count} vertices, {element_count} indices, layout {:?}",
            self.resolution,
            vertices.layout()
        );

        let CylinderResolution { slices, stacks, rings } = self.resolution;
        let side_base = 2 * self.disk_vertex_count();

        self.write_disk_pair(vertices, 0, 0.0, 0.0);

        let columns = if texcoords { slices + 1 } else { slices };
        for i in 0..columns {
            let (x, z) = loop_direction(i, slices);

            if i < slices {
                for j in 1..=rings {
                    let r = fraction(j, rings);
                    self.write_disk_pair(vertices, (i * rings + j) as usize, x * r, z * r);
                }
            }

            let s = fraction(i, slices);
            let column = side_base + (i * (stacks + 1)) as usize;
            for j in 0..=stacks {
                let t = fraction(j, stacks);
                vertices.write(
                    column + j as usize,
                    Vec3::new(x, -1.0 + 2.0 * t, z),
                    Vec3::new(x, 0.0, z),
                    Vec2::new(s, t),
                );
            }
        }

        let mut out = IndexWriter::new(indices);
        self.write_disk_indices(&mut out);
        self.write_side_indices(&mut out, texcoords);
        debug_assert_eq!(out.len(), element_count);
        trace!("cylinder fill done: {} indices written", out.len());
    }
}
