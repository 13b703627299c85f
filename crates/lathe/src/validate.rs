//! Sanity checks over filled buffers.
//!
//! [`check_mesh`] walks every triangle once and counts anything a renderer
//! would trip over. A clean report means every index is in range, every
//! triangle has area, every vertex is used, and (when the layout carries
//! normals) normals are unit length and agree with the winding.

use crate::buffers::MeshBuffers;

const NORMAL_TOLERANCE: f32 = 1e-4;
const MIN_DOUBLE_AREA: f32 = 1e-12;

/// Counts of problems found by [`check_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshReport {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Indices `>= vertex_count`.
    pub out_of_range: usize,
    /// Triangles with a repeated index or zero area.
    pub degenerate: usize,
    /// Vertices no triangle refers to.
    pub unreferenced: usize,
    /// Normals whose length is off 1 by more than a small tolerance.
    pub non_unit_normals: usize,
    /// Triangles wound against their vertex normals.
    pub inward_faces: usize,
}

impl MeshReport {
    pub fn is_clean(&self) -> bool {
        self.out_of_range == 0
            && self.degenerate == 0
            && self.unreferenced == 0
            && self.non_unit_normals == 0
            && self.inward_faces == 0
    }
}

/// Check `buffers` for out-of-range indices, degenerate or inward triangles,
/// unused vertices and bad normals.
pub fn check_mesh(buffers: &MeshBuffers) -> MeshReport {
    let view = buffers.view();
    let vertex_count = buffers.vertex_count();
    let mut report = MeshReport {
        vertex_count,
        ..MeshReport::default()
    };
    let mut referenced = vec![false; vertex_count];

    for tri in buffers.triangles() {
        report.triangle_count += 1;
        if tri.iter().any(|&i| i as usize >= vertex_count) {
            report.out_of_range += 1;
            continue;
        }
        for &i in &tri {
            referenced[i as usize] = true;
        }
        let [a, b, c] = tri.map(|i| i as usize);
        if a == b || b == c || a == c {
            report.degenerate += 1;
            continue;
        }

        let (pa, pb, pc) = (view.position(a), view.position(b), view.position(c));
        let face = (pb - pa).cross(pc - pa);
        if face.length() <= MIN_DOUBLE_AREA {
            report.degenerate += 1;
            continue;
        }
        if let (Some(na), Some(nb), Some(nc)) = (view.normal(a), view.normal(b), view.normal(c)) {
            if face.dot(na + nb + nc) <= 0.0 {
                report.inward_faces += 1;
            }
        }
    }

    report.unreferenced = referenced.iter().filter(|&&r| !r).count();
    if buffers.layout().has_normals() {
        report.non_unit_normals = (0..vertex_count)
            .filter_map(|i| view.normal(i))
            .filter(|n| (n.length() - 1.0).abs() > NORMAL_TOLERANCE)
            .count();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cylinder::Cylinder;
    use crate::geometry::MeshGeometry;
    use crate::layout::VertexLayout;
    use crate::torus::Torus;
    use crate::vertex::VertexViewMut;

    #[test]
    fn generated_meshes_are_clean() {
        let report = check_mesh(&Torus::default().build(VertexLayout::default()));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.triangle_count, 128);
        assert_eq!(report.vertex_count, 81);

        let report = check_mesh(&Cylinder::default().build(VertexLayout::default()));
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn flipped_triangles_are_reported_inward() {
        let cylinder = Cylinder::new(6, 1, 1);
        let mut buffers = MeshBuffers::empty(VertexLayout::packed(true, false));
        buffers.refill(&cylinder);
        assert!(check_mesh(&buffers).is_clean());

        buffers.refill(&Flipped(&cylinder));
        let report = check_mesh(&buffers);
        assert_eq!(report.inward_faces, report.triangle_count);
        assert_eq!(report.degenerate, 0);
    }

    /// Fills like the wrapped generator, then reverses every triangle.
    struct Flipped<'a>(&'a Cylinder);

    impl MeshGeometry for Flipped<'_> {
        fn vertex_count(&self, texcoords: bool) -> usize {
            self.0.vertex_count(texcoords)
        }

        fn element_count(&self) -> usize {
            self.0.element_count()
        }

        fn fill(&self, vertices: &mut VertexViewMut<'_>, indices: &mut [u32]) {
            self.0.fill(vertices, indices);
            for tri in indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }
    }

    #[test]
    fn unfilled_buffers_are_degenerate() {
        struct Zeros;

        impl MeshGeometry for Zeros {
            fn vertex_count(&self, _: bool) -> usize {
                4
            }

            fn element_count(&self) -> usize {
                6
            }

            fn fill(&self, _: &mut VertexViewMut<'_>, indices: &mut [u32]) {
                indices[..6].copy_from_slice(&[0, 1, 2, 0, 0, 9]);
            }
        }

        let report = check_mesh(&Zeros.build(VertexLayout::packed(true, false)));
        assert_eq!(report.triangle_count, 2);
        // All positions are zero, so the first triangle has no area.
        assert_eq!(report.degenerate, 1);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.unreferenced, 1);
        // Zero normals aren't unit length.
        assert_eq!(report.non_unit_normals, 4);
        assert!(!report.is_clean());
    }
}
