//! A generator chosen at runtime, e.g. from a config file.

#[cfg(feature = "config")]
use crate::config::ShapeConfig;
use crate::cylinder::Cylinder;
use crate::geometry::{IndexRange, MeshGeometry};
use crate::resolution::BufferState;
use crate::torus::Torus;
use crate::vertex::VertexViewMut;

/// Either generator, dispatching [`MeshGeometry`] to whichever it holds.
#[derive(Debug)]
pub enum Shape {
    Cylinder(Cylinder),
    Torus(Torus),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Cylinder(_) => "cylinder",
            Shape::Torus(_) => "torus",
        }
    }

    pub fn state(&self) -> BufferState {
        match self {
            Shape::Cylinder(c) => c.state(),
            Shape::Torus(t) => t.state(),
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.state().is_stale()
    }

    pub fn acknowledge_upload(&mut self) {
        match self {
            Shape::Cylinder(c) => c.acknowledge_upload(),
            Shape::Torus(t) => t.acknowledge_upload(),
        }
    }

    /// Named index blocks, in buffer order.
    pub fn submeshes(&self) -> Vec<(String, IndexRange)> {
        match self {
            Shape::Cylinder(c) => c.submeshes(),
            Shape::Torus(t) => t.submeshes(),
        }
    }

    /// The current resolution as a config value.
    #[cfg(feature = "config")]
    pub fn config(&self) -> ShapeConfig {
        match self {
            Shape::Cylinder(c) => ShapeConfig::Cylinder(c.resolution()),
            Shape::Torus(t) => ShapeConfig::Torus(t.resolution()),
        }
    }
}

impl From<Cylinder> for Shape {
    fn from(cylinder: Cylinder) -> Self {
        Shape::Cylinder(cylinder)
    }
}

impl From<Torus> for Shape {
    fn from(torus: Torus) -> Self {
        Shape::Torus(torus)
    }
}

impl MeshGeometry for Shape {
    fn vertex_count(&self, texcoords: bool) -> usize {
        match self {
            Shape::Cylinder(c) => c.vertex_count(texcoords),
            Shape::Torus(t) => t.vertex_count(texcoords),
        }
    }

    fn element_count(&self) -> usize {
        match self {
            Shape::Cylinder(c) => c.element_count(),
            Shape::Torus(t) => t.element_count(),
        }
    }

    fn fill(&self, vertices: &mut VertexViewMut<'_>, indices: &mut [u32]) {
        match self {
            Shape::Cylinder(c) => c.fill(vertices, indices),
            Shape::Torus(t) => t.fill(vertices, indices),
        }
    }
}
