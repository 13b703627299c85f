//! Convenience re-exports — `use lathe::prelude::*` for the common items.

pub use crate::buffers::MeshBuffers;
pub use crate::cylinder::Cylinder;
pub use crate::geometry::{IndexRange, MeshGeometry};
pub use crate::layout::{Attribute, LayoutError, VertexLayout};
pub use crate::math::{Vec2, Vec3};
pub use crate::resolution::{BufferState, CylinderResolution, TorusResolution};
pub use crate::shape::Shape;
pub use crate::torus::Torus;
pub use crate::validate::{MeshReport, check_mesh};
pub use crate::vertex::{MeshVertex, VertexView, VertexViewMut};
#[cfg(feature = "config")]
pub use crate::config::{ConfigError, LayoutConfig, MeshConfig, ShapeConfig};
