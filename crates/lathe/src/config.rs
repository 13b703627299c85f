//! # Config — Meshes Described in JSON
//!
//! A [`MeshConfig`] names a shape, its resolution, and the vertex layout to
//! fill. It round-trips through JSON with `serde_json`:
//!
//! ```json
//! {
//!   "shape": { "kind": "torus", "rings": 24, "sides": 12, "minor_radius": 0.3 },
//!   "layout": { "position": 0, "normal": 3, "texcoord": 6, "stride": 8 }
//! }
//! ```
//!
//! Any resolution field may be omitted and takes its default. Omitting
//! `layout` gives the packed [`MeshVertex`](crate::vertex::MeshVertex)
//! layout; omitting `normal` or `texcoord` inside it drops that attribute.
//!
//! Resolutions are stored as written and clamped when the shape is
//! instantiated, same as any other remesh request.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cylinder::Cylinder;
use crate::layout::{LayoutError, VertexLayout};
use crate::resolution::{CylinderResolution, TorusResolution};
use crate::shape::Shape;
use crate::torus::Torus;
use crate::vertex::MeshVertex;

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors that can occur loading or saving a mesh config.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The JSON was malformed or didn't match the schema.
    Parse(serde_json::Error),
    /// The layout offsets don't describe a valid record.
    Layout(LayoutError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "mesh config io failed: {e}"),
            ConfigError::Parse(e) => write!(f, "mesh config parse failed: {e}"),
            ConfigError::Layout(e) => write!(f, "mesh config layout invalid: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Layout(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        ConfigError::Layout(e)
    }
}

// ── Shape ───────────────────────────────────────────────────────────────

/// Which shape to build, and at what resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Cylinder(CylinderResolution),
    Torus(TorusResolution),
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig::Cylinder(CylinderResolution::default())
    }
}

impl ShapeConfig {
    pub fn instantiate(&self) -> Shape {
        match *self {
            ShapeConfig::Cylinder(r) => Shape::Cylinder(Cylinder::from_resolution(r)),
            ShapeConfig::Torus(r) => Shape::Torus(Torus::from_resolution(r)),
        }
    }
}

// ── Layout ──────────────────────────────────────────────────────────────

/// Serialized form of a [`VertexLayout`]. Not validated until converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texcoord: Option<usize>,
    pub stride: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        MeshVertex::LAYOUT.into()
    }
}

impl TryFrom<LayoutConfig> for VertexLayout {
    type Error = LayoutError;

    fn try_from(c: LayoutConfig) -> Result<Self, Self::Error> {
        VertexLayout::new(c.position, c.normal, c.texcoord, c.stride)
    }
}

impl From<VertexLayout> for LayoutConfig {
    fn from(layout: VertexLayout) -> Self {
        Self {
            position: layout.position(),
            normal: layout.normal(),
            texcoord: layout.texcoord(),
            stride: layout.stride(),
        }
    }
}

// ── MeshConfig ──────────────────────────────────────────────────────────

/// A shape plus the layout to fill it into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshConfig {
    pub shape: ShapeConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl MeshConfig {
    pub fn new(shape: ShapeConfig, layout: VertexLayout) -> Self {
        Self {
            shape,
            layout: layout.into(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded mesh config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// The validated vertex layout.
    pub fn layout(&self) -> Result<VertexLayout, ConfigError> {
        Ok(VertexLayout::try_from(self.layout)?)
    }

    /// Build the generator. Resolution values are clamped here.
    pub fn instantiate(&self) -> Shape {
        self.shape.instantiate()
    }
}
