//! # Lathe — Parametric Cylinder and Torus Meshes
//!
//! Generates triangle-list meshes for a capped cylinder and a torus into
//! caller-owned interleaved vertex buffers and `u32` index buffers.
//!
//! The usual sequence: create a generator, ask it for counts, size storage,
//! fill, upload, then [`acknowledge_upload`](cylinder::Cylinder::acknowledge_upload).
//! After a [`remesh`](torus::Torus::remesh) the generator reports itself
//! stale until the next acknowledgement.
//!
//! ```ignore
//! use lathe::prelude::*;
//!
//! let mut torus = Torus::new(24, 12, 0.3);
//! let buffers = torus.build(VertexLayout::packed(true, true));
//! upload(buffers.vertex_bytes(), buffers.index_bytes());
//! torus.acknowledge_upload();
//! ```
//!
//! Start with `use lathe::prelude::*`.

pub mod buffers;
pub mod cylinder;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod math;
pub mod prelude;
pub mod resolution;
pub mod shape;
pub mod torus;
pub mod validate;
pub mod vertex;

#[cfg(feature = "config")]
pub mod config;
