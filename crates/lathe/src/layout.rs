//! # Layout — Where Each Attribute Lives in a Vertex Record
//!
//! The generators never allocate vertex storage. The caller hands them a flat
//! `f32` buffer plus a [`VertexLayout`] describing one *record*: how many
//! floats it spans (the stride) and at which float offset the position,
//! normal and texture coordinate start.
//!
//! ```text
//! stride = 10, position = 0, normal = 3, texcoord = 8
//! ┌──────────────┬──────────────┬────────────┬──────────┐
//! │ position     │ normal       │ caller's   │ texcoord │
//! │ [f32; 3]     │ [f32; 3]     │ own data   │ [f32; 2] │
//! │ offset 0     │ offset 3     │ 6..8       │ offset 8 │
//! └──────────────┴──────────────┴────────────┴──────────┘
//! ```
//!
//! Floats the layout does not mention are never written, which lets callers
//! interleave their own per-vertex data with the generated attributes.
//!
//! ## Optional Attributes
//!
//! Normals and texture coordinates are optional. Omitting texture coordinates
//! also changes the mesh itself: with texcoords present, every seam gets a
//! duplicated loop of vertices so `u = 1.0` never has to share a vertex with
//! `u = 0.0`. See [`MeshGeometry::vertex_count`](crate::geometry::MeshGeometry::vertex_count).
//!
//! ## Validation
//!
//! A `VertexLayout` can only be built through [`VertexLayout::new`] (or the
//! raw-offset variant), which rejects a zero stride, fields that spill past the
//! stride, and fields that overlap. Once you hold a layout it is valid.

use std::fmt;

/// One of the attributes a generator can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Normal,
    TexCoord,
}

impl Attribute {
    /// Number of `f32` components.
    pub const fn components(self) -> usize {
        match self {
            Attribute::Position | Attribute::Normal => 3,
            Attribute::TexCoord => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::TexCoord => "texcoord",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Reasons a layout description is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The record stride was zero.
    ZeroStride,
    /// A raw position offset was negative (the position is never optional).
    NegativePosition(i32),
    /// An attribute does not fit inside one record.
    OutOfStride {
        attribute: Attribute,
        offset: usize,
        stride: usize,
    },
    /// Two attributes share at least one float.
    Overlap { first: Attribute, second: Attribute },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ZeroStride => write!(f, "vertex stride must be positive"),
            LayoutError::NegativePosition(offset) => {
                write!(f, "position offset must be non-negative, got {offset}")
            }
            LayoutError::OutOfStride { attribute, offset, stride } => write!(
                f,
                "{attribute} at offset {offset} needs {} floats but the stride is {stride}",
                attribute.components()
            ),
            LayoutError::Overlap { first, second } => {
                write!(f, "{first} and {second} overlap within the vertex record")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

// ── VertexLayout ────────────────────────────────────────────────────────

/// Float offsets of each attribute within one interleaved vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub(crate) position: usize,
    pub(crate) normal: Option<usize>,
    pub(crate) texcoord: Option<usize>,
    pub(crate) stride: usize,
}

impl VertexLayout {
    /// Build a layout, checking that every field fits and nothing overlaps.
    pub fn new(
        position: usize,
        normal: Option<usize>,
        texcoord: Option<usize>,
        stride: usize,
    ) -> Result<Self, LayoutError> {
        if stride == 0 {
            return Err(LayoutError::ZeroStride);
        }
        let layout = Self { position, normal, texcoord, stride };

        let fields: Vec<(Attribute, usize)> = layout.attributes().collect();
        for &(attribute, offset) in &fields {
            if offset + attribute.components() > stride {
                return Err(LayoutError::OutOfStride { attribute, offset, stride });
            }
        }
        for (i, &(first, a)) in fields.iter().enumerate() {
            for &(second, b) in &fields[i + 1..] {
                if a < b + second.components() && b < a + first.components() {
                    return Err(LayoutError::Overlap { first, second });
                }
            }
        }
        Ok(layout)
    }

    /// Build a layout from C-style offsets where a negative normal or texcoord
    /// offset means "omit this attribute".
    pub fn from_raw_offsets(
        position: i32,
        normal: i32,
        texcoord: i32,
        stride: u32,
    ) -> Result<Self, LayoutError> {
        let position =
            usize::try_from(position).map_err(|_| LayoutError::NegativePosition(position))?;
        Self::new(
            position,
            usize::try_from(normal).ok(),
            usize::try_from(texcoord).ok(),
            stride as usize,
        )
    }

    /// A tightly packed layout: position, then normal, then texcoord, with
    /// no gaps and nothing else in the record.
    pub const fn packed(normals: bool, texcoords: bool) -> Self {
        let normal = if normals { Some(3) } else { None };
        let texcoord = if texcoords {
            Some(if normals { 6 } else { 3 })
        } else {
            None
        };
        let stride = 3 + if normals { 3 } else { 0 } + if texcoords { 2 } else { 0 };
        Self { position: 0, normal, texcoord, stride }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn normal(&self) -> Option<usize> {
        self.normal
    }

    pub fn texcoord(&self) -> Option<usize> {
        self.texcoord
    }

    /// Floats per vertex record.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per vertex record, for the GPU's `array_stride`.
    pub fn byte_stride(&self) -> usize {
        self.stride * std::mem::size_of::<f32>()
    }

    pub fn has_normals(&self) -> bool {
        self.normal.is_some()
    }

    /// Whether texture coordinates are written, which also switches the
    /// generators into seam-duplicating mode.
    pub fn has_texcoords(&self) -> bool {
        self.texcoord.is_some()
    }

    /// Length of a vertex buffer holding `vertex_count` records.
    pub fn floats_for(&self, vertex_count: usize) -> usize {
        self.stride * vertex_count
    }

    /// Present attributes with their float offsets, position first.
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, usize)> + '_ {
        std::iter::once((Attribute::Position, self.position))
            .chain(self.normal.map(|o| (Attribute::Normal, o)))
            .chain(self.texcoord.map(|o| (Attribute::TexCoord, o)))
    }
}

impl Default for VertexLayout {
    /// The [`MeshVertex`](crate::vertex::MeshVertex) layout.
    fn default() -> Self {
        Self::packed(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layouts_have_expected_strides() {
        assert_eq!(VertexLayout::packed(false, false).stride(), 3);
        assert_eq!(VertexLayout::packed(true, false).stride(), 6);
        assert_eq!(VertexLayout::packed(false, true).stride(), 5);
        assert_eq!(VertexLayout::packed(true, true).stride(), 8);
        assert_eq!(VertexLayout::packed(false, true).texcoord(), Some(3));
    }

    #[test]
    fn packed_layouts_pass_validation() {
        for normals in [false, true] {
            for texcoords in [false, true] {
                let p = VertexLayout::packed(normals, texcoords);
                let checked = VertexLayout::new(p.position, p.normal, p.texcoord, p.stride);
                assert_eq!(checked, Ok(p));
            }
        }
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert_eq!(VertexLayout::new(0, None, None, 0), Err(LayoutError::ZeroStride));
    }

    #[test]
    fn field_past_stride_is_rejected() {
        let err = VertexLayout::new(0, Some(3), None, 5).unwrap_err();
        assert_eq!(
            err,
            LayoutError::OutOfStride { attribute: Attribute::Normal, offset: 3, stride: 5 }
        );
    }

    #[test]
    fn overlapping_fields_are_rejected() {
        let err = VertexLayout::new(0, Some(2), None, 8).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Overlap { first: Attribute::Position, second: Attribute::Normal }
        );
    }

    #[test]
    fn gaps_for_caller_data_are_allowed() {
        let layout = VertexLayout::new(0, Some(3), Some(8), 10).unwrap();
        assert!(layout.has_normals());
        assert!(layout.has_texcoords());
        assert_eq!(layout.byte_stride(), 40);
    }

    #[test]
    fn raw_negative_offsets_mean_omitted() {
        let layout = VertexLayout::from_raw_offsets(0, -1, 3, 5).unwrap();
        assert_eq!(layout.normal(), None);
        assert_eq!(layout.texcoord(), Some(3));
    }

    #[test]
    fn raw_negative_position_is_rejected() {
        assert_eq!(
            VertexLayout::from_raw_offsets(-1, -1, -1, 3),
            Err(LayoutError::NegativePosition(-1))
        );
    }

    #[test]
    fn attributes_lists_present_fields_only() {
        let names: Vec<_> = VertexLayout::packed(false, true).attributes().collect();
        assert_eq!(names, vec![(Attribute::Position, 0), (Attribute::TexCoord, 3)]);
    }
}
