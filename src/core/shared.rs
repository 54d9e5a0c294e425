use serde::Serialize;

/// A 3-component vector value (position or normal).
pub type Vec3 = [f32; 3];

/// A 2-component vector value (texture coordinate).
pub type Vec2 = [f32; 2];

/// An RGBA color value.
pub type Rgba = [f32; 4];

/// One face as a triple of position-table row indices. The indices are the
/// raw source rows; they are not renumbered, so unused rows leave gaps.
pub type Face = [usize; 3];

/// Substituted for a normal whose index points outside its source.
pub const FALLBACK_NORMAL: Vec3 = [0.0, 0.0, 1.0];

/// Substituted for a color whose index points outside its source, or whose
/// tuple is neither 3 nor 4 components wide. Opaque white.
pub const FALLBACK_COLOR: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Substituted for a texture coordinate whose index points outside its source.
pub const FALLBACK_UV: Vec2 = [0.0, 0.0];

/// Types implementing this trait are configuration objects.
pub trait ConfigType {
    /// Returns the natural default configuration.
    fn default() -> Self;
}

/// Result of one decode stage. Lower stages never abort the import on their
/// own; they either complete, complete with recovered data-shape warnings,
/// or fail with a reason the driver can report.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeOutcome<T> {
    Complete(T),
    Partial(T, Vec<Warning>),
    Failed(SkipReason),
}

impl<T> DecodeOutcome<T> {
    /// Moves any warnings into `warnings` and hands back either the decoded
    /// value or the skip reason.
    pub fn unpack(self, warnings: &mut Vec<Warning>) -> Result<T, SkipReason> {
        match self {
            DecodeOutcome::Complete(value) => Ok(value),
            DecodeOutcome::Partial(value, mut ws) => {
                warnings.append(&mut ws);
                Ok(value)
            }
            DecodeOutcome::Failed(reason) => Err(reason),
        }
    }

    /// Like [DecodeOutcome::unpack], but a failed stage degrades to
    /// `fallback` after logging the reason.
    pub(crate) fn recover_or(self, fallback: T, warnings: &mut Vec<Warning>) -> T {
        match self.unpack(warnings) {
            Ok(value) => value,
            Err(reason) => {
                log::warn!("recovered decode failure: {reason}");
                fallback
            }
        }
    }
}

/// A recovered data-shape problem. Decoding continued past every one of
/// these, via prefix truncation or fallback substitution.
#[remain::sorted]
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize)]
pub enum Warning {
    #[error("corner {channel} array has {len} entries, faces need {expected}; channel dropped")]
    MisalignedCornerChannel {
        channel: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("triangle block references position source '{other}' but the geometry already uses '{first}'; block skipped")]
    MixedPositionSources { first: String, other: String },

    #[error("index stream ends early: expected {expected} indices, found {actual}")]
    ShortIndexStream { expected: usize, actual: usize },

    #[error("no input is bound to offset {offset}")]
    UnboundOffset { offset: usize },

    #[error("float array of source '{source}' holds a non-numeric token; source treated as empty")]
    UnparsableFloatArray { r#source: String },

    #[error("index stream holds a non-numeric token; stream truncated at the bad token")]
    UnparsableIndexStream,
}

/// Why one geometry (or one of its triangle blocks) produced no output.
/// Never fatal by itself; the driver aborts only when every geometry of the
/// document is skipped.
#[remain::sorted]
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize)]
pub enum SkipReason {
    #[error("position source '{source}' is missing, empty, or too narrow for points")]
    EmptyPositionSource { r#source: String },

    #[error("faces reference position row {index} but the position table has {rows} rows")]
    FaceIndexOutOfRange { index: usize, rows: usize },

    #[error("vertex pool '{pool}' has no POSITION input")]
    MissingPositionSource { pool: String },

    #[error("triangle block has no VERTEX input")]
    MissingVertexInput,

    #[error("geometry has no mesh element")]
    NoMeshNode,

    #[error("no valid faces survived decoding")]
    NoValidFaces,

    #[error("input offsets leave offset {offset} unbound")]
    SparseOffsets { offset: usize },
}
