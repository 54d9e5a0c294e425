// lib.rs

/// Contains the interface between the decoded `Mesh` object and the host
/// scene graph.
pub mod io;

/// Defines the document decoder.
pub mod decode;

/// Contains the shared definitions and native objects.
pub mod core;

pub use crate::core::mesh::Mesh;

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::mesh::{builder::MeshBuilder, Mesh};
    pub use crate::core::material::{MaterialMap, MaterialTable};
    pub use crate::core::shared::{ConfigType, DecodeOutcome, SkipReason, Warning};
    pub use crate::decode::{self, decode_file, decode_str, Summary};
    pub use crate::io::sink::MeshSink;
}
