use thiserror::Error;

use crate::core::material::{MaterialMap, MaterialTable};
use crate::core::shared::{Face, Rgba, Vec2, Vec3, Warning};
use super::Mesh;

/// Assembles one [Mesh] out of the triangle blocks of a geometry. Faces,
/// material tags, and corner channels are appended block by block; the
/// position table is set once, by the first successfully decoded block.
pub struct MeshBuilder {
    name: String,
    position_source: Option<String>,
    positions: Vec<Vec3>,
    faces: Vec<Face>,
    face_tags: Vec<Option<String>>,
    corner_normals: Vec<Vec3>,
    corner_colors: Vec<Rgba>,
    corner_uvs: Vec<Vec2>,
}

impl MeshBuilder {
    pub fn new(name: String) -> Self {
        Self {
            name,
            position_source: None,
            positions: Vec::new(),
            faces: Vec::new(),
            face_tags: Vec::new(),
            corner_normals: Vec::new(),
            corner_colors: Vec::new(),
            corner_uvs: Vec::new(),
        }
    }

    /// Identifier of the source the position table came from, once set.
    pub fn position_source(&self) -> Option<&str> {
        self.position_source.as_deref()
    }

    pub fn set_positions(&mut self, source: &str, rows: Vec<Vec3>) {
        self.position_source = Some(source.to_owned());
        self.positions = rows;
    }

    /// Appends one decoded triangle block. The corner arrays must each hold
    /// either no entries or three entries per face of `faces`.
    pub fn append_block(
        &mut self,
        faces: Vec<Face>,
        tag: Option<String>,
        normals: Vec<Vec3>,
        colors: Vec<Rgba>,
        uvs: Vec<Vec2>,
    ) {
        self.face_tags
            .extend(std::iter::repeat(tag).take(faces.len()));
        self.faces.extend(faces);
        self.corner_normals.extend(normals);
        self.corner_colors.extend(colors);
        self.corner_uvs.extend(uvs);
    }

    /// Freezes the mesh. Verifies the position table and face list are
    /// non-empty and compatible, then gates every corner channel on the
    /// three-entries-per-face invariant: a misaligned channel is dropped
    /// wholesale (with a warning) rather than attached misaligned.
    pub fn build(
        mut self,
        textures: &MaterialMap,
        warnings: &mut Vec<Warning>,
    ) -> Result<Mesh, Err> {
        if self.positions.is_empty() {
            return Err(Err::NoPositions);
        }
        if self.faces.is_empty() {
            return Err(Err::NoFaces);
        }

        let max_index = self
            .faces
            .iter()
            .flat_map(|face| face.iter())
            .copied()
            .max()
            .unwrap_or(0);
        if max_index >= self.positions.len() {
            return Err(Err::FaceIndexOutOfRange(max_index, self.positions.len()));
        }

        let expected = self.faces.len() * 3;
        drop_if_misaligned(&mut self.corner_normals, expected, "normal", warnings);
        drop_if_misaligned(&mut self.corner_colors, expected, "color", warnings);
        drop_if_misaligned(&mut self.corner_uvs, expected, "uv", warnings);

        let table = MaterialTable::from_tags(
            self.face_tags.iter().flatten().map(String::as_str),
            textures,
        );
        let face_materials = self
            .face_tags
            .iter()
            .map(|tag| tag.as_deref().and_then(|tag| table.index_of(tag)))
            .collect();

        Ok(Mesh {
            name: self.name,
            positions: self.positions,
            faces: self.faces,
            corner_normals: self.corner_normals,
            corner_colors: self.corner_colors,
            corner_uvs: self.corner_uvs,
            material_labels: table.into_labels(),
            face_materials,
        })
    }
}

fn drop_if_misaligned<T>(
    channel: &mut Vec<T>,
    expected: usize,
    name: &'static str,
    warnings: &mut Vec<Warning>,
) {
    if !channel.is_empty() && channel.len() != expected {
        warnings.push(Warning::MisalignedCornerChannel {
            channel: name,
            len: channel.len(),
            expected,
        });
        channel.clear();
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("the faces reference position row {0} but the position table has only {1} rows")]
    FaceIndexOutOfRange(usize, usize),

    #[error("no faces survived decoding")]
    NoFaces,

    #[error("the position table is empty")]
    NoPositions,
}
