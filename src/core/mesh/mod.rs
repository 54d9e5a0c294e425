pub mod builder;

use crate::core::shared::{Face, Rgba, Vec2, Vec3};

/// Represents one decoded triangle mesh. It consists of the position table,
/// a list of faces indexing into it, and the optional per-corner attribute
/// arrays. A populated corner array always holds exactly three entries per
/// face; an absent channel is an empty array. Frozen once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub(crate) name: String,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) faces: Vec<Face>,
    pub(crate) corner_normals: Vec<Vec3>,
    pub(crate) corner_colors: Vec<Rgba>,
    pub(crate) corner_uvs: Vec<Vec2>,
    pub(crate) material_labels: Vec<String>,
    pub(crate) face_materials: Vec<Option<usize>>,
}

impl Mesh {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn get_faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn get_corner_normals(&self) -> &[Vec3] {
        &self.corner_normals
    }

    pub fn get_corner_colors(&self) -> &[Rgba] {
        &self.corner_colors
    }

    pub fn get_corner_uvs(&self) -> &[Vec2] {
        &self.corner_uvs
    }

    /// Distinct material tags of this mesh resolved to display labels, in
    /// lexicographic tag order.
    pub fn get_material_labels(&self) -> &[String] {
        &self.material_labels
    }

    /// One entry per face: index into [Mesh::get_material_labels], or `None`
    /// for faces whose triangle block carried no material tag.
    pub fn get_face_materials(&self) -> &[Option<usize>] {
        &self.face_materials
    }
}
