use crate::core::shared::{Face, Rgba, Vec2, Vec3};

/// Rotation about the X axis, in radians, that every sink applies when
/// placing an object: +90 degrees, converting the document's Y-up
/// convention to a Z-up scene. Fixed contract, not a parameter.
pub const UP_AXIS_ROTATION_X: f32 = std::f32::consts::FRAC_PI_2;

/// Destination of decoded meshes. The decoder only ever hands over frozen,
/// internally consistent data: faces index into `positions`, corner arrays
/// are either empty or exactly three entries per face, and
/// `face_materials` parallels the faces with indices into `labels`.
pub trait MeshSink {
    type MeshHandle;
    type ObjectHandle;

    fn create_mesh(
        &mut self,
        name: &str,
        positions: &[Vec3],
        faces: &[Face],
    ) -> Self::MeshHandle;

    fn set_corner_uvs(&mut self, mesh: &Self::MeshHandle, uvs: &[Vec2]);

    fn set_corner_colors(&mut self, mesh: &Self::MeshHandle, colors: &[Rgba]);

    fn set_corner_normals(&mut self, mesh: &Self::MeshHandle, normals: &[Vec3]);

    fn assign_materials(
        &mut self,
        mesh: &Self::MeshHandle,
        labels: &[String],
        face_materials: &[Option<usize>],
    );

    /// Places the finished mesh into the scene, applying the
    /// [UP_AXIS_ROTATION_X] convention.
    fn place_object(&mut self, mesh: Self::MeshHandle, name: &str) -> Self::ObjectHandle;
}

/// An in-memory sink that records every call. Used by the CLI for headless
/// inspection and by the tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub meshes: Vec<RecordedMesh>,
    pub objects: Vec<RecordedObject>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub corner_uvs: Vec<Vec2>,
    pub corner_colors: Vec<Rgba>,
    pub corner_normals: Vec<Vec3>,
    pub material_labels: Vec<String>,
    pub face_materials: Vec<Option<usize>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedObject {
    pub name: String,
    pub mesh: usize,
    pub rotation_x: f32,
}

impl MeshSink for RecordingSink {
    type MeshHandle = usize;
    type ObjectHandle = usize;

    fn create_mesh(&mut self, name: &str, positions: &[Vec3], faces: &[Face]) -> usize {
        self.meshes.push(RecordedMesh {
            name: name.to_owned(),
            positions: positions.to_vec(),
            faces: faces.to_vec(),
            ..RecordedMesh::default()
        });
        self.meshes.len() - 1
    }

    fn set_corner_uvs(&mut self, mesh: &usize, uvs: &[Vec2]) {
        if let Some(recorded) = self.meshes.get_mut(*mesh) {
            recorded.corner_uvs = uvs.to_vec();
        }
    }

    fn set_corner_colors(&mut self, mesh: &usize, colors: &[Rgba]) {
        if let Some(recorded) = self.meshes.get_mut(*mesh) {
            recorded.corner_colors = colors.to_vec();
        }
    }

    fn set_corner_normals(&mut self, mesh: &usize, normals: &[Vec3]) {
        if let Some(recorded) = self.meshes.get_mut(*mesh) {
            recorded.corner_normals = normals.to_vec();
        }
    }

    fn assign_materials(
        &mut self,
        mesh: &usize,
        labels: &[String],
        face_materials: &[Option<usize>],
    ) {
        if let Some(recorded) = self.meshes.get_mut(*mesh) {
            recorded.material_labels = labels.to_vec();
            recorded.face_materials = face_materials.to_vec();
        }
    }

    fn place_object(&mut self, mesh: usize, name: &str) -> usize {
        self.objects.push(RecordedObject {
            name: name.to_owned(),
            mesh,
            rotation_x: UP_AXIS_ROTATION_X,
        });
        self.objects.len() - 1
    }
}
