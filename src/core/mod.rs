pub mod material;
pub mod mesh;
pub mod shared;
