use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Document-wide join of material identifiers to texture references, built
/// once by the material resolver and passed into the mesh assembler. A
/// material missing any link of the chain is simply absent; consumers fall
/// back to the material identifier itself.
#[derive(Clone, Debug, Default)]
pub struct MaterialMap {
    textures: HashMap<String, String>,
}

impl MaterialMap {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, material_id: String, texture: String) {
        self.textures.insert(material_id, texture);
    }

    pub fn get_texture(&self, material_id: &str) -> Option<&str> {
        self.textures.get(material_id).map(String::as_str)
    }

    /// Display label for a material tag: the texture base name with its
    /// extension stripped, or the tag itself when unresolved.
    pub fn label_for(&self, tag: &str) -> String {
        match self.textures.get(tag) {
            Some(texture) => texture_stem(texture).to_owned(),
            None => tag.to_owned(),
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn texture_stem(texture: &str) -> &str {
    Path::new(texture)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(texture)
}

/// Stable table of the distinct material tags of one geometry, ordered
/// lexicographically so repeated imports assign identical indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialTable {
    labels: Vec<String>,
    tags: Vec<String>,
}

impl MaterialTable {
    pub fn from_tags<'a, I>(tags: I, textures: &MaterialMap) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = tags.into_iter().collect();
        let tags: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
        let labels = tags.iter().map(|tag| textures.label_for(tag)).collect();
        Self { labels, tags }
    }

    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)).ok()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
