use std::collections::HashMap;

use xmltree::Element;

use crate::core::material::MaterialMap;
use super::xml::{self, Ns};

/// Two-stage join over the whole document: material id → effect id (from
/// the material's first `<instance_effect>` url), then effect id → the
/// first image reference (`<init_from>` text) anywhere beneath the effect.
/// A material or effect missing either link is left out of the map.
pub(crate) fn resolve_materials(root: &Element, ns: &Ns) -> MaterialMap {
    let mut effect_textures: HashMap<&str, String> = HashMap::new();
    for effect in xml::descendants(root, ns, "effect") {
        let Some(effect_id) = effect.attributes.get("id") else {
            continue;
        };
        let Some(init_from) = xml::first_descendant(effect, ns, "init_from") else {
            continue;
        };
        if let Some(texture) = init_from.get_text() {
            let texture = texture.trim();
            if !texture.is_empty() {
                effect_textures
                    .entry(effect_id.as_str())
                    .or_insert_with(|| texture.to_owned());
            }
        }
    }

    let mut map = MaterialMap::new();
    for material in xml::descendants(root, ns, "material") {
        let Some(material_id) = material.attributes.get("id") else {
            continue;
        };
        let Some(instance) = xml::child(material, ns, "instance_effect") else {
            continue;
        };
        let Some(url) = instance.attributes.get("url") else {
            continue;
        };
        if let Some(texture) = effect_textures.get(xml::strip_ref(url)) {
            map.insert(material_id.clone(), texture.clone());
        }
    }
    map
}
