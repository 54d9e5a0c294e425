use std::collections::HashMap;

use xmltree::Element;

use super::xml::{self, Ns};

/// Resolves every `<vertices>` pool of a mesh to the source id of its
/// POSITION input. A pool with several POSITION inputs keeps the last one
/// in document order; a pool without one stays absent, which consumers
/// treat as a missing-position failure at block-decode time.
pub(crate) fn vertex_pools(mesh_el: &Element, ns: &Ns) -> HashMap<String, String> {
    let mut pools = HashMap::new();
    for pool in xml::children(mesh_el, ns, "vertices") {
        let Some(pool_id) = pool.attributes.get("id") else {
            continue;
        };
        for input in xml::children(pool, ns, "input") {
            if input.attributes.get("semantic").map(String::as_str) != Some("POSITION") {
                continue;
            }
            if let Some(source) = input.attributes.get("source") {
                pools.insert(pool_id.clone(), xml::strip_ref(source).to_owned());
            }
        }
    }
    pools
}
