use std::collections::HashMap;

use xmltree::Element;

use crate::core::shared::{
    DecodeOutcome, Face, Rgba, SkipReason, Vec2, Vec3, Warning, FALLBACK_COLOR, FALLBACK_NORMAL,
    FALLBACK_UV,
};
use super::source::Source;
use super::xml::{self, Ns};
use super::Config;

/// One interleaved channel of a triangle block's packed index stream.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InputBinding {
    pub offset: usize,
    pub semantic: String,
    pub source: String,
    pub set: Option<String>,
}

/// One `<triangles>` run: a declared triangle count, the ordered input
/// bindings, the packed index stream, and an optional material tag shared
/// by every triangle of the run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TriangleBlock {
    pub count: usize,
    pub inputs: Vec<InputBinding>,
    pub indices: Vec<usize>,
    pub material: Option<String>,
}

/// Per-corner data recovered from one triangle block. A channel the block
/// did not bind stays empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TriangleRun {
    pub position_source: String,
    pub material: Option<String>,
    pub faces: Vec<Face>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Rgba>,
    pub uvs: Vec<Vec2>,
}

/// Parses one `<triangles>` element into its tagged form. Blocks without
/// index data are not an error; they decode to nothing and return `None`.
/// A non-numeric index token truncates the stream at the bad token.
pub(crate) fn parse_block(
    tri_el: &Element,
    ns: &Ns,
    warnings: &mut Vec<Warning>,
) -> Option<TriangleBlock> {
    let text = xml::child(tri_el, ns, "p").and_then(Element::get_text)?;

    let mut indices = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<usize>() {
            Ok(value) => indices.push(value),
            Err(_) => {
                warnings.push(Warning::UnparsableIndexStream);
                break;
            }
        }
    }

    let count = tri_el
        .attributes
        .get("count")
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0);

    let inputs = tri_el
        .children
        .iter()
        .filter_map(xmltree::XMLNode::as_element)
        .filter(|c| ns.qualifies(c, "input"))
        .filter_map(|input| {
            let semantic = input.attributes.get("semantic")?.clone();
            let source = xml::strip_ref(input.attributes.get("source")?).to_owned();
            let offset = input
                .attributes
                .get("offset")
                .and_then(|o| o.parse::<usize>().ok())
                .unwrap_or(0);
            Some(InputBinding {
                offset,
                semantic,
                source,
                set: input.attributes.get("set").cloned(),
            })
        })
        .collect();

    Some(TriangleBlock {
        count,
        inputs,
        indices,
        material: tri_el.attributes.get("material").cloned(),
    })
}

/// The semantic channels chosen for one block, reduced deterministically
/// over the ordered binding list: the first VERTEX, NORMAL, and COLOR
/// bindings win, and for TEXCOORD a binding with `set="0"` takes the slot
/// over whichever binding came first.
#[derive(Default)]
struct Channels<'a> {
    vertex: Option<&'a InputBinding>,
    normal: Option<&'a InputBinding>,
    color: Option<&'a InputBinding>,
    uv: Option<&'a InputBinding>,
}

fn select_channels(inputs: &[InputBinding]) -> Channels<'_> {
    let mut channels = Channels::default();
    for binding in inputs {
        match binding.semantic.as_str() {
            "VERTEX" => {
                if channels.vertex.is_none() {
                    channels.vertex = Some(binding);
                }
            }
            "NORMAL" => {
                if channels.normal.is_none() {
                    channels.normal = Some(binding);
                }
            }
            "COLOR" => {
                if channels.color.is_none() {
                    channels.color = Some(binding);
                }
            }
            "TEXCOORD" => {
                if channels.uv.is_none() || binding.set.as_deref() == Some("0") {
                    channels.uv = Some(binding);
                }
            }
            _ => {}
        }
    }
    channels
}

/// Decodes one triangle block against the geometry's vertex pools and
/// sources: reconstructs the position-row face triples and the per-corner
/// attribute tuples, dropping degenerate triangles and any triangle whose
/// slot range falls outside the index stream.
pub(crate) fn decode_block(
    block: &TriangleBlock,
    pools: &HashMap<String, String>,
    sources: &HashMap<String, Source>,
    cfg: &Config,
) -> DecodeOutcome<TriangleRun> {
    let mut warnings = Vec::new();

    // interleave stride of the raw stream, not the count of semantics
    let num_inputs = block
        .inputs
        .iter()
        .map(|b| b.offset)
        .max()
        .map_or(1, |max| max + 1);

    let channels = select_channels(&block.inputs);
    let Some(vertex) = channels.vertex else {
        return DecodeOutcome::Failed(SkipReason::MissingVertexInput);
    };
    let Some(position_source) = pools.get(&vertex.source) else {
        return DecodeOutcome::Failed(SkipReason::MissingPositionSource {
            pool: vertex.source.clone(),
        });
    };
    let position_rows = sources
        .get(position_source)
        .map_or(0, |s| if s.stride() < 3 { 0 } else { s.len() });
    if position_rows == 0 {
        return DecodeOutcome::Failed(SkipReason::EmptyPositionSource {
            source: position_source.clone(),
        });
    }

    let mut bound = vec![false; num_inputs];
    for binding in &block.inputs {
        bound[binding.offset] = true;
    }
    if let Some(offset) = bound.iter().position(|&b| !b) {
        if cfg.reject_sparse_offsets {
            return DecodeOutcome::Failed(SkipReason::SparseOffsets { offset });
        }
        warnings.push(Warning::UnboundOffset { offset });
    }

    // a channel is active only when bound to a known, non-empty source
    let lookup = |binding: Option<&InputBinding>| {
        binding.and_then(|b| {
            sources
                .get(&b.source)
                .filter(|s| !s.is_empty())
                .map(|s| (b.offset, s))
        })
    };
    let normal = lookup(channels.normal);
    let color = lookup(channels.color);
    let uv = lookup(channels.uv);

    let expected = block.count * 3 * num_inputs;
    if block.indices.len() < expected {
        warnings.push(Warning::ShortIndexStream {
            expected,
            actual: block.indices.len(),
        });
    }
    // triangles whose slot range fits inside the valid prefix
    let usable = block.indices.len() / (3 * num_inputs);
    let triangles = block.count.min(usable);

    let mut run = TriangleRun {
        position_source: position_source.clone(),
        material: block.material.clone(),
        ..TriangleRun::default()
    };

    for t in 0..triangles {
        let base = t * 3 * num_inputs;
        let mut rows = [0usize; 3];
        for (v, row) in rows.iter_mut().enumerate() {
            *row = block.indices[base + v * num_inputs + vertex.offset];
        }
        // degenerate: fewer than three distinct position rows
        if rows[0] == rows[1] || rows[1] == rows[2] || rows[0] == rows[2] {
            continue;
        }
        run.faces.push(rows);
        for v in 0..3 {
            let slot = base + v * num_inputs;
            if let Some((offset, source)) = normal {
                run.normals.push(normal_at(source, block.indices[slot + offset]));
            }
            if let Some((offset, source)) = color {
                run.colors.push(color_at(source, block.indices[slot + offset]));
            }
            if let Some((offset, source)) = uv {
                run.uvs.push(uv_at(source, block.indices[slot + offset]));
            }
        }
    }

    if warnings.is_empty() {
        DecodeOutcome::Complete(run)
    } else {
        DecodeOutcome::Partial(run, warnings)
    }
}

fn normal_at(source: &Source, row: usize) -> Vec3 {
    match source.tuple(row) {
        Some([x, y, z]) => [*x, *y, *z],
        _ => FALLBACK_NORMAL,
    }
}

fn color_at(source: &Source, row: usize) -> Rgba {
    match source.tuple(row) {
        Some([r, g, b, a]) => [*r, *g, *b, *a],
        // 3-component colors are promoted to opaque alpha
        Some([r, g, b]) => [*r, *g, *b, 1.0],
        _ => FALLBACK_COLOR,
    }
}

fn uv_at(source: &Source, row: usize) -> Vec2 {
    match source.tuple(row) {
        Some(t) if t.len() >= 2 => [t[0], t[1]],
        _ => FALLBACK_UV,
    }
}
