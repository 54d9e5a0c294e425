use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use xmltree::Element;

use crate::core::material::MaterialMap;
use crate::core::mesh::builder::{self, MeshBuilder};
use crate::core::shared::{ConfigType, SkipReason, Warning};
use crate::io::sink::MeshSink;
use crate::Mesh;

mod material;
mod source;
mod triangles;
mod vertices;
pub(crate) mod xml;

use source::Source;

/// Decoder configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// When set, a triangle block whose input offsets leave a gap in
    /// `0..=max_offset` fails instead of decoding with the gap ignored.
    pub reject_sparse_offsets: bool,

    /// Name given to geometries carrying neither a `name` nor an `id`.
    pub fallback_mesh_name: String,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            reject_sparse_offsets: false,
            fallback_mesh_name: "DAE_Mesh".to_owned(),
        }
    }
}

/// The user-visible result of one import: how many geometries reached the
/// sink, which were skipped and why, and every recovered data-shape
/// warning, in document order.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub imported: usize,
    pub skipped: Vec<GeometrySkip>,
    pub warnings: Vec<Warning>,
}

/// One skipped geometry and the reason it produced no output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeometrySkip {
    pub geometry: String,
    pub reason: SkipReason,
}

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("document is not well-formed XML: {0}")]
    MalformedDocument(#[from] xmltree::ParseError),

    #[error("no geometry could be imported ({} skipped)", .skipped.len())]
    NothingImported { skipped: Vec<GeometrySkip> },
}

/// Decodes the document at `path` and writes every successfully decoded
/// geometry into `sink`. Fatal only when the file is unreadable, the XML
/// is malformed, or not a single geometry could be imported; everything
/// below that degrades into the [Summary].
pub fn decode_file<P, S>(path: P, sink: &mut S, cfg: Config) -> Result<Summary, Err>
where
    P: AsRef<Path>,
    S: MeshSink,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Err::Io {
        path: path.to_owned(),
        source,
    })?;
    let root = Element::parse(BufReader::new(file))?;
    decode_root(&root, sink, &cfg)
}

/// Same as [decode_file] for an in-memory document.
pub fn decode_str<S>(doc: &str, sink: &mut S, cfg: Config) -> Result<Summary, Err>
where
    S: MeshSink,
{
    let root = Element::parse(doc.as_bytes())?;
    decode_root(&root, sink, &cfg)
}

fn decode_root<S>(root: &Element, sink: &mut S, cfg: &Config) -> Result<Summary, Err>
where
    S: MeshSink,
{
    let ns = xml::Ns::of_root(root);
    log::debug!("document namespace prefix '{}'", ns.prefix());
    let textures = material::resolve_materials(root, &ns);

    let mut summary = Summary {
        imported: 0,
        skipped: Vec::new(),
        warnings: Vec::new(),
    };

    // geometries decode independently; one failure never aborts the rest
    for geom in xml::descendants(root, &ns, "geometry") {
        let name = mesh_name(geom, cfg);
        let mut warnings = Vec::new();
        let result = decode_geometry(geom, &ns, name.clone(), &textures, cfg, &mut warnings);
        for warning in &warnings {
            log::warn!("{name}: {warning}");
        }
        summary.warnings.append(&mut warnings);
        match result {
            Ok(mesh) => {
                write_to_sink(&mesh, sink);
                summary.imported += 1;
                log::debug!("imported geometry '{name}' ({} faces)", mesh.get_faces().len());
            }
            Result::Err(reason) => {
                log::warn!("skipping geometry '{name}': {reason}");
                summary.skipped.push(GeometrySkip {
                    geometry: name,
                    reason,
                });
            }
        }
    }

    if summary.imported == 0 {
        return Result::Err(Err::NothingImported {
            skipped: summary.skipped,
        });
    }
    Ok(summary)
}

fn mesh_name(geom: &Element, cfg: &Config) -> String {
    geom.attributes
        .get("name")
        .or_else(|| geom.attributes.get("id"))
        .cloned()
        .unwrap_or_else(|| cfg.fallback_mesh_name.clone())
}

/// Runs the full pipeline for one `<geometry>`: sources, vertex pools,
/// triangle blocks, then the assembler's invariant checks. Warnings are
/// appended to `warnings` even when the geometry ends up skipped.
fn decode_geometry(
    geom: &Element,
    ns: &xml::Ns,
    name: String,
    textures: &MaterialMap,
    cfg: &Config,
    warnings: &mut Vec<Warning>,
) -> Result<Mesh, SkipReason> {
    let Some(mesh_el) = xml::child(geom, ns, "mesh") else {
        return Result::Err(SkipReason::NoMeshNode);
    };

    let mut sources: HashMap<String, Source> = HashMap::new();
    for source_el in xml::children(mesh_el, ns, "source") {
        let Some(id) = source_el.attributes.get("id") else {
            continue;
        };
        let source = source::decode_source(source_el, ns, id)
            .recover_or(Source::empty(source::DEFAULT_STRIDE), warnings);
        sources.insert(id.clone(), source);
    }

    let pools = vertices::vertex_pools(mesh_el, ns);

    let mut builder = MeshBuilder::new(name);
    let mut first_failure: Option<SkipReason> = None;
    for tri_el in xml::children(mesh_el, ns, "triangles") {
        let Some(block) = triangles::parse_block(tri_el, ns, warnings) else {
            continue;
        };
        let run = match triangles::decode_block(&block, &pools, &sources, cfg).unpack(warnings)
        {
            Ok(run) => run,
            Result::Err(reason) => {
                if first_failure.is_none() {
                    first_failure = Some(reason);
                }
                continue;
            }
        };

        // the first successful block pins the position table
        if builder.position_source().is_none() {
            let rows = sources
                .get(&run.position_source)
                .map(Source::rows3)
                .unwrap_or_default();
            builder.set_positions(&run.position_source, rows);
        } else if builder.position_source() != Some(run.position_source.as_str()) {
            warnings.push(Warning::MixedPositionSources {
                first: builder.position_source().unwrap_or_default().to_owned(),
                other: run.position_source.clone(),
            });
            continue;
        }

        builder.append_block(run.faces, run.material, run.normals, run.colors, run.uvs);
    }

    match builder.build(textures, warnings) {
        Ok(mesh) => Ok(mesh),
        Result::Err(builder::Err::FaceIndexOutOfRange(index, rows)) => {
            Result::Err(SkipReason::FaceIndexOutOfRange { index, rows })
        }
        Result::Err(builder::Err::NoFaces | builder::Err::NoPositions) => {
            Result::Err(first_failure.unwrap_or(SkipReason::NoValidFaces))
        }
    }
}

/// Hands one frozen mesh to the sink. Channel writes are gated on presence;
/// the builder already guaranteed their lengths.
fn write_to_sink<S: MeshSink>(mesh: &Mesh, sink: &mut S) {
    let handle = sink.create_mesh(mesh.get_name(), mesh.get_positions(), mesh.get_faces());
    if !mesh.get_corner_uvs().is_empty() {
        sink.set_corner_uvs(&handle, mesh.get_corner_uvs());
    }
    if !mesh.get_corner_colors().is_empty() {
        sink.set_corner_colors(&handle, mesh.get_corner_colors());
    }
    if !mesh.get_corner_normals().is_empty() {
        sink.set_corner_normals(&handle, mesh.get_corner_normals());
    }
    if !mesh.get_material_labels().is_empty() {
        sink.assign_materials(&handle, mesh.get_material_labels(), mesh.get_face_materials());
    }
    sink.place_object(handle, mesh.get_name());
}
