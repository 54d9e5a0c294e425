use clap::Parser;
use anyhow::Result;
use std::path::Path;

use collada_lite::decode;
use collada_lite::io::sink::RecordingSink;
use collada_lite::prelude::ConfigType;

#[derive(Parser)]
#[command(name = "collada-cli")]
#[command(about = "A CLI tool for decoding COLLADA (.dae) triangle-list documents")]
struct Cli {
    /// Input file path
    #[arg(short, long)]
    input: String,

    /// Print the import summary as JSON
    #[arg(long)]
    json: bool,

    /// Reject triangle blocks with unbound input offsets
    #[arg(long)]
    strict_offsets: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Check input file extension
    let input_ext = Path::new(&cli.input)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    if input_ext != "dae" {
        anyhow::bail!("Input file must be a .dae file");
    }

    let cfg = decode::Config {
        reject_sparse_offsets: cli.strict_offsets,
        ..ConfigType::default()
    };

    let mut sink = RecordingSink::default();
    let summary = decode::decode_file(&cli.input, &mut sink, cfg)
        .map_err(|e| anyhow::anyhow!("Failed to decode document: {e}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Imported {} object(s).", summary.imported);
    for (mesh, object) in sink.meshes.iter().zip(&sink.objects) {
        println!(
            "  {}: {} positions, {} faces, {} material(s){}{}{}",
            object.name,
            mesh.positions.len(),
            mesh.faces.len(),
            mesh.material_labels.len(),
            channel_flag(" normals", !mesh.corner_normals.is_empty()),
            channel_flag(" colors", !mesh.corner_colors.is_empty()),
            channel_flag(" uvs", !mesh.corner_uvs.is_empty()),
        );
    }
    for skip in &summary.skipped {
        println!("  skipped {}: {}", skip.geometry, skip.reason);
    }
    for warning in &summary.warnings {
        println!("  warning: {warning}");
    }

    Ok(())
}

fn channel_flag(name: &str, present: bool) -> &'_ str {
    if present {
        name
    } else {
        ""
    }
}
