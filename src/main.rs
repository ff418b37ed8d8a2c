//! `voxel-morph` binary: opens a viewer on a JSON voxel model.

use std::path::Path;

use voxel_morph::{scene_io, Options, Viewer, Voxel};

const USAGE: &str =
    "Usage: voxel-morph <model.json> [target.json ...] [--options preset.toml]";

struct Args {
    model: String,
    targets: Vec<String>,
    options: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut model = None;
    let mut targets = Vec::new();
    let mut options = None;
    while let Some(arg) = args.next() {
        if arg == "--options" {
            options = Some(args.next().ok_or("--options needs a path")?);
        } else if model.is_none() {
            model = Some(arg);
        } else {
            targets.push(arg);
        }
    }
    Ok(Args {
        model: model.ok_or(USAGE)?,
        targets,
        options,
    })
}

fn read_model(path: &str) -> Result<Vec<Voxel>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {path}: {e}"))?;
    let report =
        scene_io::parse_json(&text).map_err(|e| format!("{path}: {e}"))?;
    if report.is_degraded() {
        log::warn!(
            "{path}: {} colors and {} coordinates fell back to defaults",
            report.defaulted_colors,
            report.defaulted_coordinates
        );
    }
    Ok(report.voxels)
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;

    let options = match &args.options {
        Some(path) => Options::load(Path::new(path)).map_err(|e| e.to_string())?,
        None => Options::default(),
    };
    let model = read_model(&args.model)?;

    let mut builder = Viewer::builder()
        .with_model(model)
        .with_options(options)
        .with_title(format!("Voxel Morph - {}", args.model));
    for path in &args.targets {
        builder = builder.with_target(read_model(path)?);
    }
    builder.build().run().map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
