//! Write the composition plan for a props file.

use std::path::PathBuf;

use filmroom_common::config::{AppConfig, MediaMode};
use filmroom_render_engine::CompositionOptions;

use super::{load_props, parse_template, plan_or_report};

pub fn run(
    config: &AppConfig,
    props_path: PathBuf,
    output: Option<PathBuf>,
    template: Option<String>,
    static_file: bool,
    remote: bool,
) -> anyhow::Result<()> {
    let props = load_props(&props_path)?;
    let media_mode = match (static_file, remote) {
        (true, _) => Some(MediaMode::StaticFile),
        (_, true) => Some(MediaMode::Remote),
        _ => None,
    };
    let options = CompositionOptions {
        template: parse_template(template)?,
        media_mode,
    };

    let Some(plan) = plan_or_report(config, &props, options)? else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(&plan)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)?;
            eprintln!(
                "Wrote plan: {} clip(s), {} frames -> {}",
                plan.placements.len(),
                plan.metadata.duration_in_frames,
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
