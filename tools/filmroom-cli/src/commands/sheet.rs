//! Resolve every output frame and write them as JSON lines.

use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use filmroom_common::config::AppConfig;
use filmroom_render_engine::{
    build_frame_sheet, write_json_lines, CompositionOptions, SheetProgress,
};

use super::{load_props, parse_template, plan_or_report};

pub async fn run(
    config: &AppConfig,
    props_path: PathBuf,
    output: PathBuf,
    workers: usize,
    template: Option<String>,
) -> anyhow::Result<()> {
    let props = load_props(&props_path)?;
    let options = CompositionOptions {
        template: parse_template(template)?,
        ..Default::default()
    };
    let Some(plan) = plan_or_report(config, &props, options)? else {
        return Ok(());
    };

    println!("Resolving {} frames with {workers} worker(s)", plan.metadata.duration_in_frames);

    let progress_cb: Box<dyn Fn(SheetProgress) + Send> = Box::new(|p| {
        print!(
            "\r  Progress: {:.1}% ({}/{} frames)  ",
            p.progress * 100.0,
            p.frames_resolved,
            p.total_frames,
        );
    });

    let frames = build_frame_sheet(Arc::new(plan), workers, Some(progress_cb))
        .await
        .map_err(|e| anyhow::anyhow!("Frame sheet failed: {e}"))?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&output)?;
    write_json_lines(&frames, BufWriter::new(file))?;

    println!("\nWrote {} frames: {}", frames.len(), output.display());
    Ok(())
}
