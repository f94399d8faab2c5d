//! List the clips of the composed timeline.

use std::path::PathBuf;

use filmroom_common::config::AppConfig;
use filmroom_render_engine::CompositionOptions;
use filmroom_timeline::{summarize, DurationClass};

use super::{load_props, parse_template, plan_or_report};

pub fn run(config: &AppConfig, props_path: PathBuf, template: Option<String>) -> anyhow::Result<()> {
    let props = load_props(&props_path)?;
    let options = CompositionOptions {
        template: parse_template(template)?,
        ..Default::default()
    };
    let Some(plan) = plan_or_report(config, &props, options)? else {
        return Ok(());
    };

    let rate = plan.frame_rate();
    let meta = &plan.metadata;
    println!("Composition: {:?}", plan.template.kind());
    println!(
        "  Output: {}x{} @ {}fps, {} frames ({})",
        meta.width,
        meta.height,
        meta.fps,
        meta.duration_in_frames,
        rate.format_secs_tenths(meta.duration_in_frames)
    );
    println!("  Media: {:?}", plan.media_mode);
    if plan.timeline().lead_in() > 0 {
        println!(
            "  Preview: {} frames, {} tiles",
            plan.timeline().lead_in(),
            plan.preview_tiles.len()
        );
    }
    println!();

    println!("Clips:");
    for row in summarize(plan.timeline(), rate) {
        let marker = match row.class {
            DurationClass::VeryLong => "!!",
            DurationClass::Long => "! ",
            DurationClass::Standard => "  ",
        };
        println!(
            "  {marker}#{:<3} {:>7}-{:<7} {:>6}  {:<12} video {:<5} src {}-{}",
            row.index,
            row.global_start,
            row.global_end,
            row.duration_label,
            row.tag_name,
            row.video_id,
            row.source_start,
            row.source_end,
        );
    }

    if !plan.skipped.is_empty() || !plan.rejected.is_empty() {
        println!();
        println!(
            "{} clip(s) skipped, {} invalid. Run `filmroom validate` for details.",
            plan.skipped.len(),
            plan.rejected.len()
        );
    }

    Ok(())
}
