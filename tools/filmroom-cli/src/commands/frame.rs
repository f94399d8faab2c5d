//! Show the resolved state of one output frame.

use std::path::PathBuf;

use filmroom_common::config::AppConfig;
use filmroom_render_engine::CompositionOptions;

use super::{load_props, parse_template, plan_or_report};

pub fn run(
    config: &AppConfig,
    props_path: PathBuf,
    frame: u64,
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

    let params = plan
        .frame_params(frame)
        .map_err(|e| anyhow::anyhow!("Failed to resolve frame {frame}: {e}"))?;

    println!("Frame {frame} of {}", plan.metadata.duration_in_frames);
    match params.active_index {
        Some(index) => {
            let placement = &plan.placements[index];
            println!("  Clip #{index}: {}", placement.clip_key);
            println!("  Caption: {}", placement.caption);
            println!("  Media: {}", placement.media_ref);
            println!(
                "  Elapsed: {} / remaining: {} frames",
                params.frames_since_start, params.frames_remaining
            );
            if let Some(progress) = params.progress {
                println!("  Progress: {:.1}%", progress * 100.0);
            }
            if let Some(countdown) = &params.countdown {
                println!("  Countdown: {countdown}");
            }
            if let Some(source) = params.source_frame {
                println!("  Source frame: {source}");
            }
            for b in &params.boxes {
                println!(
                    "  Player {}: ({:.1}, {:.1}) {:.1}x{:.1}",
                    b.player, b.x, b.y, b.width, b.height
                );
            }
        }
        None if params.in_lead_in => println!("  Preview grid ({} tiles)", plan.preview_tiles.len()),
        None => println!("  No active clip"),
    }

    Ok(())
}
