//! Validate a render props file.

use std::path::PathBuf;

use filmroom_common::config::AppConfig;
use filmroom_project_model::VideoLookup;
use filmroom_timeline::total_duration;

use super::load_props;

pub fn run(config: &AppConfig, props_path: PathBuf) -> anyhow::Result<()> {
    println!("Validating props at: {}", props_path.display());

    let props = load_props(&props_path)?;
    println!("  Videos: {}", props.videos.len());
    println!("  Selected videos: {}", props.selected_video_count());
    println!("  Valid clips: {}", props.clips.len());

    let mut issues = vec![];
    for rejected in &props.rejected {
        issues.push(format!(
            "clip #{} ({}): {}",
            rejected.index, rejected.key, rejected.reason
        ));
    }

    let mut placeable = vec![];
    for clip in props.clips.iter() {
        match props.videos.find_video(clip.video_id) {
            None => issues.push(format!(
                "clip {}: unknown video {}",
                clip.key, clip.video_id
            )),
            Some(video) if video.file_name().is_none() => issues.push(format!(
                "clip {}: video {} has no media file",
                clip.key, clip.video_id
            )),
            Some(_) => placeable.push(clip.clone()),
        }
    }

    let frames = total_duration(&placeable)?;
    println!(
        "  Placeable clips: {} ({} frames, {})",
        placeable.len(),
        frames,
        filmroom_common::clock::FrameRate::new(config.render.fps).format_secs_tenths(frames)
    );

    if issues.is_empty() {
        println!("\nProps are valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Affected clips will be left out of the film.",
            issues.len()
        );
    }
    if frames == 0 {
        println!("Nothing to render.");
    }

    Ok(())
}
