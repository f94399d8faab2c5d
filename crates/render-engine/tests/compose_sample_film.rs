//! End-to-end composition of the sample film fixture.

use std::path::PathBuf;
use std::sync::Arc;

use filmroom_common::config::{MediaMode, RenderDefaults};
use filmroom_project_model::{RenderProps, TemplateKind};
use filmroom_render_engine::{build_frame_sheet, prepare_composition, CompositionOptions, CompositionPlan};
use proptest::prelude::*;

fn fixture() -> RenderProps {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/sample-film/props.json");
    RenderProps::load(path).unwrap()
}

fn sample_plan() -> CompositionPlan {
    prepare_composition(&fixture(), &RenderDefaults::default(), CompositionOptions::default()).unwrap()
}

#[test]
fn plan_skips_missing_video_and_reports_rejected_clip() {
    let plan = sample_plan();

    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].video_id, 103);
    assert_eq!(plan.rejected.len(), 1);

    let starts: Vec<u64> = plan.placements.iter().map(|p| p.global_start_frame).collect();
    assert_eq!(starts, vec![0, 355, 505]);
    assert_eq!(plan.metadata.duration_in_frames, 565);
    assert_eq!((plan.metadata.width, plan.metadata.height, plan.metadata.fps), (1920, 1080, 30));
}

#[test]
fn plan_uses_remote_media_from_props_flag() {
    let plan = sample_plan();
    assert_eq!(plan.media_mode, MediaMode::Remote);
    assert_eq!(
        plan.placements[0].media_ref.as_str(),
        "http://localhost:5000/downloads/semifinal_harbor.mp4"
    );
    assert_eq!(plan.placements[0].caption, "Semifinal vs Harbor - goal (2662-3017)");
}

#[test]
fn tracking_boxes_follow_the_source_frame() {
    let plan = sample_plan();

    let first = plan.frame_params(0).unwrap();
    assert_eq!(first.source_frame, Some(2662));
    let players: Vec<&str> = first.boxes.iter().map(|b| b.player.as_str()).collect();
    assert_eq!(players, vec!["12", "7"]);
    let twelve = &first.boxes[0];
    assert!((twelve.x - 640.0).abs() < 1e-9);
    assert!((twelve.y - 360.0).abs() < 1e-9);

    let second = plan.frame_params(1).unwrap();
    assert_eq!(second.boxes.len(), 1);
    assert!((second.boxes[0].x - 970.0 * 1280.0 / 1920.0).abs() < 1e-9);

    // Video 102 has no tracking metadata.
    assert!(plan.frame_params(400).unwrap().boxes.is_empty());
}

#[test]
fn preview_template_on_fixture() {
    let plan = prepare_composition(
        &fixture(),
        &RenderDefaults::default(),
        CompositionOptions {
            template: Some(TemplateKind::PreviewThenBackToBack),
            media_mode: Some(MediaMode::StaticFile),
        },
    )
    .unwrap();

    assert_eq!(plan.metadata.duration_in_frames, 865);
    assert_eq!(plan.preview_tiles.len(), 3);
    assert_eq!(plan.placements[0].media_ref.as_str(), "semifinal_harbor.mp4");
    assert!(plan.frame_params(299).unwrap().in_lead_in);
    assert_eq!(plan.frame_params(300).unwrap().active_index, Some(0));
}

#[tokio::test]
async fn frame_sheet_matches_direct_resolution() {
    let plan = Arc::new(sample_plan());
    let sheet = build_frame_sheet(Arc::clone(&plan), 4, None).await.unwrap();

    assert_eq!(sheet.len(), 565);
    for frame in [0u64, 354, 355, 504, 505, 564] {
        assert_eq!(sheet[frame as usize], plan.frame_params(frame).unwrap());
    }
    assert_eq!(sheet[564].frames_remaining, 1);
}

proptest! {
    #[test]
    fn active_frames_land_inside_their_placement(frame in 0u64..700) {
        let plan = sample_plan();
        let params = plan.frame_params(frame).unwrap();

        match params.active_index {
            Some(index) => {
                let placement = &plan.placements[index];
                prop_assert!(frame >= placement.global_start_frame);
                prop_assert!(frame < placement.global_end_frame());
                let source = params.source_frame.unwrap();
                prop_assert!(source >= placement.source_frame_start as u64);
                prop_assert!(source < placement.source_frame_end as u64);
                let progress = params.progress.unwrap();
                prop_assert!((0.0..=1.0).contains(&progress));
            }
            None => prop_assert!(frame >= plan.metadata.duration_in_frames),
        }
    }
}
