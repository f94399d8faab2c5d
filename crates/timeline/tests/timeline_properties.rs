//! Property-based tests for timeline aggregation and frame resolution.

use filmroom_project_model::ClipDescriptor;
use filmroom_timeline::{compute_timeline, resolve_frame, total_duration, Template, Timeline};
use proptest::prelude::*;

fn clip_ranges() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..100_000, 1u32..5_000), 0..24)
}

fn to_clips(ranges: &[(u32, u32)]) -> Vec<ClipDescriptor> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(start, len))| {
            ClipDescriptor::new(i as i64 % 3, format!("tag{i}"), None, start, start + len).unwrap()
        })
        .collect()
}

proptest! {
    /// Each offset is the sum of all earlier durations.
    #[test]
    fn offsets_are_prefix_sums(ranges in clip_ranges()) {
        let clips = to_clips(&ranges);
        let entries = compute_timeline(&clips).unwrap();

        let mut running = 0u64;
        for (entry, &(_, len)) in entries.iter().zip(&ranges) {
            prop_assert_eq!(entry.global_offset, running);
            prop_assert_eq!(entry.local_duration, len as u64);
            running += len as u64;
        }
    }

    /// Consecutive windows touch without gaps or overlap.
    #[test]
    fn windows_are_contiguous(ranges in clip_ranges()) {
        let entries = compute_timeline(&to_clips(&ranges)).unwrap();
        for pair in entries.windows(2) {
            prop_assert_eq!(pair[0].global_end(), pair[1].global_offset);
        }
    }

    /// Total duration does not depend on clip order.
    #[test]
    fn total_duration_is_order_independent(ranges in clip_ranges()) {
        let clips = to_clips(&ranges);
        let mut reversed = clips.clone();
        reversed.reverse();

        let expected: u64 = ranges.iter().map(|&(_, len)| len as u64).sum();
        prop_assert_eq!(total_duration(&clips).unwrap(), expected);
        prop_assert_eq!(total_duration(&reversed).unwrap(), expected);
    }

    /// Every frame inside the timeline resolves to exactly the entry containing it.
    #[test]
    fn every_frame_resolves_to_its_window(
        ranges in prop::collection::vec((0u32..10_000, 1u32..60), 1..12),
    ) {
        let timeline = Timeline::build(&to_clips(&ranges)).unwrap();
        let entries = timeline.entries();

        for frame in 0..timeline.total_duration() {
            let state = timeline.resolve(frame);
            let active = state.active.expect("frame inside timeline must be active");
            let containing: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.contains(frame))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(containing, vec![active.index]);
            prop_assert_eq!(
                active.frames_since_start + active.frames_remaining,
                entries[active.index].local_duration
            );
        }
    }

    /// Frames at or past the end never have an active segment.
    #[test]
    fn frames_past_end_are_blank(ranges in clip_ranges(), extra in 0u64..1_000_000) {
        let timeline = Timeline::build(&to_clips(&ranges)).unwrap();
        let frame = timeline.total_duration() + extra;
        let state = resolve_frame(timeline.entries(), timeline.total_duration(), frame);
        prop_assert!(state.active.is_none());
        prop_assert!(!state.in_lead_in);
    }

    /// Building twice from the same input gives the same timeline.
    #[test]
    fn compute_is_idempotent(ranges in clip_ranges()) {
        let clips = to_clips(&ranges);
        prop_assert_eq!(compute_timeline(&clips).unwrap(), compute_timeline(&clips).unwrap());
    }

    /// The preview lead-in shifts every offset by the same amount.
    #[test]
    fn preview_lead_in_is_a_uniform_shift(
        ranges in prop::collection::vec((0u32..10_000, 1u32..600), 1..12),
        preview in 1u64..900,
    ) {
        let clips = to_clips(&ranges);
        let plain = Template::BackToBack.lay_out(&clips).unwrap();
        let preview_timeline = Template::PreviewThenBackToBack { preview_frames: preview }
            .lay_out(&clips)
            .unwrap();

        prop_assert_eq!(preview_timeline.total_duration(), plain.total_duration() + preview);
        for (a, b) in plain.entries().iter().zip(preview_timeline.entries()) {
            prop_assert_eq!(a.global_offset + preview, b.global_offset);
        }
        for frame in 0..preview {
            prop_assert!(preview_timeline.resolve(frame).in_lead_in);
        }
    }
}

#[test]
fn two_clip_sequence_resolves_into_second_clip() {
    let clips = vec![
        ClipDescriptor::new(1, "goal", None, 0, 150).unwrap(),
        ClipDescriptor::new(1, "assist", None, 200, 260).unwrap(),
    ];
    let timeline = Timeline::build(&clips).unwrap();
    assert_eq!(timeline.total_duration(), 210);
    assert_eq!(timeline.entries()[1].global_offset, 150);

    let active = timeline.resolve(160).active.unwrap();
    assert_eq!(active.index, 1);
    assert_eq!(active.frames_since_start, 10);
    assert_eq!(active.frames_remaining, 50);
}

#[test]
fn empty_sequence_is_blank_everywhere() {
    let timeline = Timeline::build(&[]).unwrap();
    assert_eq!(timeline.total_duration(), 0);
    for frame in [0, 1, 29, 10_000] {
        assert!(timeline.resolve(frame).active.is_none());
    }
}
