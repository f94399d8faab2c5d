//! Clip summaries for listing a composed timeline.

use filmroom_common::clock::FrameRate;
use serde::Serialize;

use crate::aggregator::Timeline;

/// How a clip's length compares with the rest of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    Standard,
    /// At or above the top-quarter duration.
    Long,
    /// At or above the top-tenth duration.
    VeryLong,
}

/// Classify each duration against the distribution of all of them.
///
/// Thresholds are the values at indices `floor(n * 0.1)` and
/// `floor(n * 0.25)` of the durations sorted longest first.
pub fn classify_durations(durations: &[u64]) -> Vec<DurationClass> {
    if durations.is_empty() {
        return vec![];
    }

    let mut sorted = durations.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top_tenth = sorted[sorted.len() / 10];
    let top_quarter = sorted[sorted.len() / 4];

    durations
        .iter()
        .map(|&d| {
            if d >= top_tenth {
                DurationClass::VeryLong
            } else if d >= top_quarter {
                DurationClass::Long
            } else {
                DurationClass::Standard
            }
        })
        .collect()
}

/// One row of a timeline listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSummary {
    pub index: usize,
    pub key: String,
    pub tag_name: String,
    pub video_id: i64,
    pub source_start: u32,
    pub source_end: u32,
    pub global_start: u64,
    pub global_end: u64,
    pub duration_frames: u64,
    /// Duration in seconds with one decimal, e.g. `"5.0s"`.
    pub duration_label: String,
    pub class: DurationClass,
}

/// Summarize every entry of `timeline`.
pub fn summarize(timeline: &Timeline, rate: FrameRate) -> Vec<ClipSummary> {
    let durations: Vec<u64> = timeline
        .entries()
        .iter()
        .map(|e| e.local_duration)
        .collect();
    let classes = classify_durations(&durations);

    timeline
        .entries()
        .iter()
        .zip(classes)
        .enumerate()
        .map(|(index, (entry, class))| ClipSummary {
            index,
            key: entry.clip.key.to_string(),
            tag_name: entry.clip.tag_name.clone(),
            video_id: entry.clip.video_id,
            source_start: entry.source_start,
            source_end: entry.source_end,
            global_start: entry.global_offset,
            global_end: entry.global_end(),
            duration_frames: entry.local_duration,
            duration_label: rate.format_secs_tenths(entry.local_duration),
            class,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmroom_project_model::ClipDescriptor;

    #[test]
    fn test_classify_ten_durations() {
        let durations: Vec<u64> = (1..=10).map(|d| d * 10).collect();
        let classes = classify_durations(&durations);
        // Sorted desc: 100, 90, 80, ... top tenth index 1 -> 90, top quarter index 2 -> 80.
        assert_eq!(classes[9], DurationClass::VeryLong);
        assert_eq!(classes[8], DurationClass::VeryLong);
        assert_eq!(classes[7], DurationClass::Long);
        assert_eq!(classes[6], DurationClass::Standard);
        assert_eq!(classes[0], DurationClass::Standard);
    }

    #[test]
    fn test_classify_small_sets() {
        assert!(classify_durations(&[]).is_empty());
        assert_eq!(classify_durations(&[42]), vec![DurationClass::VeryLong]);
        assert_eq!(
            classify_durations(&[10, 20]),
            vec![DurationClass::Standard, DurationClass::VeryLong]
        );
    }

    #[test]
    fn test_summarize_rows() {
        let clips = vec![
            ClipDescriptor::new(1, "goal", None, 0, 150).unwrap(),
            ClipDescriptor::new(2, "assist", None, 200, 260).unwrap(),
        ];
        let timeline = Timeline::build(&clips).unwrap();
        let rows = summarize(&timeline, FrameRate::COMPOSITION);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration_label, "5.0s");
        assert_eq!(rows[1].global_start, 150);
        assert_eq!(rows[1].global_end, 210);
        assert_eq!(rows[1].duration_label, "2.0s");
        assert_eq!(rows[0].class, DurationClass::VeryLong);
        assert_eq!(rows[1].class, DurationClass::Standard);
    }
}
