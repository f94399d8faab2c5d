//! Timeline aggregation.
//!
//! Lays an ordered clip sequence onto one global frame axis. Each entry's
//! offset is the running sum of the durations before it, so entries form
//! contiguous, gap-free, non-overlapping windows. The order is the caller's
//! selection order; nothing is sorted.

use filmroom_common::error::{FilmroomError, FilmroomResult};
use filmroom_project_model::clip::{ClipDescriptor, SourceFrame};
use serde::Serialize;

use crate::resolver::{resolve_frame, TimelineState};

/// One clip placed on the global timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// The clip this entry plays.
    pub clip: ClipDescriptor,

    /// First global frame of the entry's window.
    pub global_offset: u64,

    /// Number of global frames the entry occupies.
    pub local_duration: u64,

    /// Source frame the renderer seeks to.
    pub source_start: SourceFrame,

    /// Source frame the renderer stops at (exclusive).
    pub source_end: SourceFrame,
}

impl TimelineEntry {
    /// Global frame just past the entry's window.
    pub fn global_end(&self) -> u64 {
        self.global_offset + self.local_duration
    }

    /// Whether `global_frame` falls inside `[offset, offset + duration)`.
    pub fn contains(&self, global_frame: u64) -> bool {
        global_frame >= self.global_offset && global_frame < self.global_end()
    }

    /// Source frame shown at `global_frame`, if the entry is active then.
    pub fn source_frame_at(&self, global_frame: u64) -> Option<u64> {
        self.contains(global_frame)
            .then(|| self.source_start as u64 + (global_frame - self.global_offset))
    }
}

/// Place `clips` back to back starting at global frame 0.
///
/// Fails with `InvalidClip` on the first clip whose range is empty or
/// inverted. Empty input yields no entries.
pub fn compute_timeline(clips: &[ClipDescriptor]) -> FilmroomResult<Vec<TimelineEntry>> {
    lay_out(clips, 0, |clip| {
        clip.validate()?;
        Ok((clip.start_frame, clip.end_frame, clip.duration()))
    })
}

/// Sum of all clip durations; zero for an empty sequence.
pub fn total_duration(clips: &[ClipDescriptor]) -> FilmroomResult<u64> {
    clips.iter().try_fold(0u64, |total, clip| {
        clip.validate()?;
        Ok(total + clip.duration())
    })
}

/// Split clips into those that satisfy the frame-range invariant and those
/// that do not, keeping the relative order of each group.
pub fn partition_valid(
    clips: &[ClipDescriptor],
) -> (Vec<ClipDescriptor>, Vec<(ClipDescriptor, FilmroomError)>) {
    let mut valid = Vec::with_capacity(clips.len());
    let mut invalid = vec![];
    for clip in clips {
        match clip.validate() {
            Ok(()) => valid.push(clip.clone()),
            Err(e) => invalid.push((clip.clone(), e)),
        }
    }
    (valid, invalid)
}

/// Shared prefix-sum layout.
///
/// `window` maps a clip to `(source_start, source_end, duration)`. Offsets
/// start at `lead_in` and advance by each duration in order.
pub(crate) fn lay_out<F>(
    clips: &[ClipDescriptor],
    lead_in: u64,
    mut window: F,
) -> FilmroomResult<Vec<TimelineEntry>>
where
    F: FnMut(&ClipDescriptor) -> FilmroomResult<(SourceFrame, SourceFrame, u64)>,
{
    let mut entries = Vec::with_capacity(clips.len());
    let mut offset = if clips.is_empty() { 0 } else { lead_in };

    for clip in clips {
        let (source_start, source_end, duration) = window(clip)?;
        if duration == 0 {
            return Err(FilmroomError::invalid_clip(
                clip.key.as_str(),
                "clip contributes no frames",
            ));
        }
        entries.push(TimelineEntry {
            clip: clip.clone(),
            global_offset: offset,
            local_duration: duration,
            source_start,
            source_end,
        });
        offset += duration;
    }

    Ok(entries)
}

/// An immutable, laid-out timeline for one render job.
///
/// Build it once, then share it (e.g. behind an `Arc`) across every
/// per-frame resolution of the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    total_duration: u64,
}

impl Timeline {
    /// Lay out `clips` back to back.
    pub fn build(clips: &[ClipDescriptor]) -> FilmroomResult<Self> {
        Ok(Self::from_entries(compute_timeline(clips)?))
    }

    pub(crate) fn from_entries(entries: Vec<TimelineEntry>) -> Self {
        let total_duration = entries.last().map(TimelineEntry::global_end).unwrap_or(0);
        Self {
            entries,
            total_duration,
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Frames before the first entry (the preview lead-in, if any).
    pub fn lead_in(&self) -> u64 {
        self.entries.first().map(|e| e.global_offset).unwrap_or(0)
    }

    /// Resolve the per-frame state at `global_frame`.
    pub fn resolve(&self, global_frame: u64) -> TimelineState {
        resolve_frame(&self.entries, self.total_duration, global_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(start: u32, end: u32) -> ClipDescriptor {
        ClipDescriptor::new(1, "goal", None, start, end).unwrap()
    }

    /// Bypasses validation to model clips built by hand upstream.
    fn unchecked(start: u32, end: u32) -> ClipDescriptor {
        ClipDescriptor {
            key: filmroom_project_model::ClipKey::compose(1, "bad", None, start, end),
            video_id: 1,
            tag_name: "bad".to_string(),
            frame: None,
            start_frame: start,
            end_frame: end,
        }
    }

    #[test]
    fn test_single_clip() {
        let clips = vec![clip(2662, 3017)];
        let entries = compute_timeline(&clips).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].global_offset, 0);
        assert_eq!(entries[0].local_duration, 355);
        assert_eq!(total_duration(&clips).unwrap(), 355);
    }

    #[test]
    fn test_offsets_are_prefix_sums() {
        let clips = vec![clip(0, 150), clip(200, 260), clip(10, 15)];
        let entries = compute_timeline(&clips).unwrap();
        let offsets: Vec<u64> = entries.iter().map(|e| e.global_offset).collect();
        assert_eq!(offsets, vec![0, 150, 210]);
        assert_eq!(total_duration(&clips).unwrap(), 215);
    }

    #[test]
    fn test_order_is_caller_order() {
        let clips = vec![clip(200, 260), clip(0, 150)];
        let entries = compute_timeline(&clips).unwrap();
        assert_eq!(entries[0].clip.start_frame, 200);
        assert_eq!(entries[1].global_offset, 60);
    }

    #[test]
    fn test_empty_input_is_nothing_to_render() {
        assert!(compute_timeline(&[]).unwrap().is_empty());
        assert_eq!(total_duration(&[]).unwrap(), 0);
        let timeline = Timeline::build(&[]).unwrap();
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_duration(), 0);
    }

    #[test]
    fn test_inverted_clip_is_rejected() {
        let clips = vec![clip(0, 150), unchecked(300, 200), clip(200, 260)];
        let err = compute_timeline(&clips).unwrap_err();
        assert!(matches!(err, FilmroomError::InvalidClip { .. }));
        assert!(total_duration(&clips).is_err());
    }

    #[test]
    fn test_zero_length_clip_is_rejected() {
        let err = compute_timeline(&[unchecked(40, 40)]).unwrap_err();
        assert!(matches!(err, FilmroomError::InvalidClip { .. }));
    }

    #[test]
    fn test_filtering_upstream_recomposes_valid_clips() {
        let clips = vec![clip(0, 150), unchecked(300, 200), clip(200, 260)];
        let (valid, invalid) = partition_valid(&clips);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0.start_frame, 300);

        let entries = compute_timeline(&valid).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].global_offset, 150);
        assert_eq!(total_duration(&valid).unwrap(), 210);
    }

    #[test]
    fn test_entry_window_helpers() {
        let entries = compute_timeline(&[clip(0, 150), clip(200, 260)]).unwrap();
        let second = &entries[1];
        assert_eq!(second.global_end(), 210);
        assert!(second.contains(150));
        assert!(second.contains(209));
        assert!(!second.contains(210));
        assert_eq!(second.source_frame_at(160), Some(210));
        assert_eq!(second.source_frame_at(10), None);
    }

    #[test]
    fn test_timeline_serializes_camel_case() {
        let timeline = Timeline::build(&[clip(200, 260)]).unwrap();
        let json = serde_json::to_value(&timeline).unwrap();
        assert_eq!(json["totalDuration"], 60);
        assert_eq!(json["entries"][0]["globalOffset"], 0);
        assert_eq!(json["entries"][0]["sourceStart"], 200);
        assert_eq!(json["entries"][0]["clip"]["startFrame"], 200);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let clips = vec![clip(5, 90), clip(100, 101), clip(0, 30)];
        assert_eq!(
            compute_timeline(&clips).unwrap(),
            compute_timeline(&clips).unwrap()
        );
    }
}
