//! Ordered clip selection.
//!
//! The selection behaves like a set for membership (a clip key appears at
//! most once) but like a sequence for ordering: insertion order is playback
//! order, and reordering is explicit.

use serde::{Deserialize, Serialize};

use crate::clip::{ClipDescriptor, ClipKey, VideoId};

/// The ordered sequence of clips chosen for one film.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipSelection {
    clips: Vec<ClipDescriptor>,
}

impl ClipSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip at the end of the sequence.
    ///
    /// Returns `false` and leaves the selection unchanged when a clip with
    /// the same key is already selected.
    pub fn push(&mut self, clip: ClipDescriptor) -> bool {
        if self.contains(&clip.key) {
            return false;
        }
        self.clips.push(clip);
        true
    }

    /// Remove the clip with `key`, keeping the order of the remaining clips.
    pub fn remove(&mut self, key: &ClipKey) -> Option<ClipDescriptor> {
        let index = self.position(key)?;
        Some(self.clips.remove(index))
    }

    /// Move the clip at `from` so that it ends up at index `to`.
    ///
    /// Returns `false` when either index is out of bounds.
    pub fn move_clip(&mut self, from: usize, to: usize) -> bool {
        if from >= self.clips.len() || to >= self.clips.len() {
            return false;
        }
        let clip = self.clips.remove(from);
        self.clips.insert(to, clip);
        true
    }

    pub fn contains(&self, key: &ClipKey) -> bool {
        self.position(key).is_some()
    }

    pub fn position(&self, key: &ClipKey) -> Option<usize> {
        self.clips.iter().position(|c| &c.key == key)
    }

    pub fn get(&self, index: usize) -> Option<&ClipDescriptor> {
        self.clips.get(index)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClipDescriptor> {
        self.clips.iter()
    }

    /// The clips in playback order.
    pub fn as_slice(&self) -> &[ClipDescriptor] {
        &self.clips
    }

    pub fn into_vec(self) -> Vec<ClipDescriptor> {
        self.clips
    }

    /// Distinct referenced video ids, in first-reference order.
    pub fn video_ids(&self) -> Vec<VideoId> {
        let mut ids = Vec::new();
        for clip in &self.clips {
            if !ids.contains(&clip.video_id) {
                ids.push(clip.video_id);
            }
        }
        ids
    }
}

impl FromIterator<ClipDescriptor> for ClipSelection {
    /// Collect clips in order, dropping later duplicates of a key.
    fn from_iter<I: IntoIterator<Item = ClipDescriptor>>(iter: I) -> Self {
        let mut selection = Self::new();
        for clip in iter {
            selection.push(clip);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a ClipSelection {
    type Item = &'a ClipDescriptor;
    type IntoIter = std::slice::Iter<'a, ClipDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}

impl AsRef<[ClipDescriptor]> for ClipSelection {
    fn as_ref(&self) -> &[ClipDescriptor] {
        &self.clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(video_id: VideoId, start: u32, end: u32) -> ClipDescriptor {
        ClipDescriptor::new(video_id, "goal", None, start, end).unwrap()
    }

    fn starts(selection: &ClipSelection) -> Vec<u32> {
        selection.iter().map(|c| c.start_frame).collect()
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut selection = ClipSelection::new();
        assert!(selection.push(clip(2, 500, 600)));
        assert!(selection.push(clip(1, 0, 100)));
        assert!(selection.push(clip(2, 100, 200)));
        assert_eq!(starts(&selection), vec![500, 0, 100]);
    }

    #[test]
    fn test_duplicate_key_is_not_added() {
        let mut selection = ClipSelection::new();
        assert!(selection.push(clip(1, 0, 100)));
        assert!(!selection.push(clip(1, 0, 100)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut selection: ClipSelection =
            vec![clip(1, 0, 10), clip(1, 20, 30), clip(1, 40, 50)]
                .into_iter()
                .collect();
        let middle = selection.get(1).unwrap().key.clone();
        let removed = selection.remove(&middle).unwrap();
        assert_eq!(removed.start_frame, 20);
        assert_eq!(starts(&selection), vec![0, 40]);
        assert!(selection.remove(&middle).is_none());
    }

    #[test]
    fn test_move_clip_reorders() {
        let mut selection: ClipSelection =
            vec![clip(1, 0, 10), clip(1, 20, 30), clip(1, 40, 50)]
                .into_iter()
                .collect();
        assert!(selection.move_clip(0, 2));
        assert_eq!(starts(&selection), vec![20, 40, 0]);
        assert!(selection.move_clip(2, 0));
        assert_eq!(starts(&selection), vec![0, 20, 40]);
        assert!(!selection.move_clip(0, 3));
    }

    #[test]
    fn test_video_ids_in_first_reference_order() {
        let selection: ClipSelection = vec![clip(9, 0, 10), clip(4, 0, 10), clip(9, 20, 30)]
            .into_iter()
            .collect();
        assert_eq!(selection.video_ids(), vec![9, 4]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let selection: ClipSelection = vec![clip(1, 0, 10)].into_iter().collect();
        let json = serde_json::to_value(&selection).unwrap();
        assert!(json.is_array());
        let parsed: ClipSelection = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, selection);
    }
}
