//! Per-tab "best stream" tracker.
//!
//! Every completed media request is classified as audio or video, sized from
//! its `clen` parameter or `Content-Length`, and offered to the tab's entry.
//! Only the largest candidate of each kind survives; equal sizes keep the
//! earlier observation. Entries live until the tab is forgotten.

mod entry;
mod state;

pub use entry::{Candidate, TabEntry, TabId};
pub use state::{ObserveOutcome, StreamTracker};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MarkerPolicy, MediaKind, ResponseHeader};

    const BASE: &str = "https://rr3---sn.example.com/videoplayback";

    fn video(clen: u64) -> String {
        format!("{BASE}?itag=18&clen={clen}")
    }

    fn audio(clen: u64) -> String {
        format!("{BASE}?itag=140&clen={clen}")
    }

    #[test]
    fn larger_video_replaces_smaller_is_ignored() {
        let mut t = StreamTracker::new();
        assert_eq!(
            t.observe(7, &video(300), None),
            ObserveOutcome::Replaced {
                kind: MediaKind::Video,
                size: 300
            }
        );
        assert_eq!(
            t.observe(7, &video(100), None),
            ObserveOutcome::Kept {
                kind: MediaKind::Video
            }
        );
        let entry = t.snapshot(7).expect("entry");
        assert_eq!(entry.video.as_ref().unwrap().size, 300);
        assert_eq!(entry.video.as_ref().unwrap().url, video(300));
        assert!(entry.audio.is_none());
    }

    #[test]
    fn retained_size_is_running_maximum_first_of_equal_wins() {
        let mut t = StreamTracker::new();
        let sizes = [5u64, 40, 12, 40, 39, 0, 40];
        for (i, s) in sizes.iter().enumerate() {
            let url = format!("{}&seq={i}", audio(*s));
            t.observe(1, &url, None);
        }
        let best = t.snapshot(1).unwrap().audio.unwrap();
        assert_eq!(best.size, 40);
        assert!(best.url.ends_with("&seq=1"), "earliest of equal maxima wins: {}", best.url);
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let mut t = StreamTracker::new();
        t.observe(3, &video(1000), None);
        t.observe(3, &audio(10), None);
        let e = t.snapshot(3).unwrap();
        assert_eq!(e.get(MediaKind::Video).unwrap().size, 1000);
        assert_eq!(e.get(MediaKind::Audio).unwrap().size, 10);
    }

    #[test]
    fn negative_tab_ids_are_ignored() {
        let mut t = StreamTracker::new();
        let headers = [ResponseHeader::new("Content-Length", "10")];
        assert_eq!(t.observe(-1, &video(10), Some(&headers[..])), ObserveOutcome::Ignored);
        assert_eq!(t.observe(-42, "garbage", None), ObserveOutcome::Ignored);
        assert!(t.is_empty());
        assert!(t.snapshot(-1).is_none());
    }

    #[test]
    fn zero_sized_first_observation_creates_entry() {
        let mut t = StreamTracker::new();
        t.observe(2, &format!("{BASE}?itag=18"), None);
        let e = t.snapshot(2).unwrap();
        assert_eq!(e.video.unwrap().size, 0);

        // A sized observation then replaces the unsized one.
        t.observe(2, &video(1), None);
        assert_eq!(t.snapshot(2).unwrap().video.unwrap().size, 1);
    }

    #[test]
    fn header_size_is_used_when_url_has_no_clen() {
        let mut t = StreamTracker::new();
        let headers = [ResponseHeader::new("content-LENGTH", "500")];
        t.observe(9, &format!("{BASE}?itag=22"), Some(&headers[..]));
        assert_eq!(t.snapshot(9).unwrap().video.unwrap().size, 500);
    }

    #[test]
    fn forget_then_snapshot_is_absent() {
        let mut t = StreamTracker::new();
        t.observe(4, &video(10), None);
        t.observe(5, &video(10), None);
        assert!(t.forget(4));
        assert!(t.snapshot(4).is_none());
        assert!(t.snapshot(5).is_some());
        assert_eq!(t.tab_ids(), vec![5]);
    }

    #[test]
    fn forget_unknown_tab_is_noop() {
        let mut t = StreamTracker::new();
        assert!(!t.forget(123));
        assert!(!t.delete(-5));
        assert!(t.is_empty());
    }

    #[test]
    fn custom_policy_changes_classification() {
        let mut t = StreamTracker::with_policy(MarkerPolicy::new(["kind=sound"]));
        t.observe(1, &audio(10), None);
        t.observe(1, &format!("{BASE}?kind=sound&clen=3"), None);
        let e = t.snapshot(1).unwrap();
        assert_eq!(e.video.unwrap().size, 10);
        assert_eq!(e.audio.unwrap().size, 3);
    }

    #[test]
    fn upsert_and_get() {
        let mut t = StreamTracker::new();
        let entry = TabEntry {
            video: None,
            audio: Some(Candidate {
                url: audio(8),
                size: 8,
            }),
        };
        t.upsert(11, entry.clone());
        assert_eq!(t.get(11), Some(&entry));
        assert_eq!(t.len(), 1);
        // Upserted state takes part in later comparisons.
        t.observe(11, &audio(8), None);
        assert_eq!(t.get(11).unwrap().audio.as_ref().unwrap().url, audio(8));
    }
}
