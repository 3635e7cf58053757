//! Host event feed and the loop that owns the tracker.
//!
//! Three inbound feeds (completed requests, closed tabs, action clicks) are
//! merged into one ordered channel of [`HostEvent`]s. The loop is the single
//! writer of the [`StreamTracker`](crate::tracker::StreamTracker); activation
//! downloads run as separate tasks after the snapshot is taken.

mod filter;
mod run;

pub use filter::RequestFilter;
pub use run::{run_event_loop, LoopOutput};

use serde::{Deserialize, Serialize};

use crate::media::ResponseHeader;
use crate::tracker::TabId;

/// One event delivered by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A network request finished.
    RequestCompleted {
        tab_id: TabId,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response_headers: Option<Vec<ResponseHeader>>,
    },
    /// A tab was closed.
    TabRemoved { tab_id: TabId },
    /// The user clicked the action for a tab.
    ActionClicked {
        #[serde(default)]
        tab_id: Option<TabId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_lines_events() {
        let line = r#"{"type":"request_completed","tab_id":4,"url":"https://x/videoplayback?clen=1","response_headers":[{"name":"Content-Length","value":"9"}]}"#;
        let ev: HostEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            ev,
            HostEvent::RequestCompleted {
                tab_id: 4,
                url: "https://x/videoplayback?clen=1".to_string(),
                response_headers: Some(vec![ResponseHeader::new("Content-Length", "9")]),
            }
        );

        let ev: HostEvent =
            serde_json::from_str(r#"{"type":"request_completed","tab_id":-1,"url":"u"}"#).unwrap();
        assert!(matches!(
            ev,
            HostEvent::RequestCompleted {
                response_headers: None,
                ..
            }
        ));

        let ev: HostEvent = serde_json::from_str(r#"{"type":"tab_removed","tab_id":4}"#).unwrap();
        assert_eq!(ev, HostEvent::TabRemoved { tab_id: 4 });

        let ev: HostEvent = serde_json::from_str(r#"{"type":"action_clicked"}"#).unwrap();
        assert_eq!(ev, HostEvent::ActionClicked { tab_id: None });
    }

    #[test]
    fn unknown_event_type_is_an_error() {
        assert!(serde_json::from_str::<HostEvent>(r#"{"type":"tab_moved","tab_id":1}"#).is_err());
    }
}
