//! Replayed selection state
//!
//! Serves recorded selection/check states to the wait command instead of a
//! live browser. A timeline is a list of frames keyed by the offset (from the
//! first query) at which each state becomes current.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use async_trait::async_trait;
use selwait_core_types::DriverError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tool_wait_selected::ports::StatePort;
use tool_wait_selected::SelectionQuery;
use tracing::trace;

const DEFAULT_FAILURE: &str = "replayed transport failure";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read timeline {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse timeline: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("timeline has no frames")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub at_ms: u64,
    pub state: SelectionQuery,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTimeline {
    pub frames: Vec<TimelineFrame>,
    /// Every query from this offset on fails with a transport error.
    #[serde(default)]
    pub fail_after_ms: Option<u64>,
    #[serde(default)]
    pub fail_message: Option<String>,
}

impl SelectionTimeline {
    /// Parses YAML or JSON and orders frames by offset.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ReplayError> {
        let mut timeline: SelectionTimeline = serde_yaml::from_str(raw)?;
        if timeline.frames.is_empty() {
            return Err(ReplayError::Empty);
        }
        timeline.frames.sort_by_key(|frame| frame.at_ms);
        Ok(timeline)
    }

    pub async fn load(path: &Path) -> Result<Self, ReplayError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|source| ReplayError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml_str(&raw)
    }

    /// State current at `elapsed_ms`, if any frame has started.
    pub fn state_at(&self, elapsed_ms: u64) -> Option<&SelectionQuery> {
        self.frames
            .iter()
            .take_while(|frame| frame.at_ms <= elapsed_ms)
            .last()
            .map(|frame| &frame.state)
    }
}

pub struct ReplayStatePort {
    timeline: SelectionTimeline,
    started: OnceLock<Instant>,
}

impl ReplayStatePort {
    pub fn new(timeline: SelectionTimeline) -> Self {
        Self {
            timeline,
            started: OnceLock::new(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        let started = *self.started.get_or_init(Instant::now);
        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl StatePort for ReplayStatePort {
    async fn is_selected(&self, selector: Option<&str>) -> Result<SelectionQuery, DriverError> {
        let elapsed_ms = self.elapsed_ms();
        trace!(selector = selector.unwrap_or(""), elapsed_ms, "replaying selection state");

        if let Some(fail_after) = self.timeline.fail_after_ms {
            if elapsed_ms >= fail_after {
                let message = self.timeline.fail_message.as_deref().unwrap_or(DEFAULT_FAILURE);
                return Err(DriverError::transport(message));
            }
        }

        self.timeline
            .state_at(elapsed_ms)
            .cloned()
            .ok_or_else(|| DriverError::new(format!("no recorded state at {}ms", elapsed_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const TIMELINE: &str = r#"
frames:
  - at_ms: 40
    state: [false, true]
  - at_ms: 0
    state: false
"#;

    #[test]
    fn frames_are_ordered_and_looked_up_by_offset() {
        let timeline = SelectionTimeline::from_yaml_str(TIMELINE).expect("valid timeline");
        assert_eq!(timeline.frames[0].at_ms, 0);
        assert_eq!(timeline.state_at(10), Some(&SelectionQuery::Single(false)));
        assert_eq!(
            timeline.state_at(40),
            Some(&SelectionQuery::Many(vec![false, true]))
        );
    }

    #[test]
    fn empty_timeline_is_rejected() {
        assert!(matches!(
            SelectionTimeline::from_yaml_str("frames: []"),
            Err(ReplayError::Empty)
        ));
    }

    #[tokio::test]
    async fn loads_json_timeline_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"frames": [{{"at_ms": 0, "state": true}}], "fail_after_ms": 1000}}"#
        )
        .expect("write timeline");

        let timeline = SelectionTimeline::load(file.path()).await.expect("load");
        assert_eq!(timeline.fail_after_ms, Some(1000));
        assert_eq!(timeline.state_at(0), Some(&SelectionQuery::Single(true)));
    }

    #[tokio::test]
    async fn port_serves_states_as_time_passes() {
        let port = ReplayStatePort::new(SelectionTimeline::from_yaml_str(TIMELINE).expect("valid"));
        assert_eq!(
            port.is_selected(Some("#a")).await,
            Ok(SelectionQuery::Single(false))
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(
            port.is_selected(Some("#a")).await,
            Ok(SelectionQuery::Many(vec![false, true]))
        );
    }

    #[tokio::test]
    async fn port_fails_before_first_frame_and_after_cutoff() {
        let late = SelectionTimeline::from_yaml_str("frames:\n  - at_ms: 10000\n    state: true\n")
            .expect("valid");
        let err = ReplayStatePort::new(late).is_selected(None).await.unwrap_err();
        assert_eq!(err.kind(), "message");
        assert!(err.to_string().starts_with("no recorded state at "));

        let failing = SelectionTimeline::from_yaml_str(
            "frames:\n  - at_ms: 0\n    state: true\nfail_after_ms: 0\nfail_message: NetworkError\n",
        )
        .expect("valid");
        let err = ReplayStatePort::new(failing).is_selected(None).await.unwrap_err();
        assert_eq!(err, DriverError::transport("NetworkError"));
    }
}
