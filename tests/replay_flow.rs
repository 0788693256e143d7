use std::io::Write;
use std::sync::Arc;

use assert_cmd::Command;
use selwait_cli::{Config, ReplayStatePort, SelectionTimeline};
use tool_wait_selected::{ExecCtx, WaitSelectedParams, WaitSelectedToolBuilder};

fn timeline_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{}", contents).expect("write timeline");
    file
}

#[tokio::test]
async fn replayed_option_becomes_selected() {
    let file = timeline_file(
        "frames:\n  - at_ms: 0\n    state: [false, false, false]\n  - at_ms: 30\n    state: [true, false, false]\n",
    );
    let timeline = SelectionTimeline::load(file.path()).await.expect("timeline");
    let config = Config {
        waitfor_timeout_ms: 1000,
        waitfor_interval_ms: 10,
    };

    let tool = WaitSelectedToolBuilder::new(config.policy())
        .with_state(Arc::new(ReplayStatePort::new(timeline)))
        .build()
        .expect("tool");
    let report = tool
        .run(ExecCtx::default(), WaitSelectedParams::new("#option1"))
        .await
        .expect("option selected");

    assert!(report.ok);
    assert!(report.attempts >= 2);
}

#[test]
fn cli_reports_timeout_message() {
    let file = timeline_file("frames:\n  - at_ms: 0\n    state: false\n");
    let dir = tempfile::tempdir().expect("temp dir");

    let output = Command::cargo_bin("selwait")
        .expect("binary built")
        .env_remove("SELWAIT_WAITFOR_TIMEOUT_MS")
        .env_remove("SELWAIT_WAITFOR_INTERVAL_MS")
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("wait-selected")
        .arg("--states")
        .arg(file.path())
        .args(["--selector", "#id", "--ms", "50"])
        .output()
        .expect("run selwait");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("element (#id) still not selected after 50ms"));
}

#[test]
fn cli_prints_json_summary_on_success() {
    let file = timeline_file("frames:\n  - at_ms: 0\n    state: false\n");
    let dir = tempfile::tempdir().expect("temp dir");

    let output = Command::cargo_bin("selwait")
        .expect("binary built")
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .args(["--output", "json", "wait-selected", "--reverse"])
        .arg("--states")
        .arg(file.path())
        .args(["--last-selector", "#bound"])
        .output()
        .expect("run selwait");

    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json summary on stdout");
    assert_eq!(summary["ok"], true);
    assert_eq!(summary["attempts"], 1);
}
