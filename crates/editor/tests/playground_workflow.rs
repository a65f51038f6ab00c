use zephyrpad_backend::MockBackend;
use zephyrpad_editor::PlaygroundSession;
use zephyrpad_runtime::{Orchestrator, RuntimeConfig, RuntimeError, UnavailableHost, WasmHost};

#[tokio::test]
async fn end_to_end_playground_flow_with_fallback_runtime() {
    // No runtime module wired in: every run takes the mock path.
    let orchestrator = Orchestrator::new(UnavailableHost, RuntimeConfig::default());
    let mut session = PlaygroundSession::init(MockBackend::instant(), orchestrator)
        .await
        .expect("session init");

    // The default template opens on its entry file.
    assert_eq!(session.active_file(), Some("src/main.zy"));
    assert!(session.templates().iter().any(|t| t.id == "im-system"));

    // Grow the project: a folder, a file inside it, and an edit.
    session.create_file("docs", true);
    session.create_file("docs/readme.md", false);
    assert!(session.explorer().is_expanded("docs/"));
    session.open("docs/readme.md");
    session.update_active_content("# Zephyr notes");
    assert_eq!(
        session.project().files["docs/readme.md"].content,
        "# Zephyr notes"
    );

    // The derived tree orders folders before files at every level.
    let tree = session.tree();
    let top: Vec<&str> = tree.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(top, ["docs", "src"]);

    // Rename the docs folder and confirm the cascade.
    session.rename_path("docs/", "manual/");
    assert!(session.project().files.contains_key("manual/readme.md"));
    assert!(!session.project().files.contains_key("docs/readme.md"));

    // Run: module unavailable, so the console shows the fallback story.
    let logs = session.run().await.expect("run").to_vec();
    assert_eq!(logs[0], "> zephyr run main.zy");
    assert_eq!(logs[1], "Runtime Error: runtime module not ready");
    assert_eq!(logs[2], "Falling back to mock runtime...");
    assert_eq!(logs[3], "=== Zephyr CLI v1.0 ===");
    assert_eq!(logs.last().map(String::as_str), Some("Program exited with code 0."));

    // Save needs a real name, then succeeds.
    session.rename_project("Deploy Helper");
    session.save().await.expect("save");

    // Sharing hands back the opaque session URL.
    let url = session.share().await.expect("share");
    assert_eq!(url, format!("https://zephyr.dev/p/{}", session.session_id()));
}

#[tokio::test]
async fn loading_a_template_swaps_the_whole_session() {
    let orchestrator = Orchestrator::new(UnavailableHost, RuntimeConfig::default());
    let mut session = PlaygroundSession::init(MockBackend::instant(), orchestrator)
        .await
        .expect("session init");

    let old_id = session.session_id().to_string();
    session.create_file("scratch.zy", false);

    session
        .load_template("im-system")
        .await
        .expect("template load");

    // New id, new map, nothing carried over.
    assert_ne!(session.session_id(), old_id);
    assert!(!session.project().files.contains_key("scratch.zy"));
    assert_eq!(session.project().name, "High-Perf IM System");
    assert!(session.console().is_empty());

    // The websocket template drives the deterministic fallback sequence.
    let logs = session.run().await.expect("run").to_vec();
    assert_eq!(logs[3], "[WS] Listening on :8080");
}

#[tokio::test]
async fn run_against_a_healthy_module_streams_its_output() {
    struct EchoHost;

    impl WasmHost for EchoHost {
        async fn instantiate(&self, _url: &str) -> Result<(), RuntimeError> {
            Ok(())
        }

        async fn run_code(&self, code: &str) -> Result<String, RuntimeError> {
            Ok(format!("ran {} bytes", code.len()))
        }
    }

    let orchestrator = Orchestrator::new(EchoHost, RuntimeConfig::default());
    let mut session = PlaygroundSession::init(MockBackend::instant(), orchestrator)
        .await
        .expect("session init");

    let logs = session.run().await.expect("run").to_vec();
    assert_eq!(logs[0], "> zephyr run main.zy");
    assert_eq!(logs[1], "Compiling to WASM... [Ok]");
    assert_eq!(logs[2], "Running...");
    assert!(logs[3].starts_with("ran "));
}
