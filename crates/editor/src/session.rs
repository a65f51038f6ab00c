use thiserror::Error;

use zephyrpad_backend::{MockBackend, TemplateSummary};
use zephyrpad_highlight::highlight_html;
use zephyrpad_project::{build_tree, Project, TreeNode};
use zephyrpad_runtime::{Orchestrator, WasmHost};

use crate::explorer::ExplorerState;

/// Name a project carries before the user has picked one; saving under it
/// is rejected.
const UNNAMED_PROJECT: &str = "Untitled Project";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("backend request failed: {0}")]
    Backend(String),
    #[error("a run is already in flight")]
    RunInFlight,
    #[error("the project needs a name before it can be saved")]
    UnnamedProject,
}

/// The playground surface without its pixels: owns the project map, the
/// active file, the console lines and the explorer state, and coordinates
/// the gateway and the run orchestrator. All mutation of the flat map goes
/// through this type.
/// 不含畫面的 Playground 介面：持有專案映射、使用中的檔案、主控台訊息與
/// 檔案總管狀態，並協調閘道與執行協調器。扁平映射的所有變動都經過此型別。
pub struct PlaygroundSession<H: WasmHost> {
    session_id: String,
    project: Project,
    templates: Vec<TemplateSummary>,
    backend: MockBackend,
    orchestrator: Orchestrator<H>,
    console: Vec<String>,
    explorer: ExplorerState,
    active_file: Option<String>,
    is_running: bool,
}

impl<H: WasmHost> PlaygroundSession<H> {
    /// Initializes a session against the gateway and fetches the template
    /// listing.
    /// 向閘道初始化工作階段並取得範本列表。
    pub async fn init(
        backend: MockBackend,
        orchestrator: Orchestrator<H>,
    ) -> Result<Self, EditorError> {
        let init = backend
            .init_session()
            .await
            .into_data()
            .ok_or_else(|| EditorError::Backend("session initialization failed".into()))?;
        let templates = backend.get_templates().await.into_data().unwrap_or_default();

        let active_file = init.project.first_openable().map(str::to_string);
        Ok(Self {
            session_id: init.session_id,
            project: init.project,
            templates,
            backend,
            orchestrator,
            console: vec!["$ Ready.".to_string()],
            explorer: ExplorerState::new(),
            active_file,
            is_running: false,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn templates(&self) -> &[TemplateSummary] {
        &self.templates
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut ExplorerState {
        &mut self.explorer
    }

    /// Derived explorer forest; rebuilt from the flat map on every call.
    pub fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.project.files)
    }

    /// Row click: folders flip their expansion, files become active.
    /// 點擊列：資料夾切換展開狀態，檔案成為使用中檔案。
    pub fn open(&mut self, path: &str) {
        self.explorer.select(path);
        if path.ends_with('/') {
            self.explorer.toggle(path);
        } else if self.project.files.contains_key(path) {
            self.active_file = Some(path.to_string());
        }
    }

    /// Creates a file or folder and expands its parent so it shows up.
    pub fn create_file(&mut self, path: &str, is_folder: bool) {
        self.project.create_file(path, is_folder);
        self.explorer.reveal(path.trim());
    }

    /// Cascade delete. The caller is expected to have confirmed the
    /// destructive intent with the user.
    /// 連鎖刪除。呼叫端應先向使用者確認破壞性操作。
    pub fn delete_path(&mut self, path: &str) {
        self.project.delete_path(path);
        self.refresh_active_file();
    }

    /// Cascade rename; re-targets the active file when it moved.
    pub fn rename_path(&mut self, old_path: &str, new_path: &str) {
        self.project.rename_path(old_path, new_path);
        self.refresh_active_file();
    }

    pub fn update_content(&mut self, path: &str, content: &str) {
        self.project.update_content(path, content);
    }

    /// Edits flowing from the editor textarea into the active file.
    pub fn update_active_content(&mut self, content: &str) {
        if let Some(path) = self.active_file.clone() {
            self.project.update_content(&path, content);
        }
    }

    /// Span-wrapped markup for the active file, or `None` when nothing is
    /// open.
    pub fn highlighted_active_file(&self) -> Option<String> {
        let path = self.active_file.as_deref()?;
        let file = self.project.files.get(path)?;
        Some(highlight_html(&file.content))
    }

    /// Runs the project and replaces the console with the resulting log.
    /// The running flag is the advisory single-flight guard: a second call
    /// while one run is in flight is rejected instead of interleaving.
    /// 執行專案並以結果取代主控台內容。running 旗標即為建議性的單次執行
    /// 守衛：執行期間的第二次呼叫直接拒絕，不產生交錯輸出。
    pub async fn run(&mut self) -> Result<&[String], EditorError> {
        if self.is_running {
            return Err(EditorError::RunInFlight);
        }
        self.is_running = true;
        self.console = vec!["Initializing runtime...".to_string()];

        let logs = self.orchestrator.execute(&self.project).await;
        self.console = logs;
        self.is_running = false;
        Ok(&self.console)
    }

    pub fn rename_project(&mut self, name: &str) {
        self.project.name = name.to_string();
    }

    /// Persists the current files through the gateway. Rejected until the
    /// project has a real name.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let name = self.project.name.trim();
        if name.is_empty() || name == UNNAMED_PROJECT {
            return Err(EditorError::UnnamedProject);
        }
        let response = self
            .backend
            .save_project(&self.session_id, &self.project.files)
            .await;
        if response.is_success() {
            Ok(())
        } else {
            Err(EditorError::Backend(
                response.message.unwrap_or_else(|| "save failed".into()),
            ))
        }
    }

    /// Returns the opaque share URL for this session.
    pub async fn share(&self) -> Result<String, EditorError> {
        self.backend
            .share_project(&self.session_id)
            .await
            .into_data()
            .map(|link| link.url)
            .ok_or_else(|| EditorError::Backend("share failed".into()))
    }

    /// Replaces the whole session with a template: new session id, new
    /// project map (no diffing against the old one), cleared console and
    /// explorer state. Destructive — unsaved changes are discarded, so the
    /// surface must confirm with the user first.
    /// 以範本整批取代工作階段：新的識別碼、新的專案映射（不與舊狀態比對）、
    /// 清空的主控台與總管狀態。具破壞性，介面必須先向使用者確認。
    pub async fn load_template(&mut self, template_id: &str) -> Result<(), EditorError> {
        let init = self
            .backend
            .load_template(template_id)
            .await
            .into_data()
            .ok_or_else(|| EditorError::Backend("template load failed".into()))?;

        tracing::debug!(template_id, session_id = %init.session_id, "template loaded");
        self.session_id = init.session_id;
        self.active_file = init.project.first_openable().map(str::to_string);
        self.project = init.project;
        self.console.clear();
        self.explorer = ExplorerState::new();
        Ok(())
    }

    /// Keeps the active file pointing at an existing entry after a
    /// structural change.
    fn refresh_active_file(&mut self) {
        let stale = self
            .active_file
            .as_deref()
            .map(|path| !self.project.files.contains_key(path))
            .unwrap_or(true);
        if stale {
            self.active_file = self.project.first_openable().map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use zephyrpad_runtime::{RuntimeConfig, UnavailableHost};

    use super::*;

    async fn session() -> PlaygroundSession<UnavailableHost> {
        let orchestrator = Orchestrator::new(UnavailableHost, RuntimeConfig::default());
        PlaygroundSession::init(MockBackend::instant(), orchestrator)
            .await
            .expect("session init")
    }

    #[tokio::test]
    async fn init_opens_the_entry_file() {
        let session = session().await;
        assert_eq!(session.active_file(), Some("src/main.zy"));
        assert_eq!(session.console(), ["$ Ready."]);
        assert!(!session.templates().is_empty());
    }

    #[tokio::test]
    async fn open_toggles_folders_and_activates_files() {
        let mut session = session().await;
        session.open("src/");
        assert!(!session.explorer().is_expanded("src/"));
        // a folder click never steals the active file
        assert_eq!(session.active_file(), Some("src/main.zy"));

        session.create_file("notes.md", false);
        session.open("notes.md");
        assert_eq!(session.active_file(), Some("notes.md"));
    }

    #[tokio::test]
    async fn deleting_the_active_file_falls_back_to_the_entry() {
        let mut session = session().await;
        session.create_file("scratch.zy", false);
        session.open("scratch.zy");
        session.delete_path("scratch.zy");
        assert_eq!(session.active_file(), Some("src/main.zy"));
    }

    #[tokio::test]
    async fn renaming_the_active_folder_retargets_the_editor() {
        let mut session = session().await;
        session.rename_path("src/", "lib/");
        assert_eq!(session.active_file(), Some("lib/main.zy"));
        assert!(session.tree().iter().any(|node| node.path == "lib/"));
    }

    #[tokio::test]
    async fn run_is_guarded_against_reentry_only_while_in_flight() {
        let mut session = session().await;
        session.run().await.expect("first run");
        // the flag is cleared once the run completes
        session.run().await.expect("second run");
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn save_requires_a_real_project_name() {
        let mut session = session().await;
        session.rename_project("Untitled Project");
        assert_eq!(session.save().await, Err(EditorError::UnnamedProject));
        session.rename_project("My Deploy Tool");
        assert_eq!(session.save().await, Ok(()));
    }

    #[tokio::test]
    async fn highlighting_follows_the_active_file() {
        let mut session = session().await;
        session.update_active_content("echo \"<b>\";");
        let html = session.highlighted_active_file().expect("markup");
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
