use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use zephyrpad_project::{Project, ProjectFile};

use crate::templates::{catalogue, TemplateSummary, DEFAULT_TEMPLATE_ID};

/// Outcome marker carried by every gateway envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{status, data?, message?}` envelope returned by every operation.
/// 所有操作回傳的 `{status, data?, message?}` 信封。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> BackendResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Payload for session initialization and template loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInit {
    pub session_id: String,
    pub project: Project,
}

/// Opaque shareable URL keyed by session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub url: String,
}

// Base latency per operation, in milliseconds.
const TEMPLATES_MS: u64 = 300;
const INIT_MS: u64 = 800;
const LOAD_MS: u64 = 600;
const SAVE_MS: u64 = 500;
const SHARE_MS: u64 = 600;

/// Simulated backend. Each operation sleeps for its configured latency and
/// answers from the in-process template catalogue; nothing is persisted,
/// so `save_project` is an idempotent upsert with no conflict detection.
/// 模擬後端。每個操作依設定的延遲先休眠，再由行程內的範本目錄回應；不做
/// 任何持久化，因此 `save_project` 是冪等的覆寫且沒有衝突偵測。
#[derive(Debug, Clone)]
pub struct MockBackend {
    latency_scale: f32,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self { latency_scale: 1.0 }
    }

    /// Zero-latency variant for tests.
    /// 測試用的零延遲版本。
    pub fn instant() -> Self {
        Self { latency_scale: 0.0 }
    }

    async fn delay(&self, base_ms: u64) {
        let millis = (base_ms as f32 * self.latency_scale) as u64;
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    /// Lists the available project templates.
    pub async fn get_templates(&self) -> BackendResponse<Vec<TemplateSummary>> {
        self.delay(TEMPLATES_MS).await;
        BackendResponse::success(catalogue().iter().map(TemplateSummary::of).collect())
    }

    /// Allocates a fresh session seeded with the default template.
    /// 配置新的工作階段，內容為預設範本。
    pub async fn init_session(&self) -> BackendResponse<SessionInit> {
        self.delay(INIT_MS).await;
        self.session_from_template(DEFAULT_TEMPLATE_ID)
    }

    /// Returns a new session holding the named template's project. Unknown
    /// ids fall back to the first catalogue entry. Destructive for the
    /// caller (unsaved state is discarded wholesale); confirmation is a UX
    /// concern at the surface.
    /// 回傳持有指定範本專案的新工作階段。未知的識別碼退回目錄第一項。對呼叫
    /// 端而言是破壞性操作（未儲存狀態整批捨棄）；確認流程由介面層負責。
    pub async fn load_template(&self, template_id: &str) -> BackendResponse<SessionInit> {
        self.delay(LOAD_MS).await;
        self.session_from_template(template_id)
    }

    /// Idempotent upsert of a session's files. No conflict detection.
    pub async fn save_project(
        &self,
        session_id: &str,
        files: &BTreeMap<String, ProjectFile>,
    ) -> BackendResponse<()> {
        self.delay(SAVE_MS).await;
        tracing::debug!(session_id, files = files.len(), "saved project");
        BackendResponse::success(())
    }

    /// Produces the opaque shareable URL for a session.
    pub async fn share_project(&self, session_id: &str) -> BackendResponse<ShareLink> {
        self.delay(SHARE_MS).await;
        BackendResponse::success(ShareLink {
            url: format!("https://zephyr.dev/p/{session_id}"),
        })
    }

    fn session_from_template(&self, template_id: &str) -> BackendResponse<SessionInit> {
        let templates = catalogue();
        let Some(template) = templates
            .iter()
            .find(|t| t.id == template_id)
            .or_else(|| templates.first())
        else {
            return BackendResponse::error("template catalogue is empty");
        };

        let session_id = new_session_id();
        let mut project = template.clone();
        project.id = session_id.clone();
        BackendResponse::success(SessionInit {
            session_id,
            project,
        })
    }
}

/// Eight random base-36 characters, mirroring the opaque ids the surface
/// shows in share URLs.
fn new_session_id() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn templates_listing_matches_catalogue() {
        let backend = MockBackend::instant();
        let response = backend.get_templates().await;
        assert!(response.is_success());
        let summaries = response.into_data().expect("data");
        assert_eq!(summaries.len(), catalogue().len());
        assert_eq!(summaries[0].id, DEFAULT_TEMPLATE_ID);
    }

    #[tokio::test]
    async fn init_session_uses_the_default_template() {
        let backend = MockBackend::instant();
        let init = backend.init_session().await.into_data().expect("data");
        assert_eq!(init.session_id.len(), 8);
        assert_eq!(init.project.id, init.session_id);
        assert_eq!(init.project.name, "CLI Deploy Tool");
        assert!(init.project.entry_file().is_some());
    }

    #[tokio::test]
    async fn load_template_allocates_a_fresh_session_id() {
        let backend = MockBackend::instant();
        let first = backend.load_template("im-system").await.into_data().expect("data");
        let second = backend.load_template("im-system").await.into_data().expect("data");
        assert_eq!(first.project.name, "High-Perf IM System");
        assert_ne!(first.session_id, second.session_id);
    }

    #[tokio::test]
    async fn unknown_template_falls_back_to_the_first_entry() {
        let backend = MockBackend::instant();
        let init = backend.load_template("nope").await.into_data().expect("data");
        assert_eq!(init.project.name, catalogue()[0].name);
    }

    #[tokio::test]
    async fn save_and_share_round_trip() {
        let backend = MockBackend::instant();
        let init = backend.init_session().await.into_data().expect("data");
        let saved = backend
            .save_project(&init.session_id, &init.project.files)
            .await;
        assert!(saved.is_success());

        let link = backend
            .share_project(&init.session_id)
            .await
            .into_data()
            .expect("data");
        assert_eq!(link.url, format!("https://zephyr.dev/p/{}", init.session_id));
    }

    #[tokio::test(start_paused = true)]
    async fn operations_wait_out_their_simulated_latency() {
        let backend = MockBackend::new();
        let before = tokio::time::Instant::now();
        backend.get_templates().await;
        assert_eq!(before.elapsed(), Duration::from_millis(300));
    }
}
