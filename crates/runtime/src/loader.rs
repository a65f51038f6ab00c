use tokio::sync::OnceCell;

use crate::RuntimeError;

/// Handle to the external runtime module. The module exposes exactly one
/// asynchronous execution entry point taking the raw source text and
/// returning its whole output as a single string; no richer contract is
/// assumed. Implementations are injected so tests can substitute fakes.
/// 外部執行期模組的介面。模組只提供單一非同步執行入口，吃原始碼字串並一次
/// 回傳全部輸出；不假設更多協定。以注入方式提供實作，便於測試替換。
#[allow(async_fn_in_trait)]
pub trait WasmHost {
    /// Fetches and instantiates the module binary at `url`.
    async fn instantiate(&self, url: &str) -> Result<(), RuntimeError>;

    /// Invokes the module's execution entry point with raw source text.
    async fn run_code(&self, code: &str) -> Result<String, RuntimeError>;
}

/// Host for environments with no runtime module wired in; every call
/// reports the module as unavailable so the orchestrator falls back to the
/// mock interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableHost;

impl WasmHost for UnavailableHost {
    async fn instantiate(&self, _url: &str) -> Result<(), RuntimeError> {
        Err(RuntimeError::NotReady)
    }

    async fn run_code(&self, _code: &str) -> Result<String, RuntimeError> {
        Err(RuntimeError::NotReady)
    }
}

/// Owns a host and loads the module at most once. Loading is guarded by a
/// single in-flight attempt: a second caller while a load is running
/// awaits that same attempt instead of starting a duplicate fetch, and a
/// call after a successful load is a no-op. A failed attempt leaves the
/// cell empty, so the next run retries.
/// 持有 host 並確保模組至多載入一次。載入以單一進行中請求做保護：載入期間
/// 的第二個呼叫會等待同一次嘗試，不會重複抓取；成功之後的呼叫則不做任何事。
/// 失敗的嘗試不會佔住快取，下次執行會重試。
#[derive(Debug)]
pub struct ModuleLoader<H> {
    host: H,
    module_url: String,
    loaded: OnceCell<()>,
}

impl<H: WasmHost> ModuleLoader<H> {
    pub fn new(host: H, module_url: impl Into<String>) -> Self {
        Self {
            host,
            module_url: module_url.into(),
            loaded: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Idempotent lazy load of the module binary.
    pub async fn ensure_loaded(&self) -> Result<(), RuntimeError> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::debug!(url = %self.module_url, "loading runtime module");
                self.host.instantiate(&self.module_url).await
            })
            .await?;
        Ok(())
    }

    /// Delegates to the module's execution entry point.
    pub async fn run_code(&self, code: &str) -> Result<String, RuntimeError> {
        self.host.run_code(code).await
    }
}
