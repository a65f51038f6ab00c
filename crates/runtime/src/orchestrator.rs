use zephyrpad_project::Project;

use crate::config::RuntimeConfig;
use crate::loader::{ModuleLoader, WasmHost};
use crate::mock::mock_execute;
use crate::RuntimeError;

/// Phases of a single run. There is no cancellation: a run always reaches
/// `Done`, and all failure is folded into the returned log lines.
/// 單次執行的階段。不支援取消：執行必定到達 `Done`，所有失敗都收進回傳的
/// 紀錄之中。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Compiling,
    Running,
    FallbackMock,
    Done,
}

fn enter(phase: RunPhase) {
    tracing::debug!(?phase, "run phase");
}

/// Coordinates "compile & run" requests for a project. Owns the module
/// loader (injected host, single-flight load) and the fallback mock.
/// Calling `execute` twice concurrently is not defended here; the surface
/// holds an advisory single-run guard.
/// 協調專案的「編譯並執行」請求。持有模組載入器（注入的 host、單一進行中
/// 載入）與模擬退路。此處不防禦並行呼叫 `execute`；單次執行的守衛由編輯
/// 介面以旗標方式提供。
#[derive(Debug)]
pub struct Orchestrator<H> {
    loader: ModuleLoader<H>,
    config: RuntimeConfig,
}

impl<H: WasmHost> Orchestrator<H> {
    pub fn new(host: H, config: RuntimeConfig) -> Self {
        let loader = ModuleLoader::new(host, config.module_url.clone());
        Self { loader, config }
    }

    pub fn loader(&self) -> &ModuleLoader<H> {
        &self.loader
    }

    /// Runs the project's entry file and returns the ordered console log.
    /// Never errors: a missing entry point yields a single error line (no
    /// header), and any real-path failure is reported in the log followed
    /// by the mock interpreter's output.
    /// 執行專案進入點並回傳有序的主控台紀錄。絕不回傳錯誤：缺少進入點時
    /// 產生單行錯誤訊息（無標頭），真實路徑的任何失敗都寫入紀錄，之後接上
    /// 模擬直譯器的輸出。
    pub async fn execute(&self, project: &Project) -> Vec<String> {
        enter(RunPhase::Idle);
        let Some((_, entry)) = project.entry_file() else {
            enter(RunPhase::Done);
            return vec!["Error: No entry point found in project.".to_string()];
        };

        let mut logs = vec![format!("> zephyr run {}", entry.name)];

        if self.config.use_module {
            if let Err(error) = self.run_module(&entry.content, &mut logs).await {
                tracing::warn!(%error, "runtime module failed, falling back");
                logs.push(format!("Runtime Error: {error}"));
                logs.push("Falling back to mock runtime...".to_string());
                enter(RunPhase::FallbackMock);
                mock_execute(&entry.content, &mut logs);
            }
        } else {
            enter(RunPhase::FallbackMock);
            mock_execute(&entry.content, &mut logs);
        }

        enter(RunPhase::Done);
        logs
    }

    async fn run_module(
        &self,
        code: &str,
        logs: &mut Vec<String>,
    ) -> Result<(), RuntimeError> {
        enter(RunPhase::Compiling);
        self.loader.ensure_loaded().await?;
        logs.push("Compiling to WASM... [Ok]".to_string());
        logs.push("Running...".to_string());

        enter(RunPhase::Running);
        let output = self.loader.run_code(code).await?;
        logs.extend(output.split('\n').map(str::to_string));
        Ok(())
    }
}
