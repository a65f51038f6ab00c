//! Run orchestration for ZephyrPad: loads the external WASM runtime module
//! at most once, delegates execution to it, and falls back to a
//! deterministic mock interpreter whenever the real path is unavailable.
//! ZephyrPad 的執行協調：外部 WASM 執行期模組至多載入一次，執行委派給它，
//! 真實路徑不可用時退回決定性的模擬直譯器。
//!
//! All failure is captured into console log lines; `execute` never returns
//! an error to its caller.

mod config;
mod loader;
mod mock;
mod orchestrator;

use thiserror::Error;

pub use config::{RuntimeConfig, DEFAULT_MODULE_URL};
pub use loader::{ModuleLoader, UnavailableHost, WasmHost};
pub use mock::mock_execute;
pub use orchestrator::{Orchestrator, RunPhase};

/// Errors raised on the real execution path. Every variant is downgraded
/// to a console log line by the orchestrator; none escape `execute`.
/// 真實執行路徑可能發生的錯誤。協調器會將所有錯誤降級為主控台訊息，
/// 不會從 `execute` 洩漏出去。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("failed to fetch runtime module: {0}")]
    Fetch(String),
    #[error("failed to instantiate runtime module: {0}")]
    Instantiate(String),
    #[error("runtime module not ready")]
    NotReady,
    #[error("execution failed: {0}")]
    Execution(String),
}
