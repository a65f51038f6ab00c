use serde::{Deserialize, Serialize};

/// Fixed location of the Zephyr runtime module binary.
pub const DEFAULT_MODULE_URL: &str = "/wasm/zephyr.wasm";

/// Run-path configuration. With `use_module` disabled the orchestrator
/// skips the real runtime entirely and goes straight to the mock
/// interpreter.
/// 執行路徑設定。停用 `use_module` 時，協調器完全跳過真實執行期，
/// 直接使用模擬直譯器。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_module_url")]
    pub module_url: String,
    #[serde(default = "default_use_module")]
    pub use_module: bool,
}

fn default_module_url() -> String {
    DEFAULT_MODULE_URL.to_string()
}

fn default_use_module() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            module_url: default_module_url(),
            use_module: true,
        }
    }
}

impl RuntimeConfig {
    /// Configuration that never touches the module path; useful for tests
    /// and for deployments that ship without the WASM binary.
    /// 完全不走模組路徑的設定；適用於測試或未附帶 WASM 檔案的部署。
    pub fn mock_only() -> Self {
        Self {
            use_module: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_fixed_module_url() {
        let config = RuntimeConfig::default();
        assert_eq!(config.module_url, DEFAULT_MODULE_URL);
        assert!(config.use_module);
        assert!(!RuntimeConfig::mock_only().use_module);
    }
}
