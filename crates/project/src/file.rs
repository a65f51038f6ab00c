use serde::{Deserialize, Serialize};

/// Stub inserted into a freshly created Zephyr source file.
pub const ZEPHYR_STUB: &str = "function main() {\n    \n}";

/// Source language associated with a file entry, used by the rendering
/// surface to pick a highlighter.
/// 檔案項目對應的原始碼語言，供渲染層選擇語法著色器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zephyr,
    Json,
    Markdown,
    Html,
}

impl Language {
    /// Classifies a path by extension; anything unrecognized is treated as
    /// Zephyr source.
    /// 依副檔名判斷語言；無法辨識的副檔名一律視為 Zephyr 原始碼。
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(".json") {
            Language::Json
        } else if path.ends_with(".md") {
            Language::Markdown
        } else if path.ends_with(".html") {
            Language::Html
        } else {
            Language::Zephyr
        }
    }
}

/// A single file entry inside the flat project map. Identity is the path
/// the entry is stored under; `name` is display-only and always mirrors the
/// last non-empty path segment.
/// 扁平專案映射中的單一檔案項目。身份由儲存路徑決定；`name` 僅供顯示，
/// 恆等於路徑最後一個非空白片段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub content: String,
    pub language: Language,
    #[serde(default)]
    pub is_entry: bool,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            language,
            is_entry: false,
        }
    }

    /// Marks this file as the program entry point. At most one file per
    /// project should carry the flag; this is advisory, not enforced.
    /// 將檔案標記為程式進入點。每個專案應僅有一個進入點，但不在此強制。
    pub fn as_entry(mut self) -> Self {
        self.is_entry = true;
        self
    }
}

/// Returns the last non-empty `/`-separated segment, falling back to the
/// whole path when there is none (e.g. `"/"`).
/// 回傳路徑最後一個非空白片段；若不存在（例如 `"/"`）則回傳整個路徑。
pub fn last_segment(path: &str) -> &str {
    path.split('/').filter(|s| !s.is_empty()).next_back().unwrap_or(path)
}

/// Default content for a newly created file, chosen by extension.
pub fn default_content(path: &str) -> &'static str {
    if path.ends_with(".zy") {
        ZEPHYR_STUB
    } else {
        ""
    }
}
