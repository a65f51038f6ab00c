use std::collections::BTreeSet;

/// Returns the parent folder prefix of a path (`"src/a.zy"` → `"src/"`,
/// `"src/sub/"` → `"src/"`), or `None` for a top-level entry.
/// 回傳路徑的上層資料夾字首；頂層項目回傳 `None`。
pub fn parent_prefix(path: &str) -> Option<String> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    trimmed
        .rfind('/')
        .map(|index| trimmed[..=index].to_string())
}

/// Presentation state for the file explorer: which folders are expanded
/// and which row is selected, both addressed by path string. This is kept
/// entirely outside the tree component and never influences tree
/// construction or ordering.
/// 檔案總管的顯示狀態：展開的資料夾與目前選取的列，皆以路徑字串定位。完全
/// 獨立於樹狀元件之外，不影響樹的建構與排序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerState {
    expanded: BTreeSet<String>,
    selected: Option<String>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerState {
    /// Fresh state with the conventional source folder pre-expanded.
    pub fn new() -> Self {
        let mut expanded = BTreeSet::new();
        expanded.insert("src/".to_string());
        Self {
            expanded,
            selected: None,
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Folder-row click: flip the expansion state.
    pub fn toggle(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
    }

    pub fn expand(&mut self, path: &str) {
        self.expanded.insert(path.to_string());
    }

    /// Expands the parent folder of `path` so a freshly created entry is
    /// immediately visible.
    /// 展開 `path` 的上層資料夾，讓新建項目立即可見。
    pub fn reveal(&mut self, path: &str) {
        if let Some(parent) = parent_prefix(path) {
            self.expanded.insert(parent);
        }
    }

    pub fn select(&mut self, path: &str) {
        self.selected = Some(path.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Folder prefix a new entry should be created under, derived from the
    /// current selection: a selected folder is used directly, a selected
    /// file contributes its parent, and no selection means the top level.
    /// 新項目應建立於哪個資料夾字首：選取資料夾時直接使用；選取檔案時取其
    /// 上層；沒有選取則為頂層。
    pub fn creation_prefix(&self) -> String {
        match self.selected.as_deref() {
            Some(path) if path.ends_with('/') => path.to_string(),
            Some(path) => parent_prefix(path).unwrap_or_default(),
            None => String::new(),
        }
    }
}
