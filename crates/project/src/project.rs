use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::file::{default_content, last_segment, Language, ProjectFile};

/// A small virtual project: metadata plus the flat `path → file` map that
/// every other component derives its view from. The `BTreeMap` keeps keys
/// in lexicographic order, which the tree builder relies on for its stable
/// base ordering.
/// 小型虛擬專案：中繼資料加上扁平的「路徑 → 檔案」映射，所有元件的檢視都由
/// 它衍生。`BTreeMap` 保持鍵值的字典序，樹狀建構器以此為穩定的基礎排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub files: BTreeMap<String, ProjectFile>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            files: BTreeMap::new(),
        }
    }

    /// Builder-style insertion used by the template catalogue.
    /// 範本目錄使用的建構式插入。
    pub fn with_file(mut self, path: impl Into<String>, file: ProjectFile) -> Self {
        self.files.insert(path.into(), file);
        self
    }

    /// Returns the entry-flagged file, if any.
    pub fn entry_file(&self) -> Option<(&str, &ProjectFile)> {
        self.files
            .iter()
            .find(|(_, file)| file.is_entry)
            .map(|(path, file)| (path.as_str(), file))
    }

    /// Path the surface should open first: the entry file when one exists,
    /// otherwise the first key that is not a folder.
    /// 編輯介面預設開啟的路徑：優先為進入點，否則取第一個非資料夾的鍵。
    pub fn first_openable(&self) -> Option<&str> {
        if let Some((path, _)) = self.entry_file() {
            return Some(path);
        }
        self.files
            .keys()
            .find(|path| !path.ends_with('/'))
            .map(String::as_str)
    }

    /// Inserts a new file or folder entry. Folders are normalized to carry
    /// a trailing `/` and hold an empty placeholder; files receive default
    /// content by extension. An empty path (after trimming) is a silent
    /// no-op, and an existing key is overwritten (last write wins).
    /// 新增檔案或資料夾項目。資料夾一律補上結尾 `/` 並存入空白佔位內容；
    /// 檔案依副檔名填入預設內容。修剪後為空的路徑不做任何事；鍵已存在時
    /// 直接覆寫（後寫者勝）。
    pub fn create_file(&mut self, path: &str, is_folder: bool) {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return;
        }
        let mut key = trimmed.to_string();
        if is_folder && !key.ends_with('/') {
            key.push('/');
        }

        let name = last_segment(&key).to_string();
        let language = if is_folder {
            Language::Markdown
        } else {
            Language::from_path(&key)
        };
        let content = if is_folder {
            String::new()
        } else {
            default_content(&key).to_string()
        };

        self.files.insert(
            key,
            ProjectFile {
                name,
                content,
                language,
                is_entry: false,
            },
        );
    }

    /// Removes the entry at `path` together with every key sharing it as a
    /// string prefix, which is how folder deletion cascades without a tree
    /// walk. Unknown paths are a no-op. Confirming destructive intent is
    /// the caller's job.
    /// 刪除 `path` 本身以及所有以它為字首的鍵，資料夾的連鎖刪除即由此達成，
    /// 不需要走訪樹。不存在的路徑不做任何事；破壞性操作的確認由呼叫端負責。
    pub fn delete_path(&mut self, path: &str) {
        if path.is_empty() {
            return;
        }
        self.files.retain(|key, _| !key.starts_with(path));
    }

    /// Moves an entry to a new path. Folder renames (old path ends with
    /// `/`) cascade over every key sharing the prefix, with the new prefix
    /// normalized to end with `/`; file renames move a single key with the
    /// trailing `/` stripped. Each moved entry's display name is recomputed
    /// from its new path. Collisions overwrite silently (last write wins).
    /// 將項目搬移到新路徑。資料夾更名（舊路徑以 `/` 結尾）會連鎖套用到所有
    /// 共享該字首的鍵，新字首一律補上結尾 `/`；檔案更名只搬移單一鍵並去除
    /// 結尾 `/`。每個搬移後的項目都重新計算顯示名稱。路徑衝突時直接覆寫。
    pub fn rename_path(&mut self, old_path: &str, new_path: &str) {
        if old_path.is_empty() || new_path.is_empty() || old_path == new_path {
            return;
        }

        if old_path.ends_with('/') {
            let mut prefix = new_path.to_string();
            if !prefix.ends_with('/') {
                prefix.push('/');
            }
            let moved: Vec<String> = self
                .files
                .keys()
                .filter(|key| key.starts_with(old_path))
                .cloned()
                .collect();
            for key in moved {
                if let Some(mut file) = self.files.remove(&key) {
                    let target = format!("{prefix}{}", &key[old_path.len()..]);
                    file.name = last_segment(&target).to_string();
                    self.files.insert(target, file);
                }
            }
        } else {
            let target = new_path.strip_suffix('/').unwrap_or(new_path);
            if target.is_empty() {
                return;
            }
            if let Some(mut file) = self.files.remove(old_path) {
                file.name = last_segment(target).to_string();
                self.files.insert(target.to_string(), file);
            }
        }
    }

    /// Replaces the content of an existing file entry; unknown or folder
    /// paths are ignored.
    /// 取代既有檔案項目的內容；未知路徑或資料夾路徑則忽略。
    pub fn update_content(&mut self, path: &str, content: &str) {
        if let Some(file) = self.files.get_mut(path) {
            file.content = content.to_string();
        }
    }
}
