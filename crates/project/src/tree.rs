use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::file::ProjectFile;

/// A derived view node; always rebuildable from the flat map and never
/// mutated directly. `path` carries a trailing `/` for folders so the
/// surface can address expanded-folder state by string.
/// 衍生的檢視節點；永遠可由扁平映射重建，且不可直接修改。資料夾的 `path`
/// 帶有結尾 `/`，讓介面能以字串定位展開狀態。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_folder: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Sibling ordering: folders before files, then case-sensitive
/// lexicographic by name.
fn sibling_cmp(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_folder
        .cmp(&a.is_folder)
        .then_with(|| a.name.cmp(&b.name))
}

/// Derives the ordered folder/file forest from the flat map. Paths are
/// walked segment by segment; every segment except the last becomes a
/// synthesized folder (the last one too, when the path explicitly ends
/// with `/`). Deterministic and idempotent: two builds over the same map
/// are structurally identical.
/// 由扁平映射衍生出排序後的資料夾／檔案樹。路徑逐段走訪；除最後一段外每段
/// 都會合成資料夾節點（路徑以 `/` 結尾時最後一段也是資料夾）。建構過程具
/// 決定性且冪等：同一映射建兩次，結構完全相同。
pub fn build_tree(files: &BTreeMap<String, ProjectFile>) -> Vec<TreeNode> {
    let mut root: Vec<TreeNode> = Vec::new();

    // BTreeMap iteration already yields paths in lexicographic order.
    for path in files.keys() {
        let explicit_folder = path.ends_with('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut level = &mut root;
        let mut current = String::new();
        let total = segments.len();
        for (index, segment) in segments.iter().enumerate() {
            let is_last = index + 1 == total;
            let is_folder = !is_last || explicit_folder;

            current.push_str(segment);
            if is_folder {
                current.push('/');
            }

            let position = find_or_create(level, segment, &current, is_folder);
            level = &mut level[position].children;
        }
    }

    root
}

/// Locates the sibling named `name`, inserting a new node at its sorted
/// position when absent. Sibling lists are kept sorted at all times, so a
/// binary search over `sibling_cmp` is sufficient. Matching is by name
/// only; a pre-existing node keeps its original kind.
/// 尋找名為 `name` 的同層節點，不存在時依排序位置插入新節點。同層清單隨時
/// 保持排序，因此以 `sibling_cmp` 做二分搜尋即可。僅以名稱比對；既有節點
/// 保留原本的類型。
fn find_or_create(nodes: &mut Vec<TreeNode>, name: &str, path: &str, is_folder: bool) -> usize {
    if let Some(position) = nodes.iter().position(|node| node.name == name) {
        return position;
    }

    let node = TreeNode {
        name: name.to_string(),
        path: path.to_string(),
        is_folder,
        children: Vec::new(),
    };
    let position = match nodes.binary_search_by(|probe| sibling_cmp(probe, &node)) {
        Ok(found) | Err(found) => found,
    };
    nodes.insert(position, node);
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{Language, ProjectFile};

    fn map(paths: &[&str]) -> BTreeMap<String, ProjectFile> {
        paths
            .iter()
            .map(|path| {
                (
                    path.to_string(),
                    ProjectFile::new(crate::last_segment(path), "", Language::Zephyr),
                )
            })
            .collect()
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.name.as_str()).collect()
    }

    #[test]
    fn folders_sort_before_files_then_lexicographic() {
        let files = map(&["b.zy", "a/", "c.zy"]);
        let tree = build_tree(&files);
        assert_eq!(names(&tree), vec!["a", "b.zy", "c.zy"]);
        assert!(tree[0].is_folder);
        assert!(!tree[1].is_folder);
    }

    #[test]
    fn sibling_order_is_case_sensitive() {
        let files = map(&["Zeta.zy", "alpha.zy"]);
        let tree = build_tree(&files);
        // uppercase sorts before lowercase in a byte-wise comparison
        assert_eq!(names(&tree), vec!["Zeta.zy", "alpha.zy"]);
    }

    #[test]
    fn intermediate_folders_are_synthesized() {
        let files = map(&["src/lib/util.zy"]);
        let tree = build_tree(&files);
        assert_eq!(tree.len(), 1);
        let src = &tree[0];
        assert!(src.is_folder);
        assert_eq!(src.path, "src/");
        let lib = &src.children[0];
        assert!(lib.is_folder);
        assert_eq!(lib.path, "src/lib/");
        let leaf = &lib.children[0];
        assert!(!leaf.is_folder);
        assert_eq!(leaf.path, "src/lib/util.zy");
        assert!(leaf.children.is_empty());
    }

    #[test]
    fn explicit_folder_key_yields_empty_children() {
        let files = map(&["empty/"]);
        let tree = build_tree(&files);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_folder);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn build_is_idempotent() {
        let files = map(&["src/", "src/a.zy", "src/b/c.zy", "other.zy", "zz/"]);
        assert_eq!(build_tree(&files), build_tree(&files));
    }

    #[test]
    fn explicit_and_implicit_folder_keys_merge() {
        // "src/" exists as its own key and as a prefix of a deeper path;
        // both must land in the same node.
        let files = map(&["src/", "src/main.zy"]);
        let tree = build_tree(&files);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].name, "main.zy");
    }

    #[test]
    fn mixed_depths_keep_folder_first_order_per_level() {
        let files = map(&["src/z.zy", "src/a/", "src/b/deep.zy", "top.zy"]);
        let tree = build_tree(&files);
        assert_eq!(names(&tree), vec!["src", "top.zy"]);
        assert_eq!(names(&tree[0].children), vec!["a", "b", "z.zy"]);
    }
}
