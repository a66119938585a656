use std::collections::HashSet;

use crate::config::{DEFAULT_FILESYSTEM, HOME_DIR, HOME_SYMBOL};
use crate::core::error::FsError;
use crate::models::{Node, NodeKind};

/// In-memory virtual filesystem.
///
/// Owns the node tree exclusively. The tree is validated on construction and
/// never mutated afterwards, so it can be shared read-only behind an `Arc`.
///
/// # Path Convention
///
/// - Root: `"/"` (the empty string also resolves to root)
/// - Absolute paths only: `"/home/about.txt"`
/// - Repeated separators collapse; `\` is treated as `/`
/// - Relative input is turned into an absolute path with [`join_path`]
#[derive(Clone, Debug)]
pub struct VirtualFs {
    root: Node,
}

impl VirtualFs {
    /// Create a filesystem from a root node, checking tree invariants.
    pub fn new(root: Node) -> Result<Self, FsError> {
        if !root.is_dir() {
            return Err(FsError::RootNotDirectory);
        }
        if root.name != "/" {
            return Err(FsError::InvalidRootName(root.name));
        }
        validate_children(&root, "/")?;
        Ok(Self { root })
    }

    /// Create a filesystem from a JSON node document.
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        let root: Node = serde_json::from_str(json)?;
        Self::new(root)
    }

    /// The stock portfolio tree bundled with the crate.
    pub fn portfolio() -> Result<Self, FsError> {
        Self::from_json(DEFAULT_FILESYSTEM)
    }

    /// Resolve an absolute path to a node.
    ///
    /// Empty segments are dropped; each remaining segment must name a child of
    /// the current directory exactly.
    pub fn resolve(&self, path: &str) -> Option<&Node> {
        let mut current = &self.root;
        for segment in segments(path) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// List a directory: directories first, then files, each group sorted by
    /// name. Hidden entries are skipped unless `include_hidden`.
    pub fn list(&self, path: &str, include_hidden: bool) -> Option<Vec<&Node>> {
        let children = self.resolve(path)?.children()?;
        let mut items: Vec<&Node> = children
            .iter()
            .filter(|node| include_hidden || !node.hidden)
            .collect();
        items.sort_by(|a, b| {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.cmp(&b.name))
        });
        Some(items)
    }

    /// Read a file's content. Directories and missing paths yield `None`.
    pub fn read(&self, path: &str) -> Option<&str> {
        self.resolve(path)?.content()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(Node::is_dir)
    }

    pub fn kind(&self, path: &str) -> Option<NodeKind> {
        self.resolve(path).map(Node::kind)
    }
}

fn validate_children(dir: &Node, path: &str) -> Result<(), FsError> {
    let Some(children) = dir.children() else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for child in children {
        if child.name.is_empty()
            || child.name == "."
            || child.name == ".."
            || child.name.contains(['/', '\\'])
        {
            return Err(FsError::InvalidName {
                parent: path.to_string(),
                name: child.name.clone(),
            });
        }
        if !seen.insert(child.name.as_str()) {
            return Err(FsError::DuplicateName {
                parent: path.to_string(),
                name: child.name.clone(),
            });
        }
        validate_children(child, &join_path(path, &child.name))?;
    }
    Ok(())
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty())
}

// =============================================================================
// Path Helpers
// =============================================================================

/// Join a user-typed segment onto an absolute base path.
///
/// - `..` drops the last component (no-op at root)
/// - `.` or empty returns `base`
/// - a leading `/` makes `segment` absolute; `~` and `~/...` start at home
/// - anything else is appended with a single separator
///
/// The result is normalized: no repeated or trailing separators, and `.`/`..`
/// components inside multi-segment input are folded.
pub fn join_path(base: &str, segment: &str) -> String {
    let combined = if segment.is_empty() || segment == "." {
        base.to_string()
    } else if segment == HOME_SYMBOL {
        HOME_DIR.to_string()
    } else if let Some(rest) = segment.strip_prefix("~/") {
        format!("{}/{}", HOME_DIR, rest)
    } else if segment.starts_with('/') {
        segment.to_string()
    } else {
        format!("{}/{}", base, segment)
    };
    normalize_path(&combined)
}

/// Normalize a path into absolute form, folding `.` and `..` components.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in segments(path) {
        match part {
            ".." => {
                parts.pop();
            }
            "." => {}
            _ => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Expand the home shorthand into its absolute form.
pub fn expand_home(path: &str) -> String {
    if path == HOME_SYMBOL {
        HOME_DIR.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        normalize_path(&format!("{}/{}", HOME_DIR, rest))
    } else {
        path.to_string()
    }
}

/// Contract the home directory back to its shorthand for display.
pub fn display_path(path: &str) -> String {
    if path == HOME_DIR {
        HOME_SYMBOL.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VirtualFs {
        VirtualFs::new(Node::dir(
            "/",
            vec![
                Node::dir(
                    "home",
                    vec![
                        Node::file("skills.json", "{}"),
                        Node::file("about.txt", "hello"),
                        Node::dir("notes", vec![]),
                        Node::file(".secrets", "shh").hidden(),
                        Node::dir("archive", vec![Node::file("old.txt", "")]),
                    ],
                ),
                Node::dir("projects", vec![Node::file("README.md", "# hi")]),
                Node::file("empty.txt", ""),
            ],
        ))
        .unwrap()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    #[test]
    fn test_resolve_root() {
        let fs = sample();
        assert_eq!(fs.resolve("").map(|n| n.name.as_str()), Some("/"));
        assert_eq!(fs.resolve("/").map(|n| n.name.as_str()), Some("/"));
    }

    #[test]
    fn test_resolve_collapses_separators() {
        let fs = sample();
        assert_eq!(
            fs.resolve("//home///about.txt").and_then(Node::content),
            Some("hello")
        );
        assert_eq!(
            fs.resolve("\\home\\about.txt").and_then(Node::content),
            Some("hello")
        );
    }

    #[test]
    fn test_resolve_through_file_fails() {
        let fs = sample();
        assert!(fs.resolve("/home/about.txt/x").is_none());
        assert!(fs.resolve("/missing").is_none());
        assert!(fs.resolve("/HOME").is_none());
    }

    #[test]
    fn test_exists_and_kinds() {
        let fs = sample();
        assert!(fs.exists("/home/notes"));
        assert!(!fs.exists("/home/nope"));
        assert!(fs.is_directory("/projects"));
        assert!(!fs.is_directory("/empty.txt"));
        assert_eq!(fs.kind("/empty.txt"), Some(NodeKind::File));
        assert_eq!(fs.kind("/nope"), None);
    }

    // =========================================================================
    // Listing & Reading
    // =========================================================================

    #[test]
    fn test_list_directories_first_then_alphabetical() {
        let fs = sample();
        let names: Vec<&str> = fs
            .list("/home", false)
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["archive", "notes", "about.txt", "skills.json"]);
    }

    #[test]
    fn test_list_hidden() {
        let fs = sample();
        let names: Vec<&str> = fs
            .list("/home", true)
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["archive", "notes", ".secrets", "about.txt", "skills.json"]
        );
    }

    #[test]
    fn test_list_order_invariant_on_every_directory() {
        let fs = VirtualFs::portfolio().unwrap();
        let mut stack = vec!["/".to_string()];
        while let Some(dir) = stack.pop() {
            let items = fs.list(&dir, true).unwrap();
            for pair in items.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(a.is_dir() >= b.is_dir(), "{} before {}", a.name, b.name);
                if a.is_dir() == b.is_dir() {
                    assert!(a.name < b.name, "{} before {}", a.name, b.name);
                }
            }
            for item in items.iter().filter(|n| n.is_dir()) {
                stack.push(join_path(&dir, &item.name));
            }
        }
    }

    #[test]
    fn test_list_non_directory() {
        let fs = sample();
        assert!(fs.list("/home/about.txt", false).is_none());
        assert!(fs.list("/nope", false).is_none());
        assert_eq!(fs.list("/home/notes", false).map(|v| v.len()), Some(0));
    }

    #[test]
    fn test_read() {
        let fs = sample();
        assert_eq!(fs.read("/home/about.txt"), Some("hello"));
        assert_eq!(fs.read("/empty.txt"), Some(""));
        assert_eq!(fs.read("/home"), None);
        assert_eq!(fs.read("/home/nope"), None);
        assert_eq!(fs.read("/home/.secrets"), Some("shh"));
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_rejects_duplicate_names() {
        let root = Node::dir(
            "/",
            vec![Node::dir(
                "home",
                vec![Node::file("a", ""), Node::dir("a", vec![])],
            )],
        );
        assert!(matches!(
            VirtualFs::new(root),
            Err(FsError::DuplicateName { ref parent, ref name }) if parent == "/home" && name == "a"
        ));
    }

    #[test]
    fn test_rejects_bad_root() {
        assert!(matches!(
            VirtualFs::new(Node::file("/", "")),
            Err(FsError::RootNotDirectory)
        ));
        assert!(matches!(
            VirtualFs::new(Node::dir("root", vec![])),
            Err(FsError::InvalidRootName(_))
        ));
    }

    #[test]
    fn test_rejects_separator_in_name() {
        let root = Node::dir("/", vec![Node::file("a/b", "")]);
        assert!(matches!(
            VirtualFs::new(root),
            Err(FsError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_portfolio_tree() {
        let fs = VirtualFs::portfolio().unwrap();
        assert!(fs.is_directory("/home"));
        assert!(fs.is_directory("/projects/terminal-portfolio"));
        assert!(fs.resolve("/games/tetris.exe").unwrap().encrypted);
        assert!(fs.resolve("/home/.secrets").unwrap().hidden);
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            VirtualFs::from_json("{ not json"),
            Err(FsError::Parse(_))
        ));
    }

    // =========================================================================
    // Path Helpers
    // =========================================================================

    #[test]
    fn test_join_parent() {
        assert_eq!(join_path("/home/notes", ".."), "/home");
        assert_eq!(join_path("/home", ".."), "/");
        assert_eq!(join_path("/", ".."), "/");
    }

    #[test]
    fn test_join_current_and_empty() {
        assert_eq!(join_path("/home", "."), "/home");
        assert_eq!(join_path("/home", ""), "/home");
        assert_eq!(join_path("/", "."), "/");
    }

    #[test]
    fn test_join_absolute_and_home() {
        assert_eq!(join_path("/home", "/projects"), "/projects");
        assert_eq!(join_path("/home", "//projects//"), "/projects");
        assert_eq!(join_path("/projects", "~"), "/home");
        assert_eq!(join_path("/projects", "~/notes"), "/home/notes");
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_path("/", "home"), "/home");
        assert_eq!(join_path("/home", "notes"), "/home/notes");
        assert_eq!(join_path("/home", "notes//"), "/home/notes");
        assert_eq!(join_path("/home", "../projects"), "/projects");
    }

    #[test]
    fn test_join_is_idempotent() {
        for path in ["/", "/home", "/home/notes", "/projects"] {
            let once = join_path(path, ".");
            assert_eq!(once, path);
            assert_eq!(join_path(&once, "."), once);
            assert!(!once.contains("//"));
        }
    }

    #[test]
    fn test_round_trip_parent_then_name() {
        let fs = sample();
        for path in ["/home", "/home/notes", "/home/about.txt", "/projects/README.md"] {
            let target = fs.resolve(path).unwrap();
            assert_eq!(fs.resolve(&join_path(path, ".")), Some(target));

            let name = path.rsplit('/').next().unwrap();
            let rejoined = join_path(&join_path(path, ".."), name);
            assert_eq!(fs.resolve(&rejoined), Some(target));
        }
    }

    #[test]
    fn test_home_helpers() {
        assert_eq!(expand_home("~"), "/home");
        assert_eq!(expand_home("~/notes"), "/home/notes");
        assert_eq!(expand_home("/projects"), "/projects");
        assert_eq!(display_path("/home"), "~");
        assert_eq!(display_path("/home/notes"), "/home/notes");
        assert_eq!(display_path("/"), "/");
    }
}
