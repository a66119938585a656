use serde::{Deserialize, Serialize};

// =============================================================================
// Node Types
// =============================================================================

/// Kind of a filesystem node, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
}

/// Payload of a node: file content or directory children.
///
/// Serialized with a `type` tag so the filesystem document reads as
/// `{ "name": "home", "type": "directory", "children": [...] }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeBody {
    File {
        #[serde(default)]
        content: String,
    },
    Directory {
        /// Children in insertion order. Names are unique among siblings.
        #[serde(default)]
        children: Vec<Node>,
    },
}

/// An entry in the virtual filesystem tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Node {
    pub name: String,
    #[serde(flatten)]
    pub body: NodeBody,
    /// Excluded from listings unless hidden entries are requested.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Informational only; reads are not blocked.
    #[serde(default, skip_serializing_if = "is_false")]
    pub encrypted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Node {
    /// Create a file node.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: NodeBody::File {
                content: content.into(),
            },
            hidden: false,
            encrypted: false,
        }
    }

    /// Create a directory node with the given children.
    pub fn dir(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body: NodeBody::Directory { children },
            hidden: false,
            encrypted: false,
        }
    }

    /// Mark this node as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File { .. } => NodeKind::File,
            NodeBody::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    /// File content (`None` for directories).
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }

    /// Directory children (`None` for files).
    pub fn children(&self) -> Option<&[Node]> {
        match &self.body {
            NodeBody::Directory { children } => Some(children),
            NodeBody::File { .. } => None,
        }
    }

    /// Find a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children()?.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let file = Node::file("a.txt", "hi").hidden();
        assert_eq!(file.kind(), NodeKind::File);
        assert_eq!(file.content(), Some("hi"));
        assert!(file.children().is_none());
        assert!(file.hidden);
        assert!(!file.encrypted);

        let dir = Node::dir("docs", vec![Node::file("x", "")]);
        assert!(dir.is_dir());
        assert!(dir.content().is_none());
        assert_eq!(dir.children().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_child_lookup_is_exact() {
        let dir = Node::dir("d", vec![Node::file("Readme", ""), Node::file("readme", "")]);
        assert_eq!(dir.child("readme").map(|n| n.name.as_str()), Some("readme"));
        assert!(dir.child("README").is_none());
        assert!(Node::file("f", "").child("x").is_none());
    }

    #[test]
    fn test_deserialize_tagged_nodes() {
        let json = r#"{
            "name": "/",
            "type": "directory",
            "children": [
                { "name": "notes.txt", "type": "file", "content": "hello", "hidden": true },
                { "name": "empty", "type": "directory" },
                { "name": "blank", "type": "file" }
            ]
        }"#;
        let root: Node = serde_json::from_str(json).unwrap();
        let children = root.children().unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].content(), Some("hello"));
        assert!(children[0].hidden);
        assert_eq!(children[1].children(), Some(&[][..]));
        assert_eq!(children[2].content(), Some(""));
    }

    #[test]
    fn test_serialize_skips_default_flags() {
        let json = serde_json::to_string(&Node::file("a", "b")).unwrap();
        assert!(json.contains("\"type\":\"file\""));
        assert!(!json.contains("hidden"));
        assert!(!json.contains("encrypted"));
    }
}
