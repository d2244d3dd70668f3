use std::collections::HashMap;
use std::fmt;

/// A single entry of the virtual filesystem.
///
/// Nodes are built once before the server starts and are never mutated afterwards,
/// so a tree can be shared between sessions behind an `Arc` without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File { content: Vec<u8> },
    Directory { children: HashMap<String, Node> },
}

/// The kind of node a lookup expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    Either,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "a file"),
            NodeKind::Directory => write!(f, "a directory"),
            NodeKind::Either => write!(f, "a file or directory"),
        }
    }
}

impl Node {
    pub fn file(content: impl Into<Vec<u8>>) -> Self {
        Node::File {
            content: content.into(),
        }
    }

    pub fn directory<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, Node)>,
        S: Into<String>,
    {
        Node::Directory {
            children: children
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// Whether this node satisfies the expected kind.
    pub fn matches(&self, expect: NodeKind) -> bool {
        match (self, expect) {
            (_, NodeKind::Either) => true,
            (Node::File { .. }, NodeKind::File) => true,
            (Node::Directory { .. }, NodeKind::Directory) => true,
            _ => false,
        }
    }

    /// Size reported in listings and by SIZE. Directories report zero.
    pub fn size(&self) -> usize {
        match self {
            Node::File { content } => content.len(),
            Node::Directory { .. } => 0,
        }
    }
}

/// The read-only tree handed to the server at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFs {
    root: Node,
}

impl VirtualFs {
    /// Builds a filesystem whose root directory holds `children`.
    pub fn new(children: HashMap<String, Node>) -> Self {
        Self {
            root: Node::Directory { children },
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The demonstration tree served when no `[filesystem]` table is configured.
    pub fn sample() -> Self {
        Self::new(HashMap::from([
            ("test".to_string(), Node::file("Test file")),
            ("asdf".to_string(), Node::file("asdf file")),
            (
                "dir".to_string(),
                Node::directory([
                    ("file1", Node::file("file1")),
                    ("file2", Node::file("file2")),
                ]),
            ),
        ]))
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}
