use crate::core_vfs::{Node, NodeKind, PathError, VirtualFs};
use log::trace;
use std::collections::HashMap;

/// Splits a path into the names to look up, starting from the root.
///
/// Empty segments and `.` mean "stay here" and are dropped. `..` is kept as a literal
/// name, so it never escapes the root: it simply won't be found.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Normalized absolute form of `path`, e.g. `dir//./sub/` becomes `/dir/sub`.
pub fn canonical_path(path: &str) -> String {
    format!("/{}", path_segments(path).join("/"))
}

/// Scopes a command argument to the working directory.
///
/// Absolute arguments are returned as-is, an empty argument means the working
/// directory itself.
pub fn join_path(current_dir: &str, arg: &str) -> String {
    if arg.starts_with('/') {
        arg.to_string()
    } else if arg.is_empty() {
        current_dir.to_string()
    } else {
        format!("{}/{}", current_dir.trim_end_matches('/'), arg)
    }
}

impl VirtualFs {
    /// Walks the tree from the root to the node named by `path`.
    pub fn resolve(&self, path: &str, expect: NodeKind) -> Result<&Node, PathError> {
        let mut current = self.root();

        for name in path_segments(path) {
            let children = match current {
                Node::Directory { children } => children,
                Node::File { .. } => return Err(PathError::NotADirectory(path.to_string())),
            };

            current = children
                .get(name)
                .ok_or_else(|| PathError::NotFound(path.to_string()))?;
        }

        if !current.matches(expect) {
            return Err(PathError::TypeMismatch {
                path: path.to_string(),
                expected: expect,
            });
        }

        trace!("Resolved {:?} to {}", path, if current.is_dir() { "directory" } else { "file" });
        Ok(current)
    }

    pub fn resolve_dir(&self, path: &str) -> Result<&HashMap<String, Node>, PathError> {
        match self.resolve(path, NodeKind::Directory)? {
            Node::Directory { children } => Ok(children),
            Node::File { .. } => Err(PathError::TypeMismatch {
                path: path.to_string(),
                expected: NodeKind::Directory,
            }),
        }
    }

    pub fn resolve_file(&self, path: &str) -> Result<&[u8], PathError> {
        match self.resolve(path, NodeKind::File)? {
            Node::File { content } => Ok(content.as_slice()),
            Node::Directory { .. } => Err(PathError::TypeMismatch {
                path: path.to_string(),
                expected: NodeKind::File,
            }),
        }
    }
}
