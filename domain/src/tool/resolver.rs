//! Tool path resolution
//!
//! A tool path is the `_`-joined chain of node names from a root down to the
//! target, with spaces in names written as `_`:
//!
//! ```text
//! kubectl                 → root "kubectl"
//! kubectl_get_pod         → root "kubectl" → subtool "get pod"
//! kubectl_get_pod_logs    → root "kubectl" → "get pod" → "logs"
//! ```
//!
//! Because a subtool name may itself span several `_` segments, the remainder
//! after the root is matched against whole normalized child names rather than
//! segment by segment. At each level an exact match on the entire remainder
//! wins; otherwise the longest child name that is followed by `_` is tried
//! first and the rest of the path is matched against its children. A path
//! that only matches a prefix of some name never resolves.

use super::entities::{ResolvedCommand, ToolNode, ToolTree};
use crate::core::error::DomainError;
use crate::core::string::PATH_SEPARATOR;

impl ToolTree {
    /// Resolve a tool path into its merged command template.
    ///
    /// Pure function of the tree and the path; repeated calls return equal
    /// results.
    pub fn resolve(&self, path: &str) -> Result<ResolvedCommand, DomainError> {
        let (root_name, rest) = match path.split_once(PATH_SEPARATOR) {
            Some((root, rest)) => (root, Some(rest)),
            None => (path, None),
        };

        if root_name.is_empty() {
            return Err(DomainError::InvalidPath(path.to_string()));
        }

        let root = self
            .find_root(root_name)
            .ok_or_else(|| DomainError::ToolNotFound(root_name.to_string()))?;

        let mut resolved = ResolvedCommand::from_root(root);

        let Some(subpath) = rest else {
            return Ok(resolved);
        };

        let chain = descend(root, subpath)
            .ok_or_else(|| DomainError::SubtoolNotFound(path.to_string()))?;
        for node in chain {
            resolved.absorb(node);
        }

        Ok(resolved)
    }
}

/// Match `subpath` against the children of `node`.
///
/// Returns the chain of matched nodes from the direct child down to the
/// target, or `None` when no child accounts for the whole subpath.
fn descend<'a>(node: &'a ToolNode, subpath: &str) -> Option<Vec<&'a ToolNode>> {
    if subpath.is_empty() {
        return None;
    }

    let mut candidates: Vec<(&'a ToolNode, String)> = Vec::new();
    for child in &node.children {
        let name = child.normalized_name();
        if name == subpath {
            return Some(vec![child]);
        }
        if !child.children.is_empty() && is_segment_prefix(subpath, &name) {
            candidates.push((child, name));
        }
    }

    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    for (child, name) in candidates {
        let remainder = &subpath[name.len() + 1..];
        if let Some(mut chain) = descend(child, remainder) {
            chain.insert(0, child);
            return Some(chain);
        }
    }

    None
}

/// `name` followed by the path separator is a prefix of `subpath`
fn is_segment_prefix(subpath: &str, name: &str) -> bool {
    !name.is_empty()
        && subpath.len() > name.len()
        && subpath.starts_with(name)
        && subpath[name.len()..].starts_with(PATH_SEPARATOR)
}
