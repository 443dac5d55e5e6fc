use std::collections::BTreeMap;

/// Kind of node recorded in a [`NodeIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntry {
    pub id: String,
    pub kind: NodeKind,
}

/// Relative path → node lookup filled in while one tree is built.
///
/// Owned by a single analysis; never shared between runs.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    entries: BTreeMap<String, NodeEntry>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, id: impl Into<String>, kind: NodeKind) {
        self.entries.insert(
            path.into(),
            NodeEntry {
                id: id.into(),
                kind,
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&NodeEntry> {
        self.entries.get(path)
    }

    pub fn id_of(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }
}
