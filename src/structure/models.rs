//! Serializable project structure.
//!
//! Field names follow the JSON response schema consumed by the web client,
//! so every struct is `camelCase` on the wire.

use std::fs::Metadata;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::languages::LanguageTag;

/// A file in the project tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: String,
    pub name: String,
    /// Path relative to the project root, `/`-separated
    pub path: String,
    pub language: LanguageTag,
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Id of the owning directory
    pub directory_id: Option<String>,
}

/// A directory and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryNode {
    pub id: String,
    pub name: String,
    /// Path relative to the project root; empty for the root itself
    pub path: String,
    /// `None` only for the project root
    pub parent_id: Option<String>,
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    pub child_file_nodes: Vec<FileNode>,
    pub child_directory_nodes: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// All directories below this one, depth-first, excluding `self`.
    pub fn descendant_directories(&self) -> Vec<&DirectoryNode> {
        let mut out = Vec::new();
        for dir in &self.child_directory_nodes {
            out.push(dir);
            out.extend(dir.descendant_directories());
        }
        out
    }

    /// All files below this one, depth-first.
    pub fn descendant_files(&self) -> Vec<&FileNode> {
        let mut out: Vec<&FileNode> = self.child_file_nodes.iter().collect();
        for dir in &self.child_directory_nodes {
            out.extend(dir.descendant_files());
        }
        out
    }

    /// Number of nodes in this subtree, `self` included.
    pub fn node_count(&self) -> usize {
        1 + self.child_file_nodes.len()
            + self
                .child_directory_nodes
                .iter()
                .map(DirectoryNode::node_count)
                .sum::<usize>()
    }

    pub fn find_file(&self, name: &str) -> Option<&FileNode> {
        self.child_file_nodes.iter().find(|f| f.name == name)
    }

    pub fn find_directory(&self, name: &str) -> Option<&DirectoryNode> {
        self.child_directory_nodes.iter().find(|d| d.name == name)
    }
}

/// Result of analyzing one project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    pub id: String,
    pub name: String,
    /// Absolute root path as analyzed
    pub root_path: String,
    /// Time of analysis
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    pub root_directory: DirectoryNode,
}

impl ProjectStructure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub(crate) fn new_node_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creation time of a filesystem entry.
///
/// Falls back to the modification time where the platform does not record
/// birth time, then to the Unix epoch.
pub(crate) fn filesystem_timestamp(metadata: &Metadata) -> DateTime<Utc> {
    let time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    DateTime::<Utc>::from(time)
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
