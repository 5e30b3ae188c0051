//! Request collection files
//!
//! Supplies the initial node sequence for the tree and keeps the request
//! records that leaf nodes point at. Collections are JSON, or TOML when the
//! file extension is `.toml`:
//!
//! ```json
//! {
//!   "name": "Petstore",
//!   "tags": [{ "name": "health", "requests": [{ "name": "Ping", "url": "/ping" }] }],
//!   "folders": [{
//!     "name": "Pets",
//!     "requests": [{ "name": "List pets", "url": "/pets" }],
//!     "tags": [{ "name": "admin", "requests": [
//!       { "name": "Delete pet", "method": "DELETE", "url": "/pets/1",
//!         "response": { "status": 200, "content_type": "application/json",
//!                       "body": { "deleted": true } } }
//!     ]}]
//!   }]
//! }
//! ```

use super::error::{Result, StoreError};
use super::types::{CollectionNode, RequestRef};
use super::visibility::recompute;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Top-level collection document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionFile {
    /// Collection display name
    #[serde(default)]
    pub name: String,
    /// Root-level tag groups
    #[serde(default)]
    pub tags: Vec<TagGroupEntry>,
    /// Top-level folders
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

/// Folder entry of a collection document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Folder name
    pub name: String,
    /// Requests directly inside the folder
    #[serde(default)]
    pub requests: Vec<RequestRecord>,
    /// Tag groups inside the folder
    #[serde(default)]
    pub tags: Vec<TagGroupEntry>,
}

/// Tag group entry of a collection document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroupEntry {
    /// Tag label
    pub name: String,
    /// Requests carrying the tag
    #[serde(default)]
    pub requests: Vec<RequestRecord>,
}

/// A saved HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Request name as shown in the tree
    pub name: String,
    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,
    /// Target URL
    #[serde(default)]
    pub url: String,
    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Request body
    #[serde(default)]
    pub body: Option<String>,
    /// Last response captured for this request
    #[serde(default)]
    pub response: Option<SavedResponse>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Response captured for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResponse {
    /// HTTP status code
    #[serde(default = "default_status")]
    pub status: u16,
    /// `Content-Type` header value
    #[serde(default)]
    pub content_type: Option<String>,
    /// Raw body text (JSON values in the collection file are stored serialized)
    #[serde(deserialize_with = "body_text")]
    pub body: String,
}

const fn default_status() -> u16 {
    200
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BodyRepr {
    Text(String),
    Json(serde_json::Value),
}

fn body_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match BodyRepr::deserialize(deserializer)? {
        BodyRepr::Text(text) => Ok(text),
        BodyRepr::Json(value) => {
            serde_json::to_string_pretty(&value).map_err(serde::de::Error::custom)
        }
    }
}

impl SavedResponse {
    /// Whether the body should be treated as JSON
    ///
    /// Uses the content type when present, otherwise sniffs the first
    /// non-whitespace character.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().map_or_else(
            || {
                let trimmed = self.body.trim_start();
                trimmed.starts_with('{') || trimmed.starts_with('[')
            },
            |ct| ct.to_ascii_lowercase().contains("json"),
        )
    }
}

/// Request records addressed by the leaves of a collection tree
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    name: String,
    records: Vec<RequestRecord>,
}

impl RequestStore {
    /// Flatten a collection document into pre-ordered nodes plus the store
    ///
    /// Root tag groups come first so that no folder precedes them (a tag group
    /// after a folder would belong to that folder). All containers start
    /// collapsed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRequest` for requests with an empty name.
    pub fn from_collection(collection: CollectionFile) -> Result<(Vec<CollectionNode>, Self)> {
        let mut store = Self {
            name: collection.name,
            records: Vec::new(),
        };
        let mut nodes = Vec::new();

        for group in collection.tags {
            store.push_group(&mut nodes, group)?;
        }

        for folder in collection.folders {
            nodes.push(CollectionNode::folder(folder.name));
            for request in folder.requests {
                store.push_request(&mut nodes, request)?;
            }
            for group in folder.tags {
                store.push_group(&mut nodes, group)?;
            }
        }

        recompute(&mut nodes);
        debug!(
            nodes = nodes.len(),
            requests = store.records.len(),
            "flattened collection"
        );
        Ok((nodes, store))
    }

    /// Parse a JSON collection document
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Json` on malformed input, or any error of
    /// [`Self::from_collection`].
    pub fn from_json_str(input: &str) -> Result<(Vec<CollectionNode>, Self)> {
        let collection: CollectionFile = serde_json::from_str(input)?;
        Self::from_collection(collection)
    }

    /// Parse a TOML collection document
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Toml` on malformed input, or any error of
    /// [`Self::from_collection`].
    pub fn from_toml_str(input: &str) -> Result<(Vec<CollectionNode>, Self)> {
        let collection: CollectionFile = toml::from_str(input)?;
        Self::from_collection(collection)
    }

    /// Load a collection file, choosing the format by extension
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file cannot be read, or a parse error.
    pub fn load(path: &Path) -> Result<(Vec<CollectionNode>, Self)> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let loaded = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        info!(path = %path.display(), requests = loaded.1.len(), "loaded collection");
        Ok(loaded)
    }

    fn push_group(&mut self, nodes: &mut Vec<CollectionNode>, group: TagGroupEntry) -> Result<()> {
        nodes.push(CollectionNode::tag_group(group.name));
        for request in group.requests {
            self.push_request(nodes, request)?;
        }
        Ok(())
    }

    fn push_request(
        &mut self,
        nodes: &mut Vec<CollectionNode>,
        mut request: RequestRecord,
    ) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(StoreError::InvalidRequest {
                name: request.url,
                reason: "request name is empty".to_string(),
            });
        }
        request.method = request.method.to_ascii_uppercase();

        let handle = RequestRef(self.records.len());
        nodes.push(CollectionNode::leaf(request.name.clone(), handle));
        self.records.push(request);
        Ok(())
    }

    /// Collection display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the record behind a leaf
    #[must_use]
    pub fn get(&self, request: RequestRef) -> Option<&RequestRecord> {
        self.records.get(request.index())
    }

    /// Number of request records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no requests
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
