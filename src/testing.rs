//! Testing utilities for reqtui
//!
//! Node builders and shared fixtures for unit tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::collection::{CollectionNode, RequestRef};
use serde_json::{json, Value};

/// Collapsed folder node
pub fn folder(name: &str) -> CollectionNode {
    CollectionNode::folder(name)
}

/// Collapsed tag group node
pub fn tag_group(name: &str) -> CollectionNode {
    CollectionNode::tag_group(name)
}

/// Leaf node pointing at request record `idx`
pub fn leaf(name: &str, idx: usize) -> CollectionNode {
    CollectionNode::leaf(name, RequestRef(idx))
}

/// Node names in sequence order
pub fn names(nodes: &[CollectionNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

/// Fully collapsed sample tree
///
/// ```text
/// 0 tag    public
/// 1   req  Health Check
/// 2 folder Users
/// 3   req  List Users
/// 4   tag  admin
/// 5     req  Delete User
/// 6     req  Post Users
/// 7 folder Orders
/// 8   tag  checkout
/// 9     req  Create Order
/// ```
pub fn sample_nodes() -> Vec<CollectionNode> {
    vec![
        tag_group("public"),
        leaf("Health Check", 0),
        folder("Users"),
        leaf("List Users", 1),
        tag_group("admin"),
        leaf("Delete User", 2),
        leaf("Post Users", 3),
        folder("Orders"),
        tag_group("checkout"),
        leaf("Create Order", 4),
    ]
}

/// Collection document that flattens to [`sample_nodes`]
pub const SAMPLE_COLLECTION: &str = r#"{
  "name": "Sample API",
  "tags": [
    { "name": "public", "requests": [
      { "name": "Health Check", "url": "https://api.test/health",
        "response": { "status": 200, "content_type": "text/plain", "body": "ok" } }
    ]}
  ],
  "folders": [
    { "name": "Users",
      "requests": [
        { "name": "List Users", "url": "https://api.test/users",
          "response": { "status": 200, "content_type": "application/json",
                        "body": { "users": [ { "id": 1, "name": "alice" }, { "id": 2, "name": "bob" } ] } } }
      ],
      "tags": [
        { "name": "admin", "requests": [
          { "name": "Delete User", "method": "DELETE", "url": "https://api.test/users/1" },
          { "name": "Post Users", "method": "POST", "url": "https://api.test/users",
            "body": "{\"name\": \"carol\"}" }
        ]}
      ]
    },
    { "name": "Orders",
      "tags": [
        { "name": "checkout", "requests": [
          { "name": "Create Order", "method": "POST", "url": "https://api.test/orders" }
        ]}
      ]
    }
  ]
}"#;

/// Response body used by completion and query tests
pub fn sample_body() -> Value {
    json!({
        "users": [
            { "id": 1, "name": "alice", "address": { "city": "Oslo" } },
            { "id": 2, "name": "bob", "address": { "city": "Rome" } }
        ],
        "total": 2
    })
}
