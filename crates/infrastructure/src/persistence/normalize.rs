//! Lenient decoding of stored trees.
//!
//! Stored documents may come from older versions or have been edited by
//! hand. Instead of rejecting the whole file, every entry is repaired or
//! dropped on its own.

use std::collections::HashSet;

use courier_application::ports::RequestDataFactory;
use courier_domain::{CollectionNode, Folder, Forest, NodeId, NodeKind, RequestData, RequestNode};
use serde_json::{Map, Value};
use tracing::warn;

use crate::serialization::from_json_value;

const FALLBACK_FOLDER_NAME: &str = "Folder";
const FALLBACK_REQUEST_NAME: &str = "Request";
const FALLBACK_METHOD: &str = "GET";

/// Repairs a parsed document into a valid forest.
///
/// - entries that are not objects or have an unknown `type` are dropped
/// - missing ids are minted, duplicate ids are re-minted
/// - missing names fall back to "Folder" / "Request"
/// - requests without a usable `request` payload are rebuilt from their
///   flat `method` / `url` fields through `factory`
pub struct ForestNormalizer<'a, B: RequestDataFactory> {
    factory: &'a B,
    default_url: &'a str,
    seen: HashSet<NodeId>,
    repaired: usize,
}

impl<'a, B: RequestDataFactory> ForestNormalizer<'a, B> {
    /// Creates a normalizer that rebuilds payloads with `factory`.
    #[must_use]
    pub fn new(factory: &'a B, default_url: &'a str) -> Self {
        Self {
            factory,
            default_url,
            seen: HashSet::new(),
            repaired: 0,
        }
    }

    /// Number of entries dropped or patched so far.
    #[must_use]
    pub const fn repaired(&self) -> usize {
        self.repaired
    }

    /// Normalizes a whole document. Anything but a top-level array yields
    /// an empty forest.
    pub fn normalize(&mut self, document: &Value) -> Forest {
        let Value::Array(entries) = document else {
            self.repaired += 1;
            return Forest::new();
        };
        Forest::from(self.normalize_list(entries))
    }

    fn normalize_list(&mut self, entries: &[Value]) -> Vec<CollectionNode> {
        entries
            .iter()
            .filter_map(|entry| self.normalize_entry(entry))
            .collect()
    }

    fn normalize_entry(&mut self, entry: &Value) -> Option<CollectionNode> {
        let Some(record) = entry.as_object() else {
            self.repaired += 1;
            return None;
        };
        match record.get("type").and_then(Value::as_str) {
            Some("folder") => {
                let id = self.claim_id(record, NodeKind::Folder);
                let name = self.name(record, FALLBACK_FOLDER_NAME);
                let children = match record.get("children") {
                    Some(Value::Array(children)) => self.normalize_list(children),
                    Some(_) => {
                        self.repaired += 1;
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                Some(Folder::with_id(id, name).with_children(children).into())
            }
            Some("request") => {
                let id = self.claim_id(record, NodeKind::Request);
                let name = self.name(record, FALLBACK_REQUEST_NAME);
                let request = self.request_data(record);
                Some(RequestNode::with_id(id, name, request).into())
            }
            other => {
                warn!(kind = ?other, "dropping stored entry of unknown type");
                self.repaired += 1;
                None
            }
        }
    }

    fn claim_id(&mut self, record: &Map<String, Value>, kind: NodeKind) -> NodeId {
        let stored = record
            .get("id")
            .and_then(Value::as_str)
            .and_then(|raw| NodeId::parse(raw).ok());
        let id = match stored {
            Some(id) if !self.seen.contains(&id) => id,
            _ => {
                self.repaired += 1;
                NodeId::generate(kind.id_prefix())
            }
        };
        self.seen.insert(id.clone());
        id
    }

    fn name(&mut self, record: &Map<String, Value>, fallback: &str) -> String {
        if let Some(name) = record.get("name").and_then(Value::as_str) {
            return name.to_string();
        }
        self.repaired += 1;
        fallback.to_string()
    }

    fn request_data(&mut self, record: &Map<String, Value>) -> RequestData {
        if let Some(payload) = record.get("request")
            && payload.is_object()
            && let Ok(data) = from_json_value::<RequestData>(payload.clone())
        {
            return data;
        }

        self.repaired += 1;
        let legacy = match record.get("request") {
            Some(Value::Object(payload)) => payload,
            _ => record,
        };
        let method = legacy
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_METHOD);
        let url = legacy
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or(self.default_url);
        let request_type = legacy
            .get("request_type")
            .cloned()
            .and_then(|value| from_json_value(value).ok())
            .unwrap_or_default();
        self.factory.build(method, url, request_type)
    }
}
