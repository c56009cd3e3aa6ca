use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ContentfulConfig;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Failed to reach content service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Content service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse content service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Raw `entries` response of the Content Delivery API.
#[derive(Debug, Default, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub includes: Includes,
}

#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Entry")]
    pub entry: Vec<Value>,
    #[serde(default, rename = "Asset")]
    pub asset: Vec<Value>,
}

/// Query parameters for an `entries` request, sent in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    params: Vec<(String, String)>,
}

/// Highest `include` level the Delivery API accepts. Also bounds link resolution.
pub const MAX_INCLUDE: u8 = 10;

impl EntryQuery {
    pub fn content_type(content_type: &str) -> Self {
        Self::default().param("content_type", content_type)
    }

    pub fn field(self, name: &str, value: &str) -> Self {
        self.param(&format!("fields.{}", name), value)
    }

    /// Levels of linked entries the API should return in `includes`.
    pub fn include(self, levels: u8) -> Self {
        self.param("include", &levels.min(MAX_INCLUDE).to_string())
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", &limit.to_string())
    }

    fn param(mut self, name: &str, value: &str) -> Self {
        self.params.retain(|(k, _)| k != name);
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[derive(Clone)]
pub struct ContentfulClient {
    http: Client,
    base_url: String,
    space_id: String,
    environment_id: String,
    access_token: String,
}

impl ContentfulClient {
    pub fn new(config: &ContentfulConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            space_id: config.space_id.clone(),
            environment_id: config.environment_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn entries_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.base_url, self.space_id, self.environment_id
        )
    }

    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, CmsError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Contentful returned {} for {}", status, url);
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Runs an `entries` query and returns the items with every linked entry
    /// and asset the response carries inlined.
    pub async fn get_entries(&self, query: &EntryQuery) -> Result<Vec<Value>, CmsError> {
        let url = self.entries_url();
        tracing::debug!("Fetching entries from Contentful: {:?}", query.params());
        let body = self.get_json(&url, query.params()).await?;
        let collection: EntryCollection = serde_json::from_value(body)?;
        tracing::debug!(
            "Contentful returned {} items, {} linked entries, {} assets",
            collection.items.len(),
            collection.includes.entry.len(),
            collection.includes.asset.len()
        );
        Ok(resolve_links(&collection, MAX_INCLUDE))
    }
}

type LinkKey<'a> = (&'a str, &'a str);

fn sys_id(value: &Value) -> Option<&str> {
    value.pointer("/sys/id").and_then(Value::as_str)
}

fn link_target(value: &Value) -> Option<LinkKey<'_>> {
    let sys = value.get("sys")?;
    if sys.get("type").and_then(Value::as_str) != Some("Link") {
        return None;
    }
    let link_type = sys.get("linkType").and_then(Value::as_str)?;
    let id = sys.get("id").and_then(Value::as_str)?;
    Some((link_type, id))
}

/// Replaces link objects with the entries/assets they point at. Targets are
/// looked up among the items themselves and the `includes`; links with no
/// target are kept as-is. Expansion stops after `depth` levels, which also
/// bounds reference cycles.
pub fn resolve_links(collection: &EntryCollection, depth: u8) -> Vec<Value> {
    let mut lookup: HashMap<LinkKey<'_>, &Value> = HashMap::new();
    for entry in collection.items.iter().chain(collection.includes.entry.iter()) {
        if let Some(id) = sys_id(entry) {
            lookup.entry(("Entry", id)).or_insert(entry);
        }
    }
    for asset in &collection.includes.asset {
        if let Some(id) = sys_id(asset) {
            lookup.entry(("Asset", id)).or_insert(asset);
        }
    }

    collection
        .items
        .iter()
        .map(|item| resolve_value(item, &lookup, depth))
        .collect()
}

fn resolve_value(value: &Value, lookup: &HashMap<LinkKey<'_>, &Value>, depth: u8) -> Value {
    if let Some(key) = link_target(value) {
        return match lookup.get(&key) {
            Some(target) if depth > 0 => resolve_value(target, lookup, depth - 1),
            _ => value.clone(),
        };
    }

    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    // sys metadata holds links (space, contentType) that are never expanded
                    if k == "sys" {
                        (k.clone(), v.clone())
                    } else {
                        (k.clone(), resolve_value(v, lookup, depth))
                    }
                })
                .collect(),
        ),
        Value::Array(list) => Value::Array(
            list.iter()
                .map(|v| resolve_value(v, lookup, depth))
                .collect(),
        ),
        other => other.clone(),
    }
}
