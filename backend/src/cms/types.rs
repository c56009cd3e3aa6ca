use serde::Serialize;
use serde_json::Value;

use crate::cms::image::absolute_url;

/// Hero section as the page consumes it. Field names follow the JSON the
/// frontend already expects, so everything is camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_title: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typed_texts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub service_boxes: Vec<ServiceBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBox {
    pub id: i64,
    pub index: i64,
    pub title: String,
    pub description: String,
    /// Tile-sized image (600w webp).
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_set: Option<String>,
}

/// Content type ids as configured in the space.
pub mod content_type {
    pub const PAGE: &str = "page";
    pub const HERO_SECTION: &str = "heroSection";
    pub const SERVICE_BOX: &str = "serviceBox";
}

/// `fields` object of an entry or asset, if it has one. Unresolved links do not.
pub fn fields(entry: &Value) -> Option<&serde_json::Map<String, Value>> {
    entry.get("fields").and_then(Value::as_object)
}

pub fn content_type_of(entry: &Value) -> Option<&str> {
    entry
        .pointer("/sys/contentType/sys/id")
        .and_then(Value::as_str)
}

pub fn str_field(entry: &Value, name: &str) -> Option<String> {
    fields(entry)?
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn int_field(entry: &Value, name: &str) -> Option<i64> {
    fields(entry)?.get(name).and_then(Value::as_i64)
}

/// String array field. Non-string elements are dropped; an empty result is `None`.
pub fn str_list_field(entry: &Value, name: &str) -> Option<Vec<String>> {
    let list: Vec<String> = fields(entry)?
        .get(name)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

/// Linked entry or asset, only when the link was resolved (it has `fields`).
pub fn link_field<'a>(entry: &'a Value, name: &str) -> Option<&'a Value> {
    let linked = fields(entry)?.get(name)?;
    fields(linked).map(|_| linked)
}

/// Resolved linked entries of an array field; unresolved links are skipped.
pub fn link_list_field<'a>(entry: &'a Value, name: &str) -> Option<Vec<&'a Value>> {
    let list = fields(entry)?.get(name)?.as_array()?;
    Some(list.iter().filter(|e| fields(e).is_some()).collect())
}

/// https URL of an asset's file, if the asset carries one.
pub fn asset_url(asset: &Value) -> Option<String> {
    asset
        .pointer("/fields/file/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(absolute_url)
}
