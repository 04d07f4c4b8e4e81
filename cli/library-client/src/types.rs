//! Search result types.
//!
//! These mirror the JSON documents returned by the library service. Every
//! field is defaulted, so documents from older or newer service versions
//! still decode.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Envelope wrapping every successful search response.
///
/// `data` must be present, but `null` counts as no results.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub data: SearchResults,
}

/// Entities, collections, containers and images matching a search.
///
/// Lists the service returns as `null` or omits are empty.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, rename = "entity")]
    #[serde_as(as = "DefaultOnNull")]
    pub entities: Vec<Entity>,
    #[serde(default, rename = "collection")]
    #[serde_as(as = "DefaultOnNull")]
    pub collections: Vec<Collection>,
    #[serde(default, rename = "container")]
    #[serde_as(as = "DefaultOnNull")]
    pub containers: Vec<Container>,
    #[serde(default, rename = "image")]
    #[serde_as(as = "DefaultOnNull")]
    pub images: Vec<Image>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.collections.is_empty()
            && self.containers.is_empty()
            && self.images.is_empty()
    }

    /// Total number of matches across all categories.
    pub fn len(&self) -> usize {
        self.entities.len() + self.collections.len() + self.containers.len() + self.images.len()
    }
}

/// Bookkeeping fields shared by every stored object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelMeta {
    pub id: String,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted: bool,
}

/// A user or organization owning collections.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub name: String,
    pub description: String,
    /// IDs of the collections owned by this entity
    #[serde_as(as = "DefaultOnNull")]
    pub collections: Vec<String>,
    pub size: i64,
    pub quota: i64,
    pub default_private: bool,
}

/// A named group of containers belonging to an entity.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub name: String,
    pub description: String,
    /// ID of the owning entity
    pub entity: String,
    /// IDs of the containers in this collection
    #[serde_as(as = "DefaultOnNull")]
    pub containers: Vec<String>,
    pub size: i64,
    pub private: bool,
    pub entity_name: String,
}

/// A named, tagged set of images.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub name: String,
    pub description: String,
    pub full_description: String,
    /// ID of the owning collection
    pub collection: String,
    /// Tag name to image ID
    #[serde_as(as = "DefaultOnNull")]
    pub image_tags: BTreeMap<String, String>,
    /// Architecture to tag name to image ID
    #[serde_as(as = "DefaultOnNull")]
    pub arch_tags: BTreeMap<String, BTreeMap<String, String>>,
    /// IDs of the images in this container
    #[serde_as(as = "DefaultOnNull")]
    pub images: Vec<String>,
    pub size: i64,
    pub download_count: i64,
    pub private: bool,
    pub read_only: bool,
    pub entity_name: String,
    pub collection_name: String,
}

/// A single image file stored in a container.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub hash: String,
    pub description: String,
    /// ID of the owning container
    pub container: String,
    pub blob: String,
    pub size: i64,
    pub uploaded: bool,
    pub signed: Option<bool>,
    pub architecture: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub fingerprints: Vec<String>,
    pub entity_name: String,
    pub collection_name: String,
    pub container_name: String,
}

impl Image {
    /// `entity/collection/container` path of the image's container.
    pub fn container_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.entity_name, self.collection_name, self.container_name
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn null_data_decodes_as_empty_results() {
        let response: SearchResponse =
            serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(response.data, SearchResults::default());
        assert!(response.data.is_empty());
    }

    #[test]
    fn missing_data_is_rejected() {
        let result = serde_json::from_value::<SearchResponse>(json!({"entity": []}));
        assert!(result.is_err());
    }

    #[test]
    fn null_and_missing_lists_decode_as_empty() {
        let response: SearchResponse = serde_json::from_value(json!({
            "data": {
                "entity": null,
                "collection": [],
                "image": null
            }
        }))
        .unwrap();

        assert!(response.data.is_empty());
        assert_eq!(response.data.len(), 0);
    }

    #[test]
    fn image_fields_decode() {
        let image: Image = serde_json::from_value(json!({
            "id": "5d2a9c7f",
            "createdAt": "2023-04-01T12:00:00Z",
            "deleted": false,
            "hash": "sha256.0123abcd",
            "container": "5d2a9c7e",
            "size": 2811234,
            "uploaded": true,
            "signed": true,
            "architecture": "arm64",
            "fingerprints": null,
            "entityName": "library",
            "collectionName": "default",
            "containerName": "alpine",
            "somethingNew": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(image.meta.id, "5d2a9c7f");
        assert_eq!(
            image.meta.created_at.unwrap().to_rfc3339(),
            "2023-04-01T12:00:00+00:00"
        );
        assert_eq!(image.signed, Some(true));
        assert_eq!(image.architecture.as_deref(), Some("arm64"));
        assert!(image.fingerprints.is_empty());
        assert_eq!(image.container_path(), "library/default/alpine");
    }

    #[test]
    fn container_tags_decode() {
        let container: Container = serde_json::from_value(json!({
            "id": "c1",
            "name": "alpine",
            "imageTags": {"latest": "i1"},
            "archTags": {"amd64": {"latest": "i1"}, "arm64": {"latest": "i2"}},
            "readOnly": true
        }))
        .unwrap();

        assert_eq!(container.image_tags["latest"], "i1");
        assert_eq!(container.arch_tags["arm64"]["latest"], "i2");
        assert!(container.read_only);
        assert!(!container.private);
    }
}
