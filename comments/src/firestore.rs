use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::{CommentStore, StoreError, StoredComments};

pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_COLLECTION: &str = "comments";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        FirestoreConfig {
            project_id: project_id.into(),
            api_key: None,
            collection: default_collection(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs()
        }
    }

    pub fn document_url(&self, doc_id: &str) -> String {
        let mut url = format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.project_id),
            urlencoding::encode(&self.collection),
            urlencoding::encode(doc_id)
        );
        if let Some(key) = &self.api_key {
            url.push_str("?key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<StringValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayField {
    #[serde(default)]
    pub array_value: ArrayValue,
}

/// REST representation of a comment document. Only the comment list field is
/// read; other fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub fields: DocumentFields,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<ArrayField>,
}

impl Document {
    pub fn from_comments(comments: &[String]) -> Document {
        let values = comments.iter()
            .map(|comment| StringValue { string_value: Some(comment.clone()) })
            .collect();
        Document {
            fields: DocumentFields {
                comments: Some(ArrayField { array_value: ArrayValue { values } })
            }
        }
    }

    /// Non-string entries in the list are skipped.
    pub fn into_comments(self) -> Vec<String> {
        self.fields.comments
            .map(|field| field.array_value.values.into_iter().filter_map(|v| v.string_value).collect())
            .unwrap_or_default()
    }
}

/// Comment store backed by the Firestore REST API.
pub struct FirestoreStore {
    config: FirestoreConfig,
    agent: ureq::Agent
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        FirestoreStore { config, agent }
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }
}

impl CommentStore for FirestoreStore {
    fn get(&self, doc_id: &str) -> Result<StoredComments, StoreError> {
        let url = self.config.document_url(doc_id);
        log::debug!("fetching comments for {doc_id:?}");

        let mut response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Ok(StoredComments::default()),
            Err(err) => return Err(err.into())
        };

        let document = response.body_mut().read_json::<Document>()?;
        Ok(StoredComments { exists: true, comments: document.into_comments() })
    }

    fn put(&self, doc_id: &str, comments: &[String]) -> Result<(), StoreError> {
        let url = self.config.document_url(doc_id);
        log::debug!("writing {} comments to {doc_id:?}", comments.len());

        self.agent.patch(url.as_str()).send_json(Document::from_comments(comments))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_encodes_segments() {
        let mut config = FirestoreConfig::new("movies-dev");
        config.api_key = Some("abc".to_string());
        assert_eq!(
            config.document_url("die-hard"),
            "https://firestore.googleapis.com/v1/projects/movies-dev/databases/(default)/documents/comments/die-hard?key=abc"
        );
        assert!(config.document_url("a/b").ends_with("/comments/a%2Fb?key=abc"));
    }

    #[test]
    fn document_body_shape() {
        let body = serde_json::to_value(Document::from_comments(&["Great".to_string()])).unwrap();
        assert_eq!(body, serde_json::json!({
            "fields": { "comments": { "arrayValue": { "values": [{ "stringValue": "Great" }] } } }
        }));
    }

    #[test]
    fn reads_rest_response() {
        let json = r#"{
            "name": "projects/p/databases/(default)/documents/comments/heat",
            "fields": { "comments": { "arrayValue": { "values": [
                { "stringValue": "first" }, { "integerValue": "3" }, { "stringValue": "second" }
            ] } } },
            "createTime": "2024-01-01T00:00:00Z"
        }"#;
        let document: Document = serde_json::from_str(json).unwrap();
        assert_eq!(document.into_comments(), vec!["first", "second"]);
    }

    #[test]
    fn empty_array_has_no_values_key() {
        let json = r#"{ "fields": { "comments": { "arrayValue": {} } } }"#;
        let document: Document = serde_json::from_str(json).unwrap();
        assert!(document.into_comments().is_empty());

        let document: Document = serde_json::from_str("{}").unwrap();
        assert!(document.into_comments().is_empty());
    }

    #[test]
    fn config_defaults() {
        let config: FirestoreConfig = serde_json::from_str(r#"{ "project_id": "p" }"#).unwrap();
        assert_eq!(config, FirestoreConfig::new("p"));
    }
}
