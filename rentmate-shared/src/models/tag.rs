use serde::{Deserialize, Serialize};

/// An interest tag a user can attach to their profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Stable identifier used by the tag service.
    pub id: String,
    /// Human readable label.
    pub name: String,
}

impl Tag {
    /// Builds a tag from its id and label.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The slice of the signed-in user that the tag prompt cares about.
///
/// A record without a `tags` field deserializes with an empty list, so
/// "no tags yet" has a single representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique identifier for the user.
    pub id: String,

    /// Interest tags currently attached to the user.
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<Tag>,

    /// The user's email address, when the API includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name shown in the header and on the interests page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserRecord {
    /// A user with no tags and no display fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tags: Vec::new(),
            email: None,
            display_name: None,
        }
    }

    /// Replaces the user's tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether at least one tag is attached.
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Ids of the attached tags, in order.
    pub fn tag_ids(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.id.clone()).collect()
    }

    /// Name to greet the user with, falling back to email and then id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

// `null` and malformed tag lists both mean "no tags yet".
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|raw| serde_json::from_value::<Vec<Tag>>(raw).ok())
        .unwrap_or_default())
}

/// Body of `PUT /users/{id}/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserTagsRequest {
    /// Full replacement set of tag ids.
    pub tag_ids: Vec<String>,
}
