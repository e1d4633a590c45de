//! Typed shapes for timeline entries, posts and authors.
//!
//! Every field except the post id is optional: the upstream schema drifts, and
//! a missing field must degrade to a default instead of rejecting the post.
//! `null` is accepted wherever a field is optional.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One candidate node of a paginated timeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineEntry {
    #[serde(rename = "entryId")]
    pub entry_id: String,
    #[serde(default)]
    pub content: Option<EntryContent>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EntryContent {
    #[serde(rename = "itemContent", default)]
    pub item_content: Option<Map<String, Value>>,
    /// Module entries carry several items; only single-item entries are harvested.
    #[serde(default)]
    pub items: Option<Vec<TimelineItem>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TimelineItem {
    #[serde(rename = "itemContent", default)]
    pub item_content: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TweetResult {
    #[serde(default)]
    pub rest_id: Option<String>,
    #[serde(default)]
    pub legacy: Option<TweetLegacy>,
    #[serde(default)]
    pub core: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TweetLegacy {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub conversation_id_str: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub quote_count: Option<u64>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub lang: Option<String>,
    pub id_str: String,
    #[serde(default)]
    pub user_id_str: Option<String>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default)]
    pub entities: Option<Map<String, Value>>,
}

impl TweetLegacy {
    /// First attached media URL, if any.
    pub fn first_media_url(&self) -> Option<&str> {
        self.entities
            .as_ref()?
            .get("media")?
            .as_array()?
            .first()?
            .get("media_url_https")?
            .as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub legacy: Option<UserLegacy>,
    #[serde(default)]
    pub core: Option<UserCore>,
    #[serde(default)]
    pub location: Option<UserLocation>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserLegacy {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub friends_count: Option<u64>,
    #[serde(default)]
    pub media_count: Option<u64>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserCore {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserLocation {
    #[serde(default)]
    pub location: Option<String>,
}

/// Author fields copied into a record; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorInfo {
    pub screen_name: String,
    pub display_name: String,
    pub location: String,
}

impl From<&User> for AuthorInfo {
    fn from(user: &User) -> Self {
        let core = user.core.as_ref();
        Self {
            screen_name: core
                .and_then(|c| c.screen_name.clone())
                .unwrap_or_default(),
            display_name: core.and_then(|c| c.name.clone()).unwrap_or_default(),
            location: user
                .location
                .as_ref()
                .and_then(|l| l.location.clone())
                .unwrap_or_default(),
        }
    }
}

/// Column order of the persisted table.
pub const CSV_COLUMNS: [&str; 15] = [
    "created_at",
    "id_str",
    "full_text",
    "quote_count",
    "reply_count",
    "retweet_count",
    "favorite_count",
    "lang",
    "user_id_str",
    "conversation_id_str",
    "username",
    "tweet_url",
    "image_url",
    "location",
    "in_reply_to_screen_name",
];

/// Canonical flat record of one post. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PostRecord {
    pub created_at: String,
    pub id_str: String,
    pub full_text: String,
    pub quote_count: u64,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub lang: String,
    pub user_id_str: String,
    pub conversation_id_str: String,
    pub username: String,
    pub tweet_url: String,
    pub image_url: String,
    pub location: String,
    pub in_reply_to_screen_name: Option<String>,
}
