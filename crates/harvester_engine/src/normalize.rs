use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::schema::{AuthorInfo, PostRecord, TimelineEntry, TweetResult, User};

/// Substring of `entryId` that marks a post entry (cursors and modules lack it).
const POST_ENTRY_MARKER: &str = "tweet";

/// A run of whitespace and bare URLs, replaced by a single space.
static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s|https?://\S+)+").expect("static pattern"));

/// Why an entry produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAPost,
    MissingItemContent,
    MissingPost,
    MissingAuthor,
    InvalidPost(String),
    InvalidAuthor(String),
    LanguageMismatch { lang: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAPost => write!(f, "not a post entry"),
            Rejection::MissingItemContent => write!(f, "no item content"),
            Rejection::MissingPost => write!(f, "no post result"),
            Rejection::MissingAuthor => write!(f, "no author result"),
            Rejection::InvalidPost(err) => write!(f, "invalid post: {err}"),
            Rejection::InvalidAuthor(err) => write!(f, "invalid author: {err}"),
            Rejection::LanguageMismatch { lang } => write!(f, "language {lang:?} filtered out"),
        }
    }
}

/// Turns timeline entries into canonical records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    language: Option<String>,
    site_host: String,
}

impl Normalizer {
    /// An empty language means no filter.
    pub fn new(language: Option<String>, site_host: impl Into<String>) -> Self {
        Self {
            language: language.filter(|lang| !lang.is_empty()),
            site_host: site_host.into(),
        }
    }

    pub fn normalize(&self, entry: &TimelineEntry) -> Option<PostRecord> {
        self.evaluate(entry).ok()
    }

    /// Like [`Normalizer::normalize`], but reports why an entry was dropped.
    pub fn evaluate(&self, entry: &TimelineEntry) -> Result<PostRecord, Rejection> {
        if !entry.entry_id.contains(POST_ENTRY_MARKER) {
            return Err(Rejection::NotAPost);
        }
        let item = entry
            .content
            .as_ref()
            .and_then(|c| c.item_content.as_ref())
            .ok_or(Rejection::MissingItemContent)?;

        let tweet_raw = nested_result(item.get("tweet_results")).ok_or(Rejection::MissingPost)?;
        let user_raw = nested_result(
            tweet_raw
                .get("core")
                .and_then(|core| core.get("user_results")),
        )
        .ok_or(Rejection::MissingAuthor)?;

        let tweet = TweetResult::deserialize(tweet_raw)
            .map_err(|err| Rejection::InvalidPost(err.to_string()))?;
        let user =
            User::deserialize(user_raw).map_err(|err| Rejection::InvalidAuthor(err.to_string()))?;

        let legacy = tweet
            .legacy
            .as_ref()
            .ok_or_else(|| Rejection::InvalidPost("missing legacy".into()))?;
        if legacy.id_str.is_empty() {
            return Err(Rejection::InvalidPost("empty id_str".into()));
        }

        let lang = legacy.lang.clone().unwrap_or_default();
        if let Some(wanted) = &self.language {
            if &lang != wanted {
                return Err(Rejection::LanguageMismatch { lang });
            }
        }

        let author = AuthorInfo::from(&user);
        let tweet_url = format!(
            "https://{}/{}/status/{}",
            self.site_host, author.screen_name, legacy.id_str
        );

        Ok(PostRecord {
            created_at: legacy.created_at.clone().unwrap_or_default(),
            id_str: legacy.id_str.clone(),
            full_text: clean_text(legacy.full_text.as_deref().unwrap_or_default()),
            quote_count: legacy.quote_count.unwrap_or(0),
            reply_count: legacy.reply_count.unwrap_or(0),
            retweet_count: legacy.retweet_count.unwrap_or(0),
            favorite_count: legacy.favorite_count.unwrap_or(0),
            lang,
            user_id_str: legacy.user_id_str.clone().unwrap_or_default(),
            conversation_id_str: legacy.conversation_id_str.clone().unwrap_or_default(),
            username: author.screen_name,
            tweet_url,
            image_url: legacy.first_media_url().unwrap_or_default().to_string(),
            location: author.location,
            in_reply_to_screen_name: legacy.in_reply_to_screen_name.clone(),
        })
    }
}

/// Collapses whitespace runs and strips bare URLs, then trims.
pub fn clean_text(text: &str) -> String {
    NOISE.replace_all(text, " ").trim().to_string()
}

/// `holder.result`, present and a non-empty object.
fn nested_result(holder: Option<&Value>) -> Option<&Value> {
    holder?
        .get("result")
        .filter(|result| result.as_object().is_some_and(|obj| !obj.is_empty()))
}
