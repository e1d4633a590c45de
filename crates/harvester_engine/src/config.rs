use std::time::Duration;

use url::Url;

use crate::backoff::BackoffSettings;

pub const DEFAULT_SITE_HOST: &str = "x.com";

/// Keywords plus optional `YYYY-MM-DD` bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub keywords: String,
    pub since: Option<String>,
    pub until: Option<String>,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Self::default()
        }
    }

    /// The query as typed into the search box.
    pub fn query_string(&self) -> String {
        let mut query = self.keywords.clone();
        if let Some(since) = &self.since {
            query.push_str(&format!(" since:{since}"));
        }
        if let Some(until) = &self.until {
            query.push_str(&format!(" until:{until}"));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestMode {
    Search(SearchQuery),
    Profile { handle: String },
}

impl HarvestMode {
    /// Page whose timeline responses are harvested.
    pub fn target_url(&self, site_host: &str) -> Result<Url, url::ParseError> {
        match self {
            HarvestMode::Search(query) => {
                let mut url = Url::parse(&format!("https://{site_host}/search"))?;
                url.query_pairs_mut()
                    .append_pair("q", &query.query_string())
                    .append_pair("src", "typed_query")
                    .append_pair("f", "live");
                Ok(url)
            }
            HarvestMode::Profile { handle } => {
                Url::parse(&format!("https://{site_host}/{}", bare_handle(handle)))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            HarvestMode::Search(query) => format!("keyword '{}'", query.query_string()),
            HarvestMode::Profile { handle } => format!("user @{}", bare_handle(handle)),
        }
    }
}

/// Profile handle without a leading `@`.
pub(crate) fn bare_handle(handle: &str) -> &str {
    handle.trim_start_matches('@')
}

/// Settings for one harvest session.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub mode: HarvestMode,
    pub target_count: usize,
    /// Wait after each scroll for responses to arrive.
    pub scroll_delay: Duration,
    pub login_timeout: Duration,
    /// Keep only posts in this language; `None` or empty keeps everything.
    pub language: Option<String>,
    pub site_host: String,
    pub mailbox_capacity: usize,
    pub backoff: BackoffSettings,
}

impl HarvestConfig {
    pub fn new(mode: HarvestMode) -> Self {
        Self {
            mode,
            target_count: 100,
            scroll_delay: Duration::from_secs(3),
            login_timeout: Duration::from_secs(20),
            language: None,
            site_host: DEFAULT_SITE_HOST.to_string(),
            mailbox_capacity: 256,
            backoff: BackoffSettings::default(),
        }
    }

    pub fn home_url(&self) -> String {
        format!("https://{}/home", self.site_host)
    }
}
