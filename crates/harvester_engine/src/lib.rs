//! Harvester engine: timeline extraction pipeline and session execution.
mod backoff;
mod config;
mod driver;
mod filename;
mod mailbox;
mod normalize;
mod persist;
mod pipeline;
mod resolve;
mod schema;
mod session;
mod store;
mod types;

pub use backoff::BackoffSettings;
pub use config::{HarvestConfig, HarvestMode, SearchQuery, DEFAULT_SITE_HOST};
pub use driver::{DriverError, PageDriver};
pub use filename::output_file_name;
pub use mailbox::{is_timeline_endpoint, CapturedResponse, ResponseMailbox, ResponseSender};
pub use normalize::{clean_text, Normalizer, Rejection};
pub use persist::{ensure_output_dir, CsvFileSink, PersistError, RecordSink};
pub use pipeline::Pipeline;
pub use resolve::{resolve, TimelineShape};
pub use schema::{
    AuthorInfo, EntryContent, PostRecord, TimelineEntry, TimelineItem, TweetLegacy, TweetResult,
    User, UserCore, UserLegacy, UserLocation, CSV_COLUMNS,
};
pub use session::Harvester;
pub use store::RecordStore;
pub use types::{HarvestError, HarvestReport};
