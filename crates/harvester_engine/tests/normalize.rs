mod common;

use common::*;
use harvester_engine::{Normalizer, PostRecord, Rejection, TimelineEntry};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn entry(raw: Value) -> TimelineEntry {
    serde_json::from_value(raw).expect("timeline entry")
}

fn normalizer() -> Normalizer {
    Normalizer::new(None, "x.com")
}

#[test]
fn full_entry_becomes_a_canonical_record() {
    let raw = tweet_entry("1001", "Check this out   https://example.com/x  now", "en", "alice");
    let record = normalizer().normalize(&entry(raw)).expect("record");

    assert_eq!(
        record,
        PostRecord {
            created_at: "Wed Oct 10 20:19:24 +0000 2018".into(),
            id_str: "1001".into(),
            full_text: "Check this out now".into(),
            quote_count: 1,
            reply_count: 2,
            retweet_count: 4,
            favorite_count: 3,
            lang: "en".into(),
            user_id_str: "42".into(),
            conversation_id_str: "1001".into(),
            username: "alice".into(),
            tweet_url: "https://x.com/alice/status/1001".into(),
            image_url: "https://pbs.twimg.com/media/first.jpg".into(),
            location: "Mars".into(),
            in_reply_to_screen_name: None,
        }
    );
}

#[test]
fn language_filter_keeps_only_matching_posts() {
    let filter = Normalizer::new(Some("en".into()), "x.com");
    let english = entry(tweet_entry("1", "hello", "en", "a"));
    let french = entry(tweet_entry("2", "bonjour", "fr", "b"));

    assert!(filter.normalize(&english).is_some());
    assert_eq!(
        filter.evaluate(&french),
        Err(Rejection::LanguageMismatch { lang: "fr".into() })
    );
}

#[test]
fn empty_language_filter_keeps_everything() {
    let filter = Normalizer::new(Some(String::new()), "x.com");
    assert!(filter
        .normalize(&entry(tweet_entry("2", "bonjour", "fr", "b")))
        .is_some());
}

#[test]
fn non_post_entries_are_rejected() {
    assert_eq!(
        normalizer().evaluate(&entry(cursor_entry("bottom"))),
        Err(Rejection::NotAPost)
    );
    let mut module = post("5");
    module["entryId"] = json!("who-to-follow-5");
    assert_eq!(normalizer().evaluate(&entry(module)), Err(Rejection::NotAPost));
}

#[test]
fn entries_without_item_content_are_rejected() {
    let raw = json!({ "entryId": "tweet-1", "content": { "items": [] } });
    assert_eq!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::MissingItemContent)
    );
}

#[test]
fn posts_without_an_author_are_rejected() {
    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]["core"] = json!({});
    assert_eq!(normalizer().evaluate(&entry(raw)), Err(Rejection::MissingAuthor));

    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"] = json!({ "result": {} });
    assert_eq!(normalizer().evaluate(&entry(raw)), Err(Rejection::MissingPost));
}

#[test]
fn missing_or_empty_id_is_a_validation_failure() {
    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]["legacy"]
        .as_object_mut()
        .unwrap()
        .remove("id_str");
    assert!(matches!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::InvalidPost(_))
    ));

    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]["legacy"]["id_str"] = json!("");
    assert!(matches!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::InvalidPost(_))
    ));

    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]
        .as_object_mut()
        .unwrap()
        .remove("legacy");
    assert!(matches!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::InvalidPost(_))
    ));
}

#[test]
fn wrongly_typed_fields_reject_only_that_entry() {
    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]["legacy"]["favorite_count"] =
        json!("many");
    assert!(matches!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::InvalidPost(_))
    ));

    let mut raw = post("1");
    raw["content"]["itemContent"]["tweet_results"]["result"]["core"]["user_results"]["result"]
        ["core"] = json!("alice");
    assert!(matches!(
        normalizer().evaluate(&entry(raw)),
        Err(Rejection::InvalidAuthor(_))
    ));
}

#[test]
fn absent_optional_fields_fall_back_to_defaults() {
    let raw = json!({
        "entryId": "tweet-77",
        "content": {
            "itemContent": {
                "tweet_results": {
                    "result": {
                        "core": { "user_results": { "result": { "legacy": {} } } },
                        "legacy": {
                            "id_str": "77",
                            "full_text": null,
                            "lang": null,
                            "entities": { "media": [] },
                            "in_reply_to_screen_name": "bob"
                        }
                    }
                }
            }
        }
    });
    let record = normalizer().normalize(&entry(raw)).expect("record");

    assert_eq!(record.id_str, "77");
    assert_eq!(record.full_text, "");
    assert_eq!(record.lang, "");
    assert_eq!(record.favorite_count, 0);
    assert_eq!(record.username, "");
    assert_eq!(record.location, "");
    assert_eq!(record.image_url, "");
    assert_eq!(record.tweet_url, "https://x.com//status/77");
    assert_eq!(record.in_reply_to_screen_name.as_deref(), Some("bob"));
}
