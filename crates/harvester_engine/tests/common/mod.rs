#![allow(dead_code)]
//! JSON fixtures shaped like the site's timeline responses.

use serde_json::{json, Value};

pub const SEARCH_URL: &str = "https://x.com/i/api/graphql/q1/SearchTimeline?variables=%7B%7D";
pub const USER_URL: &str = "https://x.com/i/api/graphql/u1/UserTweets?variables=%7B%7D";

/// A post entry by `@user` with attached media.
pub fn tweet_entry(id: &str, text: &str, lang: &str, user: &str) -> Value {
    json!({
        "entryId": format!("tweet-{id}"),
        "sortIndex": "1800000000000000000",
        "content": {
            "entryType": "TimelineTimelineItem",
            "itemContent": {
                "itemType": "TimelineTweet",
                "tweet_results": {
                    "result": {
                        "__typename": "Tweet",
                        "rest_id": id,
                        "core": {
                            "user_results": {
                                "result": {
                                    "core": { "screen_name": user, "name": "Display Name" },
                                    "location": { "location": "Mars" },
                                    "legacy": { "followers_count": 10, "description": null }
                                }
                            }
                        },
                        "legacy": {
                            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                            "id_str": id,
                            "full_text": text,
                            "lang": lang,
                            "favorite_count": 3,
                            "quote_count": 1,
                            "reply_count": 2,
                            "retweet_count": 4,
                            "user_id_str": "42",
                            "conversation_id_str": id,
                            "in_reply_to_screen_name": null,
                            "entities": {
                                "media": [
                                    { "media_url_https": "https://pbs.twimg.com/media/first.jpg" },
                                    { "media_url_https": "https://pbs.twimg.com/media/second.jpg" }
                                ]
                            }
                        }
                    }
                }
            }
        }
    })
}

pub fn post(id: &str) -> Value {
    tweet_entry(id, &format!("post {id}"), "en", "alice")
}

pub fn cursor_entry(position: &str) -> Value {
    json!({
        "entryId": format!("cursor-{position}-0"),
        "content": { "entryType": "TimelineTimelineCursor", "value": "DAACCgAC", "cursorType": position }
    })
}

pub fn search_payload(entries: Vec<Value>) -> Value {
    json!({
        "data": {
            "search_by_raw_query": {
                "search_timeline": {
                    "timeline": {
                        "instructions": [
                            { "type": "TimelineAddEntries", "entries": entries },
                            { "type": "TimelineReplaceEntry", "entry": cursor_entry("bottom") }
                        ]
                    }
                }
            }
        }
    })
}

pub fn user_payload(instructions: Vec<Value>) -> Value {
    json!({
        "data": {
            "user": {
                "result": {
                    "__typename": "User",
                    "timeline": { "timeline": { "instructions": instructions } }
                }
            }
        }
    })
}

pub fn add_entries(entries: Vec<Value>) -> Value {
    json!({ "type": "TimelineAddEntries", "entries": entries })
}

pub fn pin_entry(entry: Value) -> Value {
    json!({ "type": "TimelinePinEntry", "entry": entry })
}

pub fn entry_ids(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e["entryId"].as_str().unwrap_or_default().to_string())
        .collect()
}
