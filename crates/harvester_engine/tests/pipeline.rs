mod common;

use common::*;
use harvester_engine::{Normalizer, Pipeline, RecordStore};
use pretty_assertions::assert_eq;

fn ids(records: &[harvester_engine::PostRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id_str.as_str()).collect()
}

#[test]
fn overlapping_payloads_yield_each_post_once() {
    let mut pipeline = Pipeline::new(Normalizer::new(None, "x.com"), RecordStore::new());

    let first = pipeline.ingest(&search_payload(vec![post("1"), post("2"), cursor_entry("bottom")]));
    let second = pipeline.ingest(&search_payload(vec![post("2"), post("3")]));
    let replay = pipeline.ingest(&search_payload(vec![post("1"), post("3")]));

    assert_eq!(ids(&first), vec!["1", "2"]);
    assert_eq!(ids(&second), vec!["3"]);
    assert!(replay.is_empty());
    assert_eq!(ids(pipeline.store().records()), vec!["1", "2", "3"]);
}

#[test]
fn filtered_and_malformed_entries_do_not_block_the_batch() {
    let mut pipeline = Pipeline::new(
        Normalizer::new(Some("en".into()), "x.com"),
        RecordStore::new(),
    );
    let mut broken = post("2");
    broken["content"]["itemContent"]["tweet_results"]["result"]["legacy"]["id_str"] =
        serde_json::json!(2);

    let fresh = pipeline.ingest(&user_payload(vec![add_entries(vec![
        post("1"),
        broken,
        tweet_entry("3", "salut", "fr", "bob"),
        post("4"),
    ])]));

    assert_eq!(ids(&fresh), vec!["1", "4"]);
}

#[test]
fn pre_filled_store_suppresses_known_posts() {
    let mut store = RecordStore::new();
    let mut seed = Pipeline::new(Normalizer::new(None, "x.com"), RecordStore::new());
    store.insert_batch(seed.ingest(&search_payload(vec![post("1")])));

    let mut pipeline = Pipeline::new(Normalizer::new(None, "x.com"), store);
    let fresh = pipeline.ingest(&search_payload(vec![post("1"), post("2")]));
    assert_eq!(ids(&fresh), vec!["2"]);
    assert_eq!(pipeline.store().len(), 2);
}
