//! Contract Test: Zone Filtering
//!
//! Verifies that changes outside the permitted zones are ignored rather
//! than failed, and that an empty change set never reaches the provider.

mod common;

use common::*;
use exdns_core::{Changes, Endpoint};

#[tokio::test]
async fn empty_change_set_makes_no_calls() {
    let client = RecordingClient::new();
    let reconciler = reconciler(&client, &["example.com"]);

    reconciler
        .apply(&Changes::default())
        .await
        .expect("empty apply succeeds");

    assert!(client.calls().is_empty(), "no remote call expected");
}

#[tokio::test]
async fn empty_change_set_succeeds_even_if_provider_is_down() {
    let client = RecordingClient::new().failing_on(FailOn::List);
    let reconciler = reconciler(&client, &["example.com"]);

    assert!(reconciler.apply(&Changes::default()).await.is_ok());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn change_outside_all_zones_is_dropped() {
    let client = RecordingClient::new();
    let reconciler = reconciler(&client, &["example.com"]);

    let changes = Changes {
        create: vec![Endpoint::new("www.other.org", "A", ["1.1.1.1"])],
        ..Changes::default()
    };

    reconciler
        .apply(&changes)
        .await
        .expect("unmatched change is not an error");

    assert!(client.calls().is_empty(), "no remote call expected");
}

#[tokio::test]
async fn matching_changes_still_apply_next_to_dropped_ones() {
    let client = RecordingClient::new();
    let reconciler = reconciler(&client, &["example.com", "sub.example.com"]);

    let changes = Changes {
        create: vec![
            Endpoint::new("www.other.org", "A", ["1.1.1.1"]),
            Endpoint::new("api.sub.example.com", "A", ["2.2.2.2"]),
        ],
        ..Changes::default()
    };

    reconciler.apply(&changes).await.expect("apply succeeds");

    assert_eq!(
        client.calls(),
        vec![
            Call::List {
                zone: "sub.example.com".to_string()
            },
            Call::Create {
                zone: "sub.example.com".to_string(),
                name: "api".to_string(),
                record_type: "A".to_string(),
                content: "2.2.2.2".to_string(),
            },
        ]
    );
}
