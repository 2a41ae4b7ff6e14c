//! Contract Test: Apply Ordering
//!
//! Verifies the order in which mutating calls reach the provider.
//!
//! Constraints verified:
//! - Within a zone: update-old → delete → create → update-new
//! - A delete of a name/type is issued before a create of the same name/type
//! - Each zone with changes is read exactly once, before its mutations
//! - Zones without changes are not touched at all

mod common;

use common::*;
use exdns_core::{Changes, Endpoint};

#[tokio::test]
async fn delete_is_issued_before_create_of_same_record() {
    let client = RecordingClient::new().with_record(
        "example.com",
        "11",
        "A",
        "www.example.com",
        "1.1.1.1",
        "600",
    );
    let reconciler = reconciler(&client, &["example.com"]);

    let changes = Changes {
        create: vec![Endpoint::new("www.example.com", "A", ["2.2.2.2"])],
        delete: vec![Endpoint::new("www.example.com", "A", ["1.1.1.1"])],
        ..Changes::default()
    };

    reconciler.apply(&changes).await.expect("apply succeeds");

    assert_eq!(
        client.mutations(),
        vec![
            Call::Delete {
                zone: "example.com".to_string(),
                id: 11,
            },
            Call::Create {
                zone: "example.com".to_string(),
                name: "www".to_string(),
                record_type: "A".to_string(),
                content: "2.2.2.2".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn full_change_set_follows_fixed_order() {
    let client = RecordingClient::new()
        .with_record("example.com", "1", "A", "old.example.com", "1.1.1.1", "600")
        .with_record("example.com", "2", "A", "gone.example.com", "2.2.2.2", "600")
        .with_record("example.com", "3", "A", "moved.example.com", "4.4.4.4", "600");
    let reconciler = reconciler(&client, &["example.com"]);

    let changes = Changes {
        create: vec![Endpoint::new("new.example.com", "A", ["3.3.3.3"])],
        update_old: vec![Endpoint::new("old.example.com", "A", ["1.1.1.1"])],
        // update-new resolves its id from its own content in the snapshot
        update_new: vec![Endpoint::new("moved.example.com", "A", ["4.4.4.4"])],
        delete: vec![Endpoint::new("gone.example.com", "A", ["2.2.2.2"])],
    };

    reconciler.apply(&changes).await.expect("apply succeeds");

    let calls = client.calls();
    assert_eq!(
        calls[0],
        Call::List {
            zone: "example.com".to_string()
        }
    );
    assert!(matches!(&calls[1], Call::Update { id: 1, name, .. } if name == "old"));
    assert!(matches!(&calls[2], Call::Delete { id: 2, .. }));
    assert!(matches!(&calls[3], Call::Create { name, .. } if name == "new"));
    assert!(matches!(&calls[4], Call::Update { id: 3, name, .. } if name == "moved"));
    assert_eq!(calls.len(), 5);
}

#[tokio::test]
async fn zones_are_read_once_and_only_when_changed() {
    let client = RecordingClient::new();
    let reconciler = reconciler(&client, &["example.com", "example.org", "example.net"]);

    let changes = Changes {
        create: vec![
            Endpoint::new("a.example.net", "A", ["1.1.1.1"]),
            Endpoint::new("b.example.net", "A", ["1.1.1.2"]),
            Endpoint::new("a.example.com", "A", ["1.1.1.3"]),
        ],
        ..Changes::default()
    };

    reconciler.apply(&changes).await.expect("apply succeeds");

    let lists: Vec<Call> = client
        .calls()
        .into_iter()
        .filter(|c| !c.is_mutation())
        .collect();
    assert_eq!(
        lists,
        vec![
            Call::List {
                zone: "example.com".to_string()
            },
            Call::List {
                zone: "example.net".to_string()
            },
        ]
    );
    assert_eq!(client.mutations().len(), 3);
}

#[tokio::test]
async fn apex_and_heritage_records_are_created_in_provider_shape() {
    let client = RecordingClient::new();
    let reconciler = reconciler(&client, &["example.com"]);

    let changes = Changes {
        create: vec![
            Endpoint::new("example.com", "A", ["1.2.3.4"]),
            Endpoint::new(
                "example.com",
                "TXT",
                ["\"heritage=external-dns,external-dns/owner=default\""],
            ),
        ],
        ..Changes::default()
    };

    reconciler.apply(&changes).await.expect("apply succeeds");

    assert_eq!(
        client.mutations(),
        vec![
            Call::Create {
                zone: "example.com".to_string(),
                name: "@".to_string(),
                record_type: "A".to_string(),
                content: "1.2.3.4".to_string(),
            },
            Call::Create {
                zone: "example.com".to_string(),
                name: "@".to_string(),
                record_type: "TXT".to_string(),
                content: "heritage=external-dns,external-dns/owner=default".to_string(),
            },
        ]
    );
}
