#![allow(clippy::unwrap_used)]
// End-to-end behaviour of `ObjectEngine`: type pre-pass, resolution, and
// the HTTP client underneath.

mod common;

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prtgly_core::{
    CancellationToken, Content, Credentials, ObjectEngine, ObjectStatus, ObjectType, Property,
    PrtgClient, Resolved, SearchFilter,
};
use prtgly_api::TransportConfig;

use common::{FakeServer, device_row, group_row, object_row};

fn tags(values: &[&str]) -> Vec<ObjectType> {
    values.iter().map(|v| ObjectType::from(*v)).collect()
}

fn mixed_objects() -> FakeServer {
    FakeServer::new().with_rows(
        Content::Objects,
        [
            object_row(1, "probenode", "probenode"),
            object_row(2, "group", "group"),
            object_row(40, "device", "device"),
            object_row(2055, "ping", "sensor"),
            object_row(2056, "http", "sensor"),
        ],
    )
}

// ── Type pre-pass ───────────────────────────────────────────────────

#[tokio::test]
async fn specific_types_are_filtered_server_side() {
    let engine = ObjectEngine::new(mixed_objects());
    let types = tags(&["ping", "device"]);

    let found = engine
        .query_objects(Vec::new(), Some(&types), CancellationToken::new())
        .collect_all()
        .await
        .unwrap();

    let ids: Vec<u32> = found.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![40, 2055]);

    let request = &engine.transport().requests()[0];
    assert_eq!(
        request.filters,
        vec![SearchFilter::any_of(Property::Type, ["ping", "device"])]
    );
}

#[tokio::test]
async fn sensor_catch_all_fetches_everything_and_filters_locally() {
    let engine = ObjectEngine::new(mixed_objects());
    let types = tags(&["sensor", "device"]);

    let found = engine
        .query_objects(Vec::new(), Some(&types), CancellationToken::new())
        .collect_all()
        .await
        .unwrap();

    let ids: Vec<u32> = found.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![40, 2055, 2056]);
    assert!(
        engine.transport().requests()[0]
            .filters
            .iter()
            .all(|f| f.property() != Property::Type)
    );
}

#[tokio::test]
async fn other_filters_are_kept_with_type_filter() {
    let engine = ObjectEngine::new(mixed_objects());
    let types = tags(&["probe"]);
    let filters = vec![SearchFilter::equals(Property::ParentId, 1)];

    let found = engine
        .query_objects(filters, Some(&types), CancellationToken::new())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
    assert_eq!(
        engine.transport().requests()[0].filters,
        vec![
            SearchFilter::equals(Property::ParentId, 1),
            SearchFilter::any_of(Property::Type, ["probenode"]),
        ]
    );
}

// ── Scenario: 15 devices and 10 groups, page size 10 ────────────────

#[tokio::test]
async fn devices_and_groups_resolve_in_two_partitions() {
    let is_group = |id: u32| id % 5 == 0 || id % 5 == 3;
    let server = FakeServer::new()
        .with_rows(
            Content::Objects,
            (1..=25).map(|id| {
                if is_group(id) {
                    object_row(id, "group", "group")
                } else {
                    object_row(id, "device", "device")
                }
            }),
        )
        .with_rows(Content::Devices, (1..=25).filter(|id| !is_group(*id)).map(device_row))
        .with_rows(Content::Groups, (1..=25).filter(|id| is_group(*id)).map(group_row));
    let engine = ObjectEngine::new(server).with_page_size(10);

    let objects = engine
        .query_objects(Vec::new(), None, CancellationToken::new())
        .collect_all()
        .await
        .unwrap();
    assert_eq!(objects.len(), 25);

    let resolved: Vec<Resolved> = engine
        .resolve_objects(objects, CancellationToken::new())
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(resolved.len(), 25);
    assert!(resolved[..15].iter().all(|r| matches!(r, Resolved::Device(_))));
    assert!(resolved[15..].iter().all(|r| matches!(r, Resolved::Group(_))));

    let device_ids: Vec<u32> = resolved[..15].iter().map(Resolved::id).collect();
    let expected: Vec<u32> = (1..=25).filter(|id| !is_group(*id)).collect();
    assert_eq!(device_ids, expected);

    let transport = engine.transport();
    assert_eq!(transport.page_sizes_for(Content::Devices), vec![10, 5]);
    assert_eq!(transport.page_sizes_for(Content::Groups), vec![10]);
}

// ── Over HTTP ───────────────────────────────────────────────────────

#[tokio::test]
async fn query_and_resolve_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "objects"))
        .and(query_param("sortby", "objid"))
        .and(query_param("apitoken", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prtg-version": "24.1.92.1554",
            "treesize": 2,
            "objects": [
                { "objid": 40, "name": "dc-1", "type": "Device", "type_raw": "device",
                  "basetype": "device", "parentid": 2, "tags": "", "active": true },
                { "objid": 2055, "name": "Ping", "type": "Ping", "type_raw": "ping",
                  "basetype": "sensor", "parentid": 40, "tags": "pingsensor", "active": true }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "devices"))
        .and(query_param("filter_objid", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "treesize": 1,
            "devices": [
                { "objid": 40, "name": "dc-1", "type_raw": "device", "basetype": "device",
                  "parentid": 2, "active": true, "status_raw": 3, "host": "10.0.0.40" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "sensors"))
        .and(query_param("filter_objid", "2055"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "treesize": 1,
            "sensors": [
                { "objid": 2055, "name": "Ping", "type_raw": "ping", "basetype": "sensor",
                  "parentid": 40, "active": true, "status_raw": 5, "message_raw": "Timeout",
                  "device": "dc-1", "lastvalue": "", "interval_raw": 30 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PrtgClient::new(
        &server.uri(),
        Credentials::ApiToken {
            token: "s3cret".to_owned().into(),
        },
        &TransportConfig::default(),
    )
    .unwrap();
    let engine = ObjectEngine::new(client);

    let objects = engine
        .query_objects(Vec::new(), None, CancellationToken::new())
        .collect_all()
        .await
        .unwrap();
    let resolved = engine
        .lifter(CancellationToken::new())
        .lift(objects)
        .await
        .unwrap();

    assert_eq!(resolved.len(), 2);
    match (&resolved[0], &resolved[1]) {
        (Resolved::Device(device), Resolved::Sensor(sensor)) => {
            assert_eq!(device.host.as_deref(), Some("10.0.0.40"));
            assert_eq!(sensor.status, ObjectStatus::Down);
            assert_eq!(sensor.message.as_deref(), Some("Timeout"));
            assert_eq!(sensor.last_value, None);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_reaches_caller_as_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Sorry, your filter is invalid."
        })))
        .mount(&server)
        .await;

    let client = PrtgClient::new(
        &server.uri(),
        Credentials::ApiToken {
            token: "t".to_owned().into(),
        },
        &TransportConfig::default(),
    )
    .unwrap();
    let engine = ObjectEngine::new(client);

    let err = engine
        .query_objects(Vec::new(), None, CancellationToken::new())
        .collect_all()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("filter is invalid"));
}
