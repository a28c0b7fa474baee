use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thingspeak_client::ThingSpeakError;
use thingspeak_client::rest::{
    ChannelApi, ChannelClient, ChannelFeed, FeedEntry, FeedRequest, FieldSelector, UpdateRequest,
};
use thingspeak_client::types::Parameters;

fn build_client(server: &MockServer) -> ChannelClient {
    ChannelClient::builder(server.uri())
        .api_key("CHANNELKEY")
        .channel_id(7u32)
        .build()
        .unwrap()
}

fn query_of(request: &wiremock::Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn feed_body() -> &'static str {
    r#"{
        "channel": {
            "id": 7,
            "name": "Greenhouse",
            "field1": "Temperature",
            "field2": "Humidity",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "last_entry_id": 2
        },
        "feeds": [
            {"created_at": "2024-01-02T10:00:00Z", "entry_id": 1, "field1": "21.5", "field2": null},
            {"created_at": "2024-01-02T10:15:00Z", "entry_id": 2, "field1": "22.0", "field2": "40"}
        ]
    }"#
}

#[tokio::test]
async fn test_update_channel_posts_form_with_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .and(body_string_contains("field1=23.5"))
        .and(body_string_contains("api_key=CHANNELKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_string("18"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .update_channel(&Parameters::new().with("field1", "23.5"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "18");
}

#[tokio::test]
async fn test_update_channel_keeps_caller_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(ResponseTemplate::new(200).set_body_string("19"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let params = Parameters::new()
        .with("api_key", "OTHERKEY")
        .with("status", "rebooted");
    client.update_channel(&params).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert_eq!(body, "api_key=OTHERKEY&status=rebooted");
    // the caller's parameters were not modified
    assert_eq!(params.len(), 2);
}

#[tokio::test]
async fn test_update_channel_returns_failure_status_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(ResponseTemplate::new(400).set_body_string("0"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = UpdateRequest::new().field(2, 55).status("too soon");
    let response = client
        .update_channel(&Parameters::from_request(&request).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "0");
}

#[tokio::test]
async fn test_get_channel_feed_normalizes_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds.json"))
        .and(query_param("api_key", "CHANNELKEY"))
        .and(query_param("results", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_body()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let feed = client
        .get_channel_feed(&Parameters::new().with("results", 2))
        .await
        .unwrap();

    assert_eq!(feed["channel"]["name"], "Greenhouse");
    assert_eq!(feed["feeds"][0]["field2"], Value::String("NaN".to_string()));
    assert_eq!(feed["feeds"][1]["field2"], "40");

    let typed = ChannelFeed::from_response(feed).unwrap();
    assert_eq!(typed.feeds.len(), 2);
    assert!(typed.feeds[0].field(2).is_none());
    assert_eq!(typed.feeds[1].field_decimal(1), Some(Decimal::new(220, 1)));
}

#[tokio::test]
async fn test_get_channel_feed_with_typed_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_body()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = FeedRequest::new().days(1).timezone("Europe/London");
    client
        .get_channel_feed(&Parameters::from_request(&request).unwrap())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = query_of(&requests[0]);
    assert_eq!(query.len(), 3);
    assert_eq!(query["days"], "1");
    assert_eq!(query["timezone"], "Europe/London");
    assert_eq!(query["api_key"], "CHANNELKEY");
}

#[tokio::test]
async fn test_get_channel_field_feed_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/fields.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/7/fields/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let params = Parameters::new();
    client.get_channel_field_feed("", &params).await.unwrap();
    client
        .get_channel_field_feed(None::<u8>, &params)
        .await
        .unwrap();
    client.get_channel_field_feed(3u8, &params).await.unwrap();
}

#[tokio::test]
async fn test_get_last_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds/1/last.json"))
        .and(query_param("api_key", "CHANNELKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"created_at": "2024-01-02T10:15:00Z", "entry_id": 2, "field1": "22.0"}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/7/feeds/last.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"created_at": "2024-01-02T10:15:00Z", "entry_id": 2, "field1": "22.0", "field2": null}"#,
        ))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let entry = client
        .get_last_entry(1u8, &Parameters::new())
        .await
        .unwrap();
    assert_eq!(entry["entry_id"], 2);

    let entry = client
        .get_last_entry(FieldSelector::All, &Parameters::new())
        .await
        .unwrap();
    let typed = FeedEntry::from_response(entry).unwrap();
    assert_eq!(typed.entry_id, Some(2));
    assert!(typed.field(2).is_none());
}

#[tokio::test]
async fn test_get_status_update() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"channel": {"name": "Greenhouse", "latitude": "0.0", "longitude": "0.0", "elevation": null, "last_entry_id": 1}, "feeds": [{"created_at": "2024-01-02T10:00:00Z", "entry_id": 1, "status": "door open"}]}"#,
        ))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let status = client.get_status_update(&Parameters::new()).await.unwrap();
    let typed = ChannelFeed::from_response(status).unwrap();
    assert!(typed.channel.id.is_none());
    assert_eq!(typed.channel.last_entry_id, Some(1));
    assert_eq!(typed.feeds[0].status.as_deref(), Some("door open"));
}

#[tokio::test]
async fn test_get_specific_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds/1001.json"))
        .and(query_param("location", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"created_at": "2024-01-02T10:00:00Z", "entry_id": 1001, "latitude": null, "field1": "1"}"#,
        ))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let entry = client
        .get_specific_entry(1001, &Parameters::new().with("location", true))
        .await
        .unwrap();
    assert_eq!(entry["latitude"], "NaN");

    let err = client
        .get_specific_entry("", &Parameters::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ThingSpeakError::InvalidParameters(_)));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("-1"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get_channel_feed(&Parameters::new())
        .await
        .unwrap_err();

    match err {
        ThingSpeakError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "-1");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"channel\": "))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get_status_update(&Parameters::new())
        .await
        .unwrap_err();
    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn test_connection_failure_surfaces() {
    let client = ChannelClient::builder("http://127.0.0.1:1")
        .api_key("KEY")
        .channel_id(7u32)
        .build()
        .unwrap();

    let err = client
        .get_channel_feed(&Parameters::new())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

async fn latest_temperature<C: ChannelApi>(client: &C) -> Option<Decimal> {
    let entry = client
        .get_last_entry(FieldSelector::from(1u8), &Parameters::new())
        .await
        .ok()?;
    FeedEntry::from_response(entry).ok()?.field_decimal(1)
}

#[tokio::test]
async fn test_channel_api_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/7/feeds/1/last.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"created_at": "2024-01-02T10:15:00Z", "entry_id": 2, "field1": "19.25"}"#,
        ))
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert_eq!(latest_temperature(&client).await, Some(Decimal::new(1925, 2)));
}
