use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thingspeak_client::rest::{AccountClient, ChannelInfo};

#[tokio::test]
async fn test_list_channels_sends_only_account_key() {
    let server = MockServer::start().await;
    let body = r#"[
        {
            "id": 9,
            "name": "my_house",
            "description": "Netduino Plus connected to sensors around the house",
            "latitude": "40.44",
            "longitude": "-79.996",
            "created_at": "2010-12-13T20:20:06-05:00",
            "elevation": "",
            "last_entry_id": 6062844,
            "public_flag": true,
            "tags": [{"id": 9, "name": "temp"}],
            "api_keys": [{"api_key": "XXXXXXXXXXXXXXXX", "write_flag": true}]
        },
        {
            "id": 10,
            "name": "spare",
            "description": null,
            "last_entry_id": null,
            "public_flag": false,
            "tags": [],
            "api_keys": []
        }
    ]"#;

    Mock::given(method("GET"))
        .and(path("/channels.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = AccountClient::new(server.uri(), "ACCOUNTKEY");
    assert!(client.host().ends_with('/'));

    let channels = client.list_channels().await.unwrap();
    assert_eq!(channels[0]["public_flag"], true);
    assert_eq!(channels[1]["description"], "NaN");
    assert_eq!(channels[1]["last_entry_id"], "NaN");

    let requests = server.received_requests().await.unwrap();
    let query: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(query, vec![("api_key".to_string(), "ACCOUNTKEY".to_string())]);

    let typed = ChannelInfo::list_from_response(channels).unwrap();
    assert_eq!(typed.len(), 2);
    assert_eq!(typed[0].write_key(), Some("XXXXXXXXXXXXXXXX"));
    assert!(typed[0].elevation.is_none());
    assert!(typed[1].description.is_none());
}

#[tokio::test]
async fn test_list_channels_under_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/channels.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AccountClient::builder("ACCOUNTKEY")
        .host(format!("{}/api", server.uri()))
        .build();
    assert_eq!(client.host(), format!("{}/api/", server.uri()));

    let channels = client.list_channels().await.unwrap();
    assert_eq!(channels, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_channels_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"status":"401","error":{}}"#))
        .mount(&server)
        .await;

    let client = AccountClient::new(server.uri(), "WRONG");
    let err = client.list_channels().await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
}
