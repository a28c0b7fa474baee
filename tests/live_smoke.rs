use thingspeak_client::rest::{ChannelClient, ChannelFeed, FeedRequest, FieldSelector};
use thingspeak_client::types::Parameters;

fn live_tests_enabled() -> bool {
    std::env::var("THINGSPEAK_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore]
async fn live_public_channel_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    // Channel 9 is ThingSpeak's public demo channel; public reads accept any key.
    let client = ChannelClient::builder("https://api.thingspeak.com")
        .api_key(std::env::var("THINGSPEAK_READ_KEY").unwrap_or_default())
        .channel_id(9u32)
        .build()?;

    let feed = client
        .get_channel_feed(&Parameters::from_request(&FeedRequest::new().results(2))?)
        .await?;
    let feed = ChannelFeed::from_response(feed)?;
    assert_eq!(feed.channel.id, Some(9));

    let _last = client
        .get_last_entry(FieldSelector::All, &Parameters::new())
        .await?;

    Ok(())
}
