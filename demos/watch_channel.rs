use traq_realtime_rs::{
    EventKind, LifecycleEvent, MessageEventBody, RealtimeClient, RealtimeClientOptions, ViewState,
};

/// Watch one channel on a real traQ instance and print what happens
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing to see logs
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("🦀 Watching a traQ channel\n");

    // Get credentials from environment
    let url = std::env::var("TRAQ_WS_URL").expect("TRAQ_WS_URL must be set in .env");
    let token = std::env::var("TRAQ_TOKEN").ok();
    let channel_id = std::env::var("TRAQ_CHANNEL_ID").ok();

    println!("📡 Connecting to: {}\n", url);

    let client = RealtimeClient::new(
        &url,
        RealtimeClientOptions {
            access_token: token,
            ..Default::default()
        },
    )?;

    let mut lifecycle = client.lifecycle();
    tokio::spawn(async move {
        while let Ok(event) = lifecycle.recv().await {
            match event {
                LifecycleEvent::Opened => println!("🟢 Connected"),
                LifecycleEvent::Reconnected => println!("🟢 Reconnected, commands replayed"),
                LifecycleEvent::Closed => println!("🔴 Connection lost"),
                LifecycleEvent::MessageReceived(_) => {}
            }
        }
    });

    let mut created = client.on(EventKind::MessageCreated);
    tokio::spawn(async move {
        while let Some(event) = created.recv().await {
            match event.parse_body::<MessageEventBody>() {
                Ok(body) => println!("✉️  New message: {}", body.id),
                Err(e) => println!("⚠️  Unexpected body: {}", e),
            }
        }
    });

    // Queued now, sent once the connection opens and again after every reconnect
    client
        .change_view_state(channel_id.as_deref(), ViewState::Monitoring)
        .await?;
    client.connect().await;

    println!("⏳ Press Ctrl+C to stop");
    println!("💡 Interrupt your network to watch the client reconnect\n");
    tokio::signal::ctrl_c().await?;

    client.close().await?;
    println!("\n👋 Closed");

    Ok(())
}
