//! Command-line probe for the Twitch SDK.
//!
//! Looks up the users named on the command line and prints their live
//! streams. When `TWITCH_CHAT_*` variables are set it also joins chat and
//! prints raw lines until Ctrl-C.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use twitch_sdk::{ChatConfig, ClientConfig, TwitchClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let logins: Vec<String> = std::env::args().skip(1).collect();
    if logins.is_empty() {
        anyhow::bail!("usage: twitch-probe <login-or-id>...");
    }

    let config = ClientConfig::from_env().context("loading client config")?;
    let client = TwitchClient::new(config)?;
    client.start().await.context("acquiring app token")?;

    let result = run(&client, &logins).await;
    client.close().await;
    result
}

async fn run(client: &TwitchClient, logins: &[String]) -> anyhow::Result<()> {
    for user in client.get_users(logins).await? {
        println!(
            "{} ({}) {:?} joined {}",
            user.display_name(),
            user.username(),
            user.broadcaster_type(),
            user.created_at().date_naive()
        );
    }

    for mut stream in client.get_streams(logins).await? {
        let game = stream
            .fetch_game(client)
            .await?
            .map(|game| game.name().to_string())
            .unwrap_or_default();
        println!(
            "{}: \"{}\" playing {game} for {} viewers",
            stream.broadcaster_login(),
            stream.title(),
            stream.viewer_count()
        );
    }

    let Ok(chat_config) = ChatConfig::from_env() else {
        tracing::debug!("Chat not configured, skipping");
        return Ok(());
    };

    let mut chat = client.connect_chat(&chat_config).await?;
    tracing::info!(channel = chat.channel(), "Reading chat, Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = chat.next_line() => match line {
                Some(line) => println!("{line}"),
                None => break,
            },
        }
    }
    chat.close().await;
    Ok(())
}
