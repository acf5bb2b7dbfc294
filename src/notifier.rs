use crate::config::Config;
use crate::error::DeliveryError;
use async_trait::async_trait;
use futures::future::join_all;
use log::{info, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared by every channel. A build failure (TLS backend unavailable) is kept
/// and reported by each delivery attempt.
static HTTP_CLIENT: Lazy<Result<Client, String>> = Lazy::new(|| {
    Client::builder()
        .timeout(DELIVERY_TIMEOUT)
        .build()
        .map_err(|error| error.to_string())
});

#[async_trait]
pub trait Notify: Send + Sync {
    fn name(&self) -> &str;
    async fn notify(&self, title: &str, body: &str) -> Result<(), DeliveryError>;
}

async fn post_json(url: &str, payload: &Value) -> Result<(), DeliveryError> {
    let client = HTTP_CLIENT
        .as_ref()
        .map_err(|error| DeliveryError::Client(error.clone()))?;
    let response = client.post(url).json(payload).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DeliveryError::Rejected {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Slack incoming webhook. The table goes into a code block so columns stay
/// aligned.
pub struct SlackWebhook {
    url: String,
}

impl SlackWebhook {
    pub fn new(url: String) -> Self {
        SlackWebhook { url }
    }

    fn payload(&self, title: &str, body: &str) -> Value {
        json!({ "text": format!("*{}*\n```{}```", title, body) })
    }
}

#[async_trait]
impl Notify for SlackWebhook {
    fn name(&self) -> &str {
        "slack"
    }

    async fn notify(&self, title: &str, body: &str) -> Result<(), DeliveryError> {
        post_json(&self.url, &self.payload(title, body)).await
    }
}

pub struct DiscordWebhook {
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: String) -> Self {
        DiscordWebhook { url }
    }

    fn payload(&self, title: &str, body: &str) -> Value {
        json!({ "content": format!("**{}**\n```\n{}\n```", title, body) })
    }
}

#[async_trait]
impl Notify for DiscordWebhook {
    fn name(&self) -> &str {
        "discord"
    }

    async fn notify(&self, title: &str, body: &str) -> Result<(), DeliveryError> {
        post_json(&self.url, &self.payload(title, body)).await
    }
}

pub struct TelegramBot {
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(api_url: String, bot_token: String, chat_id: String) -> Self {
        TelegramBot {
            api_url,
            bot_token,
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// HTML parse mode keeps the table monospaced in a `<pre>` block.
    fn payload(&self, title: &str, body: &str) -> Value {
        json!({
            "chat_id": self.chat_id,
            "text": format!(
                "<b>{}</b>\n<pre>{}</pre>",
                escape_html(title),
                escape_html(body)
            ),
            "parse_mode": "HTML",
            "disable_web_page_preview": true
        })
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl Notify for TelegramBot {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, title: &str, body: &str) -> Result<(), DeliveryError> {
        post_json(&self.send_message_url(), &self.payload(title, body)).await
    }
}

/// Any endpoint accepting `{"title": ..., "body": ...}`.
pub struct JsonWebhook {
    url: String,
}

impl JsonWebhook {
    pub fn new(url: String) -> Self {
        JsonWebhook { url }
    }

    fn payload(&self, title: &str, body: &str) -> Value {
        json!({ "title": title, "body": body })
    }
}

#[async_trait]
impl Notify for JsonWebhook {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, title: &str, body: &str) -> Result<(), DeliveryError> {
        post_json(&self.url, &self.payload(title, body)).await
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct DispatchSummary {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

pub struct Dispatcher {
    channels: Vec<Box<dyn Notify>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn Notify>>) -> Self {
        Dispatcher { channels }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut channels: Vec<Box<dyn Notify>> = Vec::new();
        if let Some(ref url) = config.slack_webhook_url {
            channels.push(Box::new(SlackWebhook::new(url.clone())));
        }
        if let Some(ref url) = config.discord_webhook_url {
            channels.push(Box::new(DiscordWebhook::new(url.clone())));
        }
        if let Some(ref telegram) = config.telegram {
            channels.push(Box::new(TelegramBot::new(
                telegram.api_url.clone(),
                telegram.bot_token.clone(),
                telegram.chat_id.clone(),
            )));
        }
        if let Some(ref url) = config.webhook_url {
            channels.push(Box::new(JsonWebhook::new(url.clone())));
        }
        Dispatcher::new(channels)
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|channel| channel.name()).collect()
    }

    /// Sends to every channel concurrently. A failing channel is logged and
    /// reported in the summary without affecting the others.
    pub async fn dispatch(&self, title: &str, body: &str) -> DispatchSummary {
        let deliveries = self.channels.iter().map(|channel| async move {
            (channel.name(), channel.notify(title, body).await)
        });

        let mut summary = DispatchSummary::default();
        for (name, result) in join_all(deliveries).await {
            match result {
                Ok(()) => {
                    info!("Delivered report to {}", name);
                    summary.delivered.push(name.to_string());
                }
                Err(error) => {
                    warn!("Failed to deliver report to {}: {}", name, error);
                    summary.failed.push(name.to_string());
                }
            }
        }
        summary
    }
}
