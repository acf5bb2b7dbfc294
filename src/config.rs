use std::env;

use anyhow::{anyhow, Context, Result};

use crate::time_range::ReportWindow;

const DEFAULT_TITLE: &str = "Network traffic report";
const DEFAULT_TRAILING_DAYS: u32 = 7;
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// EC2 instance whose network traffic is reported
    pub instance_id: String,
    pub window: ReportWindow,
    pub title: String,
    pub slack_webhook_url: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub telegram: Option<TelegramConfig>,
    pub webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which returns the value of an
    /// environment variable. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let instance_id = get("INSTANCE_ID").context("Expected INSTANCE_ID in environment")?;
        let window = match get("REPORT_WINDOW") {
            Some(window) => parse_window(&window)?,
            None => ReportWindow::TrailingDays(DEFAULT_TRAILING_DAYS),
        };
        let telegram = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_url: get("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
                bot_token,
                chat_id,
            }),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together"
                ))
            }
        };

        Ok(Config {
            instance_id,
            window,
            title: get("REPORT_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            slack_webhook_url: get("SLACK_WEBHOOK_URL"),
            discord_webhook_url: get("DISCORD_WEBHOOK_URL"),
            telegram,
            webhook_url: get("WEBHOOK_URL"),
        })
    }
}

fn parse_window(value: &str) -> Result<ReportWindow> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("month") {
        return Ok(ReportWindow::Month);
    }
    let days: u32 = value
        .parse()
        .with_context(|| format!("REPORT_WINDOW must be `month` or a number of days, got {}", value))?;
    if days == 0 {
        return Err(anyhow!("REPORT_WINDOW must cover at least one day"));
    }
    Ok(ReportWindow::TrailingDays(days))
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, TelegramConfig};
    use crate::time_range::ReportWindow;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("INSTANCE_ID", "i-1234567890abcdef0")]).unwrap();
        assert_eq!(
            config,
            Config {
                instance_id: "i-1234567890abcdef0".to_string(),
                window: ReportWindow::TrailingDays(7),
                title: "Network traffic report".to_string(),
                slack_webhook_url: None,
                discord_webhook_url: None,
                telegram: None,
                webhook_url: None,
            }
        );
    }

    #[test]
    fn test_all_channels() {
        let config = config_from(&[
            ("INSTANCE_ID", "i-1234567890abcdef0"),
            ("REPORT_WINDOW", "Month"),
            ("REPORT_TITLE", "Traffic"),
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T/B/X"),
            ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/x"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("WEBHOOK_URL", "https://example.com/hook"),
        ])
        .unwrap();
        assert_eq!(config.window, ReportWindow::Month);
        assert_eq!(config.title, "Traffic");
        assert_eq!(
            config.telegram,
            Some(TelegramConfig {
                api_url: "https://api.telegram.org".to_string(),
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
            })
        );
        assert_eq!(
            config.webhook_url,
            Some("https://example.com/hook".to_string())
        );
    }

    #[test]
    fn test_trailing_days_window() {
        let config = config_from(&[("INSTANCE_ID", "i-1"), ("REPORT_WINDOW", " 30 ")]).unwrap();
        assert_eq!(config.window, ReportWindow::TrailingDays(30));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("INSTANCE_ID", "i-1"), ("SLACK_WEBHOOK_URL", "  ")]).unwrap();
        assert_eq!(config.slack_webhook_url, None);
    }

    #[test]
    fn test_missing_instance_id() {
        assert!(config_from(&[]).is_err());
    }

    #[test]
    fn test_invalid_window() {
        assert!(config_from(&[("INSTANCE_ID", "i-1"), ("REPORT_WINDOW", "weekly")]).is_err());
        assert!(config_from(&[("INSTANCE_ID", "i-1"), ("REPORT_WINDOW", "0")]).is_err());
    }

    #[test]
    fn test_incomplete_telegram() {
        assert!(config_from(&[("INSTANCE_ID", "i-1"), ("TELEGRAM_BOT_TOKEN", "123:abc")]).is_err());
    }
}
