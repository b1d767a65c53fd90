use std::{env, fs, path::Path};

use crate::{domain::ChannelId, errors::Error, Result};

/// Resolution API used when `RESOLVER_ENDPOINT` is not set.
pub const DEFAULT_RESOLVER_ENDPOINT: &str = "https://teraboxvideodownloader.nepcoderdevs.workers.dev/";

/// Typed configuration, built once at startup and shared as `Arc<Config>`.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Channel whose membership gates access.
    pub channel_id: ChannelId,
    /// Private chat receiving diagnostics and new-member announcements.
    pub admin_chat_id: i64,
    /// Image shown in the join prompt.
    pub image_url: String,
    /// Base URL of the link resolution API.
    pub resolver_endpoint: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let channel_id = ChannelId(required(&lookup, "CHANNEL_ID")?.trim().to_string());

        let admin_raw = required(&lookup, "ADMIN_CHAT_ID")?;
        let admin_chat_id = admin_raw.trim().parse::<i64>().map_err(|_| {
            Error::Config(format!(
                "ADMIN_CHAT_ID must be a numeric chat id, got {admin_raw:?}"
            ))
        })?;

        let image_url = required(&lookup, "IMAGE_URL")?.trim().to_string();

        let resolver_endpoint = lookup("RESOLVER_ENDPOINT")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_RESOLVER_ENDPOINT.to_string());

        Ok(Self {
            telegram_bot_token,
            channel_id,
            admin_chat_id,
            image_url,
            resolver_endpoint,
        })
    }

    /// Public join page of the gating channel.
    pub fn channel_join_url(&self) -> String {
        format!("https://t.me/{}", self.channel_id.public_handle())
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
