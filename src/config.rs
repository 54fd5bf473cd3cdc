// Values come from the KEY=VALUE file named by CONFIG_FILE, then the environment.
use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;

use chrono::NaiveDate;
use chrono_tz::Tz;

pub const DEFAULT_SCHEDULE_SOURCE: &str = "./schedule.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REMINDER_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment; blank values count as unset.
    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    }

    pub fn schedule_source(&self) -> String {
        self.prop("SCHEDULE_SOURCE")
            .unwrap_or_else(|| DEFAULT_SCHEDULE_SOURCE.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let raw = self.prop("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        raw.parse()
            .map_err(|e| format!("Invalid BIND_ADDR '{}': {}", raw, e))
    }

    pub fn reminder_timezone(&self) -> Result<Tz, String> {
        let raw = self
            .prop("REMINDER_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_REMINDER_TIMEZONE.to_string());
        raw.parse::<Tz>()
            .map_err(|e| format!("Invalid REMINDER_TIMEZONE '{}': {}", raw, e))
    }

    pub fn reminder_date(&self) -> Result<Option<NaiveDate>, String> {
        self.prop("REMINDER_DATE")
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| format!("Invalid REMINDER_DATE '{}'. Please use YYYY-MM-DD", raw))
            })
            .transpose()
    }

    pub fn telegram_token(&self) -> Option<String> {
        self.prop("TELEGRAM_BOT_TOKEN")
    }

    pub fn telegram_chat_ids(&self) -> Option<String> {
        self.prop("TELEGRAM_CHAT_IDS")
    }

    pub fn log_level(&self) -> String {
        self.prop("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}
