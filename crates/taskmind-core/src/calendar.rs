//! Calendar event boundary.
//!
//! The widget treats the calendar as an opaque event source: today's
//! events in, JSON out. Setting TASKMIND_DISABLE_CALENDAR=1 short-circuits
//! to an empty event list without contacting any service. Token
//! provisioning is out of scope; a pre-issued access token is read from
//! disk.

use chrono::{Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::error::ServiceError;

/// Environment flag that disables all calendar traffic.
pub const DISABLE_ENV: &str = "TASKMIND_DISABLE_CALENDAR";

/// Whether the calendar boundary is disabled for this invocation.
pub fn disabled() -> bool {
    std::env::var(DISABLE_ENV).as_deref() == Ok("1")
}

/// One event as the widget consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    /// Start timestamp, or bare date for all-day events
    pub start: String,
    #[serde(rename = "hangoutLink", skip_serializing_if = "Option::is_none")]
    pub hangout_link: Option<String>,
}

/// Calendar boundary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Access token file; defaults to `~/.cache/taskmind/token.json`
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}
fn default_calendar_id() -> String {
    "primary".to_string()
}
fn default_fetch_timeout() -> u64 {
    10
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            calendar_id: default_calendar_id(),
            token_path: None,
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// Anything that can produce today's events.
pub trait EventSource {
    fn fetch_today(&self) -> Result<Vec<CalendarEvent>, ServiceError>;
}

/// Thin REST client over the Google Calendar events endpoint.
pub struct GoogleCalendarSource {
    config: CalendarConfig,
    runtime: Runtime,
}

impl GoogleCalendarSource {
    pub fn new(config: CalendarConfig) -> Result<Self, ServiceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ServiceError::Runtime(e.to_string()))?;
        Ok(GoogleCalendarSource { config, runtime })
    }

    fn token_path(&self) -> PathBuf {
        self.config.token_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskmind")
                .join("token.json")
        })
    }

    /// Read the pre-provisioned access token: either an OAuth token file
    /// with a `token` field, or the bare token string.
    fn access_token(&self) -> Result<String, ServiceError> {
        let path = self.token_path();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ServiceError::Transport(format!("calendar token unavailable at {}: {e}", path.display()))
        })?;

        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&content) {
            if let Some(token) = parsed.get("token").and_then(|t| t.as_str()) {
                return Ok(token.to_string());
            }
        }
        Ok(content.trim().to_string())
    }

    fn events_url(&self) -> String {
        let today = Utc::now().date_naive();
        let time_min = today.and_time(NaiveTime::MIN).and_utc();
        let time_max = time_min + Duration::days(1);

        let params = [
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("timeMin", time_min.to_rfc3339()),
            ("timeMax", time_max.to_rfc3339()),
        ];
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}/calendars/{}/events?{query}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.config.calendar_id),
        )
    }
}

impl EventSource for GoogleCalendarSource {
    fn fetch_today(&self) -> Result<Vec<CalendarEvent>, ServiceError> {
        if disabled() {
            return Ok(Vec::new());
        }

        let token = self.access_token()?;
        let url = self.events_url();
        let timeout = std::time::Duration::from_secs(self.config.fetch_timeout_secs);
        let timeout_secs = self.config.fetch_timeout_secs;

        let body: serde_json::Value = self.runtime.block_on(async {
            let response = reqwest::Client::new()
                .get(&url)
                .bearer_auth(&token)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        ServiceError::Timeout { timeout_secs }
                    } else {
                        ServiceError::Transport(e.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(ServiceError::Status {
                    status: response.status().as_u16(),
                });
            }

            response
                .json()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))
        })?;

        let events = body["items"]
            .as_array()
            .map(|items| items.iter().map(to_event).collect())
            .unwrap_or_default();
        Ok(events)
    }
}

fn to_event(item: &serde_json::Value) -> CalendarEvent {
    let start = item["start"]["dateTime"]
        .as_str()
        .or_else(|| item["start"]["date"].as_str())
        .unwrap_or_default()
        .to_string();

    CalendarEvent {
        summary: item["summary"].as_str().unwrap_or("(no title)").to_string(),
        start,
        hangout_link: item["hangoutLink"].as_str().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Guards DISABLE_ENV mutation against the fetch tests running in
    // parallel.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn token_file(token: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{token}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn disable_flag_short_circuits_without_network() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(DISABLE_ENV, "1");
        // api_base points nowhere; any network attempt would fail loudly.
        let source = GoogleCalendarSource::new(CalendarConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            ..CalendarConfig::default()
        })
        .unwrap();
        let events = source.fetch_today().unwrap();
        std::env::remove_var(DISABLE_ENV);

        assert!(events.is_empty());
    }

    #[test]
    fn fetches_and_maps_todays_events() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut server = mockito::Server::new();
        let token = token_file(r#"{"token": "tok-123"}"#);
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"^/calendars/primary/events\?.*".to_string()))
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_body(
                r#"{"items": [
                    {"summary": "Standup", "start": {"dateTime": "2024-06-01T09:00:00Z"},
                     "hangoutLink": "https://meet.example/abc"},
                    {"start": {"date": "2024-06-01"}}
                ]}"#,
            )
            .create();

        let source = GoogleCalendarSource::new(CalendarConfig {
            api_base: server.url(),
            token_path: Some(token.path().to_path_buf()),
            ..CalendarConfig::default()
        })
        .unwrap();
        let events = source.fetch_today().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Standup");
        assert_eq!(events[0].start, "2024-06-01T09:00:00Z");
        assert_eq!(events[0].hangout_link.as_deref(), Some("https://meet.example/abc"));
        assert_eq!(events[1].summary, "(no title)");
        assert_eq!(events[1].start, "2024-06-01");
        mock.assert();
    }

    #[test]
    fn bare_token_files_work_too() {
        let token = token_file("raw-token\n");
        let source = GoogleCalendarSource::new(CalendarConfig {
            token_path: Some(token.path().to_path_buf()),
            ..CalendarConfig::default()
        })
        .unwrap();
        assert_eq!(source.access_token().unwrap(), "raw-token");
    }

    #[test]
    fn non_success_status_surfaces_as_service_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut server = mockito::Server::new();
        let token = token_file("tok");
        server
            .mock("GET", mockito::Matcher::Regex(r"^/calendars/.*".to_string()))
            .with_status(401)
            .create();

        let source = GoogleCalendarSource::new(CalendarConfig {
            api_base: server.url(),
            token_path: Some(token.path().to_path_buf()),
            ..CalendarConfig::default()
        })
        .unwrap();
        let err = source.fetch_today().unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 401 }));
    }

    #[test]
    fn event_mapping_serializes_the_widget_shape() {
        let event = CalendarEvent {
            summary: "Standup".to_string(),
            start: "2024-06-01T09:00:00Z".to_string(),
            hangout_link: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["summary"], "Standup");
        assert!(json.get("hangoutLink").is_none());
    }
}
