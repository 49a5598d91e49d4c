// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Durable key-value store backed by SQLite.
//
// Holds the proxy's own state between launches: the take-off config, the
// notification config blob, auto-launch flags, foreground presentation
// options and the last notification status seen. Values are stored as text,
// JSON where structured.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use tracing::{debug, info, instrument};

use pushbridge_core::config::{NotificationConfig, ProxyConfig};
use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::types::{NotificationStatus, PresentationOptions};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
"#;

const KEY_PROXY_CONFIG: &str = "proxy_config";
const KEY_NOTIFICATION_CONFIG: &str = "notification_config";
const KEY_AUTO_LAUNCH_MESSAGE_CENTER: &str = "auto_launch_mc";
const KEY_AUTO_LAUNCH_PREFERENCE_CENTER_PREFIX: &str = "auto_launch_pc:";
const KEY_PRESENTATION_OPTIONS: &str = "foreground_presentation_options";
const KEY_NOTIFICATION_STATUS: &str = "last_notification_status";

/// Process-wide persisted proxy state.
///
/// The connection sits behind a `Mutex` so the store can be shared through
/// `Arc` between proxies and the callback coordinator.
pub struct ProxyStore {
    conn: Mutex<Connection>,
}

impl ProxyStore {
    /// Open (or create) the store at `path` in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| ProxyError::Storage(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| ProxyError::Storage(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| ProxyError::Storage(format!("create table: {e}")))?;

        info!("proxy store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (tests and hosts without a data directory).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ProxyError::Storage(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| ProxyError::Storage(format!("create table: {e}")))?;

        debug!("in-memory proxy store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // -- Raw access ----------------------------------------------------------

    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| ProxyError::Storage(format!("get {key}: {e}")))
    }

    #[instrument(skip(self, value))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| ProxyError::Storage(format!("set {key}: {e}")))?;
        debug!("value stored");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| ProxyError::Storage(format!("remove {key}: {e}")))?;
        Ok(())
    }

    fn get_json(&self, key: &str) -> Result<Option<Value>> {
        self.get(key)?
            .map(|text| serde_json::from_str(&text).map_err(ProxyError::from))
            .transpose()
    }

    fn set_json(&self, key: &str, value: &Value) -> Result<()> {
        self.set(key, &value.to_string())
    }

    fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get(key)?.map_or(default, |v| v == "true"))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }

    // -- Proxy config --------------------------------------------------------

    /// The take-off config, re-decoded on every read.
    pub fn proxy_config(&self) -> Result<Option<ProxyConfig>> {
        self.get_json(KEY_PROXY_CONFIG)?
            .map(|json| ProxyConfig::from_json(&json))
            .transpose()
    }

    pub fn set_proxy_config(&self, config: &ProxyConfig) -> Result<()> {
        self.set_json(KEY_PROXY_CONFIG, &config.to_json()?)
    }

    // -- Notification config -------------------------------------------------

    pub fn notification_config(&self) -> Result<Option<NotificationConfig>> {
        self.get_json(KEY_NOTIFICATION_CONFIG)?
            .map(|json| NotificationConfig::from_json(&json))
            .transpose()
    }

    pub fn set_notification_config(&self, config: &NotificationConfig) -> Result<()> {
        self.set_json(KEY_NOTIFICATION_CONFIG, &config.to_json()?)
    }

    // -- Auto-launch flags ---------------------------------------------------

    /// Whether the SDK shows its own message center UI. Defaults to `true`.
    pub fn auto_launch_message_center(&self) -> Result<bool> {
        self.get_bool(KEY_AUTO_LAUNCH_MESSAGE_CENTER, true)
    }

    pub fn set_auto_launch_message_center(&self, enabled: bool) -> Result<()> {
        self.set_bool(KEY_AUTO_LAUNCH_MESSAGE_CENTER, enabled)
    }

    /// Whether the SDK shows its own UI for this preference center.
    /// Defaults to `true`.
    pub fn auto_launch_preference_center(&self, preference_center_id: &str) -> Result<bool> {
        self.get_bool(&preference_center_key(preference_center_id), true)
    }

    pub fn set_auto_launch_preference_center(
        &self,
        preference_center_id: &str,
        enabled: bool,
    ) -> Result<()> {
        self.set_bool(&preference_center_key(preference_center_id), enabled)
    }

    // -- Foreground presentation ---------------------------------------------

    pub fn foreground_presentation_options(&self) -> Result<Option<PresentationOptions>> {
        self.get(KEY_PRESENTATION_OPTIONS)?
            .map(|text| {
                text.parse::<u32>()
                    .map(PresentationOptions)
                    .map_err(|_| ProxyError::Storage(format!("corrupt presentation options: {text}")))
            })
            .transpose()
    }

    pub fn set_foreground_presentation_options(&self, options: PresentationOptions) -> Result<()> {
        self.set(KEY_PRESENTATION_OPTIONS, &options.0.to_string())
    }

    // -- Notification status -------------------------------------------------

    pub fn last_notification_status(&self) -> Result<Option<NotificationStatus>> {
        self.get_json(KEY_NOTIFICATION_STATUS)?
            .map(|json| NotificationStatus::from_json(&json))
            .transpose()
    }

    pub fn set_last_notification_status(&self, status: &NotificationStatus) -> Result<()> {
        self.set_json(KEY_NOTIFICATION_STATUS, &status.to_json())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn preference_center_key(preference_center_id: &str) -> String {
    format!("{KEY_AUTO_LAUNCH_PREFERENCE_CENTER_PREFIX}{preference_center_id}")
}
