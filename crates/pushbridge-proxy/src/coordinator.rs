// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native callback intake.
//
// The SDK reports what happened through the `on_*` methods below. Each one
// reduces the native objects to an event body and stores it in the shared
// emitter, applying whatever proxy-side policy decides whether an event is
// produced at all (auto-launch flags, deep link handlers, status dedup).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use pushbridge_core::error::{ProxyError, Result};
use pushbridge_core::live_activity::LiveActivityInfo;
use pushbridge_core::types::{AuthorizedSetting, InboxCounts, NotificationStatus, PresentationOptions};
use pushbridge_events::{EventEmitter, model};
use pushbridge_sdk::{NotificationResponse, PushMessage};

use crate::handlers::{Handlers, Override};
use crate::store::ProxyStore;

/// How long a foreground notification waits for the host to answer an
/// `OVERRIDE_PRESENTATION_OPTIONS` event before the stored default applies.
pub const PRESENTATION_OVERRIDE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct EventCoordinator {
    emitter: Arc<EventEmitter>,
    store: Arc<ProxyStore>,
    handlers: Arc<Handlers>,
    host_presentation_override: AtomicBool,
    presentation_requests: PresentationRequests,
    presentation_timeout: Duration,
    /// Held across the compare and write of the last notification status.
    status_lock: Mutex<()>,
}

type PresentationRequests = Mutex<HashMap<String, oneshot::Sender<Option<PresentationOptions>>>>;

/// Removes a pending presentation request when the waiter finishes or is
/// dropped.
struct PendingRequest<'a> {
    requests: &'a PresentationRequests,
    id: String,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl EventCoordinator {
    pub fn new(emitter: Arc<EventEmitter>, store: Arc<ProxyStore>, handlers: Arc<Handlers>) -> Self {
        Self::with_presentation_timeout(emitter, store, handlers, PRESENTATION_OVERRIDE_TIMEOUT)
    }

    pub fn with_presentation_timeout(
        emitter: Arc<EventEmitter>,
        store: Arc<ProxyStore>,
        handlers: Arc<Handlers>,
        presentation_timeout: Duration,
    ) -> Self {
        Self {
            emitter,
            store,
            handlers,
            host_presentation_override: AtomicBool::new(false),
            presentation_requests: Mutex::new(HashMap::new()),
            presentation_timeout,
            status_lock: Mutex::new(()),
        }
    }

    pub fn emitter(&self) -> &Arc<EventEmitter> {
        &self.emitter
    }

    // -- Channel / push ------------------------------------------------------

    pub fn on_channel_created(&self, channel_id: &str) {
        info!(channel_id, "channel created");
        self.emitter.add(model::channel_created(channel_id));
    }

    pub fn on_push_token_received(&self, push_token: &str) {
        debug!("push token received");
        self.emitter.add(model::push_token_received(push_token));
    }

    pub fn on_push_received(&self, message: &PushMessage) {
        self.emitter.add(model::push_received(message));
    }

    pub fn on_notification_response(&self, response: &NotificationResponse) {
        debug!(
            action_id = response.action_id(),
            foreground = response.is_foreground(),
            "notification response"
        );
        self.emitter.add(model::notification_response(response));
    }

    /// Returns whether the link was handled, by a handler or by the host.
    #[instrument(skip(self))]
    pub fn on_deep_link(&self, deep_link: &str) -> bool {
        match self.handlers.resolve_deep_link(deep_link) {
            Some(Override::Value(handled)) => {
                debug!(handled, "deep link resolved by handler");
                handled
            }
            Some(Override::UseDefault) | None => {
                self.emitter.add(model::deep_link_received(deep_link));
                true
            }
        }
    }

    /// Emit `NOTIFICATION_STATUS_CHANGED` only when `status` differs from the
    /// last persisted one. Returns whether an event was produced.
    #[instrument(skip_all)]
    pub fn on_notification_status(&self, status: NotificationStatus) -> Result<bool> {
        let _guard = self
            .status_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.store.last_notification_status()? == Some(status) {
            return Ok(false);
        }
        self.store.set_last_notification_status(&status)?;
        self.emitter.add(model::notification_status_changed(&status));
        info!(opted_in = status.is_opted_in, "notification status changed");
        Ok(true)
    }

    pub fn on_authorized_settings_changed(&self, settings: &[AuthorizedSetting]) {
        self.emitter.add(model::authorized_settings_changed(settings));
    }

    // -- Message / preference center -----------------------------------------

    pub fn on_message_center_updated(&self, counts: InboxCounts) {
        self.emitter.add(model::message_center_updated(counts));
    }

    /// `true` when the host takes over display. With auto-launch on, the
    /// SDK shows its own UI and no event is produced.
    pub fn on_display_message_center(&self, message_id: Option<&str>) -> Result<bool> {
        if self.store.auto_launch_message_center()? {
            return Ok(false);
        }
        self.emitter.add(model::display_message_center(message_id));
        Ok(true)
    }

    pub fn on_display_preference_center(&self, preference_center_id: &str) -> Result<bool> {
        if self.store.auto_launch_preference_center(preference_center_id)? {
            return Ok(false);
        }
        self.emitter
            .add(model::display_preference_center(preference_center_id));
        Ok(true)
    }

    // -- Embedded / live activities ------------------------------------------

    pub fn on_pending_embedded_updated(&self, embedded_ids: &[String]) {
        self.emitter.add(model::pending_embedded_updated(embedded_ids));
    }

    pub fn on_live_activities_updated(&self, activities: &[LiveActivityInfo]) {
        self.emitter.add(model::live_activities_updated(activities));
    }

    // -- Foreground presentation ---------------------------------------------

    /// Route foreground presentation decisions through the host runtime.
    pub fn set_host_presentation_override(&self, enabled: bool) {
        self.host_presentation_override
            .store(enabled, Ordering::SeqCst);
    }

    /// Presentation for a notification arriving in the foreground.
    ///
    /// Registered handlers are asked first. Without an answer, and with the
    /// host override enabled, the host is asked through an
    /// `OVERRIDE_PRESENTATION_OPTIONS` event and the call waits for
    /// [`complete_presentation_request`](Self::complete_presentation_request).
    /// Every other path falls back to the stored default.
    #[instrument(skip_all)]
    pub async fn foreground_presentation(&self, message: &PushMessage) -> Result<PresentationOptions> {
        match self.handlers.resolve_presentation(message) {
            Some(Override::Value(options)) => return Ok(options),
            Some(Override::UseDefault) => return self.default_presentation(),
            None => {}
        }

        if !self.host_presentation_override.load(Ordering::SeqCst) {
            return self.default_presentation();
        }

        let request_id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.requests().insert(request_id.clone(), tx);
        let pending = PendingRequest {
            requests: &self.presentation_requests,
            id: request_id,
        };
        self.emitter
            .add(model::override_presentation_options(message, &pending.id));

        let answer = tokio::time::timeout(self.presentation_timeout, rx).await;
        match answer {
            Ok(Ok(Some(options))) => Ok(options),
            Ok(Ok(None)) => self.default_presentation(),
            Ok(Err(_)) | Err(_) => {
                warn!(request_id = %pending.id, "no presentation answer from host, using default");
                self.default_presentation()
            }
        }
    }

    /// Answer a pending presentation request. `options` is a list of option
    /// names, or `null` for the stored default.
    pub fn complete_presentation_request(&self, request_id: &str, options: &Value) -> Result<()> {
        let options = match options {
            Value::Null => None,
            names => Some(PresentationOptions::from_names(names)?),
        };
        let tx = self
            .requests()
            .remove(request_id)
            .ok_or_else(|| ProxyError::not_found("presentation request", request_id))?;
        // The waiter may have timed out in the meantime.
        let _ = tx.send(options);
        Ok(())
    }

    fn default_presentation(&self) -> Result<PresentationOptions> {
        Ok(self
            .store
            .foreground_presentation_options()?
            .unwrap_or_default())
    }

    fn requests(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, oneshot::Sender<Option<PresentationOptions>>>> {
        self.presentation_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
