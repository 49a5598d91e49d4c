// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Composition root.
//
// `PushBridge` owns the one event emitter, the store and the handler
// registry, and wires every capability proxy to the injected SDK. Host
// runtimes construct exactly one and route all bridge calls through it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use pushbridge_core::config::{NotificationConfig, ProxyConfig};
use pushbridge_core::error::Result;
use pushbridge_events::{EventEmitter, EventType};
use pushbridge_sdk::{ResourceResolver, Sdk};

use crate::analytics::AnalyticsProxy;
use crate::channel::ChannelProxy;
use crate::contact::ContactProxy;
use crate::coordinator::EventCoordinator;
use crate::handlers::Handlers;
use crate::live_activity::{LiveActivityProxy, LiveUpdateProxy};
use crate::logging::init_logging;
use crate::message_center::MessageCenterProxy;
use crate::preference_center::PreferenceCenterProxy;
use crate::privacy::PrivacyProxy;
use crate::provider::Provider;
use crate::push::PushProxy;
use crate::resources::{NotificationResources, resolve_notification_config};
use crate::store::ProxyStore;

pub struct PushBridge {
    sdk: Arc<dyn Sdk>,
    store: Arc<ProxyStore>,
    emitter: Arc<EventEmitter>,
    handlers: Arc<Handlers>,
    coordinator: Arc<EventCoordinator>,

    channel: ChannelProxy,
    push: PushProxy,
    contact: ContactProxy,
    analytics: AnalyticsProxy,
    privacy: PrivacyProxy,
    message_center: MessageCenterProxy,
    preference_center: PreferenceCenterProxy,
    live_activities: LiveActivityProxy,
    live_updates: LiveUpdateProxy,
}

impl PushBridge {
    pub fn new(sdk: Arc<dyn Sdk>, store: Arc<ProxyStore>) -> Self {
        let emitter = Arc::new(EventEmitter::new());
        let handlers = Arc::new(Handlers::new());
        let coordinator = Arc::new(EventCoordinator::new(
            Arc::clone(&emitter),
            Arc::clone(&store),
            Arc::clone(&handlers),
        ));

        let s = Arc::clone(&sdk);
        Self {
            channel: ChannelProxy::new(Provider::from_sdk(Arc::clone(&s), |s| Ok(s.channel()))),
            push: PushProxy::new(
                Provider::from_sdk(Arc::clone(&s), |s| Ok(s.push())),
                Arc::clone(&store),
            ),
            contact: ContactProxy::new(Provider::from_sdk(Arc::clone(&s), |s| Ok(s.contact()))),
            analytics: AnalyticsProxy::new(Provider::from_sdk(Arc::clone(&s), |s| {
                Ok(s.analytics())
            })),
            privacy: PrivacyProxy::new(Provider::from_sdk(Arc::clone(&s), |s| Ok(s.privacy()))),
            message_center: MessageCenterProxy::new(
                Provider::from_sdk(Arc::clone(&s), |s| Ok(s.message_center())),
                Arc::clone(&store),
            ),
            preference_center: PreferenceCenterProxy::new(
                Provider::from_sdk(Arc::clone(&s), |s| Ok(s.preference_center())),
                Arc::clone(&store),
            ),
            live_activities: LiveActivityProxy::new(Provider::from_sdk(Arc::clone(&s), |s| {
                s.live_activities()
            })),
            live_updates: LiveUpdateProxy::new(Provider::from_sdk(s, |s| s.live_updates())),
            sdk,
            store,
            emitter,
            handlers,
            coordinator,
        }
    }

    // -- Take off -------------------------------------------------------------

    /// Decode `config`, persist it, and take off with it.
    ///
    /// The config is persisted before the SDK is asked, so a failed take off
    /// can be retried on the next launch with [`take_off_from_store`].
    ///
    /// [`take_off_from_store`]: Self::take_off_from_store
    #[instrument(skip_all)]
    pub fn take_off(&self, config: &Value) -> Result<bool> {
        let config = ProxyConfig::from_json(config)?;
        self.store.set_proxy_config(&config)?;
        self.launch(&config)
    }

    /// Take off with the persisted config. `Ok(false)` when none is stored.
    #[instrument(skip_all)]
    pub fn take_off_from_store(&self) -> Result<bool> {
        match self.store.proxy_config()? {
            Some(config) => self.launch(&config),
            None => {
                info!("no stored config; waiting for take off");
                Ok(false)
            }
        }
    }

    fn launch(&self, config: &ProxyConfig) -> Result<bool> {
        let environment = config.resolve_environment(config.in_production.unwrap_or(false))?;
        init_logging(environment.log_level.unwrap_or_default());

        self.sdk.take_off(config, environment)?;
        if let Some(notification_config) = config.notification_config() {
            self.store.set_notification_config(notification_config)?;
        }

        let flying = self.sdk.is_flying();
        info!(flying, "take off finished");
        Ok(flying)
    }

    pub fn is_flying(&self) -> bool {
        self.sdk.is_flying()
    }

    // -- Notification config --------------------------------------------------

    /// Replace the stored notification config. Takes effect on resolution,
    /// without a new take off.
    pub fn set_notification_config(&self, config: &Value) -> Result<()> {
        let config = NotificationConfig::from_json(config)?;
        self.store.set_notification_config(&config)
    }

    /// Stored notification config with icons and color resolved.
    pub fn notification_resources(
        &self,
        resolver: &dyn ResourceResolver,
    ) -> Result<Option<NotificationResources>> {
        self.store
            .notification_config()?
            .map(|config| resolve_notification_config(&config, resolver))
            .transpose()
    }

    /// Query a fresh status and emit `NOTIFICATION_STATUS_CHANGED` if it
    /// differs from the last one seen.
    pub fn refresh_notification_status(&self) -> Result<bool> {
        let status = self.push.notification_status()?;
        self.coordinator.on_notification_status(status)
    }

    // -- Pending events -------------------------------------------------------

    /// Drain pending events of the named types as `{type, body}` objects.
    pub fn take_pending_events(&self, types: &Value) -> Result<Vec<Value>> {
        let types = EventType::list_from_json(types)?;
        Ok(self
            .emitter
            .take_pending(&types)
            .iter()
            .map(|event| event.to_json())
            .collect())
    }

    pub fn has_pending_events(&self, types: &Value) -> Result<bool> {
        let types = EventType::list_from_json(types)?;
        Ok(self.emitter.has_events(&types))
    }

    /// Hand pending events of the named types to `deliver`; those it accepts
    /// are removed. Delivery happens under the emitter lock and must not
    /// call back into the bridge's event API.
    pub fn process_pending_events<F>(&self, types: &Value, mut deliver: F) -> Result<()>
    where
        F: FnMut(&Value) -> bool,
    {
        let types = EventType::list_from_json(types)?;
        self.emitter
            .process_pending(&types, |event| deliver(&event.to_json()));
        Ok(())
    }

    // -- Accessors ------------------------------------------------------------

    pub fn channel(&self) -> &ChannelProxy {
        &self.channel
    }

    pub fn push(&self) -> &PushProxy {
        &self.push
    }

    pub fn contact(&self) -> &ContactProxy {
        &self.contact
    }

    pub fn analytics(&self) -> &AnalyticsProxy {
        &self.analytics
    }

    pub fn privacy(&self) -> &PrivacyProxy {
        &self.privacy
    }

    pub fn message_center(&self) -> &MessageCenterProxy {
        &self.message_center
    }

    pub fn preference_center(&self) -> &PreferenceCenterProxy {
        &self.preference_center
    }

    pub fn live_activities(&self) -> &LiveActivityProxy {
        &self.live_activities
    }

    pub fn live_updates(&self) -> &LiveUpdateProxy {
        &self.live_updates
    }

    /// Callback intake for the SDK glue.
    pub fn coordinator(&self) -> &Arc<EventCoordinator> {
        &self.coordinator
    }

    pub fn handlers(&self) -> &Arc<Handlers> {
        &self.handlers
    }

    pub fn emitter(&self) -> &Arc<EventEmitter> {
        &self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushbridge_core::ProxyError;
    use pushbridge_sdk::PushMessage;
    use serde_json::json;

    use crate::testing::{FakeSdk, lock, status};

    fn config() -> Value {
        json!({
            "default": {"appKey": "default-key", "appSecret": "s"},
            "production": {"appKey": "prod-key", "appSecret": "s", "logLevel": "error"},
            "inProduction": true,
            "enabledFeatures": ["push"],
            "android": {"notificationConfig": {"icon": "ic_notification", "accentColor": "#FF0000"}}
        })
    }

    fn bridge(sdk: &Arc<FakeSdk>) -> (PushBridge, Arc<ProxyStore>) {
        let store = Arc::new(ProxyStore::open_in_memory().unwrap());
        let s: Arc<dyn Sdk> = sdk.clone();
        (PushBridge::new(s, Arc::clone(&store)), store)
    }

    #[test]
    fn calls_before_take_off_are_not_ready() {
        let sdk = FakeSdk::grounded();
        let (bridge, _) = bridge(&sdk);
        assert!(!bridge.is_flying());
        assert!(matches!(bridge.channel().channel_id(), Err(ProxyError::NotReady)));
        assert!(matches!(bridge.privacy().enabled_features(), Err(ProxyError::NotReady)));
    }

    #[test]
    fn take_off_uses_environment_and_persists() {
        let sdk = FakeSdk::grounded();
        let (bridge, store) = bridge(&sdk);

        assert!(bridge.take_off(&config()).unwrap());
        assert_eq!(*lock(&sdk.take_offs), vec!["prod-key".to_owned()]);
        assert_eq!(bridge.privacy().enabled_features().unwrap(), vec!["push"]);
        assert!(store.proxy_config().unwrap().is_some());
        assert_eq!(
            store.notification_config().unwrap().and_then(|c| c.icon).as_deref(),
            Some("ic_notification")
        );
    }

    #[test]
    fn stored_config_is_reused() {
        let sdk = FakeSdk::grounded();
        let (bridge, store) = bridge(&sdk);
        assert!(!bridge.take_off_from_store().unwrap());

        store
            .set_proxy_config(&ProxyConfig::from_json(&config()).unwrap())
            .unwrap();
        assert!(bridge.take_off_from_store().unwrap());
        assert_eq!(lock(&sdk.take_offs).len(), 1);
    }

    #[test]
    fn take_off_without_credentials_fails() {
        let sdk = FakeSdk::grounded();
        let (bridge, _) = bridge(&sdk);
        let err = bridge
            .take_off(&json!({"production": {"appKey": "k", "appSecret": "s"}}))
            .unwrap_err();
        assert!(matches!(err, ProxyError::Decode { .. }));
        assert!(!bridge.is_flying());
    }

    #[test]
    fn pending_events_drain_as_json() {
        let sdk = FakeSdk::flying();
        let (bridge, _) = bridge(&sdk);
        let coordinator = bridge.coordinator();
        coordinator.on_channel_created("c-1");
        coordinator.on_push_received(&PushMessage {
            alert: Some("hi".into()),
            ..PushMessage::default()
        });

        assert!(bridge.has_pending_events(&json!(["CHANNEL_CREATED"])).unwrap());
        let events = bridge
            .take_pending_events(&json!(["PUSH_RECEIVED", "CHANNEL_CREATED"]))
            .unwrap();
        assert_eq!(events[0]["type"], "PUSH_RECEIVED");
        assert_eq!(events[1], json!({"type": "CHANNEL_CREATED", "body": {"channelId": "c-1"}}));
        assert!(!bridge.emitter().has_any_events());
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let sdk = FakeSdk::flying();
        let (bridge, _) = bridge(&sdk);
        assert!(bridge.take_pending_events(&json!(["NOPE"])).is_err());
    }

    #[test]
    fn process_pending_keeps_rejected_events() {
        let sdk = FakeSdk::flying();
        let (bridge, _) = bridge(&sdk);
        let coordinator = bridge.coordinator();
        coordinator.on_deep_link("app://a");
        coordinator.on_deep_link("app://b");

        let mut seen = Vec::new();
        bridge
            .process_pending_events(&json!(["DEEP_LINK_RECEIVED"]), |event| {
                seen.push(event["body"]["deepLink"].clone());
                event["body"]["deepLink"] == "app://a"
            })
            .unwrap();
        assert_eq!(seen, vec![json!("app://a"), json!("app://b")]);
        assert_eq!(bridge.emitter().pending_count(EventType::DeepLinkReceived), 1);
    }

    #[test]
    fn status_refresh_emits_on_change_only() {
        let sdk = FakeSdk::flying();
        let (bridge, _) = bridge(&sdk);
        assert!(bridge.refresh_notification_status().unwrap());
        assert!(!bridge.refresh_notification_status().unwrap());
        *lock(&sdk.push.status) = status(true);
        assert!(bridge.refresh_notification_status().unwrap());
    }

    #[test]
    fn notification_config_can_be_replaced() {
        let sdk = FakeSdk::flying();
        let (bridge, store) = bridge(&sdk);
        bridge
            .set_notification_config(&json!({"defaultChannelId": "alerts"}))
            .unwrap();
        assert_eq!(
            store.notification_config().unwrap().and_then(|c| c.default_channel_id).as_deref(),
            Some("alerts")
        );
    }
}
