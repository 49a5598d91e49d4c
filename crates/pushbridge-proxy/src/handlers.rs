// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-registered override handlers.
//
// Handlers are asked in registration order. Each may stay silent (`None`),
// defer to the default behaviour, or supply a value. The first handler with
// an opinion wins and later ones are not asked.

use std::sync::{Arc, PoisonError, RwLock};

use pushbridge_core::types::PresentationOptions;
use pushbridge_sdk::PushMessage;

/// A handler's answer when it has an opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override<T> {
    Value(T),
    UseDefault,
}

/// Intercepts deep links before they become `DEEP_LINK_RECEIVED` events.
pub trait DeepLinkHandler: Send + Sync {
    /// `Value(true)` consumes the link, `Value(false)` reports it unhandled.
    fn on_deep_link(&self, deep_link: &str) -> Option<Override<bool>>;
}

/// Decides foreground presentation for a single notification.
pub trait PresentationHandler: Send + Sync {
    fn presentation_options(&self, message: &PushMessage) -> Option<Override<PresentationOptions>>;
}

impl<F> DeepLinkHandler for F
where
    F: Fn(&str) -> Option<Override<bool>> + Send + Sync,
{
    fn on_deep_link(&self, deep_link: &str) -> Option<Override<bool>> {
        self(deep_link)
    }
}

impl<F> PresentationHandler for F
where
    F: Fn(&PushMessage) -> Option<Override<PresentationOptions>> + Send + Sync,
{
    fn presentation_options(&self, message: &PushMessage) -> Option<Override<PresentationOptions>> {
        self(message)
    }
}

#[derive(Default)]
pub struct Handlers {
    deep_link: RwLock<Vec<Arc<dyn DeepLinkHandler>>>,
    presentation: RwLock<Vec<Arc<dyn PresentationHandler>>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_deep_link_handler(&self, handler: Arc<dyn DeepLinkHandler>) {
        self.deep_link
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    pub fn add_presentation_handler(&self, handler: Arc<dyn PresentationHandler>) {
        self.presentation
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    pub fn resolve_deep_link(&self, deep_link: &str) -> Option<Override<bool>> {
        first_opinion(&self.deep_link, |h| h.on_deep_link(deep_link))
    }

    pub fn resolve_presentation(
        &self,
        message: &PushMessage,
    ) -> Option<Override<PresentationOptions>> {
        first_opinion(&self.presentation, |h| h.presentation_options(message))
    }
}

/// Handlers run on a snapshot, outside the lock, so one may register
/// another without deadlocking.
fn first_opinion<H: ?Sized, T>(
    handlers: &RwLock<Vec<Arc<H>>>,
    mut ask: impl FnMut(&H) -> Option<Override<T>>,
) -> Option<Override<T>> {
    let snapshot = handlers
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    snapshot.iter().find_map(|handler| ask(&**handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn no_handlers_means_no_opinion() {
        let handlers = Handlers::new();
        assert_eq!(handlers.resolve_deep_link("app://x"), None);
    }

    #[test]
    fn first_opinion_wins_and_stops_the_walk() {
        let handlers = Handlers::new();
        let asked = Arc::new(AtomicUsize::new(0));

        handlers.add_deep_link_handler(Arc::new(|_: &str| -> Option<Override<bool>> { None }));
        handlers.add_deep_link_handler(Arc::new(|link: &str| {
            link.starts_with("app://").then_some(Override::Value(true))
        }));
        let counter = Arc::clone(&asked);
        handlers.add_deep_link_handler(Arc::new(move |_: &str| -> Option<Override<bool>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Override::UseDefault)
        }));

        assert_eq!(handlers.resolve_deep_link("app://x"), Some(Override::Value(true)));
        assert_eq!(asked.load(Ordering::SeqCst), 0);
        assert_eq!(handlers.resolve_deep_link("https://x"), Some(Override::UseDefault));
        assert_eq!(asked.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn presentation_handler_sees_message() {
        let handlers = Handlers::new();
        handlers.add_presentation_handler(Arc::new(|message: &PushMessage| {
            message
                .extras
                .contains_key("silent")
                .then_some(Override::Value(PresentationOptions(0)))
        }));

        let mut message = PushMessage::default();
        assert_eq!(handlers.resolve_presentation(&message), None);
        message.extras.insert("silent".into(), serde_json::json!(true));
        assert_eq!(
            handlers.resolve_presentation(&message),
            Some(Override::Value(PresentationOptions(0)))
        );
    }
}
