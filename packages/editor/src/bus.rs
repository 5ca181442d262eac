//! # Content-Change Bus
//!
//! Republishes the edited post content to outside listeners.
//!
//! [`ContentNotifier`] sits at the state-subscription boundary: after every
//! state change the host calls [`ContentNotifier::observe`], which emits
//! `post-updated` on the [`EventBus`] only when the content actually changed.
//! The bus keeps the latest payload so late readers can ask for the current
//! content without subscribing.
//!
//! Both are plain owned values; the host decides their lifetime.

use crate::selectors::Selectors;
use crate::state::EditorState;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Event emitted when the edited post content changes
pub const POST_UPDATED: &str = "post-updated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdated {
    pub content: Arc<str>,
}

type Handler = Box<dyn FnMut(&PostUpdated)>;

/// Named-event registry
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<String, Vec<Handler>>,
    latest: Option<PostUpdated>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `name`
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&PostUpdated) + 'static,
    {
        self.handlers.entry(name.into()).or_default().push(Box::new(handler));
    }

    /// Call every handler of `name` in registration order
    pub fn emit(&mut self, name: &str, payload: PostUpdated) {
        if name == POST_UPDATED {
            self.latest = Some(payload.clone());
        }

        let Some(handlers) = self.handlers.get_mut(name) else {
            return;
        };

        debug!(event = name, handlers = handlers.len(), "Emitting event");
        for handler in handlers.iter_mut() {
            handler(&payload);
        }
    }

    /// Content of the last `post-updated` event, empty before the first one
    pub fn latest_content(&self) -> &str {
        self.latest.as_ref().map(|post| &*post.content).unwrap_or("")
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map(Vec::len).unwrap_or(0)
    }

    /// Forget all handlers and the latest payload
    pub fn reset(&mut self) {
        self.handlers.clear();
        self.latest = None;
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();

        f.debug_struct("EventBus")
            .field("handlers", &handlers)
            .field("latest", &self.latest)
            .finish()
    }
}

/// Emits `post-updated` whenever the edited content differs from last time
#[derive(Debug, Default)]
pub struct ContentNotifier {
    last: Option<Arc<str>>,
}

impl ContentNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the state after a change; returns whether an event was emitted
    pub fn observe(&mut self, selectors: &Selectors, state: &EditorState, bus: &mut EventBus) -> bool {
        let content = selectors.get_edited_post_content(state);

        let unchanged = self
            .last
            .as_ref()
            .map(|last| Arc::ptr_eq(last, &content) || **last == *content)
            .unwrap_or(false);
        if unchanged {
            return false;
        }

        self.last = Some(Arc::clone(&content));
        bus.emit(POST_UPDATED, PostUpdated { content });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn payload(content: &str) -> PostUpdated {
        PostUpdated {
            content: Arc::from(content),
        }
    }

    #[test]
    fn test_latest_content_defaults_empty() {
        let bus = EventBus::new();
        assert_eq!(bus.latest_content(), "");
    }

    #[test]
    fn test_emit_calls_handlers_in_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            bus.on(POST_UPDATED, move |post: &PostUpdated| {
                seen.borrow_mut().push(format!("{tag}:{}", post.content));
            });
        }

        bus.emit(POST_UPDATED, payload("hello"));

        assert_eq!(*seen.borrow(), vec!["first:hello", "second:hello"]);
        assert_eq!(bus.latest_content(), "hello");
    }

    #[test]
    fn test_latest_recorded_without_handlers() {
        let mut bus = EventBus::new();
        bus.emit(POST_UPDATED, payload("orphan"));

        assert_eq!(bus.latest_content(), "orphan");
    }

    #[test]
    fn test_other_events_do_not_touch_latest() {
        let mut bus = EventBus::new();
        bus.emit("post-saved", payload("ignored"));

        assert_eq!(bus.latest_content(), "");
    }

    #[test]
    fn test_reset() {
        let mut bus = EventBus::new();
        bus.on(POST_UPDATED, |_: &PostUpdated| {});
        bus.emit(POST_UPDATED, payload("x"));

        bus.reset();
        assert_eq!(bus.handler_count(POST_UPDATED), 0);
        assert_eq!(bus.latest_content(), "");
    }
}
