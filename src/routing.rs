//! Custom-id based routing for component interactions.
//!
//! UI components (buttons, select menus) are stamped with a custom id when a
//! view is built. The id round-trips through Discord and comes back on the
//! interaction event, where it encodes both a routing key and a hyphen
//! delimited argument list, e.g. `verify_123-456` reaches the handler
//! registered under `verify` with args `["123", "456"]`.
//!
//! The router is generic over the event type so the dispatch path can be
//! exercised without a gateway connection; the live bot instantiates it with
//! [`crate::discord::ComponentContext`].

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use futures::future::BoxFuture;
use miette::Result;
use tracing::error;

/// The two component flavours the router recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Button,
    SelectMenu,
}

/// Event-side seam between the router and the platform client.
///
/// `component_kind` returning `None` means the event is not a component
/// interaction at all; such events are ignored without touching the registry.
/// A custom id is only meaningful when a kind is present.
pub trait InteractionEvent {
    fn component_kind(&self) -> Option<ComponentKind>;
    fn custom_id(&self) -> Option<&str>;
}

/// Callback invoked when a registered key matches an incoming custom id.
#[async_trait]
pub trait InteractionHandler<E>: Send + Sync {
    async fn handle(&self, event: &E, args: &[String]) -> Result<()>;
}

/// Adapter turning a boxed-future closure into an [`InteractionHandler`],
/// for callers that don't want a named handler type.
pub struct HandlerFn<F>(pub F);

#[async_trait]
impl<E, F> InteractionHandler<E> for HandlerFn<F>
where
    E: Sync,
    F: for<'a> Fn(&'a E, &'a [String]) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn handle(&self, event: &E, args: &[String]) -> Result<()> {
        (self.0)(event, args).await
    }
}

/// What became of a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a component interaction; nothing was looked up.
    Ignored,
    /// A component interaction whose custom id matched no registered key.
    Unmatched,
    /// A handler ran to completion.
    Handled,
}

/// Maps registered key strings to handlers and dispatches incoming
/// component interactions to them.
///
/// Keys are matched by substring containment against the custom id. All
/// registration happens before the client starts, so dispatch only ever
/// needs `&self` and no locking is required on the event loop.
pub struct InteractionRouter<E> {
    routes: BTreeMap<String, Arc<dyn InteractionHandler<E>>>,
}

impl<E> Default for InteractionRouter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InteractionRouter<E> {
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Register `handler` under `key`. Re-registering a key replaces the
    /// previous handler.
    pub fn register<H>(&mut self, key: impl Into<String>, handler: H)
    where
        H: InteractionHandler<E> + 'static,
    {
        self.routes.insert(key.into(), Arc::new(handler));
    }

    /// Register a closure without wrapping it in [`HandlerFn`] yourself.
    pub fn register_fn<F>(&mut self, key: impl Into<String>, f: F)
    where
        E: Sync + 'static,
        F: for<'a> Fn(&'a E, &'a [String]) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        self.register(key, HandlerFn(f));
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<E: InteractionEvent + Send + Sync> InteractionRouter<E> {
    /// Route an incoming event to its registered handler.
    ///
    /// Events that are not component interactions are ignored; that is the
    /// normal case for most gateway traffic, not an error. A handler failure
    /// propagates to the caller unmodified.
    pub async fn dispatch(&self, event: &E) -> Result<DispatchOutcome> {
        match event.component_kind() {
            None => Ok(DispatchOutcome::Ignored),
            Some(ComponentKind::Button) => self.on_button_click(event).await,
            Some(ComponentKind::SelectMenu) => self.on_list_change(event).await,
        }
    }

    async fn on_button_click(&self, event: &E) -> Result<DispatchOutcome> {
        self.route(event).await
    }

    /// Select-menu changes currently behave exactly like button presses.
    async fn on_list_change(&self, event: &E) -> Result<DispatchOutcome> {
        self.route(event).await
    }

    async fn route(&self, event: &E) -> Result<DispatchOutcome> {
        let Some(custom_id) = event.custom_id() else {
            return Ok(DispatchOutcome::Ignored);
        };

        // The longest registered key wins when several are substrings of the
        // same id; equal-length ties go to the later key in sort order.
        let matched = self
            .routes
            .iter()
            .filter(|(key, _)| custom_id.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len());

        let Some((key, handler)) = matched else {
            error!("no handler registered for custom id [{custom_id}]");
            return Ok(DispatchOutcome::Unmatched);
        };

        let args = split_args(custom_id, key);
        handler.handle(event, &args).await?;

        Ok(DispatchOutcome::Handled)
    }
}

/// Strip the first occurrence of `{key}_` from the custom id, then split the
/// remainder on `-`. Empty segments are kept, matching a plain split.
fn split_args(custom_id: &str, key: &str) -> Vec<String> {
    let remainder = custom_id.replacen(&format!("{key}_"), "", 1);
    remainder.split('-').map(str::to_string).collect()
}
