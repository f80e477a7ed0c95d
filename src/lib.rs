//! Switchboard - a thin Discord integration layer.
//!
//! This crate wires a serenity client to a custom-id interaction router:
//! UI components (buttons, select menus) are stamped with a custom id when
//! a view is built, and the router maps each incoming component interaction
//! back to a registered handler, passing along arguments encoded in the id.
//! Everything hard (gateway, reconnection, rate limiting) stays inside
//! serenity.

pub mod config;
pub mod discord;
pub mod error;
pub mod routing;

pub use config::{Config, DiscordConfig};
pub use discord::{ComponentContext, SwitchboardBot, create_client, run_bot};
pub use error::{ConfigError, DiscordError, Result, SwitchboardError};
pub use routing::{
    ComponentKind, DispatchOutcome, HandlerFn, InteractionEvent, InteractionHandler,
    InteractionRouter,
};

// Re-export serenity so embedding applications build their views against the
// same version the client runs on.
pub use serenity;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ComponentContext, ComponentKind, Config, DiscordConfig, DiscordError, DispatchOutcome,
        HandlerFn, InteractionEvent, InteractionHandler, InteractionRouter, Result,
        SwitchboardBot, SwitchboardError, create_client, run_bot,
    };
}
