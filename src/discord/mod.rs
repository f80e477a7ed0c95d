//! Serenity client wiring: gateway event handling and client construction.

use crate::{
    config::DiscordConfig,
    error::{DiscordError, Result},
    routing::{ComponentKind, InteractionEvent, InteractionRouter},
};
use serenity::{
    all::{ActivityData, ApplicationId, ComponentInteraction, ComponentInteractionDataKind},
    async_trait,
    client::{Context, EventHandler},
    model::{application::Interaction, channel::Message, gateway::Ready, guild::Member},
    prelude::*,
};
use tracing::{error, info};

pub mod helpers;

/// A component interaction paired with the serenity context needed to
/// respond to it. This is the event type handlers receive on the live bot.
pub struct ComponentContext {
    pub ctx: Context,
    pub interaction: ComponentInteraction,
}

impl InteractionEvent for ComponentContext {
    fn component_kind(&self) -> Option<ComponentKind> {
        match self.interaction.data.kind {
            ComponentInteractionDataKind::Button => Some(ComponentKind::Button),
            ComponentInteractionDataKind::StringSelect { .. } => Some(ComponentKind::SelectMenu),
            // Other select flavours carry no handlers in this layer.
            _ => None,
        }
    }

    fn custom_id(&self) -> Option<&str> {
        Some(&self.interaction.data.custom_id)
    }
}

/// Discord event handler that forwards component interactions to the router.
pub struct SwitchboardBot {
    router: InteractionRouter<ComponentContext>,
    config: DiscordConfig,
}

impl SwitchboardBot {
    pub fn new(router: InteractionRouter<ComponentContext>, config: DiscordConfig) -> Self {
        Self { router, config }
    }
}

#[async_trait]
impl EventHandler for SwitchboardBot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let activity = self.config.activity.as_deref().unwrap_or("switchboard");
        ctx.set_activity(Some(ActivityData::competing(activity)));
    }

    async fn message(&self, _ctx: Context, _msg: Message) {
        // Hook point; incoming messages are not acted on.
    }

    async fn guild_member_addition(&self, _ctx: Context, _new_member: Member) {
        // Hook point; member joins are not acted on.
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        // Only component interactions carry a custom id to route on; slash
        // commands, autocompletes and pings pass through untouched.
        let Interaction::Component(component) = interaction else {
            return;
        };

        let event = ComponentContext {
            ctx,
            interaction: component,
        };

        // A handler error surfaces here, at the event-loop boundary.
        if let Err(e) = self.router.dispatch(&event).await {
            error!("component handler failed: {e:?}");
        }
    }
}

/// Create the Discord client (without starting it)
pub async fn create_client(
    config: &DiscordConfig,
    router: InteractionRouter<ComponentContext>,
) -> Result<Client> {
    let handler = SwitchboardBot::new(router, config.clone());

    let mut builder =
        Client::builder(&config.token, GatewayIntents::all()).event_handler(handler);

    if let Some(app_id) = config.application_id {
        builder = builder.application_id(ApplicationId::new(app_id));
    }

    let client = builder
        .await
        .map_err(|source| DiscordError::ConnectionFailed { source })?;

    Ok(client)
}

/// Build the client and run it until the gateway connection ends.
pub async fn run_bot(
    config: DiscordConfig,
    router: InteractionRouter<ComponentContext>,
) -> Result<()> {
    if config.token.is_empty() {
        return Err(DiscordError::NoToken.into());
    }

    let routes = router.len();
    let mut client = create_client(&config, router).await?;

    info!("starting Discord client with {routes} registered component routes");
    client
        .start()
        .await
        .map_err(|source| DiscordError::ConnectionFailed { source })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchboardError;

    #[tokio::test]
    async fn run_bot_refuses_empty_token() {
        let err = run_bot(DiscordConfig::default(), InteractionRouter::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SwitchboardError::Discord(DiscordError::NoToken)
        ));
    }
}
