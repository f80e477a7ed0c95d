//! Small conveniences over the platform client: outbound messages and
//! guild lookups.

use std::time::Duration;

use serenity::{
    builder::{CreateActionRow, CreateEmbed, CreateMessage},
    client::Context,
    model::{
        channel::{GuildChannel, Message},
        guild::{Guild, Role},
        id::{ChannelId, RoleId},
    },
};
use tracing::{debug, error, warn};

use crate::error::{DiscordError, Result};

/// Appended to every non-empty outbound message. Left empty until the bot
/// needs to sign its replies.
const AUTO_REPLY_SUFFIX: &str = "";

/// Send `message` to `channel_id`, optionally prefixed with a mention line
/// and carrying action rows and embeds.
///
/// serenity has no native `delete_after`, so when a delay is given deletion
/// is scheduled on a spawned task once the send succeeds.
pub async fn send_message(
    ctx: &Context,
    channel_id: ChannelId,
    message: &str,
    mention: Option<&str>,
    components: Option<Vec<CreateActionRow>>,
    embeds: Option<Vec<CreateEmbed>>,
    delete_after: Option<Duration>,
) -> Result<Message> {
    debug!("sending message to channel {channel_id}");

    let mut builder =
        CreateMessage::new().content(compose_content(message, mention, AUTO_REPLY_SUFFIX));
    if let Some(components) = components {
        builder = builder.components(components);
    }
    if let Some(embeds) = embeds {
        builder = builder.embeds(embeds);
    }

    let sent = channel_id
        .send_message(&ctx.http, builder)
        .await
        .map_err(|source| DiscordError::SendFailed {
            channel_id: channel_id.get(),
            source,
        })?;

    if let Some(delay) = delete_after {
        let http = ctx.http.clone();
        let message_id = sent.id;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = channel_id.delete_message(&http, message_id).await {
                warn!("failed to delete scheduled message {message_id}: {e}");
            }
        });
    }

    debug!("message sent to channel {channel_id}");
    Ok(sent)
}

/// Final text is the mention line (when a target is given), then the body,
/// then the auto-reply suffix (only when the body itself is non-empty).
fn compose_content(message: &str, mention: Option<&str>, suffix: &str) -> String {
    let mut content = String::new();
    if let Some(target) = mention.filter(|t| !t.is_empty()) {
        content.push_str(target);
        content.push_str(" \n");
    }
    content.push_str(message);
    if !message.is_empty() {
        content.push_str(suffix);
    }
    content
}

/// Resolve a role from its numeric-ID string.
///
/// Logs at error level and returns `None` when the id does not parse or the
/// guild has no such role; callers must check for the miss.
pub fn get_role<'a>(guild: &'a Guild, role_id: &str) -> Option<&'a Role> {
    let Some(id) = parse_snowflake(role_id) else {
        error!("role id [{role_id}] is not a valid snowflake");
        return None;
    };

    match guild.roles.get(&RoleId::new(id)) {
        Some(role) => Some(role),
        None => {
            error!("role [{role_id}] not found in guild {}", guild.id);
            None
        }
    }
}

/// Resolve a channel from its numeric-ID string.
///
/// Same contract as [`get_role`]: a miss is logged and reported as `None`.
pub fn get_channel<'a>(guild: &'a Guild, channel_id: &str) -> Option<&'a GuildChannel> {
    let Some(id) = parse_snowflake(channel_id) else {
        error!("channel id [{channel_id}] is not a valid snowflake");
        return None;
    };

    match guild.channels.get(&ChannelId::new(id)) {
        Some(channel) => Some(channel),
        None => {
            error!("channel [{channel_id}] not found in guild {}", guild.id);
            None
        }
    }
}

/// Parse a Discord snowflake kept as a string. Zero is not a valid id.
fn parse_snowflake(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn body_alone_passes_through() {
        assert_eq!(compose_content("hello", None, ""), "hello");
    }

    #[test]
    fn mention_becomes_a_prefix_line() {
        assert_eq!(
            compose_content("hello", Some("<@123>"), ""),
            "<@123> \nhello"
        );
    }

    #[test]
    fn empty_mention_target_adds_no_prefix() {
        assert_eq!(compose_content("hello", Some(""), ""), "hello");
    }

    #[test]
    fn suffix_is_skipped_for_empty_bodies() {
        assert_eq!(compose_content("", Some("<@123>"), "-- bot"), "<@123> \n");
        assert_eq!(compose_content("hello", None, "-- bot"), "hello-- bot");
    }

    #[test]
    fn snowflakes_must_be_nonzero_numerics() {
        assert_eq!(parse_snowflake("1163597142497255424"), Some(1163597142497255424));
        assert_eq!(parse_snowflake("0"), None);
        assert_eq!(parse_snowflake("abc"), None);
        assert_eq!(parse_snowflake(""), None);
        assert_eq!(parse_snowflake("-5"), None);
    }
}
