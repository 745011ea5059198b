use anyhow::{Context as _, Result};
use dotenvy::dotenv;
use log::{debug, error, info};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::gateway::Ready;
use serenity::model::guild::Member;
use serenity::prelude::*;
use std::sync::Arc;

use autorole::{apply_join_roles, AutoroleManager, Config, RoleGrantor, RoleId};

/// Grants roles to one member through the Discord HTTP API
struct MemberGrantor {
    http: Arc<Http>,
    guild_id: u64,
    user_id: u64,
}

#[async_trait]
impl RoleGrantor for MemberGrantor {
    async fn grant_role(&self, role_id: RoleId, reason: &str) -> anyhow::Result<()> {
        self.http
            .add_member_role(self.guild_id, self.user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }
}

struct Handler {
    manager: Arc<AutoroleManager>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "✅ {} is connected and serving {} guild(s)",
            ready.user.name,
            ready.guilds.len()
        );
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let guild_id = new_member.guild_id.0;
        let tenant = guild_id.to_string();
        let actor = ctx.cache.current_user().name;

        let grantor = MemberGrantor {
            http: ctx.http.clone(),
            guild_id,
            user_id: new_member.user.id.0,
        };

        let outcome = apply_join_roles(
            &self.manager,
            &tenant,
            new_member.user.bot,
            &actor,
            &grantor,
        )
        .await;

        debug!(
            "Member {} joined guild {}: {} granted, {} failed",
            new_member.user.id.0,
            guild_id,
            outcome.granted.len(),
            outcome.failed.len()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Autorole Discord Bot...");

    let manager = AutoroleManager::from_config(&config).with_context(|| {
        format!(
            "Failed to load autorole data from {}",
            config.data_dir.display()
        )
    })?;
    info!("📄 Autorole data loaded from {}", config.data_dir.display());

    let handler = Handler {
        manager: Arc::new(manager),
    };

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
