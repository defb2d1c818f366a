// src/bin/issue_token.rs
use anyhow::Result;
use audit_console::application::{dto::TokenSubject, ports::security::TokenManager};
use audit_console::config::AppConfig;
use audit_console::domain::{scope::EntityId, user::UserId};
use audit_console::infrastructure::security::token::BiscuitTokenManager;
use clap::Parser;

/// Mint a session token for the audit console, signed with the configured
/// root key.
#[derive(Parser)]
#[command(name = "issue_token")]
struct Args {
    /// Numeric user id (`users.rowid`).
    #[arg(long)]
    user_id: i64,
    #[arg(long)]
    login: String,
    #[arg(long, default_value_t = 1)]
    entity: i32,
    #[arg(long)]
    admin: bool,
    /// Third party the user is bound to, for portal accounts.
    #[arg(long)]
    third_party: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_env()?;
    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;

    let issued = manager
        .issue(TokenSubject {
            user_id: UserId::new(args.user_id)?,
            login: args.login,
            admin: args.admin,
            entity: EntityId::new(args.entity)?,
            third_party_id: args.third_party,
        })
        .await?;

    println!("{}", issued.token);
    eprintln!("expires at {} ({}s)", issued.expires_at, issued.expires_in);
    Ok(())
}
