use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "User id to embed as the token subject")]
    pub user_id: String,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if args.user_id.trim().is_empty() {
        anyhow::bail!("user id must not be empty");
    }

    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(args.user_id.trim(), hours);
    let token = generate_jwt(&claims, &config.security.jwt_secret)
        .context("failed to sign session token (is JWT_SECRET set?)")?;

    output_success(
        output_format,
        "Session token issued",
        Some(json!({
            "user_id": claims.sub,
            "expires_at": claims.exp,
            "token": token,
        })),
    )
}
