use anyhow::{Context, Result, bail};
use chrono::{DateTime, TimeDelta, Utc};
use clap::Parser;
use user_guard::services::auth::TokenCodec;
use uuid::Uuid;

/// Mint an HS256 access token for local testing against the API.
///
/// The secret comes from `--secret`, or `JWT_SECRET` (a `.env` file is honoured).
/// Use `--issued-at` to produce tokens that predate a password change, and a negative
/// `--ttl-seconds` to produce an already-expired token.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (user id, UUID)
    #[arg(long)]
    sub: Uuid,

    /// Lifetime in seconds, counted from the issue time
    #[arg(long, default_value_t = 3600, allow_negative_numbers = true)]
    ttl_seconds: i64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    issued_at: Option<i64>,

    /// Shared secret. Falls back to JWT_SECRET.
    #[arg(long)]
    secret: Option<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let secret = match args.secret {
        Some(s) => s,
        None => std::env::var("JWT_SECRET").context("pass --secret or set JWT_SECRET")?,
    };
    if secret.trim().is_empty() {
        bail!("secret must not be empty");
    }

    let issued_at: DateTime<Utc> = match args.issued_at {
        Some(ts) => DateTime::from_timestamp(ts, 0).context("--issued-at out of range")?,
        None => Utc::now(),
    };

    let ttl = TimeDelta::try_seconds(args.ttl_seconds).context("--ttl-seconds out of range")?;
    let expires_at = issued_at
        .checked_add_signed(ttl)
        .context("--ttl-seconds pushes expiry out of range")?;

    let codec = TokenCodec::new(secret.as_bytes(), 0);
    let token = codec
        .sign(args.sub, issued_at, ttl)
        .context("failed to sign token")?;

    if args.quiet {
        println!("{token}");
    } else {
        println!("sub:        {}", args.sub);
        println!("issued_at:  {}", issued_at.to_rfc3339());
        println!("expires_at: {}", expires_at.to_rfc3339());
        println!();
        println!("Authorization: Bearer {token}");
    }

    Ok(())
}
