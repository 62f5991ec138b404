//! Print CloudFront signed URLs for object paths.
//!
//! ```text
//! CLOUDFRONT_PRIVATE_SIGN_KEY="$(cat private_key.pem)" \
//! CLOUDFRONT_KEY_PAIR_ID=APKAEXAMPLE \
//! CLOUDFRONT_DOMAIN=d123.example.net \
//!     cfsignurl --days 7 "testfolder/sample file.csv"
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` or else `LOG_LEVEL`.

use anyhow::{Context, Result};
use cfsignurl::config::{
    validate_domain, validate_key_pair_id, DOMAIN_VAR, KEY_PAIR_ID_VAR, PRIVATE_KEY_VAR,
    PROTOCOL_VAR, RETENTION_DAYS_VAR,
};
use cfsignurl::{PrivateKey, Protocol, SignedUrlBuilder};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// PEM encoded RSA private key content
    #[arg(long, env = PRIVATE_KEY_VAR, hide_env_values = true)]
    private_key: String,

    /// Id of the public key registered with the distribution
    #[arg(long, env = KEY_PAIR_ID_VAR)]
    key_pair_id: String,

    /// Distribution domain, without protocol
    #[arg(long, env = DOMAIN_VAR)]
    domain: String,

    #[arg(long, env = PROTOCOL_VAR, default_value = "https")]
    protocol: Protocol,

    /// Days the URLs stay valid
    #[arg(
        long,
        env = RETENTION_DAYS_VAR,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    days: u32,

    /// Absolute expiration in Unix seconds, takes precedence over --days
    #[arg(long)]
    expires: Option<i64>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Object paths to sign
    #[arg(required = true)]
    paths: Vec<String>,
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    validate_domain(&args.domain).context("checking distribution domain")?;
    validate_key_pair_id(&args.key_pair_id).context("checking key pair id")?;
    let private_key =
        PrivateKey::from_pem(&args.private_key).context("parsing CloudFront private key")?;

    for path in &args.paths {
        let mut builder = SignedUrlBuilder::new(&args.domain, path)
            .protocol(args.protocol)
            .retention_days(args.days);
        if let Some(expires) = args.expires {
            builder = builder
                .expiration(expires)
                .context("parsing --expires")?;
        }

        let signed = builder
            .sign(&private_key, &args.key_pair_id)
            .with_context(|| format!("signing {path}"))?;
        println!("{signed}");
    }

    Ok(())
}
