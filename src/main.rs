use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use fastotp_rs::{FastOtpClient, FastOtpConfig, GenerateOtpRequest, TokenType};

const USAGE: &str = "\
Usage:
  fastotp generate [type] [length] [validity] [identifier]
  fastotp validate <identifier> <token>
  fastotp details <otp_id>

  type: numeric, alphanumeric, alpha (default: numeric)
  length: token length (default: 4)
  validity: minutes (default: 5)

Environment:
  FASTOTP_API_KEY       API key (required)
  FASTOTP_BASE_URL      service root (default: https://api.fastotp.co)
  FASTOTP_TIMEOUT_SECS  request timeout, 0 disables (default: 30)";

/// Client settings read from the environment
fn config_from_env() -> Result<FastOtpConfig> {
    let api_key = env::var("FASTOTP_API_KEY").context("FASTOTP_API_KEY is not set")?;
    let mut config = FastOtpConfig::new(api_key);

    if let Ok(base_url) = env::var("FASTOTP_BASE_URL") {
        config = config.base_url(base_url);
    }
    if let Ok(secs) = env::var("FASTOTP_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("Invalid FASTOTP_TIMEOUT_SECS '{secs}'"))?;
        config = config.timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    Ok(config)
}

fn parse_generate(args: &[String]) -> Result<GenerateOtpRequest> {
    let mut request = GenerateOtpRequest::new();
    if let Some(token_type) = args.first() {
        request = request.token_type(token_type.parse::<TokenType>()?);
    }
    if let Some(length) = args.get(1) {
        let length = length
            .parse()
            .with_context(|| format!("Invalid token length '{length}'"))?;
        request = request.token_length(length);
    }
    if let Some(validity) = args.get(2) {
        let validity = validity
            .parse()
            .with_context(|| format!("Invalid validity '{validity}'"))?;
        request = request.validity(validity);
    }
    if let Some(identifier) = args.get(3) {
        request = request.identifier(identifier.as_str());
    }
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastotp=info,fastotp_rs=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    let rest = &args[2..];

    let client = FastOtpClient::with_config(config_from_env()?)?;

    let response = match (command.as_str(), rest) {
        ("generate", rest) if rest.len() <= 4 => {
            let request = parse_generate(rest)?;
            tracing::info!(
                token_type = %request.token_type,
                token_length = request.token_length,
                validity = request.validity,
                "Generating OTP"
            );
            client.generate_otp(&request).await?
        }
        ("validate", [identifier, token]) => client.validate_otp(identifier, token).await?,
        ("details", [otp_id]) => client.get_otp_details(otp_id).await?,
        _ => {
            eprintln!("{USAGE}");
            bail!("Unrecognised command line");
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
