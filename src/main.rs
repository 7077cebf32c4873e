use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;
use zeppelin::{AirshipClient, AirshipClientBuilder, Body, Credentials, ReqwestTransport};

/// Talk to the Urban Airship push notification API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Application key
    #[arg(short = 'k', long, env = "AIRSHIP_APPLICATION_KEY")]
    application_key: String,

    /// Application master secret
    #[arg(short = 's', long, env = "AIRSHIP_MASTER_SECRET", hide_env_values = true)]
    master_secret: String,

    /// API host
    #[arg(long, env = "AIRSHIP_BASE_URL", default_value = zeppelin::API_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Push a message, given as a JSON payload
    Push { payload: String },
    /// Push several messages in one request
    BatchPush {
        #[arg(required = true)]
        payloads: Vec<String>,
    },
    /// Broadcast a message to all devices
    Broadcast { payload: String },
    /// List device tokens that became inactive since the given time (RFC 3339)
    Feedback { since: DateTime<Utc> },
    /// Register a device token
    RegisterDevice {
        device_token: String,
        #[arg(long)]
        payload: Option<String>,
    },
    /// Show a device token
    Device { device_token: String },
    /// Delete a device token
    DeleteDevice { device_token: String },
    /// List a page of device tokens
    Devices {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Register an APID
    RegisterApid {
        apid: String,
        #[arg(long)]
        payload: Option<String>,
    },
    /// Show an APID
    Apid { apid: String },
    /// Delete an APID
    DeleteApid { apid: String },
    /// List a page of APIDs
    Apids {
        #[arg(long)]
        page: Option<u32>,
    },
    /// List all tags
    Tags,
    /// Create a tag
    AddTag { name: String },
    /// Remove a tag
    RemoveTag { name: String },
    /// Add or remove device tokens on a tag
    ModifyTag { name: String, payload: String },
    /// List the tags of a device
    DeviceTags { device_token: String },
    /// Add a tag to a device
    TagDevice { device_token: String, tag: String },
    /// Remove a tag from a device
    UntagDevice { device_token: String, tag: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let client = AirshipClientBuilder::new(Credentials::new(args.application_key, args.master_secret))
        .base_url(args.base_url)
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    match run(&client, args.command).await? {
        Some(Body::Json(value)) => println!("{}", serde_json::to_string_pretty(&value)?),
        Some(Body::Raw(bytes)) => println!("{}", String::from_utf8_lossy(&bytes)),
        None => log::info!("Request successful."),
    }
    Ok(())
}

async fn run(client: &AirshipClient<ReqwestTransport>, command: Command) -> anyhow::Result<Option<Body>> {
    let body = match command {
        Command::Push { payload } => client.push(&parse(&payload)?).await.map(|_| None)?,
        Command::BatchPush { payloads } => {
            let payloads = payloads.iter().map(|p| parse(p)).collect::<anyhow::Result<Vec<_>>>()?;
            client.batch_push(&payloads).await.map(|_| None)?
        }
        Command::Broadcast { payload } => client.broadcast(&parse(&payload)?).await.map(|_| None)?,
        Command::Feedback { since } => client.feedback(since).await?,
        Command::RegisterDevice { device_token, payload } => {
            let payload = payload.as_deref().map(parse).transpose()?;
            client.register_device_token(&device_token, payload.as_ref()).await.map(|_| None)?
        }
        Command::Device { device_token } => client.device_token(&device_token).await?,
        Command::DeleteDevice { device_token } => client.delete_device_token(&device_token).await.map(|_| None)?,
        Command::Devices { page } => client.device_tokens(page).await?,
        Command::RegisterApid { apid, payload } => {
            let payload = payload.as_deref().map(parse).transpose()?;
            client.register_apid(&apid, payload.as_ref()).await.map(|_| None)?
        }
        Command::Apid { apid } => client.apid(&apid).await?,
        Command::DeleteApid { apid } => client.delete_apid(&apid).await.map(|_| None)?,
        Command::Apids { page } => client.apids(page).await?,
        Command::Tags => client.tags().await?,
        Command::AddTag { name } => client.add_tag(&name).await.map(|_| None)?,
        Command::RemoveTag { name } => client.remove_tag(&name).await.map(|_| None)?,
        Command::ModifyTag { name, payload } => client
            .modify_device_tokens_on_tag(&name, &parse(&payload)?)
            .await
            .map(|_| None)?,
        Command::DeviceTags { device_token } => client.device_tags(&device_token).await?,
        Command::TagDevice { device_token, tag } => client.add_tag_to_device(&device_token, &tag).await.map(|_| None)?,
        Command::UntagDevice { device_token, tag } => {
            client.remove_tag_from_device(&device_token, &tag).await.map(|_| None)?
        }
    };
    Ok(body)
}

fn parse(payload: &str) -> anyhow::Result<Value> {
    serde_json::from_str(payload).with_context(|| format!("Payload is not valid JSON: '{payload}'"))
}
