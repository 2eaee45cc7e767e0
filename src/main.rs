//! CLI for nsqlink
//!
//! Subcommands:
//! - `ping`: connect, handshake and send a `NOP`
//! - `publish`: publish one message per body argument
//! - `subscribe`: subscribe to a topic/channel and announce readiness

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nsqlink::client::{Connection, Session};
use nsqlink::config::{Settings, load_config};
use nsqlink::envelope::Message;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "nsqlink", version, about = "Minimal NSQ V2 protocol client")]
struct Cli {
    /// Server host, overriding the configuration
    #[arg(long, global = true)]
    host: Option<String>,

    /// Server port, overriding the configuration
    #[arg(long, global = true)]
    port: Option<u16>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect and send a NOP
    Ping,
    /// Publish each BODY as a separate message
    Publish {
        #[arg(long)]
        topic: String,
        #[arg(required = true)]
        bodies: Vec<String>,
    },
    /// Subscribe and send RDY
    Subscribe {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        channel: String,
        #[arg(long, default_value_t = 1)]
        ready: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();
    nsqlink::utils::logging::init(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<nsqlink::Error>() {
                Some(rejection) if rejection.is_server_rejection() => {
                    warn!("server rejected command: {}", rejection)
                }
                _ => error!("nsqlink failed: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings: Settings = load_config()?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let mut session = Session::connect(settings)?;
    info!(
        "connected to {}:{}",
        session.settings().server.host,
        session.settings().server.port
    );

    match cli.command {
        Command::Ping => {
            session.noop()?;
            info!("NOP sent");
        }
        Command::Publish { topic, bodies } => {
            let messages: Vec<Message> = bodies
                .into_iter()
                .map(|body| Message::now(body.into_bytes()))
                .collect();
            session.publish_many(&topic, &messages)?;
            info!("published {} message(s) to {}", messages.len(), topic);
        }
        Command::Subscribe {
            topic,
            channel,
            ready,
        } => {
            session.subscribe(&topic, &channel)?;
            session.ready(ready)?;
            info!("subscribed to {}/{} with RDY {}", topic, channel, ready);
        }
    }

    session.close();
    Ok(())
}
