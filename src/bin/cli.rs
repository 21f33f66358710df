//! mcremote CLI Client
//!
//! Command-line interface for sending raw commands to a server mod.

use clap::{Parser, Subcommand};
use mcremote::{Arg, Config, Minecraft, Parsed, PlayerRef};
use tracing_subscriber::{fmt, EnvFilter};

/// mcremote CLI
#[derive(Parser, Debug)]
#[command(name = "mcremote-cli")]
#[command(about = "CLI for the Minecraft remote-control protocol")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "4711")]
    port: u16,

    /// Read timeout in milliseconds (0 = wait forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a one-way command
    Send {
        /// Command name, e.g. world.setBlock
        name: String,

        /// Arguments (integers, floats, or text)
        args: Vec<String>,
    },

    /// Send a command and print the response line
    Query {
        /// Command name, e.g. world.getBlock
        name: String,

        /// Arguments (integers, floats, or text)
        args: Vec<String>,
    },

    /// Post a chat message
    Chat {
        /// The message to post
        message: String,
    },

    /// Print a player's position
    Pos {
        /// Player id or gamertag (default: the server's default player)
        #[arg(long)]
        player: Option<String>,
    },
}

/// Integer, then float, else text
fn parse_arg(s: &str) -> Arg {
    if let Ok(v) = s.parse::<i64>() {
        Arg::Int(v)
    } else if let Ok(v) = s.parse::<f64>() {
        Arg::Float(v)
    } else {
        Arg::Str(s.to_string())
    }
}

fn run(args: Args) -> mcremote::Result<()> {
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .build();

    let mut mc = Minecraft::connect(&config)?;

    match args.command {
        Commands::Send { name, args } => {
            let args: Vec<Arg> = args.iter().map(|s| parse_arg(s)).collect();
            mc.connection().send(&name, &args)?;
        }
        Commands::Query { name, args } => {
            let args: Vec<Arg> = args.iter().map(|s| parse_arg(s)).collect();
            println!("{}", mc.connection().send_receive(&name, &args)?);
        }
        Commands::Chat { message } => {
            mc.world().post_to_chat(&message)?;
        }
        Commands::Pos { player } => {
            let who = player
                .as_deref()
                .map(PlayerRef::parse)
                .unwrap_or(PlayerRef::Unspecified);
            match mc.player(&who)?.get_pos()? {
                Parsed::Parsed(pos) => println!("{}", pos),
                Parsed::Raw(raw) => println!("{}", raw),
            }
        }
    }

    Ok(())
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mcremote=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("mcremote CLI v{}", mcremote::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
