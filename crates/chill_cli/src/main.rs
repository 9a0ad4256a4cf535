use chill_core::{ChillConfig, ToolRegistry};
use chill_expression::ChillComposer;
use chill_limbic::{ActionExecutor, CooldownConfig, HELP_TOOL};
use clap::Parser;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "chill.toml")]
    config: String,

    /// Chance (0-100) that each break raises the boss alert level
    #[arg(long)]
    boss_alertness: Option<u8>,

    /// Seconds between alert level drops (0 disables cooldown)
    #[arg(long)]
    boss_alertness_cooldown: Option<u64>,

    /// Serve the HTTP/WebSocket gateway instead of the terminal loop
    #[arg(long)]
    serve: bool,

    /// Gateway bind host
    #[arg(long, env = "CHILL_GATEWAY_HOST")]
    host: Option<String>,

    /// Gateway bind port
    #[arg(long, env = "CHILL_GATEWAY_PORT")]
    port: Option<u16>,
}

impl Args {
    fn apply(&self, config: &mut ChillConfig) {
        if let Some(v) = self.boss_alertness {
            config.alert.boss_alertness = v;
        }
        if let Some(v) = self.boss_alertness_cooldown {
            config.alert.cooldown_secs = v;
        }
        if let Some(ref h) = self.host {
            config.gateway.host = h.clone();
        }
        if let Some(p) = self.port {
            config.gateway.port = p;
        }
    }
}

/// One line of terminal input.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Quit,
    Status,
    Help,
    Tool(&'a str),
    Empty,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Empty,
        "quit" | "exit" => Command::Quit,
        "status" => Command::Status,
        "help" | HELP_TOOL => Command::Help,
        other => Command::Tool(other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = ChillConfig::load_or_default(&args.config)?;
    args.apply(&mut config);

    let composer = match config.seed {
        Some(seed) => ChillComposer::seeded(seed),
        None => ChillComposer::new(),
    };
    let executor = Arc::new(ActionExecutor::from_config(&config, Arc::new(composer))?);
    info!(
        "Boss alertness {}%, cooldown {}s",
        config.alert.boss_alertness, config.alert.cooldown_secs
    );

    let mut registry = ToolRegistry::new();
    chill_limbic::register_all(&mut registry, &executor);
    let registry = Arc::new(registry);

    let _cooldown = config
        .alert
        .cooldown()
        .map(|interval| executor.spawn_cooldown(CooldownConfig { interval }));

    if args.serve {
        return serve(registry, executor, &config).await;
    }

    repl(registry, executor).await
}

#[cfg(feature = "gateway")]
async fn serve(
    registry: Arc<ToolRegistry>,
    executor: Arc<ActionExecutor>,
    config: &ChillConfig,
) -> anyhow::Result<()> {
    chill_gateway::GatewayServer::new(
        registry,
        executor,
        &config.gateway.host,
        config.gateway.port,
    )
    .serve()
    .await
}

#[cfg(not(feature = "gateway"))]
async fn serve(
    _registry: Arc<ToolRegistry>,
    _executor: Arc<ActionExecutor>,
    _config: &ChillConfig,
) -> anyhow::Result<()> {
    anyhow::bail!("built without the gateway feature")
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

async fn repl(registry: Arc<ToolRegistry>, executor: Arc<ActionExecutor>) -> anyhow::Result<()> {
    println!("{}", executor.help_text().await);
    println!("\nType a tool name to take a break. 'status' shows the mood, 'quit' exits.");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Help => println!("{}", executor.help_text().await),
            Command::Status => {
                let snap = executor.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&snap)?);
            }
            Command::Tool(name) => {
                let outcome = registry.dispatch(name, &Value::Null).await;
                if outcome.is_error {
                    error!("{}", outcome.content);
                    println!("\nAvailable: {}\n", registry.names().join(", "));
                } else {
                    println!("\n{}\n", outcome.content);
                }
            }
        }
        prompt()?;
    }

    info!("Clocking out.");
    Ok(())
}
