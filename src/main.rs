use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use nowplaying_badge::{
    config::{self, Config},
    error, info,
    now_playing::load_snapshot,
    render::{self, RenderOptions, Size, Theme},
    server, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,

    /// Render a stored snapshot to stdout without contacting Spotify
    Render(RenderArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// JSON file in the shape served by /now-playing.json
    #[clap(long)]
    pub input: PathBuf,

    /// Color theme: dark or light
    #[clap(long, default_value = "dark")]
    pub theme: Theme,

    /// Card size: wide or compact
    #[clap(long, default_value = "wide")]
    pub size: Size,

    /// Replace the "Now Playing" header
    #[clap(long)]
    pub label: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Render(args) => render_file(args).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if config.refresh_token.is_none() {
        warning!(
            "{} is not set; visit {}/login to obtain one",
            config::ENV_REFRESH_TOKEN,
            config.base_url
        );
    }

    info!("Redirect URI: {}", config.redirect_uri());

    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped: {}", e);
    }
}

async fn render_file(args: RenderArgs) {
    let snapshot = match load_snapshot(&args.input).await {
        Ok(snapshot) => snapshot,
        Err(e) => error!("Cannot load snapshot from {}: {}", args.input.display(), e),
    };

    let options = RenderOptions {
        theme: args.theme,
        size: args.size,
        status_label: args.label,
    };

    println!("{}", render::render(&snapshot, &options));
}
