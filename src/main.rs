//! CLI entry point for `mailgw`.

use std::process::ExitCode;

use clap::Parser;
use tokio::io::BufReader;

use mailgw_client::render::Theme;
use mailgw_client::{Client, DEFAULT_BASE_URL, app};

/// Create a temporary mail.gw inbox and read it interactively.
#[derive(Parser)]
#[command(name = "mailgw", version, about)]
struct Cli {
    /// API root to talk to
    #[arg(long, env = "MAILGW_API_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    api_url: String,

    /// Route all requests through this proxy (http, https or socks5)
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(log_level(cli.verbose));

    let mut builder = Client::builder().base_url(cli.api_url);
    if let Some(proxy) = cli.proxy {
        builder = builder.proxy(proxy);
    }

    let mut client = match builder.build() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    match app::run(&mut client, &mut input, &mut out, Theme::for_stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "session ended");
            ExitCode::FAILURE
        }
    }
}

/// Default filter for `-v` count; `warn` keeps failure causes visible.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn setup_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
