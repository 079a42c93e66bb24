//! Terminal front end for InsightInvest analysis requests

mod render;

use clap::Parser;
use insight_client::controller::{RequestController, RequestState};
use insight_client::{AnalysisTransport, ClientConfig, HttpTransport};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(about = "AI equity analysis reports from the InsightInvest backend", long_about = None)]
struct Args {
    /// Ticker symbol to analyze (e.g. NVDA)
    ticker: Option<String>,

    /// Forecast horizon in days (1-30)
    #[arg(short = 'd', long, default_value_t = 7)]
    horizon: u32,

    /// Specific question to ask about the ticker (optional)
    #[arg(short, long)]
    question: Option<String>,

    /// Base URL of the analysis backend (overrides INSIGHT_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Print the view-model as JSON instead of the rendered report
    #[arg(long)]
    json: bool,

    /// Probe backend liveness and exit
    #[arg(long)]
    health: bool,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base) = args.api_base {
        config = config.with_api_base(base);
    }
    let transport = HttpTransport::new(config)?;

    if args.health {
        let alive = transport.health().await.unwrap_or(false);
        println!("backend: {}", if alive { "ok" } else { "unreachable" });
        std::process::exit(i32::from(!alive));
    }

    let Some(ticker) = args.ticker else {
        anyhow::bail!("a ticker symbol is required (e.g. `insight NVDA`)");
    };

    let mut controller = RequestController::new(Box::new(transport));
    controller.set_ticker(&ticker);
    controller.set_horizon_days(args.horizon);
    if let Some(question) = &args.question {
        controller.set_question(question);
    }

    info!(
        ticker = controller.input().ticker(),
        horizon = controller.input().horizon_days(),
        "requesting analysis"
    );

    match controller.submit().await {
        RequestState::Success(view) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(view.as_ref())?);
            } else {
                println!("{}", render::render_view(view));
            }
            Ok(())
        }
        RequestState::Error(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
        RequestState::Idle | RequestState::Loading => {
            unreachable!("submit always resolves to a terminal state")
        }
    }
}
