use miette::Result;
use switchboard::{
    config::{self, Config},
    discord::{ComponentContext, run_bot},
    routing::InteractionRouter,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    println!("Starting Switchboard Discord bot");

    // Load environment variables
    config::load_dotenv();

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    println!("Loaded configuration");

    // The bare binary brings the gateway up with an empty routing table;
    // embedding applications register their handlers here before starting.
    let router = InteractionRouter::<ComponentContext>::new();

    if let Err(why) = run_bot(config.discord, router).await {
        eprintln!("Discord bot error: {why:?}");
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all("logs").ok();

    // Create file appender
    let file_appender = tracing_appender::rolling::daily("logs", "discord_bot.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Leak the guard to keep it alive for the entire program
    Box::leak(Box::new(_guard));

    // Set up subscribers
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchboard=debug,serenity=info".into()),
        )
        .with(
            // Console output
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true),
        )
        .with(
            // File output
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_ansi(false),
        )
        .init();
}
