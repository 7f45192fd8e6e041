use std::sync::Arc;

use clap::Parser;
use pix_navigator::{
    AppConfig, AuthSignal, InMemoryDom, LoggingLoader, Navigator, NavigatorState,
    telemetry::init_tracing,
};

/// Headless navigation harness: replays a sequence of paths against the
/// navigator and prints what the document shows after each one.
#[derive(Parser, Debug)]
#[command(name = "pix-navigator", version)]
struct Cli {
    /// Resolve the auth state with a signed-in user.
    #[arg(long)]
    signed_in: bool,

    /// Location the application is loaded at.
    #[arg(long, default_value = "/")]
    initial: String,

    /// Paths to navigate to after the initial load, in order.
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Logging
    init_tracing(config.env, "pix_navigator=debug");

    let cli = Cli::parse();
    tracing::info!("Harness starting in {:?} mode", config.env);

    // 3. Auth State (resolved up front for the harness)
    let auth = Arc::new(AuthSignal::new());
    auth.resolve(cli.signed_in);

    // 4. Document
    let dom = Arc::new(InMemoryDom::new());

    // 5. Navigator Assembly
    let navigator = Navigator::new(NavigatorState {
        loader: Arc::new(LoggingLoader),
        auth,
        dom: dom.clone(),
        config,
    })?;

    // 6. Initial Load
    let outcome = navigator.start(&cli.initial).await?;
    report(&cli.initial, &outcome, &dom);

    // 7. Replay
    for path in &cli.paths {
        let outcome = navigator.navigate(path).await?;
        report(path, &outcome, &dom);
    }

    // Let the spawned pre-actions log before the runtime shuts down.
    tokio::task::yield_now().await;
    Ok(())
}

fn report(requested: &str, outcome: &pix_navigator::NavigationOutcome, dom: &InMemoryDom) {
    let snapshot = dom.snapshot();
    let visible: Vec<&str> = snapshot
        .visible_panels()
        .iter()
        .map(|page| page.as_str())
        .collect();
    let active: Vec<&str> = snapshot.active_links.iter().map(String::as_str).collect();

    println!(
        "{requested} -> {} [panel: {}] visible={visible:?} active={active:?}",
        outcome.path, outcome.page
    );
}
