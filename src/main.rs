use anyhow::{Context, Result};
use checkout_orchestrator::content::SUBMIT_BUTTON_SLOT;
use checkout_orchestrator::{
    ContentNode, HostContent, HttpPrepareHandler, Navigator, PaymentOrchestrator, SubmitOutcome,
    TranslatableText, WidgetConfig,
};
use std::sync::Arc;
use tracing::info;

/// Prints the redirect URL instead of opening it.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn assign(&self, url: &str) {
        println!("{}", url);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    let config = WidgetConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level.directive().parse()?),
        )
        .init();

    let prepare_url = std::env::var("CHECKOUT_PREPARE_URL")
        .context("CHECKOUT_PREPARE_URL must be set")?;

    let content = HostContent::new(vec![ContentNode::element("button")
        .with_slot(SUBMIT_BUTTON_SLOT)
        .with_child(ContentNode::translatable(TranslatableText::new("payment.submit")))]);

    let orchestrator = PaymentOrchestrator::connect(config, content, Arc::new(StdoutNavigator))?;
    orchestrator.set_prepare(Arc::new(HttpPrepareHandler::new(
        reqwest::Client::new(),
        prepare_url,
    )));

    info!("Submitting checkout");
    match orchestrator.submit().await {
        SubmitOutcome::Redirected(_) => {
            info!("Checkout prepared successfully");
            Ok(())
        }
        SubmitOutcome::Failed(errors) => {
            for error in &errors {
                eprintln!("error: {}", error);
            }
            std::process::exit(1);
        }
        SubmitOutcome::Ignored => anyhow::bail!("A submission is already in flight"),
    }
}
