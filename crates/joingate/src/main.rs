use std::sync::Arc;

use joingate_core::{config::Config, Error};
use joingate_resolver::HttpLinkResolver;

#[tokio::main]
async fn main() -> Result<(), Error> {
    joingate_core::logging::init("joingate")?;

    let cfg = Arc::new(Config::load()?);
    let resolver = Arc::new(HttpLinkResolver::new(&cfg.resolver_endpoint)?);

    tracing::info!("Bot is running...");

    joingate_telegram::router::run_polling(cfg, resolver)
        .await
        .map_err(|e| Error::Messaging(format!("telegram bot failed: {e}")))?;

    Ok(())
}
