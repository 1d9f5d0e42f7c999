use anyhow::Result;
use assets_vault_harness::{
	config::HarnessConfig,
	harness,
	telemetry::{init_tracing, DEFAULT_DIRECTIVE},
};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env if present
	dotenv().ok();
	init_tracing(DEFAULT_DIRECTIVE);

	let cfg = HarnessConfig::from_env()?;
	harness::run(&cfg).await?;

	Ok(())
}
