use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::idl::Idl;
use crate::program::{AssetsVault, Program};
use crate::provider::Provider;
use crate::solana_client::Cluster;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
	pub program_id: Pubkey,
	pub signature: Signature,
}

/// Configure, resolve, call `initialize`, report.
pub async fn run(cfg: &HarnessConfig) -> HarnessResult<RunReport> {
	let provider = Provider::configure(cfg)?;
	let idl = cfg.load_idl()?;
	run_with(&provider, idl, cfg.program_id).await
}

pub async fn run_with<C: Cluster>(provider: &Provider<C>, idl: Idl, expected: Option<Pubkey>) -> HarnessResult<RunReport> {
	let program = Program::resolve(provider, idl, expected).await?;
	let signature = program.initialize().await?;
	info!(%signature, "Your transaction signature");
	Ok(RunReport { program_id: program.id(), signature })
}
