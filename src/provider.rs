use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::solana_client::{load_keypair, Cluster, SolanaClient};
use solana_sdk::{
	pubkey::Pubkey,
	signature::{Keypair, Signer},
};
use std::sync::Arc;
use tracing::debug;

/// Connection context: a cluster plus the identity that pays for and signs transactions.
pub struct Provider<C> {
	cluster: C,
	payer: Arc<Keypair>,
}

impl Provider<SolanaClient> {
	/// Loads the wallet and builds the RPC client. Performs no network I/O.
	pub fn configure(cfg: &HarnessConfig) -> HarnessResult<Self> {
		let payer = load_keypair(&cfg.wallet)?;
		let cluster = SolanaClient::new(cfg.cluster.url(), cfg.commitment);
		debug!(url = %cluster.url(), payer = %payer.pubkey(), "provider configured");
		Ok(Self::new(cluster, payer))
	}
}

impl<C: Cluster> Provider<C> {
	pub fn new(cluster: C, payer: Arc<Keypair>) -> Self {
		Self { cluster, payer }
	}

	pub fn cluster(&self) -> &C {
		&self.cluster
	}

	pub fn payer(&self) -> &Keypair {
		&self.payer
	}

	pub fn payer_pubkey(&self) -> Pubkey {
		self.payer.pubkey()
	}
}
