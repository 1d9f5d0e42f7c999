use crate::config::WalletSource;
use crate::error::{HarnessError, HarnessResult};
use base64::Engine;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
	account::Account,
	commitment_config::CommitmentConfig,
	hash::Hash,
	pubkey::Pubkey,
	signature::{read_keypair_file, Keypair, Signature},
	transaction::Transaction,
};
use std::sync::Arc;
use tracing::debug;

/// The remote operations the harness needs from a cluster.
#[allow(async_fn_in_trait)]
pub trait Cluster {
	fn url(&self) -> String;

	/// `Ok(None)` when the account does not exist.
	async fn get_account(&self, pubkey: &Pubkey) -> HarnessResult<Option<Account>>;

	async fn get_latest_blockhash(&self) -> HarnessResult<Hash>;

	/// Submits once and waits for confirmation. Never resubmits.
	async fn send_and_confirm(&self, tx: &Transaction) -> HarnessResult<Signature>;
}

pub struct SolanaClient {
	pub rpc: RpcClient,
}

impl SolanaClient {
	pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
		Self { rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment) }
	}
}

impl Cluster for SolanaClient {
	fn url(&self) -> String {
		self.rpc.url()
	}

	async fn get_account(&self, pubkey: &Pubkey) -> HarnessResult<Option<Account>> {
		let resp = self
			.rpc
			.get_account_with_commitment(pubkey, self.rpc.commitment())
			.await
			.map_err(|e| HarnessError::from_client("get_account failed", e))?;
		debug!(%pubkey, slot = resp.context.slot, found = resp.value.is_some(), "fetched account");
		Ok(resp.value)
	}

	async fn get_latest_blockhash(&self) -> HarnessResult<Hash> {
		self.rpc
			.get_latest_blockhash()
			.await
			.map_err(|e| HarnessError::from_client("blockhash", e))
	}

	async fn send_and_confirm(&self, tx: &Transaction) -> HarnessResult<Signature> {
		self.rpc
			.send_and_confirm_transaction(tx)
			.await
			.map_err(|e| HarnessError::from_client("send_and_confirm_transaction failed", e))
	}
}

pub fn load_keypair(source: &WalletSource) -> HarnessResult<Arc<Keypair>> {
	match source {
		WalletSource::Base64(b64) => {
			let bytes = base64::engine::general_purpose::STANDARD
				.decode(b64.trim())
				.map_err(|e| HarnessError::Config(format!("invalid base64 keypair: {e}")))?;
			let kp = Keypair::from_bytes(&bytes).map_err(|e| HarnessError::Config(format!("invalid keypair bytes: {e}")))?;
			Ok(Arc::new(kp))
		}
		WalletSource::File(path) => {
			let kp = read_keypair_file(path)
				.map_err(|e| HarnessError::Config(format!("failed to read keypair {}: {e}", path.display())))?;
			Ok(Arc::new(kp))
		}
	}
}
