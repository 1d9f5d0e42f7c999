//! Handle to the deployed Assets Vault program and the calls it exposes.

use crate::error::{HarnessError, HarnessResult};
use crate::idl::{Idl, IdlInstruction};
use crate::provider::Provider;
use crate::solana_client::Cluster;
use solana_sdk::{
	instruction::{AccountMeta, Instruction},
	pubkey::Pubkey,
	signature::{Signature, Signer},
	transaction::Transaction,
};
use tracing::debug;

/// Typed view of the remote program's method surface.
#[allow(async_fn_in_trait)]
pub trait AssetsVault {
	/// Zero-argument `initialize`; returns the confirmed transaction signature.
	async fn initialize(&self) -> HarnessResult<Signature>;
}

pub struct Program<'a, C> {
	provider: &'a Provider<C>,
	id: Pubkey,
	idl: Idl,
}

impl<'a, C: Cluster> Program<'a, C> {
	/// Checks the IDL against `expected` and the cluster's copy of the program.
	/// Nothing is sent when this fails.
	pub async fn resolve(provider: &'a Provider<C>, idl: Idl, expected: Option<Pubkey>) -> HarnessResult<Self> {
		let id = idl.program_id()?;
		if let Some(expected) = expected {
			if expected != id {
				return Err(HarnessError::ProgramMismatch { idl: id, expected });
			}
		}
		let account = provider
			.cluster()
			.get_account(&id)
			.await?
			.ok_or(HarnessError::ProgramNotDeployed(id))?;
		if !account.executable {
			return Err(HarnessError::NotExecutable(id));
		}
		debug!(program_id = %id, owner = %account.owner, "program resolved");
		Ok(Self { provider, id, idl })
	}

	pub fn id(&self) -> Pubkey {
		self.id
	}

	pub fn method(&self, name: &str) -> HarnessResult<MethodBuilder<'_, 'a, C>> {
		let instruction = self.idl.instruction(name)?;
		Ok(MethodBuilder { program: self, instruction, accounts: Vec::new(), args: Vec::new() })
	}
}

impl<C: Cluster> AssetsVault for Program<'_, C> {
	async fn initialize(&self) -> HarnessResult<Signature> {
		self.method("initialize")?.rpc().await
	}
}

/// One pending call: the IDL entry plus the accounts and encoded arguments to send.
pub struct MethodBuilder<'p, 'a, C> {
	program: &'p Program<'a, C>,
	instruction: &'p IdlInstruction,
	accounts: Vec<AccountMeta>,
	args: Vec<u8>,
}

impl<C: Cluster> MethodBuilder<'_, '_, C> {
	pub fn accounts(mut self, accounts: Vec<AccountMeta>) -> Self {
		self.accounts = accounts;
		self
	}

	/// Borsh-encoded arguments, appended after the discriminator.
	pub fn args(mut self, args: Vec<u8>) -> Self {
		self.args = args;
		self
	}

	pub fn instruction(&self) -> HarnessResult<Instruction> {
		let expected = self.instruction.account_count();
		if self.accounts.len() != expected {
			return Err(HarnessError::AccountCount {
				name: self.instruction.name.clone(),
				expected,
				actual: self.accounts.len(),
			});
		}
		let mut data = self.instruction.discriminator()?.to_vec();
		data.extend_from_slice(&self.args);
		Ok(Instruction { program_id: self.program.id, accounts: self.accounts.clone(), data })
	}

	/// Signs with the provider payer and submits exactly once.
	pub async fn rpc(self) -> HarnessResult<Signature> {
		let ix = self.instruction()?;
		let provider = self.program.provider;
		let payer = provider.payer();
		let recent_blockhash = provider.cluster().get_latest_blockhash().await?;
		let tx = Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[payer], recent_blockhash);
		debug!(method = %self.instruction.name, program_id = %self.program.id, "sending transaction");
		provider.cluster().send_and_confirm(&tx).await
	}
}
