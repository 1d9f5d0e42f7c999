use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("IDL error: {0}")]
	Idl(String),
	#[error("Connection error: {0}")]
	Connection(String),
	#[error("Program id mismatch: IDL declares {idl}, expected {expected}")]
	ProgramMismatch { idl: Pubkey, expected: Pubkey },
	#[error("Program {0} is not deployed")]
	ProgramNotDeployed(Pubkey),
	#[error("Account {0} is not an executable program")]
	NotExecutable(Pubkey),
	#[error("Unknown instruction: {0}")]
	UnknownInstruction(String),
	#[error("Instruction {name} expects {expected} accounts, got {actual}")]
	AccountCount { name: String, expected: usize, actual: usize },
	#[error("Solana error: {0}")]
	Solana(String),
}

impl HarnessError {
	/// Maps an RPC client failure, separating transport problems from node-side rejections.
	pub fn from_client(context: &str, e: ClientError) -> Self {
		match e.kind() {
			// the client's cluster version query reports transport failures as request errors
			ClientErrorKind::Reqwest(_)
			| ClientErrorKind::Io(_)
			| ClientErrorKind::RpcError(RpcError::RpcRequestError(_)) => {
				HarnessError::Connection(format!("{context}: {e}"))
			}
			_ => HarnessError::Solana(format!("{context}: {e}")),
		}
	}

	/// True for failures raised while resolving the program handle.
	pub fn is_resolution(&self) -> bool {
		matches!(
			self,
			HarnessError::ProgramMismatch { .. }
				| HarnessError::ProgramNotDeployed(_)
				| HarnessError::NotExecutable(_)
				| HarnessError::UnknownInstruction(_)
				| HarnessError::AccountCount { .. }
		)
	}
}

pub type HarnessResult<T> = Result<T, HarnessError>;
