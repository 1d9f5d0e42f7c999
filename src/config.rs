use crate::error::{HarnessError, HarnessResult};
use crate::idl::Idl;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_PROVIDER_URL: &str = "ANCHOR_PROVIDER_URL";
pub const ENV_WALLET: &str = "ANCHOR_WALLET";
pub const ENV_WALLET_BASE64: &str = "ANCHOR_WALLET_BASE64";
pub const ENV_COMMITMENT: &str = "ANCHOR_COMMITMENT";
pub const ENV_PROGRAM_ID: &str = "ASSETS_VAULT_PROGRAM_ID";
pub const ENV_IDL: &str = "ASSETS_VAULT_IDL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClusterEndpoint {
	Localnet,
	Devnet,
	Testnet,
	Mainnet,
	Custom(String),
}

impl ClusterEndpoint {
	pub fn url(&self) -> &str {
		match self {
			ClusterEndpoint::Localnet => "http://127.0.0.1:8899",
			ClusterEndpoint::Devnet => "https://api.devnet.solana.com",
			ClusterEndpoint::Testnet => "https://api.testnet.solana.com",
			ClusterEndpoint::Mainnet => "https://api.mainnet-beta.solana.com",
			ClusterEndpoint::Custom(url) => url,
		}
	}
}

impl FromStr for ClusterEndpoint {
	type Err = HarnessError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lower = s.trim().to_ascii_lowercase();
		match lower.as_str() {
			"l" | "localnet" | "localhost" => Ok(ClusterEndpoint::Localnet),
			"d" | "devnet" => Ok(ClusterEndpoint::Devnet),
			"t" | "testnet" => Ok(ClusterEndpoint::Testnet),
			"m" | "mainnet" | "mainnet-beta" => Ok(ClusterEndpoint::Mainnet),
			_ if lower.starts_with("http://") || lower.starts_with("https://") => {
				Ok(ClusterEndpoint::Custom(s.trim().to_string()))
			}
			_ => Err(HarnessError::Config(format!("unrecognized cluster: {s}"))),
		}
	}
}

/// Where the signing identity comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletSource {
	File(PathBuf),
	/// Base64 of the 64 raw keypair bytes.
	Base64(String),
}

#[derive(Clone, Debug)]
pub struct HarnessConfig {
	pub cluster: ClusterEndpoint,
	pub wallet: WalletSource,
	pub commitment: CommitmentConfig,
	/// Deployed program id the IDL must agree with; `None` trusts the IDL address.
	pub program_id: Option<Pubkey>,
	/// IDL file to resolve the program from; `None` uses the bundled one.
	pub idl_path: Option<PathBuf>,
}

impl HarnessConfig {
	pub fn new(cluster: ClusterEndpoint, wallet: WalletSource) -> Self {
		Self {
			cluster,
			wallet,
			commitment: CommitmentConfig::processed(),
			program_id: None,
			idl_path: None,
		}
	}

	pub fn from_env() -> HarnessResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> HarnessResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

		let cluster = var(ENV_PROVIDER_URL)
			.ok_or_else(|| HarnessError::Config(format!("{ENV_PROVIDER_URL} is not set")))?
			.parse::<ClusterEndpoint>()?;
		let wallet = match (var(ENV_WALLET_BASE64), var(ENV_WALLET)) {
			(Some(b64), _) => WalletSource::Base64(b64),
			(None, Some(path)) => WalletSource::File(PathBuf::from(path)),
			(None, None) => {
				return Err(HarnessError::Config(format!("neither {ENV_WALLET} nor {ENV_WALLET_BASE64} is set")))
			}
		};
		let commitment = match var(ENV_COMMITMENT) {
			Some(c) => CommitmentConfig::from_str(&c)
				.map_err(|e| HarnessError::Config(format!("invalid {ENV_COMMITMENT} {c}: {e}")))?,
			None => CommitmentConfig::processed(),
		};
		let program_id = var(ENV_PROGRAM_ID)
			.map(|p| Pubkey::from_str(&p).map_err(|e| HarnessError::Config(format!("invalid {ENV_PROGRAM_ID} {p}: {e}"))))
			.transpose()?;

		Ok(Self {
			cluster,
			wallet,
			commitment,
			program_id,
			idl_path: var(ENV_IDL).map(PathBuf::from),
		})
	}

	pub fn load_idl(&self) -> HarnessResult<Idl> {
		match &self.idl_path {
			Some(path) => Idl::load(path),
			None => Idl::bundled(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |key: &str| map.get(key).cloned()
	}

	#[test]
	fn test_minimal_env() {
		let cfg = HarnessConfig::from_lookup(lookup(&[
			(ENV_PROVIDER_URL, "http://127.0.0.1:8899"),
			(ENV_WALLET, "/home/dev/.config/solana/id.json"),
		]))
		.unwrap();
		assert_eq!(cfg.cluster, ClusterEndpoint::Custom("http://127.0.0.1:8899".to_string()));
		assert_eq!(cfg.wallet, WalletSource::File(PathBuf::from("/home/dev/.config/solana/id.json")));
		assert_eq!(cfg.commitment, CommitmentConfig::processed());
		assert!(cfg.program_id.is_none());
		assert!(cfg.idl_path.is_none());
	}

	#[test]
	fn test_full_env() {
		let cfg = HarnessConfig::from_lookup(lookup(&[
			(ENV_PROVIDER_URL, "devnet"),
			(ENV_WALLET, "/ignored.json"),
			(ENV_WALLET_BASE64, "AAAA"),
			(ENV_COMMITMENT, "finalized"),
			(ENV_PROGRAM_ID, "7YZV5ErKM7o7JS9a4PS2B44cXjpbFqKhaRZHeEqLYC22"),
			(ENV_IDL, "target/idl/assets_vault.json"),
		]))
		.unwrap();
		assert_eq!(cfg.cluster.url(), "https://api.devnet.solana.com");
		assert_eq!(cfg.wallet, WalletSource::Base64("AAAA".to_string()));
		assert_eq!(cfg.commitment, CommitmentConfig::finalized());
		assert!(cfg.program_id.is_some());
		assert_eq!(cfg.idl_path, Some(PathBuf::from("target/idl/assets_vault.json")));
	}

	#[test]
	fn test_missing_provider_url() {
		let err = HarnessConfig::from_lookup(lookup(&[(ENV_WALLET, "/id.json")])).unwrap_err();
		assert!(matches!(err, HarnessError::Config(m) if m.contains(ENV_PROVIDER_URL)));
	}

	#[test]
	fn test_missing_wallet() {
		let err = HarnessConfig::from_lookup(lookup(&[(ENV_PROVIDER_URL, "localnet"), (ENV_WALLET, "  ")])).unwrap_err();
		assert!(matches!(err, HarnessError::Config(_)));
	}

	#[test]
	fn test_invalid_values() {
		assert!(HarnessConfig::from_lookup(lookup(&[(ENV_PROVIDER_URL, "moon"), (ENV_WALLET, "/id.json")])).is_err());
		assert!(HarnessConfig::from_lookup(lookup(&[
			(ENV_PROVIDER_URL, "localnet"),
			(ENV_WALLET, "/id.json"),
			(ENV_PROGRAM_ID, "not-a-key"),
		]))
		.is_err());
		assert!(HarnessConfig::from_lookup(lookup(&[
			(ENV_PROVIDER_URL, "localnet"),
			(ENV_WALLET, "/id.json"),
			(ENV_COMMITMENT, "eventually"),
		]))
		.is_err());
	}

	#[test]
	fn test_cluster_monikers() {
		assert_eq!("localnet".parse::<ClusterEndpoint>().unwrap().url(), "http://127.0.0.1:8899");
		assert_eq!("Mainnet".parse::<ClusterEndpoint>().unwrap(), ClusterEndpoint::Mainnet);
		assert_eq!("t".parse::<ClusterEndpoint>().unwrap(), ClusterEndpoint::Testnet);
	}

	#[test]
	fn test_url_scheme_is_case_insensitive() {
		assert_eq!(
			"HTTP://127.0.0.1:8899".parse::<ClusterEndpoint>().unwrap(),
			ClusterEndpoint::Custom("HTTP://127.0.0.1:8899".to_string())
		);
		assert!(" Https://rpc.example.org ".parse::<ClusterEndpoint>().is_ok());
		assert!("ftp://rpc.example.org".parse::<ClusterEndpoint>().is_err());
	}

	#[test]
	fn test_idl_from_file() {
		let path = std::env::temp_dir().join(format!("assets-vault-idl-{}.json", Pubkey::new_unique()));
		std::fs::write(
			&path,
			r#"{ "address": "7YZV5ErKM7o7JS9a4PS2B44cXjpbFqKhaRZHeEqLYC22",
			     "metadata": { "name": "assets_vault_local" },
			     "instructions": [ { "name": "initialize" } ] }"#,
		)
		.unwrap();
		let mut cfg = HarnessConfig::new(ClusterEndpoint::Localnet, WalletSource::Base64(String::new()));
		cfg.idl_path = Some(path.clone());
		let loaded = cfg.load_idl();
		let _ = std::fs::remove_file(&path);

		let idl = loaded.unwrap();
		assert_eq!(idl.program_name(), Some("assets_vault_local"));
		assert!(idl.instruction("initialize").is_ok());
	}

	#[test]
	fn test_missing_idl_file() {
		let mut cfg = HarnessConfig::new(ClusterEndpoint::Localnet, WalletSource::Base64(String::new()));
		cfg.idl_path = Some(std::env::temp_dir().join("assets-vault-idl-missing.json"));
		assert!(matches!(cfg.load_idl(), Err(HarnessError::Idl(_))));
	}

	#[test]
	fn test_explicit_config_uses_bundled_idl() {
		let cfg = HarnessConfig::new(ClusterEndpoint::Localnet, WalletSource::Base64(String::new()));
		let idl = cfg.load_idl().unwrap();
		assert!(idl.instruction("initialize").is_ok());
	}
}
