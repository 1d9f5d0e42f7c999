//! Anchor interface description (IDL) of the Assets Vault program.
//!
//! Both the current layout (top-level `address`, explicit per-instruction
//! `discriminator`) and the legacy layout (`metadata.address`, discriminator
//! derived from the method name) are accepted.

use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

const BUNDLED_IDL: &str = include_str!("../idl/assets_vault.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idl {
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub version: Option<String>,
	#[serde(default)]
	pub metadata: Option<IdlMetadata>,
	#[serde(default)]
	pub instructions: Vec<IdlInstruction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlMetadata {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub version: Option<String>,
	#[serde(default)]
	pub spec: Option<String>,
	#[serde(default)]
	pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstruction {
	pub name: String,
	#[serde(default)]
	pub discriminator: Option<Vec<u8>>,
	#[serde(default)]
	pub accounts: Vec<IdlAccountItem>,
	#[serde(default)]
	pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlAccountItem {
	pub name: String,
	#[serde(default, alias = "isMut")]
	pub writable: bool,
	#[serde(default, alias = "isSigner")]
	pub signer: bool,
	/// Legacy composite account groups.
	#[serde(default)]
	pub accounts: Vec<IdlAccountItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlField {
	pub name: String,
	#[serde(rename = "type")]
	pub ty: serde_json::Value,
}

impl IdlAccountItem {
	fn leaf_count(&self) -> usize {
		if self.accounts.is_empty() {
			1
		} else {
			self.accounts.iter().map(IdlAccountItem::leaf_count).sum()
		}
	}
}

impl IdlInstruction {
	/// Number of account metas the instruction expects, composites flattened.
	pub fn account_count(&self) -> usize {
		self.accounts.iter().map(IdlAccountItem::leaf_count).sum()
	}

	pub fn discriminator(&self) -> HarnessResult<[u8; 8]> {
		match &self.discriminator {
			Some(bytes) => <[u8; 8]>::try_from(bytes.as_slice()).map_err(|_| {
				HarnessError::Idl(format!(
					"instruction {} has a {}-byte discriminator, expected 8",
					self.name,
					bytes.len()
				))
			}),
			None => Ok(anchor_discriminator(&to_snake_case(&self.name))),
		}
	}
}

impl Idl {
	pub fn from_json(json: &str) -> HarnessResult<Self> {
		serde_json::from_str(json).map_err(|e| HarnessError::Idl(format!("invalid IDL json: {e}")))
	}

	pub fn load(path: &Path) -> HarnessResult<Self> {
		let raw = std::fs::read_to_string(path)
			.map_err(|e| HarnessError::Idl(format!("failed to read {}: {e}", path.display())))?;
		Self::from_json(&raw)
	}

	/// The IDL generated for the program at build time and shipped with this crate.
	pub fn bundled() -> HarnessResult<Self> {
		Self::from_json(BUNDLED_IDL)
	}

	pub fn program_name(&self) -> Option<&str> {
		self.metadata
			.as_ref()
			.and_then(|m| m.name.as_deref())
			.or(self.name.as_deref())
	}

	pub fn program_id(&self) -> HarnessResult<Pubkey> {
		let raw = self
			.address
			.as_deref()
			.or_else(|| self.metadata.as_ref().and_then(|m| m.address.as_deref()))
			.ok_or_else(|| HarnessError::Idl("IDL carries no program address".to_string()))?;
		Pubkey::from_str(raw).map_err(|e| HarnessError::Idl(format!("invalid program address {raw}: {e}")))
	}

	/// Looks up an instruction by name; legacy camelCase names match their snake_case form.
	pub fn instruction(&self, name: &str) -> HarnessResult<&IdlInstruction> {
		let wanted = to_snake_case(name);
		self.instructions
			.iter()
			.find(|ix| to_snake_case(&ix.name) == wanted)
			.ok_or_else(|| HarnessError::UnknownInstruction(name.to_string()))
	}
}

/// Anchor method discriminator: first 8 bytes of `sha256("global:<name>")`.
pub fn anchor_discriminator(name: &str) -> [u8; 8] {
	let mut hasher = Sha256::new();
	hasher.update(format!("global:{}", name));
	let hash = hasher.finalize();
	let mut disc = [0u8; 8];
	disc.copy_from_slice(&hash[..8]);
	disc
}

fn to_snake_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len() + 4);
	for (i, ch) in name.chars().enumerate() {
		if ch.is_ascii_uppercase() {
			if i > 0 {
				out.push('_');
			}
			out.push(ch.to_ascii_lowercase());
		} else {
			out.push(ch);
		}
	}
	out
}
