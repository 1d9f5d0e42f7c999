pub mod config;
pub mod error;
pub mod harness;
pub mod idl;
pub mod program;
pub mod provider;
pub mod solana_client;
pub mod telemetry;
