//! Client configuration
//!
//! The program id and cluster endpoint are always injected explicitly: from
//! defaults, from the environment, or from command-line flags.

use crate::error::{Result, VerifixError};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

/// Well-known clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Cluster {
    pub fn url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }
}

impl FromStr for Cluster {
    type Err = VerifixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            "testnet" => Ok(Cluster::Testnet),
            "devnet" => Ok(Cluster::Devnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(VerifixError::InvalidConfiguration(format!(
                "unknown cluster '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Mainnet => "mainnet",
            Cluster::Testnet => "testnet",
            Cluster::Devnet => "devnet",
            Cluster::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// RPC endpoint to connect to
    pub rpc_url: String,

    /// Keypair that signs and pays for transactions (`~` is expanded)
    pub keypair_path: String,

    /// Deployed Verifix program
    pub program_id: Pubkey,

    /// Commitment used for reads and confirmations
    pub commitment: CommitmentConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: Cluster::Localnet.url().to_string(),
            keypair_path: DEFAULT_KEYPAIR_PATH.to_string(),
            program_id: verifix_program::ID,
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `VERIFIX_*` environment variables.
    ///
    /// `VERIFIX_RPC_URL` wins over `VERIFIX_CLUSTER` when both are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(cluster) = lookup("VERIFIX_CLUSTER") {
            config.rpc_url = cluster.parse::<Cluster>()?.url().to_string();
        }
        if let Some(rpc_url) = lookup("VERIFIX_RPC_URL") {
            config.rpc_url = rpc_url;
        }
        if let Some(keypair_path) = lookup("VERIFIX_KEYPAIR") {
            config.keypair_path = keypair_path;
        }
        if let Some(program_id) = lookup("VERIFIX_PROGRAM_ID") {
            config.program_id = parse_program_id(&program_id)?;
        }
        if let Some(commitment) = lookup("VERIFIX_COMMITMENT") {
            config.commitment = parse_commitment(&commitment)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.rpc_url = cluster.url().to_string();
        self
    }

    pub fn keypair_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.keypair_path).into_owned())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(VerifixError::InvalidConfiguration(format!(
                "RPC URL must be http(s): {}",
                self.rpc_url
            )));
        }
        if self.keypair_path.trim().is_empty() {
            return Err(VerifixError::InvalidConfiguration(
                "keypair path is empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn parse_program_id(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| {
        VerifixError::InvalidConfiguration(format!("invalid program id '{value}': {e}"))
    })
}

pub fn parse_commitment(value: &str) -> Result<CommitmentConfig> {
    CommitmentConfig::from_str(value.trim()).map_err(|_| {
        VerifixError::InvalidConfiguration(format!("invalid commitment '{value}'"))
    })
}
