//! RPC client for the Verifix program

use crate::{
    config::ClientConfig,
    error::{Result, VerifixError},
    hash::{compute_file_hash, to_hex},
    instructions::*,
    pda::{config_address, file_hash_address, file_name_from_path, validate_file_name},
    records::{decode_config, decode_file_record, ConfigSnapshot, FileRecord, VerifyOutcome},
};
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of storing or updating a file digest
#[derive(Debug, Clone)]
pub struct StoreReceipt {
    pub signature: Signature,
    pub file_name: String,
    pub address: Pubkey,
    pub hash: [u8; 32],
}

/// Outcome of checking a local file against its stored digest
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub file_name: String,
    pub address: Pubkey,
    pub current: [u8; 32],
    pub outcome: VerifyOutcome,
}

/// Main client for interacting with the Verifix program
pub struct VerifixClient {
    rpc: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl VerifixClient {
    /// Connect using `config`, loading the payer keypair from disk
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let keypair_path = config.keypair_path();
        let payer = read_keypair_file(&keypair_path).map_err(|e| {
            VerifixError::Keypair(format!(
                "failed to read keypair from {}: {e}",
                keypair_path.display()
            ))
        })?;

        Ok(Self::with_keypair(config, payer))
    }

    pub fn with_keypair(config: &ClientConfig, payer: Keypair) -> Self {
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);
        Self::with_rpc_client(rpc, payer, config.program_id)
    }

    pub fn with_rpc_client(rpc: RpcClient, payer: Keypair, program_id: Pubkey) -> Self {
        Self {
            rpc,
            payer,
            program_id,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    /// Create the program config. A second call reports `AlreadyInitialized`.
    pub async fn initialize(&self) -> Result<Signature> {
        let (config, _) = config_address(&self.program_id);
        if self.get_account(&config).await?.is_some() {
            return Err(VerifixError::AlreadyInitialized);
        }

        info!(program = %self.program_id, authority = %self.payer(), "Initializing program");
        let ix = build_initialize_instruction(self.program_id, self.payer());
        let signature = self
            .submit(&[ix])
            .await
            .map_err(VerifixError::from_initialize)?;

        info!(%signature, "Program initialized");
        Ok(signature)
    }

    /// Hash `path` and store the digest under its file name
    pub async fn store_file(&self, path: impl AsRef<Path>) -> Result<StoreReceipt> {
        let (file_name, hash) = hash_path(path.as_ref())?;
        self.ensure_initialized().await?;

        let (address, _) = file_hash_address(&self.program_id, &self.payer(), &file_name);
        info!(file = %file_name, hash = %to_hex(&hash), record = %address, "Storing hash");

        let ix = build_store_hash_instruction(self.program_id, self.payer(), &file_name, hash)?;
        let signature = self.send(&[ix]).await?;

        Ok(StoreReceipt {
            signature,
            file_name,
            address,
            hash,
        })
    }

    /// Replace the stored digest of `path` with its current one
    pub async fn update_file(&self, path: impl AsRef<Path>) -> Result<StoreReceipt> {
        let (file_name, hash) = hash_path(path.as_ref())?;

        let (address, _) = file_hash_address(&self.program_id, &self.payer(), &file_name);
        if self.get_account(&address).await?.is_none() {
            return Err(VerifixError::RecordNotFound(file_name));
        }

        info!(file = %file_name, hash = %to_hex(&hash), "Updating hash");
        let ix = build_update_hash_instruction(self.program_id, self.payer(), &file_name, hash)?;
        let signature = self.send(&[ix]).await?;

        Ok(StoreReceipt {
            signature,
            file_name,
            address,
            hash,
        })
    }

    /// Compare `path` with the digest stored by `owner` (defaults to the payer).
    ///
    /// Read-only: nothing is submitted.
    pub async fn verify_file(
        &self,
        path: impl AsRef<Path>,
        owner: Option<Pubkey>,
    ) -> Result<VerifyReport> {
        let (file_name, current) = hash_path(path.as_ref())?;
        let owner = owner.unwrap_or_else(|| self.payer());

        let (address, _) = file_hash_address(&self.program_id, &owner, &file_name);
        let account = self.get_account(&address).await?;
        let outcome = VerifyOutcome::classify(
            address,
            current,
            account.as_ref().map(|account| account.data.as_slice()),
        );

        match &outcome {
            VerifyOutcome::Verified => info!(file = %file_name, "Hash matches"),
            other => warn!(file = %file_name, outcome = %other, "Verification did not pass"),
        }

        Ok(VerifyReport {
            file_name,
            address,
            current,
            outcome,
        })
    }

    /// Run the comparison on-chain via `verify_hash`
    pub async fn verify_file_on_chain(
        &self,
        path: impl AsRef<Path>,
        owner: Option<Pubkey>,
    ) -> Result<Signature> {
        let (file_name, current) = hash_path(path.as_ref())?;
        let owner = owner.unwrap_or_else(|| self.payer());

        let ix = build_verify_hash_instruction(self.program_id, owner, &file_name, current)?;
        self.send(&[ix]).await
    }

    /// Close the record for `path` and reclaim its rent
    pub async fn remove_file(&self, path: impl AsRef<Path>) -> Result<Signature> {
        let file_name = file_name_from_path(path)?;
        self.remove_record(&file_name).await
    }

    pub async fn remove_record(&self, file_name: &str) -> Result<Signature> {
        validate_file_name(file_name)?;

        let (address, _) = file_hash_address(&self.program_id, &self.payer(), file_name);
        if self.get_account(&address).await?.is_none() {
            return Err(VerifixError::RecordNotFound(file_name.to_string()));
        }

        info!(file = %file_name, record = %address, "Removing hash");
        let ix = build_remove_hash_instruction(self.program_id, self.payer(), file_name)?;
        self.send(&[ix]).await
    }

    pub async fn fetch_config(&self) -> Result<Option<ConfigSnapshot>> {
        let (config, _) = config_address(&self.program_id);
        self.get_account(&config)
            .await?
            .map(|account| decode_config(&account.data))
            .transpose()
    }

    pub async fn fetch_record(&self, owner: &Pubkey, file_name: &str) -> Result<Option<FileRecord>> {
        validate_file_name(file_name)?;
        let (address, _) = file_hash_address(&self.program_id, owner, file_name);
        self.get_account(&address)
            .await?
            .map(|account| decode_file_record(address, &account.data))
            .transpose()
    }

    async fn ensure_initialized(&self) -> Result<()> {
        match self.fetch_config().await? {
            Some(_) => Ok(()),
            None => Err(VerifixError::NotInitialized),
        }
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        Ok(response.value)
    }

    async fn send(&self, instructions: &[Instruction]) -> Result<Signature> {
        Ok(self.submit(instructions).await?)
    }

    /// Sign with the payer and wait for confirmation
    async fn submit(
        &self,
        instructions: &[Instruction],
    ) -> std::result::Result<Signature, ClientError> {
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            &[&self.payer],
            recent_blockhash,
        );

        debug!(blockhash = %recent_blockhash, "Sending transaction");
        let signature = self.rpc.send_and_confirm_transaction(&transaction).await?;
        debug!(%signature, "Transaction confirmed");
        Ok(signature)
    }
}

fn hash_path(path: &Path) -> Result<(String, [u8; 32])> {
    let file_name = file_name_from_path(path)?;
    let hash = compute_file_hash(path)?;
    Ok((file_name, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_request::RpcRequest;
    use std::io::Write;

    fn unreachable_client() -> VerifixClient {
        let config = ClientConfig {
            // Port 9 (discard) on localhost; nothing answers RPC there
            rpc_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        VerifixClient::with_keypair(&config, Keypair::new())
    }

    #[test]
    fn test_missing_keypair_file() {
        let config = ClientConfig {
            keypair_path: "/nonexistent/verifix/id.json".to_string(),
            ..ClientConfig::default()
        };
        let err = VerifixClient::new(&config).err().unwrap();
        assert!(matches!(err, VerifixError::Keypair(_)));
    }

    #[test]
    fn test_client_uses_configured_program() {
        let program_id = Pubkey::new_unique();
        let config = ClientConfig {
            program_id,
            ..ClientConfig::default()
        };
        let client = VerifixClient::with_keypair(&config, Keypair::new());
        assert_eq!(client.program_id(), program_id);
        assert_eq!(client.rpc_url(), config.rpc_url);
    }

    #[tokio::test]
    async fn test_unreachable_cluster_is_network_error() {
        let err = unreachable_client().initialize().await.unwrap_err();
        assert!(matches!(err, VerifixError::Network(_)), "{err:?}");
    }

    /// Client over the mock sender; `getAccountInfo` answers with `account`
    fn mocked_client(account: Option<serde_json::Value>) -> VerifixClient {
        let mut mocks = std::collections::HashMap::new();
        if let Some(account) = account {
            mocks.insert(
                RpcRequest::GetAccountInfo,
                serde_json::json!({ "context": { "slot": 1 }, "value": account }),
            );
        }
        let rpc = RpcClient::new_mock_with_mocks("succeeds".to_string(), mocks);
        VerifixClient::with_rpc_client(rpc, Keypair::new(), verifix_program::ID)
    }

    #[tokio::test]
    async fn test_initialize_existing_config_is_already_initialized() {
        let config_account = serde_json::json!({
            "lamports": 1_000_000,
            "data": ["", "base64"],
            "owner": verifix_program::ID.to_string(),
            "executable": false,
            "rentEpoch": 0,
            "space": 0,
        });

        let err = mocked_client(Some(config_account)).initialize().await.unwrap_err();
        assert!(matches!(err, VerifixError::AlreadyInitialized), "{err:?}");
    }

    #[tokio::test]
    async fn test_store_before_initialize_is_not_initialized() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"contents").unwrap();

        let err = mocked_client(None).store_file(file.path()).await.unwrap_err();
        assert!(matches!(err, VerifixError::NotInitialized), "{err:?}");
    }

    #[tokio::test]
    async fn test_local_validation_happens_before_rpc() {
        let client = unreachable_client();

        let err = client.store_file("/nonexistent/file.txt").await.unwrap_err();
        assert!(matches!(err, VerifixError::Io(_)));

        let dir = tempfile::tempdir().unwrap();
        let long_name = dir.path().join("n".repeat(40));
        std::fs::File::create(&long_name).unwrap().write_all(b"x").unwrap();
        let err = client.verify_file(&long_name, None).await.unwrap_err();
        assert!(matches!(err, VerifixError::Validation(_)));

        let err = client.remove_record("").await.unwrap_err();
        assert!(matches!(err, VerifixError::Validation(_)));
    }
}
