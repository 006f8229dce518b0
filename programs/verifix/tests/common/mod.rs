#![allow(dead_code)]

use anchor_lang::prelude::*;
use anchor_lang::{InstructionData, ToAccountMetas};
use solana_program_test::*;
use solana_sdk::{
    hash::Hash,
    instruction::{Instruction, InstructionError},
    signature::{Keypair, Signature, Signer},
    system_instruction,
    system_program,
    transaction::{Transaction, TransactionError},
};

use verifix_program::{FileHash, ProgramConfig, CONFIG_SEED};

// Anchor's generated entry wants `&'info [AccountInfo<'info>]`
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    verifix_program::entry(program_id, accounts, data)
}

pub struct TestContext {
    pub banks_client: BanksClient,
    pub payer: Keypair,
    pub recent_blockhash: Hash,
    pub program_id: Pubkey,
}

impl TestContext {
    pub async fn new() -> Self {
        let program_id = verifix_program::ID;
        let program_test = ProgramTest::new(
            "verifix_program",
            program_id,
            processor!(process_instruction),
        );

        let (banks_client, payer, recent_blockhash) = program_test.start().await;

        Self {
            banks_client,
            payer,
            recent_blockhash,
            program_id,
        }
    }

    pub fn config_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[CONFIG_SEED], &self.program_id).0
    }

    pub fn record_address(&self, owner: &Pubkey, file_name: &str) -> Pubkey {
        Pubkey::find_program_address(&[owner.as_ref(), file_name.as_bytes()], &self.program_id).0
    }

    /// Create and fund a fresh keypair from the payer
    pub async fn funded_keypair(&mut self, lamports: u64) -> Keypair {
        let keypair = Keypair::new();
        let ix = system_instruction::transfer(&self.payer.pubkey(), &keypair.pubkey(), lamports);
        let payer = self.payer.insecure_clone();
        self.send(&[ix], &[&payer]).await.unwrap();
        keypair
    }

    /// Sign with `signers` (first one pays) and process on a fresh blockhash
    pub async fn send(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> std::result::Result<Signature, BanksClientError> {
        self.recent_blockhash = self
            .banks_client
            .get_new_latest_blockhash(&self.recent_blockhash)
            .await
            .unwrap();

        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&signers[0].pubkey()),
            signers,
            self.recent_blockhash,
        );
        let signature = tx.signatures[0];
        self.banks_client.process_transaction(tx).await?;
        Ok(signature)
    }

    pub fn initialize_ix(&self, authority: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: verifix_program::accounts::Initialize {
                authority: *authority,
                config: self.config_address(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: verifix_program::instruction::Initialize {}.data(),
        }
    }

    pub fn store_hash_ix(&self, user: &Pubkey, file_name: &str, hash: [u8; 32]) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: verifix_program::accounts::StoreHash {
                config: self.config_address(),
                file_hash: self.record_address(user, file_name),
                user: *user,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: verifix_program::instruction::StoreHash {
                file_name: file_name.to_string(),
                hash,
            }
            .data(),
        }
    }

    pub fn update_hash_ix(
        &self,
        record: Pubkey,
        owner: &Pubkey,
        file_name: &str,
        hash: [u8; 32],
    ) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: verifix_program::accounts::UpdateHash {
                file_hash: record,
                owner: *owner,
            }
            .to_account_metas(None),
            data: verifix_program::instruction::UpdateHash {
                file_name: file_name.to_string(),
                hash,
            }
            .data(),
        }
    }

    pub fn verify_hash_ix(&self, owner: &Pubkey, file_name: &str, hash: [u8; 32]) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: verifix_program::accounts::VerifyHash {
                file_hash: self.record_address(owner, file_name),
                owner: *owner,
            }
            .to_account_metas(None),
            data: verifix_program::instruction::VerifyHash {
                file_name: file_name.to_string(),
                hash,
            }
            .data(),
        }
    }

    pub fn remove_hash_ix(&self, owner: &Pubkey, file_name: &str) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: verifix_program::accounts::RemoveHash {
                config: self.config_address(),
                file_hash: self.record_address(owner, file_name),
                owner: *owner,
            }
            .to_account_metas(None),
            data: verifix_program::instruction::RemoveHash {
                file_name: file_name.to_string(),
            }
            .data(),
        }
    }

    pub async fn initialize(&mut self) -> std::result::Result<Signature, BanksClientError> {
        let ix = self.initialize_ix(&self.payer.pubkey());
        let payer = self.payer.insecure_clone();
        self.send(&[ix], &[&payer]).await
    }

    pub async fn fetch_config(&mut self) -> Option<ProgramConfig> {
        let account = self
            .banks_client
            .get_account(self.config_address())
            .await
            .unwrap()?;
        Some(ProgramConfig::try_deserialize(&mut account.data.as_slice()).unwrap())
    }

    pub async fn fetch_record(&mut self, owner: &Pubkey, file_name: &str) -> Option<FileHash> {
        let account = self
            .banks_client
            .get_account(self.record_address(owner, file_name))
            .await
            .unwrap()?;
        Some(FileHash::try_deserialize(&mut account.data.as_slice()).unwrap())
    }
}

/// Custom program error code carried by a failed transaction, if any
pub fn custom_error_code(err: &BanksClientError) -> Option<u32> {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}
