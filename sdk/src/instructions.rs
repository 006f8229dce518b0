//! Instruction builders for the Verifix program

use crate::{
    error::Result,
    pda::{config_address, file_hash_address, validate_file_name},
};
use anchor_lang::{InstructionData, ToAccountMetas};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use verifix_program::{accounts, instruction};

/// Build the `initialize` instruction; `authority` signs and pays
pub fn build_initialize_instruction(program_id: Pubkey, authority: Pubkey) -> Instruction {
    let (config, _) = config_address(&program_id);

    Instruction {
        program_id,
        accounts: accounts::Initialize {
            authority,
            config,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::Initialize {}.data(),
    }
}

pub fn build_store_hash_instruction(
    program_id: Pubkey,
    user: Pubkey,
    file_name: &str,
    hash: [u8; 32],
) -> Result<Instruction> {
    validate_file_name(file_name)?;
    let (config, _) = config_address(&program_id);
    let (file_hash, _) = file_hash_address(&program_id, &user, file_name);

    Ok(Instruction {
        program_id,
        accounts: accounts::StoreHash {
            config,
            file_hash,
            user,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::StoreHash {
            file_name: file_name.to_string(),
            hash,
        }
        .data(),
    })
}

pub fn build_update_hash_instruction(
    program_id: Pubkey,
    owner: Pubkey,
    file_name: &str,
    hash: [u8; 32],
) -> Result<Instruction> {
    validate_file_name(file_name)?;
    let (file_hash, _) = file_hash_address(&program_id, &owner, file_name);

    Ok(Instruction {
        program_id,
        accounts: accounts::UpdateHash { file_hash, owner }.to_account_metas(None),
        data: instruction::UpdateHash {
            file_name: file_name.to_string(),
            hash,
        }
        .data(),
    })
}

/// Build `verify_hash` against the record `owner` stored; any payer may send it
pub fn build_verify_hash_instruction(
    program_id: Pubkey,
    owner: Pubkey,
    file_name: &str,
    hash: [u8; 32],
) -> Result<Instruction> {
    validate_file_name(file_name)?;
    let (file_hash, _) = file_hash_address(&program_id, &owner, file_name);

    Ok(Instruction {
        program_id,
        accounts: accounts::VerifyHash { file_hash, owner }.to_account_metas(None),
        data: instruction::VerifyHash {
            file_name: file_name.to_string(),
            hash,
        }
        .data(),
    })
}

pub fn build_remove_hash_instruction(
    program_id: Pubkey,
    owner: Pubkey,
    file_name: &str,
) -> Result<Instruction> {
    validate_file_name(file_name)?;
    let (config, _) = config_address(&program_id);
    let (file_hash, _) = file_hash_address(&program_id, &owner, file_name);

    Ok(Instruction {
        program_id,
        accounts: accounts::RemoveHash {
            config,
            file_hash,
            owner,
        }
        .to_account_metas(None),
        data: instruction::RemoveHash {
            file_name: file_name.to_string(),
        }
        .data(),
    })
}
