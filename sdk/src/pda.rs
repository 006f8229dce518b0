//! Program-derived addresses and file naming

use crate::error::{Result, VerifixError};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use verifix_program::{CONFIG_SEED, MAX_FILE_NAME_LEN};

pub fn config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

/// Record address for `file_name` stored by `owner`.
///
/// Callers must pass a name accepted by [`validate_file_name`]; longer names
/// are not valid seeds.
pub fn file_hash_address(program_id: &Pubkey, owner: &Pubkey, file_name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[owner.as_ref(), file_name.as_bytes()], program_id)
}

pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(VerifixError::Validation("file name is empty".to_string()));
    }
    if file_name.len() > MAX_FILE_NAME_LEN {
        return Err(VerifixError::Validation(format!(
            "file name '{file_name}' is {} bytes, max is {MAX_FILE_NAME_LEN}",
            file_name.len()
        )));
    }
    Ok(())
}

/// Record name of a file: its final path component
pub fn file_name_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .ok_or_else(|| VerifixError::Validation(format!("{} has no file name", path.display())))?
        .to_str()
        .ok_or_else(|| {
            VerifixError::Validation(format!("{} is not valid UTF-8", path.display()))
        })?;

    validate_file_name(name)?;
    Ok(name.to_string())
}
