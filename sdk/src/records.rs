//! Off-chain views of program accounts

use crate::{
    error::{Result, VerifixError},
    hash::to_hex,
};
use anchor_lang::AccountDeserialize;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use verifix_program::{FileHash, ProgramConfig};

/// A stored file record, shaped for display and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(with = "pubkey_string")]
    pub address: Pubkey,
    #[serde(with = "pubkey_string")]
    pub owner: Pubkey,
    #[serde(with = "hex_digest")]
    pub hash: [u8; 32],
    pub stored_at: i64,
    pub updated_at: i64,
}

impl FileRecord {
    pub fn hash_hex(&self) -> String {
        to_hex(&self.hash)
    }
}

/// Snapshot of the program config singleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(with = "pubkey_string")]
    pub authority: Pubkey,
    pub record_count: u64,
    pub initialized_at: i64,
}

pub fn decode_file_record(address: Pubkey, data: &[u8]) -> Result<FileRecord> {
    let mut slice = data;
    let record = FileHash::try_deserialize(&mut slice)
        .map_err(|e| VerifixError::InvalidAccountData(format!("{address}: {e}")))?;

    Ok(FileRecord {
        address,
        owner: record.owner,
        hash: record.hash,
        stored_at: record.stored_at,
        updated_at: record.updated_at,
    })
}

pub fn decode_config(data: &[u8]) -> Result<ConfigSnapshot> {
    let mut slice = data;
    let config = ProgramConfig::try_deserialize(&mut slice)
        .map_err(|e| VerifixError::InvalidAccountData(format!("config: {e}")))?;

    Ok(ConfigSnapshot {
        authority: config.authority,
        record_count: config.record_count,
        initialized_at: config.initialized_at,
    })
}

/// Result of comparing a local digest against the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    Modified { stored: [u8; 32], current: [u8; 32] },
    NotFound,
    InvalidData,
}

impl VerifyOutcome {
    /// `account_data` is `None` when no record account exists
    pub fn classify(address: Pubkey, current: [u8; 32], account_data: Option<&[u8]>) -> Self {
        let Some(data) = account_data else {
            return VerifyOutcome::NotFound;
        };
        match decode_file_record(address, data) {
            Ok(record) if record.hash == current => VerifyOutcome::Verified,
            Ok(record) => VerifyOutcome::Modified {
                stored: record.hash,
                current,
            },
            Err(_) => VerifyOutcome::InvalidData,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyOutcome::Verified => write!(f, "File integrity verified"),
            VerifyOutcome::Modified { stored, current } => write!(
                f,
                "File has been modified (stored {}, current {})",
                to_hex(stored),
                to_hex(current)
            ),
            VerifyOutcome::NotFound => write!(f, "No hash found for this file"),
            VerifyOutcome::InvalidData => write!(f, "Invalid account data"),
        }
    }
}

mod pubkey_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let value = String::deserialize(deserializer)?;
        Pubkey::from_str(&value).map_err(serde::de::Error::custom)
    }
}

mod hex_digest {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let value = String::deserialize(deserializer)?;
        crate::hash::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AccountSerialize;

    fn record_bytes(hash: [u8; 32], owner: Pubkey) -> Vec<u8> {
        let record = FileHash {
            hash,
            owner,
            stored_at: 100,
            updated_at: 150,
            bump: 253,
        };
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn test_decode_file_record() {
        let address = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let record = decode_file_record(address, &record_bytes([3u8; 32], owner)).unwrap();

        assert_eq!(record.address, address);
        assert_eq!(record.owner, owner);
        assert_eq!(record.hash, [3u8; 32]);
        assert_eq!(record.stored_at, 100);
        assert_eq!(record.updated_at, 150);
    }

    #[test]
    fn test_decode_rejects_foreign_accounts() {
        let config = ProgramConfig {
            authority: Pubkey::new_unique(),
            record_count: 1,
            initialized_at: 0,
            bump: 255,
        };
        let mut data = Vec::new();
        config.try_serialize(&mut data).unwrap();

        assert!(decode_file_record(Pubkey::new_unique(), &data).is_err());
        assert!(decode_file_record(Pubkey::new_unique(), &[0u8; 4]).is_err());
        assert_eq!(decode_config(&data).unwrap().record_count, 1);
    }

    #[test]
    fn test_classify() {
        let address = Pubkey::new_unique();
        let data = record_bytes([1u8; 32], Pubkey::new_unique());

        assert_eq!(
            VerifyOutcome::classify(address, [1u8; 32], Some(&data)),
            VerifyOutcome::Verified
        );
        assert_eq!(
            VerifyOutcome::classify(address, [2u8; 32], Some(&data)),
            VerifyOutcome::Modified {
                stored: [1u8; 32],
                current: [2u8; 32]
            }
        );
        assert_eq!(
            VerifyOutcome::classify(address, [1u8; 32], None),
            VerifyOutcome::NotFound
        );
        assert_eq!(
            VerifyOutcome::classify(address, [1u8; 32], Some(&data[..20])),
            VerifyOutcome::InvalidData
        );
    }

    #[test]
    fn test_record_json_shape() {
        let owner = Pubkey::new_unique();
        let record = decode_file_record(Pubkey::new_unique(), &record_bytes([0xab; 32], owner)).unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["owner"], owner.to_string());
        assert_eq!(json["hash"], "ab".repeat(32));

        let back: FileRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
