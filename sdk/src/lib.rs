//! Verifix SDK - client library for the Verifix file integrity registry
//!
//! This SDK provides:
//! - Explicit client configuration (cluster, keypair, program id)
//! - File hashing and record address derivation
//! - Instruction builders for every program instruction
//! - An async RPC client that submits them and decodes records

pub mod client;
pub mod config;
pub mod error;
pub mod hash;
pub mod instructions;
pub mod pda;
pub mod records;

pub use client::{StoreReceipt, VerifixClient, VerifyReport};
pub use config::{ClientConfig, Cluster};
pub use error::{Result, VerifixError};
pub use records::{FileRecord, VerifyOutcome};

/// Program id of the deployed Verifix program
pub use verifix_program::ID as PROGRAM_ID;
