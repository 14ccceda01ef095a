//! Ledger instructions for the agreement program.

use crate::client::Address;
use crate::error::Result;
use crate::state::AgreementState;
use serde::{Deserialize, Serialize};

/// Reference to an account an instruction touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    /// The referenced account
    pub address: Address,
    /// Whether this account's authority signs the submission
    pub is_signer: bool,
    /// Whether the instruction may mutate this account
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    pub fn writable(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    pub fn readonly(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: false,
        }
    }
}

/// One instruction submitted to the ledger.
///
/// Agreement instructions follow a fixed account layout: the agreement
/// account first, the authorizing party second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Program that interprets the instruction
    pub program_id: Address,
    /// Accounts the instruction reads or writes
    pub accounts: Vec<AccountMeta>,
    /// Opaque instruction payload
    pub data: Vec<u8>,
}

/// Payloads understood by the agreement program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum AgreementInstruction {
    /// Creates the agreement account and writes the initial state.
    ///
    /// `rent` is the exemption balance reserved from the owner so the
    /// account persists.
    Initialize {
        /// Initial agreement state (`pending`)
        state: AgreementState,
        /// Reserved exemption balance, in base units
        rent: u64,
    },

    /// Transitions `pending -> executed`, transferring the payment from
    /// the counterparty to the owner.
    Execute {
        /// Payment amount, in base units
        payment: u64,
    },

    /// Transitions `pending -> revoked`.
    Revoke,
}

impl AgreementInstruction {
    /// Serializes the payload for submission.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parses a payload from account or instruction data.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
