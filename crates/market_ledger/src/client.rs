//! The abstract external-ledger boundary.

use crate::error::Result;
use crate::instruction::Instruction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A ledger account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Address(address.into())
    }

    /// Generates a fresh, unique address.
    pub fn generate() -> Self {
        Address(Uuid::new_v4().simple().to_string())
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transaction signature returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Wraps a signature string.
    pub fn new(signature: impl Into<String>) -> Self {
        Signature(signature.into())
    }

    /// Returns the signature as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authorizing party.
///
/// Key material and signing live in the external wallet layer; this type
/// carries only the address whose authority an instruction claims. The
/// ledger is what actually enforces that the claimed signer authorized the
/// submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    address: Address,
}

impl Signer {
    /// Creates a signer for an address.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Creates a signer with a fresh address.
    pub fn generate() -> Self {
        Self::new(Address::generate())
    }

    /// Returns the signer's address.
    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// External ledger collaborator.
///
/// Consumed, never implemented against a specific chain here: the
/// marketplace treats the ledger as an opaque dependency that durably
/// records instructions and authorizes state transitions. See
/// [`crate::MemoryLedger`] for the bundled in-memory implementation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submits an instruction, returning its signature.
    async fn submit(&self, instruction: &Instruction) -> Result<Signature>;

    /// Fetches an account's raw payload, or `None` if the account does not
    /// exist.
    async fn account_data(&self, address: &Address) -> Result<Option<Vec<u8>>>;

    /// Returns the balance that keeps an account of `size` bytes alive.
    async fn minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64>;

    /// Returns true once a submitted signature is confirmed.
    async fn confirm(&self, signature: &Signature) -> Result<bool>;

    /// Returns an address's balance in base units.
    async fn balance(&self, address: &Address) -> Result<u64>;

    /// Transfers base units between addresses, authorized by `from`.
    async fn transfer(&self, from: &Signer, to: &Address, amount: u64) -> Result<Signature>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generated_addresses_are_unique() {
        assert_ne!(Address::generate(), Address::generate());
    }

    #[test]
    fn test_address_serde_transparent() {
        let address = Address::new("abc123");
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
