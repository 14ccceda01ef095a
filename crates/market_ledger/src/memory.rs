//! Run the agreement ledger in memory.
//!
//! [`MemoryLedger`] implements [`LedgerClient`] with in-memory state, so
//! the full agreement lifecycle can run without a node. It enforces what a
//! real ledger would: account existence, signer authority, balances, and
//! the agreement state machine — which makes the rejection paths of the
//! protocol testable.

use crate::client::{Address, LedgerClient, Signature, Signer};
use crate::error::{LedgerError, Result};
use crate::instruction::{AgreementInstruction, Instruction};
use crate::state::{AgreementState, AgreementStatus};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// Exemption balance charged per byte of account data.
const RENT_PER_BYTE: u64 = 348;

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Address, Vec<u8>>,
    balances: HashMap<Address, u64>,
    confirmed: HashSet<Signature>,
}

/// In-memory [`LedgerClient`] implementation.
///
/// State lives behind a mutex, so one instance can be shared across
/// concurrent callers. Signatures are confirmed as soon as the instruction
/// applies.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Funds an address; builder-style for test setup.
    pub fn with_balance(self, address: &Address, amount: u64) -> Self {
        self.state
            .lock()
            .expect("ledger state poisoned")
            .balances
            .insert(address.clone(), amount);
        self
    }

    fn apply(&self, instruction: &Instruction) -> Result<Signature> {
        let payload = AgreementInstruction::decode(&instruction.data)?;
        let mut state = self.state.lock().expect("ledger state poisoned");

        let [agreement_meta, authority_meta] = instruction.accounts.as_slice() else {
            return Err(LedgerError::rejected(
                "agreement instructions take exactly two accounts",
            ));
        };
        if !authority_meta.is_signer {
            return Err(LedgerError::rejected("authority did not sign"));
        }
        let agreement_address = agreement_meta.address.clone();
        let authority = authority_meta.address.clone();

        match payload {
            AgreementInstruction::Initialize { state: agreement, rent } => {
                if authority != agreement.owner {
                    return Err(LedgerError::rejected("create must be signed by the owner"));
                }
                if state.accounts.contains_key(&agreement_address) {
                    return Err(LedgerError::rejected("account already exists"));
                }
                debit(&mut state.balances, &authority, rent)?;
                let data = serde_json::to_vec(&agreement)?;
                state.accounts.insert(agreement_address, data);
            }

            AgreementInstruction::Execute { payment } => {
                let mut agreement = load_agreement(&state, &agreement_address)?;
                if !agreement.status.can_transition_to(AgreementStatus::Executed) {
                    return Err(LedgerError::rejected(format!(
                        "cannot execute agreement in '{}' state",
                        agreement.status
                    )));
                }
                if authority != agreement.counterparty {
                    return Err(LedgerError::rejected(
                        "only the counterparty may execute",
                    ));
                }
                debit(&mut state.balances, &authority, payment)?;
                credit(&mut state.balances, &agreement.owner, payment);
                agreement.status = AgreementStatus::Executed;
                let data = serde_json::to_vec(&agreement)?;
                state.accounts.insert(agreement_address, data);
            }

            AgreementInstruction::Revoke => {
                let mut agreement = load_agreement(&state, &agreement_address)?;
                if !agreement.status.can_transition_to(AgreementStatus::Revoked) {
                    return Err(LedgerError::rejected(format!(
                        "cannot revoke agreement in '{}' state",
                        agreement.status
                    )));
                }
                if authority != agreement.owner {
                    return Err(LedgerError::rejected("only the owner may revoke"));
                }
                agreement.status = AgreementStatus::Revoked;
                let data = serde_json::to_vec(&agreement)?;
                state.accounts.insert(agreement_address, data);
            }
        }

        let signature = fresh_signature();
        state.confirmed.insert(signature.clone());
        Ok(signature)
    }
}

fn load_agreement(state: &LedgerState, address: &Address) -> Result<AgreementState> {
    let data = state
        .accounts
        .get(address)
        .ok_or_else(|| LedgerError::not_found(address.as_str()))?;
    Ok(serde_json::from_slice(data)?)
}

fn debit(balances: &mut HashMap<Address, u64>, address: &Address, amount: u64) -> Result<()> {
    let available = balances.get(address).copied().unwrap_or(0);
    if available < amount {
        return Err(LedgerError::InsufficientFunds {
            required: amount,
            available,
        });
    }
    balances.insert(address.clone(), available - amount);
    Ok(())
}

fn credit(balances: &mut HashMap<Address, u64>, address: &Address, amount: u64) {
    *balances.entry(address.clone()).or_insert(0) += amount;
}

fn fresh_signature() -> Signature {
    Signature::new(Uuid::new_v4().simple().to_string())
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn submit(&self, instruction: &Instruction) -> Result<Signature> {
        self.apply(instruction)
    }

    async fn account_data(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        let state = self.state.lock().expect("ledger state poisoned");
        Ok(state.accounts.get(address).cloned())
    }

    async fn minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64> {
        Ok(size as u64 * RENT_PER_BYTE)
    }

    async fn confirm(&self, signature: &Signature) -> Result<bool> {
        let state = self.state.lock().expect("ledger state poisoned");
        Ok(state.confirmed.contains(signature))
    }

    async fn balance(&self, address: &Address) -> Result<u64> {
        let state = self.state.lock().expect("ledger state poisoned");
        Ok(state.balances.get(address).copied().unwrap_or(0))
    }

    async fn transfer(&self, from: &Signer, to: &Address, amount: u64) -> Result<Signature> {
        let mut state = self.state.lock().expect("ledger state poisoned");
        debit(&mut state.balances, from.address(), amount)?;
        credit(&mut state.balances, to, amount);
        let signature = fresh_signature();
        state.confirmed.insert(signature.clone());
        Ok(signature)
    }
}
