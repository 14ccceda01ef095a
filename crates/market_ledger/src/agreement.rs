//! Agreement lifecycle operations.

use crate::client::{Address, LedgerClient, Signature, Signer};
use crate::error::{LedgerError, Result};
use crate::instruction::{AccountMeta, AgreementInstruction, Instruction};
use crate::state::{AgreementState, AgreementStatus};
use market_core::DatasetId;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Default bound for individual ledger calls.
pub const DEFAULT_LEDGER_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the agreement program on an external ledger.
///
/// Builds and submits the instructions that drive an agreement through its
/// lifecycle, and decodes on-chain snapshots. Every ledger call is bounded
/// by the configured timeout; a timed-out call maps to
/// [`LedgerError::Timeout`] and must be treated as unresolved — re-query
/// with [`AgreementClient::verify_agreement`] rather than resubmitting.
pub struct AgreementClient<C: LedgerClient> {
    client: C,
    program_id: Address,
    timeout: Duration,
}

impl<C: LedgerClient> AgreementClient<C> {
    /// Creates a client for the given program with the default timeout.
    pub fn new(client: C, program_id: Address) -> Self {
        Self::with_timeout(client, program_id, DEFAULT_LEDGER_TIMEOUT)
    }

    /// Creates a client with a caller-supplied per-call timeout.
    pub fn with_timeout(client: C, program_id: Address, timeout: Duration) -> Self {
        Self {
            client,
            program_id,
            timeout,
        }
    }

    /// Returns the underlying ledger client.
    pub fn ledger(&self) -> &C {
        &self.client
    }

    /// Creates a data-sharing agreement on the ledger.
    ///
    /// Sizes the agreement account to the serialized state, reserves the
    /// rent-exemption balance from the owner, submits the combined
    /// create+initialize instruction, and blocks until the ledger confirms
    /// it — so a returned agreement address always refers to an on-chain
    /// `pending` record. Nothing persists locally on failure.
    pub async fn create_agreement(
        &self,
        owner: &Signer,
        counterparty: &Address,
        dataset_id: DatasetId,
        access_duration: Duration,
        price: u64,
    ) -> Result<(Address, Signature)> {
        let agreement_address = Address::generate();
        let state = AgreementState {
            owner: owner.address().clone(),
            counterparty: counterparty.clone(),
            dataset_id,
            access_duration_secs: access_duration.as_secs(),
            price,
            status: AgreementStatus::Pending,
        };

        let space = serde_json::to_vec(&state)?.len();
        let rent = self
            .bounded(
                "minimum_balance_for_rent_exemption",
                self.client.minimum_balance_for_rent_exemption(space),
            )
            .await?;

        let instruction = Instruction {
            program_id: self.program_id.clone(),
            accounts: vec![
                AccountMeta::writable(agreement_address.clone(), true),
                AccountMeta::readonly(owner.address().clone(), true),
            ],
            data: AgreementInstruction::Initialize { state, rent }.encode()?,
        };

        let signature = self.bounded("submit", self.client.submit(&instruction)).await?;
        let confirmed = self.bounded("confirm", self.client.confirm(&signature)).await?;
        if !confirmed {
            return Err(LedgerError::Submission(
                "create instruction was not confirmed".to_string(),
            ));
        }

        info!(agreement = %agreement_address, "agreement created");
        Ok((agreement_address, signature))
    }

    /// Executes a pending agreement, transferring the payment from the
    /// counterparty to the owner.
    ///
    /// Requires the counterparty's authority. Whether the counterparty can
    /// actually cover the payment is the caller's concern; the ledger
    /// rejects the instruction if not. Returns the submission signature
    /// without waiting for confirmation.
    pub async fn execute_agreement(
        &self,
        agreement: &Address,
        counterparty: &Signer,
        payment: u64,
    ) -> Result<Signature> {
        let instruction = Instruction {
            program_id: self.program_id.clone(),
            accounts: vec![
                AccountMeta::writable(agreement.clone(), false),
                AccountMeta::writable(counterparty.address().clone(), true),
            ],
            data: AgreementInstruction::Execute { payment }.encode()?,
        };

        let signature = self.bounded("submit", self.client.submit(&instruction)).await?;
        info!(agreement = %agreement, payment, "agreement execution submitted");
        Ok(signature)
    }

    /// Fetches and decodes the agreement's on-chain state.
    pub async fn verify_agreement(&self, agreement: &Address) -> Result<AgreementState> {
        let data = self
            .bounded("account_data", self.client.account_data(agreement))
            .await?
            .ok_or_else(|| LedgerError::not_found(agreement.as_str()))?;
        let state: AgreementState = serde_json::from_slice(&data)?;
        Ok(state)
    }

    /// Revokes a pending agreement.
    ///
    /// Requires the owner's authority; the ledger rejects revocation of
    /// non-pending agreements and non-owner signers. Returns the submission
    /// signature without waiting for confirmation.
    pub async fn revoke_agreement(&self, agreement: &Address, owner: &Signer) -> Result<Signature> {
        let instruction = Instruction {
            program_id: self.program_id.clone(),
            accounts: vec![
                AccountMeta::writable(agreement.clone(), false),
                AccountMeta::readonly(owner.address().clone(), true),
            ],
            data: AgreementInstruction::Revoke.encode()?,
        };

        let signature = self.bounded("submit", self.client.submit(&instruction)).await?;
        info!(agreement = %agreement, "agreement revocation submitted");
        Ok(signature)
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| LedgerError::Timeout {
                operation: operation.to_string(),
                after: self.timeout,
            })?
    }
}
