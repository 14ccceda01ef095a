//! Dataset purchase settlement.

use crate::client::{Address, LedgerClient, Signer};
use crate::error::{LedgerError, Result};
use chrono::Utc;
use market_core::{DatasetId, Transaction, TransactionStatus};
use std::time::Duration;
use tracing::info;

/// Base units per marketplace token.
pub const BASE_UNITS_PER_TOKEN: u64 = 1_000_000_000;

/// Converts a token amount to base units, rounding to the nearest unit.
pub fn tokens_to_base_units(tokens: f64) -> u64 {
    (tokens * BASE_UNITS_PER_TOKEN as f64).round() as u64
}

/// Settles a dataset purchase: verifies the buyer can cover the amount,
/// transfers it to the seller, and returns the completed transaction
/// record, ready for the content store's journal.
///
/// Both ledger calls are bounded by `timeout`. A short balance fails with
/// [`LedgerError::InsufficientFunds`] before anything is submitted.
pub async fn process_purchase<C: LedgerClient>(
    client: &C,
    buyer: &Signer,
    seller: &Address,
    dataset_id: &DatasetId,
    amount_tokens: f64,
    timeout: Duration,
) -> Result<Transaction> {
    let required = tokens_to_base_units(amount_tokens);

    let available = bounded(timeout, "balance", client.balance(buyer.address())).await?;
    if available < required {
        return Err(LedgerError::InsufficientFunds {
            required,
            available,
        });
    }

    let signature = bounded(
        timeout,
        "transfer",
        client.transfer(buyer, seller, required),
    )
    .await?;

    info!(dataset = %dataset_id, amount = amount_tokens, "purchase settled");
    Ok(Transaction {
        transaction_id: signature.to_string(),
        seller_address: seller.to_string(),
        buyer_address: buyer.address().to_string(),
        dataset_id: dataset_id.clone(),
        amount: amount_tokens,
        timestamp: Utc::now(),
        status: TransactionStatus::Completed,
    })
}

async fn bounded<T>(
    timeout: Duration,
    operation: &str,
    call: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| LedgerError::Timeout {
            operation: operation.to_string(),
            after: timeout,
        })?
}
