//! Lifecycle tests for the agreement protocol against the in-memory
//! ledger: creation confirms as pending, terminal states reject further
//! transitions, and payments settle with balance checks.

use async_trait::async_trait;
use market_core::DatasetId;
use market_ledger::{
    process_purchase, Address, AgreementClient, AgreementStatus, Instruction, LedgerClient,
    LedgerError, MemoryLedger, Signature, Signer,
};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);
const PRICE: u64 = 5_000_000_000;

fn dataset() -> DatasetId {
    DatasetId::from("dataset_20240101000000_abcdef012345")
}

fn client_with_parties() -> (AgreementClient<MemoryLedger>, Signer, Signer) {
    let owner = Signer::generate();
    let buyer = Signer::generate();
    let ledger = MemoryLedger::new()
        .with_balance(owner.address(), 10_000_000)
        .with_balance(buyer.address(), 20_000_000_000);
    let client = AgreementClient::with_timeout(ledger, Address::new("agreement_program"), TIMEOUT);
    (client, owner, buyer)
}

#[tokio::test]
async fn test_fresh_agreement_verifies_as_pending() {
    let (client, owner, buyer) = client_with_parties();

    let (address, signature) = client
        .create_agreement(
            &owner,
            buyer.address(),
            dataset(),
            Duration::from_secs(86_400),
            PRICE,
        )
        .await
        .unwrap();

    // create blocks until confirmed
    assert!(client.ledger().confirm(&signature).await.unwrap());

    let state = client.verify_agreement(&address).await.unwrap();
    assert_eq!(state.status, AgreementStatus::Pending);
    assert_eq!(&state.owner, owner.address());
    assert_eq!(&state.counterparty, buyer.address());
    assert_eq!(state.price, PRICE);
}

#[tokio::test]
async fn test_execute_settles_payment_and_transitions() {
    let (client, owner, buyer) = client_with_parties();
    let (address, _) = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(3600), PRICE)
        .await
        .unwrap();

    let owner_before = client.ledger().balance(owner.address()).await.unwrap();
    client
        .execute_agreement(&address, &buyer, PRICE)
        .await
        .unwrap();

    let state = client.verify_agreement(&address).await.unwrap();
    assert_eq!(state.status, AgreementStatus::Executed);

    let owner_after = client.ledger().balance(owner.address()).await.unwrap();
    assert_eq!(owner_after, owner_before + PRICE);
}

#[tokio::test]
async fn test_revoke_after_execute_is_rejected() {
    let (client, owner, buyer) = client_with_parties();
    let (address, _) = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(3600), PRICE)
        .await
        .unwrap();
    client
        .execute_agreement(&address, &buyer, PRICE)
        .await
        .unwrap();

    let result = client.revoke_agreement(&address, &owner).await;
    assert!(matches!(result, Err(LedgerError::Rejected(_))));

    // State is unchanged
    let state = client.verify_agreement(&address).await.unwrap();
    assert_eq!(state.status, AgreementStatus::Executed);
}

#[tokio::test]
async fn test_execute_after_revoke_is_rejected() {
    let (client, owner, buyer) = client_with_parties();
    let (address, _) = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(3600), PRICE)
        .await
        .unwrap();
    client.revoke_agreement(&address, &owner).await.unwrap();

    let result = client.execute_agreement(&address, &buyer, PRICE).await;
    assert!(matches!(result, Err(LedgerError::Rejected(_))));

    let state = client.verify_agreement(&address).await.unwrap();
    assert_eq!(state.status, AgreementStatus::Revoked);
}

#[tokio::test]
async fn test_only_owner_may_revoke() {
    let (client, owner, buyer) = client_with_parties();
    let (address, _) = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(3600), PRICE)
        .await
        .unwrap();

    let stranger = Signer::generate();
    let result = client.revoke_agreement(&address, &stranger).await;
    assert!(matches!(result, Err(LedgerError::Rejected(_))));
}

#[tokio::test]
async fn test_only_counterparty_may_execute() {
    let (client, owner, buyer) = client_with_parties();
    let (address, _) = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(3600), PRICE)
        .await
        .unwrap();

    let result = client.execute_agreement(&address, &owner, PRICE).await;
    assert!(matches!(result, Err(LedgerError::Rejected(_))));
}

#[tokio::test]
async fn test_verify_missing_agreement_is_not_found() {
    let (client, _, _) = client_with_parties();
    let result = client.verify_agreement(&Address::generate()).await;
    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[tokio::test]
async fn test_create_requires_rent_balance() {
    let broke_owner = Signer::generate();
    let buyer = Signer::generate();
    let ledger = MemoryLedger::new(); // no balances at all
    let client = AgreementClient::with_timeout(ledger, Address::new("agreement_program"), TIMEOUT);

    let result = client
        .create_agreement(&broke_owner, buyer.address(), dataset(), Duration::from_secs(60), PRICE)
        .await;
    assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
}

#[tokio::test]
async fn test_purchase_settles_and_produces_record() {
    let buyer = Signer::generate();
    let seller = Address::generate();
    let ledger = MemoryLedger::new().with_balance(buyer.address(), 10_000_000_000);

    let tx = process_purchase(&ledger, &buyer, &seller, &dataset(), 2.5, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(tx.amount, 2.5);
    assert_eq!(tx.buyer_address, buyer.address().to_string());
    assert_eq!(tx.seller_address, seller.to_string());
    assert_eq!(ledger.balance(&seller).await.unwrap(), 2_500_000_000);
}

#[tokio::test]
async fn test_purchase_with_short_balance_submits_nothing() {
    let buyer = Signer::generate();
    let seller = Address::generate();
    let ledger = MemoryLedger::new().with_balance(buyer.address(), 1_000);

    let result = process_purchase(&ledger, &buyer, &seller, &dataset(), 2.5, TIMEOUT).await;
    assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
    assert_eq!(ledger.balance(&seller).await.unwrap(), 0);
}

/// Ledger wrapper that stalls every call, for timeout coverage.
struct StallingLedger;

#[async_trait]
impl LedgerClient for StallingLedger {
    async fn submit(&self, _instruction: &Instruction) -> Result<Signature, LedgerError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Signature::new("never"))
    }

    async fn account_data(&self, _address: &Address) -> Result<Option<Vec<u8>>, LedgerError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    async fn minimum_balance_for_rent_exemption(&self, _size: usize) -> Result<u64, LedgerError> {
        Ok(0)
    }

    async fn confirm(&self, _signature: &Signature) -> Result<bool, LedgerError> {
        Ok(true)
    }

    async fn balance(&self, _address: &Address) -> Result<u64, LedgerError> {
        Ok(0)
    }

    async fn transfer(
        &self,
        _from: &Signer,
        _to: &Address,
        _amount: u64,
    ) -> Result<Signature, LedgerError> {
        Ok(Signature::new("unused"))
    }
}

#[tokio::test]
async fn test_stalled_submission_times_out() {
    let client = AgreementClient::with_timeout(
        StallingLedger,
        Address::new("agreement_program"),
        Duration::from_millis(20),
    );
    let owner = Signer::generate();
    let buyer = Signer::generate();

    let result = client
        .create_agreement(&owner, buyer.address(), dataset(), Duration::from_secs(60), PRICE)
        .await;
    assert!(matches!(result, Err(LedgerError::Timeout { .. })));
}
