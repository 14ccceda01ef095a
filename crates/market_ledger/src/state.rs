//! Agreement state machine.

use crate::client::Address;
use market_core::DatasetId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a data-access agreement.
///
/// `Pending` is the only non-terminal state: an agreement may move to
/// `Executed` (settled) or `Revoked` (cancelled), and neither terminal
/// state permits further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    /// Created and confirmed, awaiting execution or revocation
    Pending,
    /// Payment settled; terminal
    Executed,
    /// Cancelled by the owner; terminal
    Revoked,
}

impl AgreementStatus {
    /// Returns true for terminal states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AgreementStatus::Pending)
    }

    /// Whether the state machine permits moving to `next`.
    pub fn can_transition_to(&self, next: AgreementStatus) -> bool {
        matches!(
            (self, next),
            (AgreementStatus::Pending, AgreementStatus::Executed)
                | (AgreementStatus::Pending, AgreementStatus::Revoked)
        )
    }

    /// Returns the lowercase wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementStatus::Pending => "pending",
            AgreementStatus::Executed => "executed",
            AgreementStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The on-chain payload of a data-access agreement.
///
/// Stored as the agreement account's data; decoded snapshots of this type
/// are what `verify_agreement` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementState {
    /// Dataset owner (seller); may revoke a pending agreement
    pub owner: Address,

    /// Counterparty (buyer); may execute a pending agreement
    pub counterparty: Address,

    /// Dataset the agreement grants access to
    pub dataset_id: DatasetId,

    /// Access duration in seconds from execution
    pub access_duration_secs: u64,

    /// Agreed price in base units
    pub price: u64,

    /// Current lifecycle state
    pub status: AgreementStatus,
}
