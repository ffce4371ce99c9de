//! Canonical transaction records.
//!
//! Every ledger provider is normalized into these shapes before the graph
//! builder sees them, so graph semantics never depend on which API answered.

use serde::{Deserialize, Serialize};

// ============================================================================
// Inputs and Outputs
// ============================================================================

/// One spent output consumed by a transaction.
///
/// `address` is `None` when the previous output cannot be resolved to an
/// address (non-standard scripts, coinbase inputs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Address that owned the spent output.
    pub address: Option<String>,
    /// Value of the spent output in satoshis.
    pub value: Option<u64>,
}

/// One output created by a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Address receiving the output.
    pub address: Option<String>,
    /// Value of the output in satoshis.
    pub value: Option<u64>,
}

// ============================================================================
// Transaction
// ============================================================================

/// A transaction as seen from the address it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id.
    pub hash: String,
    /// Spent outputs.
    pub inputs: Vec<TransactionInput>,
    /// Created outputs.
    pub outputs: Vec<TransactionOutput>,
    /// Net satoshi change for the subject address: positive on receipt,
    /// negative on send.
    pub net_result_for_subject_address: i64,
    /// Confirmation time in unix seconds, `None` while unconfirmed.
    pub time: Option<i64>,
}

impl Transaction {
    /// Defined input addresses, in input order.
    pub fn input_addresses(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().filter_map(|i| i.address.as_deref())
    }

    /// Defined output addresses, in output order.
    pub fn output_addresses(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().filter_map(|o| o.address.as_deref())
    }
}

/// Net satoshi change for `subject` given `(owner addresses, value)` pairs for
/// outputs and inputs.
///
/// An entry counts toward the subject when any of its owner addresses matches,
/// which matters for multisig outputs that list several addresses.
///
/// Returns `None` when the amounts do not fit in an `i64`.
#[must_use]
pub fn net_result_for<'a, O, I>(subject: &str, outputs: O, inputs: I) -> Option<i64>
where
    O: IntoIterator<Item = (&'a [String], u64)>,
    I: IntoIterator<Item = (&'a [String], u64)>,
{
    owned_by(subject, outputs)?.checked_sub(owned_by(subject, inputs)?)
}

fn owned_by<'a>(
    subject: &str,
    entries: impl IntoIterator<Item = (&'a [String], u64)>,
) -> Option<i64> {
    entries
        .into_iter()
        .filter(|(owners, _)| owners.iter().any(|a| a == subject))
        .try_fold(0i64, |total, (_, value)| {
            total.checked_add(i64::try_from(value).ok()?)
        })
}

// ============================================================================
// Address Summary
// ============================================================================

/// One page of an address's history plus its account totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    /// The address the page was fetched for.
    pub address: String,
    /// Total number of transactions the provider knows for the address.
    pub transaction_count: u64,
    /// Lifetime satoshis received.
    pub total_received: u64,
    /// Lifetime satoshis sent.
    pub total_sent: u64,
    /// Current balance in satoshis.
    pub final_balance: i64,
    /// The transactions on this page.
    pub transactions: Vec<Transaction>,
}

// ============================================================================
// Tests
// ============================================================================
