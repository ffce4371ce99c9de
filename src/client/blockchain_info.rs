//! Blockchain.info `rawaddr/{address}` adapter.

use serde::Deserialize;

use crate::constants::BLOCKCHAIN_INFO_PAGE_SIZE;
use crate::domain::{
    AddressSummary, ExplorerError, Transaction, TransactionInput, TransactionOutput,
    net_result_for,
};

// ============================================================================
// Raw Response Shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawAddress {
    address: String,
    n_tx: u64,
    total_received: u64,
    total_sent: u64,
    final_balance: i64,
    #[serde(default)]
    txs: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    hash: String,
    #[serde(default)]
    inputs: Vec<RawInput>,
    #[serde(default)]
    out: Vec<RawOutput>,
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    prev_out: Option<RawOutput>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    addr: Option<String>,
    value: Option<u64>,
}

// ============================================================================
// Request / Normalization
// ============================================================================

/// Build the request URL for the page starting at `offset`.
pub(crate) fn summary_url(base_url: &str, address: &str, offset: usize) -> String {
    format!(
        "{}/rawaddr/{}?limit={}&offset={}&cors=true",
        base_url.trim_end_matches('/'),
        address,
        BLOCKCHAIN_INFO_PAGE_SIZE,
        offset
    )
}

/// Normalize a Blockchain.info response body into an [`AddressSummary`].
///
/// The provider's own `result` field is ignored; the net change is recomputed
/// for `subject`.
///
/// # Errors
///
/// Returns `ExplorerError::Upstream` when the body does not match the expected
/// shape or its amounts overflow.
pub(crate) fn normalize(body: &str, subject: &str) -> Result<AddressSummary, ExplorerError> {
    let raw: RawAddress = serde_json::from_str(body).map_err(|e| {
        ExplorerError::upstream(format!("Unexpected Blockchain.info response: {e}"))
    })?;

    let transactions = raw
        .txs
        .iter()
        .map(|tx| normalize_transaction(tx, subject))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AddressSummary {
        address: raw.address,
        transaction_count: raw.n_tx,
        total_received: raw.total_received,
        total_sent: raw.total_sent,
        final_balance: raw.final_balance,
        transactions,
    })
}

fn normalize_transaction(tx: &RawTransaction, subject: &str) -> Result<Transaction, ExplorerError> {
    let empty = RawOutput::default();
    let prev_outs: Vec<&RawOutput> = tx
        .inputs
        .iter()
        .map(|i| i.prev_out.as_ref().unwrap_or(&empty))
        .collect();

    let net = net_result_for(
        subject,
        tx.out
            .iter()
            .map(|o| (o.addr.as_slice(), o.value.unwrap_or(0))),
        prev_outs
            .iter()
            .map(|p| (p.addr.as_slice(), p.value.unwrap_or(0))),
    )
    .ok_or_else(|| ExplorerError::upstream(format!("Amounts out of range in {}", tx.hash)))?;

    Ok(Transaction {
        hash: tx.hash.clone(),
        inputs: prev_outs
            .iter()
            .map(|p| TransactionInput {
                address: p.addr.clone(),
                value: p.value,
            })
            .collect(),
        outputs: tx
            .out
            .iter()
            .map(|o| TransactionOutput {
                address: o.addr.clone(),
                value: o.value,
            })
            .collect(),
        net_result_for_subject_address: net,
        time: tx.time,
    })
}

// ============================================================================
// Tests
// ============================================================================
