//! BlockCypher `addrs/{address}/full` adapter.
//!
//! BlockCypher paginates by block height rather than by offset, so a page at
//! offset `n` is fetched by asking for `n + page_size` transactions and keeping
//! the last `page_size` of them.

use serde::Deserialize;

use crate::constants::BLOCKCYPHER_PAGE_SIZE;
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
    n_tx: Option<u64>,
    #[serde(default)]
    total_received: u64,
    #[serde(default)]
    total_sent: u64,
    final_balance: Option<i64>,
    balance: Option<i64>,
    #[serde(default)]
    txs: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    hash: String,
    #[serde(default)]
    inputs: Vec<RawInput>,
    #[serde(default)]
    outputs: Vec<RawOutput>,
    confirmed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    #[serde(default)]
    addresses: Option<Vec<String>>,
    output_value: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    #[serde(default)]
    addresses: Option<Vec<String>>,
    value: Option<u64>,
}

// ============================================================================
// Request / Normalization
// ============================================================================

/// Build the request URL for the page starting at `offset`.
pub(crate) fn summary_url(base_url: &str, address: &str, offset: usize) -> String {
    format!(
        "{}/v1/btc/main/addrs/{}/full?limit={}",
        base_url.trim_end_matches('/'),
        address,
        offset + BLOCKCYPHER_PAGE_SIZE
    )
}

/// Normalize a BlockCypher response body into an [`AddressSummary`].
///
/// # Errors
///
/// Returns `ExplorerError::Upstream` when the body does not match the expected
/// shape, a confirmation timestamp is not RFC 3339, or its amounts overflow.
pub(crate) fn normalize(
    body: &str,
    subject: &str,
    offset: usize,
) -> Result<AddressSummary, ExplorerError> {
    let raw: RawAddress = serde_json::from_str(body)
        .map_err(|e| ExplorerError::upstream(format!("Unexpected BlockCypher response: {e}")))?;

    let transactions = raw
        .txs
        .iter()
        .skip(offset)
        .take(BLOCKCYPHER_PAGE_SIZE)
        .map(|tx| normalize_transaction(tx, subject))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AddressSummary {
        address: raw.address,
        transaction_count: raw.n_tx.unwrap_or(transactions.len() as u64),
        total_received: raw.total_received,
        total_sent: raw.total_sent,
        final_balance: raw.final_balance.or(raw.balance).unwrap_or(0),
        transactions,
    })
}

fn normalize_transaction(tx: &RawTransaction, subject: &str) -> Result<Transaction, ExplorerError> {
    let time = tx
        .confirmed
        .as_deref()
        .map(|confirmed| {
            chrono::DateTime::parse_from_rfc3339(confirmed)
                .map(|dt| dt.timestamp())
                .map_err(|e| {
                    ExplorerError::upstream(format!(
                        "Invalid confirmation time '{confirmed}' in {}: {e}",
                        tx.hash
                    ))
                })
        })
        .transpose()?;

    let net = net_result_for(
        subject,
        tx.outputs
            .iter()
            .map(|o| (owners(&o.addresses), o.value.unwrap_or(0))),
        tx.inputs
            .iter()
            .map(|i| (owners(&i.addresses), i.output_value.unwrap_or(0))),
    )
    .ok_or_else(|| ExplorerError::upstream(format!("Amounts out of range in {}", tx.hash)))?;

    Ok(Transaction {
        hash: tx.hash.clone(),
        inputs: tx
            .inputs
            .iter()
            .map(|i| TransactionInput {
                address: first_address(&i.addresses),
                value: i.output_value,
            })
            .collect(),
        outputs: tx
            .outputs
            .iter()
            .map(|o| TransactionOutput {
                address: first_address(&o.addresses),
                value: o.value,
            })
            .collect(),
        net_result_for_subject_address: net,
        time,
    })
}

fn owners(addresses: &Option<Vec<String>>) -> &[String] {
    addresses.as_deref().unwrap_or_default()
}

fn first_address(addresses: &Option<Vec<String>>) -> Option<String> {
    owners(addresses).first().cloned()
}

// ============================================================================
// Tests
// ============================================================================
