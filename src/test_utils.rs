//! Shared test utilities and Mother pattern factories.
//!
//! Use these helpers to avoid copy-pasting transaction setup and provider
//! payloads across tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use crate::client::LedgerSource;
use crate::domain::{
    AddressSummary, ExplorerError, Transaction, TransactionInput, TransactionOutput,
    net_result_for,
};

// ============================================================================
// Addresses
// ============================================================================

pub const ADDR_A: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
pub const ADDR_B: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";
pub const ADDR_C: &str = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy";
pub const ADDR_D: &str = "1dice8EMZmqKvrGE4Qc9bUFf9PX3xaYDp";

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct TransactionMother;

impl TransactionMother {
    /// `from` spends one input of `input_value` into `outputs`.
    #[must_use]
    pub fn send(hash: &str, from: &str, input_value: u64, outputs: &[(&str, u64)]) -> Transaction {
        let inputs = vec![(from, input_value)];
        Self::build(hash, from, &inputs, outputs)
    }

    /// `to` receives `net` satoshis from `inputs` in a single output.
    #[must_use]
    pub fn receive(hash: &str, inputs: &[(&str, u64)], to: &str, net: i64) -> Transaction {
        let mut txn = Self::build(hash, to, inputs, &[(to, net.unsigned_abs())]);
        txn.net_result_for_subject_address = net;
        txn
    }

    fn build(
        hash: &str,
        subject: &str,
        inputs: &[(&str, u64)],
        outputs: &[(&str, u64)],
    ) -> Transaction {
        let owned = |entries: &[(&str, u64)]| -> Vec<(Vec<String>, u64)> {
            entries
                .iter()
                .map(|(address, value)| (vec![(*address).to_string()], *value))
                .collect()
        };
        let (outs, ins) = (owned(outputs), owned(inputs));
        let net = net_result_for(
            subject,
            outs.iter().map(|(a, v)| (a.as_slice(), *v)),
            ins.iter().map(|(a, v)| (a.as_slice(), *v)),
        )
        .unwrap();

        Transaction {
            hash: hash.to_string(),
            inputs: inputs
                .iter()
                .map(|(address, value)| TransactionInput {
                    address: Some((*address).to_string()),
                    value: Some(*value),
                })
                .collect(),
            outputs: outputs
                .iter()
                .map(|(address, value)| TransactionOutput {
                    address: Some((*address).to_string()),
                    value: Some(*value),
                })
                .collect(),
            net_result_for_subject_address: net,
            time: Some(1_700_000_000),
        }
    }
}

pub struct SummaryMother;

impl SummaryMother {
    /// A page for `address` containing `transactions`.
    #[must_use]
    pub fn page(address: &str, transactions: Vec<Transaction>) -> AddressSummary {
        AddressSummary {
            address: address.to_string(),
            transaction_count: transactions.len() as u64,
            total_received: 0,
            total_sent: 0,
            final_balance: 0,
            transactions,
        }
    }
}

/// Provider payloads as they come over the wire.
pub struct JsonMother;

impl JsonMother {
    pub const SUBJECT: &'static str = ADDR_A;

    /// Two BlockCypher transactions: the subject spends 1 BTC keeping 0.4 as
    /// change, then receives 1.5 BTC alongside an unresolvable input.
    #[must_use]
    pub fn blockcypher_address() -> Value {
        json!({
            "address": Self::SUBJECT,
            "total_received": 150_000_000u64,
            "total_sent": 50_000_000u64,
            "balance": 100_000_000i64,
            "final_balance": 100_000_000i64,
            "n_tx": 2,
            "txs": [
                {
                    "hash": "send-hash",
                    "confirmed": "2024-01-01T00:00:00Z",
                    "inputs": [
                        { "addresses": [Self::SUBJECT], "output_value": 100_000_000u64 }
                    ],
                    "outputs": [
                        { "addresses": [ADDR_B], "value": 60_000_000u64 },
                        { "addresses": [Self::SUBJECT], "value": 40_000_000u64 }
                    ]
                },
                {
                    "hash": "receive-hash",
                    "inputs": [
                        { "addresses": [ADDR_C], "output_value": 150_010_000u64 },
                        { "addresses": null, "output_value": 10_000u64 }
                    ],
                    "outputs": [
                        { "addresses": [Self::SUBJECT], "value": 150_000_000u64 },
                        { "addresses": [ADDR_C], "value": 10_000u64 }
                    ]
                }
            ]
        })
    }

    /// `count` BlockCypher transactions `tx-0..`, each paying the subject.
    #[must_use]
    pub fn blockcypher_many(count: usize) -> Value {
        let txs: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "hash": format!("tx-{i}"),
                    "confirmed": "2024-01-01T00:00:00Z",
                    "inputs": [{ "addresses": [ADDR_B], "output_value": 2_000u64 }],
                    "outputs": [{ "addresses": [Self::SUBJECT], "value": 1_000u64 }]
                })
            })
            .collect();

        json!({
            "address": Self::SUBJECT,
            "n_tx": count,
            "final_balance": (count as i64) * 1_000,
            "txs": txs
        })
    }

    /// Two Blockchain.info transactions with a misleading `result` field.
    #[must_use]
    pub fn blockchain_info_address() -> Value {
        json!({
            "address": Self::SUBJECT,
            "n_tx": 7,
            "total_received": 35_000u64,
            "total_sent": 10_000u64,
            "final_balance": 25_000i64,
            "txs": [
                {
                    "hash": "bi-receive",
                    "time": 1_700_000_000i64,
                    "result": 999,
                    "inputs": [
                        { "prev_out": { "addr": ADDR_C, "value": 50_000u64 } },
                        {}
                    ],
                    "out": [
                        { "addr": Self::SUBJECT, "value": 30_000u64 },
                        { "addr": ADDR_C, "value": 19_000u64 }
                    ]
                },
                {
                    "hash": "bi-send",
                    "time": 1_700_000_600i64,
                    "result": 999,
                    "inputs": [
                        { "prev_out": { "addr": Self::SUBJECT, "value": 10_000u64 } }
                    ],
                    "out": [
                        { "addr": ADDR_B, "value": 5_000u64 },
                        { "addr": Self::SUBJECT, "value": 5_000u64 }
                    ]
                }
            ]
        })
    }
}

// ============================================================================
// MockLedger
// ============================================================================

/// In-memory [`LedgerSource`] with canned responses per `(address, offset)`.
///
/// Queued responses are consumed in order; an address/offset with nothing
/// queued answers with an empty page. Every call is logged.
pub struct MockLedger {
    page_size: usize,
    delay: Option<Duration>,
    responses: Mutex<HashMap<(String, usize), VecDeque<Result<AddressSummary, ExplorerError>>>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl MockLedger {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            delay: None,
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every fetch take `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a page of transactions for `address` at `offset`.
    pub fn push_page(&self, address: &str, offset: usize, transactions: Vec<Transaction>) {
        self.push(address, offset, Ok(SummaryMother::page(address, transactions)));
    }

    /// Queue a failure for `address` at `offset`.
    pub fn push_error(&self, address: &str, offset: usize, error: ExplorerError) {
        self.push(address, offset, Err(error));
    }

    fn push(&self, address: &str, offset: usize, response: Result<AddressSummary, ExplorerError>) {
        self.responses
            .lock()
            .unwrap()
            .entry((address.to_string(), offset))
            .or_default()
            .push_back(response);
    }

    /// All `(address, offset)` pairs requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl LedgerSource for MockLedger {
    fn page_size(&self) -> usize {
        self.page_size
    }

    async fn fetch_address_summary(
        &self,
        address: &str,
        page_offset: usize,
    ) -> Result<AddressSummary, ExplorerError> {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), page_offset));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&(address.to_string(), page_offset))
            .and_then(VecDeque::pop_front);

        queued.unwrap_or_else(|| Ok(SummaryMother::page(address, Vec::new())))
    }
}
