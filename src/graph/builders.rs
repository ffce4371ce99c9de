//! Graph building logic for one expanded address.
//!
//! [`build`] turns a page of canonical transactions into a disposable
//! [`GraphSnapshot`] fragment centered on the subject address:
//! - subject spends in the transaction: one outgoing edge per paid output
//! - subject only receives: one incoming edge per distinct input address
//!
//! Incoming edges all carry the transaction's full net value for the subject
//! rather than a per-input share, so summing incoming edge values over a
//! multi-input transaction overstates what the subject received.

use std::collections::HashSet;

use crate::constants::satoshis_to_btc;
use crate::domain::Transaction;

use super::types::{DirectionColor, GraphEdge, GraphNode, GraphSnapshot};

/// Build the graph fragment for `subject` from one page of its transactions.
///
/// Pure and deterministic. The subject is always present as a node, even
/// when no transaction produces an edge.
#[must_use]
pub fn build(subject: &str, transactions: &[Transaction]) -> GraphSnapshot {
    let mut graph = GraphSnapshot::new();
    graph.insert_node(GraphNode::address(subject));

    for txn in transactions {
        add_transaction(&mut graph, subject, txn);
    }

    graph
}

fn add_transaction(graph: &mut GraphSnapshot, subject: &str, txn: &Transaction) {
    let is_sender = txn.input_addresses().any(|a| a == subject);
    let is_receiver = txn.output_addresses().any(|a| a == subject);

    if is_sender {
        for output in &txn.outputs {
            let Some(target) = output.address.as_deref() else {
                continue;
            };
            let value = output.value.unwrap_or(0);
            if target == subject || value == 0 {
                continue;
            }
            graph.insert_edge(GraphEdge {
                source: subject.to_string(),
                target: target.to_string(),
                value: satoshis_to_btc(value),
                transaction_hash: txn.hash.clone(),
                direction_color: DirectionColor::Outgoing,
            });
        }
    } else if is_receiver {
        let value = satoshis_to_btc(txn.net_result_for_subject_address.unsigned_abs());
        let mut seen = HashSet::new();

        for source in txn.input_addresses() {
            if !seen.insert(source) {
                continue;
            }
            graph.insert_edge(GraphEdge {
                source: source.to_string(),
                target: subject.to_string(),
                value,
                transaction_hash: txn.hash.clone(),
                direction_color: DirectionColor::Incoming,
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
