//! Port range partitioning.
//!
//! Splits the contiguous scan range into fixed-size batches, each consumed
//! by exactly one worker. Concatenated in order, the batches cover the
//! range exactly once: no gaps, no duplicates, no reordering.

use crate::types::{Port, PortRange};

/// An ordered run of ports assigned to a single worker.
pub type PortBatch = Vec<Port>;

/// Partition a port range into contiguous batches of at most `batch_size`
/// ports. The final batch may be shorter.
pub fn batch_ports(range: PortRange, batch_size: usize) -> Vec<PortBatch> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::with_capacity(range.len().div_ceil(batch_size));
    let mut current = PortBatch::with_capacity(batch_size);

    for port in range.iter() {
        current.push(port);
        if current.len() == batch_size {
            batches.push(std::mem::replace(
                &mut current,
                PortBatch::with_capacity(batch_size),
            ));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// Derive the batch size from the configured concurrency bound.
///
/// Half of the concurrency limit, minimum 1. A tunable policy trading
/// per-batch overhead against responsiveness, not a contract.
pub fn derive_batch_size(max_concurrency: usize) -> usize {
    (max_concurrency / 2).max(1)
}
