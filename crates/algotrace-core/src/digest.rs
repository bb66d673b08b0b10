//! BLAKE3 digests over traces.
//!
//! - Leaf hash: BLAKE3 over the CBOR encoding of one step (serialization is
//!   deterministic: settled sets are ordered, fields have a fixed order).
//! - Root: left-balanced binary Merkle fold over the leaves; the empty trace
//!   hashes to all zeros.
//!
//! Two traces with identical steps share a digest, which makes determinism
//! checks a single comparison.

use anyhow::Result;
use blake3::Hasher;

use crate::io::to_cbor;
use crate::step::Step;

/// Domain-separation prefix bound into every leaf.
const LEAF_TAG: &[u8] = b"algotrace/step/v1";

fn leaf_hash(step: &Step) -> Result<[u8; 32]> {
    let bytes = to_cbor(step)?;
    let mut h = Hasher::new();
    h.update(LEAF_TAG);
    h.update(&(bytes.len() as u64).to_le_bytes());
    h.update(&bytes);
    Ok(*h.finalize().as_bytes())
}

#[inline]
fn parent(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    let mut h = Hasher::new();
    h.update(&a);
    h.update(&b);
    *h.finalize().as_bytes()
}

fn merkle_root(mut leaves: Vec<[u8; 32]>) -> [u8; 32] {
    if leaves.is_empty() {
        return [0u8; 32];
    }
    while leaves.len() > 1 {
        let mut next = Vec::with_capacity(leaves.len().div_ceil(2));
        for pair in leaves.chunks(2) {
            match pair {
                [a, b] => next.push(parent(*a, *b)),
                // Promote odd leaf (left-balanced).
                [a] => next.push(*a),
                _ => unreachable!("chunks(2) yields 1 or 2 items"),
            }
        }
        leaves = next;
    }
    leaves[0]
}

/// Digest of a whole trace.
///
/// # Errors
/// Fails if a step cannot be CBOR-encoded.
pub fn trace_digest(steps: &[Step]) -> Result<[u8; 32]> {
    let leaves = steps.iter().map(leaf_hash).collect::<Result<Vec<_>>>()?;
    Ok(merkle_root(leaves))
}

/// Hex form of [`trace_digest`].
///
/// # Errors
/// Same as [`trace_digest`].
pub fn digest_hex(steps: &[Step]) -> Result<String> {
    Ok(hex::encode(trace_digest(steps)?))
}
