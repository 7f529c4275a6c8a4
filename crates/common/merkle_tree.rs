//! Commutative Keccak-256 Merkle tree for allowlist membership proofs.
//!
//! Roots and proofs produced here are compatible with OpenZeppelin's
//! MerkleProof.sol: pairs are sorted byte-wise before hashing, so
//! H(a, b) == H(b, a) and a proof carries no position bits.
//!
//! See: https://docs.openzeppelin.com/contracts/5.x/api/utils#MerkleProof

use crate::{Address, H256};
use keccak_hash::keccak;

/// A fully materialized binary Merkle tree.
///
/// Every level is retained so that, after a single build, the proof for any
/// leaf is read off the stored levels without re-hashing the tree.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `levels[0]` are the leaves, the last level holds the root.
    levels: Vec<Vec<H256>>,
}

#[derive(Debug, thiserror::Error)]
pub enum MerkleTreeError {
    #[error("Cannot build a Merkle tree without leaves")]
    NoLeaves,
    #[error("Leaf index {index} out of range for a tree with {leaves} leaves")]
    LeafIndexOutOfRange { index: usize, leaves: usize },
}

/// Compute the leaf digest for an address: Keccak-256 over the 20 address
/// bytes, equivalent to Solidity's `keccak256(abi.encodePacked(addr))`.
pub fn hash_leaf(address: &Address) -> H256 {
    keccak(address.as_bytes())
}

impl MerkleTree {
    /// Build the tree bottom-up from the given leaf digests.
    ///
    /// When a level has an odd node count, the last node is promoted to the
    /// next level unchanged.
    pub fn build(leaves: Vec<H256>) -> Result<Self, MerkleTreeError> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::NoLeaves);
        }

        let mut levels = Vec::new();
        let mut current = leaves;
        while current.len() > 1 {
            let next = merkle_next_level(&current);
            levels.push(current);
            current = next;
        }
        levels.push(current);

        Ok(Self { levels })
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or_default()
    }

    /// The root digest. For a single-leaf tree this is the leaf itself.
    pub fn root(&self) -> H256 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default()
    }

    /// Compute the proof for the leaf at `index`: the sibling digests from
    /// leaf level to root, suitable for OpenZeppelin's MerkleProof.verify().
    ///
    /// A node promoted past a level with no sibling contributes nothing to
    /// the proof, so proofs in a non-power-of-two tree differ in length.
    pub fn proof(&self, index: usize) -> Result<Vec<H256>, MerkleTreeError> {
        let leaves = self.leaf_count();
        if index >= leaves {
            return Err(MerkleTreeError::LeafIndexOutOfRange { index, leaves });
        }

        let mut proof = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = if idx.is_multiple_of(2) {
                idx.wrapping_add(1)
            } else {
                idx.wrapping_sub(1)
            };
            if let Some(sibling) = level.get(sibling_idx) {
                proof.push(*sibling);
            }
            idx /= 2;
        }

        Ok(proof)
    }
}

/// Build the next level from the current one: hash adjacent pairs, promote a
/// trailing unpaired node as-is.
fn merkle_next_level(current: &[H256]) -> Vec<H256> {
    let mut next = Vec::with_capacity(current.len().div_ceil(2));
    for pair in current.chunks(2) {
        match pair {
            [left, right] => next.push(commutative_hash(left, right)),
            [single] => next.push(*single),
            _ => {}
        }
    }
    next
}

/// Commutative Keccak-256: the smaller digest is hashed first, matching
/// OpenZeppelin's `_hashPair`.
fn commutative_hash(a: &H256, b: &H256) -> H256 {
    let mut data = [0u8; 64];
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    data[..32].copy_from_slice(first.as_bytes());
    data[32..].copy_from_slice(second.as_bytes());
    keccak(data)
}
