//! Plain-text rendering of the root and the per-address proofs. Formatting
//! only; the digests are taken as-is from the tree.

use mintgate_common::H256;
use mintgate_common::allowlist::{Allowlist, AllowlistEntry};
use mintgate_common::merkle_tree::{MerkleTree, MerkleTreeError};

pub fn root_line(root: H256) -> String {
    format!("Whitelist Merkle Root: {root:#x}")
}

/// One proof line. Siblings are comma-joined with no spaces or brackets; an
/// empty proof renders as an empty field.
pub fn entry_line(entry: &AllowlistEntry, index: usize, proof: &[H256]) -> String {
    let siblings = proof
        .iter()
        .map(|sibling| format!("{sibling:#x}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("Address: {} Index: {} Proof: {}", entry.text, index, siblings)
}

/// Render the whole report. Nothing is written to stdout until this returns,
/// so a failure mid-way never leaves a partial report behind.
pub fn render(allowlist: &Allowlist, tree: &MerkleTree) -> Result<String, MerkleTreeError> {
    let mut out = String::new();
    out.push_str(&root_line(tree.root()));
    out.push('\n');
    for (index, entry) in allowlist.entries().iter().enumerate() {
        let proof = tree.proof(index)?;
        out.push_str(&entry_line(entry, index, &proof));
        out.push('\n');
    }
    Ok(out)
}
