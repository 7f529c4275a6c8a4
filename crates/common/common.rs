pub use ethereum_types::*;
pub mod allowlist;
pub mod merkle_tree;
