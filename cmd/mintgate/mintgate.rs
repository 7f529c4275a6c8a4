mod cli;
mod initializers;
mod report;

use std::path::Path;

use clap::Parser;
use mintgate_common::allowlist::Allowlist;
use mintgate_common::merkle_tree::MerkleTree;
use tracing::info;

use crate::cli::CLI;

fn main() -> eyre::Result<()> {
    let CLI { opts } = CLI::parse();
    initializers::init_tracing(&opts);

    let allowlist = Allowlist::try_from(Path::new(&opts.allowlist))?;
    info!(
        "Loaded {} allowlisted addresses from {}",
        allowlist.len(),
        opts.allowlist
    );

    let tree = MerkleTree::build(allowlist.leaves())?;
    info!("Built Merkle tree with {} leaves", tree.leaf_count());

    let output = report::render(&allowlist, &tree)?;
    print!("{output}");

    Ok(())
}
