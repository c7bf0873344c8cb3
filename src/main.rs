//! blockstore-ingester: block storage ingester entry point

use anyhow::Result;

fn main() -> Result<()> {
    blockstore_ingester::cli::run()
}
