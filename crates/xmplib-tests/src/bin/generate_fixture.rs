//! Writes synthetic library files for trying the CLI by hand.
//!
//! ```bash
//! cargo run -p xmplib-tests --bin generate_fixture -- target/fixtures
//! cargo run -p xmplib-cli -- dump target/fixtures/sample.xmplib
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use xmplib_tests::{large_library, sample_library};

fn main() -> Result<()> {
    let dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("fixtures"), PathBuf::from);
    fs::create_dir_all(&dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let outputs = [
        ("sample.xmplib", sample_library().build()),
        ("large.xmplib", large_library(10_000)),
    ];

    for (name, bytes) in outputs {
        let path = dir.join(name);
        fs::write(&path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
        println!("wrote {} ({} bytes)", path.display(), bytes.len());
    }

    Ok(())
}
