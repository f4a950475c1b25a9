use anyhow::{bail, Result};

use dogan_live::{DoganProvider, StreamProvider};

pub fn cmd_check(url: &str) -> Result<()> {
    let provider = DoganProvider::new();
    if !provider.matches(url) {
        bail!("Unsupported URL: {url}");
    }
    println!("Supported ({}): {url}", provider.name());
    Ok(())
}
