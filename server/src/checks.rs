use std::{fs::read_dir, path::Path};

use anyhow::{self, Context};
use tracing::warn;

// the static side of the relay is just a directory, so the only things worth
// checking at startup are that it exists and can be listed, and that it
// holds something to serve at the site root
pub fn doc_root(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        return Err(anyhow::Error::msg(format!(
            "doc_root {dir:?} is not a directory"
        )));
    }

    read_dir(dir).with_context(|| format!("doc_root {dir:?} is not readable"))?;

    if !dir.join("index.html").is_file() {
        warn!({ doc_root = ?dir }, "doc_root has no index.html, the site root will be a 404");
    }

    Ok(())
}
