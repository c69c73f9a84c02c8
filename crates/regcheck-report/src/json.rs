use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use regcheck_model::MatchOutput;

/// Pretty-printed JSON of the full output.
pub fn write_json(path: &Path, output: &MatchOutput) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, output)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
