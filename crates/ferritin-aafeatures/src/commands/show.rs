use anyhow::Context;
use ferritin_aafeatures::{AaEncoding, FeatureTable, FeatureTableBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

fn build_custom(path: &Path, normalize: bool, average: bool) -> anyhow::Result<FeatureTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading raw table {}", path.display()))?;
    info!(path = %path.display(), normalize, average, "building custom table");
    let table = FeatureTableBuilder::new(&raw)
        .normalize(normalize)
        .average(average)
        .build()
        .with_context(|| format!("building table from {}", path.display()))?;
    Ok(table)
}

fn render<W: Write>(table: &FeatureTable, json: bool, writer: &mut W) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *writer, &table.entries())?;
        writeln!(writer)?;
    } else {
        table.write_raw(writer)?;
    }
    Ok(())
}

pub fn execute(
    encoding: Option<String>,
    table: Option<PathBuf>,
    normalize: bool,
    average: bool,
    json: bool,
) -> anyhow::Result<()> {
    let custom;
    let table: &FeatureTable = match (encoding, table) {
        (_, Some(path)) => {
            custom = build_custom(&path, normalize, average)?;
            &custom
        }
        (Some(name), None) => AaEncoding::from_name(&name)?.shared()?,
        (None, None) => anyhow::bail!("either --encoding or --table is required"),
    };

    let mut stdout = std::io::stdout().lock();
    render(table, json, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferritin_aafeatures::TableEntry;

    #[test]
    fn test_render_shared_preset() -> anyhow::Result<()> {
        let table = AaEncoding::JttP01Dist.shared()?;
        let mut buffer = Vec::new();
        render(table, true, &mut buffer)?;
        let entries: Vec<TableEntry> = serde_json::from_slice(&buffer)?;
        assert_eq!(entries.len(), table.len());
        assert_eq!(entries[0].residue, 'A');

        let mut buffer = Vec::new();
        render(table, false, &mut buffer)?;
        let text = String::from_utf8(buffer)?;
        assert!(text.starts_with("# feature_count=20 normalize=true average=true"));
        Ok(())
    }
}
