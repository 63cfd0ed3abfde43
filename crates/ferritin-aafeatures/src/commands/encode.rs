use anyhow::Context;
use ferritin_aafeatures::{AaEncoding, LabelledRecord, SequenceEncoder};
use std::path::PathBuf;
use tracing::info;

pub fn execute(encoding: String, sequence: String, output: PathBuf) -> anyhow::Result<()> {
    let encoding = AaEncoding::from_name(&encoding)?;
    let table = encoding.shared()?;
    let encoder = SequenceEncoder::new(table);
    let record = LabelledRecord::from_sequence(&encoder, &sequence)
        .with_context(|| format!("encoding sequence with {}", encoding))?;
    record
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        encoding = %encoding,
        length = record.sequence_length(),
        features = record.feature_count(),
        output = %output.display(),
        "wrote labelled record"
    );
    Ok(())
}
