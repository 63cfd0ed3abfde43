use ferritin_aafeatures::AaEncoding;
use strum::IntoEnumIterator;

pub fn execute() -> anyhow::Result<()> {
    for encoding in AaEncoding::iter() {
        let table = encoding.shared()?;
        let options = encoding.options();
        println!(
            "{}\tfeatures={}\tnormalize={}\taverage={}",
            encoding,
            table.feature_count(),
            options.normalize,
            options.average
        );
    }
    Ok(())
}
