use approx::assert_abs_diff_eq;
use ferritin_aafeatures::{
    AaEncoding, FeatureError, FeatureTable, FeatureTableBuilder, SequenceEncoder,
    FULL_TABLE_SIZE, MISSING_RESIDUE, STANDARD_RESIDUES,
};
use ferritin_test_data::TestFile;
use ndarray::Array1;

fn mean(table: &FeatureTable, a: char, b: char) -> Array1<f32> {
    (&table.get(a).unwrap() + &table.get(b).unwrap()) / 2.0
}

#[test]
fn test_every_entry_has_feature_count() -> Result<(), FeatureError> {
    for (encoding, expected) in [(AaEncoding::AandxReduced, 11), (AaEncoding::JttP01Dist, 20)] {
        let table = encoding.build()?;
        assert_eq!(table.len(), FULL_TABLE_SIZE);
        assert_eq!(table.feature_count(), expected);
        for aa in STANDARD_RESIDUES.iter().chain(&['U', 'O', 'X', 'B', 'J', 'Z', '.']) {
            assert_eq!(table.get(*aa).map(|row| row.len()), Some(expected), "{aa}");
        }
    }
    Ok(())
}

#[test]
fn test_exchangeability_rows_are_distributions() -> Result<(), FeatureError> {
    let table = AaEncoding::JttP01Dist.build()?;
    for (code, row) in table.iter() {
        if code == MISSING_RESIDUE {
            assert!(row.iter().all(|&v| v == 0.0));
        } else {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-5);
        }
    }

    let alanine = table.get('A').unwrap();
    assert!(alanine[0] > 0.98 && alanine[0] < 1.0);
    assert!(alanine.iter().skip(1).all(|&v| v > 0.0));

    let unknown = table.get('X').unwrap();
    assert!(unknown.iter().all(|&v| (v - 0.05).abs() < 1e-6));
    Ok(())
}

#[test]
fn test_exchangeability_derived_rows() -> Result<(), FeatureError> {
    let table = AaEncoding::JttP01Dist.build()?;
    assert_eq!(table.get('U'), table.get('C'));
    assert_eq!(table.get('O'), table.get('K'));

    // averaged before normalization; JTT rows sum to ~1 so the
    // difference from averaging normalized rows is tiny
    let b = table.get('B').unwrap();
    for (got, want) in b.iter().zip(mean(&table, 'D', 'N').iter()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn test_reduced_properties_are_raw() -> Result<(), FeatureError> {
    let table = AaEncoding::AandxReduced.build()?;
    assert_eq!(table.feature_count(), 11);

    let alanine = table.get('A').unwrap();
    assert_eq!(alanine[0], -0.0086);
    assert_eq!(alanine[10], -0.0912);
    assert!((alanine.sum() - 1.0).abs() > 0.1);

    assert_eq!(table.get('B').unwrap(), mean(&table, 'D', 'N'));
    assert_eq!(table.get('J').unwrap(), mean(&table, 'I', 'L'));
    assert_eq!(table.get('Z').unwrap(), mean(&table, 'E', 'Q'));
    assert_eq!(table.get('U'), table.get('C'));
    assert!(table.get('X').unwrap().iter().all(|&v| v == 0.0));
    assert!(table.get('.').unwrap().iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn test_synthetic_table_scenarios() -> Result<(), FeatureError> {
    let raw = TestFile::table_minimal().contents();

    let plain = FeatureTableBuilder::new(raw)
        .normalize(false)
        .average(false)
        .build()?;
    assert_eq!(plain.get('B').unwrap().to_vec(), vec![2.0, 2.0]);

    let normalized = FeatureTableBuilder::new(raw)
        .normalize(true)
        .average(true)
        .build()?;
    let d = normalized.get('D').unwrap();
    assert_eq!(d.to_vec(), vec![1.0 / 4.0, 3.0 / 4.0]);
    assert_abs_diff_eq!(d.sum(), 1.0, epsilon = 1e-6);
    assert_eq!(normalized.get('X').unwrap().to_vec(), vec![0.5, 0.5]);

    let err = FeatureTableBuilder::new(raw)
        .normalize(true)
        .average(false)
        .build()
        .unwrap_err();
    assert!(matches!(err, FeatureError::InvalidOptions(_)));
    Ok(())
}

#[test]
fn test_fixture_errors() {
    let err = FeatureTableBuilder::new(TestFile::table_ragged().contents())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        FeatureError::InconsistentFeatureCount {
            residue: 'N',
            expected: 2,
            found: 3
        }
    ));

    let err = FeatureTableBuilder::new(TestFile::table_malformed().contents())
        .build()
        .unwrap_err();
    assert!(matches!(err, FeatureError::MalformedNumber { line_number: 2, .. }));
}

#[test]
fn test_encode_with_shared_preset() -> Result<(), FeatureError> {
    let table = AaEncoding::from_name("AANDXred")?.shared()?;
    let encoder = SequenceEncoder::new(table);
    let encoded = encoder.encode("..MKTAYIAKQRQISFVKSHFSRQ")?;
    assert_eq!(encoded.dim(), (24, 11));
    assert!(encoded.row(0).iter().all(|&v| v == 0.0));
    assert_eq!(encoded.row(2), table.get('M').unwrap());

    let err = encoder.encode("MK#").unwrap_err();
    assert!(matches!(
        err,
        FeatureError::UnknownResidue {
            residue: '#',
            position: 2
        }
    ));
    Ok(())
}
