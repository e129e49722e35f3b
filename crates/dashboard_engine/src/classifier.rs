use models::{Classification, ClassifiedRecord, RawRecord};

/// Maps a `CODCLASSIFICA` code to its label. `None` means the row is unclassified.
pub fn classify(code: &str) -> Option<Classification> {
    match code {
        "01" => Some(Classification::Meio),
        "02" => Some(Classification::Fim),
        "03" => Some(Classification::RecursoDeTerceiro),
        _ => None,
    }
}

/// Tags every row with its classification and drops the ones without one.
/// `row` keeps the position each record had in the API response.
pub fn classify_records(records: Vec<RawRecord>) -> Vec<ClassifiedRecord> {
    let received = records.len();
    let classified: Vec<ClassifiedRecord> = records
        .into_iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let classification = record.code.as_deref().and_then(classify)?;
            Some(ClassifiedRecord {
                row,
                classification,
                record,
            })
        })
        .collect();

    let dropped = received - classified.len();
    if dropped > 0 {
        tracing::debug!(dropped, received, "dropped unclassified rows");
    }
    classified
}
