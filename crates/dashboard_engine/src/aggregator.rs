use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use models::{
    CategoryPeak, Classification, ClassifiedRecord, Month, MonthlyAggregate, PeakField, Quarter,
    QuarterlyAggregate,
};
use thiserror::Error;

/// A record lacked a value the aggregate needs. Only that record is left out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: missing field '{field}'")]
pub struct MissingFieldError {
    pub row: usize,
    pub field: &'static str,
}

/// Rows of one grouped table plus the records that could not take part in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<MissingFieldError>,
}

/// Per-record quarter sums, indexed Q1..Q4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quarters(pub [f64; 4]);

impl Quarters {
    pub fn get(&self, quarter: Quarter) -> f64 {
        self.0[quarter as usize]
    }
}

pub fn quarters_of(record: &ClassifiedRecord) -> Result<Quarters, MissingFieldError> {
    let mut sums = [0.0; 4];
    for quarter in Quarter::ALL {
        for month in quarter.months() {
            let value = record.record.month(month).ok_or(MissingFieldError {
                row: record.row,
                field: month.field_name(),
            })?;
            sums[quarter as usize] += value;
        }
    }
    Ok(Quarters(sums))
}

/// Sums Q1..Q4 per classification.
pub fn quarterly_totals(records: &[ClassifiedRecord]) -> Aggregated<QuarterlyAggregate> {
    let mut groups: BTreeMap<Classification, [f64; 4]> = BTreeMap::new();
    let mut warnings = Vec::new();

    for record in records {
        match quarters_of(record) {
            Ok(quarters) => {
                let acc = groups.entry(record.classification).or_insert([0.0; 4]);
                for (slot, value) in acc.iter_mut().zip(quarters.0) {
                    *slot += value;
                }
            }
            Err(e) => {
                tracing::warn!(row = e.row, field = e.field, "record left out of quarterly totals");
                warnings.push(e);
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(classification, [q1, q2, q3, q4])| QuarterlyAggregate {
            classification,
            q1,
            q2,
            q3,
            q4,
        })
        .collect();

    Aggregated { rows, warnings }
}

/// Sums one month per classification.
pub fn monthly_totals(records: &[ClassifiedRecord], month: Month) -> Aggregated<MonthlyAggregate> {
    let mut groups: BTreeMap<Classification, f64> = BTreeMap::new();
    let mut warnings = Vec::new();

    for record in records {
        match record.record.month(month) {
            Some(value) => *groups.entry(record.classification).or_insert(0.0) += value,
            None => {
                tracing::warn!(row = record.row, field = month.field_name(), "record left out of monthly totals");
                warnings.push(MissingFieldError {
                    row: record.row,
                    field: month.field_name(),
                });
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(classification, value)| MonthlyAggregate {
            classification,
            month,
            value,
        })
        .collect();

    Aggregated { rows, warnings }
}

/// Picks, per classification, the record with the largest `field`.
/// On ties the record seen first wins.
pub fn peak_by(records: &[ClassifiedRecord], field: PeakField) -> Aggregated<CategoryPeak> {
    let mut best: BTreeMap<Classification, (f64, &ClassifiedRecord)> = BTreeMap::new();
    let mut warnings = Vec::new();

    for record in records {
        let Some(value) = field.value_of(&record.record) else {
            tracing::warn!(row = record.row, field = field.label(), "record left out of category peak");
            warnings.push(MissingFieldError {
                row: record.row,
                field: field.label(),
            });
            continue;
        };
        match best.entry(record.classification) {
            Entry::Vacant(slot) => {
                slot.insert((value, record));
            }
            Entry::Occupied(mut slot) => {
                if value > slot.get().0 {
                    slot.insert((value, record));
                }
            }
        }
    }

    let rows = best
        .into_iter()
        .map(|(classification, (value, record))| CategoryPeak {
            classification,
            field,
            value,
            row: record.row,
            record: record.record.clone(),
        })
        .collect();

    Aggregated { rows, warnings }
}
