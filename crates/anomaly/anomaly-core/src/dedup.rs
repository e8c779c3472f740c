//! Merging of candidate records from several detectors.

use std::collections::{BTreeMap, BTreeSet};

use anomaly_spi::{AnomalyRecord, DetectorKind};
use chrono::NaiveDate;

/// Collapse candidates to one record per date.
///
/// The record with the highest deviation survives (the earliest candidate on
/// ties) and `detected_by` becomes the union of every detector that flagged
/// the date. Output is ordered by date.
pub fn deduplicate(candidates: Vec<AnomalyRecord>) -> Vec<AnomalyRecord> {
    let mut by_date: BTreeMap<NaiveDate, (AnomalyRecord, BTreeSet<DetectorKind>)> =
        BTreeMap::new();

    for candidate in candidates {
        match by_date.get_mut(&candidate.date) {
            Some((best, methods)) => {
                methods.extend(candidate.detected_by.iter().copied());
                methods.insert(candidate.method);
                if candidate.deviation > best.deviation {
                    *best = candidate;
                }
            }
            None => {
                let mut methods: BTreeSet<DetectorKind> =
                    candidate.detected_by.iter().copied().collect();
                methods.insert(candidate.method);
                by_date.insert(candidate.date, (candidate, methods));
            }
        }
    }

    by_date
        .into_values()
        .map(|(mut record, methods)| {
            record.detected_by = methods.into_iter().collect();
            record
        })
        .collect()
}
