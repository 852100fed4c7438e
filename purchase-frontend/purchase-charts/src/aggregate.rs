use std::collections::HashMap;

use purchase_types::{FilterField, FilterState, Gender, Record};
use serde::{Deserialize, Serialize};

use crate::Series;

/// Purchase totals for one age group, split by gender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBucket {
    pub age: String,
    pub male: f64,
    pub female: f64,
}

impl AggregatedBucket {
    fn empty(age: &str) -> Self {
        Self {
            age: age.to_string(),
            male: 0.0,
            female: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.male + self.female
    }

    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::Male => self.male,
            Series::Female => self.female,
        }
    }
}

/// Groups the records matching `filter_value` on `filter_field` by age and sums each
/// gender's purchases. A value of `All` keeps everything; any other value only keeps
/// records whose `filter_field` column equals it.
///
/// Buckets come out in the order their age first appears among the kept records. Records
/// with a gender other than M or F still open their age bucket but add nothing to it.
pub fn aggregate(
    records: &[Record],
    filter_value: &str,
    filter_field: FilterField,
) -> Vec<AggregatedBucket> {
    aggregate_filtered(records, &FilterState::new(filter_value, filter_field))
}

pub fn aggregate_filtered(records: &[Record], filter: &FilterState) -> Vec<AggregatedBucket> {
    let mut buckets: Vec<AggregatedBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        let slot = *index.entry(record.age.as_str()).or_insert_with(|| {
            buckets.push(AggregatedBucket::empty(&record.age));
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        match record.gender {
            Gender::Male => bucket.male += record.purchase,
            Gender::Female => bucket.female += record.purchase,
            Gender::Other(_) => {}
        }
    }
    buckets
}
