use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::{Category, Record};

/// Records of one category, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySubset {
    pub category: Category,
    records: Vec<Record>,
}

impl CategorySubset {
    /// Stable-sorts by date: rows sharing a date keep their input order
    pub fn new(category: Category, mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        CategorySubset { category, records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The three category subsets of a record set
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySplit {
    pub fixed: CategorySubset,
    pub variable: CategorySubset,
    pub currency: CategorySubset,
    /// Labels that matched no category, with their row counts
    pub unmatched: BTreeMap<String, usize>,
}

/// Rows of `category`, matched case-insensitively and sorted by date
pub fn split_category(records: &[Record], category: Category) -> CategorySubset {
    let matching: Vec<Record> = records
        .iter()
        .filter(|r| r.category() == Some(category))
        .cloned()
        .collect();
    debug!("{} records in category {}", matching.len(), category);
    CategorySubset::new(category, matching)
}

/// Partition records into the three categories.
///
/// Rows with any other label are left out of every subset and tallied in
/// `unmatched`.
pub fn split_all(records: &[Record]) -> CategorySplit {
    let mut unmatched: BTreeMap<String, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.category().is_none()) {
        *unmatched.entry(record.category.trim().to_string()).or_default() += 1;
    }
    if !unmatched.is_empty() {
        warn!(
            "Skipping {} records with unrecognized investment type: {:?}",
            unmatched.values().sum::<usize>(),
            unmatched.keys().collect::<Vec<_>>()
        );
    }

    CategorySplit {
        fixed: split_category(records, Category::Fixed),
        variable: split_category(records, Category::Variable),
        currency: split_category(records, Category::Currency),
        unmatched,
    }
}
