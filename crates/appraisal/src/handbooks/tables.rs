use std::collections::BTreeMap;

use crate::worksheet::domain::BalconyPresence;

/// Region → raw fund category → percent cell (`"9.2%"` or a `"-"`
/// placeholder meaning "no published discount").
#[derive(Debug, Clone, Default)]
pub struct TradeDiscountTable {
    rows: BTreeMap<String, BTreeMap<String, String>>,
}

impl TradeDiscountTable {
    pub fn from_rows(rows: &[(&str, &[(&str, &str)])]) -> Self {
        let mut table = Self::default();
        for (region, funds) in rows {
            table.set_region(region, funds);
        }
        table
    }

    /// Replace (or add) one region's row; the overlay hook used when a
    /// handbook derives from another.
    pub fn set_region(&mut self, region: &str, funds: &[(&str, &str)]) {
        let row = funds
            .iter()
            .map(|(fund, percent)| (fund.to_string(), percent.to_string()))
            .collect();
        self.rows.insert(region.to_string(), row);
    }

    pub fn regions(&self) -> Vec<&str> {
        self.rows.keys().map(String::as_str).collect()
    }

    pub fn funds(&self, region: &str) -> Vec<&str> {
        self.rows
            .get(region)
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn percent(&self, region: &str, fund: &str) -> Option<&str> {
        self.rows.get(region)?.get(fund).map(String::as_str)
    }
}

/// Subject value → comparable value → multiplier grid shared by the paired
/// dimensions (walls, building condition, interior finish, floor).
#[derive(Debug, Clone, Default)]
pub struct PairGrid {
    cells: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PairGrid {
    pub fn from_rows(rows: &[(&str, &[(&str, f64)])]) -> Self {
        let mut grid = Self::default();
        for (subject, comparables) in rows {
            let row = comparables
                .iter()
                .map(|(comparable, value)| (comparable.to_string(), *value))
                .collect();
            grid.cells.insert(subject.to_string(), row);
        }
        grid
    }

    pub fn subject_values(&self) -> Vec<&str> {
        self.cells.keys().map(String::as_str).collect()
    }

    pub fn comparable_values(&self, subject: &str) -> Vec<&str> {
        self.cells
            .get(subject)
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn value(&self, subject: &str, comparable: &str) -> Option<f64> {
        self.cells.get(subject)?.get(comparable).copied()
    }
}

/// Region → fund-group → [`PairGrid`]; the four-level table shape.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    regions: BTreeMap<String, BTreeMap<String, PairGrid>>,
}

impl PairTable {
    pub fn from_rows(rows: &[(&str, &[(&str, PairGrid)])]) -> Self {
        let mut table = Self::default();
        for (region, groups) in rows {
            let row = groups
                .iter()
                .map(|(group, grid)| (group.to_string(), grid.clone()))
                .collect();
            table.regions.insert(region.to_string(), row);
        }
        table
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn grid(&self, region: &str, group: &str) -> Option<&PairGrid> {
        self.regions.get(region)?.get(group)
    }

    pub fn subject_values(&self, region: &str, group: &str) -> Vec<&str> {
        self.grid(region, group)
            .map(PairGrid::subject_values)
            .unwrap_or_default()
    }

    pub fn comparable_values(&self, region: &str, group: &str, subject: &str) -> Vec<&str> {
        self.grid(region, group)
            .map(|grid| grid.comparable_values(subject))
            .unwrap_or_default()
    }

    pub fn multiplier(&self, region: &str, group: &str, subject: &str, comparable: &str) -> Option<f64> {
        self.grid(region, group)?.value(subject, comparable)
    }
}

/// Region → [`PairGrid`] for dimensions without a fund-group level
/// (interior finish).
#[derive(Debug, Clone, Default)]
pub struct RegionPairTable {
    regions: BTreeMap<String, PairGrid>,
}

impl RegionPairTable {
    pub fn from_rows(rows: &[(&str, PairGrid)]) -> Self {
        let mut table = Self::default();
        for (region, grid) in rows {
            table.regions.insert(region.to_string(), grid.clone());
        }
        table
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn subject_values(&self, region: &str) -> Vec<&str> {
        self.regions
            .get(region)
            .map(PairGrid::subject_values)
            .unwrap_or_default()
    }

    pub fn comparable_values(&self, region: &str, subject: &str) -> Vec<&str> {
        self.regions
            .get(region)
            .map(|grid| grid.comparable_values(subject))
            .unwrap_or_default()
    }

    pub fn multiplier(&self, region: &str, subject: &str, comparable: &str) -> Option<f64> {
        self.regions.get(region)?.value(subject, comparable)
    }
}

/// Region → fund-group → location class → multiplier. Location compares the
/// subject's class only, so the leaf is a flat class map rather than a grid.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    regions: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

impl LocationTable {
    pub fn from_rows(rows: &[(&str, &[(&str, &[(&str, f64)])])]) -> Self {
        let mut table = Self::default();
        for (region, groups) in rows {
            let mut region_row = BTreeMap::new();
            for (group, classes) in *groups {
                let class_row = classes
                    .iter()
                    .map(|(class, value)| (class.to_string(), *value))
                    .collect();
                region_row.insert(group.to_string(), class_row);
            }
            table.regions.insert(region.to_string(), region_row);
        }
        table
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn classes(&self, region: &str, group: &str) -> Vec<&str> {
        self.regions
            .get(region)
            .and_then(|row| row.get(group))
            .map(|classes| classes.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn multiplier(&self, region: &str, group: &str, class: &str) -> Option<f64> {
        self.regions.get(region)?.get(group)?.get(class).copied()
    }
}

/// The four balcony combination cells for one region bucket.
#[derive(Debug, Clone, Copy)]
pub struct BalconyGrid {
    pub both_present: f64,
    pub subject_only: f64,
    pub comparable_only: f64,
    pub both_absent: f64,
}

impl BalconyGrid {
    pub fn value(&self, subject: BalconyPresence, comparable: BalconyPresence) -> f64 {
        match (subject, comparable) {
            (BalconyPresence::Present, BalconyPresence::Present) => self.both_present,
            (BalconyPresence::Present, BalconyPresence::Absent) => self.subject_only,
            (BalconyPresence::Absent, BalconyPresence::Present) => self.comparable_only,
            (BalconyPresence::Absent, BalconyPresence::Absent) => self.both_absent,
        }
    }
}

/// Region bucket → balcony combination grid. Balcony data is published for
/// coarse buckets, so every supported region label routes in via the alias
/// map rather than appearing here directly.
#[derive(Debug, Clone, Default)]
pub struct BalconyTable {
    buckets: BTreeMap<String, BalconyGrid>,
}

impl BalconyTable {
    pub fn from_rows(rows: &[(&str, BalconyGrid)]) -> Self {
        let mut table = Self::default();
        for (bucket, grid) in rows {
            table.buckets.insert(bucket.to_string(), *grid);
        }
        table
    }

    pub fn contains_region(&self, bucket: &str) -> bool {
        self.buckets.contains_key(bucket)
    }

    pub fn grid(&self, bucket: &str) -> Option<&BalconyGrid> {
        self.buckets.get(bucket)
    }
}

/// Free-text label → canonical table key. Used both for regional aliases and
/// for the many-to-one fund-group merges; a label absent from the map simply
/// fails to resolve.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    entries: BTreeMap<String, String>,
}

impl KeyMap {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(label, key)| (label.to_string(), key.to_string()))
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }
}
