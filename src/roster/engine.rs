//! Roster engine
//!
//! `Roster` is the synchronous core: an ordered list of records plus the
//! commission policy they were derived with. Every mutation returns a fresh
//! `RosterSnapshot` so callers can hand it straight to their renderers.
//!
//! `RosterStore` owns a single `Roster` for the API server and serialises
//! access through Tokio's async RwLock.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::input::EmployeeInput;
use super::ranking::{rank, RankedEntry};
use super::stats::RosterStats;
use super::types::{CommissionPolicy, EmployeeRecord};

/// Seed entries present when a roster is created with demo data
pub const SEED_EMPLOYEES: [(&str, f64); 2] = [("Arun", 60_000.0), ("Priya", 40_000.0)];

/// Derived state handed to observers after a mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterSnapshot {
    /// Identifies the roster the revision belongs to
    pub epoch: String,
    /// Bumped once per mutation
    pub revision: u64,
    pub stats: RosterStats,
    pub ranked: Vec<RankedEntry>,
}

impl RosterSnapshot {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Ordered, append-only collection of employee records
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<EmployeeRecord>,
    policy: CommissionPolicy,
    /// Fresh per roster; revisions only compare within one epoch
    epoch: String,
    revision: u64,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(CommissionPolicy::default())
    }
}

impl Roster {
    /// Create an empty roster
    pub fn new(policy: CommissionPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
            epoch: uuid::Uuid::new_v4().to_string(),
            revision: 0,
        }
    }

    /// Create a roster holding the two demo employees
    pub fn seeded(policy: CommissionPolicy) -> Self {
        Self::with_records(policy, SEED_EMPLOYEES.iter().copied())
    }

    /// Create a roster from (name, sales) pairs without bumping the revision
    pub fn with_records<'a>(
        policy: CommissionPolicy,
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let records = entries
            .into_iter()
            .map(|(name, sales)| EmployeeRecord::new(name, sales, &policy))
            .collect();

        Self {
            records,
            policy,
            epoch: uuid::Uuid::new_v4().to_string(),
            revision: 0,
        }
    }

    /// Append a record. The caller is responsible for validation.
    pub fn add_employee(&mut self, name: impl Into<String>, sales: f64) -> RosterSnapshot {
        let record = EmployeeRecord::new(name, sales, &self.policy);
        tracing::debug!(
            name = %record.name(),
            sales = record.sales(),
            commission = record.commission(),
            "Employee added"
        );
        self.records.push(record);
        self.revision += 1;
        self.snapshot()
    }

    /// Append a record that has already passed validation
    pub fn add_input(&mut self, input: EmployeeInput) -> RosterSnapshot {
        self.add_employee(input.name, input.sales)
    }

    /// Append several validated records as one mutation
    pub fn add_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = EmployeeInput>,
    ) -> RosterSnapshot {
        let before = self.records.len();
        let policy = self.policy;
        self.records.extend(
            inputs
                .into_iter()
                .map(|input| EmployeeRecord::new(input.name, input.sales, &policy)),
        );
        let added = self.records.len() - before;
        if added > 0 {
            self.revision += 1;
            tracing::debug!(added, "Employees added");
        }
        self.snapshot()
    }

    /// Drop every record. Irreversible.
    pub fn clear_all(&mut self) -> RosterSnapshot {
        let removed = self.records.len();
        self.records = Vec::new();
        self.revision += 1;
        tracing::debug!(removed, "Roster cleared");
        self.snapshot()
    }

    /// Recompute summary statistics
    pub fn stats(&self) -> RosterStats {
        RosterStats::compute(&self.records)
    }

    /// Recompute the ranked view
    pub fn ranked(&self) -> Vec<RankedEntry> {
        rank(&self.records)
    }

    /// Stats and ranked view at the current revision
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            epoch: self.epoch.clone(),
            revision: self.revision,
            stats: self.stats(),
            ranked: self.ranked(),
        }
    }

    /// Records in insertion order
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> &CommissionPolicy {
        &self.policy
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn epoch(&self) -> &str {
        &self.epoch
    }
}

/// Shared owner of the server's roster
pub struct RosterStore {
    roster: RwLock<Roster>,
}

impl RosterStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: RwLock::new(roster),
        }
    }

    /// Add a validated employee and return the refreshed snapshot
    pub async fn add(&self, input: EmployeeInput) -> RosterSnapshot {
        let mut roster = self.roster.write().await;
        let snapshot = roster.add_input(input);
        tracing::info!(
            revision = snapshot.revision,
            employees = snapshot.stats.total_employees,
            "Roster updated"
        );
        snapshot
    }

    /// Add several validated employees under one lock
    pub async fn add_many(&self, inputs: Vec<EmployeeInput>) -> RosterSnapshot {
        let mut roster = self.roster.write().await;
        let snapshot = roster.add_inputs(inputs);
        tracing::info!(
            revision = snapshot.revision,
            employees = snapshot.stats.total_employees,
            "Roster updated in batch"
        );
        snapshot
    }

    /// Clear the roster and return the (empty) snapshot
    pub async fn clear(&self) -> RosterSnapshot {
        let mut roster = self.roster.write().await;
        let snapshot = roster.clear_all();
        tracing::info!(revision = snapshot.revision, "Roster cleared");
        snapshot
    }

    pub async fn snapshot(&self) -> RosterSnapshot {
        self.roster.read().await.snapshot()
    }

    pub async fn stats(&self) -> RosterStats {
        self.roster.read().await.stats()
    }

    pub async fn ranked(&self) -> Vec<RankedEntry> {
        self.roster.read().await.ranked()
    }

    /// Copy of the records in insertion order
    pub async fn records(&self) -> Vec<EmployeeRecord> {
        self.roster.read().await.records().to_vec()
    }

    pub async fn policy(&self) -> CommissionPolicy {
        *self.roster.read().await.policy()
    }

    pub async fn len(&self) -> usize {
        self.roster.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::ranking::PerformanceLabel;
    use crate::roster::types::commission_rule;

    #[test]
    fn test_seeded_roster() {
        let roster = Roster::seeded(CommissionPolicy::default());
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.revision(), 0);
        assert_eq!(roster.records()[0].name(), "Arun");
        assert_eq!(roster.records()[0].commission(), 6_000.0);
        assert_eq!(roster.records()[1].name(), "Priya");
        assert_eq!(roster.records()[1].commission(), 0.0);
    }

    #[test]
    fn test_add_appends_one_record() {
        let mut roster = Roster::seeded(CommissionPolicy::default());

        for sales in [0.0, 50_000.0, 50_001.0, 123_456.0] {
            let before = roster.len();
            let snapshot = roster.add_employee("New", sales);
            assert_eq!(roster.len(), before + 1);

            let last = roster.records().last().unwrap();
            assert_eq!(last.name(), "New");
            assert_eq!(last.commission(), commission_rule(sales));
            assert_eq!(snapshot.stats.total_employees, before + 1);
        }
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut roster = Roster::default();
        roster.add_employee("low", 10.0);
        roster.add_employee("high", 90_000.0);

        let names: Vec<_> = roster.records().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["low", "high"]);

        let ranked: Vec<_> = roster.ranked().into_iter().map(|e| e.name).collect();
        assert_eq!(ranked, vec!["high", "low"]);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut roster = Roster::default();
        roster.add_employee("Sam", 1.0);
        roster.add_employee("Sam", 2.0);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_clear_always_empties() {
        let mut roster = Roster::seeded(CommissionPolicy::default());
        let snapshot = roster.clear_all();
        assert!(roster.is_empty());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.stats, RosterStats::default());

        // Clearing an empty roster is still fine
        roster.clear_all();
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn test_revision_bumps_per_mutation() {
        let mut roster = Roster::default();
        assert_eq!(roster.add_employee("a", 1.0).revision, 1);
        assert_eq!(roster.clear_all().revision, 2);
        assert_eq!(roster.snapshot().revision, 2);
    }

    #[test]
    fn test_epoch_is_per_roster() {
        let mut roster = Roster::seeded(CommissionPolicy::default());
        let epoch = roster.epoch().to_string();
        assert_eq!(roster.add_employee("a", 1.0).epoch, epoch);
        assert_eq!(roster.clear_all().epoch, epoch);

        // A restarted server builds a new roster whose revisions start over
        let restarted = Roster::seeded(CommissionPolicy::default());
        assert_eq!(restarted.revision(), 0);
        assert_ne!(restarted.snapshot().epoch, epoch);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let first = roster.snapshot();
        for _ in 0..5 {
            assert_eq!(roster.snapshot(), first);
            assert_eq!(roster.stats(), first.stats);
            assert_eq!(roster.ranked(), first.ranked);
        }
    }

    #[test]
    fn test_policy_applies_to_added_records() {
        let mut roster = Roster::new(CommissionPolicy::new(100.0, 0.5));
        roster.add_employee("a", 200.0);
        assert_eq!(roster.records()[0].commission(), 100.0);
    }

    #[tokio::test]
    async fn test_store_add_and_clear() {
        let store = RosterStore::new(Roster::seeded(CommissionPolicy::default()));

        let input = EmployeeInput::new("Meera", 55_000.0).unwrap();
        let snapshot = store.add(input).await;
        assert_eq!(snapshot.stats.total_employees, 3);
        assert_eq!(snapshot.ranked[1].name, "Meera");
        assert_eq!(snapshot.ranked[1].label, PerformanceLabel::HighPerformer);

        let snapshot = store.clear().await;
        assert!(snapshot.is_empty());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_store_add_many() {
        let store = RosterStore::new(Roster::default());
        let inputs = vec![
            EmployeeInput::new("a", 1.0).unwrap(),
            EmployeeInput::new("b", 2.0).unwrap(),
        ];

        let snapshot = store.add_many(inputs).await;
        assert_eq!(snapshot.stats.total_employees, 2);
        // One batch, one revision
        assert_eq!(snapshot.revision, 1);

        let records = store.records().await;
        assert_eq!(records[0].name(), "a");
        assert_eq!(records[1].name(), "b");
    }
}
