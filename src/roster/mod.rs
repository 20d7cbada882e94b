//! Tally Roster
//!
//! The logical core of the dashboard:
//!
//! - **types**: Commission policy and employee records
//! - **input**: Validation of candidate entries
//! - **stats**: Summary statistics
//! - **ranking**: Sorted view with performance labels
//! - **engine**: The roster itself and its shared async owner
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use tally::roster::{CommissionPolicy, Roster};
//!
//! let mut roster = Roster::seeded(CommissionPolicy::default());
//! let snapshot = roster.add_employee("Meera", 55_000.0);
//!
//! assert_eq!(snapshot.stats.total_employees, 3);
//! assert_eq!(snapshot.ranked[0].name, "Arun");
//! assert_eq!(snapshot.ranked[1].label.as_str(), "High Performer");
//! ```

pub mod engine;
pub mod error;
pub mod input;
pub mod ranking;
pub mod stats;
pub mod types;

pub use engine::{Roster, RosterSnapshot, RosterStore, SEED_EMPLOYEES};
pub use error::{RosterError, RosterResult};
pub use input::EmployeeInput;
pub use ranking::{rank, PerformanceLabel, RankedEntry, RowStyle};
pub use stats::RosterStats;
pub use types::{commission_rule, CommissionPolicy, EmployeeRecord};
