//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod clear_button;
pub mod employee_form;
pub mod loading;
pub mod nav;
pub mod ranked_table;
pub mod stat_card;
pub mod toast;

pub use chart::Chart;
pub use clear_button::ClearButton;
pub use employee_form::EmployeeForm;
pub use loading::{CardSkeleton, Loading};
pub use nav::Nav;
pub use ranked_table::RankedTable;
pub use stat_card::{Stat, StatCard};
pub use toast::Toast;
