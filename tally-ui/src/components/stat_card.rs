//! Stat Card Component
//!
//! One summary counter from the dashboard view.

use leptos::*;

use crate::state::global::{GlobalState, SummaryView};

/// Which summary counter a card shows
#[derive(Clone, Copy, PartialEq)]
pub enum Stat {
    TotalEmployees,
    TotalSales,
    TotalCommission,
    Qualified,
}

impl Stat {
    pub fn title(&self) -> &'static str {
        match self {
            Stat::TotalEmployees => "Total Employees",
            Stat::TotalSales => "Total Sales",
            Stat::TotalCommission => "Total Commission",
            Stat::Qualified => "Qualified for Commission",
        }
    }

    pub fn value(&self, summary: &SummaryView) -> String {
        match self {
            Stat::TotalEmployees => summary.total_employees.to_string(),
            Stat::TotalSales => summary.total_sales.clone(),
            Stat::TotalCommission => summary.total_commission.clone(),
            Stat::Qualified => summary.qualified.to_string(),
        }
    }
}

/// Summary card component
#[component]
pub fn StatCard(stat: Stat) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let value = create_memo(move |_| {
        state.dashboard.with(|view| view.as_ref().map(|v| stat.value(&v.summary)))
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{stat.title()}</span>
            <div class="text-3xl font-bold mt-2">
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
        </div>
    }
}
