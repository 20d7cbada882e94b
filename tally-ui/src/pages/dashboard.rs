//! Dashboard Page
//!
//! Summary cards, the entry form, the sales/commission chart and the
//! ranked table, all drawn from one dashboard view.

use leptos::*;

use crate::components::{
    CardSkeleton, Chart, ClearButton, EmployeeForm, Loading, RankedTable, Stat, StatCard,
};
use crate::state::global::GlobalState;

const STATS: [Stat; 4] = [
    Stat::TotalEmployees,
    Stat::TotalSales,
    Stat::TotalCommission,
    Stat::Qualified,
];

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch the current view on mount
    state.refresh();

    let has_view = create_memo(move |_| state.dashboard.with(Option::is_some));

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Sales Commission Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Commission is paid on sales above the threshold"</p>
                </div>
                <ClearButton />
            </div>

            <section>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {move || if has_view.get() {
                        STATS.into_iter().map(|stat| view! { <StatCard stat=stat /> }).collect_view()
                    } else {
                        STATS.into_iter().map(|_| view! { <CardSkeleton /> }).collect_view()
                    }}
                </div>
            </section>

            <div class="grid md:grid-cols-3 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Add Employee"</h2>
                    <EmployeeForm />
                </section>

                <section class="bg-gray-800 rounded-xl p-6 md:col-span-2">
                    <h2 class="text-xl font-semibold mb-4">"Sales vs Commission"</h2>
                    {move || if has_view.get() {
                        view! { <Chart /> }.into_view()
                    } else {
                        view! { <Loading /> }.into_view()
                    }}
                </section>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Performance Ranking"</h2>
                <RankedTable />
            </section>
        </div>
    }
}
