//! Ranked Table Component
//!
//! Ranked employees with podium row styling, or a single placeholder row
//! spanning every column when the roster is empty.

use leptos::*;

use crate::state::global::{GlobalState, TableRow, TableView};

const HEADERS: [&str; 5] = ["Rank", "Employee Name", "Sales Amount", "Commission", "Status"];

#[component]
pub fn RankedTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-left">
                <thead>
                    <tr class="border-b border-gray-700 text-gray-400 text-sm">
                        {HEADERS.into_iter().map(|h| view! { <th class="py-3 px-4">{h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || match state.dashboard.get().map(|view| view.table) {
                        Some(TableView::Rows { rows }) => {
                            rows.into_iter().map(|row| view! { <RankedRow row=row /> }).collect_view()
                        }
                        Some(TableView::Placeholder { message }) => view! {
                            <tr>
                                <td colspan=HEADERS.len() class="py-8 px-4 text-center text-gray-400">
                                    {message}
                                </td>
                            </tr>
                        }.into_view(),
                        None => view! {
                            <tr>
                                <td colspan=HEADERS.len() class="py-8 px-4 text-center text-gray-500">
                                    "Loading..."
                                </td>
                            </tr>
                        }.into_view(),
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Row classes: podium rows add their style class
pub fn row_class(row: &TableRow) -> String {
    let base = "border-b border-gray-700 last:border-0";
    match &row.style {
        Some(style) => format!("{} {}", base, style),
        None => base.to_string(),
    }
}

#[component]
fn RankedRow(row: TableRow) -> impl IntoView {
    view! {
        <tr class=row_class(&row)>
            <td class="py-3 px-4">{row.position}</td>
            <td class="py-3 px-4">{row.name}</td>
            <td class="py-3 px-4">{row.sales}</td>
            <td class="py-3 px-4">{row.commission}</td>
            <td class="py-3 px-4">{row.status}</td>
        </tr>
    }
}
