//! Employee Form Component
//!
//! Name and sales entry. Entries that fail validation are dropped before
//! anything is sent, and the user is told why.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Validate a form entry: trimmed non-empty name, finite non-negative
/// sales. Thousands separators in the sales text are ignored.
pub fn parse_entry(name: &str, sales: &str) -> Result<(String, f64), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Employee name cannot be empty".to_string());
    }

    let cleaned: String = sales
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("Invalid sales amount: {}", sales.trim()))?;

    if !value.is_finite() {
        return Err(format!("Invalid sales amount: {}", sales.trim()));
    }
    if value < 0.0 {
        return Err(format!("Sales amount cannot be negative: {}", value));
    }

    Ok((name.to_string(), value))
}

/// Employee entry form component
#[component]
pub fn EmployeeForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (sales, set_sales) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (employee, amount) = match parse_entry(&name.get(), &sales.get()) {
            Ok(entry) => entry,
            Err(e) => {
                state.show_error(&e);
                return;
            }
        };

        set_submitting.set(true);

        let state_clone = state.clone();
        spawn_local(async move {
            match api::add_employee(&employee, amount).await {
                Ok(()) => {
                    state_clone.show_success(&format!("Added {}", employee));
                    set_name.set(String::new());
                    set_sales.set(String::new());
                    state_clone.refresh();
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Employee Name"</label>
                <input
                    type="text"
                    placeholder="e.g. Kavya"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Sales Amount"</label>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="e.g. 52,000"
                    prop:value=move || sales.get()
                    on:input=move |ev| set_sales.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                       transition-colors flex items-center justify-center space-x-2"
            >
                {move || if submitting.get() {
                    view! {
                        <div class="loading-spinner w-5 h-5" />
                        <span>"Saving..."</span>
                    }.into_view()
                } else {
                    view! {
                        <span>"Add Employee"</span>
                    }.into_view()
                }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry_is_trimmed() {
        assert_eq!(parse_entry("  Kavya ", "52,000"), Ok(("Kavya".to_string(), 52_000.0)));
        assert_eq!(parse_entry("Ravi", "0"), Ok(("Ravi".to_string(), 0.0)));
    }

    #[test]
    fn test_invalid_entries_dropped() {
        assert!(parse_entry("", "100").is_err());
        assert!(parse_entry("   ", "100").is_err());
        assert!(parse_entry("Ravi", "").is_err());
        assert!(parse_entry("Ravi", "abc").is_err());
        assert!(parse_entry("Ravi", "-5").is_err());
        assert!(parse_entry("Ravi", "NaN").is_err());
        assert!(parse_entry("Ravi", "inf").is_err());
    }
}
