//! Settings Page
//!
//! API connection and ranked view export.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your Tally dashboard"</p>
            </div>

            <ApiSettings />
            <ExportSection />
            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<api::HealthResponse>);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        api::set_api_base(&api_url.get());

        let state_clone = state_for_test.clone();
        spawn_local(async move {
            match api::check_health().await {
                Ok(health) => {
                    set_test_result.set(Some(health));
                    state_clone.show_success("Connection successful!");
                }
                Err(e) => {
                    state_clone.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let state_for_save = state.clone();
    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state_for_save.show_success("API URL saved. Reload to reconnect the live feed.");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Tally API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                {move || test_result.get().map(|health| view! {
                    <div class="text-sm text-gray-300 space-y-1">
                        <p>{format!("Server v{} is {}", health.version, health.status)}</p>
                        <p>{format!("{} employees, {} live dashboards, up {}s",
                            health.employees, health.ws_connections, health.uptime_seconds)}</p>
                    </div>
                })}

                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Live updates:"</span>
                    {
                        let ws_connected = state.ws_connected;
                        move || {
                            if ws_connected.get() {
                                view! { <span class="text-green-400">"Connected"</span> }.into_view()
                            } else {
                                view! { <span class="text-red-400">"Disconnected"</span> }.into_view()
                            }
                        }
                    }
                </div>
            </div>
        </section>
    }
}

/// Offer `data` to the browser as a file download
fn download(data: String, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob = web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&data.into()))
        .map_err(|e| format!("{:?}", e))?;

    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Ranked view export
#[component]
fn ExportSection() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (exporting, set_exporting) = create_signal(false);

    let export = move |format: &'static str| {
        set_exporting.set(true);

        let state_clone = state.clone();
        spawn_local(async move {
            let result = match api::export_ranking(format).await {
                Ok(data) => {
                    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
                    download(data, &format!("tally_ranking_{}.{}", stamp, format))
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => state_clone.show_success("Ranking exported"),
                Err(e) => state_clone.show_error(&e),
            }
            set_exporting.set(false);
        });
    };
    let export_json = export.clone();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Export"</h2>

            <div class="flex items-center justify-between p-4 bg-gray-700 rounded-lg">
                <div>
                    <h3 class="font-medium">"Ranked View"</h3>
                    <p class="text-sm text-gray-400">"Rank, name, sales, commission and status"</p>
                </div>
                <div class="flex space-x-2">
                    <button
                        on:click=move |_| export("csv")
                        disabled=move || exporting.get()
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        "CSV"
                    </button>
                    <button
                        on:click=move |_| export_json("json")
                        disabled=move || exporting.get()
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        "JSON"
                    </button>
                </div>
            </div>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About Tally"</h2>

            <div class="space-y-4 text-gray-300">
                <p>
                    "Tally tracks employee sales, pays commission on sales above the "
                    "threshold and ranks everyone by performance."
                </p>
                <p class="text-sm text-gray-400">"Version 0.1.0"</p>
            </div>
        </section>
    }
}
