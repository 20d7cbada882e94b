//! Tally Dashboard
//!
//! Browser dashboard for the Tally sales commission roster, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Summary cards, ranked table and dual-axis sales/commission chart
//! - Employee entry form with client-side validation
//! - Clear-all with confirmation
//! - WebSocket live updates from other dashboards and the CLI
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The Tally API owns the roster; this crate only renders the
//! dashboard view it serves and forwards user actions over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
