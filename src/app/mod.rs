// Application layer: one entry point per user action.

pub mod commands;

pub use commands::{render_choices, render_outcome, render_sheets, App, SheetListing, SumSelection};
