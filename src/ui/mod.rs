//! User interface module - console output for the command line.

pub mod formatter;

pub use formatter::{
    display_dry_run, display_error, display_status, display_success, display_warning,
    format_written,
};
