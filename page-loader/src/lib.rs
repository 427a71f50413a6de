pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use commands::command_argument_builder;
pub use handlers::{
    default_log_filter, handle_load, init_logging, loader_options, report_format,
    resolve_output_dir,
};
