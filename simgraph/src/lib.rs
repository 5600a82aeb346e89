pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    DEFAULT_DB_PATH, TopFormat, expand_path, format_summary, load_config, open_database,
    render_top,
};
