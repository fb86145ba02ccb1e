//! Integration tests for the pagehold continuity cache

mod cli_commands;
mod concurrency;
mod paginated_handle;
