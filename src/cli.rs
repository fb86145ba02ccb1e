//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; the route table dispatches to library services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_output, format_identity_output, format_replay_json, format_replay_text,
};
pub use route::RunContext;
