pub mod config;
pub mod detect;
pub mod dispatch;
pub mod mcp;
pub mod parse;
pub mod prompt;
pub mod validate;
