pub mod handlers;
pub mod output;
