pub mod analyzers;
pub mod cleaner;
pub mod config;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod presenter;
pub mod record;
