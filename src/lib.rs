pub mod config;
pub mod dataset;
pub mod error;
pub mod game;
pub mod http_client;
pub mod join;
pub mod manifest;
pub mod pipeline;
pub mod pool;
pub mod reduce;
pub mod table;
pub mod teams;
pub mod transcripts;
