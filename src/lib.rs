// Crate root library declaration and module exports.
pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod grid;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;
pub mod table;
pub mod view;
