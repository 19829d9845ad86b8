#![forbid(unsafe_code)]

pub mod clean;
pub mod cli;
pub mod dom;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod interrupt;
pub mod links;
pub mod logging;
pub mod pipeline;
pub mod store;
