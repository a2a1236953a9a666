#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod runtime;
pub mod selectors;
pub mod tools;
pub mod types;

pub use config::Config;
pub use error::{Result, WibbleError};
pub use tools::api::{api_call, api_calls, ApiRequest};
pub use tools::path::{path_source, PathSource};
pub use tools::table::{add_data, dots_tbl, lst_tbl, List, Table};
pub use tools::web::webbler;
pub use types::*;
