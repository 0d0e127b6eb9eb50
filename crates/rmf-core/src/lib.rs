pub mod config;
pub mod error;
pub mod logging;

pub mod acquire;
pub mod api;
pub mod http;
pub mod manifest;
pub mod mux;
pub mod resolver;
pub mod url_model;

pub use acquire::Acquirer;
pub use api::{CurlSourceApi, SourceApi};
pub use error::{ErrorKind, FetchError};
pub use resolver::{MediaDescriptor, Resolver};
