// prtgly-api: Async Rust client for the PRTG table query API

pub mod auth;
pub mod client;
pub mod error;
pub mod filter;
pub mod table;
pub mod transport;

pub use auth::Credentials;
pub use client::PrtgClient;
pub use error::Error;
pub use filter::{FilterOperator, Property, SearchFilter};
pub use table::{Content, SortDirection, TablePage, TableRequest, TableTransport};
pub use transport::{TlsMode, TransportConfig};
