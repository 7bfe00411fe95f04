// SQLite module - the connection and everything that talks to the engine
//
// - config: connection options and the spatial extension settings
// - connection: session lifecycle, execute, query, insert, transactions
// - extension: spatial extension bootstrap run after connect
// - params: binding column values
// - query: materializing statement results

pub mod config;
pub mod connection;
mod extension;
pub mod params;
pub mod query;

pub use config::{SpatialExtension, SqliteOptions, SqliteOptionsBuilder};
pub use connection::Connection;
pub use query::build_record_set;
