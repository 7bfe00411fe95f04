mod core;
mod dml;
mod select;
mod tx;

pub use core::Connection;
