mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sql_writer;
mod sqlite;

pub use mssql::*;
pub use mysql::*;
pub use oracle::*;
pub use postgres::*;
pub use sql_writer::*;
pub use sqlite::*;
