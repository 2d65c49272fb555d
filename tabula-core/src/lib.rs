mod annotation;
mod cache;
mod column;
mod connection;
mod dialect;
mod driver;
mod engine;
mod error;
mod executor;
mod introspect;
mod mapping;
mod naming;
mod query;
mod registry;
mod session;
mod sql_type;
mod statement;
mod table;
mod util;
mod value;
pub mod writer;

pub use ::anyhow::Context;
pub use annotation::*;
pub use cache::*;
pub use column::*;
pub use connection::*;
pub use dialect::*;
pub use driver::*;
pub use engine::*;
pub use error::*;
pub use executor::*;
pub use introspect::*;
pub use mapping::*;
pub use naming::*;
pub use query::*;
pub use registry::*;
pub use session::*;
pub use sql_type::*;
pub use statement::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub use writer::SqlWriter;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
