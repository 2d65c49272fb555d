use crate::{Connection, Dialect, Result};
use std::{borrow::Cow, future::Future};

/// Entry point of a database backend.
pub trait Driver {
    type Connection: Connection;

    /// Driver name, resolved to a dialect by [`Dialect::from_driver`].
    const NAME: &'static str;

    fn dialect(&self) -> Dialect;

    fn connect(&self, url: Cow<'static, str>) -> impl Future<Output = Result<Self::Connection>> {
        Self::Connection::connect(url)
    }
}
