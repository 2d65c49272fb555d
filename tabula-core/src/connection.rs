use crate::{Executor, Result};
use std::{borrow::Cow, future::Future};

/// An open session with a database server.
pub trait Connection: Executor + Sized {
    /// Open a connection to the database at `url`.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;

    /// Release the connection.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}
