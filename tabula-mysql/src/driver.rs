use crate::MySQLConnection;
use tabula_core::{Dialect, Driver};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLDriver;
impl MySQLDriver {
    pub const fn new() -> Self {
        Self
    }
}

impl Driver for MySQLDriver {
    type Connection = MySQLConnection;

    const NAME: &'static str = "mysql";

    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }
}
