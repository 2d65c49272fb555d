use crate::{
    Error, OrmError, Result, SqlWriter,
    writer::{MSSqlWriter, MySQLSqlWriter, OracleSqlWriter, PostgresSqlWriter, SQLiteSqlWriter},
};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// SQL variants with their own quoting, pagination and type rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySQL,
    Postgres,
    SQLite,
    MSSql,
    Oracle,
}

impl Dialect {
    /// Resolves the dialect spoken by a database driver.
    pub fn from_driver(driver: &str) -> Result<Dialect> {
        Ok(match driver {
            "mysql" | "mymysql" => Dialect::MySQL,
            "postgres" => Dialect::Postgres,
            "sqlite3" => Dialect::SQLite,
            "odbc" => Dialect::MSSql,
            "oci8" => Dialect::Oracle,
            _ => {
                let error = Error::new(OrmError::UnsupportedDriver(driver.into()));
                log::error!("{:#}", error);
                return Err(error);
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySQL => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::SQLite => "sqlite3",
            Dialect::MSSql => "mssql",
            Dialect::Oracle => "oracle",
        }
    }

    pub fn writer(&self) -> &'static dyn SqlWriter {
        match self {
            Dialect::MySQL => &MySQLSqlWriter,
            Dialect::Postgres => &PostgresSqlWriter,
            Dialect::SQLite => &SQLiteSqlWriter,
            Dialect::MSSql => &MSSqlWriter,
            Dialect::Oracle => &OracleSqlWriter,
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Ok(match value.to_ascii_lowercase().as_str() {
            "mysql" => Dialect::MySQL,
            "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite3" | "sqlite" => Dialect::SQLite,
            "mssql" => Dialect::MSSql,
            "oracle" => Dialect::Oracle,
            _ => return Err(OrmError::UnsupportedDialect(value.into()).into()),
        })
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a dialect restricts the rows returned by a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT` clause with an offset.
    LimitOffset,
    /// `SELECT TOP n`, row numbering when an offset is requested.
    Top,
    /// Row numbering through `ROW_NUMBER() OVER(..)` wrapped in an outer select.
    RowNumber,
}

/// Positional parameter marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`
    Unnumbered,
    /// Prefix followed by the parameter position, for example `$1`.
    Numbered(char),
}

impl Placeholder {
    pub fn is_numbered(&self) -> bool {
        matches!(self, Placeholder::Numbered(..))
    }
}

/// Catalog queries listing tables, columns and indexes of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQueries {
    /// Bound to the database name.
    pub tables: &'static str,
    /// Bound to the database and the table name.
    pub columns: &'static str,
    /// Bound to the database and the table name.
    pub indexes: &'static str,
}
