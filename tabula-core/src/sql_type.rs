use crate::ValueKind;
use std::fmt::{self, Display};

/// Dialect independent column type, translated to the physical type by a [`crate::SqlWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlType {
    pub name: &'static str,
    pub default_length: u32,
    pub default_length2: u32,
}

const fn sql_type(name: &'static str, default_length: u32, default_length2: u32) -> SqlType {
    SqlType {
        name,
        default_length,
        default_length2,
    }
}

impl SqlType {
    pub const BIT: SqlType = sql_type("BIT", 0, 0);
    pub const TINYINT: SqlType = sql_type("TINYINT", 0, 0);
    pub const SMALLINT: SqlType = sql_type("SMALLINT", 0, 0);
    pub const MEDIUMINT: SqlType = sql_type("MEDIUMINT", 0, 0);
    pub const INT: SqlType = sql_type("INT", 0, 0);
    pub const INTEGER: SqlType = sql_type("INTEGER", 0, 0);
    pub const BIGINT: SqlType = sql_type("BIGINT", 0, 0);

    pub const CHAR: SqlType = sql_type("CHAR", 0, 0);
    pub const VARCHAR: SqlType = sql_type("VARCHAR", 255, 0);
    pub const TINYTEXT: SqlType = sql_type("TINYTEXT", 0, 0);
    pub const TEXT: SqlType = sql_type("TEXT", 0, 0);
    pub const MEDIUMTEXT: SqlType = sql_type("MEDIUMTEXT", 0, 0);
    pub const LONGTEXT: SqlType = sql_type("LONGTEXT", 0, 0);
    pub const BINARY: SqlType = sql_type("BINARY", 0, 0);
    pub const VARBINARY: SqlType = sql_type("VARBINARY", 0, 0);

    pub const DATE: SqlType = sql_type("DATE", 0, 0);
    pub const DATETIME: SqlType = sql_type("DATETIME", 0, 0);
    pub const TIME: SqlType = sql_type("TIME", 0, 0);
    pub const TIMESTAMP: SqlType = sql_type("TIMESTAMP", 0, 0);
    pub const TIMESTAMPZ: SqlType = sql_type("TIMESTAMPZ", 0, 0);

    pub const DECIMAL: SqlType = sql_type("DECIMAL", 0, 0);
    pub const NUMERIC: SqlType = sql_type("NUMERIC", 0, 0);
    pub const REAL: SqlType = sql_type("REAL", 0, 0);
    pub const FLOAT: SqlType = sql_type("FLOAT", 0, 0);
    pub const DOUBLE: SqlType = sql_type("DOUBLE", 0, 0);

    pub const TINYBLOB: SqlType = sql_type("TINYBLOB", 0, 0);
    pub const BLOB: SqlType = sql_type("BLOB", 0, 0);
    pub const MEDIUMBLOB: SqlType = sql_type("MEDIUMBLOB", 0, 0);
    pub const LONGBLOB: SqlType = sql_type("LONGBLOB", 0, 0);
    pub const BYTEA: SqlType = sql_type("BYTEA", 0, 0);

    pub const BOOL: SqlType = sql_type("BOOL", 0, 0);

    pub const SERIAL: SqlType = sql_type("SERIAL", 0, 0);
    pub const BIGSERIAL: SqlType = sql_type("BIGSERIAL", 0, 0);

    /// Every canonical type, in catalog order.
    pub const CATALOG: &'static [SqlType] = &[
        Self::BIT,
        Self::TINYINT,
        Self::SMALLINT,
        Self::MEDIUMINT,
        Self::INT,
        Self::INTEGER,
        Self::BIGINT,
        Self::CHAR,
        Self::VARCHAR,
        Self::TINYTEXT,
        Self::TEXT,
        Self::MEDIUMTEXT,
        Self::LONGTEXT,
        Self::BINARY,
        Self::VARBINARY,
        Self::DATE,
        Self::DATETIME,
        Self::TIME,
        Self::TIMESTAMP,
        Self::TIMESTAMPZ,
        Self::DECIMAL,
        Self::NUMERIC,
        Self::REAL,
        Self::FLOAT,
        Self::DOUBLE,
        Self::TINYBLOB,
        Self::BLOB,
        Self::MEDIUMBLOB,
        Self::LONGBLOB,
        Self::BYTEA,
        Self::BOOL,
        Self::SERIAL,
        Self::BIGSERIAL,
    ];

    /// Case insensitive catalog lookup. `BOOLEAN` resolves to `BOOL`.
    pub fn lookup(name: &str) -> Option<SqlType> {
        if name.eq_ignore_ascii_case("BOOLEAN") {
            return Some(Self::BOOL);
        }
        Self::CATALOG
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Type inferred for a field without an explicit type token.
    pub fn from_kind(kind: &ValueKind) -> SqlType {
        match kind {
            ValueKind::Int => Self::INT,
            ValueKind::BigInt => Self::BIGINT,
            ValueKind::Float => Self::FLOAT,
            ValueKind::Double => Self::DOUBLE,
            ValueKind::Bool => Self::BOOL,
            ValueKind::Text => Self::VARCHAR,
            ValueKind::Bytes => Self::BLOB,
            ValueKind::Time => Self::DATETIME,
            ValueKind::Composite(..) | ValueKind::Other => Self::TEXT,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self.name,
            "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT"
        )
    }

    pub fn is_blob(&self) -> bool {
        matches!(
            self.name,
            "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BYTEA"
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.name,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "SERIAL"
                | "BIGSERIAL"
        )
    }

    pub fn is_serial(&self) -> bool {
        matches!(self.name, "SERIAL" | "BIGSERIAL")
    }
}

impl Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
