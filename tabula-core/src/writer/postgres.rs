use crate::{Column, Dialect, Placeholder, SqlType, SqlWriter, writer::force_serial_flags};
use std::{borrow::Cow, fmt::Write};

#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter;

impl SqlWriter for PostgresSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn placeholder(&self) -> Placeholder {
        Placeholder::Numbered('$')
    }

    /// Auto increment is expressed by the `SERIAL` types.
    fn auto_increment_str(&self) -> &'static str {
        ""
    }

    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        if column.sql_type.is_serial() {
            force_serial_flags(column);
        }
        let serial = column.is_auto_increment;
        Cow::Borrowed(match column.sql_type {
            SqlType::TINYINT | SqlType::SMALLINT if serial => "SMALLSERIAL",
            SqlType::TINYINT | SqlType::SMALLINT => "SMALLINT",
            SqlType::MEDIUMINT | SqlType::INT | SqlType::INTEGER | SqlType::SERIAL if serial => {
                "SERIAL"
            }
            SqlType::MEDIUMINT | SqlType::INT | SqlType::INTEGER => "INTEGER",
            SqlType::BIGINT | SqlType::BIGSERIAL if serial => "BIGSERIAL",
            SqlType::BIGINT => "BIGINT",
            SqlType::BOOL => "BOOLEAN",
            SqlType::DATETIME => "TIMESTAMP",
            SqlType::TIMESTAMPZ => "TIMESTAMP WITH TIME ZONE",
            SqlType::FLOAT => "REAL",
            SqlType::DOUBLE => "DOUBLE PRECISION",
            SqlType::TINYTEXT | SqlType::MEDIUMTEXT | SqlType::LONGTEXT => "TEXT",
            _ if column.is_blob() => "BYTEA",
            _ => column.sql_type.name,
        })
    }

    fn accepts_length(&self, physical: &str) -> bool {
        matches!(physical, "CHAR" | "VARCHAR" | "DECIMAL" | "NUMERIC" | "BIT")
    }

    fn write_limit(&self, out: &mut String, limit: u64, offset: Option<u64>) {
        let _ = write!(out, " LIMIT {}", limit);
        if let Some(offset) = offset {
            let _ = write!(out, " OFFSET {}", offset);
        }
    }
}
