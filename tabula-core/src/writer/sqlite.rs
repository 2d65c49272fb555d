use crate::{Column, Dialect, SqlType, SqlWriter, writer::force_serial_flags};
use std::borrow::Cow;

#[derive(Default, Debug, Clone, Copy)]
pub struct SQLiteSqlWriter;

impl SqlWriter for SQLiteSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn auto_increment_str(&self) -> &'static str {
        "AUTOINCREMENT"
    }

    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        if column.sql_type.is_serial() {
            force_serial_flags(column);
        }
        Cow::Borrowed(match column.sql_type {
            _ if column.sql_type.is_integer() => "INTEGER",
            SqlType::BOOL | SqlType::BIT => "INTEGER",
            _ if column.is_text() => "TEXT",
            _ if column.is_blob() => "BLOB",
            SqlType::REAL | SqlType::FLOAT | SqlType::DOUBLE => "REAL",
            SqlType::DECIMAL | SqlType::NUMERIC => "NUMERIC",
            SqlType::TIMESTAMPZ => "TEXT",
            _ => column.sql_type.name,
        })
    }

    /// Declared lengths are not enforced, `INTEGER PRIMARY KEY` must stay bare.
    fn accepts_length(&self, _physical: &str) -> bool {
        false
    }
}
