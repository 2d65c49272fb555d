use crate::{CatalogQueries, Column, Dialect, SqlType, SqlWriter, writer::force_serial_flags};
use std::borrow::Cow;

pub static MYSQL_CATALOG: CatalogQueries = CatalogQueries {
    tables: "SELECT TABLE_NAME, ENGINE, TABLE_ROWS, AUTO_INCREMENT FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_SCHEMA=?",
    columns: "SELECT COLUMN_NAME, IS_NULLABLE, COLUMN_DEFAULT, COLUMN_TYPE, COLUMN_KEY, EXTRA FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_SCHEMA=? AND TABLE_NAME=?",
    indexes: "SELECT INDEX_NAME, NON_UNIQUE, COLUMN_NAME FROM INFORMATION_SCHEMA.STATISTICS WHERE TABLE_SCHEMA=? AND TABLE_NAME=?",
};

#[derive(Default, Debug, Clone, Copy)]
pub struct MySQLSqlWriter;

impl SqlWriter for MySQLSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    fn supports_engine(&self) -> bool {
        true
    }

    fn supports_charset(&self) -> bool {
        true
    }

    fn catalog_queries(&self) -> Option<&'static CatalogQueries> {
        Some(&MYSQL_CATALOG)
    }

    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        Cow::Borrowed(match column.sql_type {
            SqlType::BOOL => "TINYINT",
            SqlType::SERIAL => {
                force_serial_flags(column);
                "INT"
            }
            SqlType::BIGSERIAL => {
                force_serial_flags(column);
                "BIGINT"
            }
            SqlType::BYTEA => "BLOB",
            SqlType::TIMESTAMPZ => {
                column.length = 64;
                column.length2 = 0;
                "CHAR"
            }
            _ => column.sql_type.name,
        })
    }
}
