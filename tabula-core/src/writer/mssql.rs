use crate::{
    Column, Dialect, Pagination, SqlType, SqlWriter, Table,
    writer::{TableOptions, force_serial_flags, write_create_table_statement},
};
use std::borrow::Cow;

#[derive(Default, Debug, Clone, Copy)]
pub struct MSSqlWriter;

impl SqlWriter for MSSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::MSSql
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('[');
        self.write_escaped(out, value, ']', "]]");
        out.push(']');
    }

    fn pagination(&self) -> Pagination {
        Pagination::Top
    }

    fn auto_increment_str(&self) -> &'static str {
        "IDENTITY(1,1)"
    }

    fn identity_follows_type(&self) -> bool {
        true
    }

    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        Cow::Borrowed(match column.sql_type {
            SqlType::BOOL => "BIT",
            SqlType::SERIAL => {
                force_serial_flags(column);
                "INT"
            }
            SqlType::BIGSERIAL => {
                force_serial_flags(column);
                "BIGINT"
            }
            SqlType::MEDIUMINT | SqlType::INTEGER => "INT",
            SqlType::DOUBLE => "FLOAT",
            SqlType::TIMESTAMP => "DATETIME",
            SqlType::TIMESTAMPZ => "DATETIMEOFFSET",
            SqlType::TINYTEXT | SqlType::TEXT | SqlType::MEDIUMTEXT | SqlType::LONGTEXT => {
                "VARCHAR(MAX)"
            }
            SqlType::BINARY => "BINARY",
            SqlType::VARBINARY if column.length > 0 => "VARBINARY",
            _ if column.is_blob() => "VARBINARY(MAX)",
            _ => column.sql_type.name,
        })
    }

    fn accepts_length(&self, physical: &str) -> bool {
        matches!(
            physical,
            "CHAR" | "VARCHAR" | "BINARY" | "VARBINARY" | "DECIMAL" | "NUMERIC"
        )
    }

    fn write_create_table(
        &self,
        out: &mut String,
        table: &Table,
        if_not_exists: bool,
        options: TableOptions,
    ) {
        if if_not_exists {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("IF OBJECT_ID(");
            self.write_value_string(out, &table.name);
            out.push_str(", 'U') IS NULL");
        }
        write_create_table_statement(self, out, table, false, options);
    }
}
