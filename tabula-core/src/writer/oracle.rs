use crate::{
    Column, Dialect, Pagination, Placeholder, SqlType, SqlWriter, Table,
    writer::{TableOptions, force_serial_flags, write_create_table_statement},
};
use std::borrow::Cow;

/// Runs `statement` through `EXECUTE IMMEDIATE`, ignoring the error `sqlcode`.
fn write_guarded(writer: &OracleSqlWriter, out: &mut String, statement: &str, sqlcode: i32) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("BEGIN EXECUTE IMMEDIATE ");
    writer.write_value_string(out, statement.trim_end_matches(';'));
    out.push_str(&format!(
        "; EXCEPTION WHEN OTHERS THEN IF SQLCODE != {} THEN RAISE; END IF; END;",
        sqlcode
    ));
}

#[derive(Default, Debug, Clone, Copy)]
pub struct OracleSqlWriter;

impl SqlWriter for OracleSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn placeholder(&self) -> Placeholder {
        Placeholder::Numbered(':')
    }

    fn pagination(&self) -> Pagination {
        Pagination::RowNumber
    }

    fn auto_increment_str(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn identity_follows_type(&self) -> bool {
        true
    }

    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        Cow::Borrowed(match column.sql_type {
            SqlType::TINYINT => "NUMBER(3)",
            SqlType::SMALLINT => "NUMBER(5)",
            SqlType::MEDIUMINT | SqlType::INT | SqlType::INTEGER => "NUMBER(10)",
            SqlType::BIGINT => "NUMBER(19)",
            SqlType::SERIAL => {
                force_serial_flags(column);
                "NUMBER(10)"
            }
            SqlType::BIGSERIAL => {
                force_serial_flags(column);
                "NUMBER(19)"
            }
            SqlType::BIT | SqlType::BOOL => "NUMBER(1)",
            SqlType::VARCHAR => "VARCHAR2",
            SqlType::TINYTEXT | SqlType::TEXT | SqlType::MEDIUMTEXT | SqlType::LONGTEXT => "CLOB",
            SqlType::BINARY | SqlType::VARBINARY if column.length > 0 => "RAW",
            SqlType::BINARY | SqlType::VARBINARY => "RAW(2000)",
            _ if column.is_blob() => "BLOB",
            SqlType::DATETIME | SqlType::TIMESTAMP | SqlType::TIME => "TIMESTAMP",
            SqlType::TIMESTAMPZ => "TIMESTAMP WITH TIME ZONE",
            SqlType::DECIMAL | SqlType::NUMERIC => "NUMBER",
            SqlType::REAL | SqlType::FLOAT => "FLOAT",
            SqlType::DOUBLE => "BINARY_DOUBLE",
            _ => column.sql_type.name,
        })
    }

    fn accepts_length(&self, physical: &str) -> bool {
        matches!(physical, "CHAR" | "VARCHAR2" | "RAW" | "NUMBER" | "FLOAT")
    }

    /// The default value must precede the constraints.
    fn write_column_definition(
        &self,
        out: &mut String,
        column: &mut Column,
        table_primary_key: Option<&str>,
    ) {
        self.write_identifier_quoted(out, &column.name);
        out.push(' ');
        let column_type = self.translate_type(column);
        out.push_str(&column_type);
        if column.is_auto_increment {
            out.push(' ');
            out.push_str(self.auto_increment_str());
        } else if let Some(default) = &column.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if column.is_primary_key && table_primary_key.is_none_or(|v| v == column.name) {
            out.push_str(" PRIMARY KEY");
        }
        out.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
    }

    fn write_create_table(
        &self,
        out: &mut String,
        table: &Table,
        if_not_exists: bool,
        options: TableOptions,
    ) {
        if !if_not_exists {
            write_create_table_statement(self, out, table, false, options);
            return;
        }
        let mut statement = String::new();
        write_create_table_statement(self, &mut statement, table, false, options);
        write_guarded(self, out, &statement, -955);
    }

    fn write_drop_table(&self, out: &mut String, table_name: &str, if_exists: bool) {
        let mut statement = String::from("DROP TABLE ");
        self.write_identifier_quoted(&mut statement, table_name);
        if if_exists {
            write_guarded(self, out, &statement, -942);
        } else {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&statement);
            out.push(';');
        }
    }

    fn row_number_alias(&self) -> &'static str {
        "rn"
    }

    fn write_subquery_alias(&self, out: &mut String) {
        out.push_str(" a");
    }
}
