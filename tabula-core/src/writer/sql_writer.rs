use crate::{
    CatalogQueries, Column, Dialect, Error, OrmError, Pagination, Placeholder, Result, SqlType,
    Statement, Table, separated_by,
};
use std::{borrow::Cow, fmt::Write};

/// Options appended to a `CREATE TABLE` by the dialects supporting them.
#[derive(Default, Debug, Clone, Copy)]
pub struct TableOptions<'a> {
    pub store_engine: Option<&'a str>,
    pub charset: Option<&'a str>,
}

/// Appends `(length)` or `(length,length2)`, nothing when `length` is zero.
pub fn write_length_suffix(out: &mut String, length: u32, length2: u32) {
    if length > 0 && length2 > 0 {
        let _ = write!(out, "({},{})", length, length2);
    } else if length > 0 {
        let _ = write!(out, "({})", length);
    }
}

/// Serial types imply an auto incremented, non null primary key.
pub fn force_serial_flags(column: &mut Column) {
    column.is_auto_increment = true;
    column.is_primary_key = true;
    column.nullable = false;
}

/// CREATE TABLE shared by the dialects, `if_not_exists` emits the inline clause.
pub fn write_create_table_statement<W: SqlWriter + ?Sized>(
    writer: &W,
    out: &mut String,
    table: &Table,
    if_not_exists: bool,
    options: TableOptions,
) {
    out.reserve(128 + table.columns.len() * 48);
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("CREATE TABLE ");
    if if_not_exists {
        out.push_str("IF NOT EXISTS ");
    }
    writer.write_identifier_quoted(out, &table.name);
    out.push_str(" (\n");
    separated_by(
        out,
        table.columns.values(),
        |out, column| {
            let mut column = column.clone();
            writer.write_column_definition(out, &mut column, table.primary_key.as_deref());
        },
        ",\n",
    );
    out.push(')');
    if let Some(engine) = options.store_engine.filter(|_| writer.supports_engine()) {
        let _ = write!(out, " ENGINE={}", engine);
    }
    if let Some(charset) = options.charset.filter(|_| writer.supports_charset()) {
        let _ = write!(out, " DEFAULT CHARSET={}", charset);
    }
    out.push(';');
}

/// Dialect printer turning the schema model and the statements into SQL text.
pub trait SqlWriter: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        self.write_identifier_quoted(&mut out, value);
        out
    }

    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    fn placeholder(&self) -> Placeholder {
        Placeholder::Unnumbered
    }

    /// Write the marker of the parameter at `index`, starting from 1.
    fn write_placeholder(&self, out: &mut String, index: usize) {
        match self.placeholder() {
            Placeholder::Unnumbered => out.push('?'),
            Placeholder::Numbered(prefix) => {
                let _ = write!(out, "{}{}", prefix, index);
            }
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination::LimitOffset
    }

    /// Keyword marking an auto incremented column, empty when expressed by the type.
    fn auto_increment_str(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    /// Whether the auto increment keyword must directly follow the column type.
    fn identity_follows_type(&self) -> bool {
        false
    }

    fn supports_engine(&self) -> bool {
        false
    }

    fn supports_charset(&self) -> bool {
        false
    }

    fn catalog_queries(&self) -> Option<&'static CatalogQueries> {
        None
    }

    /// Physical type of the column without the length suffix.
    ///
    /// Serial types update the column flags, the column must be used only after this call.
    fn physical_type(&self, column: &mut Column) -> Cow<'static, str> {
        match column.sql_type {
            SqlType::SERIAL => {
                force_serial_flags(column);
                Cow::Borrowed("INTEGER")
            }
            SqlType::BIGSERIAL => {
                force_serial_flags(column);
                Cow::Borrowed("BIGINT")
            }
            SqlType::BOOL => Cow::Borrowed("BOOLEAN"),
            SqlType::TIMESTAMPZ => Cow::Borrowed("TIMESTAMP WITH TIME ZONE"),
            _ => Cow::Borrowed(column.sql_type.name),
        }
    }

    /// Whether the physical type takes a length suffix.
    fn accepts_length(&self, physical: &str) -> bool {
        !physical.contains('(')
    }

    /// Physical type including the length suffix.
    fn translate_type(&self, column: &mut Column) -> String {
        let mut out = self.physical_type(column).into_owned();
        if self.accepts_length(&out) {
            write_length_suffix(&mut out, column.length, column.length2);
        }
        out
    }

    /// Emit a column definition, `table_primary_key` is the primary key of the owning table.
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
        let identity = column.is_auto_increment && !self.auto_increment_str().is_empty();
        if identity && self.identity_follows_type() {
            out.push(' ');
            out.push_str(self.auto_increment_str());
        }
        if column.is_primary_key && table_primary_key.is_none_or(|v| v == column.name) {
            out.push_str(" PRIMARY KEY");
        }
        if identity && !self.identity_follows_type() {
            out.push(' ');
            out.push_str(self.auto_increment_str());
        }
        out.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
        if let Some(default) = column.default.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
    }

    /// Emit CREATE TABLE with the column definitions.
    fn write_create_table(
        &self,
        out: &mut String,
        table: &Table,
        if_not_exists: bool,
        options: TableOptions,
    ) {
        write_create_table_statement(self, out, table, if_not_exists, options);
    }

    /// Emit CREATE INDEX for one index or unique group, named `IDX_<table>_<group>` or
    /// `UQE_<table>_<group>`.
    fn write_create_index(
        &self,
        out: &mut String,
        table_name: &str,
        group: &str,
        columns: &[String],
        unique: bool,
    ) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(if unique {
            "CREATE UNIQUE INDEX "
        } else {
            "CREATE INDEX "
        });
        let prefix = if unique { "UQE" } else { "IDX" };
        self.write_identifier_quoted(out, &format!("{}_{}_{}", prefix, table_name, group));
        out.push_str(" ON ");
        self.write_identifier_quoted(out, table_name);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier_quoted(out, v),
            ", ",
        );
        out.push_str(");");
    }

    /// Emit DROP TABLE statement.
    fn write_drop_table(&self, out: &mut String, table_name: &str, if_exists: bool) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_identifier_quoted(out, table_name);
        out.push(';');
    }

    /// Emit the LIMIT clause of the dialects paginating with [`Pagination::LimitOffset`].
    fn write_limit(&self, out: &mut String, limit: u64, offset: Option<u64>) {
        match offset {
            Some(offset) => {
                let _ = write!(out, " LIMIT {}, {}", offset, limit);
            }
            None => {
                let _ = write!(out, " LIMIT {}", limit);
            }
        }
    }

    /// Column alias of the row number in the paginated subquery.
    fn row_number_alias(&self) -> &'static str {
        "rownum"
    }

    /// Alias of the paginated subquery.
    fn write_subquery_alias(&self, out: &mut String) {
        out.push_str(" as a");
    }

    /// Emit the SELECT described by the statement, paginated the way the dialect allows.
    fn write_select(&self, out: &mut String, statement: &Statement) -> Result<()> {
        if statement.table_name.is_empty() {
            return Err(Error::msg("Cannot compile a select without a table"));
        }
        let limit = statement.limit;
        let offset = statement.offset.filter(|v| *v > 0);
        let Some(limit) = limit else {
            if offset.is_some() {
                return Err(OrmError::UnsupportedPagination(
                    "an offset requires a limit".into(),
                )
                .into());
            }
            self.write_select_plain(out, statement, None);
            return Ok(());
        };
        match self.pagination() {
            Pagination::LimitOffset => {
                self.write_select_plain(out, statement, None);
                self.write_limit(out, limit, offset);
            }
            Pagination::Top if offset.is_none() => {
                self.write_select_plain(out, statement, Some(limit));
            }
            Pagination::Top | Pagination::RowNumber => {
                self.write_select_row_number(out, statement, limit, offset.unwrap_or(0))?;
            }
        }
        Ok(())
    }

    /// Emit the unpaginated select, with `TOP` when given.
    fn write_select_plain(&self, out: &mut String, statement: &Statement, top: Option<u64>) {
        out.push_str("SELECT ");
        if let Some(top) = top {
            let _ = write!(out, "TOP {} ", top);
        }
        out.push_str(&statement.column_list());
        out.push_str(" FROM ");
        out.push_str(&statement.table_name);
        if !statement.join_str.is_empty() {
            out.push(' ');
            out.push_str(&statement.join_str);
        }
        if !statement.where_str.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(&statement.where_str);
        }
        if !statement.group_by_str.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&statement.group_by_str);
        }
        if !statement.having_str.is_empty() {
            out.push_str(" HAVING ");
            out.push_str(&statement.having_str);
        }
        if !statement.order_str.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&statement.order_str);
        }
    }

    /// Emit the select numbering the rows in a subquery and filtering them by number.
    fn write_select_row_number(
        &self,
        out: &mut String,
        statement: &Statement,
        limit: u64,
        offset: u64,
    ) -> Result<()> {
        if !statement.group_by_str.is_empty() || !statement.having_str.is_empty() {
            return Err(OrmError::UnsupportedPagination(format!(
                "GROUP BY and HAVING cannot be paginated by row number on {}",
                self.dialect()
            ))
            .into());
        }
        let order = if !statement.order_str.is_empty() {
            statement.order_str.as_str()
        } else if let Some(pk) = statement
            .table
            .as_ref()
            .and_then(|v| v.primary_key.as_deref())
        {
            pk
        } else {
            return Err(OrmError::UnsupportedPagination(format!(
                "paginating `{}` by row number requires an ORDER BY or a primary key",
                statement.table_name
            ))
            .into());
        };
        let columns = statement.column_list();
        let numbered = if columns == "*" {
            format!("{}.*", statement.table_name)
        } else {
            columns.clone()
        };
        let alias = self.row_number_alias();
        let _ = write!(
            out,
            "select {} from (select ROW_NUMBER() OVER(order by {} )as {},{} from {}",
            columns, order, alias, numbered, statement.table_name
        );
        if !statement.join_str.is_empty() {
            out.push(' ');
            out.push_str(&statement.join_str);
        }
        if !statement.where_str.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(&statement.where_str);
        }
        out.push(')');
        self.write_subquery_alias(out);
        let _ = write!(out, " where {} between {} and {}", alias, offset, limit);
        Ok(())
    }

    /// Emit SELECT COUNT(*) restricted by the statement conditions.
    fn write_count(&self, out: &mut String, statement: &Statement) {
        out.push_str("SELECT COUNT(*) FROM ");
        out.push_str(&statement.table_name);
        if !statement.join_str.is_empty() {
            out.push(' ');
            out.push_str(&statement.join_str);
        }
        if !statement.where_str.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(&statement.where_str);
        }
    }

    /// Emit INSERT of one row, placeholders are numbered from `first`.
    fn write_insert(&self, out: &mut String, table_name: &str, columns: &[&str], first: usize) {
        out.push_str("INSERT INTO ");
        self.write_identifier_quoted(out, table_name);
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, v| self.write_identifier_quoted(out, v),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            first..first + columns.len(),
            |out, i| self.write_placeholder(out, i),
            ", ",
        );
        out.push_str(");");
    }

    /// Emit UPDATE of the given columns, placeholders are numbered from `first`.
    fn write_update(
        &self,
        out: &mut String,
        table_name: &str,
        columns: &[&str],
        first: usize,
        condition: &str,
    ) {
        out.push_str("UPDATE ");
        self.write_identifier_quoted(out, table_name);
        out.push_str(" SET ");
        separated_by(
            out,
            columns.iter().zip(first..),
            |out, (v, i)| {
                self.write_identifier_quoted(out, v);
                out.push_str(" = ");
                self.write_placeholder(out, i);
            },
            ", ",
        );
        if !condition.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(condition);
        }
        out.push(';');
    }

    /// Emit DELETE restricted by `condition`.
    fn write_delete(&self, out: &mut String, table_name: &str, condition: &str) {
        out.push_str("DELETE FROM ");
        self.write_identifier_quoted(out, table_name);
        if !condition.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(condition);
        }
        out.push(';');
    }
}
