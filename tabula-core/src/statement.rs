use crate::{Column, Error, OrmError, Result, SqlWriter, Table, Value, writer::TableOptions};
use std::sync::Arc;

/// Restriction applied to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Predicate embedded verbatim.
    Text(String),
    /// Equality against the primary key of the statement table.
    PrimaryKey(Value),
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::Text(value.into())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::Text(value)
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        Condition::PrimaryKey(value)
    }
}

macro_rules! impl_condition_from_key {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Condition {
                fn from(value: $source) -> Self {
                    Condition::PrimaryKey(value.into())
                }
            }
        )+
    };
}

impl_condition_from_key!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Clause fragments accumulated for one query.
///
/// Fragments are opaque SQL text, the table name and the column list are embedded as given.
#[derive(Default, Debug, Clone)]
pub struct Statement {
    pub table_name: String,
    pub table: Option<Arc<Table>>,
    pub where_str: String,
    pub params: Vec<Value>,
    pub order_str: String,
    pub join_str: String,
    pub group_by_str: String,
    pub having_str: String,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub columns: Vec<String>,
    pub store_engine: Option<String>,
    pub charset: Option<String>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_table(table: Arc<Table>) -> Self {
        Self {
            table_name: table.name.clone(),
            table: Some(table),
            ..Default::default()
        }
    }

    pub fn table_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.table_name = name.into();
        self
    }

    pub fn table(&mut self, table: Arc<Table>) -> &mut Self {
        self.table_name = table.name.clone();
        self.table = Some(table);
        self
    }

    /// Sets the WHERE clause, replacing the previous one and its parameters.
    ///
    /// `counter` is the number of the next numbered placeholder, it is left pointing after the
    /// parameters of this statement.
    pub fn filter(
        &mut self,
        writer: &dyn SqlWriter,
        counter: &mut usize,
        condition: impl Into<Condition>,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self> {
        let args: Vec<Value> = args.into_iter().collect();
        *counter = 1 + args.len();
        match condition.into() {
            Condition::Text(predicate) => {
                self.where_str = predicate;
                self.params = args;
            }
            Condition::PrimaryKey(value) => {
                let pk = self.primary_key()?;
                let mut predicate = writer.quote(pk);
                predicate.push_str(" = ");
                writer.write_placeholder(&mut predicate, *counter);
                *counter += 1;
                self.where_str = predicate;
                self.params = args;
                self.params.push(value);
            }
        }
        Ok(self)
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(&mut self, order: impl Into<String>) -> &mut Self {
        self.order_str = order.into();
        self
    }

    pub fn group_by(&mut self, keys: impl Into<String>) -> &mut Self {
        self.group_by_str = keys.into();
        self
    }

    pub fn having(&mut self, condition: impl Into<String>) -> &mut Self {
        self.having_str = condition.into();
        self
    }

    /// Appends `<operator> JOIN <table> ON <condition>`.
    pub fn join(&mut self, operator: &str, table: &str, condition: &str) -> &mut Self {
        if !self.join_str.is_empty() {
            self.join_str.push(' ');
        }
        self.join_str
            .push_str(&format!("{} JOIN {} ON {}", operator, table, condition));
        self
    }

    /// Restricts the selected columns.
    pub fn cols<S: Into<String>>(&mut self, columns: impl IntoIterator<Item = S>) -> &mut Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn store_engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.store_engine = Some(engine.into());
        self
    }

    pub fn charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = Some(charset.into());
        self
    }

    /// Explicit columns, else the readable columns of the table, else `*`.
    pub fn column_list(&self) -> String {
        if !self.columns.is_empty() {
            return self.columns.join(", ");
        }
        match &self.table {
            Some(table) if table.readable_columns().next().is_some() => table
                .readable_columns()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => "*".into(),
        }
    }

    fn mapped_table(&self) -> Result<&Table> {
        self.table.as_deref().ok_or_else(|| {
            Error::msg(format!(
                "Statement on `{}` has no mapped table",
                self.table_name
            ))
        })
    }

    fn primary_key(&self) -> Result<&str> {
        self.mapped_table()?
            .primary_key
            .as_deref()
            .ok_or_else(|| OrmError::MissingPrimaryKey(self.table_name.clone()).into())
    }

    pub fn select_sql(&self, writer: &dyn SqlWriter) -> Result<String> {
        let mut out = String::with_capacity(128);
        writer.write_select(&mut out, self)?;
        Ok(out)
    }

    pub fn count_sql(&self, writer: &dyn SqlWriter) -> Result<String> {
        if self.table_name.is_empty() {
            return Err(Error::msg("Cannot count rows without a table"));
        }
        let mut out = String::with_capacity(64);
        writer.write_count(&mut out, self);
        Ok(out)
    }

    /// Columns bound by [`Statement::insert_sql`], in order.
    pub fn insert_columns(&self) -> Result<Vec<&Column>> {
        Ok(self
            .mapped_table()?
            .writable_columns()
            .filter(|c| !c.is_auto_increment)
            .collect())
    }

    /// Columns bound by [`Statement::update_sql`], in order.
    pub fn update_columns(&self) -> Result<Vec<&Column>> {
        Ok(self
            .mapped_table()?
            .writable_columns()
            .filter(|c| !c.is_auto_increment && !c.is_primary_key)
            .collect())
    }

    /// INSERT of one row, `values` follow [`Statement::insert_columns`].
    pub fn insert_sql(
        &self,
        writer: &dyn SqlWriter,
        values: Vec<Value>,
    ) -> Result<(String, Vec<Value>)> {
        let columns = self.insert_columns()?;
        check_arity(&self.table_name, columns.len(), values.len())?;
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let mut out = String::with_capacity(64 + names.len() * 16);
        writer.write_insert(&mut out, &self.table_name, &names, 1);
        Ok((out, values))
    }

    /// UPDATE restricted by the WHERE clause, `values` follow [`Statement::update_columns`].
    ///
    /// The returned parameters are ordered as the placeholders expect them.
    pub fn update_sql(
        &self,
        writer: &dyn SqlWriter,
        values: Vec<Value>,
    ) -> Result<(String, Vec<Value>)> {
        let columns = self.update_columns()?;
        check_arity(&self.table_name, columns.len(), values.len())?;
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let mut out = String::with_capacity(64 + names.len() * 16);
        let params = if writer.placeholder().is_numbered() {
            writer.write_update(
                &mut out,
                &self.table_name,
                &names,
                self.params.len() + 1,
                &self.where_str,
            );
            self.params.iter().cloned().chain(values).collect()
        } else {
            writer.write_update(&mut out, &self.table_name, &names, 1, &self.where_str);
            values.into_iter().chain(self.params.iter().cloned()).collect()
        };
        Ok((out, params))
    }

    pub fn delete_sql(&self, writer: &dyn SqlWriter) -> Result<(String, Vec<Value>)> {
        if self.table_name.is_empty() {
            return Err(Error::msg("Cannot delete rows without a table"));
        }
        let mut out = String::with_capacity(64);
        writer.write_delete(&mut out, &self.table_name, &self.where_str);
        Ok((out, self.params.clone()))
    }

    /// CREATE TABLE followed by one CREATE INDEX per index and unique group.
    pub fn create_table_sql(
        &self,
        writer: &dyn SqlWriter,
        if_not_exists: bool,
    ) -> Result<Vec<String>> {
        let table = self.mapped_table()?;
        let mut result = Vec::with_capacity(1 + table.indexes.len() + table.uniques.len());
        let mut out = String::new();
        writer.write_create_table(
            &mut out,
            table,
            if_not_exists,
            TableOptions {
                store_engine: self.store_engine.as_deref(),
                charset: self.charset.as_deref(),
            },
        );
        result.push(out);
        let groups = table
            .indexes
            .iter()
            .map(|(k, v)| (k, v, false))
            .chain(table.uniques.iter().map(|(k, v)| (k, v, true)));
        for (group, columns, unique) in groups {
            let mut out = String::new();
            writer.write_create_index(&mut out, &table.name, group, columns, unique);
            result.push(out);
        }
        Ok(result)
    }

    pub fn drop_table_sql(&self, writer: &dyn SqlWriter, if_exists: bool) -> Result<String> {
        if self.table_name.is_empty() {
            return Err(Error::msg("Cannot drop a table without a name"));
        }
        let mut out = String::new();
        writer.write_drop_table(&mut out, &self.table_name, if_exists);
        Ok(out)
    }
}

fn check_arity(table: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::msg(format!(
            "Table `{}` expects {} values, {} were given",
            table, expected, actual
        )));
    }
    Ok(())
}
