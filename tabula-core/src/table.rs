use crate::{Column, Grouping, OrmError, Result};
use indexmap::IndexMap;

/// Schema of one table, either mapped from a type or read from a live catalog.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Declaration order is authoritative for generated column lists.
    pub columns: IndexMap<String, Column>,
    /// Index group name to its member columns, in first seen order.
    pub indexes: IndexMap<String, Vec<String>>,
    /// Unique group name to its member columns, in first seen order.
    pub uniques: IndexMap<String, Vec<String>>,
    pub primary_key: Option<String>,
    pub store_engine: Option<String>,
    pub row_estimate: Option<u64>,
    pub auto_increment: Option<u64>,
}

/// Index read back from the catalog.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Appends a column, registering its primary key flag and its groups.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.contains_key(&column.name) {
            return Err(OrmError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            }
            .into());
        }
        if column.is_primary_key && self.primary_key.is_none() {
            self.primary_key = Some(column.name.clone());
        }
        if let Some(group) = column.index.group_name(&column.name) {
            self.indexes
                .entry(group.to_owned())
                .or_default()
                .push(column.name.clone());
        }
        if let Some(group) = column.unique.group_name(&column.name) {
            self.uniques
                .entry(group.to_owned())
                .or_default()
                .push(column.name.clone());
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Folds a catalog index into the group maps and the member columns.
    pub fn add_index(&mut self, index: Index) {
        let grouping = |column: &str| {
            if index.columns.len() == 1 && index.name == column {
                Grouping::Single
            } else {
                Grouping::Named(index.name.clone())
            }
        };
        for name in &index.columns {
            if let Some(column) = self.columns.get_mut(name) {
                if index.unique {
                    column.unique = grouping(name);
                } else {
                    column.index = grouping(name);
                }
            }
        }
        let groups = if index.unique {
            &mut self.uniques
        } else {
            &mut self.indexes
        };
        groups
            .entry(index.name)
            .or_default()
            .extend(index.columns);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn primary_key_column(&self) -> Option<&Column> {
        self.primary_key.as_deref().and_then(|v| self.columns.get(v))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Comma separated column names in declaration order.
    pub fn column_str(&self) -> String {
        self.column_names().collect::<Vec<_>>().join(", ")
    }

    /// Columns populated by a select.
    pub fn readable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| c.map_type.is_readable())
    }

    /// Columns written by inserts and updates.
    pub fn writable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| c.map_type.is_writable())
    }
}
