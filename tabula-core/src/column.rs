use crate::SqlType;

/// Membership of a column in an index or in a uniqueness constraint.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum Grouping {
    #[default]
    None,
    /// Group named after the column itself.
    Single,
    /// Group shared with other columns of the same table.
    Named(String),
}

impl Grouping {
    /// The group this column belongs to, if any.
    pub fn group_name<'a>(&'a self, column: &'a str) -> Option<&'a str> {
        match self {
            Grouping::None => None,
            Grouping::Single => Some(column),
            Grouping::Named(name) => Some(name),
        }
    }
}

/// Direction in which a column exchanges data with the database.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    #[default]
    ReadWrite,
    /// Written by inserts and updates, never selected (`->`).
    WriteOnly,
    /// Populated from the database, never written (`<-`).
    ReadOnly,
}

impl MapType {
    pub fn is_readable(&self) -> bool {
        *self != MapType::WriteOnly
    }
    pub fn is_writable(&self) -> bool {
        *self != MapType::ReadOnly
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Path of the originating field, dot separated for embedded structs.
    pub field_name: String,
    pub sql_type: SqlType,
    pub length: u32,
    pub length2: u32,
    pub nullable: bool,
    /// SQL literal, textual values are stored single quoted.
    pub default: Option<String>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub index: Grouping,
    pub unique: Grouping,
    pub map_type: MapType,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        let name = name.into();
        Self {
            field_name: name.clone(),
            name,
            sql_type,
            length: sql_type.default_length,
            length2: sql_type.default_length2,
            nullable: true,
            default: None,
            is_primary_key: false,
            is_auto_increment: false,
            index: Grouping::None,
            unique: Grouping::None,
            map_type: MapType::ReadWrite,
        }
    }

    pub fn is_text(&self) -> bool {
        self.sql_type.is_text()
    }

    pub fn is_blob(&self) -> bool {
        self.sql_type.is_blob()
    }

    /// Sets explicit lengths, a zero length keeps the type default.
    pub fn set_lengths(&mut self, length: u32, length2: u32) {
        if length > 0 {
            self.length = length;
            self.length2 = length2;
        }
    }

    /// Quotes a textual default literal, an empty literal of any other type is dropped.
    pub(crate) fn quote_default(&mut self) {
        if !self.is_text() {
            if self.default.as_deref() == Some("") {
                self.default = None;
            }
            return;
        }
        if let Some(default) = &mut self.default {
            if !default.starts_with('\'') {
                *default = format!("'{}'", default.replace('\'', "''"));
            }
        }
    }
}
