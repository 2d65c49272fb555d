use crate::{Annotation, Column, NameMapper, OrmError, Result, SqlType, Table};
use std::fmt::{self, Debug};

/// Broad category of a field type, used to infer the column type.
#[derive(Clone, Copy)]
pub enum ValueKind {
    /// Integers up to 32 bits.
    Int,
    /// 64 bits integers.
    BigInt,
    Float,
    Double,
    Bool,
    Text,
    Bytes,
    Time,
    /// Nested record whose fields can be embedded with `extends`.
    Composite(fn() -> Vec<FieldDescriptor>),
    Other,
}

impl Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => f.write_str("Int"),
            ValueKind::BigInt => f.write_str("BigInt"),
            ValueKind::Float => f.write_str("Float"),
            ValueKind::Double => f.write_str("Double"),
            ValueKind::Bool => f.write_str("Bool"),
            ValueKind::Text => f.write_str("Text"),
            ValueKind::Bytes => f.write_str("Bytes"),
            ValueKind::Time => f.write_str("Time"),
            ValueKind::Composite(..) => f.write_str("Composite(..)"),
            ValueKind::Other => f.write_str("Other"),
        }
    }
}

/// Name, kind and optional annotation of one field of a mapped record.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: ValueKind,
    pub annotation: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: ValueKind, annotation: Option<&'static str>) -> Self {
        Self {
            name,
            kind,
            annotation,
        }
    }
}

/// A record type that can be mapped to a table.
///
/// Usually implemented with `#[derive(Mapped)]`.
pub trait Mapped {
    /// Name of the type, converted to the table name by the [`NameMapper`].
    fn type_name() -> &'static str;
    /// Fields in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

/// Builds the table of `T`.
pub fn map_type<T: Mapped>(mapper: &dyn NameMapper) -> Result<Table> {
    map_fields(mapper, T::type_name(), &T::fields())
}

/// Builds a table named after `type_name` from its field descriptors.
pub fn map_fields(
    mapper: &dyn NameMapper,
    type_name: &str,
    fields: &[FieldDescriptor],
) -> Result<Table> {
    let mut table = Table::new(mapper.obj_to_table(type_name));
    for column in map_columns(mapper, fields, "")? {
        table.add_column(column)?;
    }
    log::trace!(
        "Mapped `{}` to table `{}` with columns: {}",
        type_name,
        table.name,
        table.column_str()
    );
    Ok(table)
}

fn map_columns(
    mapper: &dyn NameMapper,
    fields: &[FieldDescriptor],
    prefix: &str,
) -> Result<Vec<Column>> {
    let mut columns = Vec::with_capacity(fields.len());
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_owned()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        let Some(text) = field.annotation else {
            columns.push(map_plain(mapper, field, path));
            continue;
        };
        let annotation = Annotation::parse(&path, text)?;
        if annotation.exclude {
            continue;
        }
        if annotation.extends {
            let ValueKind::Composite(nested) = field.kind else {
                return Err(OrmError::malformed(
                    path,
                    "extends",
                    "only a nested record can be extended",
                )
                .into());
            };
            columns.extend(map_columns(mapper, &nested(), &path)?);
            continue;
        }
        columns.push(map_annotated(mapper, field, path, annotation));
    }
    Ok(columns)
}

fn map_plain(mapper: &dyn NameMapper, field: &FieldDescriptor, path: String) -> Column {
    let mut column = Column::new(mapper.obj_to_table(field.name), SqlType::from_kind(&field.kind));
    column.field_name = path;
    if column.name == "id" {
        column.is_primary_key = true;
        column.is_auto_increment = true;
        column.nullable = false;
    }
    column
}

fn map_annotated(
    mapper: &dyn NameMapper,
    field: &FieldDescriptor,
    path: String,
    annotation: Annotation,
) -> Column {
    let sql_type = annotation
        .sql_type
        .unwrap_or_else(|| SqlType::from_kind(&field.kind));
    let name = annotation
        .name
        .unwrap_or_else(|| mapper.obj_to_table(field.name));
    let mut column = Column::new(name, sql_type);
    column.field_name = path;
    if let Some((length, length2)) = annotation.lengths {
        column.set_lengths(length, length2);
    }
    if let Some(nullable) = annotation.nullable {
        column.nullable = nullable;
    }
    column.is_primary_key = annotation.primary_key;
    column.is_auto_increment = annotation.auto_increment;
    column.default = annotation.default;
    column.index = annotation.index;
    column.unique = annotation.unique;
    column.map_type = annotation.map_type;
    column.quote_default();
    column
}
