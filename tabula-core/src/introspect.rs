//! Rebuilds table descriptors from a live catalog.
//!
//! Only dialects exposing [`crate::CatalogQueries`] (the MySQL family) can be read back. The
//! whole call fails on the first row it cannot make sense of.

use crate::{
    CatalogQueries, Column, Executor, Index, OrmError, Result, RowLabeled, SqlType, Table,
    stream::TryStreamExt,
    util::{parse_lengths, split_type_token},
};
use indexmap::IndexMap;

fn catalog_queries<E: Executor>(executor: &E) -> Result<&'static CatalogQueries> {
    let dialect = executor.dialect();
    dialect.writer().catalog_queries().ok_or_else(|| {
        let error = OrmError::UnsupportedDialect(dialect.name().into());
        log::error!("Cannot read the catalog: {:#}", error);
        error.into()
    })
}

async fn fetch_rows<E: Executor>(
    executor: &mut E,
    query: &str,
    args: Vec<crate::Value>,
) -> Result<Vec<RowLabeled>> {
    executor.fetch(query.into(), args).try_collect().await
}

/// Every table of `database`, with its columns and indexes.
pub async fn introspect_tables<E: Executor>(executor: &mut E, database: &str) -> Result<Vec<Table>> {
    let queries = catalog_queries(executor)?;
    let rows = fetch_rows(executor, queries.tables, vec![database.into()]).await?;
    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(name) = row.get(0).to_text() else {
            continue;
        };
        let mut table = Table::new(name);
        table.store_engine = row.get(1).to_text();
        table.row_estimate = row.get(2).as_u64();
        table.auto_increment = row.get(3).as_u64();
        for column in introspect_columns(executor, database, &table.name).await? {
            table.add_column(column)?;
        }
        for (_, index) in introspect_indexes(executor, database, &table.name).await? {
            table.add_index(index);
        }
        log::trace!(
            "Read table `{}` with {} columns from the catalog",
            table.name,
            table.columns.len()
        );
        tables.push(table);
    }
    Ok(tables)
}

/// Columns of `table` in catalog order.
pub async fn introspect_columns<E: Executor>(
    executor: &mut E,
    database: &str,
    table: &str,
) -> Result<Vec<Column>> {
    let queries = catalog_queries(executor)?;
    let rows = fetch_rows(
        executor,
        queries.columns,
        vec![database.into(), table.into()],
    )
    .await?;
    rows.iter().map(column_from_row).collect()
}

/// Builds a column from a `(name, nullable, default, type, key, extra)` catalog row.
pub fn column_from_row(row: &RowLabeled) -> Result<Column> {
    let name = row.get(0).to_text().unwrap_or_default();
    let name = name.trim_matches(|c| c == '`' || c == ' ');
    let column_type = row.get(3).to_text().unwrap_or_default();
    let (type_name, args) = split_type_token(column_type.trim())
        .map_err(|_| OrmError::MalformedCatalogType(column_type.clone()))?;
    // `int unsigned`, `bigint unsigned zerofill`: modifiers follow the bare name.
    let type_name = type_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase();
    let sql_type = SqlType::lookup(&type_name).ok_or_else(|| {
        let error = OrmError::UnknownCanonicalType(type_name.clone());
        log::error!("Column `{}` of the catalog: {:#}", name, error);
        error
    })?;
    let mut column = Column::new(name, sql_type);
    if let Some(args) = args {
        let (length, length2) = parse_lengths(args)
            .map_err(|_| OrmError::MalformedCatalogType(column_type.clone()))?;
        column.set_lengths(length, length2);
    } else {
        (column.length, column.length2) = (0, 0);
    }
    column.nullable = row.get(1).as_str() == Some("YES");
    column.default = row.get(2).to_text();
    column.quote_default();
    column.is_primary_key = row.get(4).as_str() == Some("PRI");
    column.is_auto_increment = row.get(5).as_str() == Some("auto_increment");
    Ok(column)
}

/// Secondary indexes of `table` keyed by group name, the primary key is skipped.
///
/// Names generated by this crate (`IDX_<table>_<group>`, `UQE_<table>_<group>`) are reduced to
/// their group.
pub async fn introspect_indexes<E: Executor>(
    executor: &mut E,
    database: &str,
    table: &str,
) -> Result<IndexMap<String, Index>> {
    let queries = catalog_queries(executor)?;
    let rows = fetch_rows(
        executor,
        queries.indexes,
        vec![database.into(), table.into()],
    )
    .await?;
    let mut result: IndexMap<String, Index> = IndexMap::new();
    for row in rows {
        let Some(name) = row.get(0).to_text().filter(|v| !v.is_empty()) else {
            continue;
        };
        if name == "PRIMARY" {
            continue;
        }
        let non_unique = row.get(1).to_text();
        let unique = !matches!(non_unique.as_deref(), Some("YES" | "1"));
        let column = row.get(2).to_text().unwrap_or_default();
        let column = column.trim_matches(|c| c == '`' || c == ' ');
        let name = group_name(&name, table).to_owned();
        result
            .entry(name.clone())
            .or_insert_with(|| Index {
                name,
                unique,
                columns: Vec::new(),
            })
            .columns
            .push(column.to_owned());
    }
    Ok(result)
}

fn group_name<'a>(index: &'a str, table: &str) -> &'a str {
    ["IDX_", "UQE_"]
        .iter()
        .find_map(|prefix| {
            index
                .strip_prefix(prefix)?
                .strip_prefix(table)?
                .strip_prefix('_')
        })
        .filter(|v| !v.is_empty())
        .unwrap_or(index)
}
