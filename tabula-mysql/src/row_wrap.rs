use crate::ValueWrap;
use mysql_async::FromRowError;
use tabula_core::{RowLabeled, RowNames, Value};

pub(crate) struct RowWrap(pub(crate) RowLabeled);

impl mysql_async::prelude::FromRow for RowWrap {
    fn from_row_opt(mut row: mysql_async::Row) -> Result<Self, FromRowError>
    where
        Self: Sized,
    {
        let names: RowNames = row
            .columns()
            .iter()
            .map(|v| v.name_str().into_owned())
            .collect();
        let mut values = Vec::with_capacity(row.len());
        for i in 0..row.len() {
            match row.take_opt::<ValueWrap, _>(i) {
                Some(Ok(v)) => values.push(v.0),
                Some(Err(..)) => return Err(FromRowError(row)),
                None => values.push(Value::Null),
            }
        }
        Ok(RowWrap(RowLabeled::new(names, values.into())))
    }
}
