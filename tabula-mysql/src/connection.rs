use crate::{MySQLDriver, RowWrap, ValueWrap};
use async_stream::try_stream;
use mysql_async::{Conn, Opts, Params, prelude::Queryable};
use std::{borrow::Cow, sync::Arc};
use tabula_core::{
    Connection, Context, Dialect, Driver, Error, Executor, OrmError, QueryResult, Result,
    RowsAffected, Value,
    stream::{Stream, StreamExt, TryStreamExt},
    truncate_long,
};
use url::Url;

pub struct MySQLConnection {
    pub(crate) connection: Conn,
}

fn positional_params(values: Vec<Value>) -> Result<Params> {
    if values.is_empty() {
        return Ok(Params::Empty);
    }
    Ok(Params::Positional(
        values
            .into_iter()
            .map(|v| mysql_async::Value::try_from(ValueWrap(v)))
            .collect::<Result<_>>()?,
    ))
}

impl Executor for MySQLConnection {
    fn dialect(&self) -> Dialect {
        MySQLDriver.dialect()
    }

    fn run(
        &mut self,
        query: String,
        params: Vec<Value>,
    ) -> impl Stream<Item = Result<QueryResult>> + Send {
        let context = Arc::new(OrmError::Query(truncate_long!(query).to_string()));
        try_stream! {
            let mut rows = 0;
            let affected = if params.is_empty() {
                let mut result = self.connection.query_iter(query).await?;
                while let Some(mut stream) = result.stream::<RowWrap>().await? {
                    while let Some(row) = stream.next().await.transpose()? {
                        rows += 1;
                        yield QueryResult::Row(row.0);
                    }
                }
                RowsAffected {
                    rows_affected: result.affected_rows(),
                    last_insert_id: result.last_insert_id(),
                }
            } else {
                let params = positional_params(params)?;
                let mut result = self.connection.exec_iter(query, params).await?;
                while let Some(mut stream) = result.stream::<RowWrap>().await? {
                    while let Some(row) = stream.next().await.transpose()? {
                        rows += 1;
                        yield QueryResult::Row(row.0);
                    }
                }
                RowsAffected {
                    rows_affected: result.affected_rows(),
                    last_insert_id: result.last_insert_id(),
                }
            };
            if rows == 0 {
                yield QueryResult::Affected(affected);
            }
        }
        .map_err(move |e: Error| {
            let e = e.context((*context).clone());
            log::error!("{:#}", e);
            e
        })
    }
}

impl Connection for MySQLConnection {
    async fn connect(url: Cow<'static, str>) -> Result<MySQLConnection> {
        let context = || OrmError::Connection(truncate_long!(url).to_string());
        let prefix = format!("{}://", MySQLDriver::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "MySQL connection url must start with `{}`",
                &prefix
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let url = Url::parse(&url).with_context(context)?;
        let config = Opts::from_url(url.as_str()).with_context(context)?;
        let connection = Conn::new(config).await.with_context(context)?;
        Ok(MySQLConnection { connection })
    }

    async fn close(self) -> Result<()> {
        self.connection
            .disconnect()
            .await
            .context("While closing the MySQL connection")?;
        Ok(())
    }
}
