use crate::{
    Dialect, QueryResult, Result, RowLabeled, RowsAffected, Value,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

/// Runs SQL text with positional parameters against a database.
pub trait Executor: Send {
    fn dialect(&self) -> Dialect;

    /// General method to send any query and return any result type (either row or count)
    fn run(
        &mut self,
        query: String,
        params: Vec<Value>,
    ) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(
        &mut self,
        query: String,
        params: Vec<Value>,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(query, params).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(
        &mut self,
        query: String,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(query, params)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}
