use crate::{
    Condition, Engine, Error, Executor, Mapped, Result, RowLabeled, RowsAffected, Statement,
    Value, stream::TryStreamExt,
};

/// A unit of work: a sequence of statements compiled for the engine dialect.
///
/// The placeholder counter starts at 1 and is reset by every new statement.
pub struct Session<'e> {
    engine: &'e Engine,
    statements: Vec<Statement>,
    param_iteration: usize,
}

impl<'e> Session<'e> {
    pub fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            statements: vec![Statement::new()],
            param_iteration: 1,
        }
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// The statement the builder methods apply to.
    pub fn statement(&self) -> &Statement {
        // A session always holds at least one statement.
        &self.statements[self.statements.len() - 1]
    }

    pub fn statement_mut(&mut self) -> &mut Statement {
        let last = self.statements.len() - 1;
        &mut self.statements[last]
    }

    /// Number of the next numbered placeholder.
    pub fn param_iteration(&self) -> usize {
        self.param_iteration
    }

    /// Starts a new statement, the previous ones are kept.
    pub fn new_statement(&mut self) -> &mut Self {
        self.statements.push(Statement::new());
        self.param_iteration = 1;
        self
    }

    /// Targets the table mapped from `T`.
    pub fn for_type<T: Mapped + 'static>(&mut self) -> Result<&mut Self> {
        let table = self.engine.auto_map::<T>()?;
        self.statement_mut().table(table);
        Ok(self)
    }

    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        self.statement_mut().table_name(name);
        self
    }

    /// Sets the WHERE clause, either a predicate with its arguments or a primary key value.
    pub fn filter(
        &mut self,
        condition: impl Into<Condition>,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self> {
        let writer = self.engine.writer();
        let mut counter = self.param_iteration;
        self.statement_mut()
            .filter(writer, &mut counter, condition, args)?;
        self.param_iteration = counter;
        Ok(self)
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.statement_mut().limit(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.statement_mut().offset(offset);
        self
    }

    pub fn order_by(&mut self, order: impl Into<String>) -> &mut Self {
        self.statement_mut().order_by(order);
        self
    }

    pub fn group_by(&mut self, keys: impl Into<String>) -> &mut Self {
        self.statement_mut().group_by(keys);
        self
    }

    pub fn having(&mut self, condition: impl Into<String>) -> &mut Self {
        self.statement_mut().having(condition);
        self
    }

    pub fn join(&mut self, operator: &str, table: &str, condition: &str) -> &mut Self {
        self.statement_mut().join(operator, table, condition);
        self
    }

    pub fn cols<S: Into<String>>(&mut self, columns: impl IntoIterator<Item = S>) -> &mut Self {
        self.statement_mut().cols(columns);
        self
    }

    pub fn store_engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.statement_mut().store_engine(engine);
        self
    }

    pub fn charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.statement_mut().charset(charset);
        self
    }

    /// Compiles the select of the current statement.
    pub fn select_sql(&self) -> Result<String> {
        self.statement().select_sql(self.engine.writer())
    }

    fn check_dialect<E: Executor>(&self, executor: &E) -> Result<()> {
        if executor.dialect() != self.engine.dialect() {
            let error = Error::msg(format!(
                "Cannot run {} statements on a {} executor",
                self.engine.dialect(),
                executor.dialect()
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }

    /// Runs a query and collects its rows.
    pub async fn query<E: Executor>(
        &self,
        executor: &mut E,
        sql: String,
        params: Vec<Value>,
    ) -> Result<Vec<RowLabeled>> {
        self.check_dialect(executor)?;
        self.engine.log_sql(&sql, &params);
        executor.fetch(sql, params).try_collect().await
    }

    /// Runs a modify statement.
    pub async fn exec<E: Executor>(
        &self,
        executor: &mut E,
        sql: String,
        params: Vec<Value>,
    ) -> Result<RowsAffected> {
        self.check_dialect(executor)?;
        self.engine.log_sql(&sql, &params);
        executor.execute(sql, params).await
    }

    /// Rows selected by the current statement.
    pub async fn find<E: Executor>(&self, executor: &mut E) -> Result<Vec<RowLabeled>> {
        let sql = self.select_sql()?;
        self.query(executor, sql, self.statement().params.clone())
            .await
    }

    /// Number of rows matching the current statement.
    pub async fn count<E: Executor>(&self, executor: &mut E) -> Result<u64> {
        let sql = self.statement().count_sql(self.engine.writer())?;
        let rows = self
            .query(executor, sql, self.statement().params.clone())
            .await?;
        rows.first()
            .and_then(|row| row.get(0).as_u64())
            .ok_or_else(|| Error::msg("The count query did not return a number"))
    }

    /// Inserts one row into the statement table, `values` follow `Statement::insert_columns`.
    pub async fn insert<E: Executor>(
        &self,
        executor: &mut E,
        values: Vec<Value>,
    ) -> Result<RowsAffected> {
        let (sql, params) = self.statement().insert_sql(self.engine.writer(), values)?;
        self.exec(executor, sql, params).await
    }

    /// Updates the rows matching the current statement.
    pub async fn update<E: Executor>(
        &self,
        executor: &mut E,
        values: Vec<Value>,
    ) -> Result<RowsAffected> {
        let (sql, params) = self.statement().update_sql(self.engine.writer(), values)?;
        self.exec(executor, sql, params).await
    }

    /// Deletes the rows matching the current statement.
    pub async fn delete<E: Executor>(&self, executor: &mut E) -> Result<RowsAffected> {
        let (sql, params) = self.statement().delete_sql(self.engine.writer())?;
        self.exec(executor, sql, params).await
    }

    /// Creates the statement table and its indexes.
    pub async fn create_table<E: Executor>(
        &self,
        executor: &mut E,
        if_not_exists: bool,
    ) -> Result<()> {
        for sql in self
            .statement()
            .create_table_sql(self.engine.writer(), if_not_exists)?
        {
            self.exec(executor, sql, Vec::new()).await?;
        }
        Ok(())
    }

    pub async fn drop_table<E: Executor>(&self, executor: &mut E, if_exists: bool) -> Result<()> {
        let sql = self
            .statement()
            .drop_table_sql(self.engine.writer(), if_exists)?;
        self.exec(executor, sql, Vec::new()).await?;
        Ok(())
    }
}
