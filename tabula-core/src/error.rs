use thiserror::Error;

/// Failure kinds raised by the mapping, compilation and introspection layers.
///
/// Every fallible function returns [`crate::Result`], the kind is recovered with
/// `error.downcast_ref::<OrmError>()`, also when it was attached as context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrmError {
    #[error("Unsupported driver name `{0}`")]
    UnsupportedDriver(String),
    #[error("Unsupported dialect type `{0}`")]
    UnsupportedDialect(String),
    #[error("Malformed annotation on field `{field}` at token `{token}`: {reason}")]
    MalformedAnnotation {
        field: String,
        token: String,
        reason: String,
    },
    #[error("Unknown column type `{0}`")]
    UnknownCanonicalType(String),
    #[error("Malformed column type `{0}` reported by the catalog")]
    MalformedCatalogType(String),
    #[error("Column `{column}` is declared twice in table `{table}`")]
    DuplicateColumn { table: String, column: String },
    #[error("Table `{0}` has no primary key")]
    MissingPrimaryKey(String),
    #[error("Unsupported pagination: {0}")]
    UnsupportedPagination(String),
    #[error("Key `{0}` not found")]
    NotFound(String),
    #[error("While connecting to `{0}`")]
    Connection(String),
    #[error("While running the query:\n{0}")]
    Query(String),
}

impl OrmError {
    pub(crate) fn malformed(
        field: impl Into<String>,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OrmError::MalformedAnnotation {
            field: field.into(),
            token: token.into(),
            reason: reason.into(),
        }
    }
}
