use sqlx::FromRow;

/// A row of the session key-value table
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub key: String,
    pub value: String,
    pub saved_at: String,
}
