/// Builder for partial `UPDATE` statements
///
/// Collects `(column, value)` pairs and numbers their placeholders in order,
/// then appends the row filter as the last parameter. The result is a single
/// parameterized statement plus the values to bind, in bind order. Nothing
/// here touches the database.
///
/// Column names are `&'static str` so they can only come from code, never
/// from request input. Values are always bound, never interpolated.
///
/// # Example
///
/// ```
/// use taskbook_shared::db::update::UpdateBuilder;
///
/// let stmt = UpdateBuilder::new("users")
///     .set("name", "Alice".to_string())
///     .set_opt("email", None::<String>)
///     .touch("updated_at")
///     .build("id", "id, name, email")
///     .unwrap();
///
/// assert_eq!(
///     stmt.sql,
///     "UPDATE users SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING id, name, email"
/// );
/// assert_eq!(stmt.values, vec!["Alice".to_string()]);
/// assert_eq!(stmt.filter_index, 2);
/// ```

/// Accumulates assignments for one `UPDATE`
#[derive(Debug, Clone)]
pub struct UpdateBuilder<V> {
    table: &'static str,
    assignments: Vec<String>,
    values: Vec<V>,
}

/// A finished statement ready for binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement<V> {
    /// SQL text with `$n` placeholders
    pub sql: String,

    /// Values for `$1..$n-1`, in order
    pub values: Vec<V>,

    /// Placeholder index of the row filter (always `values.len() + 1`)
    pub filter_index: usize,
}

impl<V> UpdateBuilder<V> {
    /// Starts an update against `table`
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Adds `column = $n` bound to `value`
    pub fn set(mut self, column: &'static str, value: V) -> Self {
        self.values.push(value);
        self.assignments
            .push(format!("{} = ${}", column, self.values.len()));
        self
    }

    /// Adds `column = $n` only when `value` is present
    pub fn set_opt(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Adds `column = NOW()`
    ///
    /// Does not count as a change on its own: a builder with only touched
    /// columns still reports [`is_empty`](Self::is_empty).
    pub fn touch(mut self, column: &'static str) -> Self {
        self.assignments.push(format!("{} = NOW()", column));
        self
    }

    /// True when no bound values have been added
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of bound values added so far
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Finishes the statement with `WHERE filter_column = $n RETURNING returning`
    ///
    /// Returns `None` when nothing would be updated.
    pub fn build(self, filter_column: &'static str, returning: &str) -> Option<UpdateStatement<V>> {
        if self.is_empty() {
            return None;
        }

        let filter_index = self.values.len() + 1;
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table,
            self.assignments.join(", "),
            filter_column,
            filter_index,
            returning
        );

        Some(UpdateStatement {
            sql,
            values: self.values,
            filter_index,
        })
    }
}
