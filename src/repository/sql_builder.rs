// ==========================================
// SteelWorks Operations - SQL builder
// ==========================================
// Keeps the select list, join path, grouping key and ordering of each
// report query in one readable chain. Values are always bound as `?`
// parameters, never formatted into the text.
// ==========================================

/// Inclusive date-range predicate on `column`, two `?` parameters
///
/// # Example
/// ```
/// use steelworks_ops::repository::sql_builder::date_between;
///
/// assert_eq!(
///     date_between("ir.inspection_date"),
///     "ir.inspection_date BETWEEN ? AND ?"
/// );
/// ```
pub fn date_between(column: &str) -> String {
    format!("{} BETWEEN ? AND ?", column)
}

/// SELECT statement builder (fluent API)
///
/// # Example
/// ```
/// use steelworks_ops::repository::sql_builder::SqlQueryBuilder;
///
/// let sql = SqlQueryBuilder::select(&["dt.defect_code", "SUM(ir.qty_defects) AS total_qty"])
///     .from("inspection_records ir")
///     .join("defect_types dt ON dt.id = ir.defect_type_id")
///     .where_clause("ir.inspection_date BETWEEN ? AND ?")
///     .group_by("dt.defect_code")
///     .order_by("total_qty DESC")
///     .then_by("dt.defect_code ASC")
///     .build();
///
/// assert!(sql.contains("JOIN defect_types dt ON dt.id = ir.defect_type_id"));
/// assert!(sql.ends_with("ORDER BY total_qty DESC, dt.defect_code ASC"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlQueryBuilder {
    columns: Vec<String>,
    from_clause: Option<String>,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    group_by_clause: Vec<String>,
    order_by_clause: Vec<String>,
}

impl SqlQueryBuilder {
    /// Start a SELECT with the given result columns
    pub fn select(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn from(mut self, table: &str) -> Self {
        self.from_clause = Some(table.to_string());
        self
    }

    /// Inner join, `clause` is `"<table> <alias> ON <condition>"`
    pub fn join(mut self, clause: &str) -> Self {
        self.joins.push(format!("JOIN {}", clause));
        self
    }

    /// Add a WHERE condition (conditions are AND-ed)
    pub fn where_clause(mut self, condition: &str) -> Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    pub fn group_by(mut self, key: &str) -> Self {
        self.group_by_clause.push(key.to_string());
        self
    }

    /// Primary sort key (replaces any previous ordering)
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = vec![order.to_string()];
        self
    }

    /// Secondary sort key, applied after the existing ones
    pub fn then_by(mut self, order: &str) -> Self {
        self.order_by_clause.push(order.to_string());
        self
    }

    /// Render the statement
    pub fn build(&self) -> String {
        let mut sql = format!("SELECT {}", self.columns.join(", "));

        if let Some(from) = &self.from_clause {
            sql.push_str(" FROM ");
            sql.push_str(from);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if !self.group_by_clause.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by_clause.join(", "));
        }

        if !self.order_by_clause.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by_clause.join(", "));
        }

        sql
    }
}
