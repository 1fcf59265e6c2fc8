//! Dissolve parameters: match columns and aggregation directives

use geodissolve_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::aggregate::COUNT_COLUMN;

/// Declared type of an aggregated column.
///
/// Only `Integer` and `Double` take part in numeric aggregation; any other
/// declared type is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Integer,
    Double,
    Other(String),
}

impl ColumnType {
    /// Whether Sum / Average / Min / Max produce a value for this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }
}

impl From<&str> for ColumnType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("integer") {
            ColumnType::Integer
        } else if s.eq_ignore_ascii_case("double") {
            ColumnType::Double
        } else {
            ColumnType::Other(s.to_string())
        }
    }
}

impl From<String> for ColumnType {
    fn from(s: String) -> Self {
        ColumnType::from(s.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(t: ColumnType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => f.write_str("Integer"),
            ColumnType::Double => f.write_str("Double"),
            ColumnType::Other(s) => f.write_str(s),
        }
    }
}

/// Aggregation operator applied to a column over a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AggregateOp {
    First,
    Last,
    Count,
    Sum,
    Average,
    Min,
    Max,
}

impl AggregateOp {
    pub const ALL: [AggregateOp; 7] = [
        AggregateOp::First,
        AggregateOp::Last,
        AggregateOp::Count,
        AggregateOp::Sum,
        AggregateOp::Average,
        AggregateOp::Min,
        AggregateOp::Max,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::First => "First",
            AggregateOp::Last => "Last",
            AggregateOp::Count => "Count",
            AggregateOp::Sum => "Sum",
            AggregateOp::Average => "Average",
            AggregateOp::Min => "Min",
            AggregateOp::Max => "Max",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        AggregateOp::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::invalid_parameter(
                    "operator",
                    s,
                    "expected one of First, Last, Count, Sum, Average, Min, Max",
                )
            })
    }
}

impl TryFrom<String> for AggregateOp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// One aggregation directive: which column, its declared type, and the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorPair {
    /// Column to aggregate; also the name of the output column
    pub column: String,
    /// Declared type of the column
    pub column_type: ColumnType,
    /// Aggregation operator
    pub operator: AggregateOp,
}

impl OperatorPair {
    pub fn new(column: impl Into<String>, column_type: impl Into<ColumnType>, operator: AggregateOp) -> Self {
        Self {
            column: column.into(),
            column_type: column_type.into(),
            operator,
        }
    }

    /// Type of the column this directive writes, or `None` when the
    /// operator never produces a value for the declared type.
    pub fn output_type(&self) -> Option<ColumnType> {
        match self.operator {
            AggregateOp::First | AggregateOp::Last => Some(self.column_type.clone()),
            AggregateOp::Count => Some(ColumnType::Integer),
            AggregateOp::Average if self.column_type.is_numeric() => Some(ColumnType::Double),
            AggregateOp::Sum | AggregateOp::Min | AggregateOp::Max if self.column_type.is_numeric() => {
                Some(self.column_type.clone())
            }
            _ => None,
        }
    }
}

/// Parses `column:type:operator`. The column name may itself contain colons.
impl FromStr for OperatorPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.rsplitn(3, ':');
        let operator = parts.next().unwrap_or_default();
        let (column_type, column) = match (parts.next(), parts.next()) {
            (Some(t), Some(c)) => (t, c),
            _ => {
                return Err(Error::invalid_parameter(
                    "operator pair",
                    s,
                    "expected column:type:operator",
                ))
            }
        };
        if column.is_empty() {
            return Err(Error::invalid_parameter("operator pair", s, "column name is empty"));
        }
        Ok(OperatorPair::new(column, column_type, operator.parse()?))
    }
}

/// A column of the dissolve output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub name: String,
    pub column_type: ColumnType,
}

/// Parameters for dissolve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissolveParams {
    /// Columns whose values form the grouping key, in order
    #[serde(default)]
    pub match_columns: Vec<String>,
    /// Aggregations computed per group
    #[serde(default)]
    pub operators: Vec<OperatorPair>,
}

impl DissolveParams {
    pub fn new(match_columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            match_columns: match_columns.into_iter().map(Into::into).collect(),
            operators: Vec::new(),
        }
    }

    /// Builder-style operator directive
    pub fn with_operator(mut self, pair: OperatorPair) -> Self {
        self.operators.push(pair);
        self
    }

    /// Check column names. Dissolve itself never fails; this is for hosts
    /// that want to reject obviously broken parameters up front.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.match_columns {
            if column.is_empty() {
                return Err(Error::invalid_parameter("match_columns", column.clone(), "empty column name"));
            }
            if !seen.insert(column.as_str()) {
                return Err(Error::invalid_parameter(
                    "match_columns",
                    column.clone(),
                    "column listed more than once",
                ));
            }
        }
        for pair in &self.operators {
            if pair.column.is_empty() {
                return Err(Error::invalid_parameter(
                    "operators",
                    format!("{}:{}", pair.column_type, pair.operator),
                    "empty column name",
                ));
            }
        }
        Ok(())
    }

    /// Declared output schema: match columns, `Count`, then one column per
    /// operator directive that can produce a value. A name already present
    /// keeps its first position.
    pub fn output_columns(&self) -> Vec<OutputColumn> {
        let mut columns: Vec<OutputColumn> = Vec::new();
        let mut push = |name: &str, column_type: ColumnType| {
            if !columns.iter().any(|c| c.name == name) {
                columns.push(OutputColumn {
                    name: name.to_string(),
                    column_type,
                });
            }
        };

        for column in &self.match_columns {
            push(column, ColumnType::Other("String".to_string()));
        }
        push(COUNT_COLUMN, ColumnType::Integer);
        for pair in &self.operators {
            if let Some(t) = pair.output_type() {
                push(&pair.column, t);
            }
        }
        columns
    }
}
