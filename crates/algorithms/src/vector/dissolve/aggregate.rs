//! Per-group attribute aggregation
//!
//! Numeric operators parse the string-encoded values on the fly. A value
//! that does not parse (or is missing) counts as zero; aggregation never
//! fails.

use std::collections::HashMap;

use super::group::Member;
use super::params::{AggregateOp, ColumnType, OperatorPair};

/// Name of the synthetic member-count column
pub const COUNT_COLUMN: &str = "Count";

/// Compute the output attributes of one group.
///
/// The result holds the match-column values of the first member, `Count`,
/// and one entry per operator directive that produces a value. Entries are
/// inserted in that order, so a directive named `Count` overwrites the
/// synthetic column.
///
/// # Arguments
/// * `members` - Group members in input order (non-empty)
/// * `match_columns` - Grouping columns copied verbatim
/// * `operators` - Aggregation directives
pub fn aggregate(
    members: &[Member<'_>],
    match_columns: &[String],
    operators: &[OperatorPair],
) -> HashMap<String, String> {
    let mut attributes = HashMap::with_capacity(match_columns.len() + operators.len() + 1);

    if let Some(first) = members.first() {
        for column in match_columns {
            let value = first.feature.get_property(column).unwrap_or_default();
            attributes.insert(column.clone(), value.to_string());
        }
    }

    attributes.insert(COUNT_COLUMN.to_string(), members.len().to_string());

    for pair in operators {
        if let Some(value) = evaluate(pair, members) {
            attributes.insert(pair.column.clone(), value);
        }
    }

    attributes
}

/// Apply one directive over a group. `None` means no output column.
pub fn evaluate(pair: &OperatorPair, members: &[Member<'_>]) -> Option<String> {
    let column = pair.column.as_str();
    match pair.operator {
        AggregateOp::First => members.first().and_then(|m| carried_value(m, column)),
        AggregateOp::Last => members.last().and_then(|m| carried_value(m, column)),
        AggregateOp::Count => Some(members.len().to_string()),
        AggregateOp::Sum => match pair.column_type {
            ColumnType::Integer => {
                let sum: i64 = int_values(members, column).map(i64::from).sum();
                Some(sum.to_string())
            }
            ColumnType::Double => Some(double_values(members, column).sum::<f64>().to_string()),
            ColumnType::Other(_) => None,
        },
        AggregateOp::Average => {
            if !pair.column_type.is_numeric() || members.is_empty() {
                return None;
            }
            let sum: f64 = double_values(members, column).sum();
            Some((sum / members.len() as f64).to_string())
        }
        AggregateOp::Min => match pair.column_type {
            ColumnType::Integer => int_values(members, column).min().map(|v| v.to_string()),
            ColumnType::Double => double_values(members, column).reduce(f64::min).map(|v| v.to_string()),
            ColumnType::Other(_) => None,
        },
        AggregateOp::Max => match pair.column_type {
            ColumnType::Integer => int_values(members, column).max().map(|v| v.to_string()),
            ColumnType::Double => double_values(members, column).reduce(f64::max).map(|v| v.to_string()),
            ColumnType::Other(_) => None,
        },
    }
}

/// First/Last only carry a value from a member that has a geometry
fn carried_value(member: &Member<'_>, column: &str) -> Option<String> {
    member.feature.geometry.as_ref()?;
    member.feature.get_property(column).map(str::to_string)
}

fn parse_int(value: Option<&str>) -> i32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn parse_double(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}

fn int_values<'a>(members: &'a [Member<'a>], column: &'a str) -> impl Iterator<Item = i32> + 'a {
    members.iter().map(move |m| parse_int(m.feature.get_property(column)))
}

fn double_values<'a>(members: &'a [Member<'a>], column: &'a str) -> impl Iterator<Item = f64> + 'a {
    members.iter().map(move |m| parse_double(m.feature.get_property(column)))
}
