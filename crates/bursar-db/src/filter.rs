//! Declarative filter and order specs.
//!
//! A [`FilterSpec`] is an ordered list of `(attribute, operator, value)`
//! triples combined with AND. An [`OrderSpec`] is an ordered list of
//! `(attribute, direction)` pairs; the first pair is the primary sort key.
//!
//! Both parse from compact text used in query strings:
//!
//! ```text
//! filter=id:gt:10;full_name:eq:Ada Lovelace
//! sort=created_at:desc,id
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecParseError {
    #[error("unknown operator `{0}`, expected one of eq, neq, gt, lt, gte, lte")]
    UnknownOperator(String),

    #[error("unknown sort direction `{0}`, expected asc or desc")]
    UnknownDirection(String),

    #[error("malformed filter `{0}`, expected attribute:operator:value")]
    MalformedFilter(String),

    #[error("empty attribute name")]
    EmptyAttribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl FilterOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Neq => "<>",
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
        }
    }

    /// Whether `stored.compare(wanted)` yielding `ordering` satisfies the operator.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Neq => ordering != Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
        }
    }
}

impl FromStr for FilterOp {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" => Ok(FilterOp::Eq),
            "neq" => Ok(FilterOp::Neq),
            "gt" => Ok(FilterOp::Gt),
            "lt" => Ok(FilterOp::Lt),
            "gte" => Ok(FilterOp::Gte),
            "lte" => Ok(FilterOp::Lte),
            other => Err(SpecParseError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Lt => "lt",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = SpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SpecParseError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub attribute: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(attribute: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute, FilterOp::Eq, value)
    }
}

impl FromStr for Filter {
    type Err = SpecParseError;

    /// Parses `attribute:operator:value`. The value keeps any further colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(attribute), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SpecParseError::MalformedFilter(s.to_string()));
        };

        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(SpecParseError::EmptyAttribute);
        }

        Ok(Filter::new(attribute, op.parse()?, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub attribute: String,
    pub direction: SortDirection,
}

impl Order {
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for Order {
    type Err = SpecParseError;

    /// Parses `attribute` or `attribute:asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, direction) = match s.split_once(':') {
            Some((attribute, direction)) => (attribute, direction.parse()?),
            None => (s, SortDirection::Asc),
        };

        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(SpecParseError::EmptyAttribute);
        }

        Ok(Order {
            attribute: attribute.to_string(),
            direction,
        })
    }
}

pub type FilterSpec = Vec<Filter>;
pub type OrderSpec = Vec<Order>;

/// Parses a `;`-separated filter list. Blank segments are skipped.
pub fn parse_filter_spec(raw: &str) -> Result<FilterSpec, SpecParseError> {
    raw.split(';')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Parses a `,`-separated order list. Blank segments are skipped.
pub fn parse_order_spec(raw: &str) -> Result<OrderSpec, SpecParseError> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}
