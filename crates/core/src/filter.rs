//! Filter fields and operators.
//!
//! Filter routes accept an attribute/operator/value triple from client
//! forms. The attribute set is an explicit allow-list per collection; the
//! store maps each variant to a fixed column name, so client input never
//! reaches SQL as an identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator for filter queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Equality.
    Eq,
    /// Strictly less than.
    Lt,
    /// Strictly greater than.
    Gt,
}

impl FilterOp {
    /// Parse from the form value.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "eq" | "==" => Ok(Self::Eq),
            "lt" | "<" => Ok(Self::Lt),
            "gt" | ">" => Ok(Self::Gt),
            _ => Err(crate::Error::InvalidFilterOp(s.to_string())),
        }
    }

    /// SQL comparison operator for this variant.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
        }
    }

    /// Apply the comparison to a pair of values.
    pub fn matches(&self, left: i64, right: i64) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Lt => left < right,
            Self::Gt => left > right,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Gt => "gt",
        };
        write!(f, "{s}")
    }
}

/// Filterable driver attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverField {
    Age,
    TotalPolePositions,
    TotalRaceWins,
    TotalPoints,
    TotalWorldTitles,
    TotalFastestLaps,
}

impl DriverField {
    /// Parse from the form attribute name.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "age" => Ok(Self::Age),
            "total_pole_positions" => Ok(Self::TotalPolePositions),
            "total_race_wins" => Ok(Self::TotalRaceWins),
            "total_points" => Ok(Self::TotalPoints),
            "total_world_titles" => Ok(Self::TotalWorldTitles),
            "total_fastest_laps" => Ok(Self::TotalFastestLaps),
            _ => Err(crate::Error::InvalidFilterField(s.to_string())),
        }
    }

    /// Fixed column name in the drivers table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::TotalPolePositions => "total_pole_positions",
            Self::TotalRaceWins => "total_race_wins",
            Self::TotalPoints => "total_points",
            Self::TotalWorldTitles => "total_world_titles",
            Self::TotalFastestLaps => "total_fastest_laps",
        }
    }
}

/// Filterable team attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamField {
    YearFounded,
    TotalPolePositions,
    TotalRaceWins,
    TotalConstructorTitles,
    FinishingPosition,
}

impl TeamField {
    /// Parse from the form attribute name.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "year_founded" => Ok(Self::YearFounded),
            "total_pole_positions" => Ok(Self::TotalPolePositions),
            "total_race_wins" => Ok(Self::TotalRaceWins),
            "total_constructor_titles" => Ok(Self::TotalConstructorTitles),
            "finishing_position" => Ok(Self::FinishingPosition),
            _ => Err(crate::Error::InvalidFilterField(s.to_string())),
        }
    }

    /// Fixed column name in the teams table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::YearFounded => "year_founded",
            Self::TotalPolePositions => "total_pole_positions",
            Self::TotalRaceWins => "total_race_wins",
            Self::TotalConstructorTitles => "total_constructor_titles",
            Self::FinishingPosition => "finishing_position",
        }
    }
}
