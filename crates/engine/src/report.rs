//! Monthly revenue per service.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, services::service_display_name};

/// A year-month reporting bucket, rendered as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be 1..=12, got {month}"
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(EngineError::InvalidPeriod(format!(
                "year must have four digits, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPeriod(format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Revenue accumulated by one service within a period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRevenue {
    pub service_id: i64,
    pub service_name: String,
    pub total_revenue: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub period: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_id: i64,
    pub total_revenue: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServiceRevenue {
    fn from(model: Model) -> Self {
        Self {
            service_id: model.service_id,
            service_name: service_display_name(model.service_id),
            total_revenue: model.total_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn period_renders_as_year_month() {
        let at = Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(Period::from_datetime(at).to_string(), "2026-03");
        assert_eq!("2026-03".parse::<Period>(), Period::new(2026, 3));
    }

    #[test]
    fn malformed_periods_are_rejected() {
        for raw in ["2026-13", "2026-00", "2026-3", "26-03", "2026/03", "march"] {
            assert!(
                matches!(raw.parse::<Period>(), Err(EngineError::InvalidPeriod(_))),
                "{raw} should not parse"
            );
        }
    }

    #[test]
    fn report_rows_carry_the_service_name() {
        let row = ServiceRevenue::from(Model {
            period: "2026-10".to_string(),
            service_id: 2,
            total_revenue: 900,
        });
        assert_eq!(row.service_name, "Highlighting");
        assert_eq!(row.total_revenue, 900);
    }
}
