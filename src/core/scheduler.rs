//! Cron schedule of the external job, used to report the next run

use crate::config::{ConfigError, RunConfig};
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RunSchedule {
    expression: String,
    schedule: Schedule,
}

impl RunSchedule {
    /// Parse a cron expression (seconds field first, e.g. `0 30 22 * * Mon-Fri`)
    pub fn parse(expression: &str) -> Result<Self, ConfigError> {
        let schedule = Schedule::from_str(expression).map_err(|e| ConfigError::Invalid {
            field: "run.schedule",
            reason: format!("'{}': {}", expression, e),
        })?;
        debug!(cron = %expression, "RunSchedule: parsed");
        Ok(Self {
            expression: expression.to_string(),
            schedule,
        })
    }

    pub fn from_config(config: &RunConfig) -> Result<Option<Self>, ConfigError> {
        config.run.schedule.as_deref().map(Self::parse).transpose()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First scheduled time strictly after `after`
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }
}
