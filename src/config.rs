use std::env;

/// Default rolling period when none is configured
pub const DEFAULT_ROLLING_PERIOD_HOURS: i64 = 24;

/// Configuration for a rolling statistics window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsConfig {
    pub rolling_period_hours: i64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            rolling_period_hours: DEFAULT_ROLLING_PERIOD_HOURS,
        }
    }
}

impl StatsConfig {
    pub fn new(rolling_period_hours: i64) -> Self {
        Self {
            rolling_period_hours,
        }
    }

    /// Load configuration from environment variables
    ///
    /// `ROLLING_PERIOD_HOURS` overrides the 24-hour default; an unparsable
    /// or non-positive value is logged and ignored.
    pub fn from_env() -> Self {
        let rolling_period_hours = match env::var("ROLLING_PERIOD_HOURS") {
            Ok(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                Ok(hours) => {
                    log::warn!(
                        "ROLLING_PERIOD_HOURS={} is not positive; using {}",
                        hours,
                        DEFAULT_ROLLING_PERIOD_HOURS
                    );
                    DEFAULT_ROLLING_PERIOD_HOURS
                }
                Err(_) => {
                    log::warn!(
                        "ROLLING_PERIOD_HOURS={:?} is not a valid integer; using {}",
                        raw,
                        DEFAULT_ROLLING_PERIOD_HOURS
                    );
                    DEFAULT_ROLLING_PERIOD_HOURS
                }
            },
            Err(_) => DEFAULT_ROLLING_PERIOD_HOURS,
        };

        Self {
            rolling_period_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period() {
        assert_eq!(StatsConfig::default().rolling_period_hours, 24);
    }

    // Single test for every env shape: the variable is process-global, so
    // splitting these across parallel test threads would race.
    #[test]
    fn test_from_env_override_and_fallbacks() {
        env::set_var("ROLLING_PERIOD_HOURS", "6");
        assert_eq!(StatsConfig::from_env().rolling_period_hours, 6);

        env::set_var("ROLLING_PERIOD_HOURS", "not-a-number");
        assert_eq!(
            StatsConfig::from_env().rolling_period_hours,
            DEFAULT_ROLLING_PERIOD_HOURS
        );

        env::set_var("ROLLING_PERIOD_HOURS", "-5");
        assert_eq!(
            StatsConfig::from_env().rolling_period_hours,
            DEFAULT_ROLLING_PERIOD_HOURS
        );

        env::remove_var("ROLLING_PERIOD_HOURS");
        assert_eq!(
            StatsConfig::from_env().rolling_period_hours,
            DEFAULT_ROLLING_PERIOD_HOURS
        );
    }
}
