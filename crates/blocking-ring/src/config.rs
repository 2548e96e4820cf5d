//! Construction settings for [`BoundedBlockingQueue`](crate::BoundedBlockingQueue).

use crate::error::QueueError;

/// Capacity used when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 64;

/// Environment variable consulted by [`QueueConfig::from_env`].
pub const CAPACITY_ENV: &str = "BLOCKING_RING_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueueConfig {
    /// Number of slots in the ring.
    pub capacity: usize,
    /// Name attached to log records emitted by the queue.
    pub label: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: String::from("queue"),
        }
    }
}

impl QueueConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Defaults, with the capacity overridden by `BLOCKING_RING_CAPACITY`
    /// when it holds an integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(raw) = std::env::var_os(CAPACITY_ENV) {
            match raw.to_string_lossy().trim().parse::<usize>() {
                Ok(capacity) => config.capacity = capacity,
                Err(err) => tracing::warn!(
                    ?err,
                    var = CAPACITY_ENV,
                    value = %raw.to_string_lossy(),
                    "ignoring unparsable capacity override"
                ),
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), QueueError> {
        if self.capacity == 0 {
            return Err(QueueError::InvalidCapacity {
                requested: self.capacity,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON document such as `{"capacity": 8}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let config: Self =
            serde_json::from_str(json).context("failed to parse queue configuration")?;
        config.validate().context("invalid queue configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = QueueConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            QueueConfig::new(0).validate(),
            Err(QueueError::InvalidCapacity { requested: 0 })
        );
    }

    #[test]
    fn label_is_kept() {
        let config = QueueConfig::new(4).with_label("midi-in");
        assert_eq!(config.label, "midi-in");
        assert_eq!(config.capacity, 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_json_with_defaults() {
        let config = QueueConfig::from_json(r#"{"capacity": 8}"#).unwrap();
        assert_eq!(config, QueueConfig::new(8));
        assert!(QueueConfig::from_json(r#"{"capacity": 0}"#).is_err());
        assert!(QueueConfig::from_json("not json").is_err());
    }
}
