// fern/src/config.rs

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_DRIVER: &str = "actix-web";

/// Options recognised by [`crate::Fern`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FernOptions {
  /// Whether the driver parses request bodies as JSON.
  #[serde(alias = "useJSON")]
  pub use_json: bool,
  /// Name of the transport driver that serves the registry.
  pub driver: String,
  /// Upper bound for one request's pipeline. `None` waits forever.
  #[serde(with = "millis", rename = "requestTimeoutMs")]
  pub request_timeout: Option<Duration>,
}

impl Default for FernOptions {
  fn default() -> Self {
    Self {
      use_json: true,
      driver: DEFAULT_DRIVER.to_string(),
      request_timeout: None,
    }
  }
}

impl FernOptions {
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = Some(timeout);
    self
  }

  pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
    self.driver = driver.into();
    self
  }
}

mod millis {
  use serde::{Deserialize, Deserializer};
  use std::time::Duration;

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_options_fall_back_to_defaults() {
    let opts: FernOptions = serde_json::from_str(r#"{"useJSON": false}"#).unwrap();
    assert!(!opts.use_json);
    assert_eq!(opts.driver, DEFAULT_DRIVER);
    assert!(opts.request_timeout.is_none());

    let opts: FernOptions = serde_json::from_str(r#"{"useJson": false, "requestTimeoutMs": 250}"#).unwrap();
    assert!(!opts.use_json);
    assert_eq!(opts.request_timeout, Some(Duration::from_millis(250)));
    assert_eq!(opts.driver, DEFAULT_DRIVER);
  }
}
