// fern/src/core/method.rs

//! The request methods a route can be registered for.

use crate::error::FernError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
  Get,
  Post,
  Delete,
}

impl Method {
  /// Lower-case form used as the registry key prefix (`post:/users`).
  pub fn as_key(&self) -> &'static str {
    match self {
      Method::Get => "get",
      Method::Post => "post",
      Method::Delete => "delete",
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Post => "POST",
      Method::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Method {
  type Err = FernError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().as_str() {
      "GET" => Ok(Method::Get),
      "POST" => Ok(Method::Post),
      "DELETE" => Ok(Method::Delete),
      _ => Err(FernError::UnsupportedMethod(s.to_string())),
    }
  }
}

/// Builds the registry key for a route: `method + ":" + path`.
pub fn route_key(method: Method, path: &str) -> String {
  format!("{}:{}", method.as_key(), path)
}
