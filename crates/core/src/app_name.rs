// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application name newtype.
//!
//! An [`AppName`] is taken from the request path and later joined onto the
//! config and log directories, so it must never name a parent directory or
//! contain a path separator.

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// Reasons an application name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppNameError {
    #[error("app name is empty")]
    Empty,
    #[error("app name contains a path separator: {0}")]
    Separator(String),
    #[error("app name is a relative directory reference: {0}")]
    DotReference(String),
}

/// Validated name of a logging application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppName(String);

impl AppName {
    /// Validate and wrap an application name.
    pub fn parse(name: impl Into<String>) -> Result<Self, AppNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AppNameError::Empty);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(AppNameError::Separator(name));
        }
        if name == "." || name == ".." {
            return Err(AppNameError::DotReference(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AppName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for AppName {
    type Error = AppNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl PartialEq<str> for AppName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AppName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "app_name_tests.rs"]
mod tests;
