// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client log items and the batch payload that carries them.
//!
//! Both types decode from JSON objects only. The derived impls are generated
//! as inherent functions (`remote = "Self"`) and wrapped so that arrays are
//! rejected instead of being read as positional fields. A `null` field value
//! reads as the field's default.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::time_fmt::format_servertime;

/// One client log entry in loglevel format.
///
/// Every field is client-supplied except `servertime`, which is assigned by
/// the worker when the item is written and overwrites anything the client
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", deny_unknown_fields)]
pub struct LogItem {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logger: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stacktrace: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub windowid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servertime: String,
}

impl LogItem {
    /// Create an item carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Stamp the server receive time.
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        self.servertime = format_servertime(at);
    }
}

/// Request body posted by loglevel clients: `{"logs": [...]}`.
///
/// A missing or `null` `logs` key is an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", deny_unknown_fields)]
pub struct LogBatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<LogItem>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field-wise decoding from an already-opened JSON object.
trait FromObject<'de>: Sized {
    fn from_object<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;
}

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: FromObject<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::from_object(MapAccessDeserializer::new(map))
    }
}

macro_rules! object_only {
    ($ty:ty) => {
        impl<'de> FromObject<'de> for $ty {
            fn from_object<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$ty>::deserialize(deserializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_map(ObjectVisitor::<$ty>(PhantomData))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$ty>::serialize(self, serializer)
            }
        }
    };
}

object_only!(LogItem);
object_only!(LogBatch);

#[cfg(test)]
#[path = "log_item_tests.rs"]
mod tests;
