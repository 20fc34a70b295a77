// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strict decoding of `{"logs": [...]}` request bodies.

use lc_core::LogBatch;
use serde_json::error::Category;
use thiserror::Error;

/// Why a request body was rejected. The display text is the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("Empty request")]
    Empty,

    #[error("badly formed JSON")]
    Syntax,

    #[error("JSON type error")]
    Type,

    #[error("JSON with unknown fields")]
    UnknownField,

    #[error("Extra data after body")]
    TrailingData,
}

/// Decode exactly one batch; anything but whitespace after it is rejected.
pub fn decode_batch(body: &[u8]) -> Result<LogBatch, BodyError> {
    if body.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
        return Err(BodyError::Empty);
    }

    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<LogBatch>();
    let batch = match values.next() {
        Some(Ok(batch)) => batch,
        Some(Err(e)) => return Err(classify(&e)),
        None => return Err(BodyError::Empty),
    };

    if values.next().is_some() {
        return Err(BodyError::TrailingData);
    }
    Ok(batch)
}

fn classify(e: &serde_json::Error) -> BodyError {
    match e.classify() {
        Category::Syntax | Category::Eof | Category::Io => BodyError::Syntax,
        Category::Data if e.to_string().starts_with("unknown field") => BodyError::UnknownField,
        Category::Data => BodyError::Type,
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
