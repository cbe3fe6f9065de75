//! Shared query/form parsing and JSON helpers for route handlers.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Parse a URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2`.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. Multi-byte UTF-8 sequences are
/// reassembled; invalid ones become U+FFFD.
pub fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'%' => {
                let hi = bytes.next();
                let lo = bytes.next();
                let decoded = hi
                    .zip(lo)
                    .and_then(|(h, l)| Some((hex_val(h)? << 4) | hex_val(l)?));
                match decoded {
                    Some(v) => out.push(v),
                    None => {
                        out.push(b'%');
                        out.extend(hi);
                        out.extend(lo);
                    }
                }
            }
            b'+' => out.push(b' '),
            _ => out.push(b),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Like [`get_param`], but missing or empty values are an error.
pub fn require<'a>(params: &'a [(String, String)], key: &'static str) -> Result<&'a str> {
    match get_param(params, key) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingParam(key)),
    }
}

/// Required parameter parsed with `FromStr`.
pub fn parse_param<T: FromStr>(params: &[(String, String)], key: &'static str) -> Result<T> {
    let raw = require(params, key)?;
    raw.trim().parse().map_err(|_| Error::InvalidParam {
        name: key,
        value: raw.to_string(),
    })
}

/// The host clock reading (`now`, milliseconds) every timed route carries.
pub fn now_param(params: &[(String, String)]) -> Result<u64> {
    parse_param(params, "now")
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn error_json(err: &Error) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
