//! Chunking codec.
//!
//! Values longer than a single parameter allows are stored as
//! `<key>.part0`, `<key>.part1`, ... and stitched back together on read.
//! Lengths are counted in characters so a chunk boundary never falls inside
//! a multi-byte sequence.

use std::collections::BTreeMap;

use tracing::warn;

const PART_MARKER: &str = ".part";

/// Split `value` into consecutive pieces of at most `limit` characters.
///
/// The empty string yields no chunks.
///
/// # Panics
///
/// Panics if `limit` is zero.
pub fn split(value: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "chunk limit must be positive");

    let mut chunks = Vec::with_capacity(value.len() / limit + 1);
    let mut current = String::new();
    let mut count = 0;

    for ch in value.chars() {
        current.push(ch);
        count += 1;
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Name of the `index`-th chunk of `base`.
pub fn chunk_name(base: &str, index: usize) -> String {
    format!("{base}{PART_MARKER}{index}")
}

/// Recognise a chunk name, returning its base and numeric index.
///
/// `FOO.part3` parses as `("FOO", 3)`; `FOO.part`, `.part1` and
/// `FOO.partX` do not parse.
pub fn parse_chunk_name(name: &str) -> Option<(&str, usize)> {
    let (base, digits) = name.rsplit_once(PART_MARKER)?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|index| (base, index))
}

/// Expand a variable into named chunks.
pub fn expand(key: &str, value: &str, limit: usize) -> Vec<(String, String)> {
    split(value, limit)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| (chunk_name(key, index), chunk))
        .collect()
}

/// Reassemble chunked values.
///
/// Parts are concatenated in numeric index order whatever order they arrive
/// in, so `.part10` always follows `.part9`. Entries without a chunk suffix
/// pass through. When a base exists both literally and as chunks, the
/// reassembled chunks win.
pub fn reunify<I>(entries: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut unified = BTreeMap::new();
    let mut parts: BTreeMap<String, BTreeMap<usize, String>> = BTreeMap::new();

    for (key, value) in entries {
        match parse_chunk_name(&key) {
            Some((base, index)) => {
                parts
                    .entry(base.to_string())
                    .or_default()
                    .insert(index, value);
            }
            None => {
                unified.insert(key, value);
            }
        }
    }

    for (base, chunks) in parts {
        let value: String = chunks.into_values().collect();
        if unified.insert(base.clone(), value).is_some() {
            warn!(key = %base, "both a literal value and chunks exist, using the chunks");
        }
    }

    unified
}
