// ── Lenient field decoders ──
//
// Table rows are loosely typed: ids arrive as numbers or strings, booleans
// as `true` / `-1` / `"0"`, tags as one space-separated string, and empty
// columns as `""`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

/// `"tag1 tag2"` → `["tag1", "tag2"]`. Also accepts an array.
pub(crate) fn split_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Option::<Tags>::deserialize(d)? {
        Some(Tags::Joined(joined)) => joined.split_whitespace().map(str::to_owned).collect(),
        Some(Tags::List(list)) => list,
        None => Vec::new(),
    })
}

/// Booleans in any of the encodings the server uses. `-1` is true.
pub(crate) fn flexible_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<NumberLike>::deserialize(d)? {
        Some(NumberLike::Flag(b)) => b,
        Some(NumberLike::Int(n)) => n != 0,
        Some(NumberLike::Float(n)) => n.abs() > f64::EPSILON,
        Some(NumberLike::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "-1" | "1" | "yes"
        ),
        None => false,
    })
}

/// Optional id: number, numeric string, or empty.
pub(crate) fn optional_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<NumberLike>::deserialize(d)? {
        Some(NumberLike::Int(n)) => u32::try_from(n).ok(),
        Some(NumberLike::Text(s)) => s.trim().parse().ok(),
        Some(NumberLike::Float(_) | NumberLike::Flag(_)) | None => None,
    })
}

/// Optional integer decoded from a `*_raw` column.
pub(crate) fn optional_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<NumberLike>::deserialize(d)? {
        Some(NumberLike::Int(n)) => Some(n),
        Some(NumberLike::Text(s)) => s.trim().parse().ok(),
        Some(NumberLike::Float(_) | NumberLike::Flag(_)) | None => None,
    })
}

/// Empty strings become `None`.
pub(crate) fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "split_tags")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "flexible_bool")]
        active: bool,
        #[serde(default, deserialize_with = "optional_u32")]
        parentid: Option<u32>,
        #[serde(default, deserialize_with = "non_empty")]
        host: Option<String>,
    }

    #[test]
    fn decodes_loose_values() {
        let row: Row = serde_json::from_value(json!({
            "tags": "pingsensor  core ",
            "active": -1,
            "parentid": "2001",
            "host": ""
        }))
        .unwrap();
        assert_eq!(row.tags, vec!["pingsensor", "core"]);
        assert!(row.active);
        assert_eq!(row.parentid, Some(2001));
        assert_eq!(row.host, None);
    }

    #[test]
    fn missing_and_null_fall_back() {
        let row: Row = serde_json::from_value(json!({ "tags": null, "active": "false" })).unwrap();
        assert!(row.tags.is_empty());
        assert!(!row.active);
        assert_eq!(row.parentid, None);
    }
}
