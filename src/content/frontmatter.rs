//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<ScalarString>()? {
                vec.push(item.0);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A scalar rendered as text: `2024` and `true` are kept as "2024" and "true",
/// a null becomes the empty string.
struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = ScalarString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(String::new()))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ScalarString(String::new()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    ScalarString::deserialize(deserializer).map(|s| s.0)
}

fn optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = ScalarString::deserialize(deserializer)?.0;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Loose boolean: bools, "true"/"yes"/"1" strings and nonzero numbers are true;
/// anything unrecognized is false
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" | "" => false,
            other => {
                tracing::warn!("Unrecognized boolean '{}', treating as false", other);
                false
            }
        },
        Some(other) => {
            tracing::warn!("Expected a boolean, found {:?}; treating as false", other);
            false
        }
    };
    Ok(flag)
}

/// Typed post metadata with every default applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMetadata {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    /// Kept exactly as written; see `helpers::parse_date`
    #[serde(deserialize_with = "scalar_string")]
    pub date: String,
    #[serde(deserialize_with = "scalar_string")]
    pub category: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(deserialize_with = "optional_string")]
    pub image: Option<String>,
}

/// Untyped front-matter, in document key order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter(IndexMap<String, Value>);

impl FrontMatter {
    /// Split a document into its front-matter block and body, then parse the block.
    ///
    /// A document whose first line is not `---`, or whose block is never closed,
    /// has no front-matter and is all body.
    pub fn parse<'a>(id: &str, text: &'a str) -> Result<(Self, &'a str)> {
        match split(text) {
            Some((yaml, body)) => Ok((Self::from_yaml(id, yaml)?, body)),
            None => Ok((Self::default(), text)),
        }
    }

    fn from_yaml(id: &str, yaml: &str) -> Result<Self> {
        let blank = yaml.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }

        let map: Option<IndexMap<String, Value>> =
            serde_yaml::from_str(yaml).map_err(|e| Error::MalformedFrontMatter {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self(map.unwrap_or_default()))
    }

    /// Validate into typed metadata, applying defaults for absent fields
    pub fn to_metadata(&self, id: &str) -> Result<PostMetadata> {
        let mapping: serde_yaml::Mapping = self
            .0
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect();

        serde_yaml::from_value(Value::Mapping(mapping)).map_err(|source| Error::InvalidMetadata {
            id: id.to_string(),
            source,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Locate a `---` delimited block at the very start of `text`
fn split(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, rest) = text.split_once('\n')?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}
