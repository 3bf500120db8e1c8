use std::str::FromStr;

use log::{debug, trace};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    error::Error,
    pointer::Location,
    properties::Properties,
    typ::Type,
    Result,
};

/// Keywords with a field of their own in [`Schema`].
pub const KEYWORDS: [&str; 11] = [
    "$schema",
    "$ref",
    "title",
    "description",
    "type",
    "format",
    "properties",
    "required",
    "items",
    "enum",
    "default",
];

/// A JSON Schema node.
///
/// Members other than the ones modelled here are kept in `extra`, in source
/// order, and written back after the known fields. An `extra` entry named
/// like one of [`KEYWORDS`] is never written; the field wins. `$ref` is
/// stored as written and never followed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Schema {
    pub schema: Option<String>,
    pub reference: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub r#type: Option<Type>,
    pub format: Option<String>,
    pub properties: Option<Properties>,
    pub required: Vec<String>,
    pub items: Option<Box<Schema>>,
    pub r#enum: Option<Vec<Value>>,
    pub default: Option<Value>,
    pub extra: Map<String, Value>,
}

impl Schema {
    pub fn with_type(r#type: impl Into<Type>) -> Self {
        Schema {
            r#type: Some(r#type.into()),
            ..Schema::default()
        }
    }

    /// A schema consisting only of a `$ref` to `reference`.
    pub fn with_ref(reference: impl Into<String>) -> Self {
        Schema {
            reference: Some(reference.into()),
            ..Schema::default()
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Schema::from_value(serde_json::from_slice(bytes)?)
    }

    /// Decodes a schema document. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::malformed(&value));
        }
        Schema::decode(value, &Location::Root)
    }

    /// Looks up a direct property by name.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref()?.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    pub fn is_multivalued(&self) -> bool {
        self.r#type.as_ref().map_or(false, Type::is_multivalued)
    }

    pub(crate) fn decode(value: Value, at: &Location<'_>) -> Result<Self> {
        let members = match value {
            Value::Object(members) => members,
            other => return Err(Error::mismatch(at, "a schema object", &other)),
        };

        let mut schema = Schema::default();
        for (key, value) in members {
            let here = at.push_prop(&key);
            match key.as_str() {
                "$schema" => schema.schema = Some(string(value, &here)?),
                "$ref" => schema.reference = Some(string(value, &here)?),
                "title" => schema.title = Some(string(value, &here)?),
                "description" => schema.description = Some(string(value, &here)?),
                "type" => schema.r#type = Some(Type::decode(value, &here)?),
                "format" => schema.format = Some(string(value, &here)?),
                "properties" => schema.properties = Some(Properties::decode(value, &here)?),
                "required" => schema.required = strings(value, &here)?,
                "items" => schema.items = Some(Box::new(Schema::decode(value, &here)?)),
                "enum" => match value {
                    Value::Array(values) => schema.r#enum = Some(values),
                    other => return Err(Error::mismatch(&here, "an array", &other)),
                },
                "default" => schema.default = Some(value),
                _ => {
                    trace!("keeping unmodelled keyword {}", here);
                    schema.extra.insert(key, value);
                }
            }
        }
        Ok(schema)
    }
}

fn string(value: Value, at: &Location<'_>) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(Error::mismatch(at, "a string", &other)),
    }
}

fn strings(value: Value, at: &Location<'_>) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| string(item, &at.push_item(i)))
            .collect(),
        other => Err(Error::mismatch(at, "an array of strings", &other)),
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(schema) = &self.schema {
            map.serialize_entry("$schema", schema)?;
        }
        if let Some(reference) = &self.reference {
            map.serialize_entry("$ref", reference)?;
        }
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(r#type) = &self.r#type {
            map.serialize_entry("type", r#type)?;
        }
        if let Some(format) = &self.format {
            map.serialize_entry("format", format)?;
        }
        if let Some(properties) = &self.properties {
            map.serialize_entry("properties", properties)?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        if let Some(r#enum) = &self.r#enum {
            map.serialize_entry("enum", r#enum)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        for (key, value) in &self.extra {
            if KEYWORDS.contains(&key.as_str()) {
                debug!("not writing extra member {:?} over its schema field", key);
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl TryFrom<Value> for Schema {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Schema::from_value(value)
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Schema::from_value(serde_json::from_str(s)?)
    }
}
