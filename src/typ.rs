use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{ser::SerializeSeq, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{error::Error, pointer::Location, Result};

/// A name in a schema's `type` keyword.
///
/// The seven JSON Schema primitive types have their own variants. Any other
/// token (Swagger's `"file"`, draft-03 `"any"`) is kept verbatim in `Other`.
/// Names compare by their text, so `Other("string")` equals `String`.
#[derive(Debug, Clone)]
pub enum TypeName {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    Integer,
    String,
    Other(String),
}

impl TypeName {
    pub const ALL: [TypeName; 7] = [
        TypeName::Null,
        TypeName::Boolean,
        TypeName::Object,
        TypeName::Array,
        TypeName::Number,
        TypeName::Integer,
        TypeName::String,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TypeName::Null => "null",
            TypeName::Boolean => "boolean",
            TypeName::Object => "object",
            TypeName::Array => "array",
            TypeName::Number => "number",
            TypeName::Integer => "integer",
            TypeName::String => "string",
            TypeName::Other(name) => name,
        }
    }

    /// Whether this is one of the JSON Schema primitive types.
    pub fn is_primitive(&self) -> bool {
        TypeName::ALL.iter().any(|known| known.as_str() == self.as_str())
    }
}

impl PartialEq for TypeName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TypeName {}

impl Hash for TypeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName::ALL
            .iter()
            .find(|known| known.as_str() == name)
            .cloned()
            .unwrap_or(TypeName::Other(name))
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::from(name.to_owned())
    }
}

impl FromStr for TypeName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeName::from(s))
    }
}

impl Serialize for TypeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The value of a schema's `type` keyword.
///
/// Holds one or more type names in the order they were given. A single name
/// is written as a bare string (`"array"`), several as an array
/// (`["array", "null"]`). The written form follows from the number of names
/// alone, so `["string"]` reads back as `Type::new(TypeName::String)` and is
/// written as `"string"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub struct Type {
    names: Vec<TypeName>,
}

impl Type {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Type {
            names: vec![name.into()],
        }
    }

    /// Builds a type accepting any of `names`, or `None` if there are none.
    pub fn any_of<I>(names: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<TypeName>,
    {
        let names: Vec<_> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            None
        } else {
            Some(Type { names })
        }
    }

    pub fn is_multivalued(&self) -> bool {
        self.names.len() > 1
    }

    pub fn names(&self) -> &[TypeName] {
        &self.names
    }

    pub fn first(&self) -> &TypeName {
        &self.names[0]
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.names.contains(name)
    }

    pub fn is_nullable(&self) -> bool {
        self.contains(&TypeName::Null)
    }

    pub(crate) fn decode(value: Value, at: &Location<'_>) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Type::new(name)),
            Value::Array(items) => {
                let names = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::String(name) => Ok(TypeName::from(name)),
                        other => Err(Error::mismatch(&at.push_item(i), "a type name", &other)),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Type::any_of(names).ok_or_else(|| Error::EmptyType {
                    path: at.to_pointer(),
                })
            }
            other => Err(Error::mismatch(
                at,
                "a type name or an array of type names",
                &other,
            )),
        }
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        Type::new(name)
    }
}

impl TryFrom<Value> for Type {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Type::decode(value, &Location::Root)
    }
}

impl Serialize for Type {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.names.as_slice() {
            [name] => name.serialize(serializer),
            names => {
                let mut seq = serializer.serialize_seq(Some(names.len()))?;
                for name in names {
                    seq.serialize_element(name)?;
                }
                seq.end()
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name.as_str())?;
        }
        Ok(())
    }
}
