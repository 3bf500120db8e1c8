use indexmap::IndexMap;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{error::Error, pointer::Location, schema::Schema, Result};

/// The `properties` of an object schema, kept in declaration order.
///
/// Encoding writes the members in the order they were first added, and
/// decoding appends them in the order they appear in the source, so a
/// document read and written back keeps its property order. Two values are
/// equal only if they hold the same properties in the same order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct Properties(IndexMap<String, Schema>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self(IndexMap::with_capacity(cap))
    }

    /// Inserts or replaces the schema for `name`.
    ///
    /// A new name goes to the end. Replacing an existing name keeps its
    /// position and returns the previous schema.
    pub fn set(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.0.insert(name.into(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.0.get_mut(name)
    }

    /// Removes `name`, leaving the remaining properties in order.
    pub fn remove(&mut self, name: &str) -> Option<Schema> {
        self.0.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> indexmap::map::Keys<'_, String, Schema> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Schema> {
        self.0.iter()
    }

    pub(crate) fn decode(value: Value, at: &Location<'_>) -> Result<Self> {
        let members = match value {
            Value::Object(members) => members,
            other => return Err(Error::mismatch(at, "an object of schemas", &other)),
        };
        members
            .into_iter()
            .map(|(name, value)| {
                let decoded = Schema::decode(value, &at.push_prop(&name));
                decoded.map(|schema| (name, schema))
            })
            .collect()
    }
}

impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, schema) in self {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

impl TryFrom<Value> for Properties {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Properties::decode(value, &Location::Root)
    }
}

impl IntoIterator for Properties {
    type IntoIter = indexmap::map::IntoIter<String, Schema>;
    type Item = (String, Schema);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = indexmap::map::Iter<'a, String, Schema>;
    type Item = (&'a String, &'a Schema);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Schema)> for Properties {
    fn from_iter<T: IntoIterator<Item = (String, Schema)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typ::{Type, TypeName};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn titled(title: &str) -> Schema {
        Schema {
            title: Some(title.into()),
            ..Schema::default()
        }
    }

    fn encoded_names(props: &Properties) -> Vec<String> {
        match serde_json::to_value(props).unwrap() {
            Value::Object(members) => members.keys().cloned().collect(),
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn set_appends_in_insertion_order() {
        let mut props = Properties::new();
        props.set("zeta", titled("Z"));
        props.set("alpha", titled("A"));
        props.set("mid", titled("M"));

        assert_eq!(props.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(encoded_names(&props), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn update_keeps_position() {
        let mut props = Properties::new();
        assert!(props.set("other", titled("A")).is_none());
        props.set("withdrawals", titled("B"));
        let previous = props.set("other", titled("C"));

        assert_eq!(previous, Some(titled("A")));
        assert_eq!(props.get("other"), Some(&titled("C")));
        assert_eq!(encoded_names(&props), ["other", "withdrawals"]);
    }

    #[test]
    fn missing_name_is_not_found() {
        let props = Properties::new();
        assert!(props.get("absent").is_none());
        assert!(!props.contains("absent"));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut props: Properties = vec![
            ("a".to_string(), titled("A")),
            ("b".to_string(), titled("B")),
            ("c".to_string(), titled("C")),
        ]
        .into_iter()
        .collect();
        assert_eq!(props.remove("a"), Some(titled("A")));
        assert_eq!(props.names().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn decode_keeps_source_order() {
        let props = Properties::try_from(json!({
            "withdrawals": {"type": ["array", "null"]},
            "blobs": {"type": "array"},
            "other": {"type": "string"}
        }))
        .unwrap();

        assert_eq!(
            props.names().collect::<Vec<_>>(),
            ["withdrawals", "blobs", "other"]
        );
        assert_eq!(
            props.get("other").unwrap().r#type,
            Some(Type::new(TypeName::String))
        );
        assert_eq!(encoded_names(&props), ["withdrawals", "blobs", "other"]);
    }

    #[test]
    fn decode_rejects_non_object() {
        let err = Properties::try_from(json!([{"type": "string"}])).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn nested_error_names_property() {
        let err = Properties::try_from(json!({"count": {"type": 5}})).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "#/count/type");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let mut ab = Properties::new();
        ab.set("a", titled("A"));
        ab.set("b", titled("B"));
        let mut ba = Properties::new();
        ba.set("b", titled("B"));
        ba.set("a", titled("A"));
        assert_ne!(ab, ba);
        assert_eq!(ab.clone(), ab);
    }
}
