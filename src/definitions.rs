use std::{collections::BTreeMap, ops::Index, str::FromStr};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Error,
    pointer::Location,
    schema::Schema,
    Result,
};

/// Named top-level schemas, such as the `components/schemas` section of an
/// OpenAPI document.
///
/// Lookups are by name; encoding writes the definitions sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Definitions(BTreeMap<String, Schema>);

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Definitions::from_value(serde_json::from_slice(bytes)?)
    }

    /// Decodes every member of a top-level object as a named schema.
    ///
    /// Fails on the first malformed schema, reporting its location as
    /// `#/<name>/...`.
    pub fn from_value(value: Value) -> Result<Self> {
        let members = match value {
            Value::Object(members) => members,
            other => return Err(Error::malformed(&other)),
        };

        let root = Location::Root;
        let definitions = members
            .into_iter()
            .map(|(name, value)| {
                trace!("decoding schema definition {:?}", name);
                let decoded = Schema::decode(value, &root.push_prop(&name));
                decoded.map(|schema| (name, schema))
            })
            .collect::<Result<Definitions>>()?;
        debug!("decoded {} schema definitions", definitions.len());
        Ok(definitions)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.0.insert(name.into(), schema)
    }

    pub fn remove(&mut self, name: &str) -> Option<Schema> {
        self.0.remove(name)
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

    pub fn names(&self) -> std::collections::btree_map::Keys<'_, String, Schema> {
        self.0.keys()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, Schema> {
        self.0.iter()
    }
}

impl Index<&str> for Definitions {
    type Output = Schema;

    fn index(&self, name: &str) -> &Schema {
        &self.0[name]
    }
}

impl TryFrom<Value> for Definitions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Definitions::from_value(value)
    }
}

impl FromStr for Definitions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Definitions::from_value(serde_json::from_str(s)?)
    }
}

impl IntoIterator for Definitions {
    type IntoIter = std::collections::btree_map::IntoIter<String, Schema>;
    type Item = (String, Schema);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type IntoIter = std::collections::btree_map::Iter<'a, String, Schema>;
    type Item = (&'a String, &'a Schema);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Schema)> for Definitions {
    fn from_iter<T: IntoIterator<Item = (String, Schema)>>(iter: T) -> Self {
        Self(BTreeMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typ::{Type, TypeName};
    use serde_json::json;

    #[test]
    fn top_level_must_be_object() {
        for input in ["[]", "\"BlobsBundleV2\"", "null", "42"] {
            let err = input.parse::<Definitions>().unwrap_err();
            assert!(matches!(err, Error::MalformedDocument { .. }), "{}", input);
        }
    }

    #[test]
    fn failure_names_definition() {
        let err = Definitions::from_value(json!({
            "Good": {"type": "object"},
            "Bad": {"properties": {"count": {"type": {"oneOf": []}}}}
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "#/Bad/properties/count/type: expected a type name or an array of type names, \
             found object `{\"oneOf\":[]}`"
        );
    }

    #[test]
    fn lookup_by_name() {
        let mut defs = Definitions::new();
        defs.insert("Quantity", Schema::with_type(TypeName::String));
        assert!(defs.contains("Quantity"));
        assert_eq!(defs["Quantity"].r#type, Some(Type::new(TypeName::String)));
        assert!(defs.get("Missing").is_none());
    }

    #[test]
    fn encodes_sorted_by_name() {
        let defs: Definitions = vec![
            ("Zeta".to_string(), Schema::default()),
            ("Alpha".to_string(), Schema::default()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_string(&defs).unwrap(),
            r#"{"Alpha":{},"Zeta":{}}"#
        );
    }
}
