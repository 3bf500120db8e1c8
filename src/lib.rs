//! Document model for JSON Schema and OpenAPI schema definitions.
//!
//! Reading a document and writing it back keeps two things that a plain
//! serde mapping loses: the declaration order of `properties`, and whether
//! `type` was a single name (`"array"`) or a list (`["array", "null"]`).
//!
//! ```
//! use schema_dom::{Definitions, Type, TypeName};
//!
//! let defs: Definitions = r##"{
//!     "Body": {
//!         "type": "object",
//!         "properties": {
//!             "withdrawals": {"type": ["array", "null"]},
//!             "transactions": {"$ref": "#/components/schemas/Transactions"}
//!         }
//!     }
//! }"##
//! .parse()?;
//!
//! let withdrawals = defs["Body"].property("withdrawals").unwrap();
//! assert_eq!(
//!     withdrawals.r#type,
//!     Type::any_of([TypeName::Array, TypeName::Null])
//! );
//!
//! let json = schema_dom::to_string(&defs["Body"])?;
//! assert!(json.find("withdrawals") < json.find("transactions"));
//! # Ok::<(), schema_dom::Error>(())
//! ```

use std::io::Write;

use serde::Serialize;

mod definitions;
mod error;
mod pointer;
mod properties;
mod schema;
mod typ;

pub use definitions::Definitions;
pub use error::{Error, Kind};
pub use pointer::Pointer;
pub use properties::Properties;
pub use schema::{Schema, KEYWORDS};
pub use typ::{Type, TypeName};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub fn to_string<T: ?Sized + Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_string_pretty<T: ?Sized + Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_vec<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn to_vec_pretty<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Writes `value` as indented JSON followed by a newline.
pub fn to_writer_pretty<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: Write,
    T: ?Sized + Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_output_ends_with_newline() {
        let schema = Schema::with_type(TypeName::Object);
        let mut out = Vec::new();
        to_writer_pretty(&mut out, &schema).unwrap();
        assert_eq!(out, b"{\n  \"type\": \"object\"\n}\n");
        assert_eq!(to_vec(&schema).unwrap(), br#"{"type":"object"}"#);
    }
}
