//! Declaration manifest (JSON) parsing and validation.
//!
//! A manifest lists the classes a GDExtension registers with Godot, with the
//! raw doc comment attached to each declaration:
//!
//! ```json
//! { "classes": [{
//!     "name": "Player", "inherits": "Node2D", "doc": "/// A player.",
//!     "methods": [{ "name": "jump", "const": true,
//!                   "arguments": [{ "name": "height", "type": "float" }],
//!                   "return": { "type": "bool" } }],
//!     "properties": [{ "name": "speed", "type": "float",
//!                      "setter": "set_speed", "getter": "get_speed" }],
//!     "signals": [{ "name": "died" }],
//!     "constants": [{ "name": "IDLE", "value": 0, "enum": "State" }]
//! }] }
//! ```

use crate::error::{Error, Result};
use crate::model::{Argument, GodotType};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub inherits: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub signals: Vec<SignalDecl>,
    #[serde(default)]
    pub constants: Vec<ConstantDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Absent for `void` methods.
    #[serde(default, rename = "return")]
    pub return_type: Option<GodotType>,
}

impl MethodDecl {
    /// The `qualifiers` attribute Godot expects for this method, if any.
    /// `static` wins over everything else.
    pub fn qualifiers(&self) -> Option<&'static str> {
        match (self.is_static, self.is_virtual, self.is_const) {
            (true, _, _) => Some("static"),
            (false, true, true) => Some("virtual const"),
            (false, true, false) => Some("virtual"),
            (false, false, true) => Some("const"),
            (false, false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(flatten)]
    pub ty: GodotType,
    #[serde(default)]
    pub setter: String,
    #[serde(default)]
    pub getter: String,
    /// Comment on the getter.
    #[serde(default)]
    pub doc: Option<String>,
    /// Comment on the setter, used when the getter has none.
    #[serde(default)]
    pub setter_doc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalDecl {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstantDecl {
    pub name: String,
    pub value: i64,
    #[serde(default, rename = "enum")]
    pub enum_name: Option<String>,
    #[serde(default)]
    pub bitfield: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

impl Manifest {
    /// Load a manifest from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a declaration is unnamed.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        for class in &self.classes {
            if class.name.trim().is_empty() {
                return Err(Error::InvalidManifest("class with empty name".to_string()));
            }
            let names = class
                .methods
                .iter()
                .map(|m| &m.name)
                .chain(class.properties.iter().map(|p| &p.name))
                .chain(class.signals.iter().map(|s| &s.name))
                .chain(class.constants.iter().map(|c| &c.name));
            for name in names {
                if name.trim().is_empty() {
                    return Err(Error::InvalidManifest(format!(
                        "unnamed declaration in class '{}'",
                        class.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let manifest = Manifest::parse(r#"{ "classes": [{ "name": "Foo" }] }"#).unwrap();
        assert_eq!(manifest.classes.len(), 1);
        assert_eq!(manifest.classes[0].name, "Foo");
        assert!(manifest.classes[0].inherits.is_none());
        assert!(manifest.classes[0].methods.is_empty());
    }

    #[test]
    fn parse_full_method() {
        let manifest = Manifest::parse(
            r#"{ "classes": [{ "name": "Foo", "methods": [{
                "name": "get", "const": true, "virtual": true,
                "arguments": [{ "name": "mode", "type": "int", "enum": "Foo.Mode" }],
                "return": { "type": "Array" }
            }] }] }"#,
        )
        .unwrap();
        let method = &manifest.classes[0].methods[0];
        assert_eq!(method.qualifiers(), Some("virtual const"));
        assert_eq!(method.arguments[0].ty.enum_name.as_deref(), Some("Foo.Mode"));
        assert_eq!(method.return_type.as_ref().unwrap().name, "Array");
    }

    #[test]
    fn qualifier_precedence() {
        let mut method = MethodDecl {
            name: "m".to_string(),
            doc: None,
            is_static: true,
            is_const: true,
            is_virtual: true,
            arguments: Vec::new(),
            return_type: None,
        };
        assert_eq!(method.qualifiers(), Some("static"));
        method.is_static = false;
        method.is_virtual = false;
        assert_eq!(method.qualifiers(), Some("const"));
        method.is_const = false;
        assert_eq!(method.qualifiers(), None);
    }

    #[test]
    fn property_type_is_flattened() {
        let manifest = Manifest::parse(
            r#"{ "classes": [{ "name": "Foo", "properties": [
                { "name": "mode", "type": "int", "enum": "Foo.Mode", "setter": "set_mode", "getter": "get_mode" }
            ] }] }"#,
        )
        .unwrap();
        let property = &manifest.classes[0].properties[0];
        assert_eq!(property.ty.name, "int");
        assert_eq!(property.ty.enum_name.as_deref(), Some("Foo.Mode"));
        assert_eq!(property.getter, "get_mode");
    }

    #[test]
    fn reject_empty_class_name() {
        let err = Manifest::parse(r#"{ "classes": [{ "name": " " }] }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(..)));
    }

    #[test]
    fn reject_unnamed_member() {
        let err = Manifest::parse(r#"{ "classes": [{ "name": "Foo", "signals": [{ "name": "" }] }] }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(..)));
    }

    #[test]
    fn reject_invalid_json() {
        let err = Manifest::parse("{ not json").unwrap_err();
        assert!(matches!(err, Error::Parse(..)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Manifest::from_path("/nonexistent/gddoc.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gddoc.json"));
    }
}
