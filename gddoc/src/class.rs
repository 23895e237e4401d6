//! Per-class collection of documented declarations.
//!
//! A [`ClassBuilder`] is started when a class begins, receives every
//! exported declaration of that class, and is consumed by
//! [`ClassBuilder::finish`] once the class ends.

use crate::comment::{self, Comment};
use crate::manifest::ClassDecl;
use crate::model::*;
use serde::Serialize;

/// A documented method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDoc {
    pub name: String,
    /// `static`, `const`, `virtual` or `virtual const`
    pub qualifiers: Option<String>,
    pub function: FunctionExtras,
    pub doc: Documentation,
}

/// A documented signal.
#[derive(Debug, Clone, Serialize)]
pub struct SignalDoc {
    pub name: String,
    pub function: FunctionExtras,
    pub doc: Documentation,
}

/// A property; `doc` is `None` when neither accessor is documented.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDoc {
    pub name: String,
    pub info: PropertyInfo,
    pub doc: Option<Documentation>,
}

/// A documented enum, bitfield or class constant.
#[derive(Debug, Clone, Serialize)]
pub struct ConstantDoc {
    pub name: String,
    pub constant: ConstantExtras,
    pub doc: Documentation,
}

/// Everything needed to write one class reference record.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDoc {
    pub name: String,
    pub inherits: Option<String>,
    pub doc: Documentation,
    pub methods: Vec<MethodDoc>,
    pub properties: Vec<PropertyDoc>,
    pub signals: Vec<SignalDoc>,
    pub constants: Vec<ConstantDoc>,
}

pub struct ClassBuilder {
    class: ClassDoc,
}

impl ClassBuilder {
    pub fn start(name: &str, inherits: Option<&str>, comment: Option<&[Comment]>) -> Self {
        Self {
            class: ClassDoc {
                name: name.to_string(),
                inherits: inherits.map(str::to_string),
                doc: Documentation::parse(name, comment),
                methods: Vec::new(),
                properties: Vec::new(),
                signals: Vec::new(),
                constants: Vec::new(),
            },
        }
    }

    /// Add a method. The first declaration of a name wins.
    pub fn method(
        &mut self,
        name: &str,
        qualifiers: Option<&str>,
        function: FunctionExtras,
        comment: Option<&[Comment]>,
    ) {
        if self.class.methods.iter().any(|m| m.name == name) {
            tracing::debug!(class = %self.class.name, method = name, "ignoring duplicate method");
            return;
        }
        let doc = Documentation::parse(&self.class.name, comment);
        self.class.methods.push(MethodDoc {
            name: name.to_string(),
            qualifiers: qualifiers.map(str::to_string),
            function,
            doc,
        });
    }

    /// Attach the comment of a property accessor. Getter comments take
    /// precedence; a setter comment is only used while the property is
    /// still undocumented.
    pub fn property_accessor(&mut self, property: &str, comment: Option<&[Comment]>, is_setter: bool) {
        let owner = self.class.name.clone();
        let entry = self.property_entry(property);
        if is_setter && entry.doc.is_some() {
            return;
        }
        if let Some(nodes) = comment {
            entry.doc = Some(Documentation::parse(&owner, Some(nodes)));
        }
    }

    /// Record the registration data of a property.
    pub fn property(&mut self, name: &str, info: PropertyInfo) {
        self.property_entry(name).info = info;
    }

    fn property_entry(&mut self, name: &str) -> &mut PropertyDoc {
        let pos = match self.class.properties.iter().position(|p| p.name == name) {
            Some(pos) => pos,
            None => {
                self.class.properties.push(PropertyDoc {
                    name: name.to_string(),
                    info: PropertyInfo::default(),
                    doc: None,
                });
                self.class.properties.len() - 1
            }
        };
        &mut self.class.properties[pos]
    }

    /// Add a signal. The first declaration of a name wins.
    pub fn signal(&mut self, name: &str, arguments: Vec<Argument>, comment: Option<&[Comment]>) {
        if self.class.signals.iter().any(|s| s.name == name) {
            tracing::debug!(class = %self.class.name, signal = name, "ignoring duplicate signal");
            return;
        }
        let doc = Documentation::parse(&self.class.name, comment);
        self.class.signals.push(SignalDoc {
            name: name.to_string(),
            function: FunctionExtras {
                arguments,
                return_type: None,
            },
            doc,
        });
    }

    /// Add a constant. The first declaration of a name wins.
    pub fn constant(&mut self, name: &str, constant: ConstantExtras, comment: Option<&[Comment]>) {
        if self.class.constants.iter().any(|c| c.name == name) {
            tracing::debug!(class = %self.class.name, constant = name, "ignoring duplicate constant");
            return;
        }
        let doc = Documentation::parse(&self.class.name, comment);
        self.class.constants.push(ConstantDoc {
            name: name.to_string(),
            constant,
            doc,
        });
    }

    pub fn finish(self) -> ClassDoc {
        self.class
    }
}

/// Lex an optional raw comment against the declared argument names.
fn lex(raw: Option<&str>, params: &[&str]) -> Option<Vec<Comment>> {
    raw.map(|text| comment::parse(text, params))
}

impl ClassDoc {
    /// Build the documentation of a class described by a manifest entry.
    pub fn from_decl(decl: &ClassDecl) -> ClassDoc {
        let class_comment = lex(decl.doc.as_deref(), &[]);
        let mut builder =
            ClassBuilder::start(&decl.name, decl.inherits.as_deref(), class_comment.as_deref());

        for method in &decl.methods {
            let names: Vec<&str> = method.arguments.iter().map(|a| a.name.as_str()).collect();
            let nodes = lex(method.doc.as_deref(), &names);
            builder.method(
                &method.name,
                method.qualifiers(),
                FunctionExtras {
                    arguments: method.arguments.clone(),
                    return_type: method.return_type.clone(),
                },
                nodes.as_deref(),
            );
        }

        for property in &decl.properties {
            let getter = lex(property.doc.as_deref(), &[]);
            builder.property_accessor(&property.name, getter.as_deref(), false);
            let setter = lex(property.setter_doc.as_deref(), &[]);
            builder.property_accessor(&property.name, setter.as_deref(), true);
            builder.property(
                &property.name,
                PropertyInfo {
                    ty: property.ty.clone(),
                    setter: property.setter.clone(),
                    getter: property.getter.clone(),
                },
            );
        }

        for signal in &decl.signals {
            let names: Vec<&str> = signal.arguments.iter().map(|a| a.name.as_str()).collect();
            let nodes = lex(signal.doc.as_deref(), &names);
            builder.signal(&signal.name, signal.arguments.clone(), nodes.as_deref());
        }

        for constant in &decl.constants {
            let nodes = lex(constant.doc.as_deref(), &[]);
            builder.constant(
                &constant.name,
                ConstantExtras {
                    value: constant.value,
                    enum_name: constant.enum_name.clone(),
                    is_bitfield: constant.bitfield,
                },
                nodes.as_deref(),
            );
        }

        builder.finish()
    }
}
