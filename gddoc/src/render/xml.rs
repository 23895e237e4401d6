//! Godot class reference XML renderer.
//!
//! Produces the `doc_classes/<Class>.xml` layout the engine's documentation
//! loader reads. Section order and indentation follow the files Godot
//! itself ships: four spaces per nesting level, BBCode bodies indented to
//! one level deeper than their enclosing tag.

use crate::class::*;
use crate::error::Result;
use crate::model::*;
use crate::render::text::{escape_xml, write_single_line, BodyOptions};
use crate::render::Renderer;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n";

const SCHEMA_ATTRS: &str = " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
     xsi:noNamespaceSchemaLocation=\"https://raw.githubusercontent.com/godotengine/godot/master/doc/class.xsd\"";

pub struct XmlRenderer;

impl Renderer for XmlRenderer {
    fn render(&self, class: &ClassDoc) -> Result<String> {
        Ok(render_class(class))
    }

    fn file_extension(&self) -> &str {
        "xml"
    }
}

fn render_class(class: &ClassDoc) -> String {
    let mut out = String::from(XML_HEADER);

    out.push_str(&format!("<class name=\"{}\"", escape_xml(&class.name)));
    if let Some(ref base) = class.inherits {
        out.push_str(&format!(" inherits=\"{}\"", escape_xml(base)));
    }
    out.push_str(SCHEMA_ATTRS);
    class.doc.write_attributes(&mut out);
    out.push_str(">\n");

    out.push_str("    <brief_description>\n");
    write_single_line(&mut out, &class.doc.brief, 8, "");
    out.push_str("\n    </brief_description>\n");

    out.push_str("    <description>\n");
    class.doc.write_detailed(&mut out, body(false, false, 8));
    out.push_str("\n    </description>\n");

    out.push_str("    <tutorials>\n");
    for tutorial in &class.doc.tutorials {
        out.push_str("        <link");
        if !tutorial.title.is_empty() {
            out.push_str(" title=\"");
            write_single_line(&mut out, &tutorial.title, 0, "");
            out.push('"');
        }
        out.push_str(&format!(">{}</link>\n", escape_xml(&tutorial.url)));
    }
    out.push_str("    </tutorials>\n");

    out.push_str("    <methods>\n");
    for method in &class.methods {
        render_method(&mut out, method);
    }
    out.push_str("    </methods>\n");

    out.push_str("    <members>\n");
    for property in &class.properties {
        render_member(&mut out, property);
    }
    out.push_str("    </members>\n");

    out.push_str("    <signals>\n");
    for signal in &class.signals {
        render_signal(&mut out, signal);
    }
    out.push_str("    </signals>\n");

    out.push_str("    <constants>\n");
    for constant in &class.constants {
        render_constant(&mut out, constant);
    }
    out.push_str("    </constants>\n");

    out.push_str("</class>\n");
    out
}

fn body(print_brief: bool, print_function_info: bool, indent: usize) -> BodyOptions {
    BodyOptions {
        print_brief,
        print_function_info,
        indent,
    }
}

/// ` enum="…"` when the type is an enum or bitfield.
fn enum_attr(enum_name: &Option<String>) -> String {
    match enum_name {
        Some(name) => format!(" enum=\"{}\"", escape_xml(name)),
        None => String::new(),
    }
}

fn render_params(out: &mut String, arguments: &[Argument], with_enum: bool) {
    for (index, arg) in arguments.iter().enumerate() {
        out.push_str(&format!(
            "            <param index=\"{}\" name=\"{}\" type=\"{}\"",
            index,
            escape_xml(&arg.name),
            escape_xml(&arg.ty.name)
        ));
        if with_enum {
            out.push_str(&enum_attr(&arg.ty.enum_name));
        }
        out.push_str("/>\n");
    }
}

fn render_method(out: &mut String, method: &MethodDoc) {
    out.push_str(&format!("        <method name=\"{}\"", escape_xml(&method.name)));
    if let Some(ref qualifiers) = method.qualifiers {
        out.push_str(&format!(" qualifiers=\"{}\"", qualifiers));
    }
    method.doc.write_attributes(out);
    out.push_str(">\n");

    match method.function.return_type {
        Some(ref ty) => out.push_str(&format!(
            "            <return type=\"{}\"{}/>\n",
            escape_xml(&ty.name),
            enum_attr(&ty.enum_name)
        )),
        None => out.push_str("            <return type=\"void\"/>\n"),
    }
    render_params(out, &method.function.arguments, true);

    out.push_str("            <description>\n");
    method.doc.write_detailed(out, body(true, true, 16));
    out.push_str("\n            </description>\n");
    out.push_str("        </method>\n");
}

fn render_member(out: &mut String, property: &PropertyDoc) {
    let info = &property.info;
    out.push_str(&format!(
        "        <member name=\"{}\" type=\"{}\" setter=\"{}\" getter=\"{}\"{}",
        escape_xml(&property.name),
        escape_xml(&info.ty.name),
        escape_xml(&info.setter),
        escape_xml(&info.getter),
        enum_attr(&info.ty.enum_name)
    ));
    match property.doc {
        Some(ref doc) => {
            doc.write_attributes(out);
            out.push_str(">\n");
            doc.write_detailed(out, body(true, false, 12));
            out.push_str("\n        </member>\n");
        }
        None => out.push_str("/>\n"),
    }
}

fn render_signal(out: &mut String, signal: &SignalDoc) {
    out.push_str(&format!("        <signal name=\"{}\"", escape_xml(&signal.name)));
    signal.doc.write_attributes(out);
    out.push_str(">\n");
    render_params(out, &signal.function.arguments, false);
    out.push_str("            <description>\n");
    signal.doc.write_detailed(out, body(true, true, 16));
    out.push_str("\n            </description>\n");
    out.push_str("        </signal>\n");
}

fn render_constant(out: &mut String, constant: &ConstantDoc) {
    let extras = &constant.constant;
    out.push_str(&format!(
        "        <constant name=\"{}\" value=\"{}\" is_bitfield=\"{}\"{}",
        escape_xml(&constant.name),
        extras.value,
        extras.is_bitfield,
        enum_attr(&extras.enum_name)
    ));
    constant.doc.write_attributes(out);
    out.push_str(">\n");
    constant.doc.write_detailed(out, body(true, false, 12));
    out.push_str("\n        </constant>\n");
}
