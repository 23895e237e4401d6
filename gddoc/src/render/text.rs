//! BBCode text emission for a [`Documentation`] record.
//!
//! Everything here writes into a `String` sink. Literal comment text is
//! XML-escaped on the way out; markup produced by this crate (block markers,
//! indentation) is written as-is.

use crate::classify::title;
use crate::model::*;

/// Bullet label for list items.
pub const LIST_BULLET: &str = "\u{A0}\u{2022}\u{A0}\u{A0}";

/// What to include when writing a record body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyOptions {
    /// Write the brief description before the details.
    pub print_brief: bool,
    /// Write preconditions, postconditions, parameters and return values.
    pub print_function_info: bool,
    /// Spaces before every emitted line.
    pub indent: usize,
}

// -- Escaping -----------------------------------------------------------------

/// Append `text` with XML special characters replaced by entities.
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

/// XML-escape `text`.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

// -- Paragraph blocks ---------------------------------------------------------

/// Write a paragraph as one line.
///
/// Trailing blank spans are dropped and the first written span is
/// left-trimmed. `prefix` and the indentation are written just before the
/// first text, so nothing at all is written for an empty paragraph.
/// Returns whether anything was written.
pub fn write_single_line(out: &mut String, para: &Paragraph, indent: usize, prefix: &str) -> bool {
    let Some(mut end) = para.spans.len().checked_sub(1) else {
        return false;
    };
    let mut last = rtrim(&para.spans[end]);
    while end > 0 && last.is_empty() {
        end -= 1;
        last = rtrim(&para.spans[end]);
    }

    let mut written = false;
    let mut emit = |text: &str, out: &mut String| {
        let mut text = text;
        if !written {
            push_indent(out, indent);
            push_escaped(out, prefix);
            text = ltrim(text);
        }
        push_escaped(out, text);
        written = true;
    };
    for span in &para.spans[..end] {
        if !span.is_empty() {
            emit(span.as_str(), out);
        }
    }
    if !last.is_empty() {
        emit(last, out);
    }
    written
}

/// Write preformatted lines, removing the indentation common to all
/// non-blank lines. Each line ends with a newline.
pub fn write_verbatim(out: &mut String, para: &Paragraph, indent: usize) -> bool {
    let strip = para
        .spans
        .iter()
        .filter_map(|span| span.find(|c: char| !WHITESPACE.contains(&c)))
        .min()
        .unwrap_or(usize::MAX);
    for span in &para.spans {
        push_indent(out, indent);
        if span.len() > strip {
            push_escaped(out, rtrim(&span[strip..]));
        }
        out.push('\n');
    }
    !para.spans.is_empty()
}

fn write_code_block(out: &mut String, para: &Paragraph, lang: &str, indent: usize) {
    push_indent(out, indent);
    out.push_str(&format!("[codeblock lang={}]\n", lang));
    write_verbatim(out, para, indent);
    push_indent(out, indent);
    out.push_str("[/codeblock]");
}

/// `[codeblocks]` holding the same example in both script languages.
fn write_code_alternatives(
    out: &mut String,
    first: (&Paragraph, CodeLang),
    second: (&Paragraph, CodeLang),
    indent: usize,
) {
    push_indent(out, indent);
    out.push_str("[codeblocks]\n");
    for (para, lang) in [first, second] {
        push_indent(out, indent);
        out.push_str(&format!("[{}]\n", lang.tag()));
        write_verbatim(out, para, indent);
        push_indent(out, indent);
        out.push_str(&format!("[/{}]\n", lang.tag()));
    }
    push_indent(out, indent);
    out.push_str("[/codeblocks]");
}

/// Write a paragraph sequence, one block per non-empty paragraph separated
/// by newlines. `prefix` labels the first normal paragraph written.
///
/// A code paragraph followed (past empty paragraphs) by one in the other
/// script language is merged with it into a `[codeblocks]` pair.
pub fn write_paragraphs(out: &mut String, paras: &[Paragraph], indent: usize, prefix: &str) -> bool {
    let mut new_para = false;
    let mut i = 0;
    while i < paras.len() {
        let para = &paras[i];
        if para.is_empty() {
            i += 1;
            continue;
        }
        if new_para {
            out.push('\n');
        }
        match para.kind {
            ParagraphKind::List => {
                write_single_line(out, para, indent, LIST_BULLET);
                new_para = true;
            }
            ParagraphKind::VerbatimText => {
                write_code_block(out, para, "text", indent);
                new_para = true;
            }
            ParagraphKind::Code(lang) => {
                let partner = paras[i + 1..]
                    .iter()
                    .position(|p| !p.is_empty())
                    .map(|offset| i + 1 + offset)
                    .filter(|&next| paras[next].kind == ParagraphKind::Code(lang.other()));
                match partner {
                    Some(next) => {
                        write_code_alternatives(
                            out,
                            (para, lang),
                            (&paras[next], lang.other()),
                            indent,
                        );
                        i = next;
                    }
                    None => write_code_block(out, para, lang.tag(), indent),
                }
                new_para = true;
            }
            ParagraphKind::Normal => {
                let label = if new_para { "" } else { prefix };
                new_para = write_single_line(out, para, indent, label) || new_para;
            }
        }
        i += 1;
    }
    new_para
}

/// Write a titled section when `paras` has any content.
fn write_optional_section(
    out: &mut String,
    new_para: &mut bool,
    heading: &str,
    paras: &[Paragraph],
    indent: usize,
) {
    if !has_content(paras) {
        return;
    }
    if *new_para {
        out.push('\n');
    }
    write_paragraphs(out, paras, indent, &title(heading));
    *new_para = true;
}

/// Bulleted `name: description` line used for parameters and return values.
fn write_named_entry(out: &mut String, entry: &ParamDoc, indent: usize) {
    out.push('\n');
    let label = format!(
        "{}[b][code]{}[/code]:[/b] ",
        LIST_BULLET,
        entry.name.as_deref().unwrap_or("")
    );
    write_single_line(out, &entry.description, indent, &label);
}

// -- Record views -------------------------------------------------------------

impl Documentation {
    /// Write the description body: brief (optionally), details, then the
    /// titled sections.
    pub fn write_detailed(&self, out: &mut String, options: BodyOptions) {
        let indent = options.indent;
        let mut new_para = false;

        if options.print_brief && !self.brief.is_empty() {
            write_single_line(out, &self.brief, indent, "");
            new_para = true;
        }
        if has_content(&self.detailed) {
            if new_para {
                out.push('\n');
            }
            write_paragraphs(out, &self.detailed, indent, "");
            new_para = true;
        }
        write_optional_section(out, &mut new_para, "Since", &self.since, indent);

        if options.print_function_info {
            write_optional_section(out, &mut new_para, "Preconditions", &self.preconditions, indent);
            write_optional_section(out, &mut new_para, "Postconditions", &self.postconditions, indent);

            if !self.params.is_empty() {
                if new_para {
                    out.push('\n');
                }
                push_indent(out, indent);
                out.push_str(&title("Parameters"));
                for param in &self.params {
                    write_named_entry(out, param, indent);
                }
                new_para = true;
            }
            if !self.return_desc.is_empty() {
                if new_para {
                    out.push('\n');
                }
                write_single_line(out, &self.return_desc, indent, &title("Return"));
                new_para = true;
            }
            if !self.return_values.is_empty() {
                if self.return_desc.is_empty() {
                    if new_para {
                        out.push('\n');
                    }
                    push_indent(out, indent);
                    out.push_str(&title("Return"));
                }
                for value in &self.return_values {
                    write_named_entry(out, value, indent);
                }
                new_para = true;
            }
        }

        write_optional_section(out, &mut new_para, "Authors", &self.author, indent);
        write_optional_section(out, &mut new_para, "Version", &self.version, indent);
        write_optional_section(out, &mut new_para, "Copyright", &self.copyright, indent);
    }

    /// Body as a fresh string.
    pub fn detailed(&self, options: BodyOptions) -> String {
        let mut out = String::new();
        self.write_detailed(&mut out, options);
        out
    }

    /// Write ` deprecated="…"` / ` experimental="…"` for the tags present.
    pub fn write_attributes(&self, out: &mut String) {
        for (key, tag) in [("deprecated", &self.deprecated), ("experimental", &self.experimental)] {
            if tag.present {
                out.push_str(&format!(" {}=\"", key));
                write_single_line(out, &tag.message, 0, "");
                out.push('"');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment;

    fn para(kind: ParagraphKind, spans: &[&str]) -> Paragraph {
        let mut p = Paragraph::new(kind);
        for s in spans {
            p.push_str(*s);
        }
        p
    }

    fn doc(raw: &str) -> Documentation {
        let nodes = comment::parse(raw, &["x", "y"]);
        Documentation::parse("Player", Some(&nodes))
    }

    fn body(doc: &Documentation, print_brief: bool, print_function_info: bool) -> String {
        doc.detailed(BodyOptions {
            print_brief,
            print_function_info,
            indent: 0,
        })
    }

    #[test]
    fn escapes_five_entities() {
        assert_eq!(
            escape_xml("\"<a>&'b'\""),
            "&quot;&lt;a&gt;&amp;&apos;b&apos;&quot;"
        );
        assert_eq!(escape_xml("[b]x[/b]"), "[b]x[/b]");
    }

    #[test]
    fn single_line_trims_and_joins() {
        let mut out = String::new();
        let p = para(ParagraphKind::Normal, &["   Hello", " <world>", "  ", ""]);
        assert!(write_single_line(&mut out, &p, 4, "[b]T:[/b] "));
        assert_eq!(out, "    [b]T:[/b] Hello &lt;world&gt;");
    }

    #[test]
    fn single_line_skips_empty_paragraph() {
        let mut out = String::new();
        let p = para(ParagraphKind::Normal, &["  ", ""]);
        assert!(!write_single_line(&mut out, &p, 4, "label"));
        assert!(out.is_empty());
    }

    #[test]
    fn verbatim_strips_common_indent() {
        let mut out = String::new();
        let p = para(ParagraphKind::VerbatimText, &["    foo", "      bar", "", "    baz  "]);
        write_verbatim(&mut out, &p, 2);
        assert_eq!(out, "  foo\n    bar\n  \n  baz\n");
    }

    #[test]
    fn list_items_are_contiguous() {
        let d = doc("/// Brief.\n/// @li A\n/// @li B");
        assert_eq!(
            body(&d, false, false),
            format!("{b}A\n{b}B", b = LIST_BULLET)
        );
    }

    #[test]
    fn code_alternatives_merge() {
        let d = doc(
            "/**\n * Brief.\n * @code{.gd}\n * var a = 1\n * @endcode\n *\n * @code{.cs}\n * int a = 1;\n * @endcode\n */",
        );
        assert_eq!(
            body(&d, false, false),
            "[codeblocks]\n[gdscript]\nvar a = 1\n[/gdscript]\n[csharp]\nint a = 1;\n[/csharp]\n[/codeblocks]"
        );
    }

    #[test]
    fn code_alternatives_skip_empty_paragraph() {
        let d = doc(
            "/**\n * Brief.\n * @code{.gd}\n * a()\n * @endcode\n * @details\n * @code{.cs}\n * A();\n * @endcode\n */",
        );
        assert_eq!(d.detailed.len(), 3);
        assert!(d.detailed[1].is_empty());
        assert_eq!(
            body(&d, false, false),
            "[codeblocks]\n[gdscript]\na()\n[/gdscript]\n[csharp]\nA();\n[/csharp]\n[/codeblocks]"
        );
    }

    #[test]
    fn code_followed_by_text_stands_alone() {
        let d = doc("/**\n * Brief.\n * @code{.gd}\n * var a = 1\n * @endcode\n *\n * After.\n */");
        assert_eq!(
            body(&d, false, false),
            "[codeblock lang=gdscript]\nvar a = 1\n[/codeblock]\nAfter."
        );
    }

    #[test]
    fn same_language_code_is_not_merged() {
        let d = doc(
            "/**\n * Brief.\n * @code{.gd}\n * a()\n * @endcode\n * @code{.gd}\n * b()\n * @endcode\n */",
        );
        assert_eq!(
            body(&d, false, false),
            "[codeblock lang=gdscript]\na()\n[/codeblock]\n[codeblock lang=gdscript]\nb()\n[/codeblock]"
        );
    }

    #[test]
    fn verbatim_text_block() {
        let d = doc("/**\n * Brief.\n * @verbatim\n *   <tag>\n * @endverbatim\n */");
        assert_eq!(
            body(&d, false, false),
            "[codeblock lang=text]\n&lt;tag&gt;\n[/codeblock]"
        );
    }

    #[test]
    fn function_sections() {
        let d = doc(
            "/// Jump.\n/// @param y How high.\n/// @pre On floor.\n/// @return Whether it jumped.\n/// @since 1.2\n/// @author Ann",
        );
        // The undocumented first argument still gets its own (empty) line.
        let expected = format!(
            "Jump.\n[b]Since:[/b] 1.2\n[b]Preconditions:[/b] On floor.\n[b]Parameters:[/b] \n\n\
             {}[b][code]y[/code]:[/b] How high.\n[b]Return:[/b] Whether it jumped.\n[b]Authors:[/b] Ann",
            LIST_BULLET
        );
        assert_eq!(body(&d, true, true), expected);
    }

    #[test]
    fn function_info_hidden_for_members() {
        let d = doc("/// Speed.\n/// @pre Never shown.\n/// @version 2");
        assert_eq!(body(&d, true, false), "Speed.\n[b]Version:[/b] 2");
    }

    #[test]
    fn return_values_under_header() {
        let d = doc("/// Load.\n/// @retval OK Loaded.\n/// @retval FAILED Missing file.");
        assert_eq!(
            body(&d, true, true),
            format!(
                "Load.\n[b]Return:[/b] \n{b}[b][code]OK[/code]:[/b] Loaded.\n{b}[b][code]FAILED[/code]:[/b] Missing file.",
                b = LIST_BULLET
            )
        );
    }

    #[test]
    fn return_values_follow_description() {
        let d = doc("/// @return Status.\n/// @retval OK Fine.");
        assert_eq!(
            body(&d, true, true),
            format!("[b]Return:[/b] Status.\n{}[b][code]OK[/code]:[/b] Fine.", LIST_BULLET)
        );
    }

    #[test]
    fn return_values_alone_start_without_newline() {
        let d = doc("/// @retval OK Fine.");
        assert_eq!(
            body(&d, true, true),
            format!("[b]Return:[/b] \n{}[b][code]OK[/code]:[/b] Fine.", LIST_BULLET)
        );
    }

    #[test]
    fn generic_types_are_escaped() {
        let d = doc("/// Returns a Ref<Texture2D> or Array<int> handle.");
        assert_eq!(
            body(&d, true, false),
            "Returns a Ref&lt;Texture2D&gt; or Array&lt;int&gt; handle."
        );
    }

    #[test]
    fn section_label_only_on_first_paragraph() {
        let d = doc("/// @since 1.0\n/// @since 2.0");
        assert_eq!(body(&d, false, false), "[b]Since:[/b] 1.0\n2.0");
    }

    #[test]
    fn attributes() {
        let d = doc("/// @deprecated Use \"Y\" instead.\n/// @experimental");
        let mut out = String::new();
        d.write_attributes(&mut out);
        assert_eq!(out, " deprecated=\"Use &quot;Y&quot; instead.\" experimental=\"\"");
    }

    #[test]
    fn end_to_end_class_comment() {
        let d = doc("/**\n * A player.\n * @since 1.2\n * @deprecated Use Y instead.\n */");
        let mut brief = String::new();
        write_single_line(&mut brief, &d.brief, 0, "");
        assert_eq!(brief, "A player.");
        assert_eq!(body(&d, false, false), "[b]Since:[/b] 1.2");
        let mut attrs = String::new();
        d.write_attributes(&mut attrs);
        assert_eq!(attrs, " deprecated=\"Use Y instead.\"");
    }
}
