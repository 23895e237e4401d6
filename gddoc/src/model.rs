//! Data model for parsed documentation — format-agnostic.
//!
//! A [`Documentation`] record is built once per declaration by the
//! classifier and then handed to a renderer. Paragraphs never escape their
//! text; escaping belongs to the renderer.

use serde::{Deserialize, Serialize};

/// Characters treated as whitespace when trimming comment text.
pub(crate) const WHITESPACE: &[char] = &[' ', '\t', '\n', '\x0b', '\x0c', '\r'];

pub(crate) fn ltrim(s: &str) -> &str {
    s.trim_start_matches(WHITESPACE)
}

pub(crate) fn rtrim(s: &str) -> &str {
    s.trim_end_matches(WHITESPACE)
}

pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(WHITESPACE)
}

// -- Paragraphs ---------------------------------------------------------------

/// Script languages recognised in `@code{.xx}` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLang {
    /// `{.gd}`
    GdScript,
    /// `{.cs}`
    CSharp,
}

impl CodeLang {
    /// Tag used in `[codeblock lang=…]` and `[codeblocks]` markup.
    pub fn tag(self) -> &'static str {
        match self {
            CodeLang::GdScript => "gdscript",
            CodeLang::CSharp => "csharp",
        }
    }

    /// The alternative language a block can be paired with.
    pub fn other(self) -> CodeLang {
        match self {
            CodeLang::GdScript => CodeLang::CSharp,
            CodeLang::CSharp => CodeLang::GdScript,
        }
    }
}

/// How a paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    #[default]
    Normal,
    /// One item of an unordered list.
    List,
    /// Preformatted text, one span per line.
    VerbatimText,
    /// Preformatted script code, one span per line.
    Code(CodeLang),
}

/// A run of text spans sharing one [`ParagraphKind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub spans: Vec<String>,
    pub kind: ParagraphKind,
}

impl Paragraph {
    pub fn new(kind: ParagraphKind) -> Self {
        Self {
            spans: Vec::new(),
            kind,
        }
    }

    /// True when every span is blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| ltrim(span).is_empty())
    }

    /// Append a text fragment as-is.
    pub fn push_str(&mut self, text: impl Into<String>) {
        self.spans.push(text.into());
    }

    /// Prepend a literal label, left-trimming the span it now precedes so the
    /// label binds to the text.
    pub fn push_front(&mut self, label: impl Into<String>) {
        if let Some(first) = self.spans.first_mut() {
            let trimmed = ltrim(first);
            if !trimmed.is_empty() {
                *first = trimmed.to_string();
            }
        }
        self.spans.insert(0, label.into());
    }

    /// Move the spans of `other` onto the end of this paragraph.
    ///
    /// Paragraphs of different kinds do not merge: the appended spans are
    /// dropped and a warning is logged.
    pub fn append(&mut self, mut other: Paragraph) {
        if self.kind == other.kind {
            self.spans.append(&mut other.spans);
        } else if !other.is_empty() {
            tracing::warn!(
                kind = ?self.kind,
                dropped = ?other.kind,
                "dropping text appended to a paragraph of another kind"
            );
        }
    }

    /// Raw concatenation of all spans; used by tests and diagnostics.
    pub fn text(&self) -> String {
        self.spans.concat()
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        let mut para = Paragraph::default();
        para.push_str(text);
        para
    }
}

/// Ordered paragraphs, rendered top to bottom.
pub type Paragraphs = Vec<Paragraph>;

/// True when at least one paragraph carries non-blank text.
pub fn has_content(paras: &[Paragraph]) -> bool {
    paras.iter().any(|p| !p.is_empty())
}

// -- Record -------------------------------------------------------------------

/// Deprecated / experimental marker with an optional explanation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusTag {
    pub present: bool,
    pub message: Paragraph,
}

/// @tutorial entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tutorial {
    pub url: String,
    pub title: Paragraph,
}

/// Documented argument (@param) or return value alternative (@retval).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamDoc {
    pub name: Option<String>,
    pub description: Paragraph,
}

/// Parsed documentation for one declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Documentation {
    /// @brief, or the first bare paragraph
    pub brief: Paragraph,
    pub detailed: Paragraphs,
    /// @author / @authors
    pub author: Paragraphs,
    pub copyright: Paragraphs,
    pub since: Paragraphs,
    pub version: Paragraphs,
    /// @pre (functions only)
    pub preconditions: Paragraphs,
    /// @pos (functions only)
    pub postconditions: Paragraphs,
    /// @return / @returns / @result
    pub return_desc: Paragraph,
    pub deprecated: StatusTag,
    pub experimental: StatusTag,
    /// Classes only
    pub tutorials: Vec<Tutorial>,
    /// Indexed by declared argument position
    pub params: Vec<ParamDoc>,
    /// @retval entries
    pub return_values: Vec<ParamDoc>,
}

// -- Declaration metadata -----------------------------------------------------

/// Godot-facing type of an argument, return value or property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodotType {
    #[serde(rename = "type")]
    pub name: String,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
}

/// Declared call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(flatten)]
    pub ty: GodotType,
}

/// Extra data carried by methods and signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunctionExtras {
    pub arguments: Vec<Argument>,
    /// `None` means `void`
    pub return_type: Option<GodotType>,
}

/// Extra data carried by enum / bitfield / plain constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstantExtras {
    pub value: i64,
    pub enum_name: Option<String>,
    pub is_bitfield: bool,
}

/// Registration data of a property, independent of its documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyInfo {
    pub ty: GodotType,
    pub setter: String,
    pub getter: String,
}
