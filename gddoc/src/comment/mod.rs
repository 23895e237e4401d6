//! Structured comment tree.
//!
//! One tagged node type covers both top-level blocks and the inline content
//! nested inside them. Trees come from [`lexer::parse`] or from any other
//! front end that can produce them.

pub mod lexer;

pub use lexer::parse;

/// A node of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    /// Text of one source line, or of the part of it between inline commands.
    Text(String),
    /// `@b word`, `@ref member:x`, `@n`, ...
    InlineCommand { name: String, args: Vec<String> },
    /// `<b>`, `</i>`; carried through but never rendered.
    HtmlTag(String),
    /// Run of text and inline commands up to a blank line.
    Paragraph(Vec<Comment>),
    /// `@note ...`, `@brief ...`, `@par Title`, ...
    BlockCommand {
        name: String,
        args: Vec<String>,
        children: Vec<Comment>,
    },
    /// `@param name ...`. `index` is the position of `name` in the declared
    /// arguments, `None` when it names no argument.
    ParamCommand {
        name: String,
        index: Option<usize>,
        vararg: bool,
        children: Vec<Comment>,
    },
    /// `@tparam T ...`
    TParamCommand { name: String, children: Vec<Comment> },
    /// `@code ... @endcode`, `@verbatim ... @endverbatim`
    VerbatimBlock { name: String, lines: Vec<String> },
    /// `@fn ...`, `@property ...`: a command whose argument is the rest of the line.
    VerbatimLine { name: String, text: String },
}

impl Comment {
    /// Shorthand for a paragraph holding a single text node.
    pub fn text_paragraph(text: &str) -> Comment {
        Comment::Paragraph(vec![Comment::Text(text.to_string())])
    }
}
