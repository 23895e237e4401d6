//! Doxygen comment lexer — line-by-line state machine.
//!
//! Turns the raw text of a `/** ... */` or `///` comment into a
//! [`Comment`] tree. Decorations are stripped but the text after them is
//! kept verbatim, so consecutive lines join as `"first" + " second"`.

use super::Comment;
use crate::model::{ltrim, rtrim, trim};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

/// Command at the start of a line, with an optional `[dir]` suffix (`@param[in]`).
static RE_LINE_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*[@\\]([A-Za-z_][A-Za-z0-9_]*)(\[[^\]]*\])?").unwrap()
});

/// Candidate inline command or HTML tag inside running text. Only known
/// element names count as tags, so `Ref<Texture2D>` stays text.
static RE_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<cmd>[@\\](?P<name>[A-Za-z]+))",
        r"|(?P<html></?(?i:b|i|em|strong|code|tt|br|p|ul|ol|li|a|pre|sub|sup|span|div|img|table|tr|td|th|hr|blockquote)\b[^<>]*/?>)",
    ))
    .unwrap()
});

/// Leading word of a command argument.
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*(\S+)").unwrap());

// -- Command tables -----------------------------------------------------------

/// Inline commands and whether they take a word argument.
const INLINE_COMMANDS: &[(&str, bool)] = &[
    ("a", true),
    ("b", true),
    ("c", true),
    ("e", true),
    ("em", true),
    ("emoji", true),
    ("n", false),
    ("p", true),
    ("ref", true),
];

/// Commands whose argument is the remainder of the line.
const VERBATIM_LINE_COMMANDS: &[&str] = &["fn", "var", "property", "typedef", "def", "overload"];

/// Commands that open a verbatim block closed by `end<name>`.
const VERBATIM_BLOCK_COMMANDS: &[&str] = &["code", "verbatim"];

fn inline_arity(name: &str) -> Option<bool> {
    INLINE_COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, takes_arg)| *takes_arg)
}

// -- Parser state -------------------------------------------------------------

/// The top-level node currently collecting text.
enum Open {
    Paragraph,
    Block { name: String, args: Vec<String> },
    Param { name: String, index: Option<usize>, vararg: bool },
    TParam { name: String },
}

struct Verbatim {
    name: String,
    lines: Vec<String>,
}

struct Lexer<'a, S> {
    params: &'a [S],
    nodes: Vec<Comment>,
    open: Option<(Open, Vec<Comment>)>,
    verbatim: Option<Verbatim>,
}

// -- Public API ---------------------------------------------------------------

/// Parse a raw documentation comment.
///
/// `params` are the declared argument names, used to resolve `@param` to an
/// argument index. Pass an empty slice for declarations without arguments.
pub fn parse<S: AsRef<str>>(raw: &str, params: &[S]) -> Vec<Comment> {
    let mut lexer = Lexer {
        params,
        nodes: Vec::new(),
        open: None,
        verbatim: None,
    };
    for line in strip_decorations(raw) {
        lexer.line(&line);
    }
    lexer.finish()
}

/// Remove comment markers, keeping the text that follows them.
pub fn strip_decorations(raw: &str) -> Vec<String> {
    let block = trim(raw).starts_with("/*");
    raw.lines()
        .enumerate()
        .map(|(i, line)| {
            let mut text = line;
            if block {
                let lead = ltrim(text);
                if i == 0 {
                    if let Some(rest) = ["/**", "/*!", "/*"]
                        .iter()
                        .find_map(|marker| lead.strip_prefix(marker))
                    {
                        text = rest;
                    }
                } else if let Some(rest) = lead.strip_prefix('*') {
                    if !rest.starts_with('/') {
                        text = rest;
                    }
                }
                if let Some(rest) = rtrim(text).strip_suffix("*/") {
                    text = rest;
                }
            } else {
                let lead = ltrim(text);
                if let Some(rest) = lead.strip_prefix("///").or_else(|| lead.strip_prefix("//!")) {
                    text = rest;
                }
            }
            text.to_string()
        })
        .collect()
}

// -- Line processing ----------------------------------------------------------

impl<S: AsRef<str>> Lexer<'_, S> {
    fn line(&mut self, line: &str) {
        if self.verbatim.is_some() {
            self.verbatim_line(line);
            return;
        }

        if trim(line).is_empty() {
            self.close();
            return;
        }

        if let Some(caps) = RE_LINE_COMMAND.captures(line) {
            let name = caps[1].to_string();
            let rest = &line[caps.get(0).map_or(0, |m| m.end())..];
            if inline_arity(&name).is_none() {
                self.command(name, rest);
                return;
            }
        }

        if self.open.is_none() {
            self.open = Some((Open::Paragraph, Vec::new()));
        }
        self.text(line);
    }

    fn command(&mut self, name: String, rest: &str) {
        self.close();

        if VERBATIM_BLOCK_COMMANDS.contains(&name.as_str()) {
            self.verbatim = Some(Verbatim {
                name,
                lines: Vec::new(),
            });
            if !trim(rest).is_empty() {
                self.verbatim_line(rest);
            }
            return;
        }

        if VERBATIM_LINE_COMMANDS.contains(&name.as_str()) {
            self.nodes.push(Comment::VerbatimLine {
                name,
                text: rest.to_string(),
            });
            return;
        }

        let (open, content) = match name.as_str() {
            "param" => {
                let (word, content) = split_word(rest);
                let index = self.params.iter().position(|p| p.as_ref() == word);
                (
                    Open::Param {
                        name: word.to_string(),
                        index,
                        vararg: word == "...",
                    },
                    content,
                )
            }
            "tparam" => {
                let (word, content) = split_word(rest);
                (
                    Open::TParam {
                        name: word.to_string(),
                    },
                    content,
                )
            }
            "par" => {
                let title = trim(rest);
                let args = if title.is_empty() {
                    Vec::new()
                } else {
                    vec![title.to_string()]
                };
                (Open::Block { name, args }, "")
            }
            "retval" => {
                let (word, content) = split_word(rest);
                let args = if word.is_empty() {
                    Vec::new()
                } else {
                    vec![word.to_string()]
                };
                (Open::Block { name, args }, content)
            }
            _ => (
                Open::Block {
                    name,
                    args: Vec::new(),
                },
                rest,
            ),
        };
        self.open = Some((open, Vec::new()));
        if !content.is_empty() {
            self.text(content);
        }
    }

    fn verbatim_line(&mut self, line: &str) {
        let Some(verbatim) = self.verbatim.as_mut() else {
            return;
        };
        let end = ["@end", "\\end"]
            .iter()
            .filter_map(|marker| line.find(&format!("{}{}", marker, verbatim.name)))
            .min();
        match end {
            Some(pos) => {
                let before = &line[..pos];
                if !trim(before).is_empty() {
                    verbatim.lines.push(before.to_string());
                }
                if let Some(done) = self.verbatim.take() {
                    self.nodes.push(Comment::VerbatimBlock {
                        name: done.name,
                        lines: done.lines,
                    });
                }
            }
            None => verbatim.lines.push(line.to_string()),
        }
    }

    /// Split one line of running text into text, inline command and HTML nodes.
    fn text(&mut self, line: &str) {
        let Some((_, content)) = self.open.as_mut() else {
            return;
        };

        let mut start = 0;
        let mut cursor = 0;
        while let Some(caps) = RE_INLINE.captures_at(line, cursor) {
            let Some(whole) = caps.get(0) else {
                break;
            };
            cursor = whole.end();

            if let Some(tag) = caps.name("html") {
                push_text(content, &line[start..whole.start()]);
                content.push(Comment::HtmlTag(tag.as_str().to_string()));
                start = whole.end();
                continue;
            }

            let name = caps.name("name").map_or("", |m| m.as_str());
            let attached = line[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
            let Some(takes_arg) = inline_arity(name).filter(|_| !attached) else {
                continue;
            };

            push_text(content, &line[start..whole.start()]);
            let mut args = Vec::new();
            if takes_arg {
                if let Some(word) = RE_WORD.captures(&line[cursor..]).and_then(|c| c.get(1)) {
                    args.push(word.as_str().to_string());
                    cursor += word.end();
                }
            }
            content.push(Comment::InlineCommand {
                name: name.to_string(),
                args,
            });
            start = cursor;
        }
        push_text(content, &line[start..]);
    }

    /// Finish the node collecting text, if any.
    fn close(&mut self) {
        let Some((open, content)) = self.open.take() else {
            return;
        };
        let node = match open {
            Open::Paragraph => {
                if content.is_empty() {
                    return;
                }
                Comment::Paragraph(content)
            }
            Open::Block { name, args } => Comment::BlockCommand {
                name,
                args,
                children: vec![Comment::Paragraph(content)],
            },
            Open::Param {
                name,
                index,
                vararg,
            } => Comment::ParamCommand {
                name,
                index,
                vararg,
                children: vec![Comment::Paragraph(content)],
            },
            Open::TParam { name } => Comment::TParamCommand {
                name,
                children: vec![Comment::Paragraph(content)],
            },
        };
        self.nodes.push(node);
    }

    fn finish(mut self) -> Vec<Comment> {
        self.close();
        // Unterminated verbatim blocks keep what they collected.
        if let Some(verbatim) = self.verbatim.take() {
            self.nodes.push(Comment::VerbatimBlock {
                name: verbatim.name,
                lines: verbatim.lines,
            });
        }
        self.nodes
    }
}

// -- Helper functions ---------------------------------------------------------

fn push_text(content: &mut Vec<Comment>, text: &str) {
    if !text.is_empty() {
        content.push(Comment::Text(text.to_string()));
    }
}

/// Split the first word off a command argument: `" x rest"` → `("x", " rest")`.
fn split_word(rest: &str) -> (&str, &str) {
    match RE_WORD.captures(rest).and_then(|c| c.get(1)) {
        Some(word) => (word.as_str(), &rest[word.end()..]),
        None => ("", ""),
    }
}
