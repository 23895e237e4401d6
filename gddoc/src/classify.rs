//! Comment classifier: routes each top-level comment node into a field of
//! the [`Documentation`] record.
//!
//! Processing is a single pass in document order. The only state carried
//! between nodes is whether an explicit `@brief` has been seen, which decides
//! how later summaries merge with earlier ones.

use crate::comment::Comment;
use crate::expand::expand_inline;
use crate::model::*;

/// Admonition commands: (command, title, colour, symbol).
const ADMONITIONS: &[(&str, &str, &str, &str)] = &[
    ("attention", "Attention", "aa6600", "\u{26A0}"),
    ("bug", "Bug", "dd3311", "\u{2620}"),
    ("note", "Note", "008855", "\u{2606}"),
    ("remark", "Remark", "0077cc", "\u{2605}"),
    ("todo", "TODO", "aa44dd", "\u{1F5F9}\u{FE0E}"),
    ("warning", "Warning", "ee0022", "\u{26A0}"),
];

/// Bold `Title: ` label used for `@par` titles and section headers.
pub(crate) fn title(text: &str) -> String {
    format!("[b]{}:[/b] ", text)
}

fn admonition_label(title: &str, color: &str, symbol: &str) -> String {
    format!(
        "[color={}]\u{A0}{}\u{A0}\u{A0}[b]{}:[/b][/color] ",
        color, symbol, title
    )
}

impl Documentation {
    /// Parse the comment attached to a declaration. A missing comment yields
    /// an empty record.
    pub fn parse(owner: &str, comment: Option<&[Comment]>) -> Documentation {
        let mut classifier = Classifier {
            owner,
            doc: Documentation::default(),
            has_brief_tag: false,
        };
        for node in comment.unwrap_or_default() {
            classifier.node(node);
        }
        classifier.doc
    }
}

struct Classifier<'a> {
    owner: &'a str,
    doc: Documentation,
    has_brief_tag: bool,
}

impl Classifier<'_> {
    fn node(&mut self, node: &Comment) {
        match node {
            Comment::BlockCommand {
                name,
                args,
                children,
            } => {
                let paragraph = self.collect(children);
                self.block(name, args, paragraph);
            }
            Comment::Paragraph(children) => {
                let paragraph = self.collect(children);
                if !self.has_brief_tag && self.doc.brief.is_empty() {
                    self.doc.brief = paragraph;
                } else {
                    self.doc.detailed.push(paragraph);
                }
            }
            Comment::VerbatimBlock { name, lines } => self.verbatim(name, lines),
            Comment::VerbatimLine { text, .. } => {
                let mut para = Paragraph::new(ParagraphKind::VerbatimText);
                para.push_str(trim(text));
                self.doc.detailed.push(para);
            }
            Comment::ParamCommand {
                name,
                index,
                vararg,
                children,
            } => {
                if *vararg {
                    tracing::debug!(owner = self.owner, "skipping documentation of variadic arguments");
                    return;
                }
                let Some(idx) = *index else {
                    tracing::debug!(owner = self.owner, param = %name, "@param names no declared argument");
                    return;
                };
                if self.doc.params.len() <= idx {
                    self.doc.params.resize(idx + 1, ParamDoc::default());
                }
                let description = self.collect(children);
                let slot = &mut self.doc.params[idx];
                slot.description = description;
                slot.name = Some(name.clone());
            }
            Comment::TParamCommand { .. }
            | Comment::Text(_)
            | Comment::InlineCommand { .. }
            | Comment::HtmlTag(_) => {}
        }
    }

    fn block(&mut self, command: &str, args: &[String], mut paragraph: Paragraph) {
        if let Some((_, title, color, symbol)) =
            ADMONITIONS.iter().find(|(name, ..)| *name == command)
        {
            paragraph.push_front(admonition_label(title, color, symbol));
            self.doc.detailed.push(paragraph);
            return;
        }

        match command {
            "author" | "authors" => self.doc.author.push(paragraph),
            "copyright" => self.doc.copyright.push(paragraph),
            "since" => self.doc.since.push(paragraph),
            "version" => self.doc.version.push(paragraph),
            "pre" => self.doc.preconditions.push(paragraph),
            "pos" => self.doc.postconditions.push(paragraph),
            "result" | "return" | "returns" => self.doc.return_desc.append(paragraph),
            "brief" => self.brief(paragraph),
            "deprecated" => {
                self.doc.deprecated = StatusTag {
                    present: true,
                    message: paragraph,
                };
            }
            "experimental" => {
                self.doc.experimental = StatusTag {
                    present: true,
                    message: paragraph,
                };
            }
            "li" => {
                paragraph.kind = ParagraphKind::List;
                self.doc.detailed.push(paragraph);
            }
            "par" => {
                if let Some(heading) = args.first() {
                    paragraph.push_front(title(heading));
                }
                self.doc.detailed.push(paragraph);
            }
            "retval" => self.doc.return_values.push(ParamDoc {
                name: args.first().cloned(),
                description: paragraph,
            }),
            "tutorial" => {
                if let Some(tutorial) = tutorial(paragraph) {
                    self.doc.tutorials.push(tutorial);
                }
            }
            _ => self.doc.detailed.push(paragraph),
        }
    }

    /// `@brief`: the first explicit brief replaces an implicit one (demoting
    /// it to the front of the details); later explicit briefs extend it.
    fn brief(&mut self, paragraph: Paragraph) {
        if self.doc.brief.is_empty() {
            self.doc.brief = paragraph;
        } else if !self.has_brief_tag {
            let implicit = std::mem::replace(&mut self.doc.brief, paragraph);
            self.doc.detailed.insert(0, implicit);
        } else {
            self.doc.brief.append(paragraph);
        }
        self.has_brief_tag = true;
    }

    fn verbatim(&mut self, command: &str, lines: &[String]) {
        let mut kind = ParagraphKind::VerbatimText;
        let mut body = lines;
        if command == "code" {
            if let Some((first, rest)) = lines.split_first() {
                let lang = match trim(first) {
                    "{.gd}" => Some(CodeLang::GdScript),
                    "{.cs}" => Some(CodeLang::CSharp),
                    _ => None,
                };
                if let Some(lang) = lang {
                    kind = ParagraphKind::Code(lang);
                    body = rest;
                }
            }
        }
        let mut para = Paragraph::new(kind);
        for line in body {
            para.push_str(line.as_str());
        }
        self.doc.detailed.push(para);
    }

    /// Accumulate the text of nested nodes in document order.
    fn collect(&self, children: &[Comment]) -> Paragraph {
        let mut para = Paragraph::default();
        self.collect_into(children, &mut para);
        para
    }

    fn collect_into(&self, children: &[Comment], para: &mut Paragraph) {
        for child in children {
            match child {
                Comment::Text(text) => para.push_str(text.as_str()),
                Comment::InlineCommand { name, args } => {
                    let fragment = expand_inline(name, args, self.owner);
                    if !fragment.is_empty() {
                        para.push_str(fragment);
                    }
                }
                Comment::Paragraph(nested) | Comment::BlockCommand { children: nested, .. } => {
                    self.collect_into(nested, para);
                }
                Comment::HtmlTag(tag) => {
                    tracing::debug!(owner = self.owner, %tag, "ignoring HTML tag");
                }
                Comment::ParamCommand { .. }
                | Comment::TParamCommand { .. }
                | Comment::VerbatimBlock { .. }
                | Comment::VerbatimLine { .. } => {}
            }
        }
    }
}

/// Split a `@tutorial url title...` paragraph. Returns `None` when the
/// paragraph has no text at all.
fn tutorial(mut paragraph: Paragraph) -> Option<Tutorial> {
    let pos = paragraph
        .spans
        .iter()
        .position(|span| !ltrim(span).is_empty())?;
    let line = trim(&paragraph.spans[pos]).to_string();
    let url = match line.split_once(WHITESPACE) {
        Some((url, title)) => {
            paragraph.spans[pos] = ltrim(title).to_string();
            url.to_string()
        }
        None => {
            paragraph.spans.remove(pos);
            line
        }
    };
    Some(Tutorial {
        url,
        title: paragraph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{self, Comment};

    fn parse(raw: &str) -> Documentation {
        let nodes = comment::parse(raw, &["a", "b", "c"]);
        Documentation::parse("Player", Some(&nodes))
    }

    fn texts(paras: &[Paragraph]) -> Vec<String> {
        paras.iter().map(|p| p.text().trim().to_string()).collect()
    }

    #[test]
    fn missing_comment_is_empty() {
        assert_eq!(Documentation::parse("Player", None), Documentation::default());
    }

    #[test]
    fn first_paragraph_is_brief() {
        let doc = parse("/**\n * Summary.\n *\n * Body.\n */");
        assert_eq!(doc.brief.text().trim(), "Summary.");
        assert_eq!(texts(&doc.detailed), vec!["Body."]);
    }

    #[test]
    fn explicit_brief_demotes_implicit_one() {
        let doc = parse("/**\n * Summary.\n *\n * Body.\n *\n * @brief New summary.\n */");
        assert_eq!(doc.brief.text().trim(), "New summary.");
        assert_eq!(texts(&doc.detailed), vec!["Summary.", "Body."]);
    }

    #[test]
    fn second_explicit_brief_extends() {
        let doc = parse("/// @brief One.\n/// @brief Two.");
        assert_eq!(doc.brief.text(), " One. Two.");
        assert!(doc.detailed.is_empty());
    }

    #[test]
    fn paragraph_after_explicit_brief_is_detail() {
        let doc = parse("/// @brief Short.\n///\n/// Long.");
        assert_eq!(doc.brief.text().trim(), "Short.");
        assert_eq!(texts(&doc.detailed), vec!["Long."]);
    }

    #[test]
    fn sections_are_routed() {
        let doc = parse(
            "/// @author Ann\n/// @copyright 2025\n/// @since 1.2\n/// @version 3\n\
             /// @pre ready\n/// @pos done\n/// @returns A value.",
        );
        assert_eq!(texts(&doc.author), vec!["Ann"]);
        assert_eq!(texts(&doc.copyright), vec!["2025"]);
        assert_eq!(texts(&doc.since), vec!["1.2"]);
        assert_eq!(texts(&doc.version), vec!["3"]);
        assert_eq!(texts(&doc.preconditions), vec!["ready"]);
        assert_eq!(texts(&doc.postconditions), vec!["done"]);
        assert_eq!(doc.return_desc.text().trim(), "A value.");
    }

    #[test]
    fn admonition_gets_label() {
        let doc = parse("/// Brief.\n/// @note  Mind the gap.");
        assert_eq!(doc.detailed.len(), 1);
        assert_eq!(
            doc.detailed[0].spans,
            vec![
                "[color=008855]\u{A0}\u{2606}\u{A0}\u{A0}[b]Note:[/b][/color] ".to_string(),
                "Mind the gap.".to_string(),
            ]
        );
    }

    #[test]
    fn list_items_are_list_paragraphs() {
        let doc = parse("/// Brief.\n/// @li A\n/// @li B");
        assert_eq!(doc.detailed.len(), 2);
        assert!(doc.detailed.iter().all(|p| p.kind == ParagraphKind::List));
    }

    #[test]
    fn par_with_title() {
        let doc = parse("/// Brief.\n///\n/// @par Usage\n/// Call it.");
        assert_eq!(doc.detailed[0].spans[0], "[b]Usage:[/b] ");
        assert_eq!(doc.detailed[0].text(), "[b]Usage:[/b] Call it.");
    }

    #[test]
    fn status_tags() {
        let doc = parse("/// @deprecated Use Y instead.\n/// @experimental");
        assert!(doc.deprecated.present);
        assert_eq!(doc.deprecated.message.text().trim(), "Use Y instead.");
        assert!(doc.experimental.present);
        assert!(doc.experimental.message.is_empty());
    }

    #[test]
    fn tutorial_url_and_title() {
        let doc = parse("/// @tutorial https://docs.example/t  Getting started\n/// @tutorial https://x.y");
        assert_eq!(doc.tutorials.len(), 2);
        assert_eq!(doc.tutorials[0].url, "https://docs.example/t");
        assert_eq!(doc.tutorials[0].title.text(), "Getting started");
        assert_eq!(doc.tutorials[1].url, "https://x.y");
        assert!(doc.tutorials[1].title.is_empty());
    }

    #[test]
    fn blank_tutorial_is_ignored() {
        let doc = parse("/// @tutorial");
        assert!(doc.tutorials.is_empty());
    }

    #[test]
    fn retval_entries() {
        let doc = parse("/// @retval OK Success.\n/// @retval");
        assert_eq!(doc.return_values.len(), 2);
        assert_eq!(doc.return_values[0].name.as_deref(), Some("OK"));
        assert_eq!(doc.return_values[0].description.text().trim(), "Success.");
        assert_eq!(doc.return_values[1].name, None);
    }

    #[test]
    fn parameter_gap_is_filled() {
        let doc = parse("/// @param c Third.\n/// @param a First.");
        assert_eq!(doc.params.len(), 3);
        assert_eq!(doc.params[0].name.as_deref(), Some("a"));
        assert_eq!(doc.params[1], ParamDoc::default());
        assert_eq!(doc.params[2].description.text().trim(), "Third.");
    }

    #[test]
    fn vararg_and_unknown_params_are_skipped() {
        let doc = parse("/// @param ... Rest.\n/// @param zzz Nope.");
        assert!(doc.params.is_empty());
    }

    #[test]
    fn code_blocks_pick_language() {
        let doc = parse(
            "/**\n * Brief.\n * @code{.gd}\n * var a = 1\n * @endcode\n * @code{.cs}\n * int a = 1;\n * @endcode\n\
             * @code\n * plain\n * @endcode\n * @verbatim\n * {.gd}\n * @endverbatim\n */",
        );
        let kinds: Vec<_> = doc.detailed.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParagraphKind::Code(CodeLang::GdScript),
                ParagraphKind::Code(CodeLang::CSharp),
                ParagraphKind::VerbatimText,
                ParagraphKind::VerbatimText,
            ]
        );
        assert_eq!(doc.detailed[0].spans, vec![" var a = 1"]);
        assert_eq!(doc.detailed[3].spans, vec![" {.gd}"]);
    }

    #[test]
    fn verbatim_line_is_trimmed() {
        let doc = parse("/// Brief.\n/// @fn   void jump()  ");
        assert_eq!(doc.detailed[0].kind, ParagraphKind::VerbatimText);
        assert_eq!(doc.detailed[0].spans, vec!["void jump()"]);
    }

    #[test]
    fn inline_commands_expand_with_owner() {
        let doc = parse("/// Call @p jump with @a height, see @ref method:Node.ready");
        assert_eq!(
            doc.brief.text(),
            " Call [member Player.jump] with [param height,] see [method Node.ready]"
        );
    }

    #[test]
    fn unknown_command_falls_back_to_detail() {
        let doc = parse("/// Brief.\n/// @details More text.");
        assert_eq!(texts(&doc.detailed), vec!["More text."]);
    }

    #[test]
    fn html_and_nested_blocks() {
        let nodes = vec![Comment::Paragraph(vec![
            Comment::HtmlTag("<b>".into()),
            Comment::Text("Bold".into()),
            Comment::BlockCommand {
                name: "note".into(),
                args: vec![],
                children: vec![Comment::text_paragraph(" inside")],
            },
        ])];
        let doc = Documentation::parse("Player", Some(&nodes));
        assert_eq!(doc.brief.text(), "Bold inside");
    }
}
