//! Inline command expansion into Godot BBCode fragments.
//!
//! Supported commands:
//!
//! - `a word`: argument reference, `[param word]`
//! - `b word`: bold
//! - `c word`: inline code
//! - `e word` / `em word`: italic
//! - `n`: line break
//! - `p word`: member of the current class
//! - `ref kind:target`: cross reference, see [`resolve_reference`]
//!
//! Any other command contributes its argument text unchanged.

/// Reference kinds that resolve against the owning class when unqualified.
const MEMBER_KINDS: &[&str] = &[
    "annotation",
    "constant",
    "enum",
    "member",
    "method",
    "constructor",
    "signal",
    "theme_item",
];

/// Expand an inline command into markup. `owner` is the class the comment
/// belongs to.
pub fn expand_inline(name: &str, args: &[String], owner: &str) -> String {
    let arg = args.first().map(String::as_str).unwrap_or("");
    let mut out = match name {
        "a" => format!("[param {}]", arg),
        "b" => format!("[b]{}[/b]", arg),
        "c" => format!("[code]{}[/code]", arg),
        "e" | "em" => format!("[i]{}[/i]", arg),
        "n" => "[br]".to_string(),
        "p" => format!("[member {}.{}]", owner, arg),
        "ref" => resolve_reference(arg, owner),
        _ => arg.to_string(),
    };
    for extra in args.iter().skip(1) {
        out.push(' ');
        out.push_str(extra);
    }
    out
}

/// Resolve a `kind:target` reference token.
///
/// - `operator:Vector2.+` → `[operator Vector2.operator +]`
/// - `operator:+` → `[operator <owner>.operator +]`
/// - `method:Node.ready` → `[method Node.ready]`
/// - `method:jump` → `[method <owner>.jump]`
/// - anything else → `[token]`
pub fn resolve_reference(token: &str, owner: &str) -> String {
    if let Some((kind, rest)) = token.split_once(':') {
        if kind == "operator" {
            return match rest.find('.') {
                Some(dot) => format!("[operator {}operator {}]", &rest[..=dot], &rest[dot + 1..]),
                None => format!("[operator {}.operator {}]", owner, rest),
            };
        }
        if MEMBER_KINDS.contains(&kind) {
            return if rest.contains('.') {
                format!("[{} {}]", kind, rest)
            } else {
                format!("[{} {}.{}]", kind, owner, rest)
            };
        }
    }
    format!("[{}]", token)
}
