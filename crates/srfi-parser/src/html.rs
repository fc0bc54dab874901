//! HTML strategy: every inline `<code>` span shaped like a call form.
//!
//! Parsed with tree-sitter HTML through ast-grep, so unclosed and misnested
//! tags in old documents still produce a tree. Tag names compare
//! case-insensitively.

use ast_grep_core::{Doc, Node};
use ast_grep_language::{LanguageExt, SupportLang};

use crate::extract::{Scan, TokenExtractor, call_head};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCodeSpans;

impl TokenExtractor for HtmlCodeSpans {
    fn name(&self) -> &'static str {
        "html-code-spans"
    }

    fn scan(&self, source: &str) -> Scan {
        let tree = SupportLang::Html.ast_grep(source);
        let mut scan = Scan::default();
        collect(&tree.root(), source, &mut scan);
        scan
    }
}

fn collect<D: Doc>(node: &Node<D>, source: &str, scan: &mut Scan) {
    if node.kind().as_ref() == "element" {
        match tag_name(node).as_deref() {
            Some("title") if scan.title.is_none() => {
                scan.title = Some(inner_text(node, source));
            }
            Some("code") => {
                if let Some(head) = call_head(&inner_text(node, source)) {
                    scan.tokens.push(head.to_string());
                }
            }
            _ => {}
        }
    }

    let children: Vec<_> = node.children().collect();
    for child in &children {
        collect(child, source, scan);
    }
}

/// Lowercased tag name from an element's `start_tag`.
fn tag_name<D: Doc>(node: &Node<D>) -> Option<String> {
    let start = node
        .children()
        .find(|c| matches!(c.kind().as_ref(), "start_tag" | "self_closing_tag"))?;
    let name = start.children().find(|c| c.kind().as_ref() == "tag_name")?;
    Some(name.text().to_ascii_lowercase())
}

/// Text content of an element with markup removed and entities decoded.
///
/// Text nodes do not carry the whitespace around them, so the whitespace
/// between consecutive children is copied back from the source.
fn inner_text<D: Doc>(node: &Node<D>, source: &str) -> String {
    let mut out = String::new();
    push_text(node, source, &mut out);
    out
}

fn push_text<D: Doc>(node: &Node<D>, source: &str, out: &mut String) {
    let mut cursor: Option<usize> = None;
    for child in node.children() {
        let range = child.range();
        if let Some(gap) = cursor.and_then(|from| source.get(from..range.start))
            && gap.chars().all(char::is_whitespace)
        {
            out.push_str(gap);
        }
        match child.kind().as_ref() {
            "start_tag" | "end_tag" | "self_closing_tag" | "comment" => {}
            "text" | "entity" => out.push_str(&decode_entities(&child.text())),
            _ if child.is_named() => push_text(&child, source, out),
            _ => {}
        }
        cursor = Some(range.end);
    }
}

/// Replace every character reference in `text`.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let end = candidate
            .char_indices()
            .take(32)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i + 1);
        match end {
            Some(end) => {
                out.push_str(&decode_entity(&candidate[..end]));
                rest = &candidate[end..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one character reference. Unknown references are kept verbatim.
fn decode_entity(entity: &str) -> String {
    let body = entity
        .strip_prefix('&')
        .map_or(entity, |rest| rest.strip_suffix(';').unwrap_or(rest));

    let numeric = body.strip_prefix('#').and_then(|digits| {
        match digits.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => digits.parse::<u32>().ok(),
        }
        .and_then(char::from_u32)
    });
    if let Some(c) = numeric {
        return c.to_string();
    }

    let named = match body {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "hellip" => '\u{2026}',
        "middot" => '\u{b7}',
        "bull" => '\u{2022}',
        "larr" => '\u{2190}',
        "uarr" => '\u{2191}',
        "rarr" => '\u{2192}',
        "darr" => '\u{2193}',
        "harr" => '\u{2194}',
        "lArr" => '\u{21d0}',
        "rArr" => '\u{21d2}',
        "hArr" => '\u{21d4}',
        "le" => '\u{2264}',
        "ge" => '\u{2265}',
        "ne" => '\u{2260}',
        "times" => '\u{d7}',
        "divide" => '\u{f7}',
        "plusmn" => '\u{b1}',
        "deg" => '\u{b0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "lambda" => '\u{3bb}',
        "eacute" => '\u{e9}',
        "egrave" => '\u{e8}',
        "auml" => '\u{e4}',
        "ouml" => '\u{f6}',
        "uuml" => '\u{fc}',
        "szlig" => '\u{df}',
        _ => return entity.to_string(),
    };
    named.to_string()
}
