//! Best-guess language detection from raw text.
//!
//! Detection first asks syntect to recognise the first line (shebangs,
//! `<?xml`, `<?php`, editor modelines) and then falls back to a small table
//! of content patterns. Anything unrecognised is plain text.

use super::Language;
use crate::highlight::syntax_set;
use regex::Regex;
use std::sync::OnceLock;

/// Patterns are checked in order; the first match wins.
const PATTERNS: &[(&str, &str)] = &[
    ("json", r#"^\s*[\{\[]\s*("[^"]*"\s*:|[\{\[\]"0-9-]|true|false|null)"#),
    ("html", r"(?i)<!doctype html|<html[\s>]|<(div|span|body|head|p|a)[\s>]"),
    ("xml", r"^\s*<[A-Za-z_][\w:.-]*(\s+[\w:.-]+=\S+)*\s*/?>"),
    ("rust", r"(?m)^\s*(pub\s+)?(fn|impl|struct|enum|trait|mod|use)\s+\w|let\s+mut\s+\w|::<"),
    ("go", r"(?m)^package\s+\w+|^func\s+(\(\w+\s+\*?\w+\)\s*)?\w+\(|:=\s"),
    ("python", r"(?m)^\s*(def|class)\s+\w+.*:\s*$|^\s*(import\s+\w+|from\s+[\w.]+\s+import)\b"),
    ("java", r"(?m)^\s*(public|private|protected)\s+(static\s+)?(final\s+)?(class|interface|void|[A-Z]\w*)\s"),
    ("csharp", r"(?m)^\s*using\s+System|^\s*namespace\s+[\w.]+\s*[{;]?$"),
    ("cpp", r"(?m)#include\s*<(iostream|vector|string|memory|map)>|std::\w+|^\s*template\s*<"),
    ("c", r"(?m)^\s*#include\s*[<\x22]|\bint\s+main\s*\("),
    ("php", r"<\?php"),
    ("typescript", r"(?m)^\s*(interface|type)\s+\w+\s*[={<]|:\s*(string|number|boolean)\b"),
    ("javascript", r"(?m)\b(function\s*\w*\s*\(|const\s+\w+\s*=|let\s+\w+\s*=|=>|console\.log|require\()"),
    ("ruby", r"(?m)^\s*(def\s+\w+[?!]?\s*$|end\s*$|require\s+'|puts\s)"),
    ("sql", r"(?i)^\s*(select\s.+\sfrom|insert\s+into|update\s+\w+\s+set|create\s+table|delete\s+from)\b"),
    ("css", r"(?m)^\s*[.#]?[\w-]+(\s*[,>+~]?\s*[.#]?[\w-]+)*\s*\{\s*$|^\s*[\w-]+\s*:\s*[^;]+;\s*$"),
    ("yaml", r"(?m)^---\s*$|^[\w-]+:\s+\S|^\s*-\s+[\w-]+:\s"),
    ("markdown", r"(?m)^#{1,6}\s+\S|^\s*[-*]\s+\[[ x]\]|^```"),
    ("bash", r"(?m)^\s*(export\s+\w+=|echo\s|if\s+\[|fi\s*$|\$\{?\w+\}?)"),
];

fn patterns() -> &'static [(&'static Language, Regex)] {
    static COMPILED: OnceLock<Vec<(&'static Language, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .filter_map(|(id, pattern)| {
                let language = Language::from_id(id)?;
                match Regex::new(pattern) {
                    Ok(re) => Some((language, re)),
                    Err(e) => {
                        tracing::warn!(language = id, error = %e, "Skipping invalid detection pattern");
                        None
                    }
                }
            })
            .collect()
    })
}

fn detect_first_line(text: &str) -> Option<&'static Language> {
    let first_line = text.lines().find(|l| !l.trim().is_empty())?;
    let syntax = syntax_set().find_syntax_by_first_line(first_line)?;
    syntax
        .file_extensions
        .iter()
        .find_map(|ext| Language::from_extension(ext))
}

/// Returns the most likely catalog language for `text`.
#[must_use]
pub fn detect(text: &str) -> &'static Language {
    if text.trim().is_empty() {
        return Language::PLAIN_TEXT;
    }

    if let Some(language) = detect_first_line(text) {
        return language;
    }

    patterns()
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map_or(Language::PLAIN_TEXT, |(language, _)| language)
}
