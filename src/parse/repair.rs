//! Repair rules for known malformations in model-produced JSON
//!
//! Each rule is a pure `&str -> String` transform targeting one pattern and
//! is a no-op when the pattern is absent. Rules run in a fixed order, and
//! the order is repeated until a pass changes nothing, so repairing
//! already-repaired text returns it unchanged.
//!
//! Trailing commas are only removed outside string literals; `"(a,]"` in a
//! value is left alone. The quote rules work line by line. Valid JSON never
//! has a raw line break inside a string, so a line with an odd number of
//! unescaped quotes marks a string that was cut or left open.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// One or more commas (optionally whitespace-separated) directly before a
/// closing brace or bracket.
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",(?:\s*,)*(\s*[}\]])").expect("trailing comma pattern is valid")
});

/// Two or more consecutive line breaks, with any indentation between them.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r?\n[ \t]*){2,}").expect("blank line pattern is valid")
});

/// A named text transform.
#[derive(Debug, Clone, Copy)]
pub struct RepairRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The rule sequence, in application order.
pub const RULES: &[RepairRule] = &[
    RepairRule {
        name: "trailing_commas",
        apply: strip_trailing_commas,
    },
    RepairRule {
        name: "blank_lines",
        apply: collapse_blank_lines,
    },
    RepairRule {
        name: "broken_strings",
        apply: join_broken_strings,
    },
    RepairRule {
        name: "unterminated_quotes",
        apply: close_unterminated_quotes,
    },
];

/// Repaired text plus the names of the rules that changed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub text: String,
    pub applied: Vec<&'static str>,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Closing a quote can expose a trailing comma that was inside the open
/// string, so the sequence settles in at most three passes.
const MAX_PASSES: usize = 8;

/// Run the rules over `text` in order until a pass changes nothing.
/// `applied` lists each rule that changed the text, in rule order.
pub fn repair(text: &str) -> RepairReport {
    let mut current = text.to_string();
    let mut changed = vec![false; RULES.len()];

    for _ in 0..MAX_PASSES {
        let mut settled = true;
        for (rule, hit) in RULES.iter().zip(changed.iter_mut()) {
            let next = (rule.apply)(&current);
            if next != current {
                *hit = true;
                settled = false;
                current = next;
            }
        }
        if settled {
            break;
        }
    }

    let applied = RULES
        .iter()
        .zip(&changed)
        .filter(|(_, hit)| **hit)
        .map(|(rule, _)| rule.name)
        .collect();

    RepairReport {
        text: current,
        applied,
    }
}

/// `{"a": 1,}` → `{"a": 1}`
pub fn strip_trailing_commas(text: &str) -> String {
    let quoted = quoted_bytes(text);
    TRAILING_COMMA
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            if quoted[start] {
                whole.to_string()
            } else {
                caps[1].to_string()
            }
        })
        .into_owned()
}

/// For each byte of `text`, whether it sits inside a string literal.
/// Only the first byte of each char is marked.
fn quoted_bytes(text: &str) -> Vec<bool> {
    let mut quoted = vec![false; text.len()];
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if !in_string {
            in_string = ch == '"';
            continue;
        }
        quoted[idx] = true;
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_string = false;
        }
    }

    quoted
}

/// Runs of blank lines become a single line break.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").into_owned()
}

/// Join a line whose string value was cut by a bare line break with the
/// following lines, until the quote closes or the line ends in a closer.
pub fn join_broken_strings(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut lines = text.split('\n');

    while let Some(line) = lines.next() {
        let mut current = line.to_string();
        while has_open_quote(&current) && closer_run_start(&current).is_none() {
            match lines.next() {
                Some(next) => {
                    current = format!("{} {}", current.trim_end(), next.trim_start());
                }
                None => break,
            }
        }
        out.push(current);
    }

    out.join("\n")
}

/// `"note": "pending}` → `"note": "pending"}`
pub fn close_unterminated_quotes(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if !has_open_quote(line) {
                return line.to_string();
            }
            match closer_run_start(line) {
                Some(idx) => {
                    // A lone backslash here would escape the inserted quote.
                    let head = &line[..idx];
                    let run = head.len() - head.trim_end_matches('\\').len();
                    let head = if run % 2 == 1 { &head[..idx - 1] } else { head };
                    format!("{}\"{}", head, &line[idx..])
                }
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn has_open_quote(line: &str) -> bool {
    let mut count = 0usize;
    let mut escaped = false;
    for ch in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => count += 1,
            _ => {}
        }
    }
    count % 2 == 1
}

/// Byte index of the first closer in the run of `}`/`]` (interleaved with
/// commas and whitespace) that ends the line.
fn closer_run_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut idx = line.trim_end().len();
    let mut start = None;

    while idx > 0 {
        match bytes[idx - 1] {
            b'}' | b']' => {
                start = Some(idx - 1);
                idx -= 1;
            }
            b',' | b' ' | b'\t' => idx -= 1,
            _ => break,
        }
    }

    start
}
