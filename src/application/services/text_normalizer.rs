use regex::Regex;
use std::sync::LazyLock;

/// A lone letter followed by a lone lowercase letter: `A n` -> `An`.
static LETTER_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\b[A-Za-z])\s+([a-z]\b)").unwrap());

/// A two-letter stem followed by a lowercase tail: `Inv oice` -> `Invoice`.
static WORD_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\b[A-Za-z]{2})\s+([a-z]+\b)").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Splits seen in invoice PDFs that the generic heuristics miss.
const KNOWN_SPLITS: &[(&str, &str)] = &[
    ("T ax", "Tax"),
    ("Inv oice", "Invoice"),
    ("Cust omer", "Customer"),
    ("Addr ess", "Address"),
    ("Ser vice", "Service"),
    ("Categor y", "Category"),
    ("Driv er", "Driver"),
    ("T rip", "Trip"),
    ("La y out", "Layout"),
    ("Char ges", "Charges"),
    ("Conv enience", "Convenience"),
    ("Descri ption", "Description"),
];

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Repairs words broken apart by PDF text extraction and flattens whitespace.
///
/// The repairs are heuristic and can glue genuinely separate short words.
/// Every repair removes whitespace, so the pass is repeated until nothing
/// changes, which makes the function idempotent.
pub fn normalize_invoice_text(text: &str) -> String {
    let mut current = repair_pass(text);
    for _ in 0..current.len() {
        let next = repair_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn repair_pass(text: &str) -> String {
    let text = LETTER_FRAGMENT.replace_all(text, "${1}${2}");
    let mut text = WORD_FRAGMENT.replace_all(&text, "${1}${2}").into_owned();

    for (broken, fixed) in KNOWN_SPLITS {
        if text.contains(broken) {
            text = text.replace(broken, fixed);
        }
    }

    collapse_whitespace(&text)
}

/// Rebuilds a person's name from letter-by-letter fragments.
///
/// Each capitalised token opens a name part that absorbs the lowercase
/// tokens after it. Only first and last name are kept, so
/// `"A njane y a K"` becomes `"Anjaneya K"`.
pub fn reconstruct_name(broken_name: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for token in broken_name.split_whitespace() {
        if starts_uppercase(token) {
            parts.push(token.to_string());
        } else if let Some(current) = parts.last_mut() {
            current.push_str(token);
        }
    }

    parts.truncate(2);
    parts.join(" ")
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}
