// Cleanup for article text pulled straight out of the CSV corpora, used when
// extracting human-readable sample articles. This is display cleanup, not
// model preprocessing: case, digits and punctuation are kept.

use std::sync::OnceLock;

use regex_lite::Regex;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// C0 and C1 control characters plus DEL.
fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1f | 0x7f..=0x9f)
}

/// Trim surrounding double quotes, collapse whitespace runs to one space,
/// drop control characters, then trim. `None` gives an empty string.
pub fn clean_csv_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let unquoted = text.trim_matches('"');
    let collapsed = whitespace_run().replace_all(unquoted, " ");
    let printable: String = collapsed.chars().filter(|&c| !is_control(c)).collect();
    printable.trim().to_string()
}
