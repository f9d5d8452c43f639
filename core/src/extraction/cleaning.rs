use regex::Regex;
use std::sync::OnceLock;

/// Boilerplate title at the top of every MIMIC-CXR free-text report
pub const REPORT_TITLE: &str = "FINAL REPORT";

fn whitespace_run_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s{2,}").expect("Failed to compile regex"))
}

fn bullet_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(^|\s)\d\.\s+").expect("Failed to compile regex"))
}

/// Removes embedded line breaks (`\n` and `\r`) without inserting anything
pub fn strip_newlines(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}

/// Collapses every run of two or more whitespace characters into one space
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run_regex().replace_all(text, " ").into_owned()
}

/// Cleans findings text
///
/// Trims, removes newlines, then collapses whitespace runs.
///
/// # Example
///
/// ```
/// use radsum_core::extraction::clean_findings;
///
/// assert_eq!(
///     clean_findings("\n PA and lateral views.\n   Lungs are\n clear.  "),
///     "PA and lateral views. Lungs are clear."
/// );
/// ```
pub fn clean_findings(text: &str) -> String {
    let text = strip_newlines(text.trim());
    collapse_whitespace(&text).trim().to_string()
}

/// Cleans impression text
///
/// Same as [`clean_findings`], plus removal of bullet numbering ("1. ")
/// at the start of the text and after whitespace.
///
/// # Example
///
/// ```
/// use radsum_core::extraction::clean_impression;
///
/// assert_eq!(
///     clean_impression("1. No effusion.  2. Stable cardiomegaly."),
///     "No effusion. Stable cardiomegaly."
/// );
/// ```
pub fn clean_impression(text: &str) -> String {
    until_stable(text, |text| {
        let text = clean_findings(text);
        let text = bullet_regex().replace_all(&text, "${1}");
        clean_findings(&text)
    })
}

/// Cleans background text (the report prefix before the findings)
///
/// 1. Trim and drop the leading "FINAL REPORT" title
/// 2. If the text ends with a colon, cut back to the last whitespace
///    (the dangling section header), or drop the colon if there is none
/// 3. Collapse whitespace runs and remove newlines
///
/// # Example
///
/// ```
/// use radsum_core::extraction::clean_background;
///
/// assert_eq!(clean_background("FINAL REPORT\n EXAMINATION:"), "EXAMINATION");
/// assert_eq!(
///     clean_background("FINAL REPORT\n INDICATION: Cough.\n \n FINDINGS:"),
///     "INDICATION: Cough."
/// );
/// ```
pub fn clean_background(text: &str) -> String {
    until_stable(text, |text| {
        let mut text = text.trim();
        if let Some(rest) = text.strip_prefix(REPORT_TITLE) {
            text = rest.trim_start();
        }

        let mut text = text.to_string();
        if text.ends_with(':') {
            match text.rfind(char::is_whitespace) {
                Some(idx) => text.truncate(idx),
                None => {
                    text.pop();
                }
            }
        }

        let text = strip_newlines(&collapse_whitespace(text.trim()));
        text.trim().to_string()
    })
}

/// Applies a shortening pass until the text stops changing
fn until_stable(text: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(text);
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
