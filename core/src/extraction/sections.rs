use regex::Regex;
use std::sync::OnceLock;

/// Name of the text preceding the first section header
pub const PREAMBLE: &str = "preamble";
/// Name of the single section of a report without any header
pub const FULL_REPORT: &str = "full report";
/// Name of the section split off the end of a report without findings/impression
pub const LAST_PARAGRAPH: &str = "last_paragraph";
pub const FINDINGS: &str = "findings";
pub const IMPRESSION: &str = "impression";

/// Blank-line separator used in MIMIC-CXR free text
const PARAGRAPH_SEPARATOR: &str = "\n \n";

// Frequent header spellings and their canonical names
const FREQUENT_SECTIONS: &[(&str, &str)] = &[
    ("preamble", "preamble"),
    ("impression", "impression"),
    ("comparison", "comparison"),
    ("indication", "indication"),
    ("findings", "findings"),
    ("examination", "examination"),
    ("technique", "technique"),
    ("history", "history"),
    ("comparisons", "comparison"),
    ("clinical history", "history"),
    ("reason for examination", "indication"),
    ("notification", "notification"),
    ("reason for exam", "indication"),
    ("clinical information", "history"),
    ("exam", "examination"),
    ("clinical indication", "indication"),
    ("conclusion", "impression"),
    ("chest, two views", "findings"),
    ("recommendation(s)", "recommendations"),
    ("type of examination", "examination"),
    ("reference exam", "comparison"),
    ("patient history", "history"),
    ("addendum", "addendum"),
    ("comparison exam", "comparison"),
    ("date", "date"),
    ("comment", "comment"),
    ("findings and impression", "impression"),
    ("wet read", "wet read"),
    ("comparison film", "comparison"),
    ("recommendations", "recommendations"),
    ("findings/impression", "impression"),
    ("pfi", "history"),
    ("recommendation", "recommendations"),
    ("wetread", "wet read"),
    ("ndication", "impression"),
    ("impresson", "impression"),
    ("imprression", "impression"),
    ("imoression", "impression"),
    ("impressoin", "impression"),
    ("imprssion", "impression"),
    ("impresion", "impression"),
    ("imperssion", "impression"),
    ("mpression", "impression"),
    ("impession", "impression"),
    ("findings/ impression", "impression"),
    ("finding", "findings"),
    ("findins", "findings"),
    ("findindgs", "findings"),
    ("findgings", "findings"),
    ("findngs", "findings"),
    ("findnings", "findings"),
    ("finidngs", "findings"),
    ("idication", "indication"),
    ("reference findings", "findings"),
    ("comparision", "comparison"),
    ("comparsion", "comparison"),
    ("comparrison", "comparison"),
    ("comparisions", "comparison"),
];

// Any header containing one of these is that section
const MAIN_SECTIONS: &[&str] = &["impression", "findings", "history", "comparison", "addendum"];

// Headers describing the study views introduce the findings
const FINDINGS_PATTERNS: &[&str] = &[
    "chest",
    "portable",
    "pa and lateral",
    "lateral and pa",
    "ap and lateral",
    "lateral and ap",
    "frontal and",
    "two views",
    "frontal view",
    "pa view",
    "ap view",
    "one view",
    "lateral view",
    "bone window",
    "frontal upright",
    "frontal semi-upright",
    "ribs",
    "pa and lat",
];

/// A named section of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Normalized section name (e.g. "findings")
    pub name: String,

    /// Section text, without its header
    pub body: String,

    /// Byte offset of `body` in the report text
    pub start: usize,
}

impl Section {
    /// Creates a new Section
    pub fn new(name: impl Into<String>, body: impl Into<String>, start: usize) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            start,
        }
    }
}

/// Splits report text into named sections
///
/// Implementations return sections in text order. Closures of type
/// `Fn(&str) -> Vec<Section>` implement this trait, so a fixed
/// segmentation can be injected in place of a real parser.
pub trait SectionParser {
    fn section_text(&self, text: &str) -> Vec<Section>;
}

impl<F> SectionParser for F
where
    F: Fn(&str) -> Vec<Section>,
{
    fn section_text(&self, text: &str) -> Vec<Section> {
        self(text)
    }
}

/// Finds the first section with the given name
pub fn find_section<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections.iter().find(|section| section.name == name)
}

/// Section parser for MIMIC-CXR free-text reports
///
/// Headers are upper-case labels on their own indented line followed by a
/// colon, e.g. `"\n FINDINGS: ..."`.
///
/// # Example
///
/// ```
/// use radsum_core::extraction::{find_section, MimicSectionParser, SectionParser};
///
/// let text = "FINAL REPORT\n INDICATION: Cough.\n \n FINDINGS: Lungs are clear.\n \n IMPRESSION: Normal.";
/// let sections = MimicSectionParser.section_text(text);
///
/// let findings = find_section(&sections, "findings").unwrap();
/// assert_eq!(findings.body, "Lungs are clear.\n ");
/// assert_eq!(&text[findings.start..findings.start + 16], "Lungs are clear.");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MimicSectionParser;

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\n ([A-Z ()/,-]+):\s").expect("Failed to compile regex"))
}

impl SectionParser for MimicSectionParser {
    fn section_text(&self, text: &str) -> Vec<Section> {
        let headers: Vec<_> = header_regex()
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?)))
            .collect();

        let mut sections = Vec::with_capacity(headers.len() + 1);
        match headers.first() {
            None => sections.push(Section::new(FULL_REPORT, text, 0)),
            Some((_, first_name)) => {
                sections.push(Section::new(PREAMBLE, &text[..first_name.start()], 0));
                for (i, (header, name)) in headers.iter().enumerate() {
                    let end = headers
                        .get(i + 1)
                        .map(|(next, _)| next.start())
                        .unwrap_or(text.len());
                    sections.push(Section::new(
                        normalize_section_name(name.as_str()),
                        &text[header.end()..end],
                        header.end(),
                    ));
                }
            }
        }

        // Blank findings/impression carry nothing to summarize
        sections.retain(|s| !(is_key_section(&s.name) && s.body.trim().is_empty()));

        if !sections.iter().any(|s| is_key_section(&s.name)) {
            split_last_paragraph(&mut sections);
        }

        sections
    }
}

fn is_key_section(name: &str) -> bool {
    name == FINDINGS || name == IMPRESSION
}

/// Moves the text after the first blank line of the last section into
/// a new `last_paragraph` section
fn split_last_paragraph(sections: &mut Vec<Section>) {
    let Some(last) = sections.last_mut() else {
        return;
    };
    let Some(idx) = last.body.find(PARAGRAPH_SEPARATOR) else {
        return;
    };

    let tail_offset = idx + PARAGRAPH_SEPARATOR.len();
    let tail = Section::new(
        LAST_PARAGRAPH,
        &last.body[tail_offset..],
        last.start + tail_offset,
    );
    last.body.truncate(idx);
    sections.push(tail);
}

/// Maps a raw section header to its canonical name
///
/// Lower-cases the header, then tries in order: the table of frequent
/// spellings, containment of a main section name, and view descriptions
/// that stand for findings. Anything else is kept as is.
pub fn normalize_section_name(name: &str) -> String {
    let name = name.trim().to_lowercase();

    if let Some((_, canonical)) = FREQUENT_SECTIONS.iter().find(|(raw, _)| *raw == name) {
        return canonical.to_string();
    }

    if let Some(main) = MAIN_SECTIONS.iter().find(|main| name.contains(*main)) {
        return main.to_string();
    }

    if FINDINGS_PATTERNS.iter().any(|pattern| name.contains(pattern)) {
        return FINDINGS.to_string();
    }

    name
}
