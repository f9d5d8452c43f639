pub mod cleaning;
pub mod sections;

pub use cleaning::{
    clean_background, clean_findings, clean_impression, collapse_whitespace, strip_newlines,
};
pub use sections::{
    find_section, normalize_section_name, MimicSectionParser, Section, SectionParser,
};
