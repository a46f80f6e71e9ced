use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{Section, SectionFlags};

/// Heading synonyms per section.
const SECTION_SYNONYMS: &[(Section, &[&str])] = &[
    (
        Section::Summary,
        &["summary", "professional summary", "profile", "objective", "about me"],
    ),
    (
        Section::Experience,
        &[
            "experience",
            "work experience",
            "employment",
            "professional experience",
            "work history",
        ],
    ),
    (
        Section::Education,
        &["education", "academic background", "qualifications", "degree"],
    ),
    (
        Section::Skills,
        &["skills", "technical skills", "core competencies", "expertise"],
    ),
    (
        Section::Projects,
        &["projects", "personal projects", "side projects", "portfolio"],
    ),
    (
        Section::Certifications,
        &["certifications", "certification", "certificates", "licenses"],
    ),
    (
        Section::Awards,
        &["awards", "honors", "achievements", "accomplishments"],
    ),
    (
        Section::Languages,
        &["languages", "language proficiency", "spoken languages"],
    ),
    (
        Section::References,
        &["references", "referees", "available upon request"],
    ),
];

/// One case-insensitive whole-word alternation per section.
static SECTION_PATTERNS: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    SECTION_SYNONYMS
        .iter()
        .map(|(section, synonyms)| {
            let alternation = synonyms
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap();
            (*section, re)
        })
        .collect()
});

/// Flags a section as present when any of its synonyms appears anywhere in the
/// text, regardless of position or surrounding context.
pub fn detect_sections(text: &str) -> SectionFlags {
    let mut flags = SectionFlags::default();
    for (section, re) in SECTION_PATTERNS.iter() {
        flags.set(*section, re.is_match(text));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_synonyms() {
        for section in Section::ALL {
            let entry = SECTION_SYNONYMS.iter().find(|(s, _)| *s == section);
            let (_, synonyms) = entry.expect("section missing from synonym table");
            assert!((3..=5).contains(&synonyms.len()), "{section:?}");
        }
    }

    #[test]
    fn test_headings_detected_case_insensitively() {
        let flags = detect_sections("WORK HISTORY\nAcme Corp\n\nEducation\nBS CS");
        assert!(flags.experience);
        assert!(flags.education);
        assert!(!flags.summary);
    }

    #[test]
    fn test_whole_word_matching() {
        // "skillset" and "awardsy" are not whole-word matches.
        let flags = detect_sections("my skillset and awardsy things");
        assert!(!flags.skills);
        assert!(!flags.awards);
    }

    #[test]
    fn test_synonym_anywhere_counts() {
        let flags = detect_sections("I have experience with many tools.");
        assert!(flags.experience);
    }

    #[test]
    fn test_multi_word_synonyms() {
        let flags = detect_sections("References available upon request. Core Competencies");
        assert!(flags.references);
        assert!(flags.skills);
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert_eq!(detect_sections(""), SectionFlags::default());
    }
}
