//! Contact extraction: name, email, phone and profile links from raw resume text.
//!
//! Every extractor is total: no match yields `None`, never an error.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::models::ContactInfo;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Tried in order; the first pattern with any match wins.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b\d{3}[-. ]?\d{3}[-. ]?\d{4}\b").unwrap(),
        Regex::new(r"\(\d{3}\) ?\d{3}[-. ]?\d{4}").unwrap(),
        Regex::new(r"\b\d{10}\b").unwrap(),
    ]
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+").unwrap()
});

static GITHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_-]+").unwrap());

static PORTFOLIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9-]+)*\.(?:com|io|dev|me|net|org|app|co|tech|site|xyz|ai|page|info)\b(?:/[^\s]*)?",
    )
    .unwrap()
});

const MAX_NAME_CHARS: usize = 50;

/// Rule used to accept the first line of a resume as the candidate's name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Fewer than 50 chars, letters and whitespace only, 2 to 4 words.
    #[default]
    Strict,
    /// At most 50 chars, letters and whitespace only.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown name policy '{0}'")]
pub struct UnknownNamePolicy(pub String);

impl FromStr for NamePolicy {
    type Err = UnknownNamePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(NamePolicy::Strict),
            "lenient" => Ok(NamePolicy::Lenient),
            other => Err(UnknownNamePolicy(other.to_string())),
        }
    }
}

impl NamePolicy {
    pub fn accepts(&self, line: &str) -> bool {
        let len = line.chars().count();
        let letters_only = line
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace());
        if !letters_only {
            return false;
        }
        match self {
            NamePolicy::Strict => {
                let words = line.split_whitespace().count();
                len < MAX_NAME_CHARS && (2..=4).contains(&words)
            }
            NamePolicy::Lenient => len <= MAX_NAME_CHARS,
        }
    }
}

pub fn extract_contact_info(text: &str, policy: NamePolicy) -> ContactInfo {
    ContactInfo {
        name: extract_name(text, policy),
        email: extract_email(text),
        phone: extract_phone(text),
        linkedin: extract_linkedin(text),
        github: extract_github(text),
        portfolio: extract_portfolio(text),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

pub fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_github(text: &str) -> Option<String> {
    GITHUB_RE.find(text).map(|m| m.as_str().to_string())
}

/// First domain-like URL that is neither a LinkedIn/GitHub profile nor the
/// domain half of an email address.
pub fn extract_portfolio(text: &str) -> Option<String> {
    PORTFOLIO_RE
        .find_iter(text)
        .filter(|m| !text[..m.start()].ends_with('@') && !text[m.end()..].starts_with('@'))
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', ')']))
        .find(|url| {
            let lower = url.to_lowercase();
            !lower.contains("linkedin") && !lower.contains("github") && looks_like_link(url)
        })
        .map(|url| {
            let lower = url.to_ascii_lowercase();
            if lower.starts_with("http://") || lower.starts_with("https://") {
                url.to_string()
            } else {
                format!("https://{url}")
            }
        })
}

/// Bare capitalised hosts ("ASP.NET", "Socket.io") are technology names, not
/// links. A scheme, a `www.` prefix or a path keeps the match.
fn looks_like_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || url.contains('/')
    {
        return true;
    }
    !url.chars().any(|c| c.is_ascii_uppercase())
}

/// The first non-empty line, if the policy accepts it as a name.
pub fn extract_name(text: &str, policy: NamePolicy) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    policy.accepts(line).then(|| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_first_match_wins() {
        assert_eq!(
            extract_email("a: first@example.com b: second@example.org"),
            Some("first@example.com".to_string())
        );
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_phone_dashed() {
        assert_eq!(
            extract_phone("Call 555-123-4567 today"),
            Some("555-123-4567".to_string())
        );
    }

    #[test]
    fn test_phone_dotted_and_spaced() {
        assert_eq!(extract_phone("555.123.4567"), Some("555.123.4567".to_string()));
        assert_eq!(extract_phone("555 123 4567"), Some("555 123 4567".to_string()));
    }

    #[test]
    fn test_phone_parenthesized_area_code() {
        assert_eq!(
            extract_phone("Tel: (555) 123-4567"),
            Some("(555) 123-4567".to_string())
        );
    }

    #[test]
    fn test_phone_bare_digits() {
        assert_eq!(extract_phone("5551234567"), Some("5551234567".to_string()));
    }

    #[test]
    fn test_phone_earlier_pattern_takes_precedence() {
        // The dashed pattern matches the second number, so the parenthesized
        // first number is never considered.
        assert_eq!(
            extract_phone("(111) 222-3333 or 444-555-6666"),
            Some("444-555-6666".to_string())
        );
    }

    #[test]
    fn test_phone_absent() {
        assert_eq!(extract_phone("12345"), None);
    }

    #[test]
    fn test_linkedin_and_github_are_case_insensitive() {
        let text = "LinkedIn.com/in/JohnSmith | GITHUB.com/jsmith";
        assert_eq!(
            extract_linkedin(text),
            Some("LinkedIn.com/in/JohnSmith".to_string())
        );
        assert_eq!(extract_github(text), Some("GITHUB.com/jsmith".to_string()));
    }

    #[test]
    fn test_links_keep_scheme_when_present() {
        assert_eq!(
            extract_linkedin("https://www.linkedin.com/in/jane-doe"),
            Some("https://www.linkedin.com/in/jane-doe".to_string())
        );
        assert_eq!(
            extract_github("see https://github.com/jane_doe for code"),
            Some("https://github.com/jane_doe".to_string())
        );
    }

    #[test]
    fn test_portfolio_skips_profile_links_and_email_domains() {
        let text = "john@example.com\nlinkedin.com/in/johnsmith\ngithub.com/johnsmith";
        assert_eq!(extract_portfolio(text), None);
    }

    #[test]
    fn test_portfolio_adds_scheme() {
        let text = "john@example.com\ngithub.com/johnsmith\nPortfolio: johnsmith.dev/work.";
        assert_eq!(
            extract_portfolio(text),
            Some("https://johnsmith.dev/work".to_string())
        );
    }

    #[test]
    fn test_portfolio_keeps_existing_scheme() {
        assert_eq!(
            extract_portfolio("http://www.janedoe.io"),
            Some("http://www.janedoe.io".to_string())
        );
    }

    #[test]
    fn test_portfolio_ignores_capitalised_technology_names() {
        assert_eq!(extract_portfolio("Skills: C#, ASP.NET Core, Socket.io"), None);
        assert_eq!(
            extract_portfolio("ASP.NET, Socket.io | janedoe.io"),
            Some("https://janedoe.io".to_string())
        );
        assert_eq!(
            extract_portfolio("www.JaneDoe.net"),
            Some("https://www.JaneDoe.net".to_string())
        );
    }

    #[test]
    fn test_strict_name_policy() {
        let p = NamePolicy::Strict;
        assert_eq!(
            extract_name("\n  John Smith  \nEngineer", p),
            Some("John Smith".to_string())
        );
        assert_eq!(extract_name("Cher", p), None);
        assert_eq!(extract_name("One Two Three Four Five", p), None);
        assert_eq!(extract_name("John Smith 3rd", p), None);
        assert_eq!(extract_name("john@example.com", p), None);
    }

    #[test]
    fn test_strict_name_length_limit_is_exclusive() {
        let forty_nine = format!("{} {}", "A".repeat(24), "B".repeat(24));
        let fifty = format!("{} {}", "A".repeat(25), "B".repeat(24));
        assert!(NamePolicy::Strict.accepts(&forty_nine));
        assert!(!NamePolicy::Strict.accepts(&fifty));
        assert!(NamePolicy::Lenient.accepts(&fifty));
    }

    #[test]
    fn test_lenient_name_policy_accepts_single_word() {
        assert_eq!(
            extract_name("Cher", NamePolicy::Lenient),
            Some("Cher".to_string())
        );
        assert_eq!(extract_name("R2 D2", NamePolicy::Lenient), None);
    }

    #[test]
    fn test_name_policy_from_str() {
        assert_eq!("STRICT".parse::<NamePolicy>(), Ok(NamePolicy::Strict));
        assert_eq!(" lenient ".parse::<NamePolicy>(), Ok(NamePolicy::Lenient));
        assert_eq!(
            "fuzzy".parse::<NamePolicy>(),
            Err(UnknownNamePolicy("fuzzy".to_string()))
        );
    }

    #[test]
    fn test_empty_text_yields_empty_contact() {
        assert_eq!(
            extract_contact_info("", NamePolicy::Strict),
            ContactInfo::default()
        );
    }
}
