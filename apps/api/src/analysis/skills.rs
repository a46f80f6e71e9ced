/// Recognized skills, lowercase. Matching is plain substring containment, so
/// short entries also fire inside longer words ("java" in "javascript").
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "golang",
    "rust",
    "scala",
    "sql",
    "html",
    "css",
    // Frameworks and libraries
    "react",
    "angular",
    "vue",
    "node.js",
    "nodejs",
    "express",
    "django",
    "flask",
    "spring",
    "next.js",
    "redux",
    "jquery",
    "bootstrap",
    "tailwind",
    "graphql",
    // Databases
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "sqlite",
    "firebase",
    "elasticsearch",
    "oracle",
    // Cloud and DevOps
    "aws",
    "azure",
    "google cloud",
    "docker",
    "kubernetes",
    "jenkins",
    "terraform",
    "ci/cd",
    "linux",
    "git",
    "nginx",
    "ansible",
    // Collaboration tools
    "jira",
    "figma",
    "postman",
    "webpack",
    "slack",
    "confluence",
    "trello",
    // Data and ML
    "machine learning",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    // Soft skills
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "project management",
    "agile",
    "scrum",
];

/// Returns every vocabulary skill contained in `text`, canonicalized and
/// sorted alphabetically.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut skills: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(**skill))
        .map(|skill| canonicalize(skill))
        .collect();
    skills.sort();
    skills.dedup();
    skills
}

/// Capitalizes the first character only: "aws" becomes "Aws", "node.js" becomes "Node.js".
pub fn canonicalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let mut sorted: Vec<_> = SKILL_VOCABULARY.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), SKILL_VOCABULARY.len());
    }

    #[test]
    fn test_vocabulary_is_lowercase() {
        assert!(SKILL_VOCABULARY.iter().all(|s| s.to_lowercase() == *s));
    }

    #[test]
    fn test_canonicalize_first_letter_only() {
        assert_eq!(canonicalize("aws"), "Aws");
        assert_eq!(canonicalize("google cloud"), "Google cloud");
        assert_eq!(canonicalize("c++"), "C++");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_case_insensitive_match() {
        let skills = extract_skills("Skills: PYTHON, React, AWS");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"React".to_string()));
        assert!(skills.contains(&"Aws".to_string()));
    }

    #[test]
    fn test_substring_matches_without_word_boundaries() {
        let skills = extract_skills("JavaScript");
        assert_eq!(skills, vec!["Java".to_string(), "Javascript".to_string()]);
    }

    #[test]
    fn test_output_sorted_and_within_vocabulary() {
        let skills = extract_skills("docker kubernetes agile rust python Docker again");
        let mut sorted = skills.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(skills, sorted);
        let canonical: Vec<String> = SKILL_VOCABULARY.iter().map(|s| canonicalize(s)).collect();
        assert!(skills.iter().all(|s| canonical.contains(s)));
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(extract_skills("").is_empty());
    }
}
