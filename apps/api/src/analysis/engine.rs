//! Resume quality pipeline: text → {contact, skills, sections} → score → recommendations.
//!
//! Pure and synchronous. Persistence lives in `service`.

use crate::analysis::contact::{extract_contact_info, NamePolicy};
use crate::analysis::models::ResumeAnalysis;
use crate::analysis::quality::compute_quality_score;
use crate::analysis::recommendations::generate_recommendations;
use crate::analysis::sections::detect_sections;
use crate::analysis::skills::extract_skills;

pub fn analyze_text(text: &str, name_policy: NamePolicy) -> ResumeAnalysis {
    let contact_info = extract_contact_info(text, name_policy);
    let skill_set = extract_skills(text);
    let section_flags = detect_sections(text);
    let quality_score = compute_quality_score(text, &contact_info, &section_flags, &skill_set);
    let recommendations = generate_recommendations(
        &contact_info,
        &section_flags,
        &skill_set,
        quality_score.overall,
    );

    ResumeAnalysis {
        contact_info,
        section_flags,
        skill_set,
        quality_score,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::recommendations::*;
    use crate::analysis::skills::{canonicalize, SKILL_VOCABULARY};

    const SAMPLE: &str = "John Smith\njohn@example.com\n555-123-4567\nExperience: Built systems.\nEducation: BS CS.\nSkills: Python, React, AWS, Docker, Git";

    fn complete_resume() -> String {
        let mut text = String::from(
            "Jane Doe\n\
             jane.doe@example.com | 555-987-6543\n\
             linkedin.com/in/janedoe | github.com/janedoe\n\n\
             Professional Summary\n\
             Backend engineer focused on reliable distributed services.\n\n\
             Work Experience\n\
             Senior Engineer, Acme Corp: Python, Rust, Docker, Kubernetes, AWS, PostgreSQL, Redis.\n\
             Led migration of 40 services to Kubernetes with Terraform and Jenkins pipelines.\n\n\
             Education\n\
             BS Computer Science, State University\n\n\
             Skills\n\
             Python, Rust, Docker, Kubernetes, AWS, PostgreSQL, Redis, Linux, Git, Agile, Leadership\n\n\
             Projects\n\
             Open source contributor to several observability tools.\n\n\
             Certifications\n\
             AWS Certified Solutions Architect\n\n\
             Awards\n\
             Engineering excellence award, 2023\n\n\
             Languages\n\
             English, Spanish\n\n\
             References\n\
             Available upon request\n\n",
        );
        while text.chars().count() <= 1000 {
            text.push_str("Delivered measurable improvements to latency and throughput across teams.\n");
        }
        text
    }

    #[test]
    fn test_sample_resume_scenario() {
        let a = analyze_text(SAMPLE, NamePolicy::Strict);
        assert_eq!(a.contact_info.name.as_deref(), Some("John Smith"));
        assert_eq!(a.contact_info.email.as_deref(), Some("john@example.com"));
        assert_eq!(a.contact_info.phone.as_deref(), Some("555-123-4567"));
        assert!(a.section_flags.experience);
        assert!(a.section_flags.education);
        assert!(a.section_flags.skills);
        for skill in ["Python", "React", "Aws", "Docker", "Git"] {
            assert!(a.skill_set.contains(&skill.to_string()), "missing {skill}");
        }
        assert!(!a.skill_set.contains(&"AWS".to_string()));
    }

    #[test]
    fn test_profile_links_not_used_as_portfolio() {
        let a = analyze_text(
            "Jane Doe\nlinkedin.com/in/johnsmith\ngithub.com/johnsmith",
            NamePolicy::Strict,
        );
        assert_eq!(a.contact_info.linkedin.as_deref(), Some("linkedin.com/in/johnsmith"));
        assert_eq!(a.contact_info.github.as_deref(), Some("github.com/johnsmith"));
        assert_eq!(a.contact_info.portfolio, None);
    }

    #[test]
    fn test_empty_text_minimal_result() {
        let a = analyze_text("", NamePolicy::Strict);
        assert_eq!(a.quality_score.overall, 0);
        assert!(a.skill_set.is_empty());
        assert_eq!(a.recommendations.len(), 9);
        assert!(!a.recommendations.contains(&ADD_GITHUB.to_string()));
        assert!(!a.recommendations.contains(&ADD_PROJECTS.to_string()));
        assert!(!a.recommendations.contains(&ADD_CERTIFICATIONS.to_string()));
    }

    #[test]
    fn test_complete_resume_scores_100() {
        let a = analyze_text(&complete_resume(), NamePolicy::Strict);
        assert!(a.skill_set.len() >= 10, "{:?}", a.skill_set);
        assert_eq!(a.section_flags.present_count(), 9);
        assert_eq!(a.quality_score.overall, 100);
        assert!(a.recommendations.is_empty(), "{:?}", a.recommendations);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let text = complete_resume();
        let first = analyze_text(&text, NamePolicy::Strict);
        let second = analyze_text(&text, NamePolicy::Strict);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invariants_hold_for_assorted_inputs() {
        let canonical: Vec<String> = SKILL_VOCABULARY.iter().map(|s| canonicalize(s)).collect();
        let inputs = [
            String::new(),
            "   \n\n  ".to_string(),
            SAMPLE.to_string(),
            complete_resume(),
            complete_resume().repeat(20),
            "🦀 ünïcödé résumé 🦀".repeat(100),
        ];
        for text in &inputs {
            let a = analyze_text(text, NamePolicy::Lenient);
            let q = a.quality_score;
            for v in [q.overall, q.structure, q.content, q.formatting] {
                assert!(v <= 100);
            }
            let mut sorted = a.skill_set.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted, a.skill_set);
            assert!(a.skill_set.iter().all(|s| canonical.contains(s)));
        }
    }
}
