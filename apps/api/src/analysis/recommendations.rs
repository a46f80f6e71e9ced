use crate::analysis::models::{ContactInfo, SectionFlags};

pub const ADD_EMAIL: &str = "Add a professional email address so recruiters can reach you.";
pub const ADD_PHONE: &str = "Add a phone number to your contact information.";
pub const ADD_LINKEDIN: &str = "Add your LinkedIn profile URL to strengthen your professional presence.";
pub const ADD_GITHUB: &str = "Add your GitHub profile to showcase your code and projects.";
pub const ADD_SUMMARY: &str = "Add a professional summary at the top highlighting your key qualifications.";
pub const ADD_EXPERIENCE: &str = "Add a work experience section describing your roles and achievements.";
pub const ADD_EDUCATION: &str = "Add an education section with your degrees and institutions.";
pub const ADD_SKILLS_SECTION: &str = "Add a dedicated skills section listing your technical and soft skills.";
pub const ADD_PROJECTS: &str = "Add a projects section to demonstrate hands-on experience with your tech stack.";
pub const EXPAND_SKILLS: &str = "Expand your skills list; include at least 5 relevant skills.";
pub const ENHANCE_CONTENT: &str = "Enhance your resume content with more detail, quantified achievements, and relevant keywords.";
pub const ADD_CERTIFICATIONS: &str = "Add cloud certifications to validate your cloud platform expertise.";

const CODE_HOSTING_SKILLS: &[&str] = &["javascript", "python"];
const PROJECT_SKILLS: &[&str] = &["javascript", "python", "react", "nodejs"];
const CLOUD_SKILLS: &[&str] = &["aws", "azure", "google cloud"];

const MIN_SKILLS: usize = 5;
const MIN_OVERALL: u8 = 70;

/// Builds the ordered recommendation list. Each check is independent and
/// appends at most one message; order is contact, structure, content, domain.
pub fn generate_recommendations(
    contact: &ContactInfo,
    sections: &SectionFlags,
    skills: &[String],
    overall: u8,
) -> Vec<String> {
    let lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let has_any = |set: &[&str]| lowered.iter().any(|s| set.contains(&s.as_str()));
    let has_like = |stems: &[&str]| lowered.iter().any(|s| stems.iter().any(|p| s.contains(p)));

    let checks: [(bool, &str); 12] = [
        (contact.email.is_none(), ADD_EMAIL),
        (contact.phone.is_none(), ADD_PHONE),
        (contact.linkedin.is_none(), ADD_LINKEDIN),
        (
            contact.github.is_none() && has_like(CODE_HOSTING_SKILLS),
            ADD_GITHUB,
        ),
        (!sections.summary, ADD_SUMMARY),
        (!sections.experience, ADD_EXPERIENCE),
        (!sections.education, ADD_EDUCATION),
        (!sections.skills, ADD_SKILLS_SECTION),
        (!sections.projects && has_any(PROJECT_SKILLS), ADD_PROJECTS),
        (skills.len() < MIN_SKILLS, EXPAND_SKILLS),
        (overall < MIN_OVERALL, ENHANCE_CONTENT),
        (!sections.certifications && has_any(CLOUD_SKILLS), ADD_CERTIFICATIONS),
    ];

    checks
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, message)| message.to_string())
        .collect()
}
