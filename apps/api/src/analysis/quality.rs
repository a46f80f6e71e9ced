use crate::analysis::models::{ContactInfo, QualityScore, SectionFlags};

const MAX_SCORE: u32 = 100;

/// Scores a resume on fixed point buckets. Text length is counted in chars.
///
/// | bucket              | max | awards                                             |
/// |---------------------|-----|----------------------------------------------------|
/// | base content        | 20  | length > 100                                       |
/// | contact             | 20  | 5 each: email, phone, name, linkedin or github     |
/// | structure           | 30  | summary 5, experience 10, education 10, skills 5   |
/// | content depth       | 20  | length > 500, > 1000; skills >= 5, >= 10 (5 each)  |
/// | additional sections | 10  | projects 3, certifications 3, awards 2, languages 2 |
///
/// The `structure`, `content` and `formatting` sub-scores use their own
/// formulas and are not reconciled with `overall`.
pub fn compute_quality_score(
    text: &str,
    contact: &ContactInfo,
    sections: &SectionFlags,
    skills: &[String],
) -> QualityScore {
    let length = text.chars().count();
    let skill_count = skills.len();

    let overall = base_points(length)
        + contact_points(contact)
        + structure_points(sections)
        + depth_points(length, skill_count)
        + additional_section_points(sections);

    QualityScore {
        overall: clamp_score(overall),
        structure: clamp_score((sections.present_count() as u32) * 10),
        content: clamp_score(((length / 50) as u32).min(40)),
        formatting: clamp_score(((skill_count * 2) as u32).min(20)),
    }
}

fn base_points(length: usize) -> u32 {
    if length > 100 {
        20
    } else {
        0
    }
}

fn contact_points(contact: &ContactInfo) -> u32 {
    let checks = [
        contact.email.is_some(),
        contact.phone.is_some(),
        contact.name.is_some(),
        contact.linkedin.is_some() || contact.github.is_some(),
    ];
    checks.iter().filter(|c| **c).count() as u32 * 5
}

fn structure_points(sections: &SectionFlags) -> u32 {
    points_if(sections.summary, 5)
        + points_if(sections.experience, 10)
        + points_if(sections.education, 10)
        + points_if(sections.skills, 5)
}

fn depth_points(length: usize, skill_count: usize) -> u32 {
    points_if(length > 500, 5)
        + points_if(length > 1000, 5)
        + points_if(skill_count >= 5, 5)
        + points_if(skill_count >= 10, 5)
}

fn additional_section_points(sections: &SectionFlags) -> u32 {
    points_if(sections.projects, 3)
        + points_if(sections.certifications, 3)
        + points_if(sections.awards, 2)
        + points_if(sections.languages, 2)
}

fn points_if(condition: bool, points: u32) -> u32 {
    if condition {
        points
    } else {
        0
    }
}

fn clamp_score(value: u32) -> u8 {
    value.min(MAX_SCORE) as u8
}
