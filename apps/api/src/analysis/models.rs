use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact details pulled from resume text. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

/// The fixed set of conventional resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
    Languages,
    References,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Awards,
        Section::Languages,
        Section::References,
    ];
}

/// Presence flag per [`Section`]. Serialized as a flat JSON object of booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFlags {
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub projects: bool,
    pub certifications: bool,
    pub awards: bool,
    pub languages: bool,
    pub references: bool,
}

impl SectionFlags {
    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Summary => self.summary,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Skills => self.skills,
            Section::Projects => self.projects,
            Section::Certifications => self.certifications,
            Section::Awards => self.awards,
            Section::Languages => self.languages,
            Section::References => self.references,
        }
    }

    pub fn set(&mut self, section: Section, present: bool) {
        let slot = match section {
            Section::Summary => &mut self.summary,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
            Section::Certifications => &mut self.certifications,
            Section::Awards => &mut self.awards,
            Section::Languages => &mut self.languages,
            Section::References => &mut self.references,
        };
        *slot = present;
    }

    pub fn present_count(&self) -> usize {
        Section::ALL.iter().filter(|s| self.get(**s)).count()
    }
}

/// Heuristic completeness score. `overall` is computed independently of the
/// three diagnostic sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall: u8,
    pub structure: u8,
    pub content: u8,
    pub formatting: u8,
}

/// Output of one engine run before it is bound to a document and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub contact_info: ContactInfo,
    pub section_flags: SectionFlags,
    pub skill_set: Vec<String>,
    pub quality_score: QualityScore,
    pub recommendations: Vec<String>,
}

/// The persisted result of analysing one document. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub document_id: Uuid,
    pub contact_info: ContactInfo,
    pub section_flags: SectionFlags,
    pub skill_set: Vec<String>,
    pub quality_score: QualityScore,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(document_id: Uuid, analysis: ResumeAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            contact_info: analysis.contact_info,
            section_flags: analysis.section_flags,
            skill_set: analysis.skill_set,
            quality_score: analysis.quality_score,
            recommendations: analysis.recommendations,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_flags_get_set_roundtrip() {
        let mut flags = SectionFlags::default();
        for section in Section::ALL {
            assert!(!flags.get(section));
            flags.set(section, true);
            assert!(flags.get(section));
        }
        assert_eq!(flags.present_count(), 9);
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = AnalysisRecord::new(
            Uuid::nil(),
            ResumeAnalysis {
                contact_info: ContactInfo::default(),
                section_flags: SectionFlags::default(),
                skill_set: vec![],
                quality_score: QualityScore::default(),
                recommendations: vec![],
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("documentId").is_some());
        assert!(value.get("contactInfo").is_some());
        assert!(value.get("sectionFlags").is_some());
        assert!(value.get("qualityScore").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["sectionFlags"]["certifications"], false);
    }
}
