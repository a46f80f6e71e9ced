// Resume quality & recommendation engine.
// Pure extraction/scoring lives in contact, skills, sections, quality and
// recommendations; `service` binds results to documents and persists them.

pub mod contact;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod quality;
pub mod recommendations;
pub mod sections;
pub mod service;
pub mod skills;
pub mod store;
