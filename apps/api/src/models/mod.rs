pub mod resume;

pub use resume::{
    Application, Certificate, Degree, EducationBlock, Header, JobEntry, ResumeDocument,
    SkillGroup, Specialization,
};
