// Prompt templates for the wizard steps.
// Reuses cross-cutting fragments from llm_client::prompts. Placeholders are `{name}`
// and are filled by the builder functions below, never by callers.

use crate::llm_client::prompts::{JSON_LIST_ONLY, JSON_OBJECT_ONLY, NO_FABRICATION};

/// Resume polish prompt. Replace: {job_title}, {job_description}, {resume_content},
/// {instruction}, {output_rules}
pub const POLISH_PROMPT_TEMPLATE: &str = r#"Rewrite the following resume so it is tailored to the job below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "header": {
    "name": "Full Name",
    "email": "name@example.com",
    "phone": "555-0100",
    "linkedin": "linkedin.com/in/handle",
    "github": "github.com/handle",
    "website": "example.com"
  },
  "summary": "One paragraph professional summary.",
  "skills": [
    {"category": "Languages", "details": "Rust, Go, SQL"}
  ],
  "experience": [
    {
      "position": "Software Engineer",
      "date_range": "Jan 2020 - Present",
      "company": "Company",
      "location": "City, ST",
      "extra_line": "",
      "bullet_points": ["Achievement with a concrete outcome"],
      "applications": [
        {"title": "Project name", "details": ["What was built and why it mattered"]}
      ]
    }
  ],
  "education": {
    "certificates": [{"name": "Certificate", "date": "2024"}],
    "specializations": [
      {"institution": "Institution", "location": "Online", "specialization": "Topic", "date": "2024"}
    ],
    "degrees": [
      {"university": "University", "location": "City, ST", "date": "2019", "degree": "B.S. Computer Science"}
    ]
  }
}

Rules:
- Omit contact fields that are not in the resume; use an empty string or empty list for anything absent.
- Keep every employer, title and date exactly as written in the resume.
- Prefer the job description's vocabulary where it truthfully describes the candidate's work.
{instruction}
{output_rules}

JOB TITLE:
{job_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_content}"#;

/// Summary prompt. Replace: {skills}, {experience}, {education}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Based on the following resume details, generate a concise, impactful professional summary paragraph.
Write three to four sentences in the third person without a heading. Return only the paragraph.

Skills:
{skills}

Experience:
{experience}

Education:
{education}"#;

/// Bullet prompt. Replace: {position}, {company}, {location}, {date_range}, {output_rules}
pub const BULLETS_PROMPT_TEMPLATE: &str = r#"Generate 3-5 concise, impactful bullet points for the following job.
Start each bullet with a strong action verb and do not prefix it with a bullet character.
{output_rules}

Job title: {position}
Company: {company}
Location: {location}
Dates: {date_range}"#;

/// Cover letter prompt. Replace: {salutation}, {company_name}, {job_title},
/// {job_description}, {resume_text}, {output_rules}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter addressed as follows: {salutation}
The letter is for the {job_title} position at {company_name}.
Keep it under one page, in plain paragraphs separated by blank lines, and close with "Sincerely," followed by the candidate's name.
{output_rules}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

/// Placement prompt. Replace: {job_title}, {job_description}, {resume_text}, {preferences}
pub const PLACEMENT_PROMPT_TEMPLATE: &str = r#"You are an honest career advisor. Assess the candidate below against the job.

Give two scores out of 100 and a short justification for each, in exactly this format:
Fit for Job: <score>/100 - <how well the candidate meets the job's requirements>
Job Fit for You: <score>/100 - <how well the job matches the candidate's preferences>

Be candid; do not inflate the scores.

JOB TITLE:
{job_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

CANDIDATE PREFERENCES:
{preferences}"#;

/// Relevance prompt. Replace: {job_title}, {job_description}, {resume_json}, {output_rules}
pub const RELEVANCE_PROMPT_TEMPLATE: &str = r#"Rate how relevant each resume section is to the job below, from 1 (barely relevant) to 5 (essential).

Return a JSON object with this EXACT schema:
{"summary": 1, "skills": 2, "experience": 5, "education": 3, "certificates": 1, "specializations": 1, "degrees": 1}
{output_rules}

JOB TITLE:
{job_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_json}"#;

const NOT_PROVIDED: &str = "N/A";

pub fn polish_prompt(
    job_title: &str,
    job_description: &str,
    resume_content: &str,
    instruction: Option<&str>,
) -> String {
    let instruction = instruction
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("- Additional instruction from the candidate: {s}"))
        .unwrap_or_default();
    POLISH_PROMPT_TEMPLATE
        .replace("{instruction}", &instruction)
        .replace("{output_rules}", &format!("- {NO_FABRICATION}\n- {JSON_OBJECT_ONLY}"))
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
        .replace("{resume_content}", resume_content)
}

pub fn summary_prompt(skills: &str, experience: &str, education: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{skills}", or_not_provided(skills))
        .replace("{experience}", or_not_provided(experience))
        .replace("{education}", or_not_provided(education))
}

pub fn bullets_prompt(position: &str, company: &str, location: &str, date_range: &str) -> String {
    BULLETS_PROMPT_TEMPLATE
        .replace("{output_rules}", JSON_LIST_ONLY)
        .replace("{position}", or_not_provided(position))
        .replace("{company}", or_not_provided(company))
        .replace("{location}", or_not_provided(location))
        .replace("{date_range}", or_not_provided(date_range))
}

pub fn cover_letter_prompt(
    salutation: &str,
    company_name: &str,
    job_title: &str,
    job_description: &str,
    resume_text: &str,
) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{salutation}", salutation)
        .replace("{output_rules}", NO_FABRICATION)
        .replace("{company_name}", company_name)
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}

pub fn placement_prompt(
    job_title: &str,
    job_description: &str,
    resume_text: &str,
    preferences: &str,
) -> String {
    PLACEMENT_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
        .replace("{preferences}", or_not_provided(preferences))
}

pub fn relevance_prompt(job_title: &str, job_description: &str, resume_json: &str) -> String {
    RELEVANCE_PROMPT_TEMPLATE
        .replace("{output_rules}", JSON_OBJECT_ONLY)
        .replace("{job_title}", or_not_provided(job_title))
        .replace("{job_description}", or_not_provided(job_description))
        .replace("{resume_json}", resume_json)
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}
