// Resume parser LLM prompt templates.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub fn resume_parse_system() -> String {
    format!("You are a resume parser. Extract structured information from resumes. {JSON_ONLY_SYSTEM}")
}

pub const RESUME_PARSE_PROMPT: &str = r#"Extract the following information from this resume and return it as a JSON object:

{
  "name": "Full name",
  "email": "Email address",
  "phone": "Phone number",
  "summary": "Professional summary or objective",
  "experience": [
    {"company": "Company name", "position": "Job title", "duration": "Employment period", "description": "Key responsibilities and achievements"}
  ],
  "education": [
    {"institution": "School or university", "degree": "Degree and field", "year": "Graduation year"}
  ],
  "skills": ["Skill"],
  "projects": [
    {"name": "Project name", "description": "What it does", "technologies": ["Technology"]}
  ]
}

Use null for any field that is not present in the resume. Return ONLY the JSON object.

RESUME TEXT:
{resume_text}"#;
