//! Question Catalog — fixed interview questions grouped by interview type.

use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

pub mod handlers;

#[derive(Debug, Error)]
#[error("Invalid interview type: {0}")]
pub struct InvalidInterviewType(pub String);

/// The kinds of interview the catalog covers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewType {
    Hr,
    Technical,
    Behavioral,
}

impl InterviewType {
    pub const ALL: [InterviewType; 3] = [
        InterviewType::Hr,
        InterviewType::Technical,
        InterviewType::Behavioral,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InterviewType::Hr => "hr",
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
        }
    }

    /// Identifier with its first letter capitalized ("hr" -> "Hr").
    pub fn display_name(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn questions(self) -> &'static [&'static str] {
        match self {
            InterviewType::Hr => HR_QUESTIONS,
            InterviewType::Technical => TECHNICAL_QUESTIONS,
            InterviewType::Behavioral => BEHAVIORAL_QUESTIONS,
        }
    }
}

impl std::str::FromStr for InterviewType {
    type Err = InvalidInterviewType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterviewType::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| InvalidInterviewType(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewTypeSummary {
    pub id: &'static str,
    pub name: String,
    pub question_count: usize,
}

/// Picks a question uniformly at random. Repeats across calls are expected.
pub fn get_random_question(
    interview_type: &str,
) -> Result<(&'static str, InterviewType), InvalidInterviewType> {
    let kind: InterviewType = interview_type.parse()?;
    let question = kind
        .questions()
        .choose(&mut rand::thread_rng())
        .copied()
        .ok_or_else(|| InvalidInterviewType(interview_type.to_string()))?;
    Ok((question, kind))
}

pub fn list_types() -> Vec<InterviewTypeSummary> {
    InterviewType::ALL
        .into_iter()
        .map(|t| InterviewTypeSummary {
            id: t.id(),
            name: t.display_name(),
            question_count: t.questions().len(),
        })
        .collect()
}

const HR_QUESTIONS: &[&str] = &[
    "Tell me about yourself and your background.",
    "What are your greatest strengths and weaknesses?",
    "Why do you want to work for our company?",
    "Where do you see yourself in 5 years?",
    "Describe a challenging situation you faced and how you overcame it.",
    "What motivates you in your work?",
    "How do you handle stress and pressure?",
    "What's your ideal work environment?",
    "Tell me about a time you had to work with a difficult team member.",
    "What questions do you have for us?",
    "How do you prioritize your work when you have multiple deadlines?",
    "Describe a time when you had to learn something new quickly.",
    "What's your approach to working in a team?",
    "How do you handle constructive criticism?",
    "What's the most important thing you've learned in your career?",
];

const TECHNICAL_QUESTIONS: &[&str] = &[
    "Explain a complex technical concept to a non-technical person.",
    "How do you approach debugging a problem you've never seen before?",
    "Describe your experience with version control systems.",
    "What's your preferred programming language and why?",
    "How do you stay updated with the latest technology trends?",
    "Explain the difference between frontend and backend development.",
    "How do you ensure code quality in your projects?",
    "Describe a time when you had to learn a new technology quickly.",
    "What's your experience with databases and data modeling?",
    "How do you handle technical debt in your projects?",
    "Explain the concept of RESTful APIs.",
    "How do you approach testing in your development process?",
    "What's your experience with cloud platforms?",
    "How do you handle performance optimization?",
    "Describe your experience with agile development methodologies.",
];

const BEHAVIORAL_QUESTIONS: &[&str] = &[
    "Tell me about a time you failed and what you learned from it.",
    "Describe a situation where you had to meet a tight deadline.",
    "Give me an example of when you had to work with limited resources.",
    "Tell me about a time you had to adapt to a significant change.",
    "Describe a situation where you had to persuade someone to see your point of view.",
    "Tell me about a time you had to work with someone you didn't get along with.",
    "Give me an example of when you took initiative on a project.",
    "Describe a time when you had to make a difficult decision.",
    "Tell me about a time you had to learn something new quickly.",
    "Give me an example of when you had to work under pressure.",
    "Describe a time when you had to resolve a conflict in your team.",
    "Tell me about a time you had to present to a large group.",
    "Give me an example of when you had to manage multiple priorities.",
    "Describe a time when you had to implement feedback from others.",
    "Tell me about a time you had to work with a difficult client or stakeholder.",
];
