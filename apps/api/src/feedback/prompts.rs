// Feedback generator prompt templates.

pub const COACH_SYSTEM: &str = "You are a professional interview coach who provides \
    constructive feedback and helps candidates improve their interview skills.";

/// Builds the coaching prompt. Candidate text is interpolated once, so braces
/// inside an answer are never mistaken for placeholders.
pub fn feedback_prompt(
    question: &str,
    answer: &str,
    resume_summary: Option<&str>,
) -> String {
    let (resume_section, resume_instruction) = match resume_summary {
        Some(summary) => (
            format!("\nCandidate background from their resume:\n{summary}\n"),
            RESUME_INSTRUCTION,
        ),
        None => (String::new(), ""),
    };

    format!(
        r#"You are an expert interview coach. The candidate was asked: "{question}"

The candidate answered: "{answer}"
{resume_section}
Please provide:
1. A brief assessment of their answer (what they did well, what could be improved)
2. A suggested improved answer that demonstrates best practices
3. Key points they should have covered
4. Tips for similar questions in the future{resume_instruction}

Keep the response concise, constructive, and helpful. Format it as a coaching response."#
    )
}

pub const RESUME_INSTRUCTION: &str = "
5. Tie your feedback to the candidate's background: point out experience, skills or \
projects from their resume they could have drawn on in this answer";

pub const FALLBACK_FEEDBACK: &str = "Thank you for your answer. Here are some general tips for interview success:

**Assessment of Your Answer:**
Your response shows engagement with the question. Here are some areas to consider:

**Key Points to Cover:**
1. Use the STAR method (Situation, Task, Action, Result) for behavioral questions
2. Be specific with examples and quantify your achievements when possible
3. Show enthusiasm and genuine interest in the role
4. Ask thoughtful questions about the company and role
5. Practice active listening and stay focused on the question asked

**Tips for Similar Questions:**
- Prepare 3-5 specific examples from your experience
- Practice your responses out loud
- Research the company and role beforehand
- Be authentic and honest in your responses
- Show how your experience relates to the role

Keep practicing and you'll continue to improve!";

pub const FALLBACK_RESUME_TEMPLATE: &str = "**Drawing on Your Background:**
Your resume lists {experience_count} {position_word} and skills in {skills}. \
Pick a concrete example from that experience that fits the question, \
and name the skills you used and the result you achieved.

";
