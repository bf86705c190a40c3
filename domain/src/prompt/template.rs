//! Prompt templates for quiz generation and feedback evaluation

use crate::feedback::entities::StudentAnswer;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for quiz generation
    pub fn quiz_system() -> &'static str {
        r#"You are an expert educator who writes short comprehension checks.
You output only JSON, with no commentary before or after it."#
    }

    /// User prompt asking for 2-3 open-ended questions about a lecture
    pub fn quiz_generation(lecture_text: &str) -> String {
        format!(
            r#"Based on this lecture transcript, generate exactly 2-3 open-ended questions that test core understanding.
- The questions should encourage critical thinking, not simple recall.
- Output ONLY a valid JSON array in this format: [{{"id": 1, "question": "..."}}, {{"id": 2, "question": "..."}}]

Transcript:
"""
{}
""""#,
            lecture_text
        )
    }

    /// System prompt for answer evaluation
    pub fn evaluation_system() -> &'static str {
        r#"You are an expert teaching assistant.
You analyze a class's answers to find patterns of understanding and misunderstanding.
You respond only with a JSON object containing the fields positive_summary, improvement_summary and teacher_feedback."#
    }

    /// User prompt asking for the three-part evaluation of one question
    pub fn evaluation_prompt(lecture_text: &str, question: &str, answers: &[StudentAnswer]) -> String {
        let mut prompt = format!(
            r#"A teacher gave a lecture and asked a question.

Original Lecture Context: "{}"

Question Asked: "{}"

Student Answers:
"#,
            lecture_text, question
        );

        for a in answers {
            prompt.push_str(&format!("- {}\n", a.answer));
        }

        prompt.push_str(
            r#"
Provide a concise analysis in JSON format:
1. positive_summary: one sentence on what the students generally understood correctly.
2. improvement_summary: one sentence on the most common misconception or point of confusion. Be specific.
3. teacher_feedback: two sentences of actionable advice for the teacher to clarify this point to the class."#,
        );

        prompt
    }

    /// User prompt asking for a short spoken re-teach script
    pub fn recommendation_prompt(lecture_text: &str, question: &str) -> String {
        format!(
            r#"A teacher gave this lecture: "{}". Students seemed confused by this question: "{}".
Write a 2-3 sentence alternative explanation (max 50 words) the teacher can say aloud to re-teach this specific concept. Start with "Class, let's pause for a moment...""#,
            lecture_text, question
        )
    }
}
