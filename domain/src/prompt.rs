//! Prompt templates for the external generator, judge, and analyzer

use crate::core::role::Role;
use crate::session::entities::SessionMeta;

/// One prior exchange rendered into the generation prompt
#[derive(Debug, Clone)]
pub struct ExchangeContext {
    pub role_title: String,
    pub question: String,
    pub answer: String,
}

/// Templates for every prompt the panel sends out
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for question generation
    pub fn generation_system(role: Role) -> String {
        format!(
            "You are a tough, experienced {} evaluating a business plan. \
             Your job is to identify weak spots, challenge assumptions, and push presenters \
             to think deeper. Reference specific details from their proposal and ask pointed \
             questions that expose gaps in their thinking.",
            role.title()
        )
    }

    /// User prompt for question generation
    pub fn generation_prompt(
        role: Role,
        topic: &str,
        meta: &SessionMeta,
        document_context: &str,
        history: &[ExchangeContext],
    ) -> String {
        let mut prompt = format!(
            r#"You are the {role} of a company evaluating this {report_type} from {company} in the {industry} industry.

The presenter has made this specific recommendation or analysis:
{topic}

Your role focuses on: {focus}
"#,
            role = role.title(),
            report_type = meta.report_type,
            company = meta.company_name,
            industry = meta.industry,
            topic = topic,
            focus = role.focus(),
        );

        if !history.is_empty() {
            prompt.push_str("\nPREVIOUS CONVERSATION:\n");
            for (i, exchange) in history.iter().enumerate() {
                prompt.push_str(&format!(
                    "\nQ{n} ({who}): {q}\nA{n}: {a}\n",
                    n = i + 1,
                    who = exchange.role_title,
                    q = exchange.question,
                    a = exchange.answer,
                ));
            }
        }

        if !document_context.is_empty() {
            prompt.push_str(&format!("\nDocument excerpt:\n{document_context}\n"));
        }

        prompt.push_str(
            r#"
Generate ONE tough, probing question that CHALLENGES or CLARIFIES this specific recommendation or analysis. Your question should:
1. Directly reference what they proposed or analyzed
2. Not repeat topics already covered in previous questions
3. Build on the presenter's previous responses when relevant
4. Be direct and conversational, 1-2 sentences maximum

Return ONLY the question text, no preamble or explanation."#,
        );

        prompt
    }

    /// System prompt for the follow-up judge
    pub fn judge_system() -> &'static str {
        "You are an executive deciding if clarification is needed. \
         You must return only valid JSON."
    }

    /// User prompt for the follow-up judge; the reply must be a JSON
    /// object with `needs_followup`, `reason`, and `followup_question`.
    pub fn judge_prompt(role: Role, question: &str, answer: &str) -> String {
        format!(
            r#"You are the {role} who just asked: "{question}"

The presenter responded: "{answer}"

Analyze if this response adequately addresses the question. Consider if you (the {role}) would have a natural follow-up question to clarify or dig deeper.

Return ONLY a JSON object with this exact structure:
{{
    "needs_followup": true,
    "reason": "brief reason why followup is needed",
    "followup_question": "the specific follow-up question"
}}

OR if no follow-up is needed:
{{
    "needs_followup": false,
    "reason": "response was adequate",
    "followup_question": null
}}

Only request a follow-up if the response is vague, incomplete, or raises new concerns."#,
            role = role.title(),
        )
    }

    /// System prompt for document analysis
    pub fn analyzer_system() -> &'static str {
        "You are an expert strategy consultant who identifies specific recommendations \
         and analyses in business plans that executives would challenge. Extract concrete, \
         specific items that can be questioned. You must return only valid JSON."
    }

    /// User prompt for document analysis; the reply must be a JSON
    /// object of the form `{"key_details": ["...", ...]}`.
    pub fn analyzer_prompt(meta: &SessionMeta, document: &str) -> String {
        format!(
            r#"Analyze this {report_type} document for {company} in the {industry} industry.

Your goal is to identify SPECIFIC STRATEGIC RECOMMENDATIONS and KEY ANALYSES that executives can challenge or clarify.

Extract 12-15 items across these categories:
1. Strategic recommendations, formatted "Recommendation: [what they propose] - [brief justification given]"
2. Key analyses performed, formatted "Analysis: [what they analyzed] - [key finding or assumption]"
3. Critical assumptions, formatted "Assumption: [what they assume] - [impact if wrong]"

For each item, be specific: cite actual proposals, numbers, or findings from the document, and make items challengeable rather than plain facts.

Return ONLY a JSON object: {{"key_details": ["detail1", "detail2", ...]}}

Document:
{document}"#,
            report_type = meta.report_type,
            company = meta.company_name,
            industry = meta.industry,
            document = document,
        )
    }
}
