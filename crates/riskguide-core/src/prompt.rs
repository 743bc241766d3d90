//! Prompt construction for every completion call.
//!
//! All builders are pure: the output depends only on the arguments. The
//! answers are passed in already serialized (see
//! [`riskguide_types::question::serialize_answers`]) so the exact text that
//! gets persisted as `user_answers` is the text the model saw.
//!
//! When the locale is Gujarati, a translation directive is appended. The
//! directive asks for the *output* to be translated; the instructions
//! themselves stay in English.

use riskguide_types::locale::Locale;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const QUESTION_GENERATION: &str = "You are an AI specialized in asking health-related questions \
to assess cancer risk. Write a series of personalized, easy-to-understand questions about the \
user's habits, lifestyle, medical history, and environmental exposures, phrased the way a \
friendly and empathetic doctor would ask them. Use simple words a 10-year-old child could \
understand, keep the grammar clean, and make every question clear and specific.

Organize the questions into four stages:
1. **Basic Information:** age, gender, location, and race/ethnicity, with options where appropriate.
2. **Health Habits:** smoking, alcohol consumption, diet, physical activity, and sleep patterns.
3. **Specific Risks:** family medical history, previous diagnoses, exposure to harmful substances \
(e.g., radiation, carcinogens), stress levels, and chronic conditions.
4. **Screening and Diagnostic Tests:** results of previous cancer screenings, findings from imaging \
tests (e.g., mammograms, colonoscopies), and relevant biomarker levels.

Offer options only where they make sense (age ranges, gender, and similar) and use open-ended \
questions for detailed responses such as lifestyle or medical history. Also ask for the user's \
name so the conversation can be personalized.

Respond with JSON only, without markdown. Use exactly this structure:
{\"questions\": [{\"question\": \"What is your age?\", \"type\": \"open-ended\"}, \
{\"question\": \"What is your gender?\", \"options\": [\"Male\", \"Female\", \"Other\"], \"type\": \"single-choice\"}]}
The \"type\" field must be one of \"open-ended\", \"single-choice\", or \"multiple-choice\".";

const SUMMARY: &str = "You are an AI specialized in summarizing user-provided health information \
into a concise, easy-to-understand summary.
From the user's responses to health-related questions, write a short summary of the most \
important details about their habits, lifestyle, medical history, and cancer risk factors.
Cover age, gender, health habits, specific risks, and any previous screenings or diagnostic test results.
Use simple words a 10-year-old child could understand, keep the grammar clean, and make the summary clear and accurate.
Generate the response in English.";

const RISK_CLASSIFICATION: &str = "You are an AI specialized in assessing cancer risk from detailed \
user responses.
Carefully analyze the user's answers about their habits, lifestyle, medical history, environmental \
exposures, and diagnostic test results. Weigh genetic factors, demographic characteristics, and \
screening results alongside lifestyle choices.
Give a risk level (very low, low, moderate, high, very high) together with a percentage between 1% and 100%.
If the risk is high or very high, be clear about the seriousness of the situation while staying balanced and supportive.
Use simple words a 10-year-old child could understand, keep the grammar clean, and make the explanation detailed and accurate.
Generate the response in English.
Begin the response with the cancer risk level and percentage.";

const GUIDANCE: &str = "You are an AI that provides highly personalized health advice to reduce cancer risk.
Using the user's cancer risk assessment and their detailed answers, create an actionable health plan \
that is specific to them.
For low-risk users, suggest activities that maintain or improve their good habits, and offer encouragement.
For moderate-risk users, suggest concrete changes in diet, lifestyle, and screenings, focused on preventing escalation.
For high-risk users, give detailed advice tailored to their situation: targeted lifestyle changes, \
precise dietary advice, and urgent recommendations for further screenings or consultations. \
Acknowledge positive actions they are already taking.
Avoid generic suggestions and focus on practical steps the user can take directly. Be supportive and \
avoid creating undue fear, but be clear about why the advice matters.
Use simple words a 10-year-old child could understand and keep the grammar clean.
Generate the response in English.
Start the response with the cancer risk stage and percentage.";

// ---------------------------------------------------------------------------
// Translation directives
// ---------------------------------------------------------------------------

const GU_QUESTIONS: &str = "\n\nTranslate the questions and options to Gujarati.";
const GU_SUMMARY: &str = "\n\nTranslate the summary to Gujarati.";
const GU_RISK: &str = "\n\nTranslate the risk assessment to Gujarati.";
const GU_GUIDANCE: &str = "\n\nTranslate the guidance to Gujarati.";

fn with_directive(mut prompt: String, locale: Locale, directive: &str) -> String {
    if locale == Locale::Gu {
        prompt.push_str(directive);
    }
    prompt
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Prompt asking for the four-stage question set as a `{"questions": [...]}` container.
pub fn build_question_prompt(locale: Locale) -> String {
    with_directive(QUESTION_GENERATION.to_string(), locale, GU_QUESTIONS)
}

/// Prompt asking for a plain-language narrative of the answers.
pub fn build_summary_prompt(answers_json: &str, locale: Locale) -> String {
    let prompt = format!("{SUMMARY} User Answers: {answers_json}");
    with_directive(prompt, locale, GU_SUMMARY)
}

/// Prompt asking for a risk band and percentage, leading the response.
pub fn build_risk_prompt(answers_json: &str, locale: Locale) -> String {
    let prompt = format!("{RISK_CLASSIFICATION} User Answers: {answers_json}");
    with_directive(prompt, locale, GU_RISK)
}

/// Prompt asking for risk-tiered guidance from the persisted assessment and answers.
pub fn build_guidance_prompt(risk_assessment: &str, answers_json: &str, locale: Locale) -> String {
    let prompt = format!("{GUIDANCE}\nCancer Risk: {risk_assessment}\nUser Answers: {answers_json}");
    with_directive(prompt, locale, GU_GUIDANCE)
}
