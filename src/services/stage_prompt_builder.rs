use crate::{
    constants::prompts::{
        CONCEPTS_PROMPT, PITFALLS_PROMPT, QUICK_EXPLANATION_PROMPT, SOLUTIONS_PROMPT,
        STRICT_JSON_RETRY_PROMPT,
    },
    errors::preview,
    models::domain::{ConceptsResult, ProblemText, SolutionsResult},
};

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so braces inside problem text or
/// model output pass through untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let hit = vars.iter().find(|(name, _)| {
            after.starts_with(name) && after[name.len()..].starts_with('}')
        });

        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn concepts_prompt(problem: &ProblemText) -> String {
    render(CONCEPTS_PROMPT, &[("problem_text", problem.body())])
}

pub fn solutions_prompt(problem: &ProblemText, concepts: &ConceptsResult) -> String {
    let concepts_digest = format!(
        "{}\nDifficulty: {} ({})",
        concepts.concepts.join(", "),
        concepts.difficulty,
        concepts.difficulty_reason
    );
    render(
        SOLUTIONS_PROMPT,
        &[
            ("problem_text", problem.body()),
            ("concepts", &concepts_digest),
        ],
    )
}

pub fn pitfalls_prompt(problem: &ProblemText, solutions: &SolutionsResult) -> String {
    render(
        PITFALLS_PROMPT,
        &[
            ("problem_text", problem.body()),
            ("solution", &solutions.summary()),
        ],
    )
}

/// Amends a failed stage prompt with the rejected output and a strict-JSON demand.
pub fn retry_prompt(original_prompt: &str, previous_output: Option<&str>, reason: &str) -> String {
    let previous = previous_output
        .map(preview)
        .unwrap_or_else(|| "(no output was produced)".to_string());
    render(
        STRICT_JSON_RETRY_PROMPT,
        &[
            ("original_prompt", original_prompt),
            ("reason", reason),
            ("previous_output", &previous),
        ],
    )
}

pub fn quick_explanation_prompt(problem: &ProblemText) -> String {
    render(QUICK_EXPLANATION_PROMPT, &[("problem_text", problem.body())])
}
