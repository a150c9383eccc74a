//! `casegen draft` command.
//!
//! Sends a free-text user story through the LLM port and prints the
//! drafted cases. The model is an opaque collaborator; this command only
//! frames the request and splits the completion.

use crate::adapters::live::llm::LiveLlmClient;
use crate::error::Error;
use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::stories;

/// Model used for drafting.
const DRAFT_MODEL: &str = "gpt-3.5-turbo";
/// Framing instruction for the drafting request.
const DRAFT_SYSTEM_PROMPT: &str = "You are a QA expert. Generate detailed test cases from the \
    given user story. Include positive, validation (negative/edge case), UI/UX, performance, \
    security, and combination test cases. For each test case, provide: test case ID, \
    description, preconditions, steps, expected results, and priority.";
/// Completion budget for one drafting request.
const DRAFT_MAX_TOKENS: u32 = 2000;
/// Sampling temperature for drafting.
const DRAFT_TEMPERATURE: f32 = 0.7;

/// Execute the `draft` command.
///
/// # Errors
///
/// Returns an error string when the model client cannot be constructed
/// or the completion request fails.
pub async fn run(story: &str) -> Result<(), String> {
    let llm = LiveLlmClient::new().map_err(|err| err.to_string())?;
    let cases = draft_cases(&llm, story).await.map_err(|err| err.to_string())?;
    if cases.is_empty() {
        println!("The model returned no test cases.");
        return Ok(());
    }
    for (index, case) in cases.iter().enumerate() {
        println!("--- Test case {} ---", index + 1);
        println!("{case}");
        println!();
    }
    Ok(())
}

/// Sends the story through the LLM port and splits the completion into
/// individual case texts.
///
/// # Errors
///
/// Propagates completion failures from the port.
pub async fn draft_cases(llm: &dyn LlmClient, story: &str) -> Result<Vec<String>, Error> {
    let request = CompletionRequest {
        model: DRAFT_MODEL.to_string(),
        system: DRAFT_SYSTEM_PROMPT.to_string(),
        prompt: format!("Generate test cases for this user story:\n\n{story}"),
        max_tokens: DRAFT_MAX_TOKENS,
        temperature: DRAFT_TEMPERATURE,
    };
    let response = llm.complete(&request).await?;
    Ok(stories::parse_cases(&response.text))
}

#[cfg(test)]
mod tests {
    use super::draft_cases;
    use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
    use std::sync::Mutex;

    struct CannedLlm {
        completion: String,
        prompts: Mutex<Vec<String>>,
    }

    impl LlmClient for CannedLlm {
        fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let text = self.completion.clone();
            Box::pin(async move { Ok(CompletionResponse { text }) })
        }
    }

    #[tokio::test]
    async fn drafts_and_splits_cases() {
        let llm = CannedLlm {
            completion: "Test Case 1: Login\nsteps\nTest Case 2: Logout\nsteps".into(),
            prompts: Mutex::new(Vec::new()),
        };
        let cases = draft_cases(&llm, "As a user I want to log in").await.unwrap();
        assert_eq!(cases.len(), 2);

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("As a user I want to log in"));
    }
}
