use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::BudgetInput;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Client for the hosted chat-completion endpoint. One formatted prompt in,
/// one reply string out; no retries, no fallback.
pub(crate) struct AdvisorClient {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AdvisorClient {
    /// Build a client from the environment. `GROQ_API_KEY` is required;
    /// `FINSIM_API_URL` and `FINSIM_MODEL` override the defaults.
    pub(crate) fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .context("GROQ_API_KEY is not set; the advisor needs an API key")?;
        let api_url =
            std::env::var("FINSIM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let model = std::env::var("FINSIM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    /// Send the collected figures plus the user's question and return the
    /// generated reply. Network failures, non-success statuses, and
    /// unexpected response shapes all surface as errors.
    pub(crate) fn ask(&self, input: &BudgetInput, question: &str) -> Result<String> {
        let prompt = build_prompt(input, question);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("Advisor request failed")?
            .error_for_status()
            .context("Advisor returned an error status")?;

        let parsed: ChatResponse = response
            .json()
            .context("Advisor response was not valid JSON")?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .context("Advisor response held no choices")?
            .message
            .content;

        Ok(reply)
    }
}

/// Serialize the figures and the latest question into the advisor prompt.
pub(crate) fn build_prompt(input: &BudgetInput, question: &str) -> String {
    let goal = if input.goal.is_empty() {
        "Not specified"
    } else {
        input.goal.as_str()
    };
    format!(
        "You are a friendly Indian financial advisor. Here's the user's info:\n\
         - Salary: ₹{}\n\
         - Rent: ₹{}\n\
         - Groceries: ₹{}\n\
         - Other Expenses: ₹{}\n\
         - Current Savings: ₹{}\n\
         - Goal: {}\n\
         \n\
         Now user asked: \"{}\"\n\
         \n\
         Give a simple, helpful, Indian-style friendly answer.",
        input.salary,
        input.rent,
        input.groceries,
        input.other_expenses,
        input.current_savings,
        goal,
        question,
    )
}

#[cfg(test)]
mod tests;
