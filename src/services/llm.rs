//! Claude API client for insight generation. Two failure modes coexist and
//! callers key behavior on them: free-text generation absorbs every error
//! into a fixed fallback string, while the structured daily insight
//! propagates errors so the endpoint can fail the request.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const FALLBACK_INSIGHT: &str = "Unable to generate insight at this time.";

pub const WELLNESS_ANALYST_SYSTEM: &str = "You are an expert in analyzing energy and wellness data. Provide clear, actionable insights in a friendly, encouraging tone. Keep explanations to 2-3 sentences.";

pub const WELLNESS_COACH_SYSTEM: &str = "You are an AI wellness coach specializing in energy management and productivity optimization. Provide specific, actionable advice based on user data patterns.";

const DAILY_INSIGHT_SYSTEM: &str = "You are an AI analyzing user's energy, mood, and stress data to provide helpful insights. Focus on patterns, trends, and actionable recommendations. Keep responses concise and practical.";

#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

/// Structured daily insight; also the cached value shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInsight {
    pub text: String,
    pub explanation: String,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct InsightPayload {
    text: String,
    explanation: String,
    confidence: f64,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        // 30-second timeout so a hung upstream cannot hang requests forever.
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_key: config.claude_api_key.clone(),
            model: config.claude_model.clone(),
        }
    }

    async fn post_messages(&self, body: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Claude API error {}: {}", status, body);
        }

        Ok(response.json().await?)
    }

    /// Free-text completion. Errors propagate; most callers want
    /// [`generate_insight`](Self::generate_insight) instead.
    pub async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> anyhow::Result<String> {
        let response = self
            .post_messages(serde_json::json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "system": system,
                "messages": [{
                    "role": "user",
                    "content": prompt
                }]
            }))
            .await?;

        response["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .context("Claude response contained no text block")
    }

    /// Free-text insight. Any transport or API failure degrades to the
    /// fixed fallback string; this call cannot fail.
    pub async fn generate_insight(&self, system: &str, prompt: &str) -> String {
        match self.complete(system, prompt, 1024).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Insight generation failed, returning fallback");
                FALLBACK_INSIGHT.to_string()
            }
        }
    }

    /// Structured daily insight via forced tool use. Unlike the free-text
    /// path, a missing tool call or malformed payload is an error.
    pub async fn generate_daily_insight(
        &self,
        check_in_data: &serde_json::Value,
    ) -> anyhow::Result<DailyInsight> {
        let prompt = format!(
            "Here is the user's data from the last 14 days: {}. Generate a concise insight with an explanation. Focus on patterns that could help the user optimize their day.",
            check_in_data
        );

        let response = self
            .post_messages(serde_json::json!({
                "model": self.model,
                "max_tokens": 1024,
                "system": DAILY_INSIGHT_SYSTEM,
                "messages": [{
                    "role": "user",
                    "content": prompt
                }],
                "tools": [{
                    "name": "generate_insight",
                    "description": "Record the generated insight for the user",
                    "input_schema": {
                        "type": "object",
                        "properties": {
                            "text": {
                                "type": "string",
                                "description": "The main insight message (1-2 sentences)"
                            },
                            "explanation": {
                                "type": "string",
                                "description": "Detailed explanation of the insight (2-3 sentences)"
                            },
                            "confidence": {
                                "type": "number",
                                "description": "Confidence score between 0 and 1"
                            }
                        },
                        "required": ["text", "explanation", "confidence"]
                    }
                }],
                "tool_choice": { "type": "tool", "name": "generate_insight" }
            }))
            .await?;

        let payload = parse_insight_tool_call(&response)?;

        Ok(DailyInsight {
            text: payload.text,
            explanation: payload.explanation,
            confidence: payload.confidence,
            generated_at: Utc::now(),
        })
    }
}

fn parse_insight_tool_call(response: &serde_json::Value) -> anyhow::Result<InsightPayload> {
    let tool_input = response["content"]
        .as_array()
        .and_then(|blocks| {
            blocks
                .iter()
                .find(|block| block["type"] == "tool_use" && block["name"] == "generate_insight")
        })
        .map(|block| &block["input"])
        .context("Failed to generate insight: no tool call in response")?;

    serde_json::from_value(tool_input.clone())
        .context("Failed to generate insight: malformed tool payload")
}

pub fn chart_explanation_prompt(chart_type: &str, data: &serde_json::Value) -> Option<String> {
    let prompt = match chart_type {
        "history" => format!(
            "Given this energy tracking data, provide a brief, insightful explanation of the patterns shown in the history chart. Focus on trends, notable changes, and potential insights. Data: {data}"
        ),
        "correlation" => format!(
            "Analyze these correlation patterns between different energy metrics and provide a clear, concise explanation of what they mean for the user's well-being. Data: {data}"
        ),
        "timeBreakdown" => format!(
            "Looking at this time-of-day energy breakdown, explain what it reveals about the user's daily energy patterns and potential optimization opportunities. Data: {data}"
        ),
        "summary" => format!(
            "Based on these summary metrics, provide a concise interpretation of what they indicate about the user's overall energy management and achievements. Data: {data}"
        ),
        _ => return None,
    };
    Some(prompt)
}

pub fn daily_insight_prompt(user_data: &serde_json::Value) -> String {
    format!("Based on this user's energy data for today, provide a personalized insight or suggestion: {user_data}")
}

pub fn weekly_summary_prompt(week_data: &serde_json::Value) -> String {
    format!("Looking at this week's energy patterns, provide a brief summary of key trends and achievements: {week_data}")
}

pub fn recommendation_prompt(check_ins: &serde_json::Value) -> String {
    format!(
        r#"Based on the following user check-in data, provide a personalized, actionable recommendation
to help improve their energy levels and well-being. Focus on one specific, implementable suggestion.
Keep the response concise (max 2 sentences) and friendly.

Check-in data:
{check_ins}

Consider:
- Physical energy levels
- Cognitive energy levels
- Mood patterns
- Stress levels
- Time of day patterns

Format the response as: {{insight}}
{{action}}
Example: "Your energy peaks in the morning. Try scheduling your most important tasks before noon.""#
    )
}
