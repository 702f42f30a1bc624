use anyhow::{Context, Result, anyhow, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tally_finance::Completion;
use tracing::debug;

use crate::config::LlmSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl Provider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "openai-compatible" => Ok(Provider::OpenAI),
            other => bail!("unknown llm provider '{other}' (expected gemini or openai)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    pub provider: Provider,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    api_key: String,
}

impl LlmClient {
    /// Build a client from config. `Ok(None)` when the API key variable is unset.
    pub fn from_config(cfg: &LlmSection) -> Result<Option<Self>> {
        let provider = Provider::parse(&cfg.provider)?;
        let api_key = match std::env::var(&cfg.api_key_env) {
            Ok(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => return Ok(None),
        };
        Ok(Some(Self {
            provider,
            model: cfg.model.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            temperature: cfg.temperature,
            api_key,
        }))
    }

    /// Blocking completion, usable from inside or outside a tokio runtime.
    pub fn complete_blocking(&self, prompt: &str) -> Result<String> {
        // `tally` runs under #[tokio::main], so a runtime is usually present
        // and a nested block_on would panic.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.complete_async(prompt)))
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(self.complete_async(prompt))
        }
    }

    async fn complete_async(&self, prompt: &str) -> Result<String> {
        debug!(provider = ?self.provider, model = %self.model, chars = prompt.len(), "llm request");
        match self.provider {
            Provider::Gemini => self.gemini_complete(prompt).await,
            Provider::OpenAI => self.openai_complete(prompt).await,
        }
    }

    async fn gemini_complete(&self, prompt: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::new();
        let resp = client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .headers(headers)
            .json(&gemini_request(prompt, self.temperature))
            .send()
            .await
            .context("gemini request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("gemini error: {status} {txt}");
        }

        let out: GeminiResp = resp.json().await.context("parse gemini response")?;
        gemini_text(out)
    }

    async fn openai_complete(&self, prompt: &str) -> Result<String> {
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&openai_request(&self.model, prompt, self.temperature))
            .send()
            .await
            .context("openai request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("openai error: {status} {txt}");
        }

        let out: OaiResp = resp.json().await.context("parse openai response")?;
        openai_text(out)
    }
}

impl Completion for LlmClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_blocking(prompt)
    }
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiReq {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiResp {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartOut>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartOut {
    text: Option<String>,
}

fn gemini_request(prompt: &str, temperature: f32) -> GeminiReq {
    GeminiReq {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GeminiGenConfig { temperature },
    }
}

fn gemini_text(resp: GeminiResp) -> Result<String> {
    let content = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| anyhow!("gemini returned no candidates"))?;

    let mut s = String::new();
    for part in content.parts {
        if let Some(t) = part.text {
            s.push_str(&t);
        }
    }
    Ok(s.trim().to_string())
}

#[derive(Debug, Serialize)]
struct OaiMsg {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OaiReq {
    model: String,
    messages: Vec<OaiMsg>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OaiResp {
    choices: Vec<OaiChoice>,
}

#[derive(Debug, Deserialize)]
struct OaiChoice {
    message: OaiMsgOut,
}

#[derive(Debug, Deserialize)]
struct OaiMsgOut {
    content: Option<String>,
}

fn openai_request(model: &str, prompt: &str, temperature: f32) -> OaiReq {
    OaiReq {
        model: model.to_string(),
        messages: vec![OaiMsg {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        temperature,
    }
}

fn openai_text(resp: OaiResp) -> Result<String> {
    let content = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("openai returned no message content"))?;
    Ok(content.trim().to_string())
}
