//! Per-user session context.
//!
//! One `Session` lives for one interactive run. Each interaction (upload,
//! manual entry, chat message) takes `&mut Session`, so there is exactly one
//! writer and no shared state between sessions.

use serde::{Deserialize, Serialize};

use crate::finance::Transaction;

pub const GREETING: &str =
    "Hello! I am your AI Financial Agent. I can see your budget data. How can I help?";

/// Which screen the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum View {
    #[default]
    #[serde(rename = "dashboard")]
    Dashboard,
    #[serde(rename = "simulator")]
    Simulator,
    #[serde(rename = "chat")]
    Chat,
}

impl View {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "analytics" => Some(View::Dashboard),
            "simulator" | "sim" => Some(View::Simulator),
            "chat" | "agent" => Some(View::Chat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    income: f64,
    transactions: Vec<Transaction>,
    messages: Vec<Message>,
    view: View,
}

impl Session {
    /// Start a session with the given monthly income
    pub fn new(income: f64) -> Self {
        Self {
            income,
            transactions: Vec::new(),
            messages: vec![Message {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
            view: View::default(),
        }
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn set_income(&mut self, income: f64) {
        self.income = income;
    }

    /// Append a manually entered transaction
    pub fn add_transaction(&mut self, txn: Transaction) {
        self.transactions.push(txn);
    }

    /// Swap in a freshly uploaded transaction set.
    /// Callers only reach this after ingestion succeeded.
    pub fn replace_transactions(&mut self, txns: Vec<Transaction>) {
        self.transactions = txns;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn has_data(&self) -> bool {
        !self.transactions.is_empty()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
