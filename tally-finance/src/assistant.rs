//! Chat boundary: the session side of an assistant turn.
//!
//! The language model itself is an opaque [`Completion`]: prompt in, text
//! out. A failed call never corrupts the session; the question stays in
//! the history and no assistant message is added.

use tally_core::{BudgetError, Result, Session, View};
use tracing::warn;

use crate::aggregate::{aggregate, is_ready};
use crate::benchmarks::BenchmarkTable;
use crate::prompt::build_prompt;
use crate::report::BudgetReport;

/// Text-completion collaborator
pub trait Completion {
    fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

impl<F> Completion for F
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self(prompt)
    }
}

/// Current report for a session, or `None` when there is nothing to aggregate
pub fn session_report(session: &Session) -> Option<BudgetReport> {
    let txns = session.transactions();
    if !is_ready(txns) {
        return None;
    }
    Some(BudgetReport::build(&aggregate(txns, session.income())))
}

/// Prompt for `question` from the session's current numbers
pub fn prompt_for(session: &Session, benchmarks: Option<&BenchmarkTable>, question: &str) -> String {
    let report = session_report(session);
    build_prompt(report.as_ref(), benchmarks, question)
}

/// Handle one chat message end to end; returns the assistant's reply.
pub fn ask(
    session: &mut Session,
    question: &str,
    benchmarks: Option<&BenchmarkTable>,
    completion: &dyn Completion,
) -> Result<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(BudgetError::InvalidInput("empty question".into()));
    }

    session.set_view(View::Chat);
    session.push_user(question);
    let prompt = prompt_for(session, benchmarks, question);

    let reply = completion.complete(&prompt).map_err(|e| {
        warn!(error = %e, "assistant call failed");
        BudgetError::ExternalService(format!("{e:#}"))
    })?;

    let reply = reply.trim();
    if reply.is_empty() {
        warn!("assistant returned an empty reply");
        return Err(BudgetError::ExternalService("empty response".into()));
    }

    session.push_assistant(reply);
    Ok(reply.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tally_core::{Role, Transaction};

    struct Recorder {
        prompts: RefCell<Vec<String>>,
        reply: &'static str,
    }

    impl Completion for Recorder {
        fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    fn session_with_data() -> Session {
        let mut s = Session::new(6000.0);
        s.add_transaction(Transaction::undated("Rent", 1500.0));
        s.add_transaction(Transaction::undated("Dining", 300.0));
        s
    }

    #[test]
    fn test_successful_turn_appends_both_messages() {
        let mut s = session_with_data();
        let bot = Recorder {
            prompts: RefCell::new(Vec::new()),
            reply: "  Cut dining by 10%.  ",
        };

        let reply = ask(&mut s, "Where can I save?", None, &bot).unwrap();
        assert_eq!(reply, "Cut dining by 10%.");
        assert_eq!(s.view(), View::Chat);

        let msgs = s.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, Role::User);
        assert_eq!(msgs[1].content, "Where can I save?");
        assert_eq!(msgs[2].role, Role::Assistant);

        let prompts = bot.prompts.borrow();
        assert!(prompts[0].contains("- WANTS: $300.00"));
        assert!(prompts[0].contains("USER QUESTION: Where can I save?"));
    }

    #[test]
    fn test_failure_keeps_session_consistent() {
        let mut s = session_with_data();
        let failing = |_: &str| -> anyhow::Result<String> { anyhow::bail!("quota exceeded") };

        let err = ask(&mut s, "hello", None, &failing).unwrap_err();
        match err {
            BudgetError::ExternalService(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages().last().unwrap().role, Role::User);
        assert_eq!(s.transactions().len(), 2);
    }

    #[test]
    fn test_empty_reply_is_error() {
        let mut s = Session::new(100.0);
        let blank = |_: &str| -> anyhow::Result<String> { Ok("   ".into()) };
        assert!(matches!(ask(&mut s, "hi", None, &blank), Err(BudgetError::ExternalService(_))));
    }

    #[test]
    fn test_no_data_prompt() {
        let s = Session::new(4000.0);
        assert!(session_report(&s).is_none());
        let p = prompt_for(&s, None, "What is an emergency fund?");
        assert!(p.contains("User has NOT uploaded specific data yet."));
    }

    #[test]
    fn test_blank_question_rejected() {
        let mut s = Session::new(100.0);
        let echo = |p: &str| -> anyhow::Result<String> { Ok(p.to_string()) };
        assert!(matches!(ask(&mut s, "   ", None, &echo), Err(BudgetError::InvalidInput(_))));
        assert_eq!(s.messages().len(), 1);
    }
}
