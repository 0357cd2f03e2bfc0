//! Interactive chat session loop.

use super::{ChatModel, SessionStore, Turn};
use crate::cli::Output;
use crate::error::Result;
use console::style;
use futures::StreamExt;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Session identifier used for the single interactive session per run.
const SESSION_ID: &str = "user_session";

/// Inputs that end the session.
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// System prompt grounding every answer in the transcript.
fn build_system_prompt(transcript: &str) -> String {
    format!(
        "You are a helpful assistant. You have been provided with the subtitles \
         of a video. Answer the user's questions based on the video content. \
         If the answer is not in the video, say so.\n\nVideo Subtitles:\n{}",
        transcript
    )
}

/// Result of submitting one line of user input.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Sentinel command; the session is over, nothing was appended.
    Exit,
    /// Whitespace-only input; no model call, no history mutation.
    Skipped,
    /// Completed exchange; the full answer, also appended to history.
    Answered(String),
    /// Turn-local failure; history is untouched and the session continues.
    Failed(String),
}

/// One grounded conversation over a fixed transcript.
pub struct ChatSession {
    model: Arc<dyn ChatModel>,
    store: SessionStore,
    system_prompt: String,
}

impl ChatSession {
    /// Create a session grounded in `transcript`.
    ///
    /// The caller is expected to have already rejected a missing transcript;
    /// an empty string is tolerated silently.
    pub fn new(model: Arc<dyn ChatModel>, store: SessionStore, transcript: &str) -> Self {
        Self {
            model,
            store,
            system_prompt: build_system_prompt(transcript),
        }
    }

    /// The dialogue history accumulated so far.
    pub fn history(&self) -> &[Turn] {
        self.store.history(SESSION_ID)
    }

    /// Submit one line of input, forwarding answer chunks to `on_chunk` as
    /// they arrive.
    ///
    /// History is only mutated at the boundary of a completed exchange: on
    /// success exactly two turns are appended (human, then AI); on failure or
    /// cancellation nothing is.
    pub async fn submit<F>(&mut self, input: &str, mut on_chunk: F) -> TurnOutcome
    where
        F: FnMut(&str),
    {
        let input = input.trim();

        if EXIT_COMMANDS.iter().any(|c| input.eq_ignore_ascii_case(c)) {
            return TurnOutcome::Exit;
        }

        if input.is_empty() {
            return TurnOutcome::Skipped;
        }

        let history = self.store.history(SESSION_ID);
        let mut stream = match self.model.stream_reply(&self.system_prompt, history, input).await {
            Ok(stream) => stream,
            Err(e) => return TurnOutcome::Failed(e.to_string()),
        };

        let mut answer = String::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(text) => {
                    on_chunk(&text);
                    answer.push_str(&text);
                }
                Err(e) => return TurnOutcome::Failed(e.to_string()),
            }
        }

        debug!("Completed turn, answer is {} chars", answer.len());

        let history = self.store.history_mut(SESSION_ID);
        history.push(Turn::human(input));
        history.push(Turn::ai(answer.clone()));

        TurnOutcome::Answered(answer)
    }

    /// Run the interactive loop until a sentinel command, end of input, or
    /// Ctrl-C.
    ///
    /// Ctrl-C mid-stream drops the in-flight turn without appending it.
    pub async fn run(&mut self) -> Result<()> {
        println!(
            "{}",
            style("Chat session started! Type 'exit' or 'quit' to end.")
                .green()
                .bold()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = std::io::stdout();

        loop {
            print!("{} ", style("You:").blue().bold());
            stdout.flush()?;

            let line = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    Output::info("Exiting...");
                    return Ok(());
                }
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                // stdin closed
                println!();
                return Ok(());
            };

            let mut answering = false;
            let turn = self.submit(&line, |chunk| {
                if !answering {
                    print!("{} ", style("AI:").green().bold());
                    answering = true;
                }
                print!("{}", chunk);
                let _ = std::io::stdout().flush();
            });

            let outcome = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    Output::info("Exiting...");
                    return Ok(());
                }
                outcome = turn => outcome,
            };

            match outcome {
                TurnOutcome::Exit => {
                    info!("Session ended by user");
                    Output::info("Goodbye!");
                    return Ok(());
                }
                TurnOutcome::Skipped => continue,
                TurnOutcome::Answered(_) => {
                    println!();
                    println!();
                }
                TurnOutcome::Failed(cause) => {
                    if answering {
                        println!();
                    }
                    Output::error(&format!("Error: {}", cause));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChunkStream, Role};
    use crate::error::AskVideoError;
    use async_trait::async_trait;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Model that replies with fixed chunks, failing the first `fail_first`
    /// calls before the stream starts.
    struct ScriptedModel {
        chunks: Vec<&'static str>,
        fail_first: usize,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn answering(chunks: Vec<&'static str>) -> Self {
            Self {
                chunks,
                fail_first: 0,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_once_then(chunks: Vec<&'static str>) -> Self {
            Self {
                chunks,
                fail_first: 1,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn stream_reply(
            &self,
            _system: &str,
            _history: &[Turn],
            _question: &str,
        ) -> crate::error::Result<ChunkStream> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(AskVideoError::OpenAI("simulated provider outage".into()));
            }
            let items: Vec<crate::error::Result<String>> =
                self.chunks.iter().map(|c| Ok(c.to_string())).collect();
            Ok(Box::pin(stream::iter(items)))
        }
    }

    /// Model whose stream fails partway through.
    struct MidStreamFailure;

    #[async_trait]
    impl ChatModel for MidStreamFailure {
        async fn stream_reply(
            &self,
            _system: &str,
            _history: &[Turn],
            _question: &str,
        ) -> crate::error::Result<ChunkStream> {
            let items: Vec<crate::error::Result<String>> = vec![
                Ok("partial".to_string()),
                Err(AskVideoError::OpenAI("connection reset".into())),
            ];
            Ok(Box::pin(stream::iter(items)))
        }
    }

    fn session(model: impl ChatModel + 'static) -> ChatSession {
        ChatSession::new(Arc::new(model), SessionStore::new(), "[00:00] hello")
    }

    #[tokio::test]
    async fn test_exit_as_first_input_appends_nothing() {
        let model = ScriptedModel::answering(vec!["never"]);
        let calls = Arc::new(model);
        let mut session =
            ChatSession::new(calls.clone(), SessionStore::new(), "[00:00] hello");

        let outcome = session.submit("exit", |_| {}).await;
        assert!(matches!(outcome, TurnOutcome::Exit));
        assert!(session.history().is_empty());
        assert_eq!(calls.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sentinels_are_case_insensitive() {
        let mut session = session(ScriptedModel::answering(vec![]));
        assert!(matches!(session.submit("QUIT", |_| {}).await, TurnOutcome::Exit));
        assert!(matches!(session.submit("  Exit  ", |_| {}).await, TurnOutcome::Exit));
    }

    #[tokio::test]
    async fn test_whitespace_input_is_a_no_op() {
        let model = Arc::new(ScriptedModel::answering(vec!["never"]));
        let mut session =
            ChatSession::new(model.clone(), SessionStore::new(), "[00:00] hello");

        let outcome = session.submit("   \t ", |_| {}).await;
        assert!(matches!(outcome, TurnOutcome::Skipped));
        assert!(session.history().is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chunks_streamed_in_order_and_accumulated() {
        let mut session = session(ScriptedModel::answering(vec!["The ", "video ", "says hi."]));

        let mut seen = Vec::new();
        let outcome = session
            .submit("what does it say?", |chunk| seen.push(chunk.to_string()))
            .await;

        match outcome {
            TurnOutcome::Answered(answer) => assert_eq!(answer, "The video says hi."),
            other => panic!("expected Answered, got {:?}", other),
        }
        assert_eq!(seen, vec!["The ", "video ", "says hi."]);

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Human);
        assert_eq!(history[0].content, "what does it say?");
        assert_eq!(history[1].role, Role::Ai);
        assert_eq!(history[1].content, "The video says hi.");
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_history_untouched() {
        let mut session = session(ScriptedModel::failing_once_then(vec!["ok now"]));

        let outcome = session.submit("first question", |_| {}).await;
        assert!(matches!(outcome, TurnOutcome::Failed(_)));
        assert!(session.history().is_empty());

        let outcome = session.submit("second question", |_| {}).await;
        assert!(matches!(outcome, TurnOutcome::Answered(_)));

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Human);
        assert_eq!(history[0].content, "second question");
        assert_eq!(history[1].role, Role::Ai);
    }

    #[tokio::test]
    async fn test_mid_stream_failure_discards_partial_answer() {
        let mut session = session(MidStreamFailure);

        let mut seen = String::new();
        let outcome = session.submit("question", |chunk| seen.push_str(chunk)).await;

        assert!(matches!(outcome, TurnOutcome::Failed(_)));
        // The partial chunk was surfaced but never committed.
        assert_eq!(seen, "partial");
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_grows_two_turns_per_exchange() {
        let mut session = session(ScriptedModel::answering(vec!["answer"]));

        session.submit("one", |_| {}).await;
        session.submit("two", |_| {}).await;

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "one");
        assert_eq!(history[2].content, "two");
    }
}
