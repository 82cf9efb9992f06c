//! Prompt composition and short-circuit answers.
//!
//! Greetings and aggregate-score questions are answered locally. Everything
//! else is rendered into a single prompt and sent to the language model; a
//! failed model call degrades to an apology rather than an error.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, warn};

use super::ports::{Answer, AnswerSource, CompletionRequest, LanguageModel};
use super::{Role, Task, total_score};

/// Canned introduction returned for greetings.
pub const GREETING_ANSWER: &str = "Hello! I'm your delegation assistant. Ask me about the \
     tasks you have delegated or been assigned: their status, target dates, or scores.";

/// Apology returned when the language model call fails.
pub const MODEL_UNAVAILABLE_ANSWER: &str = "Sorry, I could not process your request right \
     now. Please try again in a moment.";

const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_TEMPERATURE: f32 = 0.2;

static GREETING_RE: OnceLock<Regex> = OnceLock::new();
static TOTAL_SCORE_RE: OnceLock<Regex> = OnceLock::new();

fn greeting_regex() -> &'static Regex {
    GREETING_RE.get_or_init(|| {
        // Whole words only: "hi" must not fire on "which" or "this".
        let pattern = r"(?i)\b(hello|hi|hey|how\s+are\s+you|good\s+morning|good\s+evening)\b";
        Regex::new(pattern).unwrap_or_else(|error| panic!("greeting regex failed to compile: {error}"))
    })
}

fn total_score_regex() -> &'static Regex {
    TOTAL_SCORE_RE.get_or_init(|| {
        // Substring match: plurals such as "total scores" still qualify.
        let pattern = r"(?i)total\s+score|overall\s+performance";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("total score regex failed to compile: {error}"))
    })
}

/// Questions answered without calling the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortCircuit {
    /// The question greets the assistant.
    Greeting,
    /// The question asks for the aggregate score.
    TotalScore,
}

/// Classify `question`; greetings take precedence over score questions.
///
/// # Examples
/// ```
/// use delegation_backend::domain::{ShortCircuit, detect_short_circuit};
///
/// assert_eq!(detect_short_circuit("Hey there"), Some(ShortCircuit::Greeting));
/// assert_eq!(
///     detect_short_circuit("what is my TOTAL score"),
///     Some(ShortCircuit::TotalScore)
/// );
/// assert_eq!(detect_short_circuit("which tasks are late?"), None);
/// ```
#[must_use]
pub fn detect_short_circuit(question: &str) -> Option<ShortCircuit> {
    if greeting_regex().is_match(question) {
        Some(ShortCircuit::Greeting)
    } else if total_score_regex().is_match(question) {
        Some(ShortCircuit::TotalScore)
    } else {
        None
    }
}

/// Sentence reporting a precomputed total over `task_count` tasks.
#[must_use]
pub fn total_score_answer(total: f64, task_count: usize) -> String {
    let noun = if task_count == 1 { "task" } else { "tasks" };
    format!("Your total score is {total} across {task_count} {noun}.")
}

/// One prompt line describing `task`.
#[must_use]
pub fn render_task_line(task: &Task) -> String {
    let delegatees = if task.delegatees.is_empty() {
        "none".to_owned()
    } else {
        task.delegatees
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Task: {title}, Status: {status}, Target Date: {target_date}, Score: {score}, Delegatees: {delegatees}",
        title = task.title.as_deref().unwrap_or("n/a"),
        status = task.status.as_deref().unwrap_or("n/a"),
        target_date = task.target_date,
        score = task.score,
    )
}

/// Render the full model prompt for `question` over `tasks`.
#[must_use]
pub fn render_prompt(question: &str, role: Role, tasks: &[Task]) -> String {
    let task_lines = tasks
        .iter()
        .map(render_task_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are a delegation AI assistant. Based on the user's role and the task data, \
         answer the prompt.\n\n\
         USER ROLE: {role}\n\
         TOTAL SCORE: {total}\n\
         PROMPT: {question}\n\n\
         TASK DATA:\n{task_lines}\n\n\
         Answer only from the task data above and do not speculate. Be concise. \
         If the data is not enough, explain what is missing.",
        total = total_score(tasks),
    )
}

/// Sampling parameters for model calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Provider model identifier.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Turns a question and a filtered task set into an answer.
pub struct PromptComposer<M: ?Sized> {
    model: Arc<M>,
    settings: ModelSettings,
}

impl<M: ?Sized> Clone for PromptComposer<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            settings: self.settings.clone(),
        }
    }
}

impl<M> PromptComposer<M>
where
    M: LanguageModel + ?Sized,
{
    /// Create a composer calling `model` with `settings`.
    pub fn new(model: Arc<M>, settings: ModelSettings) -> Self {
        Self { model, settings }
    }

    /// Answer `question` for a user with `role` who can see `tasks`.
    ///
    /// Never fails: model errors are logged and replaced by
    /// [`MODEL_UNAVAILABLE_ANSWER`].
    pub async fn answer(&self, question: &str, role: Role, tasks: &[Task]) -> Answer {
        match detect_short_circuit(question) {
            Some(ShortCircuit::Greeting) => {
                return Answer::new(GREETING_ANSWER, AnswerSource::Greeting);
            }
            Some(ShortCircuit::TotalScore) => {
                let text = total_score_answer(total_score(tasks), tasks.len());
                return Answer::new(text, AnswerSource::TotalScore);
            }
            None => {}
        }

        let request = CompletionRequest {
            prompt: render_prompt(question, role, tasks),
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        debug!(model = %request.model, task_count = tasks.len(), "requesting completion");

        match self.model.complete(&request).await {
            Ok(text) => Answer::new(text, AnswerSource::Model),
            Err(error) => {
                warn!(%error, model = %request.model, "language model call failed");
                Answer::new(MODEL_UNAVAILABLE_ANSWER, AnswerSource::ModelUnavailable)
            }
        }
    }
}
