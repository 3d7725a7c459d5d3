//! View state management for the career finder screen.
//!
//! This module contains the state machine that sequences answer collection,
//! the scoring request and the result display, and publishes every change
//! to the presentation layer.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::{
    is_fallback, Answers, Field, Recommendation, ScoringClient, TransitionError, TransitionResult, ViewState,
};

/// Everything an observer needs to render the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub answers: Answers,
}

/// Owner of the `Input -> Analyzing -> Result -> Input` lifecycle.
///
/// Operations are gated on the current state; calling one in the wrong
/// state returns [`TransitionError::NotAllowed`] and changes nothing.
/// Each accepted operation publishes a fresh [`ViewSnapshot`] to every
/// receiver obtained through [`ViewStateMachine::subscribe`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use career_finder::application::ViewStateMachine;
/// use career_finder::domain::{Answers, Field, Recommendation, ScoringClient, ViewState, fallback_recommendation};
///
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl ScoringClient for Offline {
///     async fn fetch_recommendation(&self, _answers: &Answers) -> Recommendation {
///         fallback_recommendation()
///     }
/// }
///
/// let mut machine = ViewStateMachine::new(Arc::new(Offline));
/// machine.update_field(Field::Like, "วาดรูป").unwrap();
/// assert_eq!(machine.answers().like, "วาดรูป");
/// assert!(matches!(machine.state(), ViewState::Input));
/// ```
pub struct ViewStateMachine {
    state: ViewState,
    answers: Answers,
    client: Arc<dyn ScoringClient>,
    publisher: watch::Sender<ViewSnapshot>,
}

impl ViewStateMachine {
    pub fn new(client: Arc<dyn ScoringClient>) -> Self {
        let (publisher, _) = watch::channel(ViewSnapshot::default());
        Self {
            state: ViewState::Input,
            answers: Answers::default(),
            client,
            publisher,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.state.recommendation()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            state: self.state.clone(),
            answers: self.answers.clone(),
        }
    }

    /// Returns a receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.publisher.subscribe()
    }

    /// Replaces one answer. Only accepted while collecting input.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> TransitionResult<()> {
        self.require_input("update_field")?;
        self.answers.set(field, value);
        self.publish();
        Ok(())
    }

    /// Sends the answers for scoring and waits for the recommendation.
    ///
    /// `Analyzing` is published before the request goes out; `Result` only
    /// after it settles. The scoring client never fails, so an accepted
    /// submission always ends in `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotAllowed`] when not in `Input`.
    pub async fn submit(&mut self) -> TransitionResult<()> {
        self.require_input("submit")?;
        self.transition(ViewState::Analyzing);

        info!(blank = self.answers.is_blank(), "submitting answers for scoring");
        let recommendation = self.client.fetch_recommendation(&self.answers).await;
        info!(degraded = is_fallback(&recommendation), "recommendation received");

        self.transition(ViewState::Result(recommendation));
        Ok(())
    }

    /// Clears the answers and the recommendation and starts over.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotAllowed`] when not in `Result`, which
    /// makes a second consecutive reset a rejected no-op.
    pub fn reset(&mut self) -> TransitionResult<()> {
        if !matches!(self.state, ViewState::Result(_)) {
            return Err(self.not_allowed("reset"));
        }
        self.answers = Answers::default();
        self.transition(ViewState::Input);
        Ok(())
    }

    fn require_input(&self, operation: &'static str) -> TransitionResult<()> {
        match self.state {
            ViewState::Input => Ok(()),
            _ => Err(self.not_allowed(operation)),
        }
    }

    fn not_allowed(&self, operation: &'static str) -> TransitionError {
        TransitionError::NotAllowed {
            operation,
            state: self.state.name(),
        }
    }

    fn transition(&mut self, next: ViewState) {
        debug!(from = self.state.name(), to = next.name(), "view transition");
        self.state = next;
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }
}
