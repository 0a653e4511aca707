/// Runs pattern commands found in incoming messages.
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use switchyard_core::{EventSink, MessageRef};

use crate::dice::{Dice, ThreadRngDice};
use crate::event::{PatternEvent, PatternPayload};
use crate::matcher::{PatternMatch, PatternRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternOutcome {
    NoLuck,
    Success,
    Errored,
}

pub struct PatternRunner {
    registry: PatternRegistry,
    dice: Arc<dyn Dice>,
    sink: Arc<dyn EventSink<PatternEvent>>,
}

impl PatternRunner {
    pub fn new(registry: PatternRegistry, sink: Arc<dyn EventSink<PatternEvent>>) -> Self {
        Self {
            registry,
            dice: Arc::new(ThreadRngDice),
            sink,
        }
    }

    pub fn with_dice(mut self, dice: Arc<dyn Dice>) -> Self {
        self.dice = dice;
        self
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Look for a pattern command in the message and, luck permitting, run it.
    /// `None` when nothing matched.
    pub async fn handle_message(&self, message: &MessageRef) -> Option<PatternOutcome> {
        let found = self.registry.find(&message.content).await?;
        let roll = self.dice.roll();
        let chance = found.command.chance();
        let payload = PatternPayload::new(found.command.name(), found.alias.as_str(), message.clone());

        if chance >= roll {
            Some(self.run(found, payload, message).await)
        } else {
            debug!("[Patterns] {} no luck (rolled {} > {})", payload.command, roll, chance);
            self.sink.emit(PatternEvent::NoLuck { payload, roll }).await;
            Some(PatternOutcome::NoLuck)
        }
    }

    async fn run(&self, found: PatternMatch, payload: PatternPayload, message: &MessageRef) -> PatternOutcome {
        info!("[Patterns] Running {} (triggered by '{}')", payload.command, payload.alias);
        self.sink.emit(PatternEvent::Run(payload.clone())).await;

        let started = Instant::now();
        let result = found.command.message_run(message).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        let success = result.is_ok();
        match result {
            Ok(result) => {
                self.sink
                    .emit(PatternEvent::Success {
                        payload: payload.clone(),
                        result,
                        duration_ms,
                    })
                    .await;
            }
            Err(error) => {
                warn!("[Patterns] {} failed: {:#}", payload.command, error);
                self.sink
                    .emit(PatternEvent::Error {
                        payload: payload.clone(),
                        error: Arc::new(error),
                        duration_ms,
                    })
                    .await;
            }
        }

        self.sink
            .emit(PatternEvent::Finished {
                payload,
                success,
                duration_ms,
            })
            .await;

        if success {
            PatternOutcome::Success
        } else {
            PatternOutcome::Errored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PatternCommand;
    use crate::dice::FixedDice;
    use crate::event::PatternEventKind;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<PatternEvent>>,
    }

    #[async_trait]
    impl EventSink<PatternEvent> for Recorder {
        async fn emit(&self, event: PatternEvent) {
            self.events.lock().await.push(event);
        }
    }

    impl Recorder {
        async fn kinds(&self) -> Vec<PatternEventKind> {
            self.events.lock().await.iter().map(PatternEvent::kind).collect()
        }
    }

    struct Sometimes {
        chance: u8,
        fail: bool,
    }

    #[async_trait]
    impl PatternCommand for Sometimes {
        fn name(&self) -> &str {
            "coffee"
        }

        fn chance(&self) -> u8 {
            self.chance
        }

        async fn message_run(&self, message: &MessageRef) -> Result<Value> {
            if self.fail {
                anyhow::bail!("out of beans");
            }
            Ok(json!({ "reply": format!("☕ for {}", message.author_id) }))
        }
    }

    async fn runner(chance: u8, fail: bool, roll: u8) -> (PatternRunner, Arc<Recorder>) {
        let registry = PatternRegistry::new();
        registry.register(Arc::new(Sometimes { chance, fail })).await.unwrap();
        let recorder = Arc::new(Recorder::default());
        let runner = PatternRunner::new(registry, recorder.clone()).with_dice(Arc::new(FixedDice(roll)));
        (runner, recorder)
    }

    fn message(content: &str) -> MessageRef {
        MessageRef::new("m1", "u1", content)
    }

    #[tokio::test]
    async fn unmatched_message_emits_nothing() {
        let (runner, recorder) = runner(100, false, 1).await;
        assert_eq!(runner.handle_message(&message("tea please")).await, None);
        assert!(recorder.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn success_emits_run_success_finished() {
        let (runner, recorder) = runner(50, false, 50).await;
        let outcome = runner.handle_message(&message("need COFFEE")).await;
        assert_eq!(outcome, Some(PatternOutcome::Success));
        assert_eq!(
            recorder.kinds().await,
            vec![PatternEventKind::Run, PatternEventKind::Success, PatternEventKind::Finished]
        );
        let events = recorder.events.lock().await;
        let PatternEvent::Finished { success, payload, .. } = &events[2] else {
            panic!("expected finished");
        };
        assert!(*success);
        assert_eq!(payload.alias, "coffee");
    }

    #[tokio::test]
    async fn failed_roll_is_no_luck() {
        let (runner, recorder) = runner(50, false, 51).await;
        assert_eq!(runner.handle_message(&message("coffee")).await, Some(PatternOutcome::NoLuck));
        assert_eq!(recorder.kinds().await, vec![PatternEventKind::NoLuck]);
        assert_eq!(recorder.events.lock().await[0].name(), "pattern_command_no_luck");
    }

    #[tokio::test]
    async fn failure_emits_error_then_finished() {
        let (runner, recorder) = runner(100, true, 100).await;
        assert_eq!(runner.handle_message(&message("coffee")).await, Some(PatternOutcome::Errored));
        assert_eq!(
            recorder.kinds().await,
            vec![PatternEventKind::Run, PatternEventKind::Error, PatternEventKind::Finished]
        );
        let events = recorder.events.lock().await;
        let PatternEvent::Error { error, .. } = &events[1] else {
            panic!("expected error");
        };
        assert_eq!(error.to_string(), "out of beans");
    }
}
