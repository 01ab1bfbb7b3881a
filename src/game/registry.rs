//! Client-keyed session registry
//!
//! Each client gets its own [`GameController`]; nothing mutable is shared
//! between clients except the sink, which only ever receives finished records.
//! A client's first access creates a round with the default difficulty.

use super::controller::{GameController, SessionView};
use crate::core::{Difficulty, GameError, GuessOutcome};
use crate::persistence::ResultSink;
use rustc_hash::FxHashMap;

/// Owns every client's controller and the configured sink
pub struct SessionRegistry {
    controllers: FxHashMap<String, GameController>,
    sink: Box<dyn ResultSink>,
    default_difficulty: Difficulty,
    seed: Option<u64>,
    /// Clients created so far; never decreases, so derived seeds stay unique
    clients_created: u64,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(sink: Box<dyn ResultSink>, default_difficulty: Difficulty) -> Self {
        Self {
            controllers: FxHashMap::default(),
            sink,
            default_difficulty,
            seed: None,
            clients_created: 0,
        }
    }

    /// Make secrets reproducible; each new client derives its own seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Controller for `client`, created on first access
    fn entry<'a>(
        controllers: &'a mut FxHashMap<String, GameController>,
        client: &str,
        clients_created: &mut u64,
        default_difficulty: Difficulty,
        seed: Option<u64>,
    ) -> &'a mut GameController {
        controllers.entry(client.to_string()).or_insert_with(|| {
            log::debug!("first load for client '{client}'");
            let index = *clients_created;
            *clients_created += 1;
            match seed {
                Some(seed) => {
                    GameController::with_seed(default_difficulty, seed.wrapping_add(index))
                }
                None => GameController::new(default_difficulty),
            }
        })
    }

    fn controller_mut(&mut self, client: &str) -> &mut GameController {
        Self::entry(
            &mut self.controllers,
            client,
            &mut self.clients_created,
            self.default_difficulty,
            self.seed,
        )
    }

    /// Controller for `client`, if it was ever accessed
    #[must_use]
    pub fn controller(&self, client: &str) -> Option<&GameController> {
        self.controllers.get(client)
    }

    pub fn choose_difficulty(&mut self, client: &str, difficulty: Difficulty) {
        self.controller_mut(client).choose_difficulty(difficulty);
    }

    pub fn start_or_reset(&mut self, client: &str) {
        self.controller_mut(client).start_or_reset();
    }

    pub fn play_again(&mut self, client: &str) {
        self.controller_mut(client).play_again();
    }

    /// Submit a guess for `client`, saving the round through the sink when it ends
    ///
    /// # Errors
    ///
    /// See [`GameController::submit_guess`].
    pub fn submit_guess(
        &mut self,
        client: &str,
        value: u32,
        alias: &str,
    ) -> Result<GuessOutcome, GameError> {
        let sink = self.sink.as_ref();
        let controller = Self::entry(
            &mut self.controllers,
            client,
            &mut self.clients_created,
            self.default_difficulty,
            self.seed,
        );
        controller.submit_guess(value, alias, sink)
    }

    /// Persist the finished round of `client` if not done yet
    #[cfg(test)]
    fn record_result(&mut self, client: &str, alias: &str) {
        let sink = self.sink.as_ref();
        let controller = Self::entry(
            &mut self.controllers,
            client,
            &mut self.clients_created,
            self.default_difficulty,
            self.seed,
        );
        controller.record_result(alias, sink);
    }

    /// Replace the round of `client` with one whose secret is known
    #[cfg(test)]
    pub(crate) fn replace_session(&mut self, client: &str, session: crate::core::GameSession) {
        self.controller_mut(client).replace_session(session);
    }

    /// Snapshot for rendering; the first view of a client starts its round
    pub fn view(&mut self, client: &str) -> SessionView {
        self.controller_mut(client).view()
    }

    /// Drop all state of `client`
    pub fn forget(&mut self, client: &str) -> bool {
        self.controllers.remove(client).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Description of the configured sink
    #[must_use]
    pub fn sink_description(&self) -> String {
        self.sink.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, ResultRecord};
    use crate::persistence::PersistenceError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<ResultRecord>>>);

    impl ResultSink for SharedSink {
        fn append(&self, record: &ResultRecord) -> Result<(), PersistenceError> {
            self.0.borrow_mut().push(record.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "shared".to_string()
        }
    }

    fn registry() -> (SessionRegistry, SharedSink) {
        let sink = SharedSink::default();
        let registry = SessionRegistry::new(Box::new(sink.clone()), Difficulty::Medium).with_seed(5);
        (registry, sink)
    }

    fn fix_secret(registry: &mut SessionRegistry, client: &str, secret: u32) {
        let profile = *Difficulty::Medium.profile();
        registry.replace_session(client, GameSession::with_secret(&profile, secret));
    }

    #[test]
    fn first_load_creates_medium_round() {
        let (mut registry, _) = registry();
        assert!(registry.is_empty());

        let view = registry.view("alice");
        assert_eq!(registry.len(), 1);
        assert_eq!(view.range_max, 500);
        assert_eq!(view.max_attempts, 6);
        assert_eq!(view.selected, Difficulty::Medium);
    }

    #[test]
    fn clients_are_isolated() {
        let (mut registry, sink) = registry();
        fix_secret(&mut registry, "alice", 250);
        fix_secret(&mut registry, "bob", 10);

        registry.submit_guess("alice", 100, "alice").unwrap();
        registry.choose_difficulty("bob", Difficulty::Easy);
        registry.start_or_reset("bob");

        let alice = registry.view("alice");
        let bob = registry.view("bob");
        assert_eq!(alice.attempts_left, 5);
        assert_eq!(alice.lines.len(), 1);
        assert_eq!(bob.range_max, 100);
        assert!(bob.lines.is_empty());

        registry.submit_guess("alice", 250, "alice").unwrap();
        assert!(registry.view("alice").game_over);
        assert!(!registry.view("bob").game_over);
        assert_eq!(sink.0.borrow().len(), 1);
    }

    #[test]
    fn record_result_through_registry_is_idempotent() {
        let (mut registry, sink) = registry();
        fix_secret(&mut registry, "alice", 7);
        registry.submit_guess("alice", 7, "  ").unwrap();

        registry.record_result("alice", "  ");
        registry.record_result("alice", "  ");

        let records = sink.0.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].alias, crate::core::DEFAULT_ALIAS);
    }

    #[test]
    fn forget_drops_client_state() {
        let (mut registry, _) = registry();
        registry.view("alice");
        assert!(registry.forget("alice"));
        assert!(!registry.forget("alice"));
        assert!(registry.controller("alice").is_none());
    }

    #[test]
    fn forgotten_client_does_not_free_its_seed() {
        let (mut registry, _) = registry();
        registry.view("alice");
        registry.view("bob");
        registry.forget("alice");
        registry.view("carol");

        // Third client ever created: base seed 5 plus index 2
        let expected = GameController::with_seed(Difficulty::Medium, 7);
        let carol = registry.controller("carol").unwrap();
        assert_eq!(
            format!("{:?}", carol.session()),
            format!("{:?}", expected.session())
        );
    }

    #[test]
    fn play_again_through_registry() {
        let (mut registry, _) = registry();
        fix_secret(&mut registry, "alice", 7);
        registry.submit_guess("alice", 7, "").unwrap();
        registry.play_again("alice");

        let view = registry.view("alice");
        assert!(!view.game_over);
        assert_eq!(view.attempts_left, 6);
    }
}
