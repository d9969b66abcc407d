//! Session state and act sequencing
//!
//! A [`Session`] owns the current act, the active act's view state, and the
//! timer queue. Only one act's view exists at a time; moving to the next act
//! drops the old view and releases every timer it scheduled.
//!
//! The act triggers (`complete_targets`, `confirm`) are crate-private and
//! only called from the active view's input handling, so a trigger for the
//! wrong act has no path to run.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::act::Act;
use super::clock::{Fired, Millis, Scope, TimerQueue};
use super::evasive::{DeclineButton, DodgeOutcome, EvasionPhase, Viewport};
use super::finale::FinaleScene;
use super::prompt::TypedPrompt;
use super::question::QuestionScene;
use super::rng::{RandomSource, RngState};
use super::targets::{PopOutcome, Target, TargetField};
use crate::settings::Settings;

/// Timer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Pause is over, show the question
    AdvanceToQuestion,
    /// Popped balloon finished its exit animation
    RemoveTarget(u32),
    /// Typewriter interval
    TypeTick,
    ShowDecorations,
    ShowButtons,
    HideAcknowledgement,
    ShowSecondLine,
}

/// What the renderer needs to react to, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Start the act's entrance transition, lasting `enter_ms`
    Mounted { act: Act, enter_ms: Millis },
    /// Start the act's exit transition, lasting `exit_ms`
    Unmounted { act: Act, exit_ms: Millis },
    TargetPopped { id: u32, remaining: usize },
    TargetRemoved { id: u32 },
    PromptAdvanced { text: String },
    TypingFinished,
    DecorationsShown,
    ButtonsShown,
    DeclineMoved { pos: Vec2 },
    DeclineDisengaged,
    AcknowledgementShown { at: Option<Vec2> },
    AcknowledgementHidden,
    SecondLineShown,
}

/// View state of the mounted act
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "act", rename_all = "snake_case")]
pub enum Stage {
    Balloons(TargetField),
    Pause,
    Question(QuestionScene),
    Finale(FinaleScene),
}

impl Stage {
    pub fn act(&self) -> Act {
        match self {
            Stage::Balloons(_) => Act::Balloons,
            Stage::Pause => Act::Pause,
            Stage::Question(_) => Act::Question,
            Stage::Finale(_) => Act::Finale,
        }
    }
}

/// The whole show
#[derive(Debug)]
pub struct Session<R: RandomSource = Pcg32> {
    pub(crate) settings: Settings,
    pub(crate) rng: R,
    /// Seed, when the source is the default PCG
    pub(crate) rng_state: Option<RngState>,
    pub(crate) stage: Stage,
    /// Scope of the mounted view's timers
    pub(crate) scope: Scope,
    pub(crate) timers: TimerQueue<TimerEvent>,
    pub(crate) viewport: Viewport,
    pub(crate) events: Vec<SessionEvent>,
}

impl Session<Pcg32> {
    /// New session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut session = Self::with_source(settings, rng_state.to_rng());
        session.rng_state = Some(rng_state);
        session
    }
}

impl<R: RandomSource> Session<R> {
    /// New session drawing all randomness from `rng`
    pub fn with_source(settings: Settings, mut rng: R) -> Self {
        let field = TargetField::generate(&mut rng);
        Self::with_targets(settings, rng, field)
    }

    pub(crate) fn with_targets(settings: Settings, rng: R, field: TargetField) -> Self {
        // Settings built in code skip validation; clamp here too
        let viewport = Viewport::new(settings.viewport.width, settings.viewport.height);
        let mut session = Self {
            settings,
            rng,
            rng_state: None,
            stage: Stage::Balloons(field),
            scope: Scope::ROOT.next(),
            timers: TimerQueue::new(),
            viewport,
            events: Vec::new(),
        };
        log::info!("Session started in act {}", Act::Balloons);
        session.events.push(SessionEvent::Mounted {
            act: Act::Balloons,
            enter_ms: Act::Balloons.enter_ms(),
        });

        // A field with nothing to pop is done before it starts
        let cleared = match &mut session.stage {
            Stage::Balloons(field) => field.take_cleared() == PopOutcome::Cleared,
            _ => false,
        };
        if cleared {
            session.complete_targets();
        }
        session
    }

    pub fn act(&self) -> Act {
        self.stage.act()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng_state.map(|s| s.seed)
    }

    /// Current simulated time
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Host viewport changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Timers still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swap the mounted view, releasing the old view's timers
    pub(crate) fn mount(&mut self, stage: Stage) {
        let leaving = self.stage.act();
        let arriving = stage.act();
        let released = self.timers.release(self.scope);
        log::info!(
            "Act {} -> {} at {}ms ({} pending timers released)",
            leaving,
            arriving,
            self.now(),
            released
        );

        self.events.push(SessionEvent::Unmounted {
            act: leaving,
            exit_ms: leaving.exit_ms(),
        });
        self.scope = self.scope.next();
        self.stage = stage;
        self.events.push(SessionEvent::Mounted {
            act: arriving,
            enter_ms: arriving.enter_ms(),
        });
    }

    /// All balloons popped: pause, then show the question
    pub(crate) fn complete_targets(&mut self) -> bool {
        if self.act() != Act::Balloons {
            log::debug!("complete_targets ignored during {}", self.act());
            return false;
        }
        self.mount(Stage::Pause);
        self.timers.schedule(
            Scope::ROOT,
            self.settings.timings.pause_ms,
            TimerEvent::AdvanceToQuestion,
        );
        true
    }

    fn enter_question(&mut self) {
        if self.act() != Act::Pause {
            log::warn!("Question requested during {}", self.act());
            return;
        }
        let scene = QuestionScene::new(
            TypedPrompt::new(self.settings.prompt.clone()),
            DeclineButton::new(self.settings.max_dodges),
        );
        let already_typed = scene.prompt.is_complete();
        self.mount(Stage::Question(scene));

        if already_typed {
            self.finish_typing();
            return;
        }
        let timer = self.timers.schedule_every(
            self.scope,
            self.settings.timings.type_interval_ms,
            TimerEvent::TypeTick,
        );
        if let Stage::Question(scene) = &mut self.stage {
            scene.typing_timer = Some(timer);
        }
    }

    /// Yes pressed: straight to the finale
    pub(crate) fn confirm(&mut self) -> bool {
        match &self.stage {
            Stage::Question(scene) if scene.accepts_buttons() => {}
            _ => {
                log::debug!("confirm ignored during {}", self.act());
                return false;
            }
        }
        let finale = FinaleScene::generate(&mut self.rng);
        self.mount(Stage::Finale(finale));
        self.timers.schedule(
            self.scope,
            self.settings.timings.second_line_ms,
            TimerEvent::ShowSecondLine,
        );
        true
    }

    /// Pop a balloon in the balloons act
    pub(crate) fn pop(&mut self, id: u32) -> bool {
        let Stage::Balloons(field) = &mut self.stage else {
            return false;
        };
        let outcome = field.pop(id);
        let remaining = field.remaining();
        match outcome {
            PopOutcome::Ignored => return false,
            PopOutcome::Popped { .. } | PopOutcome::Cleared => {
                log::debug!("Popped target {} ({} left)", id, remaining);
                self.events
                    .push(SessionEvent::TargetPopped { id, remaining });
                self.timers.schedule(
                    self.scope,
                    self.settings.timings.pop_removal_ms,
                    TimerEvent::RemoveTarget(id),
                );
            }
        }
        if outcome == PopOutcome::Cleared {
            log::info!("All targets popped at {}ms", self.now());
            self.complete_targets();
        }
        true
    }

    /// Hover/touch on the decline button
    pub(crate) fn attempt_decline(&mut self) -> bool {
        let Stage::Question(scene) = &mut self.stage else {
            return false;
        };
        if !scene.decline_reachable() {
            return false;
        }
        let outcome = scene.decline.attempt_interact(
            &self.viewport,
            self.settings.decline_padding,
            &mut self.rng,
        );
        match outcome {
            DodgeOutcome::Moved(pos) => {
                log::debug!(
                    "Decline dodged to ({:.0}, {:.0}), dodge {}",
                    pos.x,
                    pos.y,
                    scene.decline.dodges()
                );
                self.events.push(SessionEvent::DeclineMoved { pos });
                true
            }
            DodgeOutcome::Disengaged => {
                log::info!("Decline button gave up after {} dodges", scene.decline.dodges());
                let at = scene.decline.acknowledgement_anchor();
                self.events.push(SessionEvent::DeclineDisengaged);
                self.events.push(SessionEvent::AcknowledgementShown { at });
                self.timers.schedule(
                    self.scope,
                    self.settings.timings.acknowledgement_ms,
                    TimerEvent::HideAcknowledgement,
                );
                true
            }
            DodgeOutcome::Ignored => false,
        }
    }

    fn finish_typing(&mut self) {
        let Stage::Question(scene) = &mut self.stage else {
            return;
        };
        if let Some(timer) = scene.typing_timer.take() {
            self.timers.cancel(timer);
        }
        log::debug!("Prompt typed at {}ms", self.timers.now());
        self.events.push(SessionEvent::TypingFinished);
        let timings = &self.settings.timings;
        self.timers
            .schedule(self.scope, timings.decorations_delay_ms, TimerEvent::ShowDecorations);
        self.timers
            .schedule(self.scope, timings.buttons_delay_ms, TimerEvent::ShowButtons);
    }

    /// Run a timer that came due
    pub(crate) fn fire(&mut self, fired: Fired<TimerEvent>) {
        if fired.scope != Scope::ROOT && fired.scope != self.scope {
            log::warn!(
                "Dropping stale timer {:?} from a torn-down view",
                fired.event
            );
            return;
        }

        if fired.event == TimerEvent::AdvanceToQuestion {
            self.enter_question();
            return;
        }

        match (fired.event, &mut self.stage) {
            (TimerEvent::RemoveTarget(id), Stage::Balloons(field)) => {
                if field.remove(id) {
                    self.events.push(SessionEvent::TargetRemoved { id });
                }
            }
            (TimerEvent::TypeTick, Stage::Question(scene)) => {
                let done = scene.prompt.advance();
                self.events.push(SessionEvent::PromptAdvanced {
                    text: scene.prompt.text().to_string(),
                });
                if done {
                    self.finish_typing();
                }
            }
            (TimerEvent::ShowDecorations, Stage::Question(scene)) => {
                scene.decorations_visible = true;
                self.events.push(SessionEvent::DecorationsShown);
            }
            (TimerEvent::ShowButtons, Stage::Question(scene)) => {
                scene.buttons_visible = true;
                self.events.push(SessionEvent::ButtonsShown);
            }
            (TimerEvent::HideAcknowledgement, Stage::Question(scene)) => {
                if scene.decline.hide_acknowledgement() {
                    self.events.push(SessionEvent::AcknowledgementHidden);
                }
            }
            (TimerEvent::ShowSecondLine, Stage::Finale(finale)) => {
                finale.second_line_visible = true;
                self.events.push(SessionEvent::SecondLineShown);
            }
            (event, stage) => {
                log::warn!("Timer {:?} has no handler in act {}", event, stage.act());
            }
        }
    }

    /// Serializable picture of what is on screen
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot {
            act: self.act(),
            now: self.now(),
            targets: Vec::new(),
            hint_visible: false,
            prompt: None,
            finale: None,
        };
        match &self.stage {
            Stage::Balloons(field) => {
                snapshot.targets = field.visible().to_vec();
                snapshot.hint_visible = field.hint_visible();
            }
            Stage::Pause => {}
            Stage::Question(scene) => {
                snapshot.prompt = Some(PromptView {
                    text: scene.prompt.text().to_string(),
                    caret_visible: scene.prompt.caret_visible(),
                    decorations_visible: scene.decorations_visible,
                    buttons_visible: scene.buttons_visible,
                    decline_phase: scene.decline.phase(),
                    decline_position: scene.decline.position(),
                    acknowledgement: scene.decline.acknowledgement_anchor(),
                });
            }
            Stage::Finale(finale) => snapshot.finale = Some(finale.clone()),
        }
        snapshot
    }
}

/// Question act as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptView {
    pub text: String,
    pub caret_visible: bool,
    pub decorations_visible: bool,
    pub buttons_visible: bool,
    pub decline_phase: EvasionPhase,
    pub decline_position: Option<Vec2>,
    pub acknowledgement: Option<Vec2>,
}

/// Everything visible at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub act: Act,
    pub now: Millis,
    pub targets: Vec<Target>,
    pub hint_visible: bool,
    pub prompt: Option<PromptView>,
    pub finale: Option<FinaleScene>,
}
