use std::rc::Rc;

use yew::Reducible;

use super::timing::RunStep;
use super::visibility::Visibility;
use super::wall::WallLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing animating; waiting for the section to enter the band.
    #[default]
    Idle,
    /// Bricks are flying in.
    Assembling,
    /// Title words are rising.
    RevealingTitle,
    /// Tagline is visible and may cycle.
    Shown,
}

/// State of the hero choreography. Timer-driven actions carry the run (or
/// cycle) they were scheduled for; anything from an older run is dropped, so
/// bumping the run interrupts whatever was in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceState {
    pub run: u32,
    pub stage: Stage,
    pub layout: WallLayout,
    pub line_count: usize,
    pub line_index: usize,
    /// Bumped whenever a tagline (re)appears, to restart its letter animation.
    pub line_generation: u32,
    /// The visible line replaced an earlier one in this run.
    pub line_cycled: bool,
    pub wall_visible: bool,
    pub wall_built: bool,
    pub title_visible: bool,
    pub text_visible: bool,
    pub cycle: u32,
    pub cycling_out: bool,
    pub paused: bool,
    pub in_view: bool,
    pub entered: bool,
    pub restart_pending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SequenceAction {
    /// Content or heading size changed. Does not start anything by itself.
    Configure { layout: WallLayout, line_count: usize },
    Visibility(Visibility),
    Step { run: u32, step: RunStep },
    /// Mount-time fallback for a section that never entered the band.
    Fallback { run: u32 },
    /// Delayed restart after `EnterBack`.
    Restart { run: u32 },
    CycleTick,
    CycleOutDone { cycle: u32 },
    Pause,
    Resume,
}

impl SequenceState {
    pub fn new(layout: WallLayout, line_count: usize) -> Self {
        Self {
            layout,
            line_count,
            ..Default::default()
        }
    }

    pub fn can_cycle(&self) -> bool {
        self.stage == Stage::Shown
            && self.text_visible
            && self.in_view
            && !self.paused
            && !self.cycling_out
            && self.line_count > 1
    }

    fn begin_run(&mut self) {
        self.run += 1;
        self.stage = Stage::Assembling;
        self.wall_visible = true;
        self.wall_built = false;
        self.title_visible = false;
        self.text_visible = false;
        self.cycling_out = false;
        self.restart_pending = false;
        self.line_cycled = false;
        if self.line_index >= self.line_count {
            self.line_index = 0;
        }
    }

    fn reset(&mut self) {
        self.run += 1;
        self.stage = Stage::Idle;
        self.wall_built = false;
        self.title_visible = false;
        self.text_visible = false;
        self.cycling_out = false;
        self.restart_pending = false;
        self.line_cycled = false;
    }

    fn force_show(&mut self) {
        self.stage = Stage::Shown;
        self.title_visible = true;
        if !self.text_visible {
            self.text_visible = true;
            self.line_generation += 1;
        }
    }

    /// Applies one action. Actions that do not apply in the current state
    /// leave it unchanged.
    pub fn apply(&mut self, action: SequenceAction) {
        match action {
            SequenceAction::Configure { layout, line_count } => {
                self.layout = layout;
                self.line_count = line_count;
                if self.line_index >= line_count {
                    self.line_index = 0;
                }
            }
            SequenceAction::Visibility(Visibility::Enter) => {
                self.in_view = true;
                let first_entry = !self.entered;
                self.entered = true;
                // copy forced in by the mount fallback still gets its intro
                let running = matches!(self.stage, Stage::Assembling | Stage::RevealingTitle);
                if self.stage == Stage::Idle || (first_entry && !running) {
                    self.begin_run();
                }
            }
            SequenceAction::Visibility(Visibility::Leave) => {
                self.in_view = false;
                self.cycling_out = false;
            }
            SequenceAction::Visibility(Visibility::EnterBack) => {
                self.in_view = true;
                self.entered = true;
                self.reset();
                self.wall_visible = false;
                self.line_index = 0;
                self.restart_pending = true;
            }
            SequenceAction::Visibility(Visibility::LeaveBack) => {
                self.in_view = false;
                self.reset();
                self.wall_visible = false;
            }
            SequenceAction::Restart { run } => {
                if run == self.run && self.restart_pending && self.in_view {
                    self.begin_run();
                }
            }
            SequenceAction::Step { run, step } => {
                if run != self.run {
                    return;
                }
                match step {
                    RunStep::WallHalfBuilt if self.stage == Stage::Assembling => {
                        self.stage = Stage::RevealingTitle;
                        self.title_visible = true;
                    }
                    RunStep::TitleRevealed if self.stage == Stage::RevealingTitle => {
                        self.force_show();
                    }
                    RunStep::WallBuilt if self.stage != Stage::Idle => {
                        self.wall_built = true;
                    }
                    RunStep::StrongFallback if self.stage != Stage::Idle && !self.wall_built => {
                        self.force_show();
                    }
                    _ => {}
                }
            }
            SequenceAction::Fallback { run } => {
                if run == self.run && !self.entered {
                    self.force_show();
                }
            }
            SequenceAction::CycleTick => {
                if self.can_cycle() {
                    self.cycle += 1;
                    self.cycling_out = true;
                }
            }
            SequenceAction::CycleOutDone { cycle } => {
                if cycle == self.cycle && self.cycling_out {
                    self.cycling_out = false;
                    if self.line_count > 0 {
                        self.line_index = (self.line_index + 1) % self.line_count;
                    }
                    self.line_generation += 1;
                    self.line_cycled = true;
                }
            }
            SequenceAction::Pause => {
                self.paused = true;
                self.cycling_out = false;
            }
            SequenceAction::Resume => {
                self.paused = false;
            }
        }
    }
}

impl Reducible for SequenceState {
    type Action = SequenceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Splits a tagline into per-letter strings, keeping spaces visible.
pub fn letters(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c == ' ' { '\u{00A0}'.to_string() } else { c.to_string() })
        .collect()
}
