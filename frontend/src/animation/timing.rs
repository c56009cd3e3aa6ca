//! Durations of the hero choreography, in milliseconds.

use super::wall::WallLayout;

pub const BRICK_FLIGHT_MS: u32 = 1200;
pub const BRICK_STAGGER_MS: u32 = 18;

pub const TITLE_WORD_MS: u32 = 800;
pub const TITLE_STAGGER_MS: u32 = 200;

pub const LETTER_MS: u32 = 800;
pub const LETTER_STAGGER_MS: u32 = 30;

pub const CYCLE_INTERVAL_MS: u32 = 3000;
pub const CYCLE_OUT_MS: u32 = 500;
pub const CYCLE_IN_MS: u32 = 500;
pub const CYCLE_LETTER_MS: u32 = 600;
pub const CYCLE_LETTER_STAGGER_MS: u32 = 20;

/// Force-show the copy if the section never scrolled into view.
pub const FALLBACK_MS: u32 = 3000;
/// Force-show the copy if a run's wall has not finished by then.
pub const STRONG_FALLBACK_MS: u32 = 2000;
/// Pause before restarting after scrolling back into the section.
pub const REENTRY_DELAY_MS: u32 = 50;

pub fn brick_delay_ms(index: usize) -> u32 {
    index as u32 * BRICK_STAGGER_MS
}

/// Time at which the trigger brick lands and the title starts rising.
pub fn half_built_ms(layout: &WallLayout) -> u32 {
    brick_delay_ms(layout.trigger_index()) + BRICK_FLIGHT_MS
}

/// Time at which the last brick lands.
pub fn wall_built_ms(layout: &WallLayout) -> u32 {
    brick_delay_ms(layout.len().saturating_sub(1)) + BRICK_FLIGHT_MS
}

pub fn title_reveal_ms(words: usize) -> u32 {
    TITLE_WORD_MS + words.saturating_sub(1) as u32 * TITLE_STAGGER_MS
}

/// Steps of one run that are driven by timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    WallHalfBuilt,
    TitleRevealed,
    WallBuilt,
    StrongFallback,
}

/// Every timed step of a run, as offsets from the run's start, in firing order.
pub fn run_schedule(layout: &WallLayout, title_words: usize) -> Vec<(u32, RunStep)> {
    let half = half_built_ms(layout);
    let mut steps = vec![
        (half, RunStep::WallHalfBuilt),
        (half + title_reveal_ms(title_words), RunStep::TitleRevealed),
        (wall_built_ms(layout), RunStep::WallBuilt),
        (STRONG_FALLBACK_MS, RunStep::StrongFallback),
    ];
    steps.sort_by_key(|(at, _)| *at);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_starts_when_middle_brick_lands() {
        let layout = WallLayout { rows: 2, cols: 5 };
        assert_eq!(half_built_ms(&layout), 5 * 18 + 1200);
        assert_eq!(wall_built_ms(&layout), 9 * 18 + 1200);
    }

    #[test]
    fn title_reveal_staggers_words() {
        assert_eq!(title_reveal_ms(0), 800);
        assert_eq!(title_reveal_ms(1), 800);
        assert_eq!(title_reveal_ms(3), 1200);
    }

    #[test]
    fn schedule_is_in_firing_order() {
        let schedule = run_schedule(&WallLayout { rows: 2, cols: 4 }, 2);
        let steps: Vec<RunStep> = schedule.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            steps,
            vec![
                RunStep::WallHalfBuilt,
                RunStep::WallBuilt,
                RunStep::StrongFallback,
                RunStep::TitleRevealed,
            ]
        );
        assert!(schedule.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
