//! The test sequencer.

use hdrcal_core::{Error, Result};
use hdrcal_display::{CalibrationState, DisplayProvider, RefreshOutcome, Tier};
use hdrcal_metadata::Hdr10Metadata;
use tracing::{debug, info, trace};

use crate::command::Command;
use crate::frame::{FrameContext, FrameOutput, Selection, compute_frame};
use crate::strategy::ProfileCurve;
use crate::table::{AdjustPolicy, TestDescriptor};
use crate::test_id::TestId;
use crate::timer::{TestTimer, TimerEvent};
use crate::value::{IndexSlot, LevelSlot, wrap};

/// Multiplier applied to an increment while shift is held.
pub const SHIFT_MULTIPLIER: i32 = 10;

/// Drives the calibration run.
///
/// Owns the [`CalibrationState`]; one [`step`](Self::step) per rendered
/// frame. Commands may arrive between frames.
///
/// ```rust
/// use hdrcal_display::{CalibrationState, DisplayInfo};
/// use hdrcal_sequencer::{Sequencer, TestId};
///
/// let state = CalibrationState::with_info(DisplayInfo::hdr10_reference(1000.0, 400.0, 0.05));
/// let mut seq = Sequencer::new(state);
///
/// seq.set_test(TestId::TenPercentPeakMax);
/// seq.start_cooldown();
/// seq.advance(true);
/// assert_eq!(seq.current(), TestId::TenPercentPeakMax);
/// ```
#[derive(Debug, Clone)]
pub struct Sequencer {
    state: CalibrationState,
    current: TestId,
    cached: TestId,
    newly_selected: bool,
    timer: TestTimer,
    selection: Selection,
    show_text: bool,
    invalid_resources: Vec<TestId>,
    total_seconds: f32,
    last_metadata: Option<Hdr10Metadata>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(CalibrationState::new())
    }
}

impl Sequencer {
    /// Sequencer at the first test.
    pub fn new(state: CalibrationState) -> Self {
        Self {
            state,
            current: TestId::FIRST,
            cached: TestId::FIRST,
            newly_selected: true,
            timer: TestTimer::default(),
            selection: Selection::default(),
            show_text: true,
            invalid_resources: Vec::new(),
            total_seconds: 0.0,
            last_metadata: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Calibration state.
    #[inline]
    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    /// Calibration state, mutable.
    #[inline]
    pub fn state_mut(&mut self) -> &mut CalibrationState {
        &mut self.state
    }

    /// Test on screen.
    #[inline]
    pub fn current(&self) -> TestId {
        self.current
    }

    /// Test to return to when cooldown ends.
    #[inline]
    pub fn cached(&self) -> TestId {
        self.cached
    }

    /// True until the first frame of the current test has been rendered.
    #[inline]
    pub fn is_newly_selected(&self) -> bool {
        self.newly_selected
    }

    /// Timer of the current test.
    #[inline]
    pub fn timer(&self) -> &TestTimer {
        &self.timer
    }

    /// User selections.
    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Explanatory text visible.
    #[inline]
    pub fn show_text(&self) -> bool {
        self.show_text
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Jumps to `test`.
    ///
    /// Entering [`TestId::Cooldown`] from another test remembers that test.
    pub fn set_test(&mut self, test: TestId) {
        trace!(%test, "set_test");
        if test == TestId::Cooldown && self.current != TestId::Cooldown {
            self.cached = self.current;
        }
        self.current = test;
        self.newly_selected = true;
        info!(test = %self.current, "test selected");
    }

    /// Jumps to the test at `index`.
    ///
    /// Callers must pass a valid index; debug builds assert, release builds
    /// clamp.
    pub fn set_test_index(&mut self, index: usize) {
        self.set_test(TestId::from_index_clamped(index));
    }

    /// Jumps to the test at a user-supplied `index`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTestTransition`] when `index` is past the last test;
    /// the current test is kept.
    pub fn jump_to(&mut self, index: usize) -> Result<TestId> {
        let test = TestId::from_index(index).ok_or(Error::InvalidTestTransition {
            index,
            count: TestId::COUNT,
        })?;
        self.set_test(test);
        Ok(test)
    }

    /// Steps one test forward or back.
    ///
    /// From cooldown, returns to the cached test regardless of direction.
    /// Stepping stops at [`TestId::FIRST`] and [`TestId::LAST`].
    pub fn advance(&mut self, forward: bool) {
        trace!(forward, "advance");
        if self.current == TestId::Cooldown {
            self.current = self.cached;
            self.newly_selected = true;
            info!(test = %self.current, "cooldown left");
            return;
        }
        let next = if forward { self.current.next() } else { self.current.prev() };
        if next != self.current {
            self.set_test(next);
        }
    }

    /// Enters cooldown.
    pub fn start_cooldown(&mut self) {
        self.set_test(TestId::Cooldown);
    }

    // ------------------------------------------------------------------
    // Per-frame
    // ------------------------------------------------------------------

    /// Advances timers by `elapsed` seconds.
    ///
    /// Returns the timer event; an expired cooldown has already returned to
    /// the cached test.
    pub fn tick(&mut self, elapsed: f32) -> TimerEvent {
        self.total_seconds += elapsed.max(0.0);
        let desc = TestDescriptor::of(self.current);
        if desc.live_display {
            self.state.mark_stale();
        }
        let event = self.timer.tick(desc.timer, elapsed, self.newly_selected);
        match event {
            TimerEvent::Expired if self.current == TestId::Cooldown => {
                info!("cooldown finished");
                let cached = self.cached;
                self.set_test(cached);
            }
            TimerEvent::Toggled { on } => debug!(test = %self.current, on, "flash toggled"),
            _ => {}
        }
        event
    }

    /// Re-reads display info if stale and seeds effective values.
    pub fn refresh<P: DisplayProvider + ?Sized>(&mut self, provider: &mut P) -> RefreshOutcome {
        let outcome = self.state.update(provider);
        if outcome != RefreshOutcome::Cached {
            self.state.init_effective_values();
        }
        outcome
    }

    /// Computes the current frame and clears the newly-selected flag.
    pub fn render(&mut self) -> FrameOutput {
        self.state.init_effective_values();
        let resource_valid = !self.invalid_resources.contains(&self.current);
        let mut out = compute_frame(&FrameContext {
            state: &self.state,
            test: self.current,
            selection: &self.selection,
            timer: &self.timer,
            show_text: self.show_text,
            resource_valid,
            total_seconds: self.total_seconds,
        });
        out.metadata_dirty = self.newly_selected || self.last_metadata != Some(out.metadata);
        if out.metadata_dirty {
            debug!(test = %self.current, metadata = %out.metadata, "metadata changed");
        }
        self.last_metadata = Some(out.metadata);
        self.newly_selected = false;
        out
    }

    /// One frame: timers, display refresh, output.
    pub fn step<P: DisplayProvider + ?Sized>(&mut self, provider: &mut P, elapsed: f32) -> FrameOutput {
        self.tick(elapsed);
        self.refresh(provider);
        self.render()
    }

    // ------------------------------------------------------------------
    // Adjustment
    // ------------------------------------------------------------------

    /// Adjusts the value of the current test.
    pub fn adjust(&mut self, increment: i32, shift: bool) {
        self.adjust_value(self.current, increment, shift);
    }

    /// Adjusts the value bound to `test` in the active color mode.
    pub fn adjust_value(&mut self, test: TestId, increment: i32, shift: bool) {
        let step = if shift {
            increment.saturating_mul(SHIFT_MULTIPLIER)
        } else {
            increment
        };
        trace!(%test, step, "adjust_value");
        match TestDescriptor::of(test).adjust {
            AdjustPolicy::None => {}
            AdjustPolicy::Tier => {
                let tier = Tier::from_index(self.state.tier().index() as i64 + step as i64);
                self.state.set_tier(tier);
            }
            AdjustPolicy::Level(slot) => {
                let range = slot.range(self.state.color_mode());
                let v = self.level_mut(slot);
                *v = range.step(*v, step as f32);
                debug!(?slot, value = *v, "level adjusted");
            }
            AdjustPolicy::Rotate(slot) => {
                let (min, max) = slot.bounds();
                let v = self.index_mut(slot);
                *v = wrap(*v, step.saturating_neg(), min, max);
                debug!(?slot, value = *v, "selector rotated");
            }
            AdjustPolicy::ProfileTile => {
                let max = ProfileCurve::max_tile(self.state.max_pq_code()) as i32;
                let tile = &mut self.selection.profile_tile;
                *tile = wrap(*tile, step, 0, max);
                debug!(tile = *tile, max, "profile tile");
            }
            AdjustPolicy::ToggleSubtitle => {
                if step % 2 != 0 {
                    self.selection.subtitle_visible = !self.selection.subtitle_visible;
                }
            }
        }
    }

    fn level_mut(&mut self, slot: LevelSlot) -> &mut f32 {
        match slot {
            LevelSlot::StaticContrast => &mut self.state.static_contrast,
            LevelSlot::ActiveDimming => &mut self.state.active_dimming,
            LevelSlot::ActiveDimmingDark => &mut self.state.active_dimming_dark,
            LevelSlot::EffectiveMax => &mut self.state.effective_values().max,
            LevelSlot::EffectiveMaxFullFrame => &mut self.state.effective_values().max_full_frame,
            LevelSlot::EffectiveMin => &mut self.state.effective_values().min,
        }
    }

    fn index_mut(&mut self, slot: IndexSlot) -> &mut i32 {
        match slot {
            IndexSlot::PatchColor => &mut self.selection.color,
            IndexSlot::DimmingBars => &mut self.selection.dimming_bars,
            IndexSlot::BlackLevel => &mut self.selection.black_level,
        }
    }

    // ------------------------------------------------------------------
    // Misc commands
    // ------------------------------------------------------------------

    /// Flips explanatory text visibility; returns the new value.
    pub fn toggle_text(&mut self) -> bool {
        self.show_text = !self.show_text;
        self.show_text
    }

    /// Cycles the checkerboard layout; zero is ignored.
    pub fn select_checkerboard(&mut self, increment: i32) {
        if increment == 0 {
            return;
        }
        let cb = self.selection.checkerboard.step(increment > 0);
        self.selection.checkerboard = cb;
        debug!(?cb, "checkerboard");
    }

    /// Records whether the effect or image of `test` loaded.
    pub fn set_resource_valid(&mut self, test: TestId, valid: bool) {
        self.invalid_resources.retain(|&t| t != test);
        if !valid {
            self.invalid_resources.push(test);
        }
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// Only [`Command::JumpToTest`] can fail, see [`jump_to`](Self::jump_to).
    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!(%command, "command");
        match command {
            Command::NextTest => self.advance(true),
            Command::PrevTest => self.advance(false),
            Command::JumpToTest(index) => {
                self.jump_to(index)?;
            }
            Command::AdjustValue { increment, shift } => self.adjust(increment, shift),
            Command::ToggleExplanatoryText => {
                self.toggle_text();
            }
            Command::SelectCheckerboard(increment) => self.select_checkerboard(increment),
            Command::StartCooldown => self.start_cooldown(),
        }
        Ok(())
    }
}
