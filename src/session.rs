// One character being practiced: its surface, its stroke list and the reward counters.

use tracing::{debug, info};

use crate::config::Settings;
use crate::glyph::{Decomposition, GlyphData, GlyphSource, decompose};
use crate::reward::{RewardState, Tier};
use crate::surface::DrawingSurface;

/// Passed to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub character: char,
    pub rewards: RewardState,
    pub tier: Tier,
}

pub type CompletionCallback = Box<dyn FnMut(&Completion)>;

pub struct PracticeSession {
    surface: DrawingSurface,
    surface_size: u32,
    glyph: GlyphData,
    decomposition: Decomposition,
    rewards: RewardState,
    on_complete: Option<CompletionCallback>,
}

impl PracticeSession {
    pub fn new(settings: &Settings, rewards: RewardState) -> Self {
        Self {
            surface: DrawingSurface::new(settings),
            surface_size: settings.surface_size,
            glyph: GlyphData::default(),
            decomposition: Decomposition::unavailable(),
            rewards,
            on_complete: None,
        }
    }

    pub fn on_complete(&mut self, callback: impl FnMut(&Completion) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Switch to `ch`: look up its strokes and start on a fresh surface.
    /// The guide visibility carries over from the previous character.
    pub fn load_character(&mut self, source: &dyn GlyphSource, ch: char) {
        let (glyph, decomposition) = decompose(source, ch);
        debug!(%ch, strokes = decomposition.strokes.len(), origin = ?decomposition.origin, "character loaded");
        let guide = self.surface.guide_visible();
        self.surface.initialize(self.surface_size, glyph.reference(), guide);
        self.glyph = glyph;
        self.decomposition = decomposition;
    }

    /// Count the current attempt as finished. Ignored while the surface is blank.
    pub fn complete(&mut self) -> Option<Completion> {
        if !self.surface.has_ink() {
            debug!("completion ignored: nothing drawn");
            return None;
        }
        let (rewards, tier) = self.rewards.apply_completion();
        self.rewards = rewards;
        let done = Completion { character: self.glyph.character, rewards, tier };
        info!(character = %done.character, ?tier, stars = rewards.stars, moons = rewards.moons, suns = rewards.suns, "practice complete");

        if let Some(cb) = self.on_complete.as_mut() {
            cb(&done);
        }
        self.surface.clear();
        Some(done)
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn glyph(&self) -> &GlyphData {
        &self.glyph
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn rewards(&self) -> RewardState {
        self.rewards
    }
}
