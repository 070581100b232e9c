use crate::{
    animation::ramp::{ALPHA_MAX, clamp_alpha, clamp_unit},
    catalog::model::SectionId,
    foundation::core::FrameIndex,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Where the section fade currently is. Exactly one fade direction is active.
pub enum TransitionPhase {
    /// Fully opaque, no change pending.
    Steady,
    /// Fading out toward a pending section. A newer request replaces `pending`.
    FadingOut {
        /// Section to swap in once alpha drops below the threshold.
        pending: SectionId,
    },
    /// Fading in the current section.
    FadingIn,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// The controller's single mutable record.
///
/// Only [`crate::SectionController`] mutates it; callers get shared references.
pub struct ControllerState {
    /// Section currently rendered.
    pub current_section: SectionId,
    /// Foreground opacity in `[0, 255]`.
    pub fade_alpha: f64,
    /// Fade direction and pending target.
    pub phase: TransitionPhase,
    /// Cursor into the active slideshow collection.
    pub slide_index: usize,
    /// Frames since the last automatic slide advance.
    pub slide_timer: u32,
    /// Per-slide fade-in progress in `[0, 1]`.
    pub slide_transition: f64,
    /// Text reveal progress in `[0, 1]`.
    pub text_reveal: f64,
    /// Frames ticked since construction.
    pub frame: FrameIndex,
}

impl ControllerState {
    pub(crate) fn new(section: SectionId, initial_fade_in: bool) -> Self {
        let (fade_alpha, phase) = if initial_fade_in {
            (0.0, TransitionPhase::FadingIn)
        } else {
            (ALPHA_MAX, TransitionPhase::Steady)
        };
        Self {
            current_section: section,
            fade_alpha,
            phase,
            slide_index: 0,
            slide_timer: 0,
            slide_transition: 0.0,
            text_reveal: 0.0,
            frame: FrameIndex(0),
        }
    }

    /// True only while fading out toward a pending section.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, TransitionPhase::FadingOut { .. })
    }

    /// Target of the in-flight fade-out, if any.
    pub fn pending_section(&self) -> Option<SectionId> {
        match self.phase {
            TransitionPhase::FadingOut { pending } => Some(pending),
            _ => None,
        }
    }

    /// Swap in a new section and reset every per-section timer.
    pub(crate) fn enter_section(&mut self, section: SectionId) {
        self.current_section = section;
        self.slide_index = 0;
        self.slide_timer = 0;
        self.slide_transition = 0.0;
        self.text_reveal = 0.0;
        self.fade_alpha = 0.0;
        self.phase = TransitionPhase::FadingIn;
    }

    /// Pull every numeric field back into range after a frame's arithmetic.
    pub(crate) fn clamp(&mut self, slide_count: Option<usize>) {
        self.fade_alpha = clamp_alpha(self.fade_alpha);
        self.slide_transition = clamp_unit(self.slide_transition);
        self.text_reveal = clamp_unit(self.text_reveal);
        match slide_count {
            Some(n) if n > 0 && self.slide_index >= n => self.slide_index %= n,
            Some(0) | None => self.slide_index = 0,
            _ => {}
        }
    }
}
