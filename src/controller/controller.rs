use tracing::{debug, trace};

use crate::{
    animation::ramp::{ALPHA_MAX, approach, step_toward},
    catalog::config::{ControllerConfig, PortfolioConfig},
    catalog::model::{SectionCatalog, SectionContent, SectionId},
    controller::descriptor::{RenderDescriptor, SlideView, describe},
    controller::observer::{Observers, SectionChange, SubscriptionId},
    controller::state::{ControllerState, TransitionPhase},
    foundation::error::{ShowreelError, ShowreelResult},
};

/// Direction of a manual slide step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideStep {
    /// `+1`, wrapping to the first slide.
    Next,
    /// `-1`, wrapping to the last slide.
    Previous,
}

impl SlideStep {
    /// Map `+1`/`-1` to a step. Any other value is rejected.
    pub fn from_sign(direction: i32) -> ShowreelResult<Self> {
        match direction {
            1 => Ok(Self::Next),
            -1 => Ok(Self::Previous),
            other => Err(ShowreelError::validation(format!(
                "slide direction must be +1 or -1, got {other}"
            ))),
        }
    }

    fn apply(self, index: usize, count: usize) -> usize {
        match self {
            Self::Next => (index + 1) % count,
            Self::Previous => (index + count - 1) % count,
        }
    }
}

/// Owns the section/fade/slideshow state and advances it one frame at a time.
///
/// The host loop calls [`tick`](Self::tick) once per frame, then hands
/// [`render_descriptor`](Self::render_descriptor) to its renderer. Input
/// handlers call [`request_section`](Self::request_section) and
/// [`advance_slide`](Self::advance_slide) on the same thread. For a
/// multi-threaded host, put the controller behind one `Mutex` and treat the
/// descriptor as a snapshot.
///
/// ```
/// use showreel::{PortfolioConfig, SectionController};
///
/// let mut ctl = SectionController::from_config(&PortfolioConfig::default())?;
/// ctl.request_section_named("about")?;
/// for _ in 0..200 {
///     ctl.tick();
/// }
/// assert_eq!(ctl.render_descriptor().section_name, "about");
/// # Ok::<(), showreel::ShowreelError>(())
/// ```
#[derive(Debug)]
pub struct SectionController {
    catalog: SectionCatalog,
    config: ControllerConfig,
    state: ControllerState,
    observers: Observers,
}

impl SectionController {
    /// Build a controller starting on `default_section`.
    pub fn new(
        catalog: SectionCatalog,
        config: ControllerConfig,
        default_section: SectionId,
    ) -> ShowreelResult<Self> {
        config.validate()?;
        let default_section = catalog.check(default_section)?;
        let state = ControllerState::new(default_section, config.initial_fade_in);
        debug!(
            section = catalog.name(default_section),
            sections = catalog.len(),
            "section controller created"
        );
        Ok(Self {
            catalog,
            config,
            state,
            observers: Observers::default(),
        })
    }

    /// Build a controller from a validated portfolio document.
    pub fn from_config(cfg: &PortfolioConfig) -> ShowreelResult<Self> {
        cfg.validate()?;
        let catalog = cfg.catalog()?;
        let default_section = catalog.resolve(&cfg.default_section)?;
        Self::new(catalog, cfg.controller.clone(), default_section)
    }

    /// Advance every timer by one frame.
    ///
    /// On the frame a pending section is swapped in, the remaining per-frame
    /// updates are skipped so the new section starts from a clean reset.
    pub fn tick(&mut self) {
        self.state.frame = self.state.frame.next();
        let slide_count = self.catalog.slide_count(self.state.current_section);

        match self.state.phase {
            TransitionPhase::FadingOut { pending } => {
                self.state.fade_alpha = approach(
                    self.state.fade_alpha,
                    0.0,
                    self.config.fade_out_decay_fraction,
                );
                if self.state.fade_alpha < self.config.fade_out_threshold {
                    self.swap_to(pending);
                    return;
                }
            }
            TransitionPhase::FadingIn | TransitionPhase::Steady => {
                self.state.fade_alpha = step_toward(
                    self.state.fade_alpha,
                    ALPHA_MAX,
                    self.config.fade_in_step_per_frame,
                );
                if self.state.fade_alpha >= ALPHA_MAX {
                    self.state.phase = TransitionPhase::Steady;
                }
            }
        }

        self.state.slide_transition = approach(
            self.state.slide_transition,
            1.0,
            self.config.slide_transition_ease_fraction,
        );
        self.state.text_reveal =
            (self.state.text_reveal + self.config.text_reveal_step_per_frame).min(1.0);

        let auto_advances = self
            .catalog
            .spec(self.state.current_section)
            .map(|s| s.content.auto_advances())
            .unwrap_or(false);
        if auto_advances && slide_count.is_some_and(|n| n > 0) {
            self.state.slide_timer = self.state.slide_timer.saturating_add(1);
            if self.state.slide_timer > self.config.slide_interval_frames {
                self.advance_slide(SlideStep::Next);
            }
        }

        self.state.clamp(slide_count);
        trace!(
            frame = self.state.frame.0,
            alpha = self.state.fade_alpha,
            slide = self.state.slide_index,
            "tick"
        );
    }

    /// Begin fading out toward `id`.
    ///
    /// Requesting the current section is a silent no-op, even mid-fade. A
    /// request while already fading out replaces the pending target; requests
    /// are never queued. Unknown handles fail fast.
    pub fn request_section(&mut self, id: SectionId) -> ShowreelResult<()> {
        let id = self.catalog.check(id)?;
        if id == self.state.current_section {
            debug!(section = self.catalog.name(id), "section already active");
            return Ok(());
        }
        if self.state.pending_section() == Some(id) {
            return Ok(());
        }
        debug!(
            from = self.catalog.name(self.state.current_section),
            to = self.catalog.name(id),
            replaced = self.state.pending_section().map(|p| self.catalog.name(p)),
            "section change requested"
        );
        self.state.phase = TransitionPhase::FadingOut { pending: id };
        Ok(())
    }

    /// [`request_section`](Self::request_section) by section name.
    pub fn request_section_named(&mut self, name: &str) -> ShowreelResult<()> {
        let id = self.catalog.resolve(name)?;
        self.request_section(id)
    }

    /// Step the slideshow cursor with wrap-around in both directions.
    ///
    /// Restarts the slide timer and the per-slide fade-in. Returns `false`
    /// without touching state when the current section has no slides.
    pub fn advance_slide(&mut self, step: SlideStep) -> bool {
        let Some(count) = self
            .catalog
            .slide_count(self.state.current_section)
            .filter(|&n| n > 0)
        else {
            return false;
        };
        self.state.slide_index = step.apply(self.state.slide_index.min(count - 1), count);
        self.state.slide_timer = 0;
        self.state.slide_transition = 0.0;
        debug!(
            section = self.catalog.name(self.state.current_section),
            index = self.state.slide_index,
            ?step,
            "slide advanced"
        );
        true
    }

    /// Snapshot of what should be drawn this frame. No side effects.
    pub fn render_descriptor(&self) -> RenderDescriptor {
        describe(&self.catalog, &self.config, &self.state)
    }

    /// Slide currently selected in the active section.
    ///
    /// Fails with [`ShowreelError::NoSlideshow`] when the section has no
    /// slideshow collection or the collection is empty.
    pub fn slide_state(&self) -> ShowreelResult<SlideView> {
        let name = self.catalog.name(self.state.current_section);
        match self.render_descriptor().slide {
            Some(slide) => Ok(slide),
            None => {
                let spec = self.catalog.spec(self.state.current_section)?;
                match &spec.content {
                    SectionContent::Slideshow { .. } => Err(ShowreelError::no_slideshow(
                        format!("'{name}' has an empty slideshow"),
                    )),
                    _ => Err(ShowreelError::no_slideshow(format!("'{name}'"))),
                }
            }
        }
    }

    /// Register a callback fired once per completed section swap.
    pub fn subscribe(
        &mut self,
        f: impl FnMut(&SectionChange) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(f))
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Read-only view of the controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Section currently rendered.
    pub fn current_section(&self) -> SectionId {
        self.state.current_section
    }

    /// The section catalog.
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    /// The timing configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn swap_to(&mut self, next: SectionId) {
        let from = self.state.current_section;
        self.state.enter_section(next);
        self.state.clamp(self.catalog.slide_count(next));
        debug!(
            from = self.catalog.name(from),
            to = self.catalog.name(next),
            frame = self.state.frame.0,
            "section swapped"
        );
        let change = SectionChange {
            frame: self.state.frame,
            from,
            to: next,
            to_name: self.catalog.name(next).to_string(),
            label: self
                .catalog
                .spec(next)
                .map(|s| s.display_label())
                .unwrap_or_default(),
        };
        self.observers.notify(&change);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/controller.rs"]
mod tests;
