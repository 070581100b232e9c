//! Showreel is a frame-driven section controller for animated portfolio sketches.
//!
//! A portfolio is a handful of named sections (a photo slideshow, a video
//! reel, an about page, ...) behind navigation buttons. Switching sections
//! cross-fades the foreground, slideshows advance on a frame-counted timer, and
//! about-page text is revealed line by line. This crate owns exactly that state
//! machine and nothing else: asset loading, drawing, DOM/buttons and video
//! playback belong to the host.
//!
//! # Frame loop
//!
//! 1. Input handlers call [`SectionController::request_section`] or
//!    [`SectionController::advance_slide`].
//! 2. The host loop calls [`SectionController::tick`] once per frame
//!    (use [`FrameClock`] to derive ticks on a variable-rate host).
//! 3. The host reads [`SectionController::render_descriptor`] and draws it.
//!
//! Section changes are deferred: a request starts an exponential fade-out, the
//! swap happens once opacity drops below a threshold, and the new section then
//! fades in linearly. A newer request during the fade-out replaces the pending
//! target.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single writer**: all mutation goes through `&mut SectionController`.
//! - **Closed section set**: unknown sections are rejected, never defaulted.
//! - **Always in range**: numeric state is clamped every frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod catalog;
mod clock;
mod controller;
mod foundation;
mod layout;

pub use animation::ease::Ease;
pub use animation::ramp::{ALPHA_MAX, approach, clamp_alpha, clamp_unit, step_toward};
pub use catalog::config::{ControllerConfig, PortfolioConfig};
pub use catalog::model::{SectionCatalog, SectionContent, SectionId, SectionSpec};
pub use clock::FrameClock;
pub use controller::controller::{SectionController, SlideStep};
pub use controller::descriptor::{
    RenderDescriptor, SlideView, TextLineView, staggered_line_reveal,
};
pub use controller::observer::{SectionChange, SubscriptionId};
pub use controller::state::{ControllerState, TransitionPhase};
pub use foundation::core::{Canvas, Fps, FrameIndex};
pub use foundation::error::{ShowreelError, ShowreelResult};
pub use layout::viewport::{SlideLayout, centered, centered_row};
