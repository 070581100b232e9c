use crate::{
    animation::{ease::Ease, ramp::ALPHA_MAX},
    catalog::config::ControllerConfig,
    catalog::model::{SectionCatalog, SectionContent, SectionId},
    controller::state::{ControllerState, TransitionPhase},
    foundation::core::FrameIndex,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the rendering collaborator needs to draw one frame.
///
/// Built by [`crate::SectionController::render_descriptor`]; the controller
/// itself never draws.
pub struct RenderDescriptor {
    /// Frame this descriptor describes.
    pub frame: FrameIndex,
    /// Section currently rendered.
    pub section: SectionId,
    /// Id of the current section.
    pub section_name: String,
    /// Button label of the current section.
    pub label: String,
    /// Fade phase.
    pub phase: TransitionPhase,
    /// True only while fading out toward `pending`.
    pub is_transitioning: bool,
    /// Id of the section being faded toward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<String>,
    /// Foreground opacity in `[0, 255]`.
    pub fade_alpha: f64,
    /// `fade_alpha` normalised to `[0, 1]`.
    pub content_alpha: f64,
    /// Raw slideshow cursor. Only meaningful when `slide` is set.
    pub slide_index: usize,
    /// Frames since the last automatic advance.
    pub slide_timer: u32,
    /// Per-slide fade-in progress in `[0, 1]`.
    pub slide_transition: f64,
    /// Text reveal progress in `[0, 1]`.
    pub text_reveal: f64,
    /// Slide to draw. `None` for non-slideshow sections and empty collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<SlideView>,
    /// Video group that should be visible. Hidden while fading out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_video_group: Option<String>,
    /// Text lines with their individual opacity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text_lines: Vec<TextLineView>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// The slide the renderer should draw.
pub struct SlideView {
    /// Cursor into the collection, always `< count`.
    pub index: usize,
    /// Collection length, always `> 0`.
    pub count: usize,
    /// Asset key of the slide.
    pub item: String,
    /// Final slide opacity in `[0, 1]`: section fade times slide fade-in.
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One staggered text line.
pub struct TextLineView {
    /// Line text.
    pub text: String,
    /// Final line opacity in `[0, 1]`.
    pub alpha: f64,
}

/// Per-line reveal for `count` lines at overall progress `reveal`.
///
/// Line `i` starts at `i * stagger` and every line finishes at `reveal == 1`.
/// The stagger shrinks to `1 / count` when needed so the last line always
/// completes.
pub fn staggered_line_reveal(reveal: f64, count: usize, stagger: f64, ease: Ease) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let stagger = stagger.max(0.0).min(1.0 / count as f64);
    let span = 1.0 - stagger * (count as f64 - 1.0);
    (0..count)
        .map(|i| {
            let start = stagger * i as f64;
            ease.apply((reveal - start) / span)
        })
        .collect()
}

pub(crate) fn describe(
    catalog: &SectionCatalog,
    config: &ControllerConfig,
    state: &ControllerState,
) -> RenderDescriptor {
    let content_alpha = (state.fade_alpha / ALPHA_MAX).clamp(0.0, 1.0);
    let spec = catalog.spec(state.current_section).ok();

    let mut slide = None;
    let mut visible_video_group = None;
    let mut text_lines = Vec::new();

    match spec.map(|s| &s.content) {
        Some(SectionContent::Slideshow { items, .. }) if !items.is_empty() => {
            let index = state.slide_index.min(items.len() - 1);
            slide = Some(SlideView {
                index,
                count: items.len(),
                item: items[index].clone(),
                alpha: content_alpha * state.slide_transition,
            });
        }
        Some(SectionContent::VideoGallery { group, .. }) if !state.is_transitioning() => {
            visible_video_group = Some(group.clone());
        }
        Some(SectionContent::Text { lines }) => {
            let reveals = staggered_line_reveal(
                state.text_reveal,
                lines.len(),
                config.text_line_stagger,
                config.text_line_ease,
            );
            text_lines = lines
                .iter()
                .zip(reveals)
                .map(|(text, r)| TextLineView {
                    text: text.clone(),
                    alpha: content_alpha * r,
                })
                .collect();
        }
        _ => {}
    }

    RenderDescriptor {
        frame: state.frame,
        section: state.current_section,
        section_name: catalog.name(state.current_section).to_string(),
        label: spec.map(|s| s.display_label()).unwrap_or_default(),
        phase: state.phase,
        is_transitioning: state.is_transitioning(),
        pending: state
            .pending_section()
            .map(|p| catalog.name(p).to_string()),
        fade_alpha: state.fade_alpha,
        content_alpha,
        slide_index: state.slide_index,
        slide_timer: state.slide_timer,
        slide_transition: state.slide_transition,
        text_reveal: state.text_reveal,
        slide,
        visible_video_group,
        text_lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/descriptor.rs"]
mod tests;
