use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::{
    animation::{ease::Ease, ramp::ALPHA_MAX},
    catalog::model::{SectionCatalog, SectionContent, SectionSpec},
    foundation::core::{Canvas, Fps},
    foundation::error::{ShowreelError, ShowreelResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Timing knobs for [`crate::SectionController`]. All thresholds are in frames.
pub struct ControllerConfig {
    /// Frames between automatic slide advances.
    pub slide_interval_frames: u32,
    /// Fraction of the remaining alpha removed per frame while fading out.
    pub fade_out_decay_fraction: f64,
    /// Alpha (0..255) added per frame while fading in.
    pub fade_in_step_per_frame: f64,
    /// Fraction of the remaining distance covered per frame by the slide fade-in.
    pub slide_transition_ease_fraction: f64,
    /// Linear text reveal increment per frame.
    pub text_reveal_step_per_frame: f64,
    /// Alpha below which a pending section swap happens.
    pub fade_out_threshold: f64,
    /// Start at alpha 0 and fade in, instead of starting fully opaque.
    pub initial_fade_in: bool,
    /// Reveal offset between consecutive text lines, in reveal units.
    pub text_line_stagger: f64,
    /// Curve applied to each text line's reveal.
    pub text_line_ease: Ease,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            slide_interval_frames: 240,
            fade_out_decay_fraction: 0.08,
            fade_in_step_per_frame: 8.0,
            slide_transition_ease_fraction: 0.1,
            text_reveal_step_per_frame: 0.02,
            fade_out_threshold: 5.0,
            initial_fade_in: false,
            text_line_stagger: 0.15,
            text_line_ease: Ease::OutCubic,
        }
    }
}

impl ControllerConfig {
    /// Validate ranges. Every rate must make progress and stay finite.
    pub fn validate(&self) -> ShowreelResult<()> {
        if self.slide_interval_frames == 0 {
            return Err(ShowreelError::validation(
                "slide_interval_frames must be > 0",
            ));
        }
        for (name, v) in [
            ("fade_out_decay_fraction", self.fade_out_decay_fraction),
            (
                "slide_transition_ease_fraction",
                self.slide_transition_ease_fraction,
            ),
            ("text_reveal_step_per_frame", self.text_reveal_step_per_frame),
        ] {
            if !v.is_finite() || v <= 0.0 || v > 1.0 {
                return Err(ShowreelError::validation(format!(
                    "{name} must be finite and in (0, 1], got {v}"
                )));
            }
        }
        if !self.fade_in_step_per_frame.is_finite()
            || self.fade_in_step_per_frame <= 0.0
            || self.fade_in_step_per_frame > ALPHA_MAX
        {
            return Err(ShowreelError::validation(
                "fade_in_step_per_frame must be finite and in (0, 255]",
            ));
        }
        if !self.fade_out_threshold.is_finite()
            || self.fade_out_threshold <= 0.0
            || self.fade_out_threshold >= ALPHA_MAX
        {
            return Err(ShowreelError::validation(
                "fade_out_threshold must be finite and in (0, 255)",
            ));
        }
        if !self.text_line_stagger.is_finite()
            || self.text_line_stagger < 0.0
            || self.text_line_stagger >= 1.0
        {
            return Err(ShowreelError::validation(
                "text_line_stagger must be finite and in [0, 1)",
            ));
        }
        Ok(())
    }

    /// Wall-clock length of one slide at the given frame rate.
    pub fn slide_interval_secs(&self, fps: Fps) -> f64 {
        fps.frames_to_secs(u64::from(self.slide_interval_frames))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Complete portfolio document: sections plus controller timing.
pub struct PortfolioConfig {
    /// Host canvas used for layout.
    #[serde(default)]
    pub canvas: Canvas,
    /// Reference frame rate of the host loop.
    #[serde(default)]
    pub fps: Fps,
    /// Section shown at startup.
    pub default_section: String,
    /// Controller timing.
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Sections in navigation order.
    pub sections: Vec<SectionSpec>,
}

impl PortfolioConfig {
    /// Parse a JSON document from a reader. The result is validated.
    pub fn from_reader(r: impl Read) -> ShowreelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON document from a string. The result is validated.
    pub fn from_json_str(s: &str) -> ShowreelResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON document from disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ShowreelResult<Self> {
        let f = File::open(path).map_err(|e| {
            ShowreelError::validation(format!("open portfolio JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(sections = cfg.sections.len(), "loaded portfolio config");
        Ok(cfg)
    }

    /// Validate timing, canvas, sections, and the default section.
    pub fn validate(&self) -> ShowreelResult<()> {
        self.controller.validate()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ShowreelError::validation("canvas width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        let catalog = SectionCatalog::new(self.sections.clone())?;
        catalog.resolve(&self.default_section).map_err(|_| {
            ShowreelError::validation(format!(
                "default_section '{}' is not a configured section",
                self.default_section
            ))
        })?;
        Ok(())
    }

    /// Build the section catalog described by this document.
    pub fn catalog(&self) -> ShowreelResult<SectionCatalog> {
        SectionCatalog::new(self.sections.clone())
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> ShowreelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PortfolioConfig {
    /// The stock portfolio: a photo slideshow, an editing reel, and an about page.
    fn default() -> Self {
        let photos = [
            "IMG_0082.jpg",
            "IMG_0083.jpg",
            "IMG_0158.jpg",
            "IMG_0062.JPG",
            "IMG_0085.jpg",
            "IMG_0175.JPG",
            "IMG_0122.JPG",
            "IMG_2558.jpg",
            "IMG_2560.jpg",
            "IMG_2565.jpg",
            "IMG_2561.jpg",
            "IMG_0356.JPG",
        ];
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            default_section: "photos".to_string(),
            controller: ControllerConfig {
                initial_fade_in: true,
                ..ControllerConfig::default()
            },
            sections: vec![
                SectionSpec::new(
                    "photos",
                    SectionContent::Slideshow {
                        items: photos.iter().map(|s| s.to_string()).collect(),
                        auto_advance: true,
                    },
                ),
                SectionSpec::new(
                    "videos",
                    SectionContent::VideoGallery {
                        group: "editing".to_string(),
                        videos: vec![
                            "Dante2.mov".to_string(),
                            "Gojo2.mov".to_string(),
                            "Okarun2.mov".to_string(),
                        ],
                    },
                ),
                SectionSpec::new(
                    "about",
                    SectionContent::Text {
                        lines: vec![
                            "About Me".to_string(),
                            "I'm Acosta Jared.".to_string(),
                            "Editor, storyteller.".to_string(),
                        ],
                    },
                ),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/config.rs"]
mod tests;
