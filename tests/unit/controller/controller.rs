use std::sync::{Arc, Mutex};

use super::*;
use crate::catalog::model::SectionSpec;

fn slideshow(id: &str, n: usize) -> SectionSpec {
    SectionSpec::new(
        id,
        SectionContent::Slideshow {
            items: (0..n).map(|i| format!("{id}_{i}.jpg")).collect(),
            auto_advance: true,
        },
    )
}

fn catalog() -> SectionCatalog {
    SectionCatalog::new(vec![
        slideshow("photos", 3),
        SectionSpec::new(
            "videos",
            SectionContent::VideoGallery {
                group: "editing".to_string(),
                videos: vec!["a.mov".to_string()],
            },
        ),
        SectionSpec::new(
            "about",
            SectionContent::Text {
                lines: vec!["About Me".to_string(), "Editor.".to_string()],
            },
        ),
        slideshow("drawings", 5),
        slideshow("sketches", 0),
    ])
    .unwrap()
}

fn controller() -> SectionController {
    let cat = catalog();
    let photos = cat.resolve("photos").unwrap();
    SectionController::new(cat, ControllerConfig::default(), photos).unwrap()
}

fn id(ctl: &SectionController, name: &str) -> SectionId {
    ctl.catalog().resolve(name).unwrap()
}

fn run_until_steady(ctl: &mut SectionController) -> usize {
    for n in 1..=1_000 {
        ctl.tick();
        if ctl.state().phase == TransitionPhase::Steady {
            return n;
        }
    }
    panic!("transition did not settle");
}

fn assert_in_range(ctl: &SectionController) {
    let s = ctl.state();
    assert!((0.0..=255.0).contains(&s.fade_alpha), "{s:?}");
    assert!((0.0..=1.0).contains(&s.slide_transition), "{s:?}");
    assert!((0.0..=1.0).contains(&s.text_reveal), "{s:?}");
}

#[test]
fn starts_steady_on_default_section() {
    let ctl = controller();
    let s = ctl.state();
    assert_eq!(s.current_section, id(&ctl, "photos"));
    assert_eq!(s.phase, TransitionPhase::Steady);
    assert_eq!(s.fade_alpha, 255.0);
    assert_eq!(s.slide_index, 0);
    assert!(!s.is_transitioning());
}

#[test]
fn initial_fade_in_starts_transparent() {
    let cat = catalog();
    let photos = cat.resolve("photos").unwrap();
    let cfg = ControllerConfig {
        initial_fade_in: true,
        ..ControllerConfig::default()
    };
    let mut ctl = SectionController::new(cat, cfg, photos).unwrap();
    assert_eq!(ctl.state().fade_alpha, 0.0);
    assert_eq!(ctl.state().phase, TransitionPhase::FadingIn);
    assert!(!ctl.state().is_transitioning());
    assert_eq!(run_until_steady(&mut ctl), 32);
    assert_eq!(ctl.state().fade_alpha, 255.0);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let cat = catalog();
    let photos = cat.resolve("photos").unwrap();
    let cfg = ControllerConfig {
        fade_out_decay_fraction: 0.0,
        ..ControllerConfig::default()
    };
    assert!(SectionController::new(cat, cfg, photos).is_err());
}

#[test]
fn ranges_stay_clamped_for_long_runs() {
    let mut ctl = controller();
    let targets = ["about", "videos", "drawings", "photos", "sketches"];
    for frame in 0..5_000 {
        if frame % 97 == 0 {
            let target = targets[(frame / 97) % targets.len()];
            ctl.request_section_named(target).unwrap();
        }
        if frame % 13 == 0 {
            ctl.advance_slide(SlideStep::Previous);
        }
        ctl.tick();
        assert_in_range(&ctl);
        if let Some(n) = ctl.catalog().slide_count(ctl.current_section()) {
            if n > 0 {
                assert!(ctl.state().slide_index < n);
            }
        }
    }
}

#[test]
fn requesting_current_section_changes_nothing() {
    let mut ctl = controller();
    for _ in 0..10 {
        ctl.tick();
    }
    let before = ctl.state().clone();
    ctl.request_section(id(&ctl, "photos")).unwrap();
    assert_eq!(ctl.state(), &before);

    ctl.request_section_named("about").unwrap();
    ctl.tick();
    let mid = ctl.state().clone();
    ctl.request_section(id(&ctl, "photos")).unwrap();
    assert_eq!(ctl.state(), &mid);
}

#[test]
fn unknown_sections_fail_fast() {
    let mut ctl = controller();
    let stranger = SectionCatalog::new(vec![SectionSpec::new("photos", SectionContent::Blank)])
        .unwrap()
        .resolve("photos")
        .unwrap();
    assert!(matches!(
        ctl.request_section_named("drawingz"),
        Err(ShowreelError::UnknownSection(_))
    ));
    assert!(matches!(
        ctl.request_section(stranger),
        Err(ShowreelError::UnknownSection(_))
    ));
    assert!(!ctl.state().is_transitioning());
}

#[test]
fn transition_completes_within_bound() {
    let mut ctl = controller();
    ctl.request_section_named("about").unwrap();
    assert!(ctl.state().is_transitioning());
    assert_eq!(ctl.state().current_section, id(&ctl, "photos"));

    for _ in 0..200 {
        ctl.tick();
    }
    let s = ctl.state();
    assert_eq!(s.current_section, id(&ctl, "about"));
    assert!(!s.is_transitioning());
    assert_eq!(s.fade_alpha, 255.0);
    assert_eq!(s.phase, TransitionPhase::Steady);
}

#[test]
fn fade_out_is_exponential_and_swaps_below_threshold() {
    let mut ctl = controller();
    ctl.request_section_named("videos").unwrap();
    ctl.tick();
    assert!((ctl.state().fade_alpha - 234.6).abs() < 1e-9);

    let mut frames = 1;
    while ctl.state().is_transitioning() {
        let prev = ctl.state().fade_alpha;
        ctl.tick();
        frames += 1;
        if ctl.state().is_transitioning() {
            assert!(ctl.state().fade_alpha < prev);
            assert!(ctl.state().fade_alpha >= 5.0);
        }
    }
    // 255 * 0.92^n < 5 first holds at n = 48.
    assert_eq!(frames, 48);
    assert_eq!(ctl.state().fade_alpha, 0.0);
    assert_eq!(ctl.state().phase, TransitionPhase::FadingIn);
}

#[test]
fn fade_in_is_linear_and_faster_than_fade_out() {
    let mut ctl = controller();
    ctl.request_section_named("videos").unwrap();
    while ctl.state().is_transitioning() {
        ctl.tick();
    }
    ctl.tick();
    assert_eq!(ctl.state().fade_alpha, 8.0);
    ctl.tick();
    assert_eq!(ctl.state().fade_alpha, 16.0);
    let n = run_until_steady(&mut ctl);
    assert_eq!(n, 30);
}

#[test]
fn last_request_wins() {
    let mut ctl = controller();
    ctl.request_section_named("videos").unwrap();
    ctl.tick();
    ctl.tick();
    ctl.request_section_named("about").unwrap();
    assert_eq!(ctl.state().pending_section(), Some(id(&ctl, "about")));

    let videos = id(&ctl, "videos");
    for _ in 0..300 {
        ctl.tick();
        assert_ne!(ctl.state().current_section, videos);
    }
    assert_eq!(ctl.state().current_section, id(&ctl, "about"));
}

#[test]
fn request_during_fade_in_fades_out_again() {
    let mut ctl = controller();
    ctl.request_section_named("videos").unwrap();
    while ctl.state().is_transitioning() {
        ctl.tick();
    }
    ctl.tick();
    ctl.request_section_named("about").unwrap();
    assert!(ctl.state().is_transitioning());
    // alpha 8 decays below 5 within a handful of frames
    for _ in 0..10 {
        ctl.tick();
    }
    assert_eq!(ctl.state().current_section, id(&ctl, "about"));
}

#[test]
fn swap_resets_per_section_state() {
    let mut ctl = controller();
    for _ in 0..100 {
        ctl.tick();
    }
    ctl.advance_slide(SlideStep::Next);
    ctl.advance_slide(SlideStep::Next);
    for _ in 0..5 {
        ctl.tick();
    }
    assert_eq!(ctl.state().slide_index, 2);
    assert!(ctl.state().text_reveal > 0.0);

    ctl.request_section_named("drawings").unwrap();
    let drawings = id(&ctl, "drawings");
    while ctl.state().current_section != drawings {
        ctl.tick();
    }
    let s = ctl.state();
    assert_eq!(s.slide_index, 0);
    assert_eq!(s.slide_timer, 0);
    assert_eq!(s.text_reveal, 0.0);
    assert_eq!(s.slide_transition, 0.0);
    assert_eq!(s.fade_alpha, 0.0);
}

#[test]
fn wrap_around_both_directions() {
    let mut ctl = controller();
    for _ in 0..3 {
        assert!(ctl.advance_slide(SlideStep::Next));
    }
    assert_eq!(ctl.state().slide_index, 0);

    assert!(ctl.advance_slide(SlideStep::Previous));
    assert_eq!(ctl.state().slide_index, 2);
}

#[test]
fn manual_advance_restarts_slide_timers() {
    let mut ctl = controller();
    for _ in 0..50 {
        ctl.tick();
    }
    assert_eq!(ctl.state().slide_timer, 50);
    assert!(ctl.state().slide_transition > 0.9);
    ctl.advance_slide(SlideStep::Next);
    assert_eq!(ctl.state().slide_timer, 0);
    assert_eq!(ctl.state().slide_transition, 0.0);
    ctl.tick();
    assert!((ctl.state().slide_transition - 0.1).abs() < 1e-12);
}

#[test]
fn advance_is_noop_without_slides() {
    let mut ctl = controller();
    ctl.request_section_named("about").unwrap();
    run_until_steady(&mut ctl);
    let before = ctl.state().clone();
    assert!(!ctl.advance_slide(SlideStep::Next));
    assert_eq!(ctl.state(), &before);

    ctl.request_section_named("sketches").unwrap();
    run_until_steady(&mut ctl);
    let before = ctl.state().clone();
    assert!(!ctl.advance_slide(SlideStep::Previous));
    assert_eq!(ctl.state(), &before);
}

#[test]
fn auto_advance_after_interval() {
    let mut ctl = controller();
    for _ in 0..240 {
        ctl.tick();
    }
    assert_eq!(ctl.state().slide_index, 0);
    assert_eq!(ctl.state().slide_timer, 240);
    ctl.tick();
    assert_eq!(ctl.state().slide_index, 1);
    assert_eq!(ctl.state().slide_timer, 0);
}

#[test]
fn auto_advance_wraps_and_skips_non_slideshow_sections() {
    let mut ctl = controller();
    for _ in 0..(241 * 3) {
        ctl.tick();
    }
    assert_eq!(ctl.state().slide_index, 0);

    ctl.request_section_named("about").unwrap();
    run_until_steady(&mut ctl);
    for _ in 0..1_000 {
        ctl.tick();
    }
    assert_eq!(ctl.state().slide_timer, 0);
    assert_eq!(ctl.state().slide_index, 0);
}

#[test]
fn text_reveal_ramps_linearly_and_saturates() {
    let mut ctl = controller();
    ctl.request_section_named("about").unwrap();
    while ctl.state().is_transitioning() {
        ctl.tick();
    }
    assert_eq!(ctl.state().text_reveal, 0.0);
    for _ in 0..10 {
        ctl.tick();
    }
    assert!((ctl.state().text_reveal - 0.2).abs() < 1e-9);
    for _ in 0..100 {
        ctl.tick();
    }
    assert_eq!(ctl.state().text_reveal, 1.0);
}

#[test]
fn slide_direction_from_sign() {
    assert_eq!(SlideStep::from_sign(1).unwrap(), SlideStep::Next);
    assert_eq!(SlideStep::from_sign(-1).unwrap(), SlideStep::Previous);
    assert!(SlideStep::from_sign(0).is_err());
    assert!(SlideStep::from_sign(2).is_err());
}

#[test]
fn slide_state_requires_slideshow() {
    let mut ctl = controller();
    let slide = ctl.slide_state().unwrap();
    assert_eq!(slide.count, 3);
    assert_eq!(slide.item, "photos_0.jpg");

    ctl.request_section_named("about").unwrap();
    run_until_steady(&mut ctl);
    assert!(matches!(
        ctl.slide_state(),
        Err(ShowreelError::NoSlideshow(_))
    ));

    ctl.request_section_named("sketches").unwrap();
    run_until_steady(&mut ctl);
    let err = ctl.slide_state().unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn observers_fire_once_per_swap() {
    let mut ctl = controller();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = ctl.subscribe(move |c| sink.lock().unwrap().push(c.clone()));
    assert_eq!(ctl.subscriber_count(), 1);

    ctl.request_section_named("videos").unwrap();
    ctl.request_section_named("about").unwrap();
    run_until_steady(&mut ctl);
    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].to_name, "about");
        assert_eq!(seen[0].label, "About");
        assert_eq!(seen[0].from, id(&ctl, "photos"));
    }

    assert!(ctl.unsubscribe(sub));
    assert!(!ctl.unsubscribe(sub));
    ctl.request_section_named("photos").unwrap();
    run_until_steady(&mut ctl);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn from_config_uses_default_section() {
    let ctl = SectionController::from_config(&PortfolioConfig::default()).unwrap();
    assert_eq!(ctl.render_descriptor().section_name, "photos");
    assert!(ctl.config().initial_fade_in);
}
