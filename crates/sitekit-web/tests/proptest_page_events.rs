//! Property-based tests over arbitrary host event streams.
//!
//! Whatever the host sends, and however time advances:
//!
//! 1. The visible slide stays in range and matches the last emitted slide.
//! 2. At most one navigation entry is active.
//! 3. Live timers never exceed one per owner (carousel + count-up).

use std::time::Duration;

use proptest::prelude::*;
use sitekit_core::viewport::Section;
use sitekit_web::layout::{CounterSpec, PageSetup, StatsSetup};
use sitekit_web::page_program::PageProgram;
use sitekit_web::PageEvent;

fn setup(slide_count: usize) -> PageSetup {
    PageSetup {
        nav_targets: vec!["home".into(), "about".into(), "contact".into()],
        slide_count,
        sections: vec![
            Section::new("home", 0.0, 600.0),
            Section::new("about", 600.0, 600.0),
            Section::new("contact", 1200.0, 600.0),
        ],
        stats: Some(StatsSetup {
            block: Section::new("stats", 700.0, 300.0),
            counters: vec![CounterSpec {
                id: "beds".into(),
                target: 250,
            }],
        }),
        ..PageSetup::default()
    }
}

fn event_strategy() -> impl Strategy<Value = PageEvent> {
    prop_oneof![
        (-100.0_f64..3000.0).prop_map(PageEvent::Scroll),
        (0_usize..10).prop_map(PageEvent::DotClick),
        Just(PageEvent::PrevClick),
        Just(PageEvent::NextClick),
        Just(PageEvent::HoverEnter),
        Just(PageEvent::HoverLeave),
        Just(PageEvent::MenuToggle),
        Just(PageEvent::Escape),
        Just(PageEvent::LocationFab),
        prop_oneof![Just("#home"), Just("#about"), Just("#gallery"), Just("/blog")]
            .prop_map(|href| PageEvent::NavClick(href.to_owned())),
    ]
}

proptest! {
    #[test]
    fn page_invariants_hold(
        slide_count in 1_usize..6,
        steps in proptest::collection::vec(
            (proptest::collection::vec(event_strategy(), 0..4), 0_u64..7000),
            1..24,
        ),
    ) {
        let mut page = PageProgram::new(setup(slide_count));
        page.init();

        for (events, dt) in steps {
            for event in events {
                page.push_event(event);
            }
            page.advance_time(Duration::from_millis(dt));
            page.step();

            prop_assert!(page.current_slide() < slide_count);
            let slides = page.outputs().slides();
            prop_assert_eq!(slides.last().copied(), Some(page.current_slide()));

            let active = page
                .navigation()
                .links()
                .entries()
                .iter()
                .filter(|e| e.is_active())
                .count();
            prop_assert!(active <= 1);
            prop_assert!(page.scheduler().live_count() <= 2);
        }
    }
}
