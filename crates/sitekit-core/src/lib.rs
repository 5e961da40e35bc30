#![forbid(unsafe_code)]

//! Core: scroll-synchronized navigation, carousel rotation and scroll effects.
//!
//! Every component owns its own state and reports changes through a
//! [`surface::Surface`]. Timers are obtained from a host
//! [`timer::Scheduler`], so the same components run under a browser event
//! loop, a native timer wheel, or the deterministic [`timer::VirtualScheduler`].

pub mod active_link;
pub mod carousel;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod reveal;
pub mod surface;
pub mod throttle;
pub mod timer;
pub mod viewport;

pub use active_link::{ActiveLinkController, NavEntry};
pub use carousel::{RotationPhase, SlideRotator};
pub use config::{ConfigError, SiteConfig};
pub use navigation::{HeaderTracker, MobileMenu, NavClick, NavigationManager};
pub use surface::Surface;
pub use timer::{Scheduler, TimerId, VirtualScheduler};
pub use viewport::{Section, ViewportTracker};
