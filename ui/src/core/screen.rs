//! Viewport size buckets and the observer that publishes them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reactive::{Source, Subscription};

/// Viewport size bucket. Serialized names match the keys used by the
/// `listview_column_limits` breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScreenSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
}

impl ScreenSize {
    pub const ALL: [ScreenSize; 5] = [
        ScreenSize::XSmall,
        ScreenSize::Small,
        ScreenSize::Medium,
        ScreenSize::Large,
        ScreenSize::XLarge,
    ];

    /// Bucket for a viewport width in CSS pixels.
    pub fn from_width(width: f64) -> Self {
        match width {
            w if w < 600.0 => ScreenSize::XSmall,
            w if w < 960.0 => ScreenSize::Small,
            w if w < 1280.0 => ScreenSize::Medium,
            w if w < 1920.0 => ScreenSize::Large,
            _ => ScreenSize::XLarge,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenSize::XSmall => "XSmall",
            ScreenSize::Small => "Small",
            ScreenSize::Medium => "Medium",
            ScreenSize::Large => "Large",
            ScreenSize::XLarge => "XLarge",
        }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        ScreenSize::Medium
    }
}

/// Publishes the current [`ScreenSize`]; only emits when the bucket changes.
#[derive(Debug, Clone)]
pub struct ScreenSizeObserver {
    screen_size: Source<ScreenSize>,
}

impl ScreenSizeObserver {
    pub fn new(initial: ScreenSize) -> Self {
        Self {
            screen_size: Source::with_value(initial),
        }
    }

    pub fn screen_size(&self) -> &Source<ScreenSize> {
        &self.screen_size
    }

    pub fn current(&self) -> ScreenSize {
        self.screen_size.get().unwrap_or_default()
    }

    pub fn observe_width(&self, width: f64) {
        let next = ScreenSize::from_width(width);
        if self.screen_size.get() != Some(next) {
            debug!(width, size = next.as_str(), "screen size changed");
            self.screen_size.set(next);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&ScreenSize) + 'static) -> Subscription {
        self.screen_size.subscribe(listener)
    }
}

impl Default for ScreenSizeObserver {
    fn default() -> Self {
        Self::new(ScreenSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn width_breakpoints() {
        assert_eq!(ScreenSize::from_width(320.0), ScreenSize::XSmall);
        assert_eq!(ScreenSize::from_width(600.0), ScreenSize::Small);
        assert_eq!(ScreenSize::from_width(1279.9), ScreenSize::Medium);
        assert_eq!(ScreenSize::from_width(1280.0), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(2560.0), ScreenSize::XLarge);
    }

    #[test]
    fn observer_emits_only_on_bucket_change() {
        let observer = ScreenSizeObserver::new(ScreenSize::Medium);
        let emissions = Rc::new(Cell::new(0));
        let counter = emissions.clone();
        let _sub = observer.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(emissions.get(), 1);

        observer.observe_width(1000.0);
        observer.observe_width(1100.0);
        assert_eq!(emissions.get(), 1);

        observer.observe_width(1400.0);
        assert_eq!(emissions.get(), 2);
        assert_eq!(observer.current(), ScreenSize::Large);
    }

    #[test]
    fn serde_names_match_breakpoint_keys() {
        let json = serde_json::to_string(&ScreenSize::XLarge).unwrap();
        assert_eq!(json, "\"XLarge\"");
    }
}
