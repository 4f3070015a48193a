//! Dioxus bridges for the reactive core.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::reactive::Source;

/// Mirror `source` into a signal for the lifetime of the calling component.
///
/// The subscription lives in the hook slot and is released when the component
/// unmounts. Emissions equal to the current signal value are skipped.
pub fn use_source<T>(source: &Source<T>) -> Signal<Option<T>>
where
    T: Clone + PartialEq + 'static,
{
    let initial = source.get();
    let signal = use_signal(move || initial);
    let source = source.clone();
    use_hook(move || {
        let subscription = source.subscribe(move |value| {
            let mut signal = signal;
            if signal.peek().as_ref() != Some(value) {
                signal.set(Some(value.clone()));
            }
        });
        Rc::new(subscription)
    });
    signal
}
