use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;

use crate::components::host::{self, Held, Interval, hold, release_on_cleanup};
use crate::network::{EventSource, FrameClock, Typewriter};

/// Headline that types itself out with a blinking cursor.
///
/// Both timers only wake the view; what is shown is derived from elapsed time.
/// The typing timer is released once the text is complete.
#[component]
pub fn TypedHeadline(#[prop(into)] text: String) -> impl IntoView {
	let typewriter = Typewriter::new(text);
	let elapsed = RwSignal::new(0.0);
	let clock = Rc::new(RefCell::new(FrameClock::new()));
	clock.borrow_mut().elapsed(host::now_ms());

	let ticker = |clock: Rc<RefCell<FrameClock>>| {
		Box::new(move |now: f64| elapsed.set(clock.borrow_mut().elapsed(now)))
	};
	let (typing, blinking): (Held, Held) = (Rc::default(), Rc::default());
	let typed = Interval {
		period_ms: (typewriter.char_interval * 1000.0) as i32,
	}
	.subscribe(ticker(clock.clone()));
	hold(&typing, "typing timer", typed);
	let blink = Interval {
		period_ms: (typewriter.blink_interval * 1000.0) as i32,
	}
	.subscribe(ticker(clock));
	hold(&blinking, "cursor blink", blink);

	let (done, typing_done) = (typewriter.clone(), typing.clone());
	Effect::new(move |_| {
		if done.is_complete(elapsed.get()) && !typing_done.borrow().is_empty() {
			typing_done.borrow_mut().clear();
			info!("Headline typed out, typing timer released");
		}
	});
	release_on_cleanup(typing);
	release_on_cleanup(blinking);

	let cursor = typewriter.clone();
	view! {
		<h1 class="typed-headline">
			<span>{move || typewriter.visible(elapsed.get()).to_string()}</span>
			<span
				class="typed-cursor"
				style:opacity=move || if cursor.cursor_visible(elapsed.get()) { "1" } else { "0" }
			>
				"|"
			</span>
		</h1>
	}
}
