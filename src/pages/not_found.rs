use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"404"</h1>
			<p>"Nothing is wired up at this address."</p>
			<a href="/">"Back to the network"</a>
		</section>
	}
}
