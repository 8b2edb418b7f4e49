use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::headline::TypedHeadline;
use crate::components::neural_net::NeuralNetCanvas;
use crate::components::tech_stack::TechStackCanvas;
use crate::error::Result;
use crate::network::{
	FitRule, LayerSizes, LayeredTopology, PlaneEdge, PlaneGraph, PlaneNode, Sizing,
};

/// Build the hero network, optionally from a `?layers=8,12,4` query value.
fn network_from_query(layers: Option<String>) -> Result<LayeredTopology> {
	let sizes = match layers {
		Some(text) => text.parse::<LayerSizes>()?,
		None => LayerSizes::default(),
	};
	LayeredTopology::generate(&sizes)
}

/// Six-node stack on percent coordinates.
fn tech_stack() -> Result<PlaneGraph> {
	let nodes = vec![
		PlaneNode::percent("django", "Django", "#c55822", 20.0, 30.0),
		PlaneNode::percent("fastapi", "FastAPI", "#f97316", 80.0, 30.0),
		PlaneNode::percent("react", "React", "#38bdf8", 50.0, 15.0),
		PlaneNode::percent("genai", "GenAI", "#10b981", 35.0, 50.0),
		PlaneNode::percent("sql", "SQL", "#f59e0b", 65.0, 50.0),
		PlaneNode::percent("cv", "Computer Vision", "#0ea5e9", 50.0, 70.0),
	];
	let edges = [
		("django", "react"),
		("fastapi", "react"),
		("django", "sql"),
		("fastapi", "sql"),
		("django", "genai"),
		("fastapi", "genai"),
		("genai", "cv"),
		("sql", "cv"),
		("react", "genai"),
		("react", "sql"),
	]
	.map(|(from, to)| PlaneEdge::new(from, to));
	PlaneGraph::new(nodes, &edges)
}

/// Eight-node constellation on the unit square.
fn constellation() -> Result<PlaneGraph> {
	const TONE: &str = "#38bdf8";
	let nodes = vec![
		PlaneNode::new("genai", "GenAI", "#10b981", 0.5, 0.15),
		PlaneNode::new("cv", "Computer Vision", TONE, 0.15, 0.4),
		PlaneNode::new("ml", "ML", TONE, 0.85, 0.4),
		PlaneNode::new("python", "Python", "#facc15", 0.5, 0.5),
		PlaneNode::new("react", "React", TONE, 0.2, 0.75),
		PlaneNode::new("django", "Django", TONE, 0.5, 0.85),
		PlaneNode::new("fastapi", "FastAPI", TONE, 0.8, 0.75),
		PlaneNode::new("sql", "SQL", TONE, 0.65, 0.65),
	];
	let edges = [
		("python", "genai"),
		("python", "cv"),
		("python", "ml"),
		("python", "django"),
		("python", "fastapi"),
		("genai", "cv"),
		("genai", "ml"),
		("django", "sql"),
		("fastapi", "sql"),
		("react", "django"),
		("react", "fastapi"),
	]
	.map(|(from, to)| PlaneEdge::new(from, to));
	PlaneGraph::new(nodes, &edges)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let seed = js_sys::Date::now() as u64;

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || {
				let topology = network_from_query(query.with(|q| q.get("layers")))?;
				let stack = tech_stack()?;
				let sky = constellation()?;
				Ok::<_, crate::Error>(
					view! {
						<section class="hero">
							<div class="hero-network">
								<NeuralNetCanvas topology=topology seed=seed />
							</div>
							<div class="hero-overlay">
								<TypedHeadline text="AI Developer | Full Stack Engineer" />
								<p class="subtitle">
									"Hover a node to light up its connections. Click to pause."
								</p>
							</div>
						</section>

						<section class="tech-stack">
							<h2>"Tech Stack"</h2>
							<div class="tech-stack-frame">
								<TechStackCanvas graph=stack seed=seed />
							</div>
						</section>

						<section class="constellation">
							<TechStackCanvas
								graph=sky
								sizing=Sizing::Fit(FitRule::default())
								node_radius=8.0
								particles=0
							/>
						</section>
					},
				)
			}}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	#[test]
	fn bundled_graphs_are_valid() {
		let stack = tech_stack().unwrap();
		assert_eq!(stack.nodes().len(), 6);
		assert_eq!(stack.edges().len(), 10);
		let sky = constellation().unwrap();
		assert_eq!(sky.nodes().len(), 8);
		assert_eq!(sky.edges().len(), 11);
	}

	#[test]
	fn layers_come_from_the_query() {
		assert_eq!(network_from_query(None).unwrap().nodes().len(), 44);
		assert_eq!(
			network_from_query(Some("3,2".into())).unwrap().links().len(),
			6
		);
		assert!(matches!(
			network_from_query(Some("3,x".into())),
			Err(Error::MalformedLayers(_))
		));
		assert!(matches!(
			network_from_query(Some("8,4294967296,4".into())),
			Err(Error::LayerTooLarge { layer: 1, .. })
		));
	}
}
