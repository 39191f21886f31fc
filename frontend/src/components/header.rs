use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-shield-halved"></i> {" Deepfake Detection"}</h1>
            <p class="subtitle">{"Upload media to analyze for potential manipulation or AI generation"}</p>
        </header>
    }
}
