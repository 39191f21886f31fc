use super::super::{Model, Msg};
use super::preview_area::render_media;
use shared::{DetailRow, DetailsView, ResultView, view::NO_DETAILS};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(view) = model.session.result_view() else {
        return html! {};
    };
    let modality = model.session.modality();
    let analyzed_filename = model
        .session
        .candidate()
        .map(|candidate| candidate.meta.name.clone())
        .unwrap_or_else(|| "Analyzed media".to_string());

    html! {
        <div class={classes!("results-container", if view.is_real { "result-real" } else { "result-fake" })}>
            <h2 class="result-title">{"Detection Results"}</h2>
            <div class="result-media-container">
                {
                    match model.session.preview() {
                        Some(url) => render_media(modality, url, "result-media"),
                        None => html! {},
                    }
                }
            </div>

            { render_verdict(&view, &analyzed_filename) }
            { render_details(&view.details) }

            <div class="result-explanation">
                <h3 class="explanation-title">{"What Does This Mean?"}</h3>
                <p class="explanation-text">{ view.explanation.clone() }</p>
            </div>

            <button class="analyze-btn" onclick={ctx.link().callback(|_| Msg::Reset)}>
                <i class="fa-solid fa-rotate-left"></i>
                { format!(" Analyze Another {}", modality.label()) }
            </button>
        </div>
    }
}

fn render_verdict(view: &ResultView, analyzed_filename: &str) -> Html {
    html! {
        <div class={classes!("result-card", if view.is_real { "result-real" } else { "result-fake" })}>
            <div class="result-icon">
                {
                    if view.is_real {
                        html! { <i class="fa-solid fa-circle-check icon-real"></i> }
                    } else {
                        html! { <i class="fa-solid fa-circle-xmark icon-fake"></i> }
                    }
                }
            </div>
            <div class="result-content">
                <h3 class="result-prediction" title={format!("Analysis results for: {}", analyzed_filename)}>
                    { view.verdict_label }
                    <span class="analyzed-filename-display">{ format!(" ({})", analyzed_filename) }</span>
                </h3>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter-value confidence-value">{ view.confidence_text.clone() }</div>
                </div>
                {
                    match &view.processing_time_text {
                        Some(text) => html! { <p class="processing-time">{ text.clone() }</p> },
                        None => html! {},
                    }
                }
            </div>
        </div>
    }
}

fn render_details(details: &DetailsView) -> Html {
    html! {
        <div class="detailed-results">
            <h3><i class="fa-solid fa-circle-info"></i>{" Analysis Details"}</h3>
            {
                match details {
                    DetailsView::Rows(rows) => html! {
                        <div class="result-bars">
                            { for rows.iter().map(render_detail_row) }
                        </div>
                    },
                    DetailsView::Unavailable => html! {
                        <p class="no-details">{ NO_DETAILS }</p>
                    },
                }
            }
        </div>
    }
}

fn render_detail_row(row: &DetailRow) -> Html {
    html! {
        <div class="result-item">
            <div class="result-label">{ row.name.clone() }</div>
            <div class="result-bar-container">
                <div class="result-bar" style={format!("width: {}%", row.bar_width)}></div>
            </div>
            <div class="result-value">{ row.percent_text.clone() }</div>
            <p class="detail-description">{ row.description.clone() }</p>
        </div>
    }
}
