use super::super::{Model, Msg};
use super::utils::{debounce, display_name};
use gloo_file::ObjectUrl;
use shared::Modality;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(url) = model.session.preview() else {
        return html! {};
    };

    let link = ctx.link().clone();
    let busy = model.session.is_submitting();

    html! {
        <div id="preview-container">
            { render_media(model.session.modality(), url, "file-preview") }
            { render_progress(model) }
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                    disabled={busy || model.session.candidate().is_none()}
                >
                    { render_analyze_button_content(model) }
                </button>
                <button
                    id="reset-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    onclick={link.callback(|_| Msg::Reset)}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Reset"}
                </button>
            </div>
        </div>
    }
}

/// The media element matching the modality, pointed at a blob URL.
pub fn render_media(modality: Modality, url: &ObjectUrl, class: &'static str) -> Html {
    let src = url.to_string();
    match modality {
        Modality::Image => html! { <img {src} {class} alt="Selected media" /> },
        Modality::Video => html! { <video {src} {class} controls=true></video> },
        Modality::Audio => html! {
            <div class="audio-preview">
                <i class="fa-solid fa-music"></i>
                <audio {src} {class} controls=true></audio>
            </div>
        },
    }
}

fn render_progress(model: &Model) -> Html {
    let Some(progress) = model.session.progress() else {
        return html! {};
    };
    if !model.session.descriptor().synthetic_progress {
        return html! {};
    }

    html! {
        <div class="progress-container">
            <div class="progress-bar" style={format!("width: {}%", progress)}></div>
            <div class="progress-text">{ format!("{}%", progress) }</div>
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.session.is_submitting() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        let filename = model
            .session
            .candidate()
            .map(|candidate| candidate.meta.name.clone())
            .unwrap_or_else(|| format!("Selected {}", model.session.modality().label()));

        html! {
            <>
                <i class="fa-solid fa-magnifying-glass"></i>
                { format!(" Analyze \"{}\"", display_name(&filename, 20)) }
            </>
        }
    }
}
