use super::super::Model;
use super::super::Msg;
use shared::Modality;
use yew::html::Scope;
use yew::prelude::*;

fn icon(modality: Modality) -> &'static str {
    match modality {
        Modality::Image => "fa-solid fa-image",
        Modality::Video => "fa-solid fa-video",
        Modality::Audio => "fa-solid fa-volume-high",
    }
}

pub fn render_modality_tabs(active: Modality, link: &Scope<Model>) -> Html {
    html! {
        <nav class="media-tabs">
            { for Modality::all().map(|modality| html! {
                <button
                    class={classes!("media-tab", (modality == active).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SelectModality(modality))}
                    title={format!("Switch to {} detection", modality)}
                >
                    <i class={icon(modality)}></i>{ format!(" {}", modality.label()) }
                </button>
            }) }
        </nav>
    }
}
