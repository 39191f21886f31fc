use super::super::Model;
use super::super::Msg;
use super::utils::{collect_files, debounce};
use shared::Modality;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

fn placeholder_text(modality: Modality) -> &'static str {
    match modality {
        Modality::Image => "Drag & drop an image here, paste, or click",
        Modality::Video => "Drag & drop a video here, or click",
        Modality::Audio => "Drag & drop an audio file here, or click",
    }
}

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let busy = model.session.is_submitting();
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx, busy) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>, busy: bool) -> Html {
    let descriptor = model.session.descriptor();
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files().map(|list| collect_files(&list)).unwrap_or_default();

        // Clear so that picking the same file again still fires `change`.
        input.set_value("");

        (!files.is_empty()).then_some(Msg::FilesPicked(files))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept={descriptor.accept_attr()}
                style="display: none;"
                disabled={busy}
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!(
                    "upload-area",
                    model.is_dragging.then_some("drag-over"),
                    busy.then_some("disabled")
                )}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{ placeholder_text(descriptor.modality) }</p>
                    <p class="file-types">{ format!("Supported formats: {}", descriptor.formats) }</p>
                </div>
            </div>
        </>
    }
}
