use super::super::Model;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::ModalityDescriptor;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let pending = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        if let Some(previous) = pending.borrow_mut().take() {
            previous.cancel();
        }

        let inner_callback = callback.clone();
        *pending.borrow_mut() = Some(Timeout::new(duration, move || inner_callback()));
    })
}

/// Every file in the list; the session's validator decides what is acceptable.
pub fn collect_files(file_list: &FileList) -> Vec<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .map(GlooFile::from)
        .collect()
}

/// Shortens long file names for button labels.
pub fn display_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = model.session.error_message() {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_about(descriptor: &ModalityDescriptor) -> Html {
    html! {
        <div class="info-box">
            <h3>{ format!("About {} Deepfake Detection", descriptor.modality.label()) }</h3>
            <p>{ descriptor.about }</p>
            <p>
                <strong>{"Note:"}</strong>
                {" Detection technology is not perfect; very sophisticated manipulations may go undetected."}
            </p>
        </div>
    }
}
