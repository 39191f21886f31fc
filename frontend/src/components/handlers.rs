use super::super::Model;
use super::super::Msg;
use super::utils::collect_files;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use shared::{
    classify_response, DetectionError, DetectionRequest, DetectionResult, MediaMeta, Modality,
    RequestId, SessionError, Settled,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_select_modality(model: &mut Model, modality: Modality) -> bool {
    if model.session.modality() == modality {
        return false;
    }
    stop_timers(model);
    model.session.switch_modality(modality);
    true
}

pub fn handle_files_picked(model: &mut Model, files: Vec<GlooFile>) -> bool {
    let mut files = files.into_iter();
    let Some(file) = files.next() else {
        return false;
    };
    if files.next().is_some() {
        log::warn!("Only one file can be analyzed at a time, using {}", file.name());
    }

    let meta = MediaMeta::new(file.name(), file.raw_mime_type(), file.size());
    match model.session.select(meta, file) {
        Ok(()) => true,
        Err(SessionError::Busy) => {
            log::warn!("Ignoring file selection while a submission is in flight");
            false
        }
        Err(e) => {
            log::info!("Selection refused: {}", e);
            true
        }
    }
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    let request = match model.session.submit() {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Submit refused: {}", e);
            return false;
        }
    };
    log::info!(
        "Submitting {} to {} as request {}",
        request.file_name,
        request.endpoint_path,
        request.id
    );

    if model.session.descriptor().synthetic_progress {
        let link = ctx.link().clone();
        let id = request.id;
        let interval = Interval::new(model.config.progress_interval_ms, move || {
            link.send_message(Msg::ProgressTick(id));
        });
        model.progress_timer = Some((id, interval));
    }

    let url = model.config.endpoint_url(request.modality);
    send_detection_request(ctx, url, request);
    true
}

pub fn handle_progress_tick(model: &mut Model, id: RequestId) -> bool {
    match model.session.tick(id) {
        Some(_) => true,
        None => {
            if matches!(&model.progress_timer, Some((timer_id, _)) if *timer_id == id) {
                model.progress_timer = None;
            }
            false
        }
    }
}

pub fn handle_settled(
    model: &mut Model,
    ctx: &Context<Model>,
    id: RequestId,
    outcome: Result<DetectionResult, DetectionError>,
) -> bool {
    if let Err(error) = &outcome {
        if model.session.in_flight() == Some(id) {
            match error {
                DetectionError::Protocol(_) => {
                    log::warn!("Request {} returned an unusable body: {}", id, error)
                }
                _ => log::error!("Request {} failed: {}", id, error),
            }
        }
    }

    match model.session.settle(id, outcome) {
        Settled::Stale => {
            log::debug!("Discarding response for superseded request {}", id);
            false
        }
        Settled::Failed => {
            model.progress_timer = None;
            true
        }
        Settled::Staged => {
            model.progress_timer = None;
            let link = ctx.link().clone();
            model.reveal_timeout = Some(Timeout::new(model.config.reveal_delay_ms, move || {
                link.send_message(Msg::Reveal(id));
            }));
            true
        }
    }
}

pub fn handle_reveal(model: &mut Model, id: RequestId) -> bool {
    model.reveal_timeout = None;
    model.session.reveal(id)
}

pub fn handle_reset(model: &mut Model) -> bool {
    stop_timers(model);
    model.session.reset();
    true
}

/// Dropping the gloo timers cancels them.
pub fn stop_timers(model: &mut Model) {
    model.progress_timer = None;
    model.reveal_timeout = None;
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let files = collect_files(&file_list);
    if !files.is_empty() {
        ctx.link().send_message(Msg::FilesPicked(files));
    }
}

pub fn send_detection_request(
    ctx: &Context<Model>,
    url: String,
    request: DetectionRequest<GlooFile>,
) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = post_media(&url, &request.media).await;
            link.send_message(Msg::Settled(request.id, outcome));
        }
    });
}

async fn post_media(url: &str, file: &GlooFile) -> Result<DetectionResult, DetectionError> {
    let form_data = web_sys::FormData::new()
        .map_err(|e| DetectionError::Transport(format!("{:?}", e)))?;
    form_data
        .append_with_blob("file", file.as_ref())
        .map_err(|e| DetectionError::Transport(format!("{:?}", e)))?;

    let response = Request::post(url)
        .body(form_data)
        .map_err(|e| DetectionError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| DetectionError::Transport(e.to_string()))?;

    let status = response.status();
    let body = if response.ok() {
        response
            .text()
            .await
            .map_err(|e| DetectionError::Transport(e.to_string()))?
    } else {
        String::new()
    };

    classify_response(status, &body)
}
