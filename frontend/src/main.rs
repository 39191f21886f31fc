mod components;

use components::handlers;
use components::header::render_header;
use components::modality_tabs::render_modality_tabs;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::service_status::ServiceStatus;
use components::upload_section::render_upload_section;
use components::utils::{render_about, render_error_message};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::{Interval, Timeout};
use shared::{
    DetectionError, DetectionResult, DetectorConfig, Modality, PreviewSource, RequestId, Session,
    SessionState,
};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// Previews are blob object URLs. Dropping an `ObjectUrl` revokes it.
pub struct ObjectUrlSource;

impl PreviewSource for ObjectUrlSource {
    type Media = GlooFile;
    type Handle = ObjectUrl;

    fn create(&mut self, media: &GlooFile) -> ObjectUrl {
        ObjectUrl::from(media.clone())
    }

    fn revoke(&mut self, handle: ObjectUrl) {
        drop(handle);
    }
}

// Yew msg components
pub enum Msg {
    // Session operations
    SelectModality(Modality),
    FilesPicked(Vec<GlooFile>),
    Submit,
    ProgressTick(RequestId),
    Settled(RequestId, Result<DetectionResult, DetectionError>),
    Reveal(RequestId),
    Reset,

    // UI states
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    config: DetectorConfig,
    session: Session<ObjectUrlSource>,
    progress_timer: Option<(RequestId, Interval)>,
    reveal_timeout: Option<Timeout>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

/// Build-time overrides; a browser bundle has no process environment.
fn load_config() -> DetectorConfig {
    let pairs = [
        ("DETECTOR_API_BASE", option_env!("DETECTOR_API_BASE")),
        ("DETECTOR_HEALTH_PATH", option_env!("DETECTOR_HEALTH_PATH")),
        ("DETECTOR_PROGRESS_INTERVAL_MS", option_env!("DETECTOR_PROGRESS_INTERVAL_MS")),
        ("DETECTOR_PROGRESS_STEP", option_env!("DETECTOR_PROGRESS_STEP")),
        ("DETECTOR_PROGRESS_CEILING", option_env!("DETECTOR_PROGRESS_CEILING")),
        ("DETECTOR_REVEAL_DELAY_MS", option_env!("DETECTOR_REVEAL_DELAY_MS")),
    ];

    match DetectorConfig::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value))),
    ) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid build configuration, falling back to defaults: {}", e);
            DetectorConfig::default()
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = load_config();
        log::info!("Inference service: {:?}", config.endpoint_url(Modality::Image));

        let session = Session::new(Modality::Image, ObjectUrlSource, config.progress_policy());
        let mut model = Self {
            config,
            session,
            progress_timer: None,
            reveal_timeout: None,
            is_dragging: false,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Session operations
            Msg::SelectModality(modality) => handlers::handle_select_modality(self, modality),
            Msg::FilesPicked(files) => handlers::handle_files_picked(self, files),
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::ProgressTick(id) => handlers::handle_progress_tick(self, id),
            Msg::Settled(id, outcome) => handlers::handle_settled(self, ctx, id, outcome),
            Msg::Reveal(id) => handlers::handle_reveal(self, id),
            Msg::Reset => handlers::handle_reset(self),

            // UI states
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let descriptor = self.session.descriptor();
        let finished = matches!(self.session.state(), SessionState::Succeeded(_));

        html! {
            <div class="container">
                { render_header() }
                <div class="top-right">
                    <ServiceStatus health_url={self.config.health_url()} />
                </div>
                { render_modality_tabs(self.session.modality(), ctx.link()) }

                <main class="main-content">
                    <div class="media-detector">
                        <h2>{ descriptor.title }</h2>
                        { render_error_message(self) }
                        {
                            if finished {
                                render_results(self, ctx)
                            } else {
                                html! {
                                    <>
                                        { render_upload_section(self, ctx) }
                                        { render_preview_area(self, ctx) }
                                    </>
                                }
                            }
                        }
                    </div>
                    { render_about(descriptor) }
                </main>

                <footer class="app-footer">
                    <p>{"Deepfake Detection | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        handlers::stop_timers(self);
        self.session.reset();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
