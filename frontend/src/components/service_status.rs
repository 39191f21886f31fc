use gloo_console::{error, warn};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ServiceStatusProps {
    pub health_url: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Health {
    Checking,
    Online,
    Offline,
}

async fn probe(url: &str) -> Health {
    match Request::get(url).send().await {
        Ok(resp) if resp.ok() => Health::Online,
        Ok(resp) => {
            warn!(format!("Health check returned {}", resp.status()));
            Health::Offline
        }
        Err(err) => {
            error!(format!("Health check failed: {:?}", err));
            Health::Offline
        }
    }
}

/// Badge showing whether the inference service answers its health route.
#[function_component(ServiceStatus)]
pub fn service_status(props: &ServiceStatusProps) -> Html {
    let health = use_state(|| Health::Checking);

    {
        let health = health.clone();
        use_effect_with(props.health_url.clone(), move |url| {
            let url = url.clone();
            spawn_local(async move {
                health.set(probe(&url).await);
            });
            || ()
        });
    }

    let (class, label) = match *health {
        Health::Checking => ("status-checking", " Checking service..."),
        Health::Online => ("status-online", " Service online"),
        Health::Offline => ("status-offline", " Service unreachable"),
    };

    html! {
        <div class={classes!("service-status", class)}>
            <i class="fa-solid fa-circle"></i>{ label }
        </div>
    }
}
