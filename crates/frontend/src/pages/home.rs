use shared_types::Room;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::{api::ApiService, clipboard};

fn share_link(room_id: &str) -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map(|origin| format!("{}/{}", origin, room_id))
        .unwrap_or_else(|| format!("/{}", room_id))
}

/// Landing page: admin password gate, then the create-room form, then the
/// share-link panel once a room exists.
#[function_component(Home)]
pub fn home() -> Html {
    let authenticated = use_state(|| false);
    let password = use_state(String::new);
    let password_error = use_state(|| None::<String>);
    let verifying = use_state(|| false);

    let room_name = use_state(String::new);
    let creating = use_state(|| false);
    let create_error = use_state(|| None::<String>);
    let created_room = use_state(|| None::<Room>);

    let navigator = use_navigator();

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_password_submit = {
        let authenticated = authenticated.clone();
        let password = password.clone();
        let password_error = password_error.clone();
        let verifying = verifying.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let value = password.trim().to_string();
            if value.is_empty() || *verifying {
                return;
            }

            verifying.set(true);
            password_error.set(None);

            let authenticated = authenticated.clone();
            let password_error = password_error.clone();
            let verifying = verifying.clone();
            spawn_local(async move {
                match ApiService::verify_password(value).await {
                    Ok(true) => authenticated.set(true),
                    Ok(false) => {
                        password_error.set(Some("Incorrect password".to_string()));
                    }
                    Err(e) => {
                        tracing::error!("Password check failed: {:?}", e);
                        password_error.set(Some("Could not reach the server".to_string()));
                    }
                }
                verifying.set(false);
            });
        })
    };

    let on_name_input = {
        let room_name = room_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            room_name.set(input.value());
        })
    };

    let on_create_submit = {
        let password = password.clone();
        let room_name = room_name.clone();
        let creating = creating.clone();
        let create_error = create_error.clone();
        let created_room = created_room.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name = room_name.trim().to_string();
            if name.is_empty() || *creating {
                return;
            }

            creating.set(true);
            create_error.set(None);

            let admin_password = (*password).clone();
            let creating = creating.clone();
            let create_error = create_error.clone();
            let created_room = created_room.clone();
            spawn_local(async move {
                match ApiService::create_room(&admin_password, name).await {
                    Ok(room) => created_room.set(Some(room)),
                    Err(e) => {
                        tracing::error!("Failed to create room: {:?}", e);
                        create_error.set(Some(
                            "Could not create the room. Please try again.".to_string(),
                        ));
                    }
                }
                creating.set(false);
            });
        })
    };

    let on_copy_link = {
        let created_room = created_room.clone();
        Callback::from(move |_| {
            if let Some(room) = &*created_room {
                clipboard::copy_text(share_link(&room.id));
            }
        })
    };

    let on_go_to_room = {
        let created_room = created_room.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if let (Some(nav), Some(room)) = (navigator.clone(), (*created_room).clone()) {
                nav.push(&Route::Room { room_id: room.id });
            }
        })
    };

    let on_create_another = {
        let created_room = created_room.clone();
        let room_name = room_name.clone();
        Callback::from(move |_| {
            created_room.set(None);
            room_name.set(String::new());
        })
    };

    // Password gate
    if !*authenticated {
        return html! {
            <div class="container narrow">
                <h1>{ "Pick a day" }</h1>
                <p class="subtitle">{ "Enter the admin password" }</p>

                <form class="card" onsubmit={on_password_submit}>
                    <label>{ "Password" }</label>
                    <input
                        type="password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        placeholder="Password"
                    />
                    if let Some(error) = &*password_error {
                        <p class="error">{ error }</p>
                    }
                    <button
                        type="submit"
                        class="btn primary"
                        disabled={password.trim().is_empty() || *verifying}
                    >
                        { if *verifying { "Checking..." } else { "Continue" } }
                    </button>
                </form>
            </div>
        };
    }

    html! {
        <div class="container narrow">
            <h1>{ "Pick a day" }</h1>
            <p class="subtitle">{ "Create a schedule and share the link with your friends" }</p>

            if let Some(room) = &*created_room {
                <div class="card">
                    <h2>{ "Your schedule is ready!" }</h2>
                    <p class="subtitle">{ "Share this link with the participants" }</p>

                    <div class="share-link">{ share_link(&room.id) }</div>

                    <div class="btn-row">
                        <button class="btn" onclick={on_copy_link}>{ "Copy link" }</button>
                        <button class="btn primary" onclick={on_go_to_room}>{ "Open schedule" }</button>
                    </div>

                    <button class="btn link" onclick={on_create_another}>
                        { "Create another schedule" }
                    </button>
                </div>
            } else {
                <form class="card" onsubmit={on_create_submit}>
                    <label>{ "Schedule name" }</label>
                    <input
                        type="text"
                        value={(*room_name).clone()}
                        oninput={on_name_input}
                        placeholder="e.g. February meetup"
                    />
                    if let Some(error) = &*create_error {
                        <p class="error">{ error }</p>
                    }
                    <button
                        type="submit"
                        class="btn primary"
                        disabled={room_name.trim().is_empty() || *creating}
                    >
                        { if *creating { "Creating..." } else { "Create schedule" } }
                    </button>
                </form>
            }
        </div>
    }
}
