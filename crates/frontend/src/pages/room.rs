use std::rc::Rc;

use chrono::{Datelike, NaiveDate, Utc};
use futures::StreamExt;
use gloo_net::eventsource::futures::EventSource;
use shared_types::{availability, DateSelection, Room};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{board::Board, calendar::Calendar};
use crate::router::Route;
use crate::services::{api::ApiService, clipboard};

#[derive(Properties, PartialEq)]
pub struct RoomPageProps {
    pub room_id: String,
}

/// Monotonic refetch counter. The dispatcher stays valid across renders, so
/// the long-lived event stream task can keep bumping it.
#[derive(PartialEq)]
struct Refresh(u32);

impl Reducible for Refresh {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(Refresh(self.0 + 1))
    }
}

#[function_component(RoomPage)]
pub fn room_page(props: &RoomPageProps) -> Html {
    let room = use_state(|| None::<Room>);
    let selections = use_state(Vec::<DateSelection>::new);
    let loading = use_state(|| true);
    let not_found = use_state(|| false);

    let name_input = use_state(String::new);
    let saved_name = use_state(|| None::<String>);

    let today = Utc::now().date_naive();
    let cursor = use_state(|| (today.year(), today.month()));

    let refresh = use_reducer(|| Refresh(0));

    // Fetch room and selections on mount and whenever a change event lands
    {
        let room = room.clone();
        let selections = selections.clone();
        let loading = loading.clone();
        let not_found = not_found.clone();

        use_effect_with(
            (props.room_id.clone(), refresh.0),
            move |(room_id, _)| {
                let room_id = room_id.clone();
                spawn_local(async move {
                    match ApiService::get_room(&room_id).await {
                        Ok(Some(found)) => {
                            room.set(Some(found));
                            match ApiService::list_selections(&room_id).await {
                                Ok(items) => selections.set(items),
                                Err(e) => {
                                    tracing::error!("Failed to fetch selections: {:?}", e)
                                }
                            }
                        }
                        Ok(None) => not_found.set(true),
                        Err(e) => tracing::error!("Failed to fetch room: {:?}", e),
                    }
                    loading.set(false);
                });
                || ()
            },
        );
    }

    // Live updates: every change event is a refetch hint
    {
        let dispatcher = refresh.dispatcher();

        use_effect_with(props.room_id.clone(), move |room_id| {
            let mut es = EventSource::new(&ApiService::room_events_url(room_id)).ok();

            if let Some(source) = es.as_mut() {
                match source.subscribe("change") {
                    Ok(mut stream) => {
                        spawn_local(async move {
                            while stream.next().await.is_some() {
                                dispatcher.dispatch(());
                            }
                        });
                    }
                    Err(e) => tracing::error!("Failed to subscribe to change feed: {:?}", e),
                }
            }

            // Dropping the EventSource closes the connection on unmount
            move || drop(es)
        });
    }

    let on_name_input = {
        let name_input = name_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name_input.set(input.value());
        })
    };

    let on_name_submit = {
        let name_input = name_input.clone();
        let saved_name = saved_name.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let trimmed = name_input.trim().to_string();
            if !trimmed.is_empty() {
                saved_name.set(Some(trimmed));
            }
        })
    };

    let on_change_name = {
        let name_input = name_input.clone();
        let saved_name = saved_name.clone();
        Callback::from(move |_| {
            saved_name.set(None);
            name_input.set(String::new());
        })
    };

    let on_day_click = {
        let room_id = props.room_id.clone();
        let saved_name = saved_name.clone();
        let dispatcher = refresh.dispatcher();

        Callback::from(move |date: NaiveDate| {
            let Some(name) = (*saved_name).clone() else {
                return;
            };

            let room_id = room_id.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match ApiService::toggle_selection(&room_id, name, date).await {
                    Ok(_) => dispatcher.dispatch(()),
                    Err(e) => tracing::error!("Failed to toggle date: {:?}", e),
                }
            });
        })
    };

    let on_prev_month = {
        let cursor = cursor.clone();
        Callback::from(move |_| {
            let (year, month) = *cursor;
            cursor.set(if month == 1 {
                (year - 1, 12)
            } else {
                (year, month - 1)
            });
        })
    };

    let on_next_month = {
        let cursor = cursor.clone();
        Callback::from(move |_| {
            let (year, month) = *cursor;
            cursor.set(if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            });
        })
    };

    let on_copy_link = Callback::from(|_| {
        if let Some(href) = web_sys::window().and_then(|w| w.location().href().ok()) {
            clipboard::copy_text(href);
        }
    });

    if *loading {
        return html! {
            <div class="container center">
                <div class="spinner"></div>
            </div>
        };
    }

    if *not_found {
        return html! {
            <div class="container center">
                <h2>{ "Schedule not found" }</h2>
                <p class="subtitle">{ "The link is wrong, or the schedule was deleted." }</p>
                <Link<Route> to={Route::Home} classes="btn primary">
                    { "Create a new schedule" }
                </Link<Route>>
            </div>
        };
    }

    let board = availability::tally(&selections);
    let my_dates: Vec<NaiveDate> = match &*saved_name {
        Some(name) => selections
            .iter()
            .filter(|s| &s.name == name)
            .map(|s| s.selected_date)
            .collect(),
        None => Vec::new(),
    };

    let (year, month) = *cursor;
    let room_name = room.as_ref().map(|r| r.name.clone()).unwrap_or_default();

    html! {
        <div class="container">
            <header class="room-header">
                <h1>{ room_name }</h1>
                <button class="btn link" onclick={on_copy_link}>{ "Copy link" }</button>
            </header>

            if let Some(name) = &*saved_name {
                <div class="greeting">
                    <span>
                        { format!("Hi, {}! Pick the dates that work for you.", name) }
                    </span>
                    <button class="btn link" onclick={on_change_name}>{ "Change name" }</button>
                </div>
            } else {
                <form class="name-form" onsubmit={on_name_submit}>
                    <input
                        type="text"
                        value={(*name_input).clone()}
                        oninput={on_name_input}
                        placeholder="Enter your name"
                    />
                    <button
                        type="submit"
                        class="btn primary"
                        disabled={name_input.trim().is_empty()}
                    >
                        { "Continue" }
                    </button>
                </form>
            }

            <div class="room-grid">
                <div class="card">
                    <Calendar
                        {year}
                        {month}
                        selected={my_dates}
                        unanimous={board.unanimous_dates.clone()}
                        enabled={saved_name.is_some()}
                        on_day_click={on_day_click}
                        on_prev_month={on_prev_month}
                        on_next_month={on_next_month}
                    />
                    if saved_name.is_some() {
                        <p class="hint">{ "Click a date to select or deselect it" }</p>
                    }
                </div>

                <div class="card">
                    <h2>{ "Current picks" }</h2>
                    <Board board={board.clone()} current_name={(*saved_name).clone()} />
                </div>
            </div>

            <footer class="center">
                <Link<Route> to={Route::Home} classes="btn link">
                    { "Create a new schedule" }
                </Link<Route>>
            </footer>
        </div>
    }
}
