use shared_types::AvailabilityBoard;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    pub board: AvailabilityBoard,
    /// Name of the participant using this page, highlighted in the chips.
    pub current_name: Option<String>,
}

/// The per-date status board: unanimous dates first, then every selected
/// date with its names, then the participant list.
#[function_component(Board)]
pub fn board(props: &BoardProps) -> Html {
    let board = &props.board;

    if board.is_empty() {
        return html! {
            <p class="empty-state">{ "No dates selected yet" }</p>
        };
    }

    let total = board.participants.len();

    html! {
        <>
            if !board.unanimous_dates.is_empty() {
                <div class="unanimous-panel">
                    <h3>{ "Everyone can make it" }</h3>
                    <div class="chip-row">
                        { for board.unanimous_dates.iter().map(|date| html! {
                            <span key={date.to_string()} class="chip chip-unanimous">
                                { date.format("%b %-d (%a)").to_string() }
                            </span>
                        }) }
                    </div>
                </div>
            }

            <div class="date-rows">
                { for board.dates.iter().map(|tally| html! {
                    <div key={tally.date.to_string()} class="date-row">
                        <span class="date-label">
                            { tally.date.format("%b %-d (%a)").to_string() }
                        </span>
                        <div class="date-names">
                            { for tally.names.iter().map(|name| {
                                let mine = props.current_name.as_deref() == Some(name.as_str());
                                html! {
                                    <span class={classes!("chip", mine.then_some("chip-self"))}>
                                        { name }
                                    </span>
                                }
                            }) }
                            <span class="date-count">{ tally.names.len() }</span>
                        </div>
                    </div>
                }) }
            </div>

            <div class="participants">
                <h3>{ format!("Participants ({})", total) }</h3>
                <div class="chip-row">
                    { for board.participants.iter().map(|name| {
                        let mine = props.current_name.as_deref() == Some(name.as_str());
                        html! {
                            <span class={classes!("chip", mine.then_some("chip-self"))}>
                                { name }
                            </span>
                        }
                    }) }
                </div>
            </div>
        </>
    }
}
