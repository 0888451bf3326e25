use chrono::{Datelike, NaiveDate};
use yew::prelude::*;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub year: i32,
    pub month: u32,
    /// The current participant's picks.
    pub selected: Vec<NaiveDate>,
    /// Dates on which every participant is available.
    pub unanimous: Vec<NaiveDate>,
    /// Days only become clickable once a name has been entered.
    pub enabled: bool,
    pub on_day_click: Callback<NaiveDate>,
    pub on_prev_month: Callback<()>,
    pub on_next_month: Callback<()>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let Some(first) = NaiveDate::from_ymd_opt(props.year, props.month, 1) else {
        return html! {};
    };

    let offset = first.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(props.year, props.month);

    let on_prev = {
        let cb = props.on_prev_month.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_next = {
        let cb = props.on_next_month.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let mut cells: Vec<Html> = Vec::with_capacity(offset + day_count as usize);
    for _ in 0..offset {
        cells.push(html! { <div class="day blank"></div> });
    }
    for day in 1..=day_count {
        let Some(date) = NaiveDate::from_ymd_opt(props.year, props.month, day) else {
            continue;
        };

        let is_selected = props.selected.contains(&date);
        let is_unanimous = props.unanimous.contains(&date);

        let onclick = props.enabled.then(|| {
            let cb = props.on_day_click.clone();
            Callback::from(move |_| cb.emit(date))
        });

        cells.push(html! {
            <button
                key={date.to_string()}
                class={classes!(
                    "day",
                    is_selected.then_some("selected"),
                    is_unanimous.then_some("unanimous"),
                )}
                disabled={!props.enabled}
                {onclick}
            >
                { day }
            </button>
        });
    }

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="month-nav" onclick={on_prev}>{ "\u{2039}" }</button>
                <span class="month-label">{ first.format("%B %Y").to_string() }</span>
                <button class="month-nav" onclick={on_next}>{ "\u{203a}" }</button>
            </div>
            <div class="calendar-grid">
                { for WEEKDAY_LABELS.iter().map(|label| html! {
                    <div class="weekday">{ *label }</div>
                }) }
                { for cells }
            </div>
        </div>
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}
