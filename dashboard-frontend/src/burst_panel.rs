//! Burst queue table.
//!
//! Pure rendering of the authoritative burst list; every mutation goes
//! back through the parent, which re-reads the list from the server.
//! Downloads are plain links: the browser fetches the file directly and
//! no dashboard state changes.

use dashboard_shared::client::download_burst_path;
use dashboard_shared::{Burst, BurstFormat};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BurstPanelProps {
    pub bursts: Vec<Burst>,
    pub on_delete: Callback<i64>,
}

#[function_component(BurstPanel)]
pub fn burst_panel(props: &BurstPanelProps) -> Html {
    if props.bursts.is_empty() {
        return html! {
            <div style="color: #666; font-size: 0.8em; padding: 10px;">
                {"No bursts queued."}
            </div>
        };
    }

    html! {
        <table style="width: 100%; border-collapse: collapse; font-size: 0.75em; color: #00aa00;">
            <thead>
                <tr style="border-bottom: 1px solid #333; text-align: left;">
                    <th>{"ID"}</th>
                    <th>{"Duration"}</th>
                    <th>{"Interval"}</th>
                    <th>{"Exposure"}</th>
                    <th>{"Progress"}</th>
                    <th>{"Download"}</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { for props.bursts.iter().map(|burst| render_row(burst, &props.on_delete)) }
            </tbody>
        </table>
    }
}

fn render_row(burst: &Burst, on_delete: &Callback<i64>) -> Html {
    let id = burst.id;
    let on_delete = on_delete.clone();
    let onclick = Callback::from(move |_: MouseEvent| on_delete.emit(id));

    let downloads: Html = BurstFormat::ALL
        .iter()
        .map(|format| {
            html! {
                <a
                    href={download_burst_path(id, *format)}
                    style="color: #0062cc; margin-right: 5px;"
                >
                    {format.label()}
                </a>
            }
        })
        .collect();

    html! {
        <tr style="border-bottom: 1px solid #222;">
            <td>{id}</td>
            <td>{format!("{}s", burst.duration)}</td>
            <td>{format!("{}s", burst.interval)}</td>
            <td>{burst.params.exposure}</td>
            <td>{format!("{}%", burst.progress)}</td>
            <td>{downloads}</td>
            <td>
                <button
                    {onclick}
                    style="background: #333; color: #ff4444; border: none; padding: 2px 6px; cursor: pointer; font-size: 0.9em;"
                >
                    {"Delete"}
                </button>
            </td>
        </tr>
    }
}
