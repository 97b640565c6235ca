//! Small reusable controls for the dashboard panels.

use yew::prelude::*;

/// Camera-parameter slider with its paired value label.
///
/// The label mirrors the control locally on every edit; no network round
/// trip is involved until a request snapshots the value.
#[derive(Properties, PartialEq)]
pub struct ParamSliderProps {
    pub label: AttrValue,
    pub value: i64,
    pub min: i64,
    pub max: i64,
    #[prop_or(false)]
    pub disabled: bool,
    pub oninput: Callback<i64>,
}

#[function_component(ParamSlider)]
pub fn param_slider(props: &ParamSliderProps) -> Html {
    let oninput = props.oninput.clone();
    let oninput_handler = Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        if let Ok(val) = input.value().parse::<i64>() {
            oninput.emit(val);
        }
    });

    html! {
        <div class="metadata-item" style="margin-top: 5px;">
            <span style="font-size: 0.8em;">{format!("{}: ", props.label)}
                <span class="range-value">{props.value}</span>
            </span><br/>
            <input
                type="range"
                min={props.min.to_string()}
                max={props.max.to_string()}
                value={props.value.to_string()}
                disabled={props.disabled}
                oninput={oninput_handler}
                style="width: 100%; accent-color: #00ff00;"
            />
        </div>
    }
}

/// Checkbox for the processing options.
#[derive(Properties, PartialEq)]
pub struct OptionCheckboxProps {
    pub label: AttrValue,
    pub checked: bool,
    pub onchange: Callback<()>,
}

#[function_component(OptionCheckbox)]
pub fn option_checkbox(props: &OptionCheckboxProps) -> Html {
    let onchange = props.onchange.clone();
    let onchange_handler = Callback::from(move |_| onchange.emit(()));

    html! {
        <div class="metadata-item" style="margin-top: 5px;">
            <label style="cursor: pointer; font-size: 0.8em;">
                <input
                    type="checkbox"
                    checked={props.checked}
                    onchange={onchange_handler}
                    style="width: 16px; height: 16px; vertical-align: middle;"
                />
                <span style="margin-left: 5px;">{&props.label}</span>
            </label>
        </div>
    }
}

/// Button that triggers a workflow; disabled and relabeled while the
/// workflow's request is in flight.
#[derive(Properties, PartialEq)]
pub struct ActionButtonProps {
    pub label: AttrValue,
    pub pending_label: AttrValue,
    #[prop_or_default]
    pub pending: bool,
    #[prop_or_default]
    pub disabled: bool,
    pub onclick: Callback<()>,
}

#[function_component(ActionButton)]
pub fn action_button(props: &ActionButtonProps) -> Html {
    let onclick = props.onclick.clone();
    let onclick_handler = Callback::from(move |_: MouseEvent| onclick.emit(()));

    html! {
        <div style="margin-top: 10px;">
            <button
                onclick={onclick_handler}
                disabled={props.pending || props.disabled}
                style="background: #00ff00; color: #000; border: none; padding: 5px 15px; cursor: pointer; font-family: 'Courier New', monospace;"
            >
                { if props.pending { props.pending_label.clone() } else { props.label.clone() } }
            </button>
        </div>
    }
}

/// Numeric input for the burst form (seconds).
#[derive(Properties, PartialEq)]
pub struct NumberInputProps {
    pub label: AttrValue,
    pub value: u32,
    #[prop_or(1)]
    pub min: u32,
    pub onchange: Callback<u32>,
}

#[function_component(NumberInput)]
pub fn number_input(props: &NumberInputProps) -> Html {
    let onchange = props.onchange.clone();
    let onchange_handler = Callback::from(move |e: Event| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        if let Ok(val) = input.value().parse::<u32>() {
            onchange.emit(val);
        }
    });

    html! {
        <div class="metadata-item" style="margin-top: 5px;">
            <span style="font-size: 0.8em;">{format!("{}: ", props.label)}</span>
            <input
                type="number"
                min={props.min.to_string()}
                value={props.value.to_string()}
                onchange={onchange_handler}
                style="width: 70px; background: #111; color: #00ff00; border: 1px solid #333; padding: 3px; font-family: 'Courier New', monospace; font-size: 0.8em;"
            />
        </div>
    }
}

/// Trailing-window selector for the telemetry charts.
#[derive(Properties, PartialEq)]
pub struct WindowSelectProps {
    pub minutes: u32,
    pub onchange: Callback<u32>,
}

const WINDOW_CHOICES: &[(u32, &str)] = &[
    (5, "Last 5 minutes"),
    (15, "Last 15 minutes"),
    (30, "Last 30 minutes"),
    (60, "Last hour"),
    (180, "Last 3 hours"),
];

#[function_component(WindowSelect)]
pub fn window_select(props: &WindowSelectProps) -> Html {
    let onchange = props.onchange.clone();
    let onchange_handler = Callback::from(move |e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        if let Ok(val) = select.value().parse::<u32>() {
            onchange.emit(val);
        }
    });

    let options: Html = WINDOW_CHOICES
        .iter()
        .map(|(minutes, label)| {
            html! {
                <option value={minutes.to_string()} selected={*minutes == props.minutes}>
                    {*label}
                </option>
            }
        })
        .collect();

    html! {
        <select
            onchange={onchange_handler}
            style="background: #111; color: #00ff00; border: 1px solid #333; padding: 3px; font-family: 'Courier New', monospace; font-size: 0.8em;"
        >
            { options }
        </select>
    }
}

/// Status line for surfaced transport failures and local rejections.
#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div style="font-size: 0.8em; color: #ff4444; margin-top: 5px;">
                {message.clone()}
            </div>
        },
        None => html! {},
    }
}
