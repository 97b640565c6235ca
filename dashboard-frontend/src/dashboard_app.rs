//! The dashboard page: camera controls, capture/process workflows, burst
//! queue, and telemetry charts, all talking to the camera server over its
//! HTTP API.

use std::collections::BTreeMap;

use dashboard_shared::{
    evaluate_results, histogram_dataset, reshape, BurstAck, CameraParams, CameraServerClient,
    CaptureWorkflow, ChartDataset, FrameResponse, MetricSample, ProcessOptions, ProcessResponse,
    ReportEntry, ResultPanel, Severity, WorkflowKind, WorkflowRejection,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::burst_panel::BurstPanel;
use crate::charts::{ChartSink, METRIC_CHARTS};
use crate::components::{
    ActionButton, NumberInput, OptionCheckbox, ParamSlider, StatusLine, WindowSelect,
};
use crate::report_log::{ReportLog, TimedEntry};

/// Device ranges for the parameter sliders.
const BRIGHTNESS_RANGE: (i64, i64) = (0, 255);
const GAMMA_RANGE: (i64, i64) = (1, 500);
const GAIN_RANGE: (i64, i64) = (0, 63);
const EXPOSURE_RANGE: (i64, i64) = (1, 5000);
const THRESHOLD_RANGE: (i64, i64) = (0, 255);

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Brightness,
    Gamma,
    Gain,
    Exposure,
}

pub struct DashboardApp {
    params: CameraParams,
    process_opts: ProcessOptions,
    workflow: CaptureWorkflow,
    // Render-only copies of backend-owned image data.
    frame_b64: Option<String>,
    thresh_b64: Option<String>,
    pattern_b64: Option<String>,
    active_panel: ResultPanel,
    report: Vec<TimedEntry>,
    show_upload: bool,
    upload_input: NodeRef,
    // Burst queue, replaced wholesale on every refresh.
    bursts: Vec<dashboard_shared::Burst>,
    burst_duration: u32,
    burst_interval: u32,
    // Telemetry datasets, redrawn after every render.
    metrics_minutes: u32,
    metric_datasets: BTreeMap<String, ChartDataset>,
    hist_dataset: Option<ChartDataset>,
    status: Option<String>,
}

pub enum Msg {
    // Camera parameters
    ParamsLoaded(CameraParams),
    ParamEdited(ParamField, i64),
    // Capture / upload / process workflows
    TriggerCapture,
    CaptureDone(FrameResponse),
    OpenUpload,
    CloseUpload,
    TriggerUpload,
    UploadDone(FrameResponse),
    TriggerProcess,
    ProcessDone(Box<ProcessResponse>),
    WorkflowFailed(WorkflowKind, String),
    // Processing options
    ToggleAutoThreshold,
    ToggleLabelGuideStars,
    ThresholdEdited(i64),
    SelectPanel(ResultPanel),
    // Burst queue
    SetBurstDuration(u32),
    SetBurstInterval(u32),
    EnqueueBurst,
    BurstQueued(BurstAck),
    DeleteBurst(i64),
    BurstDeleted,
    RefreshBursts,
    BurstsLoaded(Vec<dashboard_shared::Burst>),
    // Telemetry
    SetMetricsWindow(u32),
    RefreshMetrics,
    MetricsLoaded(BTreeMap<String, Vec<MetricSample>>),
    // Surfaced transport failures outside the capture workflows
    RequestFailed(String),
}

impl Component for DashboardApp {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        // Initial loads the page fires once: current camera parameters,
        // the burst queue, and the default telemetry window.
        let link = ctx.link().clone();
        spawn_local(async move {
            let client = CameraServerClient::for_web();
            match client.get_camera_params().await {
                Ok(params) => link.send_message(Msg::ParamsLoaded(params)),
                Err(e) => {
                    link.send_message(Msg::RequestFailed(format!("camera params: {e}")));
                }
            }
        });
        ctx.link().send_message(Msg::RefreshBursts);
        ctx.link().send_message(Msg::RefreshMetrics);

        Self {
            params: CameraParams::default(),
            process_opts: ProcessOptions::default(),
            workflow: CaptureWorkflow::new(),
            frame_b64: None,
            thresh_b64: None,
            pattern_b64: None,
            active_panel: ResultPanel::Frame,
            report: Vec::new(),
            show_upload: false,
            upload_input: NodeRef::default(),
            bursts: Vec::new(),
            burst_duration: 60,
            burst_interval: 5,
            metrics_minutes: 5,
            metric_datasets: BTreeMap::new(),
            hist_dataset: None,
            status: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ParamsLoaded(params) => {
                self.params = params;
                true
            }
            Msg::ParamEdited(field, value) => {
                match field {
                    ParamField::Brightness => self.params.brightness = value,
                    ParamField::Gamma => self.params.gamma = value,
                    ParamField::Gain => self.params.gain = value,
                    ParamField::Exposure => self.params.exposure = value,
                }
                true
            }
            Msg::TriggerCapture => match self.workflow.try_begin(WorkflowKind::Capture) {
                Err(rejection) => {
                    web_sys::console::log_1(&rejection.to_string().into());
                    false
                }
                Ok(()) => {
                    self.status = None;
                    // Snapshot at submission: the values the sliders hold now.
                    let params = self.params;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let client = CameraServerClient::for_web();
                        match client.get_current_frame(&params).await {
                            Ok(frame) => link.send_message(Msg::CaptureDone(frame)),
                            Err(e) => link.send_message(Msg::WorkflowFailed(
                                WorkflowKind::Capture,
                                e.to_string(),
                            )),
                        }
                    });
                    true
                }
            },
            Msg::CaptureDone(frame) => {
                self.workflow.finish(WorkflowKind::Capture);
                self.workflow.set_image(frame.uuid);
                self.frame_b64 = Some(frame.b64_img);
                self.active_panel = ResultPanel::Frame;
                true
            }
            Msg::OpenUpload => {
                self.show_upload = true;
                true
            }
            Msg::CloseUpload => {
                self.show_upload = false;
                true
            }
            Msg::TriggerUpload => match self.workflow.try_begin(WorkflowKind::Upload) {
                Err(rejection) => {
                    web_sys::console::log_1(&rejection.to_string().into());
                    false
                }
                Ok(()) => {
                    let file = self
                        .upload_input
                        .cast::<HtmlInputElement>()
                        .and_then(|input| input.files())
                        .and_then(|files| files.get(0));

                    let Some(file) = file else {
                        self.workflow.finish(WorkflowKind::Upload);
                        self.status = Some("Select an image file to upload".to_string());
                        return true;
                    };

                    let form = web_sys::FormData::new()
                        .and_then(|form| form.append_with_blob("image", &file).map(|()| form));
                    let Ok(form) = form else {
                        self.workflow.finish(WorkflowKind::Upload);
                        self.status = Some("Could not build the upload payload".to_string());
                        return true;
                    };

                    self.status = None;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let client = CameraServerClient::for_web();
                        match client.upload_image(&form).await {
                            Ok(frame) => link.send_message(Msg::UploadDone(frame)),
                            Err(e) => link.send_message(Msg::WorkflowFailed(
                                WorkflowKind::Upload,
                                e.to_string(),
                            )),
                        }
                    });
                    true
                }
            },
            Msg::UploadDone(frame) => {
                // An upload replaces the active image exactly as a capture
                // would, then the dialog closes.
                self.workflow.finish(WorkflowKind::Upload);
                self.workflow.set_image(frame.uuid);
                self.frame_b64 = Some(frame.b64_img);
                self.active_panel = ResultPanel::Frame;
                self.show_upload = false;
                true
            }
            Msg::TriggerProcess => match self.workflow.try_begin(WorkflowKind::Process) {
                Err(rejection @ WorkflowRejection::NoActiveImage) => {
                    // Rejected locally, before any request.
                    web_sys::console::log_1(&rejection.to_string().into());
                    self.status = Some(rejection.to_string());
                    true
                }
                Err(rejection) => {
                    web_sys::console::log_1(&rejection.to_string().into());
                    false
                }
                Ok(()) => {
                    let Some(uuid) = self.workflow.image_uuid().map(str::to_string) else {
                        self.workflow.finish(WorkflowKind::Process);
                        return false;
                    };
                    self.status = None;
                    self.report.clear();
                    let opts = self.process_opts;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let client = CameraServerClient::for_web();
                        match client.process_image(&uuid, &opts).await {
                            Ok(resp) => link.send_message(Msg::ProcessDone(Box::new(resp))),
                            Err(e) => link.send_message(Msg::WorkflowFailed(
                                WorkflowKind::Process,
                                e.to_string(),
                            )),
                        }
                    });
                    true
                }
            },
            Msg::ProcessDone(resp) => {
                self.workflow.finish(WorkflowKind::Process);

                let outcome = evaluate_results(&resp.results);
                self.active_panel = outcome.active_panel;
                let now = js_sys::Date::now();
                self.report.extend(
                    outcome
                        .entries
                        .into_iter()
                        .map(|entry| TimedEntry::new(now, entry)),
                );

                self.thresh_b64 = Some(resp.b64_thresh_img.clone());
                if resp.pattern {
                    self.pattern_b64 = resp.pattern_points.clone();
                }
                self.hist_dataset = Some(histogram_dataset(&resp.histogram_counts()));
                true
            }
            Msg::WorkflowFailed(kind, message) => {
                self.workflow.finish(kind);
                let message = format!("{} failed: {message}", kind.as_str());
                web_sys::console::error_1(&message.clone().into());
                self.status = Some(message);
                true
            }
            Msg::ToggleAutoThreshold => {
                self.process_opts.auto_threshold = !self.process_opts.auto_threshold;
                true
            }
            Msg::ToggleLabelGuideStars => {
                self.process_opts.label_guide_stars = !self.process_opts.label_guide_stars;
                true
            }
            Msg::ThresholdEdited(value) => {
                self.process_opts.threshold = value;
                true
            }
            Msg::SelectPanel(panel) => {
                self.active_panel = panel;
                true
            }
            Msg::SetBurstDuration(value) => {
                self.burst_duration = value;
                true
            }
            Msg::SetBurstInterval(value) => {
                self.burst_interval = value;
                true
            }
            Msg::EnqueueBurst => {
                let duration = self.burst_duration;
                let interval = self.burst_interval;
                // Same snapshot rule as capture.
                let params = self.params;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let client = CameraServerClient::for_web();
                    match client.queue_burst(duration, interval, &params).await {
                        Ok(ack) => link.send_message(Msg::BurstQueued(ack)),
                        Err(e) => {
                            link.send_message(Msg::RequestFailed(format!("queue burst: {e}")));
                        }
                    }
                });
                false
            }
            Msg::BurstQueued(ack) => {
                if ack.is_ok() {
                    // Never an optimistic insert: re-read the server's list.
                    ctx.link().send_message(Msg::RefreshBursts);
                    false
                } else {
                    // The server rejected the burst; that is report data.
                    self.report.push(TimedEntry::new(
                        js_sys::Date::now(),
                        ReportEntry::new(Severity::Failure, ack.msg),
                    ));
                    true
                }
            }
            Msg::DeleteBurst(burst_id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let client = CameraServerClient::for_web();
                    match client.delete_burst(burst_id).await {
                        Ok(()) => link.send_message(Msg::BurstDeleted),
                        Err(e) => {
                            link.send_message(Msg::RequestFailed(format!("delete burst: {e}")));
                        }
                    }
                });
                false
            }
            Msg::BurstDeleted => {
                ctx.link().send_message(Msg::RefreshBursts);
                false
            }
            Msg::RefreshBursts => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let client = CameraServerClient::for_web();
                    match client.get_bursts().await {
                        Ok(bursts) => link.send_message(Msg::BurstsLoaded(bursts)),
                        Err(e) => {
                            link.send_message(Msg::RequestFailed(format!("burst list: {e}")));
                        }
                    }
                });
                false
            }
            Msg::BurstsLoaded(bursts) => {
                self.bursts = bursts;
                true
            }
            Msg::SetMetricsWindow(minutes) => {
                self.metrics_minutes = minutes;
                true
            }
            Msg::RefreshMetrics => {
                let minutes = self.metrics_minutes;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let client = CameraServerClient::for_web();
                    match client.get_metrics(minutes).await {
                        Ok(payload) => link.send_message(Msg::MetricsLoaded(payload)),
                        Err(e) => {
                            link.send_message(Msg::RequestFailed(format!("metrics: {e}")));
                        }
                    }
                });
                false
            }
            Msg::MetricsLoaded(payload) => {
                for (metric, samples) in payload {
                    match reshape(&metric, &samples) {
                        Ok(dataset) => {
                            self.metric_datasets.insert(metric, dataset);
                        }
                        Err(e) => {
                            // Leave that chart at its last known state.
                            web_sys::console::warn_1(&e.to_string().into());
                        }
                    }
                }
                true
            }
            Msg::RequestFailed(message) => {
                web_sys::console::error_1(&message.clone().into());
                self.status = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <div class="column left-panel">
                    { self.view_camera_controls(ctx) }
                    { self.view_processing_controls(ctx) }
                    { self.view_burst_form(ctx) }
                </div>

                <div class="column center-panel">
                    { self.view_result_tabs(ctx) }
                    { self.view_result_panel() }
                    <StatusLine message={self.status.clone()} />
                </div>

                <div class="column right-panel">
                    <h2>{"Histogram"}</h2>
                    <canvas id="chart-histogram" width="300" height="150" style="width: 100%;"></canvas>

                    <h2 style="margin-top: 20px;">{"Results"}</h2>
                    <ReportLog entries={self.report.clone()} />

                    <h2 style="margin-top: 20px;">{"Burst Queue"}</h2>
                    <BurstPanel
                        bursts={self.bursts.clone()}
                        on_delete={ctx.link().callback(Msg::DeleteBurst)}
                    />

                    { self.view_telemetry(ctx) }
                </div>
            </>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(dataset) = &self.hist_dataset {
            ChartSink::histogram().update(dataset);
        }
        for spec in METRIC_CHARTS {
            if let Some(dataset) = self.metric_datasets.get(spec.metric) {
                spec.sink().update(dataset);
            }
        }
    }
}

impl DashboardApp {
    fn view_camera_controls(&self, ctx: &Context<Self>) -> Html {
        let slider = |label: &'static str, value, (min, max), field: ParamField| {
            let oninput = ctx
                .link()
                .callback(move |v: i64| Msg::ParamEdited(field, v));
            html! {
                <ParamSlider {label} {value} {min} {max} {oninput} />
            }
        };

        html! {
            <>
                <h2>{"Camera Parameters"}</h2>
                { slider("Brightness", self.params.brightness, BRIGHTNESS_RANGE, ParamField::Brightness) }
                { slider("Gamma", self.params.gamma, GAMMA_RANGE, ParamField::Gamma) }
                { slider("Gain", self.params.gain, GAIN_RANGE, ParamField::Gain) }
                { slider("Exposure", self.params.exposure, EXPOSURE_RANGE, ParamField::Exposure) }

                <ActionButton
                    label="Get Frame"
                    pending_label="Capturing..."
                    pending={self.workflow.is_busy(WorkflowKind::Capture)}
                    onclick={ctx.link().callback(|_| Msg::TriggerCapture)}
                />

                { self.view_upload(ctx) }
            </>
        }
    }

    fn view_upload(&self, ctx: &Context<Self>) -> Html {
        if !self.show_upload {
            return html! {
                <ActionButton
                    label="Upload Image..."
                    pending_label=""
                    onclick={ctx.link().callback(|_| Msg::OpenUpload)}
                />
            };
        }

        html! {
            <div style="border: 1px solid #333; padding: 10px; margin-top: 10px; background: #0a0a0a;">
                <input
                    type="file"
                    accept="image/*"
                    ref={self.upload_input.clone()}
                    style="font-size: 0.8em; color: #00aa00;"
                />
                <ActionButton
                    label="Upload"
                    pending_label="Uploading..."
                    pending={self.workflow.is_busy(WorkflowKind::Upload)}
                    onclick={ctx.link().callback(|_| Msg::TriggerUpload)}
                />
                <ActionButton
                    label="Cancel"
                    pending_label=""
                    disabled={self.workflow.is_busy(WorkflowKind::Upload)}
                    onclick={ctx.link().callback(|_| Msg::CloseUpload)}
                />
            </div>
        }
    }

    fn view_processing_controls(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <h2 style="margin-top: 20px;">{"Star Detection"}</h2>
                <OptionCheckbox
                    label="Auto threshold"
                    checked={self.process_opts.auto_threshold}
                    onchange={ctx.link().callback(|_| Msg::ToggleAutoThreshold)}
                />
                <ParamSlider
                    label="Threshold"
                    value={self.process_opts.threshold}
                    min={THRESHOLD_RANGE.0}
                    max={THRESHOLD_RANGE.1}
                    disabled={self.process_opts.auto_threshold}
                    oninput={ctx.link().callback(Msg::ThresholdEdited)}
                />
                <OptionCheckbox
                    label="Label guide stars"
                    checked={self.process_opts.label_guide_stars}
                    onchange={ctx.link().callback(|_| Msg::ToggleLabelGuideStars)}
                />
                <ActionButton
                    label="Process Image"
                    pending_label="Processing..."
                    pending={self.workflow.is_busy(WorkflowKind::Process)}
                    onclick={ctx.link().callback(|_| Msg::TriggerProcess)}
                />
            </>
        }
    }

    fn view_burst_form(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <h2 style="margin-top: 20px;">{"Queue Burst"}</h2>
                <NumberInput
                    label="Duration (s)"
                    value={self.burst_duration}
                    onchange={ctx.link().callback(Msg::SetBurstDuration)}
                />
                <NumberInput
                    label="Interval (s)"
                    value={self.burst_interval}
                    onchange={ctx.link().callback(Msg::SetBurstInterval)}
                />
                <ActionButton
                    label="Queue Burst"
                    pending_label=""
                    onclick={ctx.link().callback(|_| Msg::EnqueueBurst)}
                />
            </>
        }
    }

    fn view_result_tabs(&self, ctx: &Context<Self>) -> Html {
        let tab = |label: &'static str, panel: ResultPanel| {
            let active = self.active_panel == panel;
            let style = if active {
                "background: #00ff00; color: #000; border: none; padding: 4px 12px; cursor: pointer; font-family: 'Courier New', monospace;"
            } else {
                "background: #111; color: #00aa00; border: 1px solid #333; padding: 4px 12px; cursor: pointer; font-family: 'Courier New', monospace;"
            };
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::SelectPanel(panel));
            html! {
                <button {style} {onclick}>{label}</button>
            }
        };

        html! {
            <div style="display: flex; gap: 5px; margin-bottom: 5px;">
                { tab("Frame", ResultPanel::Frame) }
                { tab("Threshold", ResultPanel::Threshold) }
                { tab("Pattern", ResultPanel::Pattern) }
            </div>
        }
    }

    fn view_result_panel(&self) -> Html {
        let image = match self.active_panel {
            ResultPanel::Frame => &self.frame_b64,
            ResultPanel::Threshold => &self.thresh_b64,
            ResultPanel::Pattern => &self.pattern_b64,
        };
        let busy = self.workflow.any_busy();

        let content = match image {
            Some(b64) => html! {
                <img
                    class="image-frame"
                    src={format!("data:image/jpeg;base64,{b64}")}
                    alt="Result"
                    style={if busy { "filter: brightness(0.25); display: block;" } else { "display: block;" }}
                />
            },
            None => html! {
                <div style="color: #666; text-align: center; padding: 60px 0;">
                    {"No image yet. Capture or upload a frame."}
                </div>
            },
        };

        html! {
            <div class="image-container" style="position: relative;">
                { content }
                if busy {
                    <div style="position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #00ff00; font-family: 'Courier New', monospace;">
                        {"Working..."}
                    </div>
                }
            </div>
        }
    }

    fn view_telemetry(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <h2 style="margin-top: 20px;">{"Telemetry"}</h2>
                <div style="display: flex; gap: 5px; align-items: center;">
                    <WindowSelect
                        minutes={self.metrics_minutes}
                        onchange={ctx.link().callback(Msg::SetMetricsWindow)}
                    />
                    <ActionButton
                        label="Refresh"
                        pending_label=""
                        onclick={ctx.link().callback(|_| Msg::RefreshMetrics)}
                    />
                </div>
                { for METRIC_CHARTS.iter().map(|spec| html! {
                    <div style="margin-top: 10px;">
                        <div style="font-size: 0.8em; color: #00aa00;">{spec.title}</div>
                        <canvas id={spec.canvas_id()} width="300" height="120" style="width: 100%;"></canvas>
                    </div>
                }) }
            </>
        }
    }
}
