use dashboard_frontend::DashboardApp;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <DashboardApp />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
