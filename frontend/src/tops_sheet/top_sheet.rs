use yew::{html, Callback, Component, Context, Html, Properties};

/// Panel that slides down from the top of the viewport while `open`.
pub struct TopSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub open: bool,
    #[prop_or_default]
    pub title: String,
    pub on_close: Callback<()>,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let class = if props.open { "top-sheet show" } else { "top-sheet" };
        let on_close = props.on_close.reform(|_| ());
        html! {
            <div class={class} aria-hidden={(!props.open).to_string()}>
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h2>{ &props.title }</h2>
                    <button class="btn secondary" onclick={on_close}>{ "✕" }</button>
                </div>
                { props.children.clone() }
            </div>
        }
    }
}
