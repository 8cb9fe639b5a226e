use crate::flip::{FlipProvider, use_flip};
use crate::grid::GridView;
use crate::theme::Theme;
use echotango_core::CascadeConfig;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PageProps {
    pub config: CascadeConfig,
    pub seed: u64,
}

#[function_component]
pub(crate) fn Page(props: &PageProps) -> Html {
    let PageProps { config, seed } = props.clone();

    html! {
        <main class="echotango">
            <FlipProvider {config} {seed}>
                <Header/>
                <GridView/>
            </FlipProvider>
        </main>
    }
}

#[function_component]
fn Header() -> Html {
    let flip = use_flip();
    let onclick = Callback::from(move |_: MouseEvent| {
        log::debug!("logo clicked");
        flip.toggle_flip();
    });

    html! {
        <header>
            <button class="logo" {onclick} aria-label="Flip grid">{"ECHO TANGO"}</button>
            <ThemeToggle/>
        </header>
    }
}

#[function_component]
fn ThemeToggle() -> Html {
    let theme = use_state(Theme::current);
    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme.toggled();
            Theme::apply(Some(next));
            theme.set(next);
        })
    };
    let label = format!("Switch to {} theme", theme.toggled().scheme());

    html! {
        <button class={classes!("theme-toggle", theme.scheme())} {onclick} aria-label={label}/>
    }
}
