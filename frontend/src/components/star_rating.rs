use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StarRatingProps {
    pub rating: u8,
    pub on_rate: Callback<u8>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Five clickable stars; `rating` of 0 means none chosen yet.
#[function_component(StarRating)]
pub fn star_rating(props: &StarRatingProps) -> Html {
    html! {
        <div class="stars">
            { for (1..=5u8).map(|star| {
                let on_rate = props.on_rate.clone();
                let class = if star <= props.rating { "on" } else { "" };
                html! {
                    <button
                        type="button"
                        {class}
                        disabled={props.disabled}
                        aria-label={format!("{star} stars")}
                        onclick={move |_| on_rate.emit(star)}
                    >{ "★" }</button>
                }
            }) }
        </div>
    }
}
