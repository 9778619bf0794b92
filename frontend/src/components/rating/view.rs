use common::model::language::Language;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{Msg, Phase, RatingPage};
use crate::app::Route;
use crate::components::star_rating::StarRating;
use crate::i18n::texts;

pub fn view(page: &RatingPage, ctx: &Context<RatingPage>) -> Html {
    let t = texts(page.language);
    let link = ctx.link();

    let exhibit = match (page.phase, &page.exhibit) {
        (Phase::Loading, _) => return html! { <div class="page"><p>{ t.loading }</p></div> },
        (Phase::NotFound, _) | (_, None) => {
            return html! { <div class="page"><div class="card"><h2>{ t.model_not_found }</h2></div></div> };
        }
        (_, Some(exhibit)) => exhibit,
    };

    if page.phase == Phase::Rated {
        let on_navigate = ctx.props().on_navigate.clone();
        return html! {
            <div class="page">
                <div class="card" style="text-align: center;">
                    <h2>{ t.thanks }</h2>
                    <p>{ t.already_rated }</p>
                    <button class="btn" onclick={move |_| on_navigate.emit(Route::Dashboard)}>{ t.view_dashboard }</button>
                </div>
            </div>
        };
    }

    let on_language = link.callback(|e: Event| {
        let code = e.target_unchecked_into::<HtmlSelectElement>().value();
        Msg::SetLanguage(Language::from_code(&code).unwrap_or_default())
    });
    let on_comments = link.callback(|e: InputEvent| Msg::SetComments(e.target_unchecked_into::<HtmlTextAreaElement>().value()));
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let class = if page.language.is_rtl() { "page rtl" } else { "page" };

    html! {
        <div {class}>
            <div class="card">
                <div style="display: flex; justify-content: space-between;">
                    <div>
                        <h1>{ t.rate_title }</h1>
                        <p>{ format!("Model #{}", exhibit.model_number) }</p>
                    </div>
                    <select onchange={on_language}>
                        { for Language::ALL.iter().map(|lang| html! {
                            <option value={lang.code()} selected={*lang == page.language}>{ texts(*lang).language_name }</option>
                        }) }
                    </select>
                </div>
                <h2>{ exhibit.name(page.language) }</h2>
                <p>{ &exhibit.location }</p>
                <p>{ exhibit.description(page.language) }</p>
                <form {onsubmit}>
                    <StarRating rating={page.stars} on_rate={link.callback(Msg::SetStars)} disabled={page.submitting} />
                    <label class="field">{ t.comments }
                        <textarea rows="3" value={page.comments.clone()} oninput={on_comments} />
                    </label>
                    <button class="btn" type="submit" disabled={page.submitting}>
                        { if page.submitting { t.submitting } else { t.submit } }
                    </button>
                </form>
            </div>
        </div>
    }
}
