use common::feedback::{FeedbackForm, Step};
use common::model::feedback::Question;
use common::model::language::Language;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{FeedbackPage, Msg, PersonalField};
use crate::i18n::{texts, Texts};

pub fn view(page: &FeedbackPage, ctx: &Context<FeedbackPage>) -> Html {
    let form = &page.form;
    let t = texts(form.language());
    let link = ctx.link();

    if page.submitted {
        return html! {
            <div class="page">
                <div class="card" style="text-align: center;">
                    <h1>{ t.thank_you }</h1>
                    <button class="btn" onclick={link.callback(|_| Msg::Home)}>{ t.back_home }</button>
                </div>
            </div>
        };
    }

    let step = form.current();
    if step == Step::Language {
        return language_choice(ctx);
    }

    let class = if form.language().is_rtl() { "page rtl" } else { "page" };
    let body = match step {
        Step::Personal => personal(form, t, ctx),
        Step::Question(question) => question_step(form, question, ctx),
        Step::FinalThoughts | Step::Language => final_thoughts(form, t, ctx),
    };

    html! {
        <div {class}>
            <div class="card">
                <h1>{ t.feedback_title }</h1>
                <p>{ format!("{} {} {} {}", t.step, form.step, t.of, FeedbackForm::TOTAL_STEPS) }</p>
                <div class="progress"><div style={format!("width: {:.0}%;", form.progress_percent())}></div></div>
                <h2>{ title(step, t) }</h2>
                { body }
                if let Some(error) = &page.error {
                    <p class="error">{ error }</p>
                }
                <div style="display: flex; justify-content: space-between; margin-top: 16px;">
                    <button class="btn secondary" onclick={link.callback(|_| Msg::Previous)}>{ t.previous }</button>
                    if form.is_last_step() {
                        <button class="btn" disabled={page.submitting} onclick={link.callback(|_| Msg::Submit)}>
                            { t.submit_feedback }
                        </button>
                    } else {
                        <button class="btn" onclick={link.callback(|_| Msg::Next)}>{ t.next }</button>
                    }
                </div>
            </div>
        </div>
    }
}

fn title(step: Step, t: &Texts) -> &'static str {
    match step {
        Step::Language | Step::Personal => t.personal_info,
        Step::Question(question) => t.question(question),
        Step::FinalThoughts => t.final_thoughts,
    }
}

fn language_choice(ctx: &Context<FeedbackPage>) -> Html {
    let link = ctx.link();
    html! {
        <div class="page">
            <div class="card" style="text-align: center;">
                <h1>{ "Share Your Experience" }</h1>
                <p>{ "Select Language" }</p>
                <div class="grid">
                    { for [Language::English, Language::RomanUrdu, Language::Urdu, Language::Kannada].into_iter().map(|lang| html! {
                        <button class="btn" onclick={link.callback(move |_| Msg::Choose(lang))}>
                            { texts(lang).language_name }
                        </button>
                    }) }
                </div>
                <button class="btn secondary" style="margin-top: 16px;" onclick={link.callback(|_| Msg::Home)}>
                    { "Back to Home" }
                </button>
            </div>
        </div>
    }
}

fn text_input(ctx: &Context<FeedbackPage>, label: &str, field: PersonalField, value: &str, kind: &str) -> Html {
    let oninput = ctx
        .link()
        .callback(move |e: InputEvent| Msg::Personal(field, e.target_unchecked_into::<HtmlInputElement>().value()));
    html! {
        <label class="field">{ label }
            <input type={kind.to_string()} value={value.to_string()} {oninput} />
        </label>
    }
}

fn personal(form: &FeedbackForm, t: &Texts, ctx: &Context<FeedbackPage>) -> Html {
    html! {
        <>
            { text_input(ctx, t.your_name, PersonalField::Name, &form.name, "text") }
            { text_input(ctx, t.place_from, PersonalField::Place, &form.place, "text") }
            { text_input(ctx, t.mobile, PersonalField::Mobile, &form.mobile, "tel") }
            { text_input(ctx, t.email, PersonalField::Email, &form.email, "email") }
            { text_input(ctx, t.profession, PersonalField::Profession, &form.profession, "text") }
            { text_input(ctx, t.accompanying, PersonalField::AccompanyingCount, &form.accompanying_count, "number") }
        </>
    }
}

fn question_step(form: &FeedbackForm, question: Question, ctx: &Context<FeedbackPage>) -> Html {
    let link = ctx.link();
    let answer = form.answer(question);
    let on_comment =
        link.callback(move |e: InputEvent| Msg::Comment(question, e.target_unchecked_into::<HtmlTextAreaElement>().value()));
    html! {
        <>
            { for question.options_en().iter().enumerate().map(|(index, option)| html! {
                <label class="field" style="flex-direction: row; gap: 8px;">
                    <input
                        type="radio"
                        name={question.key()}
                        checked={answer.selected == Some(index)}
                        onchange={link.callback(move |_| Msg::Select(question, index))}
                    />
                    { *option }
                </label>
            }) }
            <label class="field">{ "Comment" }
                <textarea rows="2" value={answer.comment.clone()} oninput={on_comment} />
            </label>
        </>
    }
}

fn final_thoughts(form: &FeedbackForm, t: &Texts, ctx: &Context<FeedbackPage>) -> Html {
    let oninput = ctx
        .link()
        .callback(|e: InputEvent| Msg::Additional(e.target_unchecked_into::<HtmlTextAreaElement>().value()));
    html! {
        <label class="field">{ t.final_thoughts }
            <textarea rows="4" value={form.additional_comments.clone()} {oninput} />
        </label>
    }
}
