use chrono::Utc;
use leptos::{prelude::*, task::spawn_local};
use leptos_icons::Icon;
use log::{error, info};

use crate::client::open_article_stream;
use crate::components::history::HistoryPanel;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::session::{GeneratorSession, EXAMPLE_TOPICS};

#[component]
pub fn ArticleGenerator() -> impl IntoView {
    let (topic, set_topic) = signal(String::new());
    let session = RwSignal::new(GeneratorSession::default());

    let is_processing = Memo::new(move |_| session.with(|s| s.is_processing()));
    let article = Memo::new(move |_| session.with(|s| s.article().to_string()));
    let error_message = Memo::new(move |_| session.with(|s| s.error().map(str::to_string)));
    let word_count = Memo::new(move |_| session.with(|s| s.word_count()));
    let char_count = Memo::new(move |_| session.with(|s| s.char_count()));
    let history = Memo::new(move |_| session.with(|s| s.history().to_vec()));

    let process_topic = move |raw: String| {
        let Some(topic) = session.try_update(|s| s.begin(&raw, Utc::now())).flatten() else {
            return;
        };

        spawn_local(async move {
            info!("Requesting article for {topic:?}");
            let stream = match open_article_stream(&topic).await {
                Ok(stream) => stream,
                Err(e) => {
                    error!("Failed to start generation: {e}");
                    session.update(|s| s.fail(e.to_string()));
                    return;
                }
            };

            session.update(|s| s.start_streaming());
            loop {
                match stream.next_chunk().await {
                    Ok(Some(chunk)) => session.update(|s| s.push_chunk(&chunk)),
                    Ok(None) => {
                        session.update(|s| s.complete(Utc::now()));
                        break;
                    }
                    Err(e) => {
                        error!("Generation stream failed: {e}");
                        session.update(|s| s.fail(e.to_string()));
                        break;
                    }
                }
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        process_topic(topic.get_untracked());
    };

    let run_example = move |example: &'static str| {
        if is_processing.get_untracked() {
            return;
        }
        set_topic.set(example.to_string());
        process_topic(example.to_string());
    };

    view! {
        <div class="min-h-screen bg-gray-900 text-white p-6 flex flex-col items-center">
            <header class="text-center mb-8">
                <h1 class="text-4xl font-bold mb-2">"AI Article Generator"</h1>
                <p class="text-gray-400">
                    "Enter a topic and let "
                    <span class="text-blue-400 font-semibold">"Ollama"</span>
                    " write it up"
                </p>
            </header>

            <form on:submit=on_submit class="flex flex-col gap-4 w-full max-w-2xl">
                <input
                    type="text"
                    placeholder="Type your topic here..."
                    class="px-4 py-3 rounded-xl text-black text-lg focus:ring-2 focus:ring-blue-500 outline-none"
                    prop:value=topic
                    on:input=move |ev| set_topic.set(event_target_value(&ev))
                />
                <Button submit=true disabled=is_processing>
                    {move || {
                        if is_processing.get() {
                            view! {
                                <span class="inline-flex animate-spin">
                                    <Icon icon=icondata_fi::FiLoader width="20" height="20" />
                                </span>
                                <span>"Generating..."</span>
                            }
                                .into_any()
                        } else {
                            view! {
                                <Icon icon=icondata_bs::BsSend width="18" height="18" />
                                <span>"Generate Article"</span>
                            }
                                .into_any()
                        }
                    }}
                </Button>
            </form>

            <div class="mt-4 flex flex-wrap gap-2 max-w-2xl">
                {EXAMPLE_TOPICS
                    .iter()
                    .map(|&example| {
                        view! {
                            <Button
                                variant=ButtonVariant::Chip
                                size=ButtonSize::Small
                                disabled=is_processing
                                on_click=Callback::new(move |_| run_example(example))
                            >
                                {example}
                            </Button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || {
                error_message
                    .get()
                    .map(|message| view! { <p class="mt-3 text-red-500 text-sm">{message}</p> })
            }}

            {move || {
                (!article.get().is_empty())
                    .then(|| {
                        view! {
                            <div class="mt-8 w-full max-w-3xl bg-gray-800/40 rounded-2xl p-6 text-gray-200 border border-gray-700">
                                <h2 class="text-2xl font-semibold mb-4">"Generated Article"</h2>
                                <p class="whitespace-pre-wrap">{move || article.get()}</p>
                                <div class="mt-4 flex justify-between text-sm text-gray-400 border-t pt-3">
                                    <span>{move || word_count.get()} " words"</span>
                                    <span>{move || char_count.get()} " characters"</span>
                                </div>
                            </div>
                        }
                    })
            }}

            <HistoryPanel entries=history />
        </div>
    }
}
