use leptos::prelude::*;

use crate::session::HistoryEntry;

#[component]
pub fn HistoryPanel(#[prop(into)] entries: Signal<Vec<HistoryEntry>>) -> impl IntoView {
    move || {
        let entries = entries.get();
        (!entries.is_empty()).then(|| {
            view! {
                <div class="mt-8 w-full max-w-3xl bg-gray-800/40 rounded-2xl p-4 border border-gray-700">
                    <h3 class="text-sm font-semibold text-gray-300 mb-2">"Recent Topics"</h3>
                    <ul class="space-y-2">
                        {entries
                            .into_iter()
                            .map(|entry| {
                                let meta = format!(
                                    "{} • {}",
                                    entry.local_time(),
                                    entry.response_time_label(),
                                );
                                view! {
                                    <li class="text-xs text-gray-400 border-l-2 border-blue-500 pl-2">
                                        <div>{entry.topic}</div>
                                        <div class="text-gray-500">{meta}</div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
        })
    }
}
