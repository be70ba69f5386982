use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::extract::FromRef;
        use leptos::prelude::LeptosOptions;
        use std::sync::Arc;

        use crate::config::RuntimeConfig;
        use crate::services::{OllamaRuntime, SharedRuntime};

        #[derive(FromRef, Clone)]
        pub struct AppState {
            pub leptos_options: LeptosOptions,
            pub runtime: SharedRuntime,
        }

        impl AppState {
            pub fn new(leptos_options: LeptosOptions, config: &RuntimeConfig) -> Self {
                Self {
                    leptos_options,
                    runtime: Arc::new(OllamaRuntime::from_config(config)),
                }
            }
        }
    }
}
