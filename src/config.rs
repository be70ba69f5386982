use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use std::env;

        pub const DEFAULT_PROGRAM: &str = "ollama";
        pub const DEFAULT_MODEL: &str = "llama3.2:latest";

        /// Which text-generation runtime the server launches per request.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct RuntimeConfig {
            pub program: String,
            pub model: String,
        }

        impl Default for RuntimeConfig {
            fn default() -> Self {
                Self {
                    program: DEFAULT_PROGRAM.to_string(),
                    model: DEFAULT_MODEL.to_string(),
                }
            }
        }

        impl RuntimeConfig {
            /// Reads `GENERATOR_PROGRAM` and `GENERATOR_MODEL`, falling back to
            /// `ollama run llama3.2:latest`. Call after `dotenv()`.
            pub fn from_env() -> Self {
                Self::from_lookup(|key| env::var(key).ok())
            }

            fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
                let defaults = Self::default();
                let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
                Self {
                    program: non_empty("GENERATOR_PROGRAM").unwrap_or(defaults.program),
                    model: non_empty("GENERATOR_MODEL").unwrap_or(defaults.model),
                }
            }
        }

    }
}
