use std::sync::Arc;
use tokio::process::Command;

use crate::config::RuntimeConfig;

/// Something that knows how to launch the text-generation process.
///
/// Stdio wiring is left to the caller; implementations only pick the program
/// and its arguments.
pub trait ModelRuntime: Send + Sync {
    fn command(&self) -> Command;

    fn describe(&self) -> String;
}

pub type SharedRuntime = Arc<dyn ModelRuntime>;

/// `ollama run <model>`, or whatever program the config points at.
#[derive(Debug, Clone)]
pub struct OllamaRuntime {
    program: String,
    model: String,
}

impl OllamaRuntime {
    pub fn new(program: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.program.clone(), config.model.clone())
    }

    pub fn args(&self) -> [&str; 2] {
        ["run", self.model.as_str()]
    }
}

impl ModelRuntime for OllamaRuntime {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        cmd
    }

    fn describe(&self) -> String {
        format!("{} run {}", self.program, self.model)
    }
}


#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Runs a `sh -c` script in place of the model and counts launches.
    pub struct ScriptRuntime {
        script: String,
        spawns: AtomicUsize,
    }

    impl ScriptRuntime {
        pub fn new(script: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                script: script.into(),
                spawns: AtomicUsize::new(0),
            })
        }

        pub fn spawns(&self) -> usize {
            self.spawns.load(Ordering::SeqCst)
        }
    }

    impl ModelRuntime for ScriptRuntime {
        fn command(&self) -> Command {
            self.spawns.fetch_add(1, Ordering::SeqCst);
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.script);
            cmd
        }

        fn describe(&self) -> String {
            format!("sh -c {:?}", self.script)
        }
    }
}
