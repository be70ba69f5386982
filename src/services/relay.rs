use axum::body::Bytes;
use futures::stream::{Stream, StreamExt};
use log::{debug, info, warn};
use std::{
    pin::Pin,
    process::Stdio,
    task::{Context, Poll},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::Command,
    sync::mpsc,
};
use tokio_util::io::ReaderStream;

use super::runtime::ModelRuntime;
use crate::error::GenerationError;

/// Chunks buffered between the process and the HTTP body before stdout
/// reads pause.
pub const RELAY_CAPACITY: usize = 32;

pub type RelayItem = Result<Bytes, GenerationError>;

/// Output of one generation process. Yields stdout chunks in order and ends
/// either cleanly or with a single `Err`.
pub struct GenerationStream {
    receiver: mpsc::Receiver<RelayItem>,
}

impl Stream for GenerationStream {
    type Item = RelayItem;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Launches the runtime with `prompt` on stdin and returns its output stream.
/// The process is driven on its own task; dropping the stream kills it.
pub fn spawn_generation(runtime: &dyn ModelRuntime, prompt: String) -> GenerationStream {
    let (tx, rx) = mpsc::channel(RELAY_CAPACITY);
    let command = runtime.command();
    let label = runtime.describe();

    tokio::spawn(async move {
        debug!("Starting `{label}`");
        match run_generation(command, prompt, &tx).await {
            Ok(()) => debug!("`{label}` finished"),
            Err(e) => {
                warn!("`{label}` failed: {e}");
                let _ = tx.send(Err(e)).await;
            }
        }
    });

    GenerationStream { receiver: rx }
}

async fn run_generation(
    mut command: Command,
    prompt: String,
    tx: &mpsc::Sender<RelayItem>,
) -> Result<(), GenerationError> {
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(GenerationError::Spawn)?;
    let mut stdin = child.stdin.take().ok_or(GenerationError::MissingPipe("stdin"))?;
    let stdout = child.stdout.take().ok_or(GenerationError::MissingPipe("stdout"))?;
    let mut stderr = child.stderr.take().ok_or(GenerationError::MissingPipe("stderr"))?;

    // stdin is closed once the task drops it
    let stdin_task = tokio::spawn(async move {
        stdin.write_all(prompt.as_bytes()).await?;
        stdin.shutdown().await
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    });

    let mut chunks = ReaderStream::new(stdout);
    while let Some(chunk) = chunks.next().await {
        if tx.send(Ok(chunk?)).await.is_err() {
            info!("Response stream dropped, killing generation process");
            child.start_kill()?;
            child.wait().await?;
            return Ok(());
        }
    }

    if let Err(e) = stdin_task.await? {
        // the process may exit without reading its input
        debug!("Prompt was not fully delivered: {e}");
    }
    let stderr = stderr_task.await??;
    let status = child.wait().await?;

    if status.success() {
        Ok(())
    } else {
        debug!("Generation process exited with {status}");
        Err(GenerationError::from_stderr(&stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_FAILURE_MESSAGE;
    use crate::services::runtime::{testing::ScriptRuntime, OllamaRuntime};

    async fn drain(mut stream: GenerationStream) -> (Vec<Bytes>, Option<GenerationError>) {
        let mut chunks = Vec::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => chunks.push(chunk),
                Err(e) => {
                    assert!(stream.next().await.is_none(), "error must end the stream");
                    return (chunks, Some(e));
                }
            }
        }
        (chunks, None)
    }

    fn joined(chunks: &[Bytes]) -> String {
        String::from_utf8(chunks.concat()).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_stdout_in_order() {
        let runtime = ScriptRuntime::new(
            "printf 'AI is '; sleep 0.05; printf 'changing '; sleep 0.05; printf 'healthcare.'",
        );
        let (chunks, err) = drain(spawn_generation(runtime.as_ref(), "prompt".into())).await;
        assert!(err.is_none());
        assert_eq!(joined(&chunks), "AI is changing healthcare.");
        assert_eq!(runtime.spawns(), 1);
    }

    #[tokio::test]
    async fn test_prompt_is_written_to_stdin() {
        let runtime = ScriptRuntime::new("cat");
        let prompt = "Write about \"tides\"".to_string();
        let (chunks, err) = drain(spawn_generation(runtime.as_ref(), prompt.clone())).await;
        assert!(err.is_none());
        assert_eq!(joined(&chunks), prompt);
    }

    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let runtime = ScriptRuntime::new("printf 'partial'; echo 'model crashed' >&2; exit 3");
        let (chunks, err) = drain(spawn_generation(runtime.as_ref(), "prompt".into())).await;
        assert_eq!(joined(&chunks), "partial");
        let err = err.expect("stream should end in error");
        assert!(matches!(err, GenerationError::ProcessFailed(_)));
        assert_eq!(err.to_string(), "model crashed\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_without_stderr_uses_fallback() {
        let runtime = ScriptRuntime::new("exit 1");
        let (chunks, err) = drain(spawn_generation(runtime.as_ref(), "prompt".into())).await;
        assert!(chunks.is_empty());
        assert_eq!(err.unwrap().to_string(), FALLBACK_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_stderr_does_not_block_stdout() {
        let runtime = ScriptRuntime::new("head -c 200000 /dev/zero >&2; printf 'done'");
        let (chunks, err) = drain(spawn_generation(runtime.as_ref(), "prompt".into())).await;
        assert!(err.is_none());
        assert_eq!(joined(&chunks), "done");
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_stream_error() {
        let runtime = OllamaRuntime::new("/nonexistent/articlegen-runtime", "llama3.2:latest");
        let (chunks, err) = drain(spawn_generation(&runtime, "prompt".into())).await;
        assert!(chunks.is_empty());
        assert!(matches!(err, Some(GenerationError::Spawn(_))));
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("articlegen-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    async fn read_pid(path: &std::path::Path) -> String {
        for _ in 0..100 {
            if let Ok(pid) = std::fs::read_to_string(path) {
                if pid.ends_with('\n') {
                    return pid.trim().to_string();
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("script never wrote {}", path.display());
    }

    fn is_alive(pid: &str) -> bool {
        std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill -0 {pid} 2>/dev/null"))
            .status()
            .unwrap()
            .success()
    }

    #[tokio::test]
    async fn test_dropping_the_stream_kills_the_process() {
        let dir = scratch_dir("disconnect");
        let pid_file = dir.join("pid");
        let runtime = ScriptRuntime::new(format!(
            "echo $$ > '{}'; while true; do printf x; done",
            pid_file.display()
        ));

        let mut stream = spawn_generation(runtime.as_ref(), "prompt".into());
        let first = stream.next().await.unwrap().unwrap();
        assert!(first.iter().all(|&b| b == b'x'));
        let pid = read_pid(&pid_file).await;
        assert!(is_alive(&pid));

        drop(stream);
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert!(!is_alive(&pid), "process {pid} outlived its stream");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unread_stream_pauses_the_process() {
        let dir = scratch_dir("backpressure");
        let pid_file = dir.join("pid");
        let done_file = dir.join("done");
        // far more than RELAY_CAPACITY chunks plus the pipe buffer can hold
        let runtime = ScriptRuntime::new(format!(
            "echo $$ > '{}'; i=0; while [ $i -lt 40000 ]; do printf 'xxxxxxxxxxxxxxxx'; i=$((i+1)); done; touch '{}'",
            pid_file.display(),
            done_file.display()
        ));

        let mut stream = spawn_generation(runtime.as_ref(), "prompt".into());
        assert!(stream.next().await.unwrap().is_ok());
        let pid = read_pid(&pid_file).await;

        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert!(is_alive(&pid), "writer should be blocked, not finished");
        assert!(!done_file.exists());

        drop(stream);
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert!(!is_alive(&pid));
        assert!(!done_file.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_process_that_ignores_stdin_still_reports() {
        let runtime = ScriptRuntime::new("echo 'model not found' >&2; exit 1");
        let prompt = "x".repeat(1 << 20);
        let (_, err) = drain(spawn_generation(runtime.as_ref(), prompt)).await;
        assert_eq!(err.unwrap().to_string(), "model not found\n");
    }
}
