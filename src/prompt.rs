/// Builds the instruction handed to the model runtime on stdin.
///
/// The topic is interpolated as-is. No quoting or escaping is applied, so a
/// topic containing quotes or newlines ends up in the prompt unchanged.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Write a short, unique, well-structured article (~250 words) about: \"{topic}\".\n  \
         Use simple language, small paragraphs, and a one-line conclusion."
    )
}
