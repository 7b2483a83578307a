//! Slide deck prompt assembly.

/// User prompt asking for slides in `language` built from `text`.
pub fn build_prompt(text: &str, language: &str) -> String {
    format!(
        "Create slides in {} from this text: {}. Format each slide as:\n\
         Title: <slide title>\n\
         Content: <bullet points>\n\
         Image: <image description>",
        language, text
    )
}
