//! Summary prompt construction and generation.

use std::collections::BTreeSet;

use crate::error::GenerationError;
use crate::gemini::TextModel;
use crate::options::{self, KEY_QUOTES, RELATED_CONTENT, SPECIFIC_TOPIC, SUMMARY_OPTIONS, TIMESTAMPS};
use crate::video;

/// Shown in place of the summary when the model answers with nothing.
pub const EMPTY_SUMMARY: &str = "Failed to generate summary. Please try again.";

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct SummaryRequest<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub option_ids: &'a BTreeSet<u32>,
    pub topic: Option<&'a str>,
}

impl SummaryRequest<'_> {
    /// The focus topic, only when the topic option is selected and the topic
    /// is not blank.
    fn focus_topic(&self) -> Option<&str> {
        if !self.option_ids.contains(&SPECIFIC_TOPIC) {
            return None;
        }
        self.topic.map(str::trim).filter(|t| !t.is_empty())
    }
}

/// One instruction line per selected option, in catalog order.
fn option_instructions(request: &SummaryRequest<'_>, video_id: &str) -> String {
    SUMMARY_OPTIONS
        .iter()
        .filter(|opt| request.option_ids.contains(&opt.id))
        .map(|opt| {
            let mut line = format!("{}. {}: {}", opt.id, opt.label, opt.description);
            match opt.id {
                TIMESTAMPS => line.push_str(&format!(
                    " CRITICAL: This MUST be formatted as a Markdown Table with two columns: 'Time' and 'Topic'. \
                     For hyperlinks in the Time column, use the format `[MM:SS](https://www.youtube.com/watch?v={video_id}&t=MMmSSs)`."
                )),
                SPECIFIC_TOPIC => {
                    if let Some(topic) = request.focus_topic() {
                        line.push_str(&format!(
                            " FOCUS TOPIC: \"{topic}\". The entire summary should revolve around this."
                        ));
                    }
                }
                KEY_QUOTES => line.push_str(
                    " CRITICAL: This MUST be formatted as a Markdown Table with two columns: 'Time' and 'Quote'.",
                ),
                RELATED_CONTENT => line.push_str(" Use Google Search to find comparison videos."),
                _ => {}
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full generation prompt.
pub fn build_prompt(request: &SummaryRequest<'_>) -> String {
    let video_id = video::extract_id(request.url).unwrap_or_default();
    let title = request.title;
    let url = request.url;
    let instructions = option_instructions(request, &video_id);
    let heading_topic = request
        .focus_topic()
        .map(|t| format!("{t} from "))
        .unwrap_or_default();

    format!(
        r####"You are "YouTube Summarizer".

TARGET VIDEO INFORMATION:
- ID: "{video_id}"
- Title: "{title}"
- URL: "{url}"

YOUR GOAL:
Generate a precise and useful summary for this video.

DATA GATHERING STRATEGY (STRICT):
1. **SEARCH**: Use the 'googleSearch' tool to search for the EXACT VIDEO TITLE: "{title}".
2. **CONTEXT**: Search for the specific VIDEO ID "{video_id}" to find metadata.
3. **SYNTHESIS**: If you cannot access the video transcript directly via tools, find summaries, news articles, or transcripts of this video on the web and use that information to construct the response.
4. **NO REFUSALS**: Do not answer that you "cannot access the content". Provide the best possible summary based on the search results for the video's title and topic.

SELECTED OPTIONS (Output strictly based on these):
{instructions}

FORMATTING RULES:
- Start directly with "## Summary of {heading_topic}{title}"
- Use standard Markdown: "##"/"###" headings, "**bold**", "[label](url)" links, "-" or "1." list lines.
- For Option 2 and Option 9, YOU MUST USE MARKDOWN TABLES, each preceded and followed by a blank line.
- If Option 12-17 (Visual/Audio) are selected but you cannot see the video, try to infer from reviews/articles or state "Information not available in search results".
- Be professional, concise, and helpful.
"####
    )
}

/// Generate the Markdown summary for `request`.
pub async fn generate_summary(
    model: &impl TextModel,
    request: &SummaryRequest<'_>,
) -> Result<String, GenerationError> {
    let unknown: Vec<u32> = request
        .option_ids
        .iter()
        .copied()
        .filter(|id| options::find(*id).is_none())
        .collect();
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "ignoring unknown summary option ids");
    }

    let prompt = build_prompt(request);
    let text = model.generate(&prompt, true).await.map_err(|e| {
        tracing::error!(error = %e, "summary generation failed");
        GenerationError::from(e)
    })?;

    if text.trim().is_empty() {
        return Ok(EMPTY_SUMMARY.to_string());
    }
    Ok(text)
}
