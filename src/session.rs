//! Summarizer session: the sequence of steps from URL entry to result.
//!
//! The session owns all user choices and enforces which step may follow
//! which. Network work happens outside; callers report its outcome back with
//! `title_found`/`lookup_failed` and `summary_ready`/`generation_failed`.

use std::collections::BTreeSet;
use std::fmt;

use crate::options::SPECIFIC_TOPIC;
use crate::summary::SummaryRequest;
use crate::video;

pub const INVALID_URL_MESSAGE: &str = "That URL doesn't appear to be a valid YouTube video.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Unable to fetch video details. Please check the URL.";
pub const GENERATION_FAILED_MESSAGE: &str = "An error occurred while generating the summary.";

/// Current step of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Confirm,
    Options,
    TopicInput,
    Generating,
    Result,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Confirm => "confirm",
            Stage::Options => "options",
            Stage::TopicInput => "topic input",
            Stage::Generating => "generating",
            Stage::Result => "result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} during the {stage} step")]
    InvalidTransition { action: &'static str, stage: Stage },

    #[error("that URL doesn't appear to be a valid YouTube video")]
    InvalidUrl,

    #[error("select at least one summary option")]
    NoOptions,

    #[error("the focus topic must not be empty")]
    EmptyTopic,
}

/// The video the user confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    /// Canonical watch URL.
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    pending: Option<(String, String)>,
    video: Option<Video>,
    selected: BTreeSet<u32>,
    topic: Option<String>,
    summary: Option<String>,
    error: Option<&'static str>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Input,
            pending: None,
            video: None,
            selected: BTreeSet::new(),
            topic: None,
            summary: None,
            error: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    pub fn selected(&self) -> &BTreeSet<u32> {
        &self.selected
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Last user-facing error message, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    fn expect_stage(&self, stage: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                stage: self.stage,
            })
        }
    }

    /// Accept a URL and return the canonical URL whose title must be looked up.
    pub fn submit_url(&mut self, url: &str) -> Result<String, SessionError> {
        self.expect_stage(Stage::Input, "submit a URL")?;
        let Some(id) = video::extract_id(url) else {
            self.error = Some(INVALID_URL_MESSAGE);
            return Err(SessionError::InvalidUrl);
        };
        self.error = None;
        let canonical = video::canonical_url(&id);
        self.pending = Some((id, canonical.clone()));
        Ok(canonical)
    }

    /// The title lookup for the submitted URL succeeded.
    pub fn title_found(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.expect_stage(Stage::Input, "confirm a title")?;
        let (id, url) = self.pending.take().ok_or(SessionError::InvalidTransition {
            action: "confirm a title",
            stage: self.stage,
        })?;
        self.video = Some(Video {
            id,
            url,
            title: title.into(),
        });
        self.stage = Stage::Confirm;
        Ok(())
    }

    /// The title lookup failed; stay on the input step.
    pub fn lookup_failed(&mut self) {
        self.pending = None;
        self.error = Some(LOOKUP_FAILED_MESSAGE);
    }

    /// The user confirmed the detected video.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        self.expect_stage(Stage::Confirm, "confirm")?;
        self.stage = Stage::Options;
        Ok(())
    }

    /// Go back to URL entry, forgetting the video. Selected options are kept.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.video = None;
        self.summary = None;
        self.stage = Stage::Input;
    }

    /// Select or deselect an option. Returns whether it is now selected.
    pub fn toggle_option(&mut self, id: u32) -> Result<bool, SessionError> {
        self.expect_stage(Stage::Options, "change options")?;
        if self.selected.remove(&id) {
            Ok(false)
        } else {
            self.selected.insert(id);
            Ok(true)
        }
    }

    /// Leave the options step: to the topic step when the topic option is
    /// selected, otherwise straight to generation.
    pub fn proceed(&mut self) -> Result<Stage, SessionError> {
        self.expect_stage(Stage::Options, "continue")?;
        if self.selected.is_empty() {
            return Err(SessionError::NoOptions);
        }
        self.stage = if self.selected.contains(&SPECIFIC_TOPIC) {
            Stage::TopicInput
        } else {
            Stage::Generating
        };
        Ok(self.stage)
    }

    /// Set the focus topic and start generation.
    pub fn submit_topic(&mut self, topic: &str) -> Result<(), SessionError> {
        self.expect_stage(Stage::TopicInput, "submit a topic")?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }
        self.topic = Some(topic.to_string());
        self.stage = Stage::Generating;
        Ok(())
    }

    /// What to generate, available while generating.
    pub fn summary_request(&self) -> Option<SummaryRequest<'_>> {
        if self.stage != Stage::Generating {
            return None;
        }
        let video = self.video.as_ref()?;
        Some(SummaryRequest {
            url: &video.url,
            title: &video.title,
            option_ids: &self.selected,
            topic: self.topic.as_deref(),
        })
    }

    pub fn summary_ready(&mut self, markdown: impl Into<String>) -> Result<(), SessionError> {
        self.expect_stage(Stage::Generating, "show a summary")?;
        self.summary = Some(markdown.into());
        self.error = None;
        self.stage = Stage::Result;
        Ok(())
    }

    /// Generation failed: report it and return to URL entry.
    pub fn generation_failed(&mut self) {
        self.error = Some(GENERATION_FAILED_MESSAGE);
        self.stage = Stage::Input;
    }

    /// From the result, pick different options for the same video.
    pub fn resummarize(&mut self) -> Result<(), SessionError> {
        self.expect_stage(Stage::Result, "resummarize")?;
        self.stage = Stage::Options;
        Ok(())
    }
}
