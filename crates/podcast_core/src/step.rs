use std::fmt;

/// Pipeline step reported by the backend.
///
/// Unknown step names are carried through verbatim so newer backends keep
/// rendering something sensible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Init,
    Download,
    Transcription,
    Formatting,
    Llm,
    Complete,
    Other(String),
}

impl Step {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "init" => Step::Init,
            "download" => Step::Download,
            "transcription" => Step::Transcription,
            "formatting" => Step::Formatting,
            "llm" => Step::Llm,
            "complete" => Step::Complete,
            other => Step::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Step::Init => "init",
            Step::Download => "download",
            Step::Transcription => "transcription",
            Step::Formatting => "formatting",
            Step::Llm => "llm",
            Step::Complete => "complete",
            Step::Other(raw) => raw,
        }
    }

    /// Human-readable label for the progress indicator.
    pub fn label(&self) -> &str {
        match self {
            Step::Init => "Starting",
            Step::Download => "Downloading audio",
            Step::Transcription => "Transcribing",
            Step::Formatting => "Formatting transcript",
            Step::Llm => "Generating outputs",
            Step::Complete => "Complete",
            Step::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
