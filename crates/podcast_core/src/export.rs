pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// One of the three text outputs a finished job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Transcript,
    Summary,
    Thread,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Transcript, Artifact::Summary, Artifact::Thread];

    pub fn filename(self) -> &'static str {
        match self {
            Artifact::Transcript => "transcript.md",
            Artifact::Summary => "summary.md",
            Artifact::Thread => "x_thread.md",
        }
    }
}

/// A downloadable markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Packages buffer contents as a markdown file. The bytes are the UTF-8 text unchanged.
pub fn export(text: &str, filename: &str) -> MarkdownArtifact {
    MarkdownArtifact {
        filename: filename.to_string(),
        content_type: MARKDOWN_CONTENT_TYPE,
        bytes: text.as_bytes().to_vec(),
    }
}
