//! Artifact generation: one source node → a fixed set of platform drafts.
//!
//! Placement is fully determined by the source position and the
//! configured offsets; only the shared id suffix is random, and it comes
//! from a caller-owned (seedable) `SuffixGenerator`.

use crate::config::CanvasConfig;
use crate::id::{NodeId, SuffixGenerator};
use crate::model::{CanvasNode, NodeKind};

pub const ARTIFACT_STATUS: &str = "Draft";

/// The platform-specific drafts produced for every source node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    LinkedIn,
    Thread,
    Caption,
}

impl ArtifactKind {
    /// Generation order; also the order of the vertical offsets.
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::LinkedIn, ArtifactKind::Thread, ArtifactKind::Caption];

    pub fn id_prefix(self) -> &'static str {
        match self {
            ArtifactKind::LinkedIn => "linkedin",
            ArtifactKind::Thread => "twitter",
            ArtifactKind::Caption => "instagram",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ArtifactKind::LinkedIn => "LinkedIn Post",
            ArtifactKind::Thread => "X Thread",
            ArtifactKind::Caption => "Instagram Caption",
        }
    }

    /// Number of content characters quoted in the summary.
    pub fn excerpt_len(self) -> usize {
        match self {
            ArtifactKind::LinkedIn => 20,
            ArtifactKind::Thread => 30,
            ArtifactKind::Caption => 40,
        }
    }

    pub fn summary(self, content: &str) -> String {
        let excerpt = excerpt(content, self.excerpt_len());
        match self {
            ArtifactKind::LinkedIn => format!("Here's a professional take on \"{excerpt}...\""),
            ArtifactKind::Thread => format!("1/ {excerpt}...\n\n2/ Key insight here."),
            ArtifactKind::Caption => format!("{excerpt}...\n\nLink in bio! ✨"),
        }
    }
}

/// First `len` characters of `content`.
fn excerpt(content: &str, len: usize) -> &str {
    match content.char_indices().nth(len) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

/// Produce the three draft nodes derived from `source`.
///
/// All three share one id suffix drawn from `ids`; with identical content,
/// position and generator state the output is identical.
pub fn generate_artifacts(
    source: &CanvasNode,
    ids: &mut SuffixGenerator,
    config: &CanvasConfig,
) -> [CanvasNode; 3] {
    let base = ids.next_suffix();
    let content = source.content_or_empty();
    let x = source.x + config.artifact_offset_x;

    ArtifactKind::ALL.map(|kind| {
        let offset_y = config.artifact_offsets_y[kind as usize];
        let id = NodeId::intern(&format!("{}-{base}", kind.id_prefix()));
        CanvasNode::new(id, NodeKind::AiDraft, kind.title(), x, source.y + offset_y)
            .with_summary(kind.summary(content))
            .with_status(ARTIFACT_STATUS)
    })
}
