use serde::{Deserialize, Serialize};

/// Where a corpus text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Full story text, split into candidate sentences at generation time
    #[default]
    Story,
    /// Condensed retelling; shorter by construction, used whole as the
    /// generation fallback tier
    Summary,
}

/// One sentence-bearing corpus record, immutable after load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Raw text: a full story or a summary paragraph
    pub text: String,
    /// Age label the text is written for
    pub age: u8,
    /// Source work title, surfaced to the player alongside the puzzle
    pub title: String,
    #[serde(default)]
    pub kind: SourceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults_to_story() {
        let entry: CorpusEntry =
            serde_json::from_str(r#"{"text": "하늘이 맑다.", "age": 6, "title": "일기"}"#).unwrap();
        assert_eq!(entry.kind, SourceKind::Story);
    }

    #[test]
    fn test_summary_kind_parses() {
        let entry: CorpusEntry = serde_json::from_str(
            r#"{"text": "토끼가 낮잠을 잤다.", "age": 6, "title": "토끼와 거북이", "kind": "summary"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, SourceKind::Summary);
    }
}
