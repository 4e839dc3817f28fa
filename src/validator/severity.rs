use crate::models::{AuditFinding, Document, ScoringRules, Severity};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Reason reported for absent or blank content
pub const EMPTY_CONTENT_REASON: &str = "empty or missing content";

/// AST-based content quality scorer
#[derive(Debug, Clone, Default)]
pub struct SeverityScorer {
    rules: ScoringRules,
}

impl SeverityScorer {
    /// Create a new scorer with rules
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score a document snapshot
    pub fn score(&self, doc: &Document) -> AuditFinding {
        self.score_parts(doc.content.as_deref(), doc.governed, doc.rag_ready)
    }

    /// Score raw content plus the flags surfaced alongside it
    pub fn score_parts(&self, content: Option<&str>, governed: bool, rag_ready: bool) -> AuditFinding {
        let content_length = content.map(|c| c.chars().count()).unwrap_or(0);

        let text = match content {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                return AuditFinding {
                    severity: Severity::Fail,
                    reasons: vec![EMPTY_CONTENT_REASON.to_string()],
                    content_length,
                    markdown_score: 0,
                    governed,
                    rag_ready,
                };
            }
        };

        let signals = StructureSignals::collect(text);
        let markdown_score = self.markdown_score(&signals);

        let low_structure = markdown_score <= self.rules.warn_threshold;
        let tab_warning = signals.has_tabs && self.rules.tabs_force_warn;

        let (severity, reasons) = if low_structure || tab_warning {
            let mut reasons = signals.defects();
            if reasons.is_empty() {
                reasons.push(format!(
                    "low markdown structure score ({}/{})",
                    markdown_score,
                    self.rules.max_score()
                ));
            }
            (Severity::Warn, reasons)
        } else {
            (Severity::Ok, Vec::new())
        };

        tracing::debug!(
            severity = %severity,
            markdown_score,
            content_length,
            "Scored content"
        );

        AuditFinding {
            severity,
            reasons,
            content_length,
            markdown_score,
            governed,
            rag_ready,
        }
    }

    /// Structural score, clamped to `0..=max_score`
    fn markdown_score(&self, signals: &StructureSignals) -> u32 {
        let rules = &self.rules;

        let headings = (signals.headings.saturating_mul(rules.heading_points)).min(rules.heading_cap);
        let lists = signals.list_items.min(rules.list_cap);
        let code = signals.fenced_blocks.min(rules.code_block_cap);
        let inline = if signals.has_inline_structure {
            rules.inline_points
        } else {
            0
        };

        let raw = headings + lists + code + inline;
        if signals.has_tabs {
            raw.saturating_sub(rules.tab_penalty)
        } else {
            raw
        }
    }
}

/// Score a document with the default rules
pub fn score(doc: &Document) -> AuditFinding {
    SeverityScorer::default().score(doc)
}

/// Structural markdown signals found in one pass over the AST
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct StructureSignals {
    headings: u32,
    list_items: u32,
    fenced_blocks: u32,
    has_inline_structure: bool,
    has_tabs: bool,
}

impl StructureSignals {
    fn collect(text: &str) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut signals = StructureSignals {
            has_tabs: text.contains('\t'),
            ..Self::default()
        };

        for event in Parser::new_ext(text, options) {
            if let Event::Start(tag) = event {
                match tag {
                    Tag::Heading { .. } => signals.headings += 1,
                    Tag::Item => signals.list_items += 1,
                    Tag::CodeBlock(CodeBlockKind::Fenced(_)) => signals.fenced_blocks += 1,
                    Tag::Link { .. } | Tag::Emphasis | Tag::Strong | Tag::Table(_) => {
                        signals.has_inline_structure = true;
                    }
                    _ => {}
                }
            }
        }

        signals
    }

    /// Specific defects, in a stable order
    fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        if self.has_tabs {
            defects.push("contains raw tab characters".to_string());
        }
        if self.headings == 0 {
            defects.push("no headings".to_string());
        }
        if self.list_items == 0 {
            defects.push("no lists".to_string());
        }
        defects
    }
}
