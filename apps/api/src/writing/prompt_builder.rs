//! Prompt Builder: maps an `Operation` plus subject text to one instruction
//! string. Pure: no I/O, no failure path.
//!
//! Every lookup table falls back to a generic phrasing for unknown labels
//! instead of rejecting the request.

use crate::llm_client::prompts::{JSON_ARRAY_ONLY, JSON_OBJECT_ONLY, PLAIN_ONLY};
use crate::writing::operation::{ModelRequest, Operation};
use crate::writing::prompts::{
    CHARACTER_SUGGESTIONS_TEMPLATE, CHARACTER_TEMPLATE, GRAMMAR_TEMPLATE, HUMANIZE_TEMPLATE,
    LITERARY_PARAPHRASE_TEMPLATE, MANUSCRIPT_TEMPLATE, PARAPHRASE_TEMPLATE, PLOT_TEMPLATE,
    READABILITY_TEMPLATE, SCENE_TEMPLATE, SUMMARY_TEMPLATE, SYNONYMS_TEMPLATE, TONE_TEMPLATE,
};

/// Number of synonyms requested, and the cap applied to fallback lists.
pub const SYNONYM_LIMIT: usize = 8;

/// Builds the instruction for `operation` over `subject`.
///
/// Callers are expected to skip the model call on blank input; a blank subject
/// still yields a well-formed instruction here.
pub fn build_request(operation: &Operation, subject: &str) -> ModelRequest {
    let instruction_text = match operation {
        Operation::Paraphrase {
            mode,
            custom_instruction,
        } => fill(
            PARAPHRASE_TEMPLATE,
            &[
                (
                    "instruction",
                    &paraphrase_instruction(mode, custom_instruction.as_deref()),
                ),
                ("plain_only", PLAIN_ONLY),
                ("text", subject),
            ],
        ),
        Operation::LiteraryParaphrase(options) => fill(
            LITERARY_PARAPHRASE_TEMPLATE,
            &[
                ("mode", &options.mode),
                ("writing_style", &options.writing_style),
                ("target_audience", &options.target_audience),
                ("preserve_dialogue", &options.preserve_dialogue.to_string()),
                ("plain_only", PLAIN_ONLY),
                ("text", subject),
            ],
        ),
        Operation::Summarize { length } => fill(
            SUMMARY_TEMPLATE,
            &[
                ("instruction", summary_instruction(length)),
                ("plain_only", PLAIN_ONLY),
                ("text", subject),
            ],
        ),
        Operation::Humanize => fill(
            HUMANIZE_TEMPLATE,
            &[("plain_only", PLAIN_ONLY), ("text", subject)],
        ),
        Operation::AnalyzeTone => fill(
            TONE_TEMPLATE,
            &[("json_only", JSON_OBJECT_ONLY), ("text", subject)],
        ),
        Operation::CheckGrammar { level } => fill(
            GRAMMAR_TEMPLATE,
            &[
                ("level", level),
                ("depth", grammar_depth(level)),
                ("json_only", JSON_OBJECT_ONLY),
                ("text", subject),
            ],
        ),
        Operation::AnalyzeCharacter { name, focus } => fill(
            CHARACTER_TEMPLATE,
            &[
                ("name", name),
                ("focus", character_focus(focus)),
                ("json_only", JSON_OBJECT_ONLY),
                ("text", subject),
            ],
        ),
        Operation::CharacterSuggestions {
            name,
            traits,
            focus_area,
        } => fill(
            CHARACTER_SUGGESTIONS_TEMPLATE,
            &[
                ("traits", &traits.join(", ")),
                ("focus_area", focus_area),
                ("json_only", JSON_ARRAY_ONLY),
                ("name", name),
            ],
        ),
        Operation::AnalyzePlot { structure } => fill(
            PLOT_TEMPLATE,
            &[
                ("structure", plot_structure_guide(structure)),
                ("json_only", JSON_OBJECT_ONLY),
                ("text", subject),
            ],
        ),
        Operation::AnalyzeScene { scene_kind } => fill(
            SCENE_TEMPLATE,
            &[
                ("scene_kind", scene_kind),
                ("json_only", JSON_OBJECT_ONLY),
                ("text", subject),
            ],
        ),
        Operation::AnalyzeReadability { target_audience } => fill(
            READABILITY_TEMPLATE,
            &[
                ("target_audience", target_audience),
                ("json_only", JSON_OBJECT_ONLY),
                ("text", subject),
            ],
        ),
        Operation::AnalyzeManuscript { chapter_summaries } => {
            let chapters = serde_json::to_string(chapter_summaries).unwrap_or_default();
            fill(
                MANUSCRIPT_TEMPLATE,
                &[("json_only", JSON_OBJECT_ONLY), ("chapters", &chapters)],
            )
        }
        Operation::Synonyms { word, context } => fill(
            SYNONYMS_TEMPLATE,
            &[
                ("count", &SYNONYM_LIMIT.to_string()),
                ("json_only", JSON_ARRAY_ONLY),
                ("word", word),
                ("context", context),
            ],
        ),
    };

    ModelRequest { instruction_text }
}

/// Paraphrase phrasing per mode. Unknown modes get the generic instruction.
pub fn paraphrase_instruction(mode: &str, custom_instruction: Option<&str>) -> String {
    match mode {
        "Formal" => "Rewrite the following text in a formal, professional tone while maintaining the original meaning".to_string(),
        "Academic" => "Rewrite the following text in an academic, scholarly style with appropriate terminology".to_string(),
        "Simple" => "Simplify the following text to make it easier to read and understand".to_string(),
        "Creative" => "Creatively rewrite the following text with fresh, original phrasing and style".to_string(),
        "Shorten" => "Condense the following text while retaining all main points".to_string(),
        "Expand" => "Expand the following text by adding more detail and elaboration".to_string(),
        "Custom" => match custom_instruction.map(str::trim).filter(|s| !s.is_empty()) {
            Some(custom) => custom.trim_end_matches('.').to_string(),
            None => GENERIC_PARAPHRASE.to_string(),
        },
        _ => GENERIC_PARAPHRASE.to_string(),
    }
}

const GENERIC_PARAPHRASE: &str = "Paraphrase the following text";

pub fn summary_instruction(length: &str) -> &'static str {
    match length {
        "short" => "brief summary (2-3 sentences)",
        "long" => "detailed summary with key points and supporting details",
        _ => "concise summary",
    }
}

pub fn grammar_depth(level: &str) -> &'static str {
    match level {
        "basic" => "Focus only on grammar errors and basic punctuation",
        "comprehensive" => "Comprehensive analysis including grammar, style, flow, consistency, and literary quality",
        "literary" => "Literary analysis focusing on creative writing, narrative voice, character consistency, and artistic expression",
        // "standard" and anything unrecognised
        _ => "Check grammar, punctuation, style, and clarity issues",
    }
}

pub fn character_focus(focus: &str) -> &'static str {
    match focus {
        "voice" => "Analyze the character's unique voice, speech patterns, vocabulary, and dialogue style",
        "development" => "Analyze character development, growth, motivations, and character arc",
        "consistency" => "Check for consistency in character behavior, voice, and personality traits",
        "dialogue" => "Focus on dialogue quality, authenticity, and character-specific speech patterns",
        "backstory" => "Analyze implied backstory and suggest areas for character depth",
        _ => "Provide a general analysis of the character's personality, voice, and role in the text",
    }
}

pub fn plot_structure_guide(structure: &str) -> &'static str {
    match structure {
        "three-act" => "Three-Act Structure: Setup (25%), Confrontation (50%), Resolution (25%)",
        "heros-journey" => "Hero's Journey: Ordinary World, Call to Adventure, Refusal, Meeting Mentor, Crossing Threshold, Tests, Ordeal, Reward, Road Back, Resurrection, Return",
        "seven-point" => "Seven-Point Structure: Hook, Plot Turn 1, Pinch Point 1, Midpoint, Pinch Point 2, Plot Turn 2, Resolution",
        "freytag" => "Freytag's Pyramid: Exposition, Rising Action, Climax, Falling Action, Denouement",
        "fichtean" => "Fichtean Curve: Series of crises building to climax",
        _ => "Custom analysis of narrative structure",
    }
}

/// Single-pass `{key}` substitution. Substituted values are copied verbatim and
/// never rescanned, so user text containing `{name}` stays literal. Unknown
/// `{...}` sequences (the JSON schemas) pass through untouched.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find_map(|(key, value)| {
            tail.strip_prefix(*key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manuscript::models::ChapterSummary;
    use crate::writing::operation::LiteraryOptions;

    fn paraphrase(mode: &str) -> Operation {
        Operation::Paraphrase {
            mode: mode.to_string(),
            custom_instruction: None,
        }
    }

    #[test]
    fn test_short_summary_uses_brief_phrase_and_verbatim_text() {
        let subject = "The quick brown fox jumps over the lazy dog.";
        let op = Operation::Summarize {
            length: "short".to_string(),
        };
        let request = build_request(&op, subject);
        assert!(request
            .instruction_text
            .contains("brief summary (2-3 sentences)"));
        assert!(request.instruction_text.contains(subject));
        assert!(request.instruction_text.contains("ONLY"));
    }

    #[test]
    fn test_unknown_summary_length_is_concise() {
        let op = Operation::Summarize {
            length: "epic".to_string(),
        };
        let request = build_request(&op, "text");
        assert!(request.instruction_text.contains("concise summary"));
    }

    #[test]
    fn test_unknown_paraphrase_mode_falls_back_to_generic() {
        let request = build_request(&paraphrase("UnknownMode"), "Some words.");
        assert!(request
            .instruction_text
            .starts_with("Paraphrase the following text"));
        assert!(request.instruction_text.contains("Some words."));
    }

    #[test]
    fn test_known_paraphrase_modes_have_distinct_phrasing() {
        let modes = ["Formal", "Academic", "Simple", "Creative", "Shorten", "Expand"];
        for mode in modes {
            let text = build_request(&paraphrase(mode), "x").instruction_text;
            assert!(
                !text.starts_with(GENERIC_PARAPHRASE),
                "{mode} should not use the generic phrasing"
            );
        }
    }

    #[test]
    fn test_custom_mode_uses_custom_instruction() {
        let op = Operation::Paraphrase {
            mode: "Custom".to_string(),
            custom_instruction: Some("Rewrite as a pirate.".to_string()),
        };
        let text = build_request(&op, "Hello there").instruction_text;
        assert!(text.starts_with("Rewrite as a pirate. Provide ONLY"));
    }

    #[test]
    fn test_custom_mode_without_instruction_is_generic() {
        let op = Operation::Paraphrase {
            mode: "Custom".to_string(),
            custom_instruction: Some("   ".to_string()),
        };
        let text = build_request(&op, "Hello").instruction_text;
        assert!(text.starts_with(GENERIC_PARAPHRASE));
    }

    #[test]
    fn test_blank_subject_still_produces_instruction() {
        let ops = [
            paraphrase("Formal"),
            Operation::Humanize,
            Operation::AnalyzeTone,
            Operation::CheckGrammar {
                level: "basic".to_string(),
            },
        ];
        for op in ops {
            assert!(!build_request(&op, "").instruction_text.trim().is_empty());
        }
    }

    #[test]
    fn test_structured_operations_demand_bare_json() {
        let ops = [
            Operation::AnalyzeTone,
            Operation::CheckGrammar {
                level: "standard".to_string(),
            },
            Operation::AnalyzeCharacter {
                name: "Ada".to_string(),
                focus: "voice".to_string(),
            },
            Operation::AnalyzePlot {
                structure: "freytag".to_string(),
            },
            Operation::AnalyzeScene {
                scene_kind: "action".to_string(),
            },
            Operation::AnalyzeReadability {
                target_audience: "young-adult".to_string(),
            },
            Operation::AnalyzeManuscript {
                chapter_summaries: vec![],
            },
        ];
        for op in ops {
            let text = build_request(&op, "subject").instruction_text;
            assert!(text.contains(JSON_OBJECT_ONLY), "{}", op.label());
            assert!(text.contains("no markdown formatting"));
        }
        let synonyms = Operation::Synonyms {
            word: "happy".to_string(),
            context: "a happy dog".to_string(),
        };
        assert!(build_request(&synonyms, "").instruction_text.contains(JSON_ARRAY_ONLY));
    }

    #[test]
    fn test_tone_instruction_names_schema_fields() {
        let text = build_request(&Operation::AnalyzeTone, "I love it").instruction_text;
        for field in ["overallTone", "sentiment", "confidence", "emotions", "suggestions"] {
            assert!(text.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_grammar_instruction_names_issue_fields() {
        let op = Operation::CheckGrammar {
            level: "literary".to_string(),
        };
        let text = build_request(&op, "Their going home").instruction_text;
        for field in ["overallScore", "issues", "type", "severity", "originalText", "description", "suggestion"] {
            assert!(text.contains(&format!("\"{field}\"")), "missing {field}");
        }
        assert!(text.contains("Literary analysis focusing on creative writing"));
    }

    #[test]
    fn test_unknown_grammar_level_uses_standard_depth() {
        let op = Operation::CheckGrammar {
            level: "extreme".to_string(),
        };
        let text = build_request(&op, "x").instruction_text;
        assert!(text.contains("Check grammar, punctuation, style, and clarity issues"));
    }

    #[test]
    fn test_unknown_plot_structure_uses_custom_guide() {
        let op = Operation::AnalyzePlot {
            structure: "kishotenketsu".to_string(),
        };
        let text = build_request(&op, "story").instruction_text;
        assert!(text.contains("Custom analysis of narrative structure"));
    }

    #[test]
    fn test_character_instruction_includes_name() {
        let op = Operation::AnalyzeCharacter {
            name: "Elizabeth".to_string(),
            focus: "backstory".to_string(),
        };
        let text = build_request(&op, "She laughed.").instruction_text;
        assert!(text.contains(r#"Analyze the character "Elizabeth""#));
        assert!(text.contains("implied backstory"));
    }

    #[test]
    fn test_character_suggestions_joins_traits() {
        let op = Operation::CharacterSuggestions {
            name: "Ada".to_string(),
            traits: vec!["curious".to_string(), "stubborn".to_string()],
            focus_area: "dialogue".to_string(),
        };
        let text = build_request(&op, "").instruction_text;
        assert!(text.contains("with traits: curious, stubborn."));
        assert!(text.contains(JSON_ARRAY_ONLY));
    }

    #[test]
    fn test_literary_paraphrase_lists_options() {
        let op = Operation::LiteraryParaphrase(LiteraryOptions {
            mode: "Gothic".to_string(),
            writing_style: "dickens".to_string(),
            target_audience: "general".to_string(),
            preserve_dialogue: true,
        });
        let text = build_request(&op, "It was night.").instruction_text;
        assert!(text.contains("- Literary Mode: Gothic"));
        assert!(text.contains("- Preserve Dialogue: true"));
        assert!(text.contains(r#"Text: "It was night.""#));
    }

    #[test]
    fn test_manuscript_instruction_embeds_chapter_json() {
        let op = Operation::AnalyzeManuscript {
            chapter_summaries: vec![ChapterSummary {
                title: "Opening".to_string(),
                word_count: 3,
                content: "It began here".to_string(),
            }],
        };
        let text = build_request(&op, "").instruction_text;
        assert!(text.contains(r#"[{"title":"Opening","wordCount":3,"content":"It began here"}]"#));
    }

    #[test]
    fn test_synonyms_asks_for_limit() {
        let op = Operation::Synonyms {
            word: "happy".to_string(),
            context: "She was happy.".to_string(),
        };
        let text = build_request(&op, "").instruction_text;
        assert!(text.starts_with(r#"Provide 8 synonyms for the word "happy""#));
        assert!(text.contains("She was happy."));
    }

    #[test]
    fn test_subject_placeholders_are_not_expanded() {
        let op = Operation::AnalyzeCharacter {
            name: "{text}".to_string(),
            focus: "voice".to_string(),
        };
        let text = build_request(&op, "literal {name} braces").instruction_text;
        assert!(text.contains(r#"Analyze the character "{text}""#));
        assert!(text.contains("literal {name} braces"));
    }

    #[test]
    fn test_fill_leaves_unknown_braces() {
        let out = fill(r#"{"a": 1} {x} {y"#, &[("x", "X")]);
        assert_eq!(out, r#"{"a": 1} X {y"#);
    }
}
