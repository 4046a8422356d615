// All model prompt templates for the writing module.
// Reply-format rules come from llm_client::prompts and are substituted into
// `{json_only}` / `{plain_only}`. Substituted values are never rescanned, so
// braces inside the user's text pass through untouched.

/// Paraphrase template. Replace `{instruction}`, `{plain_only}`, `{text}`.
pub const PARAPHRASE_TEMPLATE: &str = r#"{instruction}. {plain_only}

Text: "{text}""#;

/// Literary paraphrase template.
/// Replace: {mode}, {writing_style}, {target_audience}, {preserve_dialogue}, {plain_only}, {text}
pub const LITERARY_PARAPHRASE_TEMPLATE: &str = r#"Transform the following text with these specifications:
- Literary Mode: {mode}
- Writing Style: {writing_style}
- Target Audience: {target_audience}
- Preserve Dialogue: {preserve_dialogue}

Focus on:
1. Enhancing literary quality while maintaining meaning
2. Improving sentence variety and flow
3. Elevating vocabulary appropriately
4. Maintaining character voice consistency

Text: "{text}"

{plain_only}"#;

/// Summary template. Replace `{instruction}`, `{plain_only}`, `{text}`.
pub const SUMMARY_TEMPLATE: &str = r#"Provide a {instruction} of the following text. {plain_only}

Text: "{text}""#;

/// Humanizer template. Replace `{plain_only}`, `{text}`.
pub const HUMANIZE_TEMPLATE: &str = r#"Make the following AI-generated text sound more natural and human-written by:
1. Adding natural flow and rhythm
2. Making it more conversational and relatable
3. Removing overly formal or robotic language

{plain_only}

Text: "{text}""#;

/// Tone analysis template. Replace `{json_only}`, `{text}`.
pub const TONE_TEMPLATE: &str = r#"Analyze the tone of the following text and provide insights about:
1. Overall tone (formal, casual, optimistic, pessimistic, etc.)
2. Emotional sentiment (positive, negative, neutral)
3. Confidence level (high, medium, low)
4. Suggestions for improvement if needed

Text: "{text}"

{json_only}
{
  "overallTone": "description",
  "sentiment": "positive",
  "confidence": "high",
  "emotions": ["emotion1", "emotion2"],
  "suggestions": "improvement suggestions"
}"#;

/// Grammar template. Replace `{level}`, `{depth}`, `{json_only}`, `{text}`.
pub const GRAMMAR_TEMPLATE: &str = r#"Perform a {level} grammar and style analysis of the following text.

{depth}

Text: "{text}"

{json_only}
{
  "overallScore": 85,
  "issues": [
    {
      "type": "Grammar",
      "severity": "critical",
      "originalText": "exact text with issue",
      "description": "explanation of the issue",
      "suggestion": "corrected version"
    }
  ],
  "readability": "Grade level or description",
  "sentenceVariety": "Assessment of sentence structure variety",
  "vocabularyLevel": "Assessment of vocabulary complexity",
  "passiveVoiceUsage": 15,
  "styleNotes": "Overall style assessment"
}"#;

/// Character analysis template. Replace `{name}`, `{focus}`, `{json_only}`, `{text}`.
pub const CHARACTER_TEMPLATE: &str = r#"Analyze the character "{name}" in the following text.

Focus: {focus}

Text: "{text}"

{json_only}
{
  "traits": ["trait1", "trait2", "trait3"],
  "voiceTone": "description of speaking style",
  "speechPattern": "characteristic speech patterns",
  "vocabularyLevel": "assessment of vocabulary used",
  "emotionalRange": "range of emotions displayed",
  "developmentNotes": "character development observations",
  "inconsistencies": ["issue1", "issue2"],
  "strengths": ["strength1", "strength2"],
  "improvementAreas": ["area1", "area2"]
}"#;

/// Character suggestion template. Replace `{traits}`, `{focus_area}`, `{json_only}`, `{name}`.
pub const CHARACTER_SUGGESTIONS_TEMPLATE: &str = r#"Generate creative enhancement suggestions for the character "{name}" with traits: {traits}.

Focus area: {focus_area}

Provide practical, creative suggestions for character development.

{json_only}
[
  {
    "category": "Dialogue",
    "description": "detailed suggestion",
    "example": "example implementation"
  }
]"#;

/// Plot structure template. Replace `{structure}`, `{json_only}`, `{text}`.
pub const PLOT_TEMPLATE: &str = r#"Analyze the plot structure of the following story using {structure}.

Text: "{text}"

{json_only}
{
  "overallScore": 85,
  "stages": [
    {
      "name": "stage name",
      "completion": 80,
      "description": "assessment of this stage",
      "suggestions": ["improvement1", "improvement2"]
    }
  ],
  "pacing": "assessment of story pacing",
  "conflict": "analysis of conflict development",
  "characterArc": "character development assessment",
  "themeDevelopment": "theme analysis",
  "recommendations": [
    {
      "priority": "high",
      "title": "recommendation title",
      "description": "detailed recommendation"
    }
  ]
}"#;

/// Scene template. Replace `{scene_kind}`, `{json_only}`, `{text}`.
pub const SCENE_TEMPLATE: &str = r#"Analyze this scene for conflict, tension, and effectiveness:

Scene Type: {scene_kind}
Scene Text: "{text}"

{json_only}
{
  "conflictLevel": 85,
  "tensionRating": 90,
  "paceRating": 75,
  "dialogueQuality": 80,
  "characterDevelopment": 70,
  "conflictTypes": ["internal", "external"],
  "tensionTechniques": ["technique1", "technique2"],
  "strengths": ["strength1", "strength2"],
  "improvements": ["improvement1", "improvement2"],
  "suggestions": [
    {
      "type": "Conflict",
      "description": "suggestion description",
      "example": "example implementation"
    }
  ]
}"#;

/// Readability template. Replace `{target_audience}`, `{json_only}`, `{text}`.
pub const READABILITY_TEMPLATE: &str = r#"Analyze the readability of this text for target audience: {target_audience}

Text: "{text}"

{json_only}
{
  "readabilityScore": 85,
  "gradeLevel": "8th Grade",
  "targetMatch": true,
  "wordComplexity": "appropriate",
  "sentenceLength": "good",
  "vocabularyLevel": "suitable",
  "improvements": [
    {
      "issue": "issue description",
      "suggestion": "how to fix",
      "example": "example fix"
    }
  ],
  "strengths": ["strength1", "strength2"],
  "optimizedVersion": "optimized text version"
}"#;

/// Manuscript template. Replace `{json_only}`, `{chapters}`.
pub const MANUSCRIPT_TEMPLATE: &str = r#"Analyze this manuscript structure and provide insights:

Chapters: {chapters}

{json_only}
{
  "overallProgress": 65,
  "totalWordCount": 50000,
  "averageChapterLength": 2500,
  "paceAnalysis": "analysis of pacing across chapters",
  "consistencyIssues": ["issue1", "issue2"],
  "suggestions": ["suggestion1", "suggestion2"],
  "readabilityScore": 85,
  "chapterInsights": [
    {
      "chapterNumber": 1,
      "strengths": ["strength1"],
      "improvements": ["improvement1"],
      "paceRating": "good"
    }
  ]
}"#;

/// Synonym template. Replace `{count}`, `{json_only}`, `{word}`, `{context}`.
pub const SYNONYMS_TEMPLATE: &str = r#"Provide {count} synonyms for the word "{word}" in this context: "{context}"

Order them by relevance.

{json_only}
["synonym1", "synonym2", "synonym3"]"#;
