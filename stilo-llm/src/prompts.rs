//! Prompt templates for style-guide building and prompt enhancement.
//!
//! Every guide-building prompt embeds [`EXAMPLE_STYLE_GUIDE`] so the model
//! reproduces the same section schema (Core Characteristics, Color Palette,
//! Composition, Technique, Mood, Application Note) at the same level of
//! detail.

/// Worked example guide used as the format template in every prompt.
pub const EXAMPLE_STYLE_GUIDE: &str = r#"# J. M. W. Turner Style Guide

## Core Characteristics
- Dramatic use of light and atmospheric effects
- Luminous, almost ethereal quality to scenes
- Bold, expressive brushwork with visible texture
- Emphasis on the sublime and romantic
- Rich golden yellows, deep blues, and warm oranges

## Color Palette
- Dominant warm golds and yellows (especially in skies)
- Deep blues and turquoise for water and atmosphere
- Burnt sienna, ochre, and raw umber for earth tones
- Dramatic contrasts between light and shadow
- Haziness and atmospheric perspective

## Composition
- Often dramatic diagonal compositions
- Swirling, dynamic movement
- Light as the central focus
- Blurred boundaries between elements
- Sense of vast space and atmosphere

## Technique
- Loose, expressive brushwork
- Layered glazes creating luminosity
- Impasto in highlights
- Deliberately indistinct forms dissolving into light
- Painterly and atmospheric rather than detailed

## Mood
- Sublime and awe-inspiring
- Romantic and emotional
- Sense of nature's power
- Contemplative and atmospheric
- Often melancholic or nostalgic

## Application Note
Apply these characteristics while maintaining the core subject matter of the prompt.
The Turner style should enhance, not overwhelm, the specific content requested.
"#;

/// What kind of subject a name-based style guide describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Artist,
    Movement,
}

impl SubjectKind {
    fn descriptor(self) -> &'static str {
        match self {
            SubjectKind::Artist => "artist",
            SubjectKind::Movement => "artistic style or movement",
        }
    }
}

/// Prompt asking for a new style guide for a named artist or movement.
pub fn guide_prompt(name: &str, kind: SubjectKind) -> String {
    format!(
        r#"You are an expert art historian and visual style analyst. Create a detailed style guide for image generation that captures the distinctive characteristics of {name} ({descriptor}).

Your style guide should follow this exact format and level of detail:

{example}

Create a comprehensive style guide for {name} that includes:
1. Core Characteristics - the most distinctive visual elements
2. Color Palette - specific colors and color relationships
3. Composition - how space and elements are arranged
4. Technique - brushwork, mark-making, or technical approach
5. Mood - the emotional and atmospheric qualities
6. Application Note - guidance on how to apply the style while keeping subject matter clear

Be specific and detailed. Focus on visual characteristics that an image generation AI can understand and reproduce. The guide will be used to create multiple images that should all share these consistent stylistic elements.

Return ONLY the markdown-formatted style guide, starting with the title.
"#,
        name = name,
        descriptor = kind.descriptor(),
        example = EXAMPLE_STYLE_GUIDE,
    )
}

/// Prompt paired with one inline image to extract its style characteristics.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this image and describe its visual style characteristics in detail.
Focus on the following categories:

1. **Core Characteristics**: The most distinctive visual elements
2. **Color Palette**: Specific colors, color relationships, and overall color mood
3. **Composition**: How space and elements are arranged, perspective, balance
4. **Technique**: Brushwork, mark-making, texture, or technical approach visible
5. **Mood**: The emotional and atmospheric qualities
6. **Subject Matter**: What is depicted in the image

Be specific and detailed. Focus on visual characteristics that could be used to recreate a similar style.
Format your response with clear headings for each category."#;

/// Join per-image analyses into the labeled block fed to synthesis.
pub fn combined_analyses(analyses: &[String]) -> String {
    analyses
        .iter()
        .enumerate()
        .map(|(i, analysis)| format!("## Image {} Analysis\n{analysis}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Prompt asking for one unified guide covering the characteristics
/// consistent across every analyzed image.
pub fn synthesis_prompt(analyses: &[String]) -> String {
    format!(
        r#"You are an expert art historian and visual style analyst. You have been provided with detailed analyses of {count} images. Your task is to identify the common visual patterns and characteristics across all these images and create a unified style guide.

Here are the individual image analyses:

{combined}

---

Based on these analyses, create a comprehensive style guide that captures the CONSISTENT elements across all images. Follow this exact format:

{example}

Your style guide should:
1. Identify patterns that appear across MULTIPLE images (not just one)
2. Focus on visual characteristics that can be reproduced
3. Note any variations or range within the style
4. Be specific about colors, composition, technique, and mood
5. Include an "Application Note" section explaining how to apply the style while maintaining subject matter

Return ONLY the markdown-formatted style guide, starting with a descriptive title based on the common characteristics you've identified."#,
        count = analyses.len(),
        combined = combined_analyses(analyses),
        example = EXAMPLE_STYLE_GUIDE,
    )
}

/// Prompt merging a style guide with the user's subject into one short,
/// model-ready image prompt.
pub fn enhancement_prompt(style_guide: &str, user_prompt: &str) -> String {
    format!(
        r#"You are an expert at writing concise prompts for image generation AI models.

Given this style guide:
{style_guide}

And this subject to depict:
{user_prompt}

Create a single, concise image generation prompt (2-4 sentences maximum) that:
1. Describes the subject clearly
2. Incorporates the key style characteristics (colors, composition, technique, mood)
3. Is optimized for image generation models (Stable Diffusion, DALL-E, Flux, etc.)

DO NOT write explanations, sections, or art direction documents.
DO NOT use headers, bullet points, or markdown formatting.
ONLY output the final prompt text that will be sent directly to the image model.

Example format:
"[Subject description] in the style of [artist/movement]. [Key visual characteristics: colors, technique]. [Composition and mood details]. [Technical quality specifications]."

Now write the prompt:"#
    )
}
