//! Prompt assembly from generation options.

use crate::options::{BackgroundType, GenerationOptions};

/// The sprite prompt. Sections: role/task, global settings, visual rules,
/// subject, background, props, negative prompt.
const PIXEL_ART_PROMPT_TEMPLATE: &str = "
Role: Expert Pixel Artist.
Task: Create a sprite for a retro game.

Global Settings:
- Resolution: {{RESOLUTION}} pixels (Strict).
- Color Count: Max {{MAX_COLORS}} flat colors total.
- Style: Flat, Borderless, Iconic.

CRITICAL VISUAL RULES:
1. NO OUTLINES: The character must NOT have an outline (no black, white, or colored border).
2. EDGE DEFINITION: Edges must be defined purely by the contrast between body parts and the background.
3. SIZE: The character must be LARGE and fill 80% to 90% of the canvas. Do not leave excessive empty space.
4. NO SHADING: Use solid, flat colors only. No shadows, no gradients, no lighting.

Subject:
{{SUBJECT}}
- Appearance: Cute, chibi proportions, low detail, toy-like.
- Construction: Built from solid blocks of color.

Background:
{{BACKGROUND_INSTRUCTION}}
{{PROPS_INSTRUCTION}}

Negative Prompt:
- outline, border, stroke, line art
- shadow, shading, gradient, dither, noise
- anti-aliasing, blur, smoothing
- small size, tiny, zoomed out
- realistic, high detail
";

/// Background line for [`BackgroundType::Solid`].
pub const SOLID_BACKGROUND_INSTRUCTION: &str =
    "Single solid flat color. Ensure high contrast with the character to define edges without outlines.";

/// Props block used when props are enabled.
pub const BACKGROUND_PROPS_INSTRUCTION: &str = "
- Add 1-2 simple thematic props in the background.
- Props must be borderless and flat.
- Props must be smaller than the main character.";

/// Props line used when props are disabled.
pub const NO_PROPS_INSTRUCTION: &str = "No objects in background.";

/// Build the model prompt for the given options.
///
/// Pure and deterministic. The subject is inserted verbatim.
#[must_use]
pub fn build_prompt(options: &GenerationOptions) -> String {
    let background = background_instruction(options);
    let props = props_instruction(options);
    let max_colors = options.max_colors().to_string();

    fill_template(PIXEL_ART_PROMPT_TEMPLATE, |name| match name {
        "RESOLUTION" => Some(options.resolution().as_str()),
        "MAX_COLORS" => Some(max_colors.as_str()),
        "SUBJECT" => Some(options.subject()),
        "BACKGROUND_INSTRUCTION" => Some(background.as_str()),
        "PROPS_INSTRUCTION" => Some(props),
        _ => None,
    })
}

fn background_instruction(options: &GenerationOptions) -> String {
    match options.background() {
        BackgroundType::Solid => SOLID_BACKGROUND_INSTRUCTION.to_string(),
        BackgroundType::Bands => format!(
            "{} {} flat color bands. Clean, hard edges. No gradients.",
            options.band_count(),
            options.band_orientation()
        ),
    }
}

fn props_instruction(options: &GenerationOptions) -> &'static str {
    if options.include_props() {
        BACKGROUND_PROPS_INSTRUCTION
    } else {
        NO_PROPS_INSTRUCTION
    }
}

/// Single pass over `template`, replacing each `{{NAME}}` with `lookup(NAME)`.
///
/// Substituted values are never rescanned. Unknown placeholders are kept as-is.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{BandOrientation, Resolution};

    fn wizard_cat() -> GenerationOptions {
        GenerationOptions::builder("a grumpy wizard cat")
            .resolution(Resolution::Standard128)
            .max_colors(5)
            .background(BackgroundType::Bands)
            .band_orientation(BandOrientation::Vertical)
            .band_count(3)
            .include_props(true)
            .build()
            .unwrap()
    }

    #[test]
    fn banded_example() {
        let prompt = build_prompt(&wizard_cat());
        assert!(prompt.contains("128x128"));
        assert!(prompt.contains("Max 5 flat colors"));
        assert!(prompt.contains("3 vertical flat color bands. Clean, hard edges. No gradients."));
        assert!(prompt.contains(BACKGROUND_PROPS_INSTRUCTION));
        assert!(!prompt.contains(NO_PROPS_INSTRUCTION));
        assert!(!prompt.contains(SOLID_BACKGROUND_INSTRUCTION));
    }

    #[test]
    fn solid_background_omits_bands() {
        for orientation in [BandOrientation::Horizontal, BandOrientation::Vertical] {
            for count in 2..=5 {
                let options = GenerationOptions::builder("a frog knight")
                    .band_orientation(orientation)
                    .band_count(count)
                    .build()
                    .unwrap();
                let prompt = build_prompt(&options);
                assert!(prompt.contains(SOLID_BACKGROUND_INSTRUCTION));
                assert!(!prompt.contains("flat color bands"));
                assert!(!prompt.contains(orientation.as_str()));
            }
        }
    }

    #[test]
    fn banded_background_substitutes_count_and_orientation() {
        for orientation in [BandOrientation::Horizontal, BandOrientation::Vertical] {
            for count in 2..=5 {
                let options = GenerationOptions::builder("a frog knight")
                    .background(BackgroundType::Bands)
                    .band_orientation(orientation)
                    .band_count(count)
                    .build()
                    .unwrap();
                let prompt = build_prompt(&options);
                let expected =
                    format!("{count} {orientation} flat color bands. Clean, hard edges. No gradients.");
                assert!(prompt.contains(&expected), "missing '{expected}'");
                assert!(!prompt.contains(SOLID_BACKGROUND_INSTRUCTION));
            }
        }
    }

    #[test]
    fn no_props_line() {
        let options = GenerationOptions::builder("a robot").build().unwrap();
        let prompt = build_prompt(&options);
        assert!(prompt.contains("No objects in background."));
        assert!(!prompt.contains("thematic props"));
    }

    #[test]
    fn deterministic() {
        assert_eq!(build_prompt(&wizard_cat()), build_prompt(&wizard_cat()));
    }

    #[test]
    fn no_placeholders_left() {
        let prompt = build_prompt(&wizard_cat());
        assert!(!prompt.contains("{{"));
        assert!(!prompt.contains("}}"));
    }

    #[test]
    fn section_order() {
        let prompt = build_prompt(&wizard_cat());
        let markers = [
            "Role: Expert Pixel Artist.",
            "Global Settings:",
            "CRITICAL VISUAL RULES:",
            "Subject:\na grumpy wizard cat\n",
            "Background:\n3 vertical",
            "- Add 1-2 simple thematic props",
            "Negative Prompt:",
        ];
        let positions: Vec<usize> =
            markers.iter().map(|m| prompt.find(m).expect(m)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "sections out of order");
    }

    #[test]
    fn subject_inserted_verbatim() {
        let options = GenerationOptions::builder("a {{RESOLUTION}} \"quoted\" slime")
            .build()
            .unwrap();
        let prompt = build_prompt(&options);
        assert!(prompt.contains("Subject:\na {{RESOLUTION}} \"quoted\" slime\n"));
    }

    #[test]
    fn full_solid_prompt() {
        let options = GenerationOptions::builder("a bat")
            .resolution(Resolution::Macro64)
            .max_colors(3)
            .build()
            .unwrap();
        let prompt = build_prompt(&options);
        assert!(prompt.starts_with("\nRole: Expert Pixel Artist.\n"));
        assert!(prompt.contains("- Resolution: 64x64 pixels (Strict).\n"));
        assert!(prompt.contains("- Color Count: Max 3 flat colors total.\n"));
        assert!(prompt.contains(&format!(
            "Background:\n{SOLID_BACKGROUND_INSTRUCTION}\n{NO_PROPS_INSTRUCTION}\n\nNegative Prompt:"
        )));
        assert!(prompt.ends_with("- realistic, high detail\n"));
    }

    #[test]
    fn fill_template_keeps_unknown_and_unterminated() {
        let out = fill_template("a {{X}} b {{Y}} c {{", |n| (n == "X").then_some("1"));
        assert_eq!(out, "a 1 b {{Y}} c {{");
    }
}
