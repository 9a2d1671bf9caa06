// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompts and the structured-output schema for meal selection.

use mp_core::{Meal, MealCounts};
use serde_json::{json, Value};
use std::fmt::Write;
use std::sync::LazyLock;

/// JSON schema handed to the claude CLI via `--json-schema`.
pub static MEAL_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "meals": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "recipe_name": {
                            "type": "string",
                            "description": "Exact recipe name"
                        },
                        "source": {
                            "type": "string",
                            "enum": ["notion", "web"],
                            "description": "Whether recipe is from Notion or web search"
                        },
                        "url": {
                            "type": "string",
                            "description": "Notion page URL or web recipe URL"
                        }
                    },
                    "required": ["recipe_name", "source", "url"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["meals"],
        "additionalProperties": false
    })
});

const SELECTION_RULES: &str = r#"You are a weekly meal prep planner. Search my Notion workspace for recipes and select {total} meals for the upcoming week.

## Sources
Search these two Notion pages for recipes:
1. "Meal Prep Options Table" (database) - Only select recipes where "Is it good?" is "Yes" or "TBD". Do NOT select recipes where "Is it good?" is "No".
2. "Dense Bean Salads" (page with subpages) - Each subpage is a recipe.

## Meal Split
- {notion} meals from Notion (from either of the two sources above)
- {web} meals from a web search (find a recipe online that fits all the rules below)

## Diet Rules (Mediterranean Diet)
All meals must follow Mediterranean diet guidelines. This does NOT mean meals must literally be from the Mediterranean region; it means they follow the diet principles:
- **No red meat.** Acceptable proteins: fish, poultry, eggs, beans/legumes, tofu.
- **Full-fat dairy** can be a minor component in all meals, but may only be a major component in at most 1 meal per week.
- **Rice** can be used in a maximum of 2 meals per week.
- Emphasize vegetables, whole grains, legumes, healthy fats (olive oil, nuts).

## Weekly Requirements
- Every week must include exactly **1 bean-based meal** (e.g., lentil soup, chili, bean stew; dense bean salads do NOT count).
- Every week must include exactly **1 salad bowl** (a dense bean salad counts).
- The remaining {flexible} meals are flexible (any type that follows diet rules).

## Portion Size
All meals must make **at least 4 servings**, ideally 6. Prefer recipes that scale easily to 6 servings.

## Cooking Style Preferences
Prioritize meals that:
- Can be made easily in bulk
- Minimize dish washing (one-pot meals, sheet-pan meals, Instant Pot, dump-and-bake)
- Are freezable when possible
- Use frozen or pre-cut vegetables when practical

## Output
Respond with ONLY a JSON object in this exact format, no other text:
{
  "meals": [
    {
      "recipe_name": "exact recipe name",
      "source": "notion" or "web",
      "url": "notion page URL or web recipe URL"
    }
  ]
}
"#;

/// Bean meal and salad bowl are fixed; the rest are free.
const REQUIRED_MEAL_TYPES: usize = 2;

/// Prompt for a fresh weekly selection.
pub fn build_prompt(excluded: &[String], ingredient_hints: &[String], counts: &MealCounts) -> String {
    let mut prompt = SELECTION_RULES
        .replace("{total}", &counts.total.to_string())
        .replace("{notion}", &counts.notion.to_string())
        .replace("{web}", &counts.web.to_string())
        .replace(
            "{flexible}",
            &counts.total.saturating_sub(REQUIRED_MEAL_TYPES).to_string(),
        );

    if !excluded.is_empty() {
        prompt.push('\n');
        push_exclusions(&mut prompt, excluded);
    }

    if !ingredient_hints.is_empty() {
        prompt.push_str(
            "\n## Ingredient Requests\n\
             Try to incorporate these ingredients into at least one recipe this week:\n",
        );
        for hint in ingredient_hints {
            let _ = writeln!(prompt, "- \"{}\"", hint);
        }
    }

    prompt
}

/// Prompt for revising an existing plan from reply feedback.
pub fn build_regeneration_prompt(
    current: &[Meal],
    feedback: &str,
    excluded: &[String],
    counts: &MealCounts,
) -> String {
    let mut prompt = String::from(
        "You are revising a weekly meal prep plan based on user feedback.\n\n\
         ## Current Meal Plan\n",
    );
    for (i, meal) in current.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} ({}) - {}",
            i + 1,
            meal.recipe_name,
            meal.source,
            meal.url
        );
    }

    let _ = write!(
        prompt,
        "\n## User Feedback\n\
         \"{feedback}\"\n\n\
         ## Instructions\n\
         - Keep meals the user is happy with\n\
         - Replace only the meals the user wants changed\n\
         - Follow the same diet rules and source split ({notion} Notion, {web} web)\n\
         - Still avoid recently-used recipes (exclusion list below)\n\
         - Search my Notion workspace for replacement Notion recipes\n\
         - Use a web search for replacement web recipes\n\
         - Return exactly {total} meals total\n",
        notion = counts.notion,
        web = counts.web,
        total = counts.total,
    );

    if !excluded.is_empty() {
        prompt.push('\n');
        push_exclusions(&mut prompt, excluded);
    }

    prompt
}

fn push_exclusions(prompt: &mut String, excluded: &[String]) {
    prompt.push_str(
        "## Exclusions\n\
         DO NOT select any of the following recipes \
         (they were chosen in the last few weeks):\n",
    );
    for name in excluded {
        let _ = writeln!(prompt, "- {}", name);
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
