//! Prompt text for the itinerary model and parsing of its structured replies.

use serde_json::{Value, json};

use crate::core::preferences::{PreferenceSet, questions};

use super::PlannerError;

const RESTAURANT_FORMAT: &str = "\
For each restaurant, clearly include the name and address in this format:

### Restaurant Name
- Address: Full address here
- Cuisine: Type of cuisine
- Price range: $, $$, $$$, etc.
- Description: Brief description";

fn generate_system() -> String {
    format!(
        "You are an expert travel food planner that creates detailed, personalized restaurant itineraries.\n\
         Your responses should be in Markdown format with clear organization and helpful details.\n\
         Include practical information like reservation recommendations and travel tips.\n\
         {}",
        RESTAURANT_FORMAT
    )
}

fn revise_system() -> String {
    format!(
        "You are an expert travel food planner that modifies existing itineraries based on user feedback.\n\
         Your responses should be in Markdown format with clear organization and helpful details.\n\
         {}",
        RESTAURANT_FORMAT
    )
}

fn generate_user(p: &PreferenceSet) -> String {
    format!(
        "Create a detailed food itinerary for a trip to {destination} from {dates}.

Travel Details:
- Number of travelers: {travelers}
- Preferred cuisines: {cuisines}
- Dietary restrictions: {dietary}
- Budget level: {budget}
- Dining experience: {experience}
- Additional notes: {notes}

Requirements:
- Organize by day with clear headings
- Include breakfast, lunch, and dinner options each day
- For each restaurant provide:
  * Name (as ### heading)
  * Address (clearly labeled)
  * Cuisine type
  * Price range
  * Short description
  * Why it was selected
  * Any reservation recommendations
- Include local food specialties to try
- Add practical tips about dining culture in the area
- Use horizontal rules between days
- Format for easy reading with Markdown",
        destination = p.value_or_unspecified("destination"),
        dates = p.value_or_unspecified("dates"),
        travelers = p.value_or_unspecified("travelers"),
        cuisines = p.value_or_unspecified("cuisines"),
        dietary = p.value_or_unspecified("dietary_restrictions"),
        budget = p.value_or_unspecified("budget"),
        experience = p.value_or_unspecified("experience"),
        notes = p.value_or_unspecified("additional_notes"),
    )
}

fn revise_user(current: &str, request: &str, p: &PreferenceSet) -> String {
    format!(
        "Please modify the following food itinerary based on these requested changes:
{request}

Original Itinerary Details:
- Destination: {destination}
- Dates: {dates}
- Travelers: {travelers}
- Cuisines: {cuisines}
- Dietary restrictions: {dietary}
- Budget: {budget}
- Experience: {experience}
- Additional notes: {notes}

Here is the current itinerary (in Markdown format):
{current}

Please:
1. Make the requested changes
2. Keep the same Markdown formatting
3. Explain any significant changes made
4. Maintain all the original information that wasn't requested to change",
        destination = p.value_or_unspecified("destination"),
        dates = p.value_or_unspecified("dates"),
        travelers = p.value_or_unspecified("travelers"),
        cuisines = p.value_or_unspecified("cuisines"),
        dietary = p.value_or_unspecified("dietary_restrictions"),
        budget = p.value_or_unspecified("budget"),
        experience = p.value_or_unspecified("experience"),
        notes = p.value_or_unspecified("additional_notes"),
    )
}

fn extract_system() -> String {
    let keys: Vec<&str> = questions().iter().map(|q| q.key.as_str()).collect();
    format!(
        "You read a traveller's message and pull out their trip preferences.\n\
         Reply with a single JSON object and nothing else. Allowed keys: {}.\n\
         Use string values. Omit any key the message does not mention.",
        keys.join(", ")
    )
}

pub(super) fn generate_messages(prefs: &PreferenceSet) -> Vec<Value> {
    vec![
        json!({"role": "system", "content": generate_system()}),
        json!({"role": "user", "content": generate_user(prefs)}),
    ]
}

pub(super) fn revise_messages(current: &str, request: &str, prefs: &PreferenceSet) -> Vec<Value> {
    vec![
        json!({"role": "system", "content": revise_system()}),
        json!({"role": "user", "content": revise_user(current, request, prefs)}),
    ]
}

pub(super) fn extract_messages(text: &str) -> Vec<Value> {
    vec![
        json!({"role": "system", "content": extract_system()}),
        json!({"role": "user", "content": text}),
    ]
}

/// Strip a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the model's preference reply. Unknown keys are dropped; non-string
/// scalars are kept as their JSON text.
pub(super) fn parse_preferences_reply(reply: &str) -> Result<PreferenceSet, PlannerError> {
    let value: Value =
        serde_json::from_str(strip_code_fence(reply)).map_err(PlannerError::Preferences)?;
    let mut prefs = PreferenceSet::default();
    let Some(obj) = value.as_object() else {
        return Ok(prefs);
    };
    for (key, v) in obj {
        let text = match v {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => continue,
        };
        if !text.is_empty() {
            prefs.set(key, text);
        }
    }
    Ok(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> PreferenceSet {
        let mut p = PreferenceSet::default();
        p.set("destination", "Houston");
        p.set("dates", "May 18 - May 21");
        p.set("budget", "Moderate");
        p
    }

    #[test]
    fn generate_prompt_fills_answers_and_defaults() {
        let messages = generate_messages(&prefs());
        let system = messages[0]["content"].as_str().unwrap();
        let user = messages[1]["content"].as_str().unwrap();
        assert!(system.contains("### Restaurant Name\n- Address: Full address here"));
        assert!(user.starts_with("Create a detailed food itinerary for a trip to Houston from May 18 - May 21."));
        assert!(user.contains("- Budget level: Moderate"));
        assert!(user.contains("- Dietary restrictions: not specified"));
    }

    #[test]
    fn revise_prompt_carries_request_and_current_itinerary() {
        let messages = revise_messages("### Uchi\n- Address: 904 Westheimer Rd", "swap day 2 lunch", &prefs());
        let user = messages[1]["content"].as_str().unwrap();
        assert!(user.contains("based on these requested changes:\nswap day 2 lunch"));
        assert!(user.contains("(in Markdown format):\n### Uchi\n- Address: 904 Westheimer Rd"));
        assert!(messages[0]["content"].as_str().unwrap().contains("modifies existing itineraries"));
    }

    #[test]
    fn extract_prompt_lists_question_keys() {
        let messages = extract_messages("Going to Austin next week");
        let system = messages[0]["content"].as_str().unwrap();
        assert!(system.contains("destination"));
        assert!(system.contains("additional_notes"));
        assert_eq!(messages[1]["content"], "Going to Austin next week");
    }

    #[test]
    fn parses_plain_json_reply() {
        let p = parse_preferences_reply(r#"{"destination": "Austin", "travelers": 2, "cuisines": ["BBQ", "Tex-Mex"]}"#).unwrap();
        assert_eq!(p.get("destination"), Some("Austin"));
        assert_eq!(p.get("travelers"), Some("2"));
        assert_eq!(p.get("cuisines"), Some("BBQ, Tex-Mex"));
        assert_eq!(p.get("dates"), None);
    }

    #[test]
    fn parses_fenced_reply_and_ignores_unknown_keys() {
        let reply = "```json\n{\"destination\": \"Lisbon\", \"mood\": \"happy\", \"budget\": null}\n```";
        let p = parse_preferences_reply(reply).unwrap();
        assert_eq!(p.get("destination"), Some("Lisbon"));
        assert_eq!(p.get("budget"), None);
    }

    #[test]
    fn non_json_reply_is_an_error() {
        let err = parse_preferences_reply("Sure! You're going to Rome.").unwrap_err();
        assert!(matches!(err, PlannerError::Preferences(_)));
    }

    #[test]
    fn non_object_json_yields_empty_set() {
        assert_eq!(parse_preferences_reply("[]").unwrap(), PreferenceSet::default());
    }
}
