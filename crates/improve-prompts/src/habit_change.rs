/// Append the habit-change rules and output contract to the prompt.
pub fn append_instructions(prompt: &mut String) {
    prompt.push_str("## Rules\n\n");
    prompt.push_str(
        "1. Parse the user request into habits to add, habits to modify and habits to delete.\n\
         2. Every added habit needs a realistic start time in 24-hour HH:MM format, a duration \
         in minutes, and all four behavior-loop fields (Cue, Craving, Response, Reward).\n\
         3. Every modification must reference the id of an existing habit above, include only \
         the fields that change, and give a short rationale.\n\
         4. Only delete a habit when the user explicitly asks for it to be removed.\n\
         5. Where feasible, schedule habits so their times do not overlap with existing habits.\n\
         6. Always write a summary explaining the overall change in plain language.\n\n",
    );
    prompt.push_str(
        "Respond with a single JSON object with the keys `add`, `modify`, `delete` and \
         `summary`, matching the response schema. Do not wrap the JSON in markdown.\n",
    );
}
