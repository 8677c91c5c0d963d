pub fn fever_answer_fixture() -> &'static str {
    return r#"{"answer":"A fever is a temporary increase in your body temperature, often due to an illness.","confidence":0.92,"response_time":0.041}"#;
}

pub fn long_answer_fixture() -> &'static str {
    return r#"
Dehydration happens when you use or lose more fluid than you take in, and your body doesn't have enough water and other fluids to carry out its normal functions.

Common signs include:
- Extreme thirst
- Less frequent urination
- Dark-colored urine
- Fatigue, dizziness and confusion

Mild to moderate dehydration can usually be reversed by drinking more fluids, but severe dehydration needs immediate medical treatment.
"#
    .trim();
}
