//! Prompt text sent to the model: one fixed system instruction and a user prompt built
//! from the lead.

use crate::lead::LeadRequest;

/// System role message for every generation call.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates professional business proposals.";

/// Themes every proposal must cover, in the order they are listed to the model.
pub const HIGHLIGHTS: [&str; 6] = [
    "Benefits of the platform for their specific use cases",
    "Scalability and flexibility",
    "Security and compliance features",
    "Cross-currency capabilities",
    "Cost-effectiveness",
    "Support and onboarding processes",
];

/// Builds the user prompt. Pure: the same request always yields the same string.
///
/// Every field is interpolated verbatim, including an empty `notes`.
pub fn build_prompt(lead: &LeadRequest) -> String {
    let use_cases: Vec<&str> = lead.use_cases().iter().map(|u| u.label()).collect();
    let currencies: Vec<&str> = lead.currencies().iter().map(|c| c.label()).collect();

    let mut prompt = format!(
        "Generate a personalized business proposal for an embedded payment platform.\n\
         The proposal should be tailored to the following lead details:\n\
         \n\
         Lead Name: {}\n\
         Company Name: {}\n\
         Industry: {}\n\
         Use Cases: {}\n\
         Required Currencies: {}\n\
         Additional Requirements: {}\n\
         \n\
         The proposal should highlight:\n",
        lead.name(),
        lead.company(),
        lead.industry().label(),
        use_cases.join(", "),
        currencies.join(", "),
        lead.notes(),
    );
    for highlight in HIGHLIGHTS {
        prompt.push_str("- ");
        prompt.push_str(highlight);
        prompt.push('\n');
    }
    prompt.push_str("\nWrite this proposal in a professional and persuasive tone.\n");
    prompt
}
