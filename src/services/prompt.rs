use crate::models::{SchemeRecord, UserProfile};

const SYSTEM_PROMPT_EN: &str = "You are Sarkari Saathi, a helpful assistant that helps Indian citizens \
discover government schemes they are eligible for.

Your role:
1. Ask the user about their profile (age, occupation, income, location)
2. Recommend relevant government schemes based on their profile
3. Explain eligibility criteria in simple language
4. Guide them through the application process

Keep sentences short and avoid bureaucratic jargon. If the user is not eligible, \
suggest alternatives. When recommending a scheme, explain why they qualify, the key \
benefits, the next steps and the documents required.";

const SYSTEM_PROMPT_HI: &str = "आप सरकारी साथी हैं, एक सहायक जो भारतीय नागरिकों को सरकारी योजनाओं के बारे में जानकारी देता है।

आपकी भूमिका:
1. उपयोगकर्ता से उनकी प्रोफ़ाइल के बारे में सवाल पूछें (उम्र, पेशा, आय, स्थान)
2. उनकी प्रोफ़ाइल के आधार पर प्रासंगिक सरकारी योजनाओं की सिफारिश करें
3. पात्रता मानदंड को सरल भाषा में समझाएं
4. आवेदन प्रक्रिया के बारे में मार्गदर्शन दें

सरल हिंदी और छोटे, स्पष्ट वाक्यों का उपयोग करें। यदि उपयोगकर्ता पात्र नहीं है तो विकल्प सुझाएं।";

/// System prompt for the display language
pub fn system_prompt(language: &str) -> &'static str {
    if language == "hi" {
        SYSTEM_PROMPT_HI
    } else {
        SYSTEM_PROMPT_EN
    }
}

/// User turn enriched with known profile fields and sample schemes
pub fn context_message(message: &str, profile: Option<&UserProfile>, samples: &[&SchemeRecord]) -> String {
    let mut parts = vec![format!("User message: {}", message)];

    let fields = profile.map(UserProfile::known_fields).unwrap_or_default();
    if !fields.is_empty() {
        let lines: Vec<String> = fields
            .iter()
            .map(|(name, value)| format!("- {}: {}", name, value))
            .collect();
        parts.push(format!("\nUser profile:\n{}", lines.join("\n")));
    }

    if !samples.is_empty() {
        let lines: Vec<String> = samples
            .iter()
            .map(|s| format!("- {}: {}", s.name, s.description))
            .collect();
        parts.push(format!("\nSample schemes available:\n{}", lines.join("\n")));
    }

    parts.join("\n")
}
