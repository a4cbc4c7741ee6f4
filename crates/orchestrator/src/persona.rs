//! Fixed persona and goal vocabularies for prompts.

use tracing::warn;

/// Tone of automated replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    #[default]
    Friendly,
    Professional,
    Casual,
    Empathetic,
}

impl Persona {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "friendly" => Some(Persona::Friendly),
            "professional" => Some(Persona::Professional),
            "casual" => Some(Persona::Casual),
            "empathetic" => Some(Persona::Empathetic),
            _ => None,
        }
    }

    /// Resolve an optional stored key, falling back to the default with a
    /// warning when the key is not recognized.
    pub fn resolve(key: Option<&str>) -> Self {
        match key.filter(|k| !k.trim().is_empty()) {
            None => Persona::default(),
            Some(key) => Self::from_key(key).unwrap_or_else(|| {
                warn!(key, "Unknown persona key, using default");
                Persona::default()
            }),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Persona::Friendly => "friendly",
            Persona::Professional => "professional",
            Persona::Casual => "casual",
            Persona::Empathetic => "empathetic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Persona::Friendly => {
                "Warm, upbeat and approachable. Keep sentences short and use the customer's first name when you know it."
            }
            Persona::Professional => {
                "Polished and courteous. Use clear, complete sentences and no slang."
            }
            Persona::Casual => "Relaxed and conversational, like texting a regular customer.",
            Persona::Empathetic => {
                "Patient and understanding. Acknowledge the customer's situation before moving the conversation forward."
            }
        }
    }
}

/// What the automated reply is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    BookAppointment,
    CollectQuoteInfo,
    QualifyLead,
    FollowUp,
    AnswerQuestions,
    #[default]
    None,
}

impl Goal {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "book_appointment" => Some(Goal::BookAppointment),
            "collect_quote_info" => Some(Goal::CollectQuoteInfo),
            "qualify_lead" => Some(Goal::QualifyLead),
            "follow_up" => Some(Goal::FollowUp),
            "answer_questions" => Some(Goal::AnswerQuestions),
            "none" => Some(Goal::None),
            _ => None,
        }
    }

    /// Resolve an optional stored key, falling back to no goal with a
    /// warning when the key is not recognized.
    pub fn resolve(key: Option<&str>) -> Self {
        match key.filter(|k| !k.trim().is_empty()) {
            None => Goal::default(),
            Some(key) => Self::from_key(key).unwrap_or_else(|| {
                warn!(key, "Unknown goal key, using default");
                Goal::default()
            }),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Goal::BookAppointment => "book_appointment",
            Goal::CollectQuoteInfo => "collect_quote_info",
            Goal::QualifyLead => "qualify_lead",
            Goal::FollowUp => "follow_up",
            Goal::AnswerQuestions => "answer_questions",
            Goal::None => "none",
        }
    }

    pub fn objective(&self) -> &'static str {
        match self {
            Goal::BookAppointment => {
                "Guide the customer toward booking an appointment. Offer to find a time that works for them."
            }
            Goal::CollectQuoteInfo => {
                "Collect what the team needs for a quote: vehicle year, make and model, and the coverage the customer wants."
            }
            Goal::QualifyLead => {
                "Find out how ready the customer is to buy: their timeline, rough budget and who makes the decision."
            }
            Goal::FollowUp => {
                "Follow up on the earlier conversation and check whether the customer has any questions."
            }
            Goal::AnswerQuestions => {
                "Answer the customer's questions accurately using only the business information provided."
            }
            Goal::None => "Respond naturally, no specific goal.",
        }
    }
}
