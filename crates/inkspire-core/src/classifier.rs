//! Prompt classifier.
//!
//! Splits one free-text description into the two prompts that make up a
//! generation batch. When the description asks for a full closure of a
//! wrap-around limb, the batch becomes an outer/inner pair of the same limb;
//! otherwise it is two composition variants of the same idea.
//!
//! Matching is substring based on the lower-cased description. The outbound
//! prompts always carry the description with its original casing.

use serde::{Deserialize, Serialize};

/// Body parts the classifier recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Forearm,
    FullArm,
    FullLeg,
    Calf,
    Thigh,
    Back,
    Chest,
}

impl BodyPart {
    /// Canonical name embedded in prompts sent to the image model.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Forearm => "Antebraço",
            Self::FullArm => "Braço Completo",
            Self::FullLeg => "Perna Completa",
            Self::Calf => "Panturrilha",
            Self::Thigh => "Coxa",
            Self::Back => "Costas",
            Self::Chest => "Peito",
        }
    }

    /// Name used in view labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Forearm => "Forearm",
            Self::FullArm => "Full Arm",
            Self::FullLeg => "Full Leg",
            Self::Calf => "Calf",
            Self::Thigh => "Thigh",
            Self::Back => "Back",
            Self::Chest => "Chest",
        }
    }

    /// Wrap-around parts get outer/inner views; flat surfaces never do.
    pub fn is_cylindrical(&self) -> bool {
        !matches!(self, Self::Back | Self::Chest)
    }
}

/// Ordered body-part rules. Earlier entries win, so `forearm` must stay
/// ahead of `arm` and `antebraço` ahead of `braço`.
const BODY_PART_RULES: &[(&[&str], BodyPart)] = &[
    (&["ante braço", "antebraço", "forearm"], BodyPart::Forearm),
    (&["braço", "arm"], BodyPart::FullArm),
    (&["perna", "leg"], BodyPart::FullLeg),
    (&["panturrilha", "calf"], BodyPart::Calf),
    (&["coxa", "thigh"], BodyPart::Thigh),
    (&["costas", "back"], BodyPart::Back),
    (&["peito", "chest"], BodyPart::Chest),
];

/// Terms asking for a design that covers the whole limb.
const CLOSURE_KEYWORDS: &[&str] = &[
    "fechamento",
    "fechar",
    "full",
    "completo",
    "inteiro",
    "sleeve",
    "manga",
    "closure",
    "whole",
];

/// Outcome of classifying a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub prompts: (String, String),
    pub labels: (String, String),
    pub matched_part: Option<BodyPart>,
    pub closure: bool,
}

impl Classification {
    /// True when the batch is an outer/inner pair of one limb.
    pub fn is_paired_view(&self) -> bool {
        self.closure && self.matched_part.is_some_and(|part| part.is_cylindrical())
    }

    /// The two (prompt, label) entries in batch order.
    pub fn entries(&self) -> [(&str, &str); 2] {
        [
            (self.prompts.0.as_str(), self.labels.0.as_str()),
            (self.prompts.1.as_str(), self.labels.1.as_str()),
        ]
    }
}

/// First body part whose keyword list matches, in table order.
pub fn detect_body_part(description: &str) -> Option<BodyPart> {
    let lower = description.to_lowercase();
    BODY_PART_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, part)| *part)
}

/// Whether any closure keyword appears.
pub fn has_closure_keyword(description: &str) -> bool {
    let lower = description.to_lowercase();
    CLOSURE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Splits `description` into the two prompts of a batch.
pub fn classify(description: &str) -> Classification {
    let matched_part = detect_body_part(description);
    let closure = has_closure_keyword(description);

    match matched_part {
        Some(part) if closure && part.is_cylindrical() => Classification {
            prompts: (
                paired_prompt(part, "EXTERNAL/OUTER", description),
                paired_prompt(part, "INTERNAL/INNER", description),
            ),
            labels: (
                format!("External Side ({})", part.display_name()),
                format!("Internal Side ({})", part.display_name()),
            ),
            matched_part,
            closure,
        },
        _ => Classification {
            prompts: (
                format!("{description}. Variation 1: Bold composition."),
                format!("{description}. Variation 2: Alternative composition/perspective."),
            ),
            labels: ("Variation 1".to_string(), "Variation 2".to_string()),
            matched_part,
            closure,
        },
    }
}

fn paired_prompt(part: BodyPart, side: &str, description: &str) -> String {
    let name = part.canonical_name();
    format!(
        "Project: Tattoo for {name}. View: {side} side. Context: {description}. \
         Ensure the shape fits the {name} specifically."
    )
}
