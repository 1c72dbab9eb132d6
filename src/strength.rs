use serde::Serialize;

const COMMON_PATTERNS: [&str; 4] = ["password", "123456", "qwerty", "admin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Strength::Weak,
            3..=4 => Strength::Moderate,
            5..=6 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Strength::Weak => "red",
            Strength::Moderate => "orange",
            Strength::Strong => "green",
            Strength::VeryStrong => "blue",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Strength::Weak => "🔴",
            Strength::Moderate => "🟠",
            Strength::Strong => "🟢",
            Strength::VeryStrong => "🔵",
        }
    }

    /// One-line description shown next to the meter.
    pub fn guide(&self) -> &'static str {
        match self {
            Strength::Weak => "Less than 8 chars, limited variety",
            Strength::Moderate => "8-12 chars, some variety",
            Strength::Strong => "12+ chars, good mix",
            Strength::VeryStrong => "16+ chars, excellent mix",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Weak => write!(f, "Weak"),
            Strength::Moderate => write!(f, "Moderate"),
            Strength::Strong => write!(f, "Strong"),
            Strength::VeryStrong => write!(f, "Very Strong"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub strength: Strength,
    pub color: &'static str,
    pub icon: &'static str,
    pub feedback: Vec<String>,
}

/// Scores a password on a 1..=7 scale: up to 3 points for length and one
/// point per character class present. Any deny-listed substring pins the
/// score to 1.
pub fn score_password(password: &str) -> StrengthReport {
    let mut score: u8 = 0;
    let mut feedback = Vec::new();

    let length = password.chars().count();
    if length < 8 {
        score += 1;
        feedback.push("Password is too short.".to_string());
    } else if length < 12 {
        score += 2;
        feedback.push("Password length is moderate.".to_string());
    } else {
        score += 3;
        feedback.push("Good password length.".to_string());
    }

    let checks: [(fn(&char) -> bool, &str); 4] = [
        (|c| c.is_lowercase(), "Add lowercase letters."),
        (|c| c.is_uppercase(), "Add uppercase letters."),
        (|c| c.is_ascii_digit(), "Add numbers."),
        (|c| c.is_ascii_punctuation(), "Add special characters."),
    ];
    for (present, tip) in checks {
        if password.chars().any(|c| present(&c)) {
            score += 1;
        } else {
            feedback.push(tip.to_string());
        }
    }

    let lowered = password.to_lowercase();
    if COMMON_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
        score = 1;
        feedback.push("Contains common password patterns.".to_string());
    }

    let strength = Strength::from_score(score);
    StrengthReport {
        score,
        strength,
        color: strength.color(),
        icon: strength.icon(),
        feedback,
    }
}
