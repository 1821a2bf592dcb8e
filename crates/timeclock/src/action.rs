//! The six clock actions an employee can submit.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use fichaje_core::DomainError;

/// A clock action.
///
/// Wire names keep the legacy Spanish tokens stored in existing entry rows
/// (`ENTRADA`, `SALIDA`, ...), so serialized entries stay compatible with
/// data recorded by earlier clients.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockAction {
    /// Start of the working day (`ENTRADA`).
    #[serde(rename = "ENTRADA")]
    ClockIn,
    /// End of the working day (`SALIDA`).
    #[serde(rename = "SALIDA")]
    ClockOut,
    /// Start of a short break (`DESCANSO_INICIO`).
    #[serde(rename = "DESCANSO_INICIO")]
    BreakStart,
    /// End of a short break (`DESCANSO_FIN`).
    #[serde(rename = "DESCANSO_FIN")]
    BreakEnd,
    /// Start of the lunch pause (`COMIDA_INICIO`).
    #[serde(rename = "COMIDA_INICIO")]
    LunchStart,
    /// End of the lunch pause (`COMIDA_FIN`).
    #[serde(rename = "COMIDA_FIN")]
    LunchEnd,
}

impl ClockAction {
    /// Every action, in a fixed order. Handy for exhaustive tests.
    pub const ALL: [ClockAction; 6] = [
        ClockAction::ClockIn,
        ClockAction::ClockOut,
        ClockAction::BreakStart,
        ClockAction::BreakEnd,
        ClockAction::LunchStart,
        ClockAction::LunchEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "ENTRADA",
            ClockAction::ClockOut => "SALIDA",
            ClockAction::BreakStart => "DESCANSO_INICIO",
            ClockAction::BreakEnd => "DESCANSO_FIN",
            ClockAction::LunchStart => "COMIDA_INICIO",
            ClockAction::LunchEnd => "COMIDA_FIN",
        }
    }
}

impl core::fmt::Display for ClockAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRADA" => Ok(ClockAction::ClockIn),
            "SALIDA" => Ok(ClockAction::ClockOut),
            "DESCANSO_INICIO" => Ok(ClockAction::BreakStart),
            "DESCANSO_FIN" => Ok(ClockAction::BreakEnd),
            "COMIDA_INICIO" => Ok(ClockAction::LunchStart),
            "COMIDA_FIN" => Ok(ClockAction::LunchEnd),
            other => Err(DomainError::validation(format!(
                "unknown clock action: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tokens_roundtrip() {
        for action in ClockAction::ALL {
            let parsed: ClockAction = action.as_str().parse().unwrap();
            assert_eq!(parsed, action);

            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
            let back: ClockAction = serde_json::from_str(&json).unwrap();
            assert_eq!(back, action);
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!("FICHAJE".parse::<ClockAction>().is_err());
        assert!("entrada".parse::<ClockAction>().is_err());
    }
}
