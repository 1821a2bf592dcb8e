//! Daily validation codes.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fichaje_core::{CodeId, EmployeeId, WorkDay};

/// Token length and alphabet match the codes the legacy admin panel handed
/// out: six characters, digits and uppercase letters.
pub const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A single-use validation code for one calendar day.
///
/// Issuing a new code does **not** invalidate earlier unused codes for the
/// same day; the gate resolves the ambiguity by treating the
/// most-recently-created unused code as the active one (see
/// [`select_active`]). `used` flips false→true exactly once, through the
/// store's conditional update, and codes are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCode {
    pub id: CodeId,
    pub code: String,
    pub day: WorkDay,
    pub created_by: EmployeeId,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl DailyCode {
    /// Issue a fresh code for `day`.
    ///
    /// The RNG is injected so tests can fix the token.
    pub fn issue(
        day: WorkDay,
        created_by: EmployeeId,
        created_at: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id: CodeId::new(),
            code: generate_token(rng),
            day,
            created_by,
            used: false,
            created_at,
        }
    }
}

fn generate_token(rng: &mut impl Rng) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Why an entered code was not accepted.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeRejection {
    /// No unused code exists for the day (none issued, all consumed, or the
    /// entered code belongs to a different day).
    #[error("no valid code for today")]
    NotFound,

    /// An unused code exists for the day, but the entered text is not it.
    #[error("entered code does not match today's code")]
    Mismatch,
}

/// The active code among a day's codes: most recently created and unused.
///
/// Creation-time ties break on the id (UUIDv7, time-ordered), so the choice
/// is deterministic for any input order.
pub fn select_active(codes: &[DailyCode]) -> Option<&DailyCode> {
    codes
        .iter()
        .filter(|c| !c.used)
        .max_by_key(|c| (c.created_at, *c.id.as_uuid()))
}

/// The gate decision for one submit attempt, over a day's codes.
///
/// Entered text is compared after trimming and uppercasing, matching how the
/// admin panel displays tokens. Pure: consumption (flipping `used`) is the
/// store's conditional update, performed by the caller on the returned code.
pub fn check<'a>(
    codes_for_day: &'a [DailyCode],
    entered: &str,
) -> Result<&'a DailyCode, CodeRejection> {
    let entered = entered.trim().to_uppercase();

    let mut any_unused = false;
    for code in codes_for_day.iter().filter(|c| !c.used) {
        any_unused = true;
        if code.code == entered {
            return Ok(code);
        }
    }

    if any_unused {
        Err(CodeRejection::Mismatch)
    } else {
        Err(CodeRejection::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    use super::*;

    fn day() -> WorkDay {
        WorkDay::of(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0).unwrap()
    }

    fn admin() -> EmployeeId {
        EmployeeId::from_uuid(uuid::Uuid::from_u128(0xAD))
    }

    fn code_with(text: &str, used: bool, created_at: DateTime<Utc>) -> DailyCode {
        DailyCode {
            id: CodeId::new(),
            code: text.to_string(),
            day: day(),
            created_by: admin(),
            used,
            created_at,
        }
    }

    #[test]
    fn token_has_expected_shape() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let issued = DailyCode::issue(day(), admin(), at(8), &mut rng);

        assert_eq!(issued.code.len(), CODE_LEN);
        assert!(issued
            .code
            .bytes()
            .all(|b| CODE_ALPHABET.contains(&b)));
        assert!(!issued.used);
    }

    #[test]
    fn token_generation_is_not_constant() {
        // StepRng walks the alphabet, so two draws differ.
        let mut rng = StepRng::new(0, 0x9E37_79B9_7F4A_7C15);
        let a = generate_token(&mut rng);
        let b = generate_token(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn no_codes_is_not_found() {
        assert_eq!(check(&[], "AB12CD"), Err(CodeRejection::NotFound));
    }

    #[test]
    fn all_used_is_not_found() {
        let codes = vec![code_with("AB12CD", true, at(8))];
        assert_eq!(check(&codes, "AB12CD"), Err(CodeRejection::NotFound));
    }

    #[test]
    fn wrong_text_with_active_code_is_mismatch() {
        let codes = vec![code_with("AB12CD", false, at(8))];
        assert_eq!(check(&codes, "ZZZZZZ"), Err(CodeRejection::Mismatch));
    }

    #[test]
    fn entered_text_is_normalized() {
        let codes = vec![code_with("AB12CD", false, at(8))];
        assert!(check(&codes, "  ab12cd ").is_ok());
    }

    #[test]
    fn match_consumes_the_matching_row() {
        let older = code_with("AAAAAA", false, at(8));
        let newer = code_with("BBBBBB", false, at(9));
        let codes = vec![older.clone(), newer.clone()];

        assert_eq!(check(&codes, "AAAAAA").unwrap().id, older.id);
        assert_eq!(check(&codes, "BBBBBB").unwrap().id, newer.id);
    }

    #[test]
    fn active_code_is_latest_unused_regardless_of_order() {
        let oldest = code_with("AAAAAA", false, at(7));
        let used = code_with("CCCCCC", true, at(10));
        let newest_unused = code_with("BBBBBB", false, at(9));

        let forward = vec![oldest.clone(), used.clone(), newest_unused.clone()];
        let backward = vec![newest_unused.clone(), used, oldest];

        assert_eq!(select_active(&forward).unwrap().id, newest_unused.id);
        assert_eq!(select_active(&backward).unwrap().id, newest_unused.id);
    }

    #[test]
    fn fully_used_day_has_no_active_code() {
        let codes = vec![code_with("AAAAAA", true, at(8))];
        assert!(select_active(&codes).is_none());
    }
}
