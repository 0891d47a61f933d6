//! Right and debt classification.
//!
//! Call-supplied rules named `rightType.<Token>` / `debtType.<Token>` are
//! tried first, in name order, then the built-in keyword tables.

use crate::envelope::Payload;
use crate::error::RoutineError;
use crate::pattern::Pattern;
use crate::routine::RoutineContext;
use crate::vocabulary::{DebtType, RightType, RightsClassification};

use super::patterns::{DEBT_TYPE_RULES, RIGHT_TYPE_RULES};
use super::text::clean_text;

const SPECIAL_RESERVATION_TOKEN: &str = "SpecialReservationNote";

fn reservation_index(pattern: &Pattern, text: &str) -> Option<usize> {
    pattern.captures(text).first()?.parse().ok()
}

pub fn classify_right(ctx: &RoutineContext, text: &str) -> Result<RightsClassification, RoutineError> {
    for (token, pattern) in ctx.patterns().with_prefix("rightType.") {
        if !pattern.regex().is_match(text) {
            continue;
        }
        if token == SPECIAL_RESERVATION_TOKEN {
            if let Some(index) = reservation_index(pattern, text) {
                return Ok(RightsClassification::SpecialReservationNote { index });
            }
            continue;
        }
        return Ok(RightsClassification::Right(token.parse()?));
    }

    if let Some(index) = reservation_index(ctx.pattern("specialReservation")?, text) {
        return Ok(RightsClassification::SpecialReservationNote { index });
    }

    let right = RIGHT_TYPE_RULES
        .iter()
        .find(|(_, rule)| rule.is_match(text))
        .map_or(RightType::SonstigeRechte, |(right, _)| *right);
    Ok(right.into())
}

pub fn classify_debt(ctx: &RoutineContext, text: &str) -> Result<DebtType, RoutineError> {
    for (token, pattern) in ctx.patterns().with_prefix("debtType.") {
        if pattern.regex().is_match(text) {
            return Ok(token.parse()?);
        }
    }

    Ok(DEBT_TYPE_RULES
        .iter()
        .find(|(_, rule)| rule.is_match(text))
        .map_or(DebtType::NichtDefiniert, |(debt, _)| *debt))
}

pub fn right_type_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);
    Ok(Payload::RightsClassification(classify_right(ctx, &text)?))
}

pub fn debt_type_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);
    Ok(Payload::DebtClassification(classify_debt(ctx, &text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocabularyError;
    use crate::models::ScriptConfig;
    use crate::routine::{RoutineArgs, RoutineRegistry};
    use std::collections::BTreeMap;

    fn context(re: &[(&str, &str)]) -> RoutineContext {
        let registry = RoutineRegistry::with_builtins(ScriptConfig::default());
        let args = RoutineArgs {
            re: re.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<BTreeMap<_, _>>(),
            ..Default::default()
        };
        registry.context(args).unwrap()
    }

    fn right(text: &str) -> RightsClassification {
        classify_right(&context(&[]), text).unwrap()
    }

    fn debt(text: &str) -> DebtType {
        classify_debt(&context(&[]), text).unwrap()
    }

    #[test]
    fn test_builtin_rights() {
        assert_eq!(right("Beschränkte persönliche Dienstbarkeit (Wohnrecht) für Anna Schmidt"), RightType::Wohnrecht.into());
        assert_eq!(right("Rückauflassungsvormerkung für die Stadt"), RightType::Rueckauflassungsvormerkung.into());
        assert_eq!(right("Auflassungsvormerkung für Max Muster"), RightType::Auflassungsvormerkung.into());
        assert_eq!(right("Mitbenutzungsrecht an der Hoffläche"), RightType::Mitbenutzungsrecht.into());
        assert_eq!(right("Grunddienstbarkeit (Geh- und Fahrrecht)"), RightType::GehWegeFahrOderLeitungsrecht.into());
        assert_eq!(right("Bewässerungsrecht"), RightType::Bewaesserungsrecht.into());
        assert_eq!(right("Irgendein Vermerk"), RightType::SonstigeRechte.into());
    }

    #[test]
    fn test_special_reservation_carries_index() {
        let classification = right(
            "Vormerkung zur Sicherung des Anspruchs auf Löschung des Rechts Abt. II Nr. 3 für die Gemeinde",
        );
        assert_eq!(classification, RightsClassification::SpecialReservationNote { index: 3 });
        assert_eq!(classification.cross_reference(), Some(3));
    }

    #[test]
    fn test_call_rules_come_first() {
        let ctx = context(&[("rightType.Schachtrecht", "Wohnrecht")]);
        assert_eq!(classify_right(&ctx, "Wohnrecht").unwrap(), RightType::Schachtrecht.into());

        let ctx = context(&[("rightType.SpecialReservationNote", r"Verweis auf (\d+)")]);
        assert_eq!(
            classify_right(&ctx, "Verweis auf 7").unwrap(),
            RightsClassification::SpecialReservationNote { index: 7 }
        );
    }

    #[test]
    fn test_call_rule_with_unknown_token_fails() {
        let ctx = context(&[("rightType.Seilbahnrecht", "Seilbahn")]);
        let err = classify_right(&ctx, "Seilbahn").unwrap_err();
        assert!(matches!(
            err,
            RoutineError::Vocabulary(VocabularyError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_builtin_debts() {
        assert_eq!(debt("Grundschuld zu 10.000,00 €"), DebtType::Grundschuld);
        assert_eq!(debt("Sicherungshypothek gemäß § 128 ZVG"), DebtType::SicherungshypothekGem128ZVG);
        assert_eq!(debt("Höchstbetragshypothek zu 50.000 DM"), DebtType::Hoechstbetragshypothek);
        assert_eq!(debt("Widerspruch gegen die Eintragung der Grundschuld"), DebtType::Widerspruch);
        assert_eq!(debt("Pfandrecht"), DebtType::NichtDefiniert);

        let ctx = context(&[("debtType.Rentenschuld", "Ablösesumme")]);
        assert_eq!(classify_debt(&ctx, "Ablösesumme 500 DM").unwrap(), DebtType::Rentenschuld);
    }
}
