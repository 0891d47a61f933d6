//! Closed token sets used in land-register classifications.
//!
//! Every set is a plain enum whose wire form is a fixed string token. Tokens
//! outside a set are rejected with [`VocabularyError::UnknownToken`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

/// Declares a closed vocabulary: enum, token/label tables, `FromStr` and `Display`.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $( $variant:ident => $token:literal, $label:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )*
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Wire token.
            pub fn token(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)*
                }
            }

            /// Human-readable label as printed in the register.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }
        }

        impl FromStr for $name {
            type Err = VocabularyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)*
                    other => Err(VocabularyError::UnknownToken {
                        vocabulary: $kind,
                        token: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

vocabulary! {
    /// Kind of a right registered in section II of the land register.
    pub enum RightType as "right type" {
        Abwasserleitungsrecht => "Abwasserleitungsrecht", "Abwasserleitungsrecht";
        Auflassungsvormerkung => "Auflassungsvormerkung", "Auflassungsvormerkung";
        Ausbeutungsrecht => "Ausbeutungsrecht", "Ausbeutungsrecht";
        AusschlussDerAufhebungDerGemeinschaftGem1010BGB => "AusschlussDerAufhebungDerGemeinschaftGem1010BGB", "Ausschluss der Aufhebung der Gemeinschaft gem. § 1010 BGB";
        Baubeschraenkung => "Baubeschraenkung", "Baubeschränkung";
        Bebauungsverbot => "Bebauungsverbot", "Bebauungsverbot";
        Benutzungsrecht => "Benutzungsrecht", "Benutzungsrecht";
        BenutzungsregelungGem1010BGB => "BenutzungsregelungGem1010BGB", "Benutzungsregelung gem. § 1010 BGB";
        Bepflanzungsverbot => "Bepflanzungsverbot", "Bepflanzungsverbot";
        Bergschadenverzicht => "Bergschadenverzicht", "Bergschadenverzicht";
        Betretungsrecht => "Betretungsrecht", "Betretungsrecht";
        Bewaesserungsrecht => "Bewässerungsrecht", "Bewässerungsrecht";
        BpD => "BpD", "beschränkte persönliche Dienstbarkeit";
        BesitzrechtNachEGBGB => "BesitzrechtNachEGBGB", "Besitzrecht nach EGBGB";
        BohrUndSchuerfrecht => "BohrUndSchuerfrecht", "Bohr- und Schürfrecht";
        Brunnenrecht => "Brunnenrecht", "Brunnenrecht";
        Denkmalschutz => "Denkmalschutz", "Denkmalschutz";
        DinglichesNutzungsrecht => "DinglichesNutzungsrecht", "dingliches Nutzungsrecht";
        DuldungVonEinwirkungenDurchBaumwurf => "DuldungVonEinwirkungenDurchBaumwurf", "Duldung von Einwirkungen durch Baumwurf";
        DuldungVonFernmeldeanlagen => "DuldungVonFernmeldeanlagen", "Duldung von Fernmeldeanlagen";
        Durchleitungsrecht => "Durchleitungsrecht", "Durchleitungsrecht";
        EinsitzInsitzrecht => "EinsitzInsitzrecht", "Einsitz-/Insitzrecht";
        Entwasserungsrecht => "Entwasserungsrecht", "Entwässerungsrecht";
        Erbbaurecht => "Erbbaurecht", "Erbbaurecht";
        Erwerbsvormerkung => "Erwerbsvormerkung", "Erwerbsvormerkung";
        Fensterrecht => "Fensterrecht", "Fensterrecht";
        Fensterverbot => "Fensterverbot", "Fensterverbot";
        Fischereirecht => "Fischereirecht", "Fischereirecht";
        Garagenrecht => "Garagenrecht", "Garagenrecht";
        Gartenbenutzungsrecht => "Gartenbenutzungsrecht", "Gartenbenutzungsrecht";
        GasleitungGasreglerstationFerngasltg => "GasleitungGasreglerstationFerngasltg", "Gasleitung, Gasreglerstation, Ferngasltg.";
        GehWegeFahrOderLeitungsrecht => "GehWegeFahrOderLeitungsrecht", "Geh-, Wege-, Fahr- oder Leitungsrecht";
        Gewerbebetriebsbeschrankung => "Gewerbebetriebsbeschrankung", "Gewerbebetriebsbeschränkung";
        GewerblichesBenutzungsrecht => "GewerblichesBenutzungsrecht", "gewerbliches Benutzungsrecht";
        Grenzbebauungsrecht => "Grenzbebauungsrecht", "Grenzbebauungsrecht";
        Grunddienstbarkeit => "Grunddienstbarkeit", "Grunddienstbarkeit";
        Hochspannungsleitungsrecht => "Hochspannungsleitungsrecht", "Hochspannungsleitungsrecht";
        Immissionsduldungsverpflichtung => "Immissionsduldungsverpflichtung", "Immissionsduldungsverpflichtung";
        Insolvenzvermerk => "Insolvenzvermerk", "Insolvenzvermerk";
        Kabelrecht => "Kabelrecht", "Kabelrecht";
        Kanalrecht => "Kanalrecht", "Kanalrecht";
        Kiesabbauberechtigung => "Kiesabbauberechtigung", "Kiesabbauberechtigung";
        Kraftfahrzeugabstellrecht => "Kraftfahrzeugabstellrecht", "Kraftfahrzeugabstellrecht";
        LeibgedingAltenteilsrechtAuszugsrecht => "LeibgedingAltenteilsrechtAuszugsrecht", "Leibgeding, Altenteilsrecht, Auszugsrecht";
        LeitungsOderAnlagenrecht => "LeitungsOderAnlagenrecht", "Leitungs- oder Anlagenrecht";
        Mauerrecht => "Mauerrecht", "Mauerrecht";
        Mitbenutzungsrecht => "Mitbenutzungsrecht", "Mitbenutzungsrecht";
        Mobilfunkstationsrecht => "Mobilfunkstationsrecht", "Mobilfunkstationsrecht";
        Muehlenrecht => "Muehlenrecht", "Mühlenrecht";
        Mulltonnenabstellrecht => "Mulltonnenabstellrecht", "Mülltonnenabstellrecht";
        Nacherbenvermerk => "Nacherbenvermerk", "Nacherbenvermerk";
        Niessbrauchrecht => "Niessbrauchrecht", "Nießbrauchrecht";
        Nutzungsbeschrankung => "Nutzungsbeschrankung", "Nutzungsbeschränkung";
        Pfandung => "Pfandung", "Pfändung";
        Photovoltaikanlagenrecht => "Photovoltaikanlagenrecht", "Photovoltaikanlagenrecht";
        Pumpenrecht => "Pumpenrecht", "Pumpenrecht";
        Reallast => "Reallast", "Reallast";
        RegelungUeberDieHoeheDerNotwegrenteGemaess912Bgb => "RegelungUeberDieHöheDerNotwegrenteGemaess912Bgb", "Regelung über die Höhe der Notwegrente gemäß § 912 BGB";
        RegelungUeberDieHoeheDerUeberbaurenteGemaess912Bgb => "RegelungUeberDieHöheDerUeberbaurenteGemaess912Bgb", "Regelung über die Höhe der Überbaurente gemäß § 912 BGB";
        Rueckauflassungsvormerkung => "Rueckauflassungsvormerkung", "Rückauflassungsvormerkung";
        Ruckerwerbsvormerkung => "Ruckerwerbsvormerkung", "Rückerwerbsvormerkung";
        Sanierungsvermerk => "Sanierungsvermerk", "Sanierungsvermerk";
        Schachtrecht => "Schachtrecht", "Schachtrecht";
        SonstigeDabagrechteart => "SonstigeDabagrechteart", "sonstige dabag-Rechteart";
        SonstigeRechte => "SonstigeRechte", "Sonstige Rechte";
        Tankstellenrecht => "Tankstellenrecht", "Tankstellenrecht";
        Testamentsvollstreckervermerk => "Testamentsvollstreckervermerk", "Testamentsvollstreckervermerk";
        Transformatorenrecht => "Transformatorenrecht", "Transformatorenrecht";
        Ueberbaurecht => "Ueberbaurecht", "Überbaurecht";
        UebernahmeVonAbstandsflachen => "UebernahmeVonAbstandsflachen", "Übernahme von Abstandsflächen";
        Umlegungsvermerk => "Umlegungsvermerk", "Umlegungsvermerk";
        Umspannanlagenrecht => "Umspannanlagenrecht", "Umspannanlagenrecht";
        Untererbbaurecht => "Untererbbaurecht", "Untererbbaurecht";
        VerausserungsBelastungsverbot => "VerausserungsBelastungsverbot", "Veräußerungs-/Belastungsverbot";
        Verfuegungsverbot => "Verfuegungsverbot", "Verfügungsverbot";
        VerwaltungsUndBenutzungsregelung => "VerwaltungsUndBenutzungsregelung", "Verwaltungs- und Benutzungsregelung";
        VerwaltungsregelungGem1010Bgb => "VerwaltungsregelungGem1010Bgb", "Verwaltungsregelung gem. § 1010 BGB";
        VerzichtAufNotwegerente => "VerzichtAufNotwegerente", "Verzicht auf Notwegrente";
        VerzichtAufUeberbaurente => "VerzichtAufUeberbaurente", "Verzicht auf Überbaurente";
        Viehtrankerecht => "Viehtrankerecht", "Viehtränkerecht";
        Viehtreibrecht => "Viehtreibrecht", "Viehtreibrecht";
        Vorkaufsrecht => "Vorkaufsrecht", "Vorkaufsrecht";
        Wasseraufnahmeverpflichtung => "Wasseraufnahmeverpflichtung", "Wasseraufnahmeverpflichtung";
        Wasserentnahmerecht => "Wasserentnahmerecht", "Wasserentnahmerecht";
        Weiderecht => "Weiderecht", "Weiderecht";
        Widerspruch => "Widerspruch", "Widerspruch";
        Windkraftanlagenrecht => "Windkraftanlagenrecht", "Windkraftanlagenrecht";
        Wohnrecht => "Wohnrecht", "Wohnrecht";
        WohnungsOderMitbenutzungsrecht => "WohnungsOderMitbenutzungsrecht", "Wohnungs- oder Mitbenutzungsrecht";
        Wohnungsbelegungsrecht => "Wohnungsbelegungsrecht", "Wohnungsbelegungsrecht";
        WohnungsrechtNach1093Bgb => "WohnungsrechtNach1093Bgb", "Wohnungsrecht nach § 1093 BGB";
        Zaunerrichtungsverbot => "Zaunerrichtungsverbot", "Zaunerrichtungsverbot";
        Zaunrecht => "Zaunrecht", "Zaunrecht";
        Zustimmungsvorbehalt => "Zustimmungsvorbehalt", "Zustimmungsvorbehalt";
        Zwangsversteigerungsvermerk => "Zwangsversteigerungsvermerk", "Zwangsversteigerungsvermerk";
        Zwangsverwaltungsvermerk => "Zwangsverwaltungsvermerk", "Zwangsverwaltungsvermerk";
    }
}

impl RightType {
    /// Whether the short text of this right names a beneficiary.
    pub fn requires_holder(&self) -> bool {
        !matches!(
            self,
            RightType::VerausserungsBelastungsverbot | RightType::Auflassungsvormerkung
        )
    }
}

vocabulary! {
    /// Kind of a charge registered in section III of the land register.
    pub enum DebtType as "debt type" {
        Grundschuld => "Grundschuld", "Grundschuld";
        Hypothek => "Hypothek", "Hypothek";
        Rentenschuld => "Rentenschuld", "Rentenschuld";
        Aufbauhypothek => "Aufbauhypothek", "Aufbauhypothek";
        Sicherungshypothek => "Sicherungshypothek", "Sicherungshypothek";
        Widerspruch => "Widerspruch", "Widerspruch";
        Arresthypothek => "Arresthypothek", "Arresthypothek";
        SicherungshypothekGem128ZVG => "SicherungshypothekGem128ZVG", "Sicherungshypothek gemäß §128 ZVG";
        Hoechstbetragshypothek => "Hoechstbetragshypothek", "Höchstbetragshypothek";
        Sicherungsgrundschuld => "Sicherungsgrundschuld", "Sicherungsgrundschuld";
        Zwangssicherungshypothek => "Zwangssicherungshypothek", "Zwangssicherungshypothek";
        NichtDefiniert => "NichtDefiniert", "";
    }
}

vocabulary! {
    /// Currency of a registered amount.
    pub enum Currency as "currency" {
        Euro => "Euro", "€";
        DMark => "DMark", "DM";
        MarkDDR => "MarkDDR", "M";
        Goldmark => "Goldmark", "Goldmark";
        Rentenmark => "Rentenmark", "Rentenmark";
        Reichsmark => "Reichsmark", "Reichsmark";
        GrammFeingold => "GrammFeingold", "Gr. Feingold";
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Euro
    }
}

impl Currency {
    /// Resolve a currency as it is written next to an amount ("DM", "€", "RM").
    pub fn from_symbol(symbol: &str) -> Option<Currency> {
        let symbol = symbol.split_whitespace().collect::<Vec<_>>().join(" ");
        let currency = match symbol.trim_end_matches('.').to_lowercase().as_str() {
            "€" | "eur" | "euro" => Currency::Euro,
            "dm" | "d-mark" | "deutsche mark" => Currency::DMark,
            "m" | "mark" | "mdn" => Currency::MarkDDR,
            "goldmark" | "gm" => Currency::Goldmark,
            "rentenmark" | "rentm" => Currency::Rentenmark,
            "reichsmark" | "rm" => Currency::Reichsmark,
            "gr. feingold" | "gr.feingold" | "gr feingold" | "g feingold" | "gramm feingold" => {
                Currency::GrammFeingold
            }
            _ => return None,
        };
        Some(currency)
    }
}

/// Classification of a section II right.
///
/// A reservation note securing a claim on another entry ("Vormerkung zur
/// Sicherung des Anspruchs ... Abt. II Nr. 3") carries the index of that
/// entry. Plain rights serialize as their bare token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RightsClassification {
    SpecialReservationNote { index: usize },
    #[serde(untagged)]
    Right(RightType),
}

impl RightsClassification {
    pub fn requires_holder(&self) -> bool {
        match self {
            RightsClassification::SpecialReservationNote { .. } => true,
            RightsClassification::Right(right) => right.requires_holder(),
        }
    }

    /// Index of the referenced entry, for reservation notes.
    pub fn cross_reference(&self) -> Option<usize> {
        match self {
            RightsClassification::SpecialReservationNote { index } => Some(*index),
            RightsClassification::Right(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RightsClassification::SpecialReservationNote { .. } => "Vormerkung zur Sicherung",
            RightsClassification::Right(right) => right.label(),
        }
    }
}

impl From<RightType> for RightsClassification {
    fn from(right: RightType) -> Self {
        RightsClassification::Right(right)
    }
}

impl fmt::Display for RightsClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_for_every_member() {
        for right in RightType::ALL {
            assert_eq!(right.token().parse::<RightType>().unwrap(), *right);
        }
        for debt in DebtType::ALL {
            assert_eq!(debt.token().parse::<DebtType>().unwrap(), *debt);
        }
        for currency in Currency::ALL {
            assert_eq!(currency.token().parse::<Currency>().unwrap(), *currency);
        }
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = "Seilbahnrecht".parse::<RightType>().unwrap_err();
        assert_eq!(
            err,
            VocabularyError::UnknownToken {
                vocabulary: "right type",
                token: "Seilbahnrecht".to_string(),
            }
        );
    }

    #[test]
    fn test_non_ascii_token() {
        assert_eq!(
            serde_json::to_string(&RightType::Bewaesserungsrecht).unwrap(),
            "\"Bewässerungsrecht\""
        );
        assert_eq!(
            "Bewässerungsrecht".parse::<RightType>().unwrap(),
            RightType::Bewaesserungsrecht
        );
    }

    #[test]
    fn test_requires_holder() {
        assert!(!RightType::Auflassungsvormerkung.requires_holder());
        assert!(!RightType::VerausserungsBelastungsverbot.requires_holder());
        assert!(RightType::Wohnrecht.requires_holder());
        assert!(RightsClassification::SpecialReservationNote { index: 2 }.requires_holder());
    }

    #[test]
    fn test_rights_classification_wire_form() {
        let plain = RightsClassification::Right(RightType::Wohnrecht);
        assert_eq!(serde_json::to_string(&plain).unwrap(), "\"Wohnrecht\"");

        let special = RightsClassification::SpecialReservationNote { index: 3 };
        assert_eq!(
            serde_json::to_string(&special).unwrap(),
            r#"{"SpecialReservationNote":{"index":3}}"#
        );

        let parsed: RightsClassification =
            serde_json::from_str(r#"{"SpecialReservationNote":{"index":3}}"#).unwrap();
        assert_eq!(parsed.cross_reference(), Some(3));

        let parsed: RightsClassification = serde_json::from_str("\"Reallast\"").unwrap();
        assert_eq!(parsed, RightsClassification::Right(RightType::Reallast));
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::from_symbol("DM"), Some(Currency::DMark));
        assert_eq!(Currency::from_symbol("€"), Some(Currency::Euro));
        assert_eq!(Currency::from_symbol("Gr. Feingold"), Some(Currency::GrammFeingold));
        assert_eq!(Currency::from_symbol("Taler"), None);
        assert_eq!(Currency::default(), Currency::Euro);
        assert_eq!(Currency::DMark.to_string(), "DM");
    }

    #[test]
    fn test_undefined_debt_type_has_empty_label() {
        assert_eq!(DebtType::NichtDefiniert.label(), "");
        assert_eq!(DebtType::SicherungshypothekGem128ZVG.label(), "Sicherungshypothek gemäß §128 ZVG");
    }
}
