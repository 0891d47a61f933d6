//! Default named patterns and fixed text patterns for the built-in routines.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::vocabulary::{DebtType, RightType};

/// Name and source of every overridable pattern the built-ins use.
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    // Column 1: "1, 2 tlw., 4-6"
    ("partial", r"(?i)\b(?:tlw\.?|teilw\.?|teilweise|Teil\s+v(?:on|\.)|Teilfläche)"),
    ("serialRange", r"(\d+)\s*(?:-|–|bis)\s*(\d+)"),
    ("serial", r"\d+"),
    ("serialHeading", r"lfd\.\s*Nr\.\s*(\d+)"),
    // "Gemarkung Rosenthal, Flur 6, Flst. 275/4 (120 m²)"
    (
        "parcel",
        r"(?:Gemarkung\s+([^,]+?)\s*,\s*)?Flur\s+(\d+)\s*,?\s*(?:Flurstücke?|Flurst\.|Flst\.)\s*(\d+(?:/\d+)?)(?:\s*\((\d+)\s*(?:m²|qm)\))?",
    ),
    // "1.500,00 DM", "3.000,-- Goldmark"
    (
        "amount",
        r"(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d+|-{1,2}))?\s*(€|EUR\b|Euro\b|DM\b|Deutsche Mark\b|Goldmark\b|Rentenmark\b|Reichsmark\b|RM\b|Gr\.\s*Feingold\b|Mark\b|M\b)?",
    ),
    (
        "holder",
        r"(?:für|zugunsten(?:\s+von)?|zu\s+Gunsten(?:\s+von)?)\s+([^;]+?)\s*(?:;|[,.]?\s+(?i:gemäß|unter\s+Bezugnahme|eingetragen|im\s+Rang|mit\s+Rang)\b|\.?$)",
    ),
    (
        "rank",
        r"(?i)\b(?:Rang\s+(?:vor|nach)|im\s+Rang|mit\s+Rang|Gleichrang|gleichrangig|Rangvorbehalt)",
    ),
    ("registeredOn", r"ingetragen(?:\s+.*?)?\s+am\s+(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})"),
    ("transferredOn", r"hierher\s+übertragen\s+am\s+(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})"),
    (
        "specialReservation",
        r"(?i)Vormerkung\s+zur\s+Sicherung.*?Abt(?:eilung|\.)?\s*II\s*(?:lfd\.\s*)?Nr\.\s*(\d+)",
    ),
];

/// Owned copy of [`DEFAULT_PATTERNS`].
pub fn default_patterns() -> BTreeMap<String, String> {
    DEFAULT_PATTERNS
        .iter()
        .map(|(name, source)| (name.to_string(), source.to_string()))
        .collect()
}

fn rule(source: &str) -> Regex {
    Regex::new(&format!("(?i){}", source)).unwrap()
}

lazy_static! {
    // Text cleanup
    pub static ref HYPHEN_BREAK: Regex = Regex::new(r"(\p{L})-[ \t]*\r?\n\s*(\p{Ll})").unwrap();
    pub static ref LAYOUT_WHITESPACE: Regex = Regex::new(r"[\r\n\t\u{00a0}]+").unwrap();
    pub static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(r"\s+([.,;:!?)])").unwrap();
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();

    // Column 1 token separators: ",", ";", "&", "und", "u."
    pub static ref TOKEN_SEPARATOR: Regex = Regex::new(r"\s*(?:[,;&]|\bund\b|\bu\.)\s*").unwrap();

    pub static ref MONTH: Regex = Regex::new(
        r"^(?:Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\b"
    ).unwrap();

    /// Rights keyword table, most specific first.
    pub static ref RIGHT_TYPE_RULES: Vec<(RightType, Regex)> = vec![
        (RightType::Widerspruch, rule(r"^\s*widerspruch")),
        (RightType::Rueckauflassungsvormerkung, rule(r"r(?:ü|ue)ckauflassung")),
        (RightType::Ruckerwerbsvormerkung, rule(r"r(?:ü|ue|u)ckerwerb")),
        (RightType::Auflassungsvormerkung, rule(r"auflassung|eigentums(?:ü|ue)bertragung|eigentumsverschaffung")),
        (RightType::Erwerbsvormerkung, rule(r"erwerbsvormerkung")),
        (RightType::Untererbbaurecht, rule(r"untererbbaurecht")),
        (RightType::Erbbaurecht, rule(r"\berbbaurecht")),
        (RightType::WohnungsrechtNach1093Bgb, rule(r"wohnungsrecht.*1093")),
        (RightType::Wohnungsbelegungsrecht, rule(r"belegungsrecht")),
        (RightType::WohnungsOderMitbenutzungsrecht, rule(r"wohnungs-?\s*(?:oder|und)\s*mitbenutzungsrecht")),
        (RightType::Wohnrecht, rule(r"\bwohnrecht|\bwohnungsrecht")),
        (RightType::Niessbrauchrecht, rule(r"nie(?:ß|ss)brauch")),
        (RightType::LeibgedingAltenteilsrechtAuszugsrecht, rule(r"leibgeding|altenteil|auszugsrecht")),
        (RightType::Vorkaufsrecht, rule(r"vorkaufsrecht")),
        (RightType::Reallast, rule(r"reallast")),
        (RightType::Zwangsversteigerungsvermerk, rule(r"zwangsversteigerung")),
        (RightType::Zwangsverwaltungsvermerk, rule(r"zwangsverwaltung")),
        (RightType::Insolvenzvermerk, rule(r"insolvenz")),
        (RightType::Sanierungsvermerk, rule(r"sanierung")),
        (RightType::Umlegungsvermerk, rule(r"umlegung")),
        (RightType::Nacherbenvermerk, rule(r"nacherb")),
        (RightType::Testamentsvollstreckervermerk, rule(r"testamentsvollstreck")),
        (RightType::VerausserungsBelastungsverbot, rule(r"ver(?:ä|ae|a)u(?:ß|ss)erungs.*verbot|belastungsverbot")),
        (RightType::Verfuegungsverbot, rule(r"verf(?:ü|ue)gungs(?:verbot|beschr)")),
        (RightType::Zustimmungsvorbehalt, rule(r"zustimmungsvorbehalt")),
        (RightType::Pfandung, rule(r"pf(?:ä|a)ndung")),
        (RightType::Denkmalschutz, rule(r"denkmal")),
        (RightType::AusschlussDerAufhebungDerGemeinschaftGem1010BGB, rule(r"ausschlu(?:ss|ß).*aufhebung.*gemeinschaft")),
        (RightType::VerwaltungsUndBenutzungsregelung, rule(r"verwaltungs-?\s*und\s*benutzungsregelung")),
        (RightType::BenutzungsregelungGem1010BGB, rule(r"benutzungsregelung")),
        (RightType::VerwaltungsregelungGem1010Bgb, rule(r"verwaltungsregelung")),
        (RightType::RegelungUeberDieHoeheDerNotwegrenteGemaess912Bgb, rule(r"h(?:ö|oe)he\s+der\s+notwege?rente")),
        (RightType::RegelungUeberDieHoeheDerUeberbaurenteGemaess912Bgb, rule(r"h(?:ö|oe)he\s+der\s+(?:ü|ue)berbaurente")),
        (RightType::VerzichtAufNotwegerente, rule(r"verzicht.*notwege?rente")),
        (RightType::VerzichtAufUeberbaurente, rule(r"verzicht.*(?:ü|ue)berbaurente")),
        (RightType::Ueberbaurecht, rule(r"(?:ü|ue)berbau")),
        (RightType::Grenzbebauungsrecht, rule(r"grenzbebauung")),
        (RightType::UebernahmeVonAbstandsflachen, rule(r"abstandsfl")),
        (RightType::Bebauungsverbot, rule(r"bebauungsverbot")),
        (RightType::Baubeschraenkung, rule(r"baubeschr")),
        (RightType::Bepflanzungsverbot, rule(r"bepflanzungsverbot")),
        (RightType::Bergschadenverzicht, rule(r"bergschaden")),
        (RightType::Fensterverbot, rule(r"fensterverbot")),
        (RightType::Fensterrecht, rule(r"fensterrecht")),
        (RightType::Zaunerrichtungsverbot, rule(r"zaunerrichtungsverbot")),
        (RightType::Zaunrecht, rule(r"zaunrecht")),
        (RightType::Mauerrecht, rule(r"mauerrecht")),
        (RightType::Gewerbebetriebsbeschrankung, rule(r"gewerbebetriebsbeschr")),
        (RightType::Nutzungsbeschrankung, rule(r"nutzungsbeschr")),
        (RightType::GewerblichesBenutzungsrecht, rule(r"gewerbliche[sn]?\s+benutzungsrecht")),
        (RightType::Gartenbenutzungsrecht, rule(r"gartenbenutzung")),
        (RightType::Mitbenutzungsrecht, rule(r"mitbenutzungsrecht")),
        (RightType::DinglichesNutzungsrecht, rule(r"dingliche[sn]?\s+nutzungsrecht")),
        (RightType::BesitzrechtNachEGBGB, rule(r"besitzrecht")),
        (RightType::Benutzungsrecht, rule(r"\bbenutzungsrecht")),
        (RightType::Hochspannungsleitungsrecht, rule(r"hochspannung")),
        (RightType::GasleitungGasreglerstationFerngasltg, rule(r"gasleitung|gasregler|ferngas")),
        (RightType::Abwasserleitungsrecht, rule(r"abwasser")),
        (RightType::Entwasserungsrecht, rule(r"entw(?:ä|a)sserung")),
        (RightType::Bewaesserungsrecht, rule(r"bew(?:ä|ae)sserung")),
        (RightType::Wasserentnahmerecht, rule(r"wasserentnahme")),
        (RightType::Wasseraufnahmeverpflichtung, rule(r"wasseraufnahme")),
        (RightType::Brunnenrecht, rule(r"brunnen")),
        (RightType::Pumpenrecht, rule(r"pumpe")),
        (RightType::Kanalrecht, rule(r"kanal")),
        (RightType::Kabelrecht, rule(r"kabel")),
        (RightType::Transformatorenrecht, rule(r"transformator")),
        (RightType::Umspannanlagenrecht, rule(r"umspann")),
        (RightType::Mobilfunkstationsrecht, rule(r"mobilfunk")),
        (RightType::Windkraftanlagenrecht, rule(r"windkraft|windenergie")),
        (RightType::Photovoltaikanlagenrecht, rule(r"photovoltaik|solaranlage")),
        (RightType::DuldungVonFernmeldeanlagen, rule(r"fernmelde|telekommunikation")),
        (RightType::Durchleitungsrecht, rule(r"durchleitung")),
        (RightType::LeitungsOderAnlagenrecht, rule(r"leitungs-?\s*oder\s*anlagenrecht|\banlagenrecht")),
        (RightType::GehWegeFahrOderLeitungsrecht, rule(r"\bgeh-|\bgehrecht|\bwegerecht|\bfahrrecht|\bleitungsrecht|(?:ü|ue)berfahrt")),
        (RightType::Schachtrecht, rule(r"schacht")),
        (RightType::BohrUndSchuerfrecht, rule(r"\bbohr|sch(?:ü|ue)rf")),
        (RightType::Kiesabbauberechtigung, rule(r"kiesabbau|kiesausbeute")),
        (RightType::Ausbeutungsrecht, rule(r"ausbeutung")),
        (RightType::Fischereirecht, rule(r"fischerei")),
        (RightType::Weiderecht, rule(r"weiderecht")),
        (RightType::Viehtreibrecht, rule(r"viehtrieb|viehtreib")),
        (RightType::Viehtrankerecht, rule(r"viehtr(?:ä|a)nke")),
        (RightType::Muehlenrecht, rule(r"m(?:ü|ue)hle")),
        (RightType::Tankstellenrecht, rule(r"tankstelle")),
        (RightType::Garagenrecht, rule(r"garage")),
        (RightType::Mulltonnenabstellrecht, rule(r"m(?:ü|u)lltonne")),
        (RightType::Kraftfahrzeugabstellrecht, rule(r"stellplatz|kraftfahrzeug|abstellrecht")),
        (RightType::Betretungsrecht, rule(r"betretung")),
        (RightType::EinsitzInsitzrecht, rule(r"einsitz|insitz")),
        (RightType::DuldungVonEinwirkungenDurchBaumwurf, rule(r"baumwurf")),
        (RightType::Immissionsduldungsverpflichtung, rule(r"immission")),
        (RightType::Widerspruch, rule(r"\bwiderspruch")),
        (RightType::BpD, rule(r"beschr(?:ä|ae)nkte\s+pers(?:ö|oe)nliche\s+dienstbarkeit|\bbpd\b")),
        (RightType::Grunddienstbarkeit, rule(r"grunddienstbarkeit")),
    ];

    /// Debt keyword table, most specific first.
    pub static ref DEBT_TYPE_RULES: Vec<(DebtType, Regex)> = vec![
        (DebtType::Widerspruch, rule(r"^\s*widerspruch")),
        (DebtType::SicherungshypothekGem128ZVG, rule(r"§\s*128\s*zvg")),
        (DebtType::Zwangssicherungshypothek, rule(r"zwangssicherungshypothek")),
        (DebtType::Arresthypothek, rule(r"arresthypothek")),
        (DebtType::Hoechstbetragshypothek, rule(r"h(?:ö|oe)chstbetrags")),
        (DebtType::Aufbauhypothek, rule(r"aufbauhypothek")),
        (DebtType::Sicherungshypothek, rule(r"sicherungshypothek")),
        (DebtType::Sicherungsgrundschuld, rule(r"sicherungsgrundschuld")),
        (DebtType::Rentenschuld, rule(r"rentenschuld")),
        (DebtType::Grundschuld, rule(r"grundschuld")),
        (DebtType::Hypothek, rule(r"hypothek")),
        (DebtType::Widerspruch, rule(r"\bwiderspruch")),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Patterns;

    #[test]
    fn test_default_patterns_compile() {
        let patterns = Patterns::compile(&default_patterns(), &BTreeMap::new()).unwrap();
        assert_eq!(patterns.len(), DEFAULT_PATTERNS.len());
    }

    #[test]
    fn test_rule_tables_build() {
        assert!(RIGHT_TYPE_RULES.len() > 90);
        assert_eq!(DEBT_TYPE_RULES.len(), 12);
    }

    #[test]
    fn test_month_anchor() {
        assert!(MONTH.is_match("Januar 1990"));
        assert!(!MONTH.is_match("im Januar"));
    }
}
