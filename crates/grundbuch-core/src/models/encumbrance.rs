//! Land-parcel encumbrance model.
//!
//! Column 1 of a section II/III entry lists the serial numbers ("lfd. Nr.")
//! of the inventory entries the charge rests on. Each serial becomes an
//! [`EncumbranceEntry`]; if the charge only rests on some parcels of that
//! serial, those parcels are appended as partial references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cadastral parcel, optionally narrowed to a district and a partial area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandParcelReference {
    /// Flur.
    pub district: String,
    /// Flurstück, e.g. `275/4`.
    pub parcel: String,
    /// Gemarkung.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadastral_area_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_area_sqm: Option<u64>,
}

impl LandParcelReference {
    pub fn new(district: impl Into<String>, parcel: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            parcel: parcel.into(),
            cadastral_area_name: None,
            partial_area_sqm: None,
        }
    }

    pub fn with_cadastral_area(mut self, name: impl Into<String>) -> Self {
        self.cadastral_area_name = Some(name.into());
        self
    }

    pub fn with_partial_area(mut self, sqm: u64) -> Self {
        self.partial_area_sqm = Some(sqm);
        self
    }
}

impl fmt::Display for LandParcelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.cadastral_area_name {
            write!(f, "Gemarkung {}, ", name)?;
        }
        write!(f, "Flur {} Flst. {}", self.district, self.parcel)?;
        if let Some(sqm) = self.partial_area_sqm {
            write!(f, " ({} m²)", sqm)?;
        }
        Ok(())
    }
}

/// One serial number of column 1 and the extent of the charge on it.
///
/// Starts out fully encumbering. Appending partial parcels, even an empty
/// batch, marks the entry as partial; nothing marks it full again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EntryRecord")]
pub struct EncumbranceEntry {
    serial_number: u32,
    fully_encumbers: bool,
    partial_parcels: Vec<LandParcelReference>,
}

impl EncumbranceEntry {
    pub fn new(serial_number: u32) -> Self {
        Self {
            serial_number,
            fully_encumbers: true,
            partial_parcels: Vec::new(),
        }
    }

    /// Restrict the entry to `parcels`.
    ///
    /// The call itself signals partial encumbrance, so `fully_encumbers`
    /// becomes false even when `parcels` is empty.
    pub fn append_partial_parcels<I>(&mut self, parcels: I)
    where
        I: IntoIterator<Item = LandParcelReference>,
    {
        self.partial_parcels.extend(parcels);
        self.fully_encumbers = false;
    }

    pub fn serial_number(&self) -> u32 {
        self.serial_number
    }

    pub fn fully_encumbers(&self) -> bool {
        self.fully_encumbers
    }

    pub fn partial_parcels(&self) -> &[LandParcelReference] {
        &self.partial_parcels
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryRecord {
    serial_number: u32,
    fully_encumbers: bool,
    #[serde(default)]
    partial_parcels: Vec<LandParcelReference>,
}

impl TryFrom<EntryRecord> for EncumbranceEntry {
    type Error = String;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        if record.fully_encumbers && !record.partial_parcels.is_empty() {
            return Err(format!(
                "entry {} is fully encumbering but lists {} partial parcel(s)",
                record.serial_number,
                record.partial_parcels.len()
            ));
        }
        Ok(Self {
            serial_number: record.serial_number,
            fully_encumbers: record.fully_encumbers,
            partial_parcels: record.partial_parcels,
        })
    }
}

/// Column 1 of one entry, in document order, with recoverable anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncumbranceCollection {
    #[serde(default)]
    entries: Vec<EncumbranceEntry>,
    #[serde(default)]
    warnings: Vec<String>,
}

impl EncumbranceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicate or out-of-order serial numbers are kept as given.
    pub fn append(&mut self, entry: EncumbranceEntry) {
        self.entries.push(entry);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn entries(&self) -> &[EncumbranceEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn get(&self, index: usize) -> Option<&EncumbranceEntry> {
        self.entries.get(index)
    }

    /// The last entry carrying `serial_number`.
    pub fn entry_mut(&mut self, serial_number: u32) -> Option<&mut EncumbranceEntry> {
        self.entries
            .iter_mut()
            .rev()
            .find(|e| e.serial_number == serial_number)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncumbranceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EncumbranceCollection {
    type Item = &'a EncumbranceEntry;
    type IntoIter = std::slice::Iter<'a, EncumbranceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_entry_fully_encumbers() {
        let entry = EncumbranceEntry::new(1);
        assert!(entry.fully_encumbers());
        assert!(entry.partial_parcels().is_empty());
    }

    #[test]
    fn test_append_marks_partial() {
        let mut entry = EncumbranceEntry::new(5);
        entry.append_partial_parcels([LandParcelReference::new("6", "275/4")]);
        assert!(!entry.fully_encumbers());
        assert_eq!(entry.partial_parcels(), &[LandParcelReference::new("6", "275/4")]);

        entry.append_partial_parcels([LandParcelReference::new("6", "276")]);
        assert!(!entry.fully_encumbers());
        assert_eq!(entry.partial_parcels().len(), 2);
    }

    #[test]
    fn test_empty_append_still_marks_partial() {
        let mut entry = EncumbranceEntry::new(2);
        entry.append_partial_parcels(Vec::new());
        assert!(!entry.fully_encumbers());
        assert!(entry.partial_parcels().is_empty());
    }

    #[test]
    fn test_collection_keeps_duplicates_and_order() {
        let mut collection = EncumbranceCollection::new();
        collection.append(EncumbranceEntry::new(3));
        collection.append(EncumbranceEntry::new(1));
        collection.append(EncumbranceEntry::new(3));
        collection.warn("unreadable token");

        let serials: Vec<u32> = collection.iter().map(|e| e.serial_number()).collect();
        assert_eq!(serials, vec![3, 1, 3]);
        assert_eq!(collection.warnings(), &["unreadable token".to_string()]);
    }

    #[test]
    fn test_entry_mut_targets_last_duplicate() {
        let mut collection = EncumbranceCollection::new();
        collection.append(EncumbranceEntry::new(3));
        collection.append(EncumbranceEntry::new(3));
        collection
            .entry_mut(3)
            .unwrap()
            .append_partial_parcels([LandParcelReference::new("1", "10")]);

        assert!(collection.get(0).unwrap().fully_encumbers());
        assert!(!collection.get(1).unwrap().fully_encumbers());
        assert!(collection.entry_mut(9).is_none());
    }

    #[test]
    fn test_wire_form() {
        let mut entry = EncumbranceEntry::new(5);
        entry.append_partial_parcels([LandParcelReference::new("6", "275/4")]);
        let mut collection = EncumbranceCollection::new();
        collection.append(entry);

        assert_eq!(
            serde_json::to_string(&collection).unwrap(),
            r#"{"entries":[{"serialNumber":5,"fullyEncumbers":false,"partialParcels":[{"district":"6","parcel":"275/4"}]}],"warnings":[]}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_full_entry_with_parcels() {
        let json = r#"{"serialNumber":1,"fullyEncumbers":true,"partialParcels":[{"district":"1","parcel":"2"}]}"#;
        assert!(serde_json::from_str::<EncumbranceEntry>(json).is_err());

        let json = r#"{"serialNumber":1,"fullyEncumbers":false,"partialParcels":[]}"#;
        let entry: EncumbranceEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.fully_encumbers());
    }

    #[test]
    fn test_parcel_display() {
        let parcel = LandParcelReference::new("6", "275/4").with_cadastral_area("Rosenthal");
        assert_eq!(parcel.to_string(), "Gemarkung Rosenthal, Flur 6 Flst. 275/4");

        let partial = LandParcelReference::new("2", "11").with_partial_area(120);
        assert_eq!(partial.to_string(), "Flur 2 Flst. 11 (120 m²)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn batches() -> impl Strategy<Value = Vec<Vec<(String, String)>>> {
        prop::collection::vec(
            prop::collection::vec(("[1-9][0-9]?", "[1-9][0-9]{0,2}(/[1-9])?"), 0..4),
            0..5,
        )
    }

    proptest! {
        /// Property: an entry is fully encumbering iff nothing was ever appended
        #[test]
        fn test_fully_encumbers_tracks_appends(serial in 1u32..1000, batches in batches()) {
            let mut entry = EncumbranceEntry::new(serial);
            let mut expected = Vec::new();

            for batch in &batches {
                let parcels: Vec<LandParcelReference> = batch
                    .iter()
                    .map(|(district, parcel)| LandParcelReference::new(district.as_str(), parcel.as_str()))
                    .collect();
                expected.extend(parcels.iter().cloned());
                entry.append_partial_parcels(parcels);
            }

            prop_assert_eq!(entry.fully_encumbers(), batches.is_empty());
            prop_assert_eq!(entry.partial_parcels(), expected.as_slice());
            prop_assert!(!entry.fully_encumbers() || entry.partial_parcels().is_empty());

            let json = serde_json::to_string(&entry).unwrap();
            let parsed: EncumbranceEntry = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, entry);
        }
    }
}
