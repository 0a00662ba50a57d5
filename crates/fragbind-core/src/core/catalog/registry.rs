use super::contact::{CdrRegion, InteractionType, InterfaceContact};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "Contact {antibody} - {antigen} has a non-positive or non-finite distance: {distance}"
    )]
    InvalidDistance {
        antibody: String,
        antigen: String,
        distance: f64,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// An immutable collection of interface contacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceContactCatalog {
    contacts: Vec<InterfaceContact>,
}

impl InterfaceContactCatalog {
    /// Creates a catalog, rejecting any contact whose distance is not a positive finite number.
    pub fn new(contacts: Vec<InterfaceContact>) -> Result<Self, CatalogError> {
        if let Some(bad) = contacts
            .iter()
            .find(|c| !(c.distance.is_finite() && c.distance > 0.0))
        {
            return Err(CatalogError::InvalidDistance {
                antibody: bad.antibody_residue.clone(),
                antigen: bad.antigen_residue.clone(),
                distance: bad.distance,
            });
        }
        Ok(Self { contacts })
    }

    /// Loads a catalog from a CSV file with the header
    /// `antibody,antigen,region,interaction,distance`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_csv_reader(reader, &path.to_string_lossy())
    }

    /// Reads a catalog from any CSV source. `origin` names the source in error messages.
    pub fn from_reader(reader: impl Read, origin: &str) -> Result<Self, CatalogError> {
        Self::from_csv_reader(csv::Reader::from_reader(reader), origin)
    }

    fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        origin: &str,
    ) -> Result<Self, CatalogError> {
        let contacts = reader
            .deserialize::<InterfaceContact>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
        Self::new(contacts)
    }

    pub fn contacts(&self) -> &[InterfaceContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn by_region(&self, region: CdrRegion) -> impl Iterator<Item = &InterfaceContact> {
        self.contacts.iter().filter(move |c| c.region == region)
    }

    pub fn by_interaction(
        &self,
        interaction: InteractionType,
    ) -> impl Iterator<Item = &InterfaceContact> {
        self.contacts
            .iter()
            .filter(move |c| c.interaction == interaction)
    }

    /// Counts contacts per interaction category, in category order.
    pub fn interaction_counts(&self) -> BTreeMap<InteractionType, usize> {
        let mut counts = BTreeMap::new();
        for contact in &self.contacts {
            *counts.entry(contact.interaction).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the shortest contact, if any.
    pub fn closest(&self) -> Option<&InterfaceContact> {
        self.contacts
            .iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> InterfaceContactCatalog {
        InterfaceContactCatalog::new(vec![
            InterfaceContact::new(
                "H:ARG100",
                "A:ASP42",
                CdrRegion::Cdr3,
                InteractionType::SaltBridge,
                2.8,
            ),
            InterfaceContact::new(
                "H:TYR33",
                "A:LYS45",
                CdrRegion::Cdr1,
                InteractionType::CationPi,
                4.1,
            ),
            InterfaceContact::new(
                "L:SER52",
                "A:GLU47",
                CdrRegion::Cdr2,
                InteractionType::HydrogenBond,
                2.9,
            ),
            InterfaceContact::new(
                "H:LYS98",
                "A:GLU50",
                CdrRegion::Cdr3,
                InteractionType::SaltBridge,
                3.1,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_non_positive_distance() {
        let result = InterfaceContactCatalog::new(vec![InterfaceContact::new(
            "H:ARG100",
            "A:ASP42",
            CdrRegion::Cdr3,
            InteractionType::SaltBridge,
            0.0,
        )]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidDistance { distance, .. }) if distance == 0.0
        ));
    }

    #[test]
    fn new_rejects_nan_distance() {
        let result = InterfaceContactCatalog::new(vec![InterfaceContact::new(
            "H:ARG100",
            "A:ASP42",
            CdrRegion::Cdr3,
            InteractionType::SaltBridge,
            f64::NAN,
        )]);
        assert!(matches!(result, Err(CatalogError::InvalidDistance { .. })));
    }

    #[test]
    fn filters_select_matching_contacts() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.by_region(CdrRegion::Cdr3).count(), 2);
        assert_eq!(catalog.by_region(CdrRegion::Cdr1).count(), 1);
        assert_eq!(
            catalog
                .by_interaction(InteractionType::HydrogenBond)
                .map(|c| c.antibody_residue.as_str())
                .collect::<Vec<_>>(),
            vec!["L:SER52"]
        );
        assert_eq!(catalog.by_interaction(InteractionType::Hydrophobic).count(), 0);
    }

    #[test]
    fn interaction_counts_groups_by_category() {
        let counts = sample().interaction_counts();
        assert_eq!(counts.get(&InteractionType::SaltBridge), Some(&2));
        assert_eq!(counts.get(&InteractionType::CationPi), Some(&1));
        assert_eq!(counts.get(&InteractionType::HydrogenBond), Some(&1));
        assert_eq!(counts.get(&InteractionType::Hydrophobic), None);
    }

    #[test]
    fn closest_returns_shortest_contact() {
        let catalog = sample();
        assert_eq!(catalog.closest().unwrap().antigen_residue, "A:ASP42");
        assert!(InterfaceContactCatalog::default().closest().is_none());
    }

    #[test]
    fn load_reads_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "antibody,antigen,region,interaction,distance\n\
             H:ARG100,A:ASP42,CDR3,salt-bridge,2.8\n\
             H:TRP47,A:LEU12,cdr2,hydrophobic,3.9\n",
        )
        .unwrap();

        let catalog = InterfaceContactCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.contacts()[1].region, CdrRegion::Cdr2);
        assert_eq!(
            catalog.contacts()[1].interaction,
            InteractionType::Hydrophobic
        );
    }

    #[test]
    fn from_reader_fails_for_unknown_region() {
        let data = "antibody,antigen,region,interaction,distance\nH:ARG100,A:ASP42,FR1,salt-bridge,2.8\n";
        let result = InterfaceContactCatalog::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(CatalogError::Csv { path, .. }) if path == "inline"));
    }

    #[test]
    fn from_reader_fails_for_negative_distance() {
        let data = "antibody,antigen,region,interaction,distance\nH:ARG100,A:ASP42,CDR3,salt-bridge,-1.0\n";
        let result = InterfaceContactCatalog::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(CatalogError::InvalidDistance { .. })));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = InterfaceContactCatalog::load(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(CatalogError::Csv { .. })));
    }
}
