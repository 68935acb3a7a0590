use super::{Catalog, CatalogError, CatalogResult};
use crate::offering::Offering;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct CatalogSnapshot {
    offerings: Vec<Offering>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Snapshot(CatalogSnapshot),
    Offerings(Vec<Offering>),
}

impl CatalogDocument {
    fn into_offerings(self) -> Vec<Offering> {
        match self {
            CatalogDocument::Snapshot(snapshot) => snapshot.offerings,
            CatalogDocument::Offerings(offerings) => offerings,
        }
    }
}

pub fn save_catalog_to_json<P: AsRef<Path>>(catalog: &Catalog, path: P) -> CatalogResult<()> {
    super::validate_offerings(catalog.offerings())?;
    let snapshot = CatalogSnapshot {
        offerings: catalog.offerings().to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let file = File::open(path)?;
    let document: CatalogDocument = serde_json::from_reader(file)?;
    Catalog::from_offerings(document.into_offerings())
}

#[derive(Default, Serialize, Deserialize)]
struct OfferingCsvRecord {
    id: String,
    #[serde(default)]
    name: String,
    category: String,
    location: String,
    price: f64,
    #[serde(default)]
    attributes: String,
}

impl From<&Offering> for OfferingCsvRecord {
    fn from(offering: &Offering) -> Self {
        let attributes = if offering.attributes.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&offering.attributes).unwrap_or_else(|_| "{}".to_string())
        };
        Self {
            id: offering.id.clone(),
            name: offering.name.clone().unwrap_or_default(),
            category: offering.category.clone(),
            location: offering.location.clone(),
            price: offering.price,
            attributes,
        }
    }
}

impl OfferingCsvRecord {
    fn into_offering(self) -> CatalogResult<Offering> {
        let attributes = if self.attributes.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str::<BTreeMap<String, Value>>(&self.attributes).map_err(|err| {
                CatalogError::InvalidData(format!(
                    "invalid attributes for offering {}: {err}",
                    self.id
                ))
            })?
        };
        let name = if self.name.trim().is_empty() {
            None
        } else {
            Some(self.name)
        };
        Ok(Offering {
            id: self.id,
            name,
            category: self.category,
            location: self.location,
            price: self.price,
            attributes,
        })
    }
}

pub fn save_catalog_to_csv<P: AsRef<Path>>(catalog: &Catalog, path: P) -> CatalogResult<()> {
    super::validate_offerings(catalog.offerings())?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for offering in catalog.offerings() {
        writer.serialize(OfferingCsvRecord::from(offering))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_catalog_from_csv<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut offerings = Vec::new();
    for record in reader.deserialize::<OfferingCsvRecord>() {
        offerings.push(record?.into_offering()?);
    }
    Catalog::from_offerings(offerings)
}
