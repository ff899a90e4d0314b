//! CSV import of the hierarchy export and the custom-data table
//!
//! Hierarchy columns: `uniqueID, userName, reportsTo, title, location, orgName`.
//! Custom columns: `user, position, email, skills, team_dscrp, distros, share_pnts`.
//! Both files carry a header row and are ISO-8859-1 encoded.

use super::identity::{CustomRecord, Identity};
use super::DirectoryResult;
use csv::{ByteRecord, ReaderBuilder};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Load hierarchy identities from a CSV file
pub fn load_hierarchy_csv(path: impl AsRef<Path>) -> DirectoryResult<Vec<Identity>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let identities = read_hierarchy(file)?;
    info!("Loaded {} identities from {}", identities.len(), path.display());
    Ok(identities)
}

/// Load custom-data records from a CSV file
pub fn load_custom_csv(path: impl AsRef<Path>) -> DirectoryResult<Vec<CustomRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let records = read_custom(file)?;
    info!("Loaded {} custom records from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_hierarchy<R: Read>(reader: R) -> DirectoryResult<Vec<Identity>> {
    let mut identities = Vec::new();
    for (line, row) in records(reader).byte_records().enumerate() {
        let row = row?;
        let full_name = column(&row, 1);
        if full_name.trim().is_empty() {
            warn!("Skipping hierarchy row {} without a name", line + 2);
            continue;
        }

        let manager = column(&row, 2);
        identities.push(Identity {
            unique_id: column(&row, 0),
            full_name,
            manager_name: (!manager.trim().is_empty()).then_some(manager),
            title: column(&row, 3),
            location: column(&row, 4),
            org_unit: column(&row, 5),
        });
    }
    Ok(identities)
}

pub fn read_custom<R: Read>(reader: R) -> DirectoryResult<Vec<CustomRecord>> {
    let mut custom = Vec::new();
    for row in records(reader).byte_records() {
        let row = row?;
        let user = column(&row, 0);
        if user.trim().is_empty() {
            continue;
        }
        custom.push(CustomRecord {
            user,
            position: column(&row, 1),
            email: column(&row, 2),
            skills: column(&row, 3),
            team_description: column(&row, 4),
            distros: column(&row, 5),
            sharepoints: column(&row, 6),
        });
    }
    Ok(custom)
}

fn records<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

// ISO-8859-1 maps every byte to the code point of the same value
fn column(row: &ByteRecord, index: usize) -> String {
    row.get(index)
        .map(|bytes| bytes.iter().map(|&b| char::from(b)).collect::<String>())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
