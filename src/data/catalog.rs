use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};

use crate::{
    error::LoadError,
    models::{CatalogEntry, Metadata, MovieId},
};

const ID_COLUMN: &str = "movie_id";
const NAME_COLUMN: &str = "name";

/// Reads the catalog CSV at `path`
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, LoadError> {
    read_catalog(super::open(path.as_ref())?)
}

/// Reads catalog rows from any CSV source with a header line
///
/// `Movie_ID` and `Name` are required (header case is ignored). Every other
/// column becomes a metadata field keyed by its lowercased header; blank
/// cells are left out. Text that is not valid UTF-8 is decoded lossily.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, LoadError> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers: Vec<String> = csv
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).to_lowercase())
        .collect();

    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h == wanted)
            .ok_or_else(|| LoadError::InvalidData(format!("catalog is missing a {wanted:?} column")))
    };
    let id_column = column(ID_COLUMN)?;
    let name_column = column(NAME_COLUMN)?;

    let mut entries = Vec::new();
    let mut record = ByteRecord::new();

    while csv.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |i: usize| String::from_utf8_lossy(record.get(i).unwrap_or_default()).into_owned();

        let raw_id = field(id_column);
        let id = raw_id.parse::<u32>().map(MovieId).map_err(|_| {
            LoadError::InvalidData(format!("line {line}: invalid Movie_ID {raw_id:?}"))
        })?;

        let metadata: Metadata = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != id_column && i != name_column)
            .map(|(i, key)| (key.clone(), field(i)))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        entries.push(CatalogEntry {
            id,
            name: field(name_column),
            metadata,
        });
    }

    Ok(entries)
}
