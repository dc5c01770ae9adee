use crate::domain::model::Character;
use crate::utils::error::{RnmError, Result};

const HEADER: [&str; 7] = ["id", "name", "status", "species", "gender", "origin", "episodes"];

/// Renders characters as CSV. Invalid entries keep their id and name only.
pub fn characters_to_csv(characters: &[Character]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for character in characters {
        let valid = character.entry.is_valid();
        let episodes = if valid {
            character.episode.len().to_string()
        } else {
            String::new()
        };
        let origin = if valid {
            character.origin.name.as_str()
        } else {
            ""
        };

        writer.write_record([
            character.entry.id.to_string().as_str(),
            character.entry.name.as_str(),
            character.status().unwrap_or_default(),
            character.species().unwrap_or_default(),
            character.gender().unwrap_or_default(),
            origin,
            episodes.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RnmError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RnmError::validation(format!("CSV is not UTF-8: {}", e)))
}
