use std::{io, path::Path};

use csv::Writer;

use crate::{
    error::Result,
    model::{MovieRecord, Person},
};

pub struct CsvWriter {}

impl CsvWriter {
    pub fn save_movies_to_csv(movies: &[MovieRecord], person: Person, path: &Path) -> Result<()> {
        let wrt = Writer::from_path(path).map_err(|e| {
            log::error!("Could not create CSV writer for file {}", path.display());
            e
        })?;
        Self::write_movies(wrt, movies, person)
    }

    pub fn write_movies<W: io::Write>(
        mut wrt: Writer<W>,
        movies: &[MovieRecord],
        person: Person,
    ) -> Result<()> {
        wrt.write_record(MovieRecord::csv_titles())?;
        for movie in movies.iter() {
            if let Err(e) = wrt.write_record(movie.to_csvable_array(person)) {
                log::error!("Error when adding entry {:?} to CSV: {}", movie.title, e);
                return Err(e.into());
            }
        }

        wrt.flush()?;
        Ok(())
    }
}
