use std::io::Write;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod media;
pub mod model;
pub mod persisters;
pub mod seed;
pub mod storage;

use catalog::CatalogStore;
use cli::{Cli, Command, MovieFields};
use config::Config;
use error::{CatalogError, Result};
use form::MovieForm;
use model::{MovieRecord, Person};
use persisters::csv_writer::CsvWriter;
use storage::FileStorage;

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = Config::from_cli(&cli);
    let mut store = open_store(&config)?;

    match cli.command {
        Command::List { search } => list_movies(&store, search.as_deref(), out),
        Command::Show { title } => show_movie(&store, &title, out),
        Command::Add { title, fields } => add_movie(&mut store, title, fields, out),
        Command::Edit {
            original_title,
            title,
            fields,
        } => edit_movie(&mut store, &original_title, title, fields, out),
        Command::Rate {
            title,
            person,
            value,
        } => rate_movie(&mut store, &title, person, value, out),
        Command::Export { file, person } => {
            CsvWriter::save_movies_to_csv(store.get_all(), person, &file)?;
            log::info!(
                "Successfully generated {} with {}'s ratings",
                file.display(),
                person
            );
            Ok(())
        }
    }
}

pub fn open_store(config: &Config) -> Result<CatalogStore<FileStorage>> {
    let seed = match &config.seed_path {
        Some(path) => seed::load_seed_file(path)?,
        None => seed::bundled_seed()?,
    };

    log::debug!("Opening catalog in {}", config.data_dir.display());
    let mut store = CatalogStore::with_key(
        FileStorage::new(config.data_dir.clone()),
        config.storage_key.clone(),
    );
    store.load(&seed)?;
    Ok(store)
}

fn list_movies<W: Write>(
    store: &CatalogStore<FileStorage>,
    search: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let movies = display::filter_by_title(store.get_all(), search.unwrap_or(""));
    for movie in movies {
        writeln!(out, "{}", movie.title)?;
    }
    Ok(())
}

fn show_movie<W: Write>(store: &CatalogStore<FileStorage>, title: &str, out: &mut W) -> Result<()> {
    let movie = store
        .find_by_title(title)
        .ok_or_else(|| CatalogError::MovieNotFound(title.to_string()))?;

    writeln!(out, "{}", movie.title)?;
    writeln!(out, "Poster:    {}", display::describe_poster(&movie.poster))?;
    writeln!(
        out,
        "Actors:    {}",
        display::text_or(movie.actors.as_deref(), display::NO_ACTORS)
    )?;

    let rating = movie.rating();
    let stars: Vec<String> = Person::ALL
        .iter()
        .map(|person| format!("{} {}", person, display::stars(rating.get(*person))))
        .collect();
    writeln!(out, "Ratings:   {}", stars.join("  "))?;

    let music = match movie.music.as_deref() {
        Some(music) if !music.is_empty() => display::describe_media(music),
        _ => display::NO_MUSIC.to_string(),
    };
    writeln!(out, "Music:     {}", music)?;

    let trailer = match movie.trailer.as_deref() {
        Some(trailer) if !trailer.is_empty() => display::trailer_embed_url(trailer),
        _ => format!("search {}", display::trailer_search_url(&movie.title)),
    };
    writeln!(out, "Trailer:   {}", trailer)?;
    writeln!(
        out,
        "Platforms: {}",
        display::text_or(movie.platforms.as_deref(), display::DEFAULT_PLATFORMS)
    )?;
    writeln!(
        out,
        "Comments:  {}",
        display::text_or(movie.comments.as_deref(), display::NO_COMMENTS)
    )?;

    writeln!(out, "Quotes:")?;
    if movie.quotes.is_empty() {
        writeln!(out, "  {}", display::NO_QUOTES)?;
    }
    for quote in &movie.quotes {
        writeln!(out, "  {}", display::format_quote(quote))?;
    }
    Ok(())
}

fn add_movie<W: Write>(
    store: &mut CatalogStore<FileStorage>,
    title: String,
    fields: MovieFields,
    out: &mut W,
) -> Result<()> {
    let mut form = MovieForm {
        title,
        ..Default::default()
    };
    apply_fields(&mut form, fields)?;

    let movie = form.into_record();
    let title = movie.title.clone();
    store.upsert(movie)?;
    writeln!(out, "Saved '{}'", title)?;
    Ok(())
}

fn edit_movie<W: Write>(
    store: &mut CatalogStore<FileStorage>,
    original_title: &str,
    new_title: Option<String>,
    fields: MovieFields,
    out: &mut W,
) -> Result<()> {
    let mut form = match store.find_by_title(original_title) {
        Some(movie) => MovieForm::from_record(movie),
        None => return Err(CatalogError::MovieNotFound(original_title.to_string())),
    };
    if let Some(title) = new_title {
        form.title = title;
    }
    apply_fields(&mut form, fields)?;

    let movie: MovieRecord = form.into_record();
    let title = movie.title.clone();
    store.replace(original_title, movie)?;
    writeln!(out, "Saved '{}'", title)?;
    Ok(())
}

fn rate_movie<W: Write>(
    store: &mut CatalogStore<FileStorage>,
    title: &str,
    person: Person,
    value: i64,
    out: &mut W,
) -> Result<()> {
    if store.set_rating(title, person, value)? {
        writeln!(out, "{}: {} {}", title, person, display::stars(value))?;
    } else {
        log::warn!("No movie titled '{}', rating ignored", title);
    }
    Ok(())
}

fn apply_fields(form: &mut MovieForm, fields: MovieFields) -> Result<()> {
    if let Some(path) = fields.poster_file {
        form.poster = media::data_url_from_file(&path)?;
    } else if let Some(poster) = fields.poster {
        form.poster = poster;
    }
    if let Some(path) = fields.music_file {
        form.music = media::data_url_from_file(&path)?;
    }

    let text_fields = [
        (&mut form.trailer, fields.trailer),
        (&mut form.actors, fields.actors),
        (&mut form.rating_o, fields.rating_o),
        (&mut form.rating_m, fields.rating_m),
        (&mut form.rating_l, fields.rating_l),
        (&mut form.quotes, fields.quotes),
        (&mut form.platforms, fields.platforms),
        (&mut form.comments, fields.comments),
    ];
    for (slot, value) in text_fields {
        if let Some(value) = value {
            *slot = value;
        }
    }
    Ok(())
}
