use tabled::{Table, Tabled};

use crate::session::{GENRES, genre_seed};

#[derive(Tabled)]
struct GenreTableRow {
    genre: String,
    seed: String,
}

pub fn genres() {
    let rows: Vec<GenreTableRow> = GENRES
        .iter()
        .map(|genre| GenreTableRow {
            genre: genre.to_uppercase(),
            seed: genre_seed(genre).to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
