//! Input validation
//!
//! Field-level validation rules for game and review submissions. Length
//! bounds are inclusive and counted in characters, not bytes.

use regex::Regex;
use std::sync::OnceLock;

/// The fixed genre catalog a game may be tagged with.
pub const GENRE_OPTIONS: &[&str] = &[
    "Acción",
    "Aventura",
    "Battle Royale",
    "Carrrera",
    "Ciencia Ficción",
    "Deportes",
    "Estrategia",
    "Fantasia",
    "Indie",
    "Metroidvania",
    "MOBA",
    "Multiplayer",
    "Mundo Abierto",
    "Party Game",
    "Peleas",
    "Plataforma",
    "Rogue Like",
    "RPG",
    "Sandbox",
    "Shooter",
    "Sigilo",
    "Simulador",
    "Souls Like",
    "Superheroes",
    "Survival",
    "Tactical",
    "Team-Based",
    "Terror",
];

/// A string is valid when it is not blank and its character count lies
/// within `min..=max`.
pub fn valid_string(input: &str, min: usize, max: usize) -> bool {
    let len = input.chars().count();
    !input.trim().is_empty() && len >= min && len <= max
}

/// A number is valid when it lies within `min..=max`.
pub fn valid_number(input: i32, min: i32, max: i32) -> bool {
    input >= min && input <= max
}

/// A cover image must be an http(s) URL ending in an image extension,
/// 10 to 300 characters long.
pub fn valid_image_url(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^https?://.*\.(png|jpg|jpeg|gif|bmp|webp|svg)$")
            .unwrap_or_else(|e| panic!("invalid image pattern: {e}"))
    });

    valid_string(input, 10, 300) && pattern.is_match(input.trim())
}

/// Genres are valid when non-empty, duplicate-free and all drawn from the
/// genre catalog.
pub fn valid_genres(genres: &[String]) -> bool {
    if genres.is_empty() {
        return false;
    }
    let unique: std::collections::HashSet<&str> = genres.iter().map(String::as_str).collect();
    unique.len() == genres.len() && genres.iter().all(|g| GENRE_OPTIONS.contains(&g.as_str()))
}

/// A review rating must be 0 to 5 in half-point steps.
pub fn valid_rating(rating: f64) -> bool {
    (0.0..=5.0).contains(&rating) && (rating * 2.0).fract() == 0.0
}
