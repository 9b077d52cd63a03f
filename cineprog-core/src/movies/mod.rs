// Movie catalog built alongside the screening list
// - blurbs.rs: descriptive text printed on the non-tabular pages
// - matching.rs: fuzzy title matching between tables and blurbs
// - catalog.rs: merge of printed blurbs and catalog metadata

pub mod blurbs;
pub mod catalog;
pub mod matching;

pub use blurbs::{extract_movie_blurbs, parse_meta_line, TitleDetector};
pub use catalog::build_movies;
pub use matching::{best_match_title, normalize_for_match, similarity_ratio};
